// src/config.rs
//! Runtime configuration loaded from TOML, with env overrides.
//!
//! Resolution order:
//! 1) `$ANALYZER_CONFIG_PATH`
//! 2) `config/analyzer.toml`
//! 3) built-in defaults (when the file does not exist)
//!
//! `$ANALYZER_MIN_TEXT_LEN` overrides `server.min_text_len` afterwards.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";
pub const DEFAULT_MIN_TEXT_LEN: usize = 10;
pub const DEFAULT_USER_ID: i64 = 1;

pub const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";
pub const ENV_MIN_TEXT_LEN: &str = "ANALYZER_MIN_TEXT_LEN";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Minimum length (in characters) of text accepted by `/api/analyze`.
    pub min_text_len: usize,
    /// Seed storage with the bundled sample documents.
    pub seed_samples: bool,
    pub default_user_id: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            min_text_len: DEFAULT_MIN_TEXT_LEN,
            seed_samples: true,
            default_user_id: DEFAULT_USER_ID,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub server: ServerConfig,
}

impl AnalyzerConfig {
    /// Load using env var + fallbacks. A missing default file is not an error;
    /// a missing file named by the env var is.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => Self::from_path(Path::new(&p))?,
            Err(_) => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_path(&path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(n) = parse_min_len_env(std::env::var(ENV_MIN_TEXT_LEN).ok()) {
            cfg.server.min_text_len = n;
        }
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading analyzer config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing analyzer config at {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

// Ignores unparsable values.
fn parse_min_len_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
}
