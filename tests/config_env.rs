// tests/config_env.rs
//
// Config resolution: env path override, default fallback, min-length override.
// Env vars are process-global, so every test here runs serially.

use serial_test::serial;
use std::{env, fs, path::PathBuf};

use text_insight::config::{
    AnalyzerConfig, DEFAULT_MIN_TEXT_LEN, ENV_CONFIG_PATH, ENV_MIN_TEXT_LEN,
};

fn temp_config(name: &str, content: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("text_insight_{}_{name}.toml", std::process::id()));
    fs::write(&path, content).expect("write temp config");
    path
}

fn clear_env() {
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_MIN_TEXT_LEN);
}

#[test]
#[serial]
fn env_path_is_used_when_set() {
    clear_env();
    let path = temp_config(
        "custom",
        "[server]\nmin_text_len = 42\nseed_samples = false\ndefault_user_id = 7\n",
    );
    env::set_var(ENV_CONFIG_PATH, &path);

    let cfg = AnalyzerConfig::load().expect("load config");
    assert_eq!(cfg.server.min_text_len, 42);
    assert!(!cfg.server.seed_samples);
    assert_eq!(cfg.server.default_user_id, 7);

    clear_env();
    let _ = fs::remove_file(path);
}

#[test]
#[serial]
fn missing_env_path_is_an_error() {
    clear_env();
    env::set_var(ENV_CONFIG_PATH, "/definitely/not/here/analyzer.toml");
    assert!(AnalyzerConfig::load().is_err());
    clear_env();
}

#[test]
#[serial]
fn default_path_is_the_bundled_config() {
    clear_env();
    // cargo runs integration tests from the package root.
    let cfg = AnalyzerConfig::load().expect("load bundled config");
    assert_eq!(cfg.server.min_text_len, DEFAULT_MIN_TEXT_LEN);
    assert!(cfg.server.seed_samples);
}

#[test]
#[serial]
fn min_len_env_overrides_file() {
    clear_env();
    let path = temp_config("override", "[server]\nmin_text_len = 20\n");
    env::set_var(ENV_CONFIG_PATH, &path);
    env::set_var(ENV_MIN_TEXT_LEN, "5");
    assert_eq!(AnalyzerConfig::load().unwrap().server.min_text_len, 5);

    // Garbage is ignored, file value stays.
    env::set_var(ENV_MIN_TEXT_LEN, "five");
    assert_eq!(AnalyzerConfig::load().unwrap().server.min_text_len, 20);

    clear_env();
    let _ = fs::remove_file(path);
}
