//! Text Insight Analyzer: binary entrypoint.
//! Boots the Axum HTTP server, wiring config, shared state, routes and metrics.

use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use text_insight::{api, metrics::Metrics, AppState};

/// Compact tracing logs, filtered by `RUST_LOG` (default `text_insight=info,warn`).
/// Uses `try_init` so a runtime-provided subscriber wins.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("text_insight=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let state = AppState::from_env()?;
    info!(
        min_text_len = state.config.server.min_text_len,
        seeded = state.config.server.seed_samples,
        "configuration loaded"
    );

    let metrics = Metrics::init()?;
    let router = api::router(state).merge(metrics.router());

    Ok(router.into())
}
