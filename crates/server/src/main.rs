//! Name battle server binary.
//!
//! Composition root: environment configuration, logging, store seeding and
//! the HTTP listener.
//!
//! ```bash
//! NAMEBATTLE_BIND=0.0.0.0:8080 NAMEBATTLE_PERSIST=1 cargo run -p battle-server
//! ```

use anyhow::Result;
use battle_server::{AppState, ServerConfig, bootstrap, logging, router};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting name battle server");
    tracing::info!("RNG seed: {:?}", config.rng_seed);

    let engine = bootstrap::build_engine(&config)?;
    let app = router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
