//! Desktop server for the elevator engine.
//!
//! Runs the service loop with the HTTP API in front of it:
//! - Start the car with `POST /api/start`
//! - Queue passengers with `POST /api/request`
//! - Watch it with `GET /api/status`
//!
//! Ctrl+C drains the car before exiting.
//!
//! # Usage
//!
//! ```sh
//! RUST_LOG=debug cargo run --bin elevator_server --features web
//! ```
//!
//! # Configuration
//!
//! Edit the `Config::default()` call in `main()` to customize settings.

use std::sync::Arc;

use anyhow::Context;
use rs_elevator::hal::LogSink;
use rs_elevator::services::{run_server, ElevatorEngine, WebServerConfig};
use rs_elevator::{Config, EngineError};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Central configuration - modify this for your setup
    let config = Config::default();
    // Example of customization:
    // let config = Config::default()
    //     .with_engine(rs_elevator::EngineConfig::default()
    //         .with_move_tick_ms(500)
    //         .with_load_tick_ms(250))
    //     .with_web(rs_elevator::WebConfig::default().with_port(3000));

    if !config.web.enabled {
        anyhow::bail!("web server disabled in configuration; nothing to serve");
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let web_config = WebServerConfig::from_config(&config.web);

    log::info!(
        "{} ({}) on http://{}",
        config.device.name,
        config.device.id,
        web_config.addr
    );
    log::info!(
        "move tick {} ms, load tick {} ms",
        config.engine.move_tick_ms,
        config.engine.load_tick_ms
    );

    let engine = Arc::new(ElevatorEngine::new(LogSink, config.engine.clone()));
    let addr = web_config.addr;
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl+C: {e}");
        }
    };

    run_server(Arc::clone(&engine), web_config, ctrl_c)
        .await
        .with_context(|| format!("web server on {addr} failed"))?;

    log::info!("shutting down, draining car");
    let result = tokio::task::spawn_blocking(move || engine.stop())
        .await
        .context("drain task failed")?;
    match result {
        Ok(()) | Err(EngineError::NotRunning) => Ok(()),
        Err(e) => Err(e).context("drain failed"),
    }
}
