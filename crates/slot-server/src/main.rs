//! Availability HTTP server binary.
//!
//! # Environment Variables
//!
//! - `SLOT_CONFIG`: Path to the TOML config (built-in defaults if unset)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 4000)
//! - `RUST_LOG`: Log filter (default: info)
//! - The variable named by `[server.google].api_key_env` holds the calendar API key

use std::env;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use slot_server::{build_state, create_router, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = match env::var("SLOT_CONFIG") {
        Ok(path) => {
            info!(%path, "loading config");
            ServerConfig::from_file(&path)?
        }
        Err(_) => ServerConfig::default(),
    };

    // Configuration defects stop the server here, not on the first request.
    let state = build_state(&config, |name| env::var(name).ok())?;
    let app = create_router(state, &config.server.allowed_origins);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4000);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Availability API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
