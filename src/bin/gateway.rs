// src/bin/gateway.rs
use std::net::SocketAddr;

use camu_tools::gateway::Gateway;
use camu_tools::portal;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let base = std::env::var("CAMU_BASE_URL").unwrap_or_else(|_| portal::PORTAL_BASE.into());
    let port: u16 = std::env::var("GATEWAY_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3001);
    let addr: SocketAddr = SocketAddr::new("0.0.0.0".parse().unwrap(), port);
    info!("attendance gateway listening on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, camu_tools::gateway::router(Gateway::new(base))).await?;
    Ok(())
}
