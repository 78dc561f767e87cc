// src/bin/qr_decoder.rs
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let port: u16 = std::env::var("DECODER_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);
    let addr: SocketAddr = SocketAddr::new("0.0.0.0".parse().unwrap(), port);
    info!("qr decoder listening on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, camu_tools::qr::router()).await?;
    Ok(())
}
