//! Review sentiment server binary.
//!
//! Reads `.env` if present, loads configuration, and serves until shutdown.
//! Exits non-zero when either model artifact is missing or invalid.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;

    server::start_server(config).await?;

    Ok(())
}
