//! Notes Server - HTTP JSON API for the note store service
//!
//! Reads configuration from `notes-server.*`, `NOTES_SERVER__*`, `PORT` and
//! `MONGODB_URI` (a `.env` file in the working directory is loaded first).

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();

    let config = ServerConfig::load()?;

    server::start_server(config).await?;

    Ok(())
}
