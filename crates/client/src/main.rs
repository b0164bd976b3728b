//! Wasteland headless client.
//!
//! ```bash
//! WASTELAND_SEED=42 WASTELAND_TICKS=3600 cargo run -p wasteland-client
//! ```

use anyhow::Result;
use wasteland_client::{Client, ClientConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let (_guard, _log_file) = logging::setup_logging(&config.log_dir, &config.session_id)?;

    tracing::info!("Starting Wasteland client");
    tracing::info!("Session ID: {}", config.session_id);

    let client = Client::build(config).await?;
    client.run().await?;
    Ok(())
}
