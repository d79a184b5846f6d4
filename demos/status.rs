//! Print the charger status as JSON
//!
//! ```sh
//! GOE_API_URL=http://192.168.1.20 GOE_API_TOKEN=... cargo run --example status
//! ```

use anyhow::Context;
use goecharger::config::Config;
use goecharger::logging::{get_logger, init_logging};
use goecharger::ChargerClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_logging(&config.logging)?;
    config.validate().context("invalid configuration")?;

    let logger = get_logger("demo");
    logger.info(&format!("Reading status from {}", config.charger.base_url()));

    let client = ChargerClient::new(config.charger)?;
    let response = client.request_status().await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
