//! One module per subcommand, plus the wiring they share.

pub mod chat;
pub mod journal;
pub mod mood;
pub mod onboard;
pub mod profile;
pub mod signout;
pub mod status;

use mindnest_config::AppConfig;
use mindnest_records::{AppendStrategy, Records};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Open the configured record store and wrap it in the repositories.
pub async fn open_records(config: &AppConfig) -> Result<Records, Box<dyn std::error::Error>> {
    let store = mindnest_storage::build_from_config(&config.storage)
        .await
        .map_err(|e| format!("Failed to open record store: {e}"))?;
    let strategy = AppendStrategy::from_config(config.storage.serialize_appends);
    Ok(Records::with_strategy(store, strategy))
}
