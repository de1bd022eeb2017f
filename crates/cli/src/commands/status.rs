//! `mindnest status`: Show system status.

use super::{CmdResult, load_config, open_records};
use mindnest_config::AppConfig;

pub async fn run() -> CmdResult {
    let config = load_config()?;

    println!("🌱 MindNest Status");
    println!("==================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  API URL:      {}", config.api_url);
    println!("  Model:        {}", config.model);
    println!("  API key:      {}", if config.has_api_key() { "set" } else { "missing" });
    println!(
        "  Timeout:      {}",
        config
            .request_timeout_secs
            .map_or_else(|| "none".to_string(), |s| format!("{s}s"))
    );
    println!("  Storage:      {}", config.storage.backend);
    println!("  Data dir:     {}", config.storage.data_dir().display());
    println!(
        "  Appends:      {}",
        if config.storage.serialize_appends { "serialized" } else { "unguarded" }
    );

    let records = open_records(&config).await?;
    let summary = records.summary().await;
    println!("  Moods:        {}", summary.mood_entries);
    println!("  Journal:      {}", summary.journal_entries);

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `mindnest onboard` first");
    }

    if summary.profile.is_some() {
        println!("  ✅ Onboarded");
    } else {
        println!("  ⚠️  Not onboarded — run `mindnest onboard --name ... --gender ... --age-group ...`");
    }

    Ok(())
}
