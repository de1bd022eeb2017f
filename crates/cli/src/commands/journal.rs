//! `mindnest journal`: Journal entries.

use super::{CmdResult, load_config, open_records};
use mindnest_core::record::JournalEntry;

pub async fn add(content: String) -> CmdResult {
    let entry = JournalEntry::write(content)?;

    let config = load_config()?;
    let records = open_records(&config).await?;
    records.journal().append(entry).await?;

    println!("✅ Journal entry saved.");
    Ok(())
}

pub async fn list() -> CmdResult {
    let config = load_config()?;
    let records = open_records(&config).await?;
    let entries = records.journal().all().await;

    if entries.is_empty() {
        println!("No journal entries yet.");
        return Ok(());
    }

    println!("📓 Journal ({} entries)", entries.len());
    println!("============");
    for entry in &entries {
        println!("\n  🗓  {}", entry.date);
        for line in entry.content.lines() {
            println!("  {line}");
        }
    }

    Ok(())
}
