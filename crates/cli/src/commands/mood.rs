//! `mindnest mood`: Mood check-ins.

use super::{CmdResult, load_config, open_records};
use mindnest_core::record::{Mood, MoodEntry};

pub async fn add(mood: Option<String>, note: String) -> CmdResult {
    let mood = mood.as_deref().map(str::parse::<Mood>).transpose()?;
    let entry = MoodEntry::record(mood, note)?;

    let config = load_config()?;
    let records = open_records(&config).await?;
    records.moods().append(entry).await?;

    println!("✅ Mood saved!");
    if let Some(mood) = mood {
        println!("\n  {} {}", mood.emoji(), mood.label());
        println!("  💡 {}", mood.suggestion());
    }

    Ok(())
}

pub async fn list() -> CmdResult {
    let config = load_config()?;
    let records = open_records(&config).await?;
    let entries = records.moods().all().await;

    if entries.is_empty() {
        println!("No mood entries yet.");
        return Ok(());
    }

    println!("📈 Mood History ({} entries)", entries.len());
    println!("==================");
    for entry in &entries {
        let mood = entry.mood.as_ref().map_or("N/A", Mood::emoji);
        println!("  {}  {mood}  {}", entry.date, entry.note);
    }

    Ok(())
}
