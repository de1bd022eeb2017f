//! `mindnest profile`: The profile screen.

use super::{CmdResult, load_config, open_records};

pub async fn run() -> CmdResult {
    let config = load_config()?;
    let records = open_records(&config).await?;
    let summary = records.summary().await;
    let profile = summary.profile.as_ref();

    let na = || "N/A".to_string();
    println!("👤 Profile");
    println!("==========");
    println!("  🧾 Name: {}", profile.map(|p| p.name.clone()).unwrap_or_else(na));
    println!("  🚻 Gender: {}", profile.map(|p| p.gender.to_string()).unwrap_or_else(na));
    println!(
        "  🎂 Age Group: {}",
        profile.map(|p| p.age_group.to_string()).unwrap_or_else(na)
    );
    println!();
    println!("  📊 Mood Entries: {}", summary.mood_entries);
    println!("  📓 Journal Entries: {}", summary.journal_entries);
    println!();
    println!("  💭 Mental Note: Stay strong and kind 💚");
    println!("  💡 Keep going, you're doing great! 💪");

    if profile.is_none() {
        println!("\n  ⚠️  No profile yet — run `mindnest onboard` first");
    }

    Ok(())
}
