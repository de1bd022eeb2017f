//! `mindnest onboard`: First-time setup and profile form.

use super::{CmdResult, load_config, open_records};
use mindnest_config::AppConfig;
use mindnest_core::record::{AgeGroup, Gender, ProfileDraft};

pub async fn run(
    name: Option<String>,
    gender: Option<String>,
    age_group: Option<String>,
) -> CmdResult {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("🌱 MindNest — Welcome");
    println!("=====================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    }

    if !config_path.exists() {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
    }

    let draft = ProfileDraft {
        name,
        gender: gender.as_deref().map(str::parse::<Gender>).transpose()?,
        age_group: age_group.as_deref().map(str::parse::<AgeGroup>).transpose()?,
    };
    let profile = draft.build()?;

    let config = load_config()?;
    let records = open_records(&config).await?;
    records.profile().save(&profile).await?;

    println!("✅ Profile saved. Hi {}!", profile.name);
    println!("\n📝 Next steps:");
    println!("   1. Record a mood:   mindnest mood add --mood happy --note \"...\"");
    println!("   2. Write a journal: mindnest journal add \"...\"");
    println!("   3. Chat:            mindnest chat  (needs MINDNEST_API_KEY)\n");

    Ok(())
}
