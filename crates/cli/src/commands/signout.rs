//! `mindnest signout`: Forget everything.

use super::{CmdResult, load_config, open_records};

pub async fn run(confirm: bool) -> CmdResult {
    if !confirm {
        println!("⚠️  This deletes your profile, mood history and journal.");
        println!("   Re-run with --confirm to proceed.");
        return Ok(());
    }

    let config = load_config()?;
    let records = open_records(&config).await?;
    records.sign_out().await?;

    println!("👋 Signed out. All MindNest data has been cleared.");
    Ok(())
}
