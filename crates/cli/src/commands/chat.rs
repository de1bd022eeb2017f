//! `mindnest chat`: Interactive or single-message chat with the companion.

use super::{CmdResult, load_config, open_records};
use mindnest_assistant::AssistantSession;
use mindnest_config::AppConfig;
use mindnest_core::completion::CompletionClient;
use mindnest_providers::ChatCompletionClient;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>) -> CmdResult {
    let config = load_config()?;

    // Check for API key early: give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    MINDNEST_API_KEY=sk-or-v1-...     (recommended)");
        eprintln!("    OPENROUTER_API_KEY=sk-or-v1-...");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        eprintln!("  Get an OpenRouter key at: https://openrouter.ai/keys");
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let records = open_records(&config).await?;
    let client: Arc<dyn CompletionClient> = Arc::new(ChatCompletionClient::from_config(&config)?);
    let session = AssistantSession::new(records.clone(), client);

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let reply = session.send(&msg).await;
        eprint!("\r              \r");
        if let Some(reply) = reply {
            println!("{}", reply.content);
        }
        return Ok(());
    }

    let name = records
        .profile()
        .load()
        .await
        .map(|p| p.name)
        .unwrap_or_else(|| "friend".into());

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        MindNest — Talk to your companion      ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Hi {name}! Ask how you've been doing lately, or just talk.");
    println!("  Model:     {}", config.model);
    println!("  Type 'exit' or 'quit' to leave.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        if !input.is_empty() {
            eprint!("  ...");
            let reply = session.send(&line).await;
            eprint!("\r     \r");
            if let Some(reply) = reply {
                println!();
                for text in reply.content.lines() {
                    println!("  MindNest > {text}");
                }
                println!();
            }
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Take care! 💚");
    println!();

    Ok(())
}
