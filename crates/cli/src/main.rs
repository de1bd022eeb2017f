//! MindNest CLI: the main entry point.
//!
//! Commands:
//! - `onboard`: Create config and save the user profile
//! - `profile`: Show the profile and entry counts
//! - `mood`: Record or list mood check-ins
//! - `journal`: Write or list journal entries
//! - `chat`: Talk to the companion (single message or interactive)
//! - `signout`: Forget everything
//! - `status`: Show configuration and storage status

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "mindnest",
    about = "MindNest — your personal well-being companion",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up MindNest and save your profile
    Onboard {
        /// Your name
        #[arg(long)]
        name: Option<String>,

        /// male, female, transgender, or prefer_not_to_say
        #[arg(long)]
        gender: Option<String>,

        /// 0-12, 13-18, 19-25, 26-35, 36-50, or 51+
        #[arg(long)]
        age_group: Option<String>,
    },

    /// Show your profile
    Profile,

    /// Mood check-ins
    Mood {
        #[command(subcommand)]
        action: MoodAction,
    },

    /// Journal entries
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },

    /// Chat with your companion
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Clear the profile, moods and journal
    Signout {
        /// Required: confirms that everything should be deleted
        #[arg(long)]
        confirm: bool,
    },

    /// Show configuration and storage status
    Status,
}

#[derive(Subcommand)]
enum MoodAction {
    /// Record how you feel right now
    Add {
        /// The emoji or its label (sad, moody, neutral, happy, very happy)
        #[arg(short, long)]
        mood: Option<String>,

        /// What's on your mind
        #[arg(short, long)]
        note: String,
    },
    /// List every mood check-in
    List,
}

#[derive(Subcommand)]
enum JournalAction {
    /// Write a journal entry
    Add {
        /// The entry text
        content: String,
    },
    /// List every journal entry
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard {
            name,
            gender,
            age_group,
        } => commands::onboard::run(name, gender, age_group).await?,
        Commands::Profile => commands::profile::run().await?,
        Commands::Mood { action } => match action {
            MoodAction::Add { mood, note } => commands::mood::add(mood, note).await?,
            MoodAction::List => commands::mood::list().await?,
        },
        Commands::Journal { action } => match action {
            JournalAction::Add { content } => commands::journal::add(content).await?,
            JournalAction::List => commands::journal::list().await?,
        },
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Signout { confirm } => commands::signout::run(confirm).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
