mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "etut")]
#[command(about = "Etut CLI - work/break study timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a work session, or the break after a completed work session
    Start,
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Stop the running session (a work session chains into a break)
    Stop {
        /// Name to record for the work session; prompted when omitted
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Show the current timer status
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Show aggregate statistics
    Stats,
    /// List finished sessions
    History,
    /// Rename a work session by id
    Rename {
        id: u64,
        name: String,
    },
    /// Delete the whole session history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Export the session history as a shareable file
    Export {
        /// Output format: markdown or json
        #[arg(long, default_value = "markdown")]
        format: String,
        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or change the work/break durations
    Duration {
        /// Work duration in minutes (5-120, steps of 5)
        #[arg(long)]
        work: Option<u64>,
        /// Break duration in minutes (1-30)
        #[arg(long = "break")]
        break_minutes: Option<u64>,
    },
    /// Show or change the interface language
    Lang {
        /// Language code: tr or en
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start => commands::start().await,
        Commands::Pause => commands::pause().await,
        Commands::Resume => commands::resume().await,
        Commands::Stop { name } => commands::stop(name).await,
        Commands::Status { json } => commands::status(json).await,
        Commands::Stats => commands::stats().await,
        Commands::History => commands::history().await,
        Commands::Rename { id, name } => commands::rename(id, name).await,
        Commands::Clear { yes } => commands::clear(yes).await,
        Commands::Export { format, output } => commands::export(format, output).await,
        Commands::Duration {
            work,
            break_minutes,
        } => commands::duration(work, break_minutes).await,
        Commands::Lang { language } => commands::lang(language).await,
    }
}
