use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ttxcollect_cli::commands;

#[derive(Parser)]
#[command(name = "ttxcollect")]
#[command(about = "Ttxcollect - Teletext packet collector for PES payload data", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a PES data field and print every collected packet
    Inspect {
        /// Input file (data identifier followed by data units)
        #[arg(short, long)]
        input: String,

        /// Output JSON file for the decoded packets
        #[arg(short, long)]
        output: Option<String>,

        /// Stop after this many packets
        #[arg(long)]
        limit: Option<usize>,

        /// Only show packets from this magazine (wire value 0-7)
        #[arg(short, long)]
        magazine: Option<u8>,
    },

    /// Summarize packet kinds, magazines and decode failures
    Stats {
        /// Input file (data identifier followed by data units)
        #[arg(short, long)]
        input: String,

        /// Print the summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Inspect {
            input,
            output,
            limit,
            magazine,
        } => commands::inspect::execute(&input, output.as_deref(), limit, magazine),

        Commands::Stats { input, json } => commands::stats::execute(&input, json),
    }
}
