//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "Coaching assistant CLI: classify turns, process memory, verify phone numbers", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the memory extractions for one turn as JSON.
    Classify {
        #[arg(short, long)]
        user_message: String,
        #[arg(short, long)]
        coach_response: Option<String>,
        #[arg(long)]
        coaching_focus: Option<String>,
        #[arg(long)]
        communication_tone: Option<String>,
    },
    /// Run one turn through the handler chain and print the stored notes and statistics.
    Process {
        #[arg(short, long)]
        owner: String,
        #[arg(short, long)]
        user_message: String,
        /// Reply returned by the chain on the coach's behalf.
        #[arg(short, long)]
        coach_response: Option<String>,
        /// Store extractions even when the extractor declines them.
        #[arg(long)]
        force: bool,
    },
    /// Issue a verification code for a phone number and check it from stdin.
    Verify {
        #[arg(short, long)]
        phone: String,
    },
}
