use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cta-tracker")]
#[command(about = "Merge, explore and query CTA 'L' station ridership data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file [default: cta-tracker.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Join Lines, Stations, Stops, StopDetails and Ridership CSVs into one table
    Merge,

    /// Profile and clean the combined table, then chart the selected analyses
    Explore {
        #[arg(
            long,
            value_parser = clap::value_parser!(u8).range(0..=5),
            help = "Analysis menu choice (0-5); prompts when omitted"
        )]
        choice: Option<u8>,
    },

    /// Interactive ridership reports over the SQLite database
    Report,
}
