//! Command-line interface definition and parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the insights application.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "EMI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do once configuration is loaded.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the REST API server.
    Serve,

    /// Interpret a single query and print the result as JSON.
    Ask {
        /// The free-text question, e.g. "average price for DAM last week".
        query: String,
    },

    /// Generate synthetic market, load, and generation data.
    Seed {
        /// Number of days of sample data to generate, ending today.
        #[arg(long, default_value_t = 90)]
        days: u32,
    },
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
