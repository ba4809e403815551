//! cli::args
//!
//! Command-line argument definitions using clap derive.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Moorage - vessel registry stored in a GitHub repository
#[derive(Parser, Debug)]
#[command(name = "moor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current vessel records and their version token
    #[command(
        after_help = "\
EXAMPLES:
    # Show the registry with its version token on stderr
    moor get

    # Pipe just the records into another tool
    moor get --records-only | jq length"
    )]
    Get {
        /// Print only the records, without the version line
        #[arg(long)]
        records_only: bool,
    },

    /// Replace the vessel records with the contents of a JSON file
    #[command(
        after_help = "\
EXAMPLES:
    # Replace the registry; the write is conditioned on a fresh read
    moor set vessels.json

    # Condition the write on a version observed earlier
    moor set vessels.json --expect-version 3d21ec53a331a6f037a91c368710b99387d012c1

A write conditioned on a stale version fails with a conflict instead of
overwriting changes made in between; re-run to retry against fresh state."
    )]
    Set {
        /// Path to a file holding a JSON array of records
        file: PathBuf,

        /// Version token the write must be conditioned on; defaults to the
        /// version observed by a fresh read
        #[arg(long, value_name = "TOKEN")]
        expect_version: Option<String>,
    },
}
