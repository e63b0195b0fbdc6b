//! Argument parsing for the driver binary.
//!
//! Two subcommands mirror the two enumeration operations; with no
//! subcommand the binary runs the worked examples this tool started from.

use clap::{Parser, Subcommand};

/// Pin-tumbler key bitting security analysis.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Emit reports as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Worker threads for parallel scans (default: one per core)
    #[arg(short = 't', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every alternate bitting that opens the given lock
    Alternates {
        /// Reference bitting, tip to bow ("11113" or "1,1,1,1,3")
        #[arg(value_name = "BITTING")]
        bitting: String,

        /// Number of possible cut depths per pin
        #[arg(short, long, default_value_t = 9)]
        cuts: u8,
    },

    /// Count bittings with no working alternate across a whole keyspace
    Unique {
        /// Number of pins
        #[arg(short, long, default_value_t = 3)]
        pins: usize,

        /// Number of possible cut depths per pin
        #[arg(short, long, default_value_t = 3)]
        cuts: u8,

        /// Partition the scan across worker threads
        #[arg(long)]
        parallel: bool,

        /// Scan even if the keyspace exceeds the exhaustive limit
        #[arg(long)]
        force: bool,
    },
}
