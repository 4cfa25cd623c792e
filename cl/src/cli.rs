//! CLI argument parsing for crawlog

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cl")]
#[command(author, version, about = "Colorful console logging for crawler runs", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Diagnostics level on stderr (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a simulated crawl with the logger attached
    Simulate {
        /// Crawler name
        #[arg(short, long)]
        name: Option<String>,

        /// Number of URLs to crawl
        #[arg(short, long)]
        urls: Option<usize>,

        /// Retry ceiling per job
        #[arg(short = 'r', long)]
        max_retries: Option<u32>,

        /// Minimum level to print (debug, verbose, info, warn, error)
        #[arg(long)]
        level: Option<String>,

        /// Color of the crawler name
        #[arg(long)]
        color: Option<String>,

        /// Do not log page events
        #[arg(long)]
        no_page_log: bool,

        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Render a single log line
    Render {
        /// Severity of the line
        #[arg(required = true)]
        level: String,

        /// Message text
        #[arg(required = true)]
        message: String,

        /// Name shown before the level (defaults to the config file, then "crawler")
        #[arg(short, long)]
        name: Option<String>,

        /// Color of the name
        #[arg(long)]
        color: Option<String>,
    },

    /// List the logged events with their severity
    Events {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
