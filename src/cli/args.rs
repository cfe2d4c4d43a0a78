//! CLI argument definitions using clap
//!
//! Commands:
//! - docpage page --docs <path> [--filter <json>] [--options <json>] [--config <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// docpage - paginate JSON documents
#[derive(Parser, Debug)]
#[command(name = "docpage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Paginate a JSON array of documents and print the page
    Page(PageArgs),
}

/// Arguments of the `page` command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PageArgs {
    /// File holding a JSON array of documents
    #[arg(long)]
    pub docs: PathBuf,

    /// Query filter as JSON
    #[arg(long, default_value = "{}")]
    pub filter: String,

    /// Pagination options as JSON
    #[arg(long, default_value = "{}")]
    pub options: String,

    /// Paginator configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
