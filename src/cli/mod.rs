//! CLI module for docpage
//!
//! Provides command-line interface for:
//! - page: paginate a JSON array of documents and print the labelled page

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, PageArgs};
pub use commands::{page, run, run_command};
pub use errors::{CliError, CliResult};
pub use io::{parse_object_arg, read_documents, write_json};
