//! CLI command implementations

use std::io;

use tracing::debug;

use crate::executor::MemoryCollection;
use crate::labels::LabeledPage;
use crate::observability::{init_logging, LogFormat, DEFAULT_DIRECTIVE};
use crate::options::{PaginateOptions, PaginatorConfig};
use crate::paginator::Paginator;

use super::args::{Cli, Command, PageArgs};
use super::errors::CliResult;
use super::io::{parse_object_arg, read_documents, write_json};

/// Parse arguments, install logging and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_logging(DEFAULT_DIRECTIVE, format)?;

    run_command(cli.command)
}

/// Run a single command on a current-thread runtime
pub fn run_command(command: Command) -> CliResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match command {
        Command::Page(args) => {
            let page = runtime.block_on(page(&args))?;
            write_json(io::stdout().lock(), &page)
        }
    }
}

/// Paginate the documents named by `args`
pub async fn page(args: &PageArgs) -> CliResult<LabeledPage> {
    let config = match &args.config {
        Some(path) => PaginatorConfig::load(path)?,
        None => PaginatorConfig::default(),
    };

    let filter = parse_object_arg("filter", &args.filter)?;
    let options = PaginateOptions::from_value(parse_object_arg("options", &args.options)?)?;
    let documents = read_documents(&args.docs)?;

    debug!(documents = documents.len(), path = %args.docs.display(), "documents loaded");

    let paginator = Paginator::new(MemoryCollection::from_documents(documents)).with_config(config);
    Ok(paginator.paginate(&filter, options).await?)
}
