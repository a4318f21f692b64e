pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod pagination;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, OutputArgs, PageArgs};
use std::path::Path;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::pagination::PageRequest;
use crate::services::{PagingService, read_request};

pub use database::{DataSource, Row, SqliteSource};
pub use errors::ConfigurationError;
pub use pagination::{PageSettings, PageSummary, PageWindow, Paginator};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_page(args: &PageArgs) -> Result<()> {
    run_request(args.to_request(), &args.output)
}

pub fn handle_request(file: &Path, output: &OutputArgs) -> Result<()> {
    let request = read_request(file)?;
    run_request(request, output)
}

fn run_request(request: PageRequest, output: &OutputArgs) -> Result<()> {
    let config = AppConfig::from_env()?
        .with_database_path(output.database.as_deref())
        .with_compact_output(output.compact);

    let runtime = tokio::runtime::Runtime::new()?;
    let json = runtime.block_on(async {
        let service = PagingService::new(config);
        service.run(request).await
    })?;

    println!("{}", json);
    Ok(())
}
