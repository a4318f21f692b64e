use anyhow::Result;
use colored::Colorize;

use sql_paginator::ConfigurationError;
use sql_paginator::cli::Command;
use sql_paginator::{handle_page, handle_request, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        report_error(&e);
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Page(args) => handle_page(args),
        Command::Request { file, output } => handle_request(file, output),
    }
}

fn report_error(error: &anyhow::Error) {
    let label = "Error:".red().bold();
    match error.downcast_ref::<ConfigurationError>() {
        Some(config_error) => eprintln!("{label} [{}] {config_error}", config_error.code),
        None => eprintln!("{label} {error:#}"),
    }
}
