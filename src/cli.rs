use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use crate::pagination::PageRequest;

#[derive(Parser, Debug)]
#[command(author, version, about = "Page through the results of a SQL query")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch one page of a query and print its summary as JSON
    Page(PageArgs),
    /// Fetch the page described by a JSON request document
    Request {
        /// Request file (`-` reads standard input)
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PageArgs {
    /// Base query; a LIMIT/OFFSET clause is appended to it
    #[arg(short, long)]
    pub query: String,
    /// Bind value, positional, parsed as JSON when possible (repeatable)
    #[arg(long = "param", value_name = "VALUE")]
    pub params: Vec<String>,
    /// Rows per page
    #[arg(long)]
    pub per_page: Option<String>,
    /// Page number (defaults to 1)
    #[arg(short, long)]
    pub page: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct OutputArgs {
    /// SQLite database file (defaults to $DATABASE_PATH)
    #[arg(short, long)]
    pub database: Option<String>,
    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

impl PageArgs {
    pub fn to_request(&self) -> PageRequest {
        PageRequest {
            query: self.query.clone(),
            parameters: self.params.iter().map(|raw| loose_value(raw)).collect(),
            per_page: self.per_page.as_deref().map(loose_value),
            current_page: self.page.as_deref().map(loose_value),
        }
    }
}

/// JSON if the argument parses as JSON, otherwise the raw string
pub fn loose_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
