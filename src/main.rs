//! json-tree CLI.
//!
//! Validates and pretty-prints JSON files through the library parser
//! and renderer.

use std::fs::File;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use json_tree::parse_reader;

#[derive(Parser)]
#[command(name = "jsontool")]
#[command(about = "JSON value-tree toolbox", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and report whether it is valid
    Check {
        /// Path to the JSON file
        path: String,
    },

    /// Parse a file and pretty-print it to stdout
    Fmt {
        /// Path to the JSON file
        path: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check { path }) => match load(&path) {
            Ok(_) => {
                println!("{path}: ok");
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("{path}: {message}");
                ExitCode::FAILURE
            }
        },
        Some(Commands::Fmt { path }) => match load(&path) {
            Ok(value) => {
                println!("{value}");
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("{path}: {message}");
                ExitCode::FAILURE
            }
        },
        None => {
            println!("jsontool - JSON value-tree toolbox");
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}

fn load(path: &str) -> Result<json_tree::Value, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    parse_reader(file).map_err(|e| e.to_string())
}
