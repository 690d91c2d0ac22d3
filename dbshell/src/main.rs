use std::fs;
use std::process::ExitCode;

use clap::Parser;

use common::config::{read_config, EngineConfig};
use common::log::TracingFactory;
use dbengine::database::manager::DatabaseManager;
use dbengine::sql::dispatcher::run_command;

mod output;
mod statements;

/// One-shot SQL command runner (§6.4 DESIGN NOTES: not an interactive
/// REPL — every invocation parses, runs, prints, and exits).
#[derive(Parser, Debug)]
#[command(name = "dbshell", version, about = "Runs one or more SQL statements against the engine and exits.")]
struct Cli {
    /// A single statement (or several, separated by `;`) to execute.
    #[arg(short = 'c', long = "command", conflicts_with = "file")]
    command: Option<String>,

    /// A file of `;`-separated statements to execute in order.
    #[arg(short = 'f', long = "file", conflicts_with = "command")]
    file: Option<String>,

    /// TOML file overriding the default `EngineConfig`.
    #[arg(long = "config")]
    config: Option<String>,

    /// Overrides the configured storage directory for this run.
    #[arg(long = "storage-dir")]
    storage_dir: Option<String>,

    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    TracingFactory::init_log(cli.debug);

    let mut config = match &cli.config {
        Some(path) => match read_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = dir.clone();
    }

    let source = match (&cli.command, &cli.file) {
        (Some(c), _) => c.clone(),
        (_, Some(path)) => match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error reading {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        (None, None) => {
            eprintln!("error: one of --command or --file is required");
            return ExitCode::FAILURE;
        }
    };

    let mut manager = DatabaseManager::new(config);
    let mut had_error = false;
    for stmt in statements::split_statements(&source) {
        match run_command(&mut manager, &stmt) {
            Ok(result) => output::print_result(&result),
            Err(e) => {
                eprintln!("error: {}", e);
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
