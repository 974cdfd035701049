#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use clap::error::ErrorKind;
use tendencia::cli::app::{Cli, Command, ConnectionArgs};
use tendencia::cli::commands;
use tendencia::config::{self, WarehouseSettings};

const EXIT_SUCCESS: i32 = 0;
const EXIT_RUNTIME_FAILURE: i32 = 1;
const EXIT_CONNECTION_FAILURE: i32 = 2;
const EXIT_USAGE_ERROR: i32 = 64;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return exit_code_for_parse_error(error),
    };
    let command_name = command_name(&cli.command);
    let announce = !emits_json_document(&cli.command);
    if announce {
        println!("tendencia: starting `{command_name}`");
    }

    match execute(cli) {
        Ok(()) => {
            if announce {
                println!("tendencia: completed `{command_name}` (exit_code={EXIT_SUCCESS})");
            }
            EXIT_SUCCESS
        }
        Err(error) => {
            let exit_code = classify_runtime_error(&error);
            eprintln!("tendencia: failed `{command_name}` (exit_code={exit_code})");
            eprintln!("{error:#}");
            exit_code
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Dashboard(args) => {
            let settings = resolve_settings(&cli.connection)?;
            commands::dashboard::run(&args, &settings)
        }
        Command::Question(args) => {
            let settings = resolve_settings(&cli.connection)?;
            commands::question::run(&args, &settings)
        }
        Command::Probe(args) => {
            let settings = resolve_settings(&cli.connection)?;
            commands::probe::run(&args, &settings)
        }
        Command::Schema(args) => commands::schema::run(&args),
    }
}

fn classify_runtime_error(error: &anyhow::Error) -> i32 {
    if error
        .downcast_ref::<tendencia::warehouse::ConnectionFailure>()
        .is_some()
    {
        EXIT_CONNECTION_FAILURE
    } else {
        EXIT_RUNTIME_FAILURE
    }
}

fn exit_code_for_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            EXIT_SUCCESS
        }
        _ => {
            let _ = error.print();
            EXIT_USAGE_ERROR
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Dashboard(_) => "dashboard",
        Command::Question(_) => "question",
        Command::Probe(_) => "probe",
        Command::Schema(_) => "schema",
    }
}

fn emits_json_document(command: &Command) -> bool {
    match command {
        Command::Dashboard(args) => args.json,
        Command::Question(args) => args.json,
        Command::Probe(args) => args.json,
        Command::Schema(_) => true,
    }
}

fn resolve_settings(args: &ConnectionArgs) -> Result<WarehouseSettings> {
    let database = match &args.database {
        Some(path) => path.clone(),
        None => std::env::var_os(config::DATABASE_ENV_VAR)
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("TENDENCIA_DATABASE is not set; pass --database"))?,
    };

    let schema = match &args.schema {
        Some(name) => name.clone(),
        None => std::env::var(config::SCHEMA_ENV_VAR)
            .map_err(|_| anyhow!("TENDENCIA_SCHEMA is not set; pass --schema"))?,
    };

    config::resolve_warehouse_settings(&database, &schema)
}
