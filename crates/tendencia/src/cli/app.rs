use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands::{
    dashboard::DashboardArgs, probe::ProbeArgs, question::QuestionArgs, schema::SchemaArgs,
};

#[derive(Debug, Parser)]
#[command(name = "tendencia", version, about = "Marketplace catalog trends dashboard")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    #[arg(long, global = true, value_name = "NAME")]
    pub schema: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Dashboard(DashboardArgs),
    Question(QuestionArgs),
    Probe(ProbeArgs),
    Schema(SchemaArgs),
}
