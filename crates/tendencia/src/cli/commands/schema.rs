use anyhow::{Context, Result};
use clap::Args;

use crate::report;

#[derive(Debug, Clone, Args)]
pub struct SchemaArgs {
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

pub fn run(args: &SchemaArgs) -> Result<()> {
    let schema = report::json_schema();
    let encoded = if args.pretty {
        serde_json::to_string_pretty(&schema)
    } else {
        serde_json::to_string(&schema)
    }
    .context("failed to encode dashboard report schema as JSON")?;
    println!("{encoded}");
    Ok(())
}
