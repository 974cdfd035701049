use anyhow::{Context, Result, bail};
use clap::Args;

use crate::config::WarehouseSettings;
use crate::questions::QuestionId;
use crate::render::text::render_section_lines;
use crate::report::QuestionSection;
use crate::warehouse::Warehouse;

#[derive(Debug, Clone, Args)]
pub struct QuestionArgs {
    #[arg(value_name = "NUMBER")]
    pub number: u8,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &QuestionArgs, settings: &WarehouseSettings) -> Result<()> {
    let Some(question) = QuestionId::from_number(args.number) else {
        bail!("question number must be between 1 and 8, got {}", args.number);
    };

    let mut warehouse = Warehouse::new(settings.clone());
    let section = QuestionSection::from_fetch(&mut warehouse, question)?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&section)
                .context("failed to encode question section as JSON")?
        );
    } else {
        println!("{}", render_section_lines(&section).join("\n"));
    }
    Ok(())
}
