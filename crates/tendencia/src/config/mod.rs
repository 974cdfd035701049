use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Result, bail};
use regex::Regex;

pub const DATABASE_ENV_VAR: &str = "TENDENCIA_DATABASE";
pub const SCHEMA_ENV_VAR: &str = "TENDENCIA_SCHEMA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseSettings {
    pub database: PathBuf,
    pub schema: String,
}

pub fn resolve_warehouse_settings(database: &Path, schema: &str) -> Result<WarehouseSettings> {
    if database.as_os_str().is_empty() {
        bail!("database path must not be empty");
    }

    let schema = schema.trim();
    if schema.is_empty() {
        bail!("schema name must not be empty");
    }
    // The schema name is spliced into query text; it must stay a plain identifier.
    if !schema_identifier_regex().is_match(schema) {
        bail!("schema name must be a plain identifier (letters, digits, underscore): `{schema}`");
    }

    Ok(WarehouseSettings {
        database: database.to_path_buf(),
        schema: schema.to_string(),
    })
}

fn schema_identifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("schema identifier regex should compile")
    })
}
