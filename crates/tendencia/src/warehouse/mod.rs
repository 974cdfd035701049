use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use anyhow::{Context, Result};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OpenFlags};

use crate::config::WarehouseSettings;
use crate::table::{CellValue, TabularResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogQuery {
    FanBrands,
    AirFryerModels,
    ExposureLevels,
    ApplianceBrands,
    RelatedProducts,
}

impl CatalogQuery {
    #[must_use]
    pub const fn view_name(self) -> &'static str {
        match self {
            Self::FanBrands => "q1",
            Self::AirFryerModels => "q2",
            Self::ExposureLevels => "q3567",
            Self::ApplianceBrands => "q4",
            Self::RelatedProducts => "q8",
        }
    }

    #[must_use]
    pub fn sql(self, schema: &str) -> String {
        match self {
            Self::FanBrands => format!(r#"SELECT brand FROM "{schema}".q1"#),
            Self::AirFryerModels => format!(r#"SELECT name FROM "{schema}".q2"#),
            Self::ExposureLevels => format!(
                r#"SELECT name, highlight_score, sale_fee_amount, valor_relativo FROM "{schema}".q3567"#
            ),
            Self::ApplianceBrands => format!(r#"SELECT brand FROM "{schema}".q4"#),
            Self::RelatedProducts => format!(
                r#"SELECT ranking, name, brand, model FROM "{schema}".q8 ORDER BY ranking ASC LIMIT 3"#
            ),
        }
    }
}

#[must_use]
pub const fn all_catalog_queries() -> [CatalogQuery; 5] {
    [
        CatalogQuery::FanBrands,
        CatalogQuery::AirFryerModels,
        CatalogQuery::ExposureLevels,
        CatalogQuery::ApplianceBrands,
        CatalogQuery::RelatedProducts,
    ]
}

#[derive(Debug)]
pub struct ConnectionFailure {
    message: String,
}

impl ConnectionFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ConnectionFailure {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl std::error::Error for ConnectionFailure {}

pub struct Warehouse {
    settings: WarehouseSettings,
    connection: Option<Connection>,
    cache: BTreeMap<String, TabularResult>,
}

impl Warehouse {
    #[must_use]
    pub fn new(settings: WarehouseSettings) -> Self {
        Self {
            settings,
            connection: None,
            cache: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_connection(settings: WarehouseSettings, connection: Connection) -> Self {
        Self {
            settings,
            connection: Some(connection),
            cache: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &WarehouseSettings {
        &self.settings
    }

    pub fn fetch(&mut self, query: CatalogQuery) -> Result<TabularResult> {
        let sql = query.sql(&self.settings.schema);
        if let Some(cached) = self.cache.get(&sql) {
            return Ok(cached.clone());
        }

        let table = {
            let connection = self.connection()?;
            execute_catalog_query(connection, &sql)
                .with_context(|| format!("failed to fetch the `{}` view", query.view_name()))?
        };
        self.cache.insert(sql, table.clone());
        Ok(table)
    }

    pub fn connection(&mut self) -> Result<&Connection> {
        if self.connection.is_none() {
            self.connection = Some(open_warehouse_connection(&self.settings)?);
        }
        Ok(self
            .connection
            .as_ref()
            .expect("warehouse connection was just opened"))
    }

    #[must_use]
    pub fn cached_query_count(&self) -> usize {
        self.cache.len()
    }
}

fn open_warehouse_connection(settings: &WarehouseSettings) -> Result<Connection> {
    if !settings.database.is_file() {
        return Err(anyhow::Error::new(ConnectionFailure::new(format!(
            "warehouse database not found: {}",
            settings.database.display()
        ))));
    }

    Connection::open_with_flags(&settings.database, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
        |error| {
            anyhow::Error::new(ConnectionFailure::new(format!(
                "failed to open warehouse database {}: {error}",
                settings.database.display()
            )))
        },
    )
}

fn execute_catalog_query(connection: &Connection, sql: &str) -> Result<TabularResult> {
    let mut statement = connection.prepare(sql).context("failed to prepare query")?;
    let column_names = statement
        .column_names()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    let column_count = column_names.len();
    let mut table = TabularResult::new(column_names);

    let mut rows = statement.query([]).context("failed to execute query")?;
    while let Some(row) = rows.next().context("failed to fetch query row")? {
        let mut cells = Vec::with_capacity(column_count);
        for index in 0..column_count {
            let value = row
                .get::<usize, SqlValue>(index)
                .context("failed to decode query column")?;
            cells.push(cell_value_from_sql(value));
        }
        table.push_row(cells);
    }

    Ok(table)
}

pub fn view_exists(connection: &Connection, schema: &str, view: &str) -> Result<bool> {
    let sql = format!(
        r#"SELECT COUNT(*) FROM "{schema}".sqlite_schema WHERE type IN ('view', 'table') AND name = ?1"#
    );
    let count: i64 = connection
        .query_row(&sql, [view], |row| row.get(0))
        .context("failed to probe the schema catalog")?;
    Ok(count > 0)
}

pub fn view_row_count(connection: &Connection, schema: &str, view: &str) -> Result<u64> {
    let sql = format!(r#"SELECT COUNT(*) FROM "{schema}"."{view}""#);
    let count: i64 = connection
        .query_row(&sql, [], |row| row.get(0))
        .with_context(|| format!("failed to count rows in the `{view}` view"))?;
    Ok(u64::try_from(count).unwrap_or(0))
}

fn cell_value_from_sql(value: SqlValue) -> CellValue {
    match value {
        SqlValue::Null => CellValue::Null,
        SqlValue::Integer(value) => CellValue::Integer(value),
        SqlValue::Real(value) => CellValue::Real(value),
        SqlValue::Text(value) => CellValue::Text(value),
        SqlValue::Blob(value) => CellValue::Text(encode_blob_hex(&value)),
    }
}

fn encode_blob_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push(HEX[(byte >> 4) as usize] as char);
        output.push(HEX[(byte & 0x0f) as usize] as char);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn memory_settings() -> WarehouseSettings {
        WarehouseSettings {
            database: PathBuf::from("unused.db"),
            schema: "main".to_string(),
        }
    }

    fn memory_warehouse(setup_sql: &str) -> Warehouse {
        let connection = Connection::open_in_memory().expect("in-memory sqlite should open");
        connection
            .execute_batch(setup_sql)
            .expect("fixture schema should apply");
        Warehouse::with_connection(memory_settings(), connection)
    }

    #[test]
    fn fetch_lower_cases_column_names() {
        let mut warehouse = memory_warehouse(
            "CREATE TABLE q1 (Brand TEXT);
             INSERT INTO q1 VALUES ('liliana'), ('gafa');",
        );

        let table = warehouse
            .fetch(CatalogQuery::FanBrands)
            .expect("fan brands should fetch");

        assert_eq!(table.columns(), ["brand"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn fetch_returns_empty_table_for_empty_view() {
        let mut warehouse = memory_warehouse("CREATE TABLE q2 (name TEXT);");

        let table = warehouse
            .fetch(CatalogQuery::AirFryerModels)
            .expect("empty view should still fetch");

        assert!(table.is_empty());
        assert_eq!(table.columns(), ["name"]);
    }

    #[test]
    fn fetch_memoizes_by_query_text() {
        let mut warehouse = memory_warehouse(
            "CREATE TABLE q1 (brand TEXT);
             INSERT INTO q1 VALUES ('atma');",
        );

        let first = warehouse
            .fetch(CatalogQuery::FanBrands)
            .expect("first fetch should succeed");
        assert_eq!(warehouse.cached_query_count(), 1);

        warehouse
            .connection()
            .expect("connection should be open")
            .execute_batch("DROP TABLE q1;")
            .expect("fixture drop should apply");

        let second = warehouse
            .fetch(CatalogQuery::FanBrands)
            .expect("cached fetch should succeed");
        assert_eq!(first, second);
        assert_eq!(warehouse.cached_query_count(), 1);
    }

    #[test]
    fn fetch_reports_missing_view_as_ordinary_error() {
        let mut warehouse = memory_warehouse("CREATE TABLE q1 (brand TEXT);");

        let err = warehouse
            .fetch(CatalogQuery::RelatedProducts)
            .expect_err("missing view must fail");

        assert!(err.downcast_ref::<ConnectionFailure>().is_none());
        assert!(
            err.to_string().contains("q8"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn missing_database_is_a_connection_failure() {
        let settings = WarehouseSettings {
            database: PathBuf::from("/nonexistent/tendencia/catalog.db"),
            schema: "main".to_string(),
        };
        let mut warehouse = Warehouse::new(settings);

        let err = warehouse
            .fetch(CatalogQuery::FanBrands)
            .expect_err("missing database must fail");

        assert!(err.downcast_ref::<ConnectionFailure>().is_some());
        assert!(
            err.to_string().contains("warehouse database not found"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn blob_cells_surface_as_hex_text() {
        let mut warehouse = memory_warehouse(
            "CREATE TABLE q2 (name BLOB);
             INSERT INTO q2 VALUES (x'c0ffee');",
        );

        let table = warehouse
            .fetch(CatalogQuery::AirFryerModels)
            .expect("blob view should fetch");
        let row = table.row(0).expect("blob row should exist");

        assert_eq!(row.text("name"), Some("c0ffee"));
    }

    #[test]
    fn probes_view_presence_and_row_counts() {
        let mut warehouse = memory_warehouse(
            "CREATE TABLE q1 (brand TEXT);
             INSERT INTO q1 VALUES ('philco'), ('philco'), ('sanyo');",
        );
        let connection = warehouse.connection().expect("connection should be open");

        assert!(view_exists(connection, "main", "q1").expect("probe should succeed"));
        assert!(!view_exists(connection, "main", "q8").expect("probe should succeed"));
        assert_eq!(
            view_row_count(connection, "main", "q1").expect("count should succeed"),
            3
        );
    }

    #[test]
    fn query_texts_are_schema_qualified() {
        for query in all_catalog_queries() {
            let sql = query.sql("marts");
            assert!(
                sql.contains(&format!(r#""marts".{}"#, query.view_name())),
                "unexpected sql: {sql}"
            );
        }
    }
}
