use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

const NULL_CELL: CellValue = CellValue::Null;

impl CellValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(value) => Some(*value as f64),
            CellValue::Real(value) => Some(*value),
            CellValue::Null | CellValue::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(value) => Some(*value),
            CellValue::Real(value) if value.fract() == 0.0 => Some(*value as i64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(value) => write!(formatter, "{value}"),
            CellValue::Real(value) => write!(formatter, "{value}"),
            CellValue::Text(value) => write!(formatter, "{value}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularResult {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TabularResult {
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        let columns = columns
            .into_iter()
            .map(|column| column.to_lowercase())
            .collect();
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len(), CellValue::Null);
        self.rows.push(cells);
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.rows.len()).map(|index| Row { table: self, index })
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.rows.len()).then_some(Row { table: self, index })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a TabularResult,
    index: usize,
}

impl<'a> Row<'a> {
    #[must_use]
    pub fn cell(&self, column: &str) -> &'a CellValue {
        let Some(position) = self.table.column_index(column) else {
            return &NULL_CELL;
        };
        self.table
            .rows
            .get(self.index)
            .and_then(|cells| cells.get(position))
            .unwrap_or(&NULL_CELL)
    }

    #[must_use]
    pub fn text(&self, column: &str) -> Option<&'a str> {
        self.cell(column).as_text()
    }

    #[must_use]
    pub fn number(&self, column: &str) -> Option<f64> {
        self.cell(column).as_f64()
    }

    #[must_use]
    pub fn integer(&self, column: &str) -> Option<i64> {
        self.cell(column).as_i64()
    }
}
