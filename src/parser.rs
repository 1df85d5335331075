// Table loader: uploaded CSV bytes -> rows of string cells -> typed traffic view.

use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::TableError;
use crate::models::domain::Cell;

pub const PROTOCOL_TYPE: &str = "protocol_type";
pub const CLASS: &str = "class";
pub const DURATION: &str = "duration";
pub const SRC_BYTES: &str = "src_bytes";
pub const DST_BYTES: &str = "dst_bytes";

/// An uploaded dataset: a header row plus string cells, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(TableError::Empty);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(TableError::TooManyFields {
                    line: record.position().map(|p| p.line()).unwrap_or_default(),
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        Self::from_reader(bytes)
    }

    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        Self::from_reader(File::open(path)?)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Cells of the first column called `name`, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }
}

/// Typed view of a [`Table`] with every traffic column the aggregators read.
///
/// Categorical columns stay optional because their absence means something
/// different to each aggregator. Numeric columns are always present: a missing
/// one is zero-filled to the table's row count.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficFrame {
    pub rows: usize,
    pub protocol_type: Option<Vec<String>>,
    pub class: Option<Vec<String>>,
    pub duration: Vec<Cell>,
    pub src_bytes: Vec<Cell>,
    pub dst_bytes: Vec<Cell>,
}

impl TrafficFrame {
    pub fn infer(table: &Table) -> Self {
        let text = |name: &str| -> Option<Vec<String>> {
            table
                .column(name)
                .map(|cells| cells.into_iter().map(str::to_string).collect())
        };
        let numeric = |name: &str| -> Vec<Cell> {
            match table.column(name) {
                Some(cells) => infer_numeric(&cells),
                None => vec![Cell::Int(0); table.len()],
            }
        };

        Self {
            rows: table.len(),
            protocol_type: text(PROTOCOL_TYPE),
            class: text(CLASS),
            duration: numeric(DURATION),
            src_bytes: numeric(SRC_BYTES),
            dst_bytes: numeric(DST_BYTES),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

/// Give a numeric column one kind for all of its cells: any text keeps the
/// column textual, any decimal or gap promotes every number to a float.
fn infer_numeric(cells: &[&str]) -> Vec<Cell> {
    let kind = cells
        .iter()
        .map(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                ColumnKind::Float
            } else if raw.parse::<i64>().is_ok() {
                ColumnKind::Int
            } else if raw.parse::<f64>().is_ok() {
                ColumnKind::Float
            } else {
                ColumnKind::Text
            }
        })
        .max()
        .unwrap_or(ColumnKind::Int);

    cells
        .iter()
        .map(|raw| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Cell::Missing;
            }
            match kind {
                ColumnKind::Int => trimmed.parse().map(Cell::Int).unwrap_or(Cell::Missing),
                ColumnKind::Float => trimmed.parse().map(Cell::Float).unwrap_or(Cell::Missing),
                ColumnKind::Text => Cell::Text((*raw).to_string()),
            }
        })
        .collect()
}
