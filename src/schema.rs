//! Column types and the sampling-based schema inference engine.
//!
//! Inference looks at the first [`SAMPLE_ROWS`] values of each column and
//! assigns `INTEGER` when every sampled cell parses as a base-10 integer,
//! `TEXT` otherwise. A caller-supplied override always wins without
//! sampling; the release files carry `StartTime`/`EndTime` columns whose
//! values look numeric but must be stored as text.

use std::{collections::BTreeMap, fmt, fs::File, io::BufReader, path::Path, str::FromStr};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Number of leading rows sampled per column. Flat append-only files have
/// representative first rows, so a fixed cap bounds inference cost
/// independent of table size.
pub const SAMPLE_ROWS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    /// SQLite type name used in generated DDL.
    pub fn sql_name(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "INTEGER" => Ok(ColumnType::Integer),
            "TEXT" => Ok(ColumnType::Text),
            other => Err(format!("unknown column type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub data_type: ColumnType,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Map from cleaned column name to a forced column type.
pub type Overrides = BTreeMap<String, ColumnType>;

/// Assigns a column type to every header of `table`, in header order.
///
/// An override keyed by the cleaned header name short-circuits inference
/// entirely; its type is trusted verbatim. A table with zero rows infers
/// `INTEGER` for every non-overridden column (the empty sample is vacuously
/// all-integer, which is the intended default).
pub fn infer_schema(table: &Table, overrides: &Overrides) -> Vec<ColumnMeta> {
    table
        .headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let data_type = overrides
                .get(name)
                .copied()
                .unwrap_or_else(|| sample_column(&table.rows, idx));
            ColumnMeta::new(name.clone(), data_type)
        })
        .collect()
}

fn sample_column(rows: &[Vec<String>], idx: usize) -> ColumnType {
    for row in rows.iter().take(SAMPLE_ROWS) {
        if row[idx].parse::<i64>().is_err() {
            return ColumnType::Text;
        }
    }
    ColumnType::Integer
}

/// Loads an override map from a JSON file of `{"column": "TEXT", ...}`.
pub fn load_overrides(path: &Path) -> Result<Overrides> {
    let file = File::open(path).with_context(|| format!("Opening overrides file {path:?}"))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).with_context(|| format!("Parsing overrides JSON {path:?}"))
}
