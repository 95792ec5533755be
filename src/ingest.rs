//! CSV ingest for the fifty-stop count files and the zipped metadata CSVs.
//!
//! Fifty-stop files share one fixed layout: seven survey key columns plus
//! `Stop1`..`Stop50` counts, all integers. Each file is loaded in two
//! shapes: *spread* keeps the CSV row as-is, *gather* unpivots the fifty
//! stop columns into (`Stop`, `Count`) pairs, fifty rows per source row.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result, anyhow};

use crate::io_utils::{self, LATIN1};
use crate::normalize::{clean_header, clean_headers};
use crate::schema::{ColumnMeta, ColumnType, Overrides, infer_schema};
use crate::table::Table;

pub const SPREAD_TABLE: &str = "fifty_stops";
pub const GATHER_TABLE: &str = "fifty_stops_gather";

pub const STOP_COUNT: usize = 50;

/// Survey key columns shared by every fifty-stop file, in file order.
pub const SURVEY_COLUMNS: [&str; 7] = [
    "RouteDataID",
    "countrynum",
    "statenum",
    "Route",
    "RPID",
    "year",
    "AOU",
];

/// Columns of the spread table: survey keys plus one column per stop.
pub fn spread_columns() -> Vec<ColumnMeta> {
    let mut columns: Vec<ColumnMeta> = SURVEY_COLUMNS
        .iter()
        .map(|name| ColumnMeta::new(*name, ColumnType::Integer))
        .collect();
    columns.extend((1..=STOP_COUNT).map(|i| ColumnMeta::new(format!("Stop{i}"), ColumnType::Integer)));
    columns
}

/// Columns of the gather table: survey keys plus stop number and count.
pub fn gather_columns() -> Vec<ColumnMeta> {
    let mut columns: Vec<ColumnMeta> = SURVEY_COLUMNS
        .iter()
        .map(|name| ColumnMeta::new(*name, ColumnType::Integer))
        .collect();
    columns.push(ColumnMeta::new("Stop", ColumnType::Integer));
    columns.push(ColumnMeta::new("Count", ColumnType::Integer));
    columns
}

/// Row tuples for both shapes of one fifty-stop file.
#[derive(Debug, Default)]
pub struct FiftyStopRows {
    pub spread: Vec<Vec<String>>,
    pub gather: Vec<Vec<String>>,
}

/// Reads one extracted fifty-stop CSV into spread and gather row tuples.
///
/// Values are pulled by column name rather than position, so a file with
/// reordered columns still loads correctly.
pub fn read_fifty_stop_csv(path: &Path) -> Result<FiftyStopRows> {
    let mut reader = io_utils::open_csv_reader_from_path(path)?;
    let headers = io_utils::reader_headers(&mut reader, LATIN1)?;
    let positions = column_positions(&headers)
        .with_context(|| format!("Resolving fifty-stop columns in {path:?}"))?;

    let mut rows = FiftyStopRows::default();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {} of {path:?}", row_idx + 2))?;
        let cells = io_utils::decode_record(&record, LATIN1)?;

        let survey: Vec<String> = positions.survey.iter().map(|&i| cells[i].clone()).collect();

        let mut spread = survey.clone();
        for &stop_idx in &positions.stops {
            spread.push(cells[stop_idx].clone());
        }
        rows.spread.push(spread);

        for (stop, &stop_idx) in positions.stops.iter().enumerate() {
            let mut gathered = survey.clone();
            gathered.push((stop + 1).to_string());
            gathered.push(cells[stop_idx].clone());
            rows.gather.push(gathered);
        }
    }
    Ok(rows)
}

struct ColumnPositions {
    survey: Vec<usize>,
    stops: Vec<usize>,
}

fn column_positions(headers: &[String]) -> Result<ColumnPositions> {
    let index: BTreeMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();
    let position = |name: &str| -> Result<usize> {
        index
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("missing column '{name}'"))
    };
    let survey = SURVEY_COLUMNS
        .iter()
        .map(|name| position(name))
        .collect::<Result<Vec<_>>>()?;
    let stops = (1..=STOP_COUNT)
        .map(|i| position(&format!("Stop{i}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(ColumnPositions { survey, stops })
}

/// Reads a metadata CSV (Weather, Routes) into a schema-annotated table.
///
/// The table is named after the cleaned file stem; headers go through the
/// normalizer and cells are Latin-1 decoded and trimmed like every other
/// release file.
pub fn table_from_csv(path: &Path, overrides: &Overrides) -> Result<Table> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("no usable file stem in {path:?}"))?;
    let name = clean_header(stem);

    let mut reader = io_utils::open_csv_reader_from_path(path)?;
    let raw_headers = io_utils::reader_headers(&mut reader, LATIN1)?;
    let headers = clean_headers(&raw_headers)
        .with_context(|| format!("Cleaning headers of {path:?}"))?;

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {} of {path:?}", row_idx + 2))?;
        rows.push(io_utils::decode_record(&record, LATIN1)?);
    }

    let mut table =
        Table::new(name, headers, rows).with_context(|| format!("Building table for {path:?}"))?;
    let schema = infer_schema(&table, overrides);
    table.attach_schema(schema);
    Ok(table)
}
