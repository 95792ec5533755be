//! Fixed-width table parser for the release metadata text files.
//!
//! Each file holds zero or more human-formatted tables. A table is a header
//! line, a ruler line of dashes directly beneath it, and data lines until a
//! blank line or end of input:
//!
//! ```text
//! Seq  AOU    English_Common_Name
//! ---  -----  -------------------
//! 6    01770  Black-bellied Whistling-Duck
//! ```
//!
//! The ruler is authoritative for column layout: each maximal run of dashes
//! defines one column's width, and data cells are cut by those widths with a
//! single separator column between fields. Prose before a table is skipped;
//! a file with no ruler anywhere yields no tables. Cells wider than their
//! ruler segment bleed into the following column; the files do not do this
//! in practice and the parser does not guard against it.

use crate::error::{SchemaError, SchemaResult};
use crate::normalize::clean_headers;
use crate::table::Table;

/// Parses every table in `lines`, naming them from `base_name`.
///
/// Tables after the first get a zero-padded suffix in discovery order
/// (`RouteInf`, `RouteInf01`, ...). The function is pure: the same lines
/// always produce the same tables.
pub fn parse_tables(lines: &[String], base_name: &str) -> SchemaResult<Vec<Table>> {
    let mut tables = Vec::new();
    let mut index = 0usize;
    for segment in segments(lines) {
        if let Some(table) = parse_segment(segment, base_name, index)? {
            tables.push(table);
            index += 1;
        }
    }
    Ok(tables)
}

/// Blank-line-delimited blocks, each at most one table.
fn segments(lines: &[String]) -> impl Iterator<Item = &[String]> {
    lines
        .split(|line| line.trim().is_empty())
        .filter(|segment| !segment.is_empty())
}

fn parse_segment(segment: &[String], base_name: &str, index: usize) -> SchemaResult<Option<Table>> {
    let Some(ruler_idx) = segment.iter().position(|line| line.starts_with("--")) else {
        return Ok(None);
    };

    let widths: Vec<usize> = segment[ruler_idx]
        .split_whitespace()
        .map(str::len)
        .collect();

    // The header line sits directly above the ruler. A ruler opening its
    // segment has no header, which falls out as a zero-header mismatch.
    let raw_headers: Vec<&str> = match ruler_idx.checked_sub(1) {
        Some(i) => segment[i].split_whitespace().collect(),
        None => Vec::new(),
    };
    let headers = clean_headers(&raw_headers)?;
    if headers.len() != widths.len() {
        return Err(SchemaError::ColumnCountMismatch {
            headers: headers.len(),
            columns: widths.len(),
        });
    }

    let rows = segment[ruler_idx + 1..]
        .iter()
        .map(|line| slice_row(line, &widths))
        .collect();

    let name = table_name(base_name, index);
    Ok(Some(Table::new(name, headers, rows)?))
}

/// Cuts one data line into cells by the ruler-derived widths.
///
/// Lines were decoded from Latin-1, so every character occupies one column
/// and indexing by character position matches the on-disk layout.
fn slice_row(line: &str, widths: &[usize]) -> Vec<String> {
    let chars: Vec<char> = line.trim_end().chars().collect();
    let mut cells = Vec::with_capacity(widths.len());
    let mut offset = 0usize;
    for &width in widths {
        let start = offset.min(chars.len());
        let end = (offset + width).min(chars.len());
        let cell: String = chars[start..end].iter().collect();
        cells.push(cell.trim().to_string());
        offset += width + 1;
    }
    cells
}

fn table_name(base_name: &str, index: usize) -> String {
    if index == 0 {
        base_name.to_string()
    } else {
        format!("{base_name}{index:02}")
    }
}
