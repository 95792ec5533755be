//! Per-file load pipeline: parse, infer, and write each release file into
//! the database, one transaction per source file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::info;
use rusqlite::Connection;

use crate::catalog::Catalog;
use crate::fetch::Layout;
use crate::ingest::{
    self, GATHER_TABLE, SPREAD_TABLE, gather_columns, read_fifty_stop_csv, spread_columns,
};
use crate::io_utils::read_latin1_lines;
use crate::parse::parse_tables;
use crate::schema::{ColumnMeta, Overrides, infer_schema};
use crate::store;

/// Loads everything under the layout: fifty-stop counts first, then the
/// fixed-width metadata files, then the metadata CSVs.
pub fn load_all(conn: &mut Connection, layout: &Layout, catalog: &Catalog) -> Result<()> {
    load_fifty_stops(conn, &layout.fifty_stop_dir())?;
    for path in files_with_extension(&layout.meta_dir(), "txt")? {
        load_meta_text_file(conn, &path, &catalog.overrides)?;
    }
    for path in files_with_extension(&layout.meta_dir(), "csv")? {
        load_meta_csv_file(conn, &path, &catalog.overrides)?;
    }
    Ok(())
}

/// Loads every extracted fifty-stop CSV into the spread and gather tables.
pub fn load_fifty_stops(conn: &mut Connection, dir: &Path) -> Result<()> {
    create_fifty_stop_tables(conn)?;
    for path in files_with_extension(dir, "csv")? {
        info!("Loading fifty-stop file {:?}", path);
        let rows = read_fifty_stop_csv(&path)?;
        let tx = conn.transaction()?;
        store::insert_rows(&tx, SPREAD_TABLE, &column_names(&spread_columns()), &rows.spread)?;
        store::insert_rows(&tx, GATHER_TABLE, &column_names(&gather_columns()), &rows.gather)?;
        tx.commit()
            .with_context(|| format!("Committing {path:?}"))?;
    }
    Ok(())
}

fn create_fifty_stop_tables(conn: &Connection) -> Result<()> {
    store::create_table(conn, SPREAD_TABLE)?;
    store::add_columns(conn, SPREAD_TABLE, &spread_columns())?;
    store::create_table(conn, GATHER_TABLE)?;
    store::add_columns(conn, GATHER_TABLE, &gather_columns())?;
    Ok(())
}

fn column_names(columns: &[ColumnMeta]) -> Vec<String> {
    columns.iter().map(|column| column.name.clone()).collect()
}

/// Parses one fixed-width metadata file and loads every table it holds.
/// Returns how many tables the file produced.
pub fn load_meta_text_file(
    conn: &mut Connection,
    path: &Path,
    overrides: &Overrides,
) -> Result<usize> {
    info!("Loading metadata file {:?}", path);
    let lines = read_latin1_lines(path)?;
    let base_name = table_base_name(path)?;
    let mut tables =
        parse_tables(&lines, &base_name).with_context(|| format!("Parsing {path:?}"))?;
    for table in &mut tables {
        let schema = infer_schema(table, overrides);
        table.attach_schema(schema);
    }
    let tx = conn.transaction()?;
    for table in &tables {
        store::load_table(&tx, table)?;
    }
    tx.commit().with_context(|| format!("Committing {path:?}"))?;
    Ok(tables.len())
}

/// Loads one metadata CSV (Weather, Routes) as a single inferred table.
pub fn load_meta_csv_file(conn: &mut Connection, path: &Path, overrides: &Overrides) -> Result<()> {
    info!("Loading metadata file {:?}", path);
    let table = ingest::table_from_csv(path, overrides)?;
    let tx = conn.transaction()?;
    store::load_table(&tx, &table)?;
    tx.commit().with_context(|| format!("Committing {path:?}"))
}

fn table_base_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("no usable file stem in {path:?}"))
}

/// Regular files in `dir` with the given extension, sorted for stable
/// load order.
fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).with_context(|| format!("Listing {dir:?}"))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
