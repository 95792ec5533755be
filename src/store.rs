//! SQLite write path.
//!
//! Every table gets a synthetic `id INTEGER PRIMARY KEY`, then one
//! `ALTER TABLE .. ADD COLUMN` per schema entry, then a parameter-bound
//! bulk insert in header order. Re-adding an existing column logs a
//! warning and continues, so a re-run over an existing database is
//! tolerated; any other store failure aborts the file. Identifiers are
//! always double-quoted, so reserved-word column names (`ORDER` in the
//! species list) need no special casing.

use anyhow::{Context, Result, bail};
use itertools::Itertools;
use log::{info, warn};
use rusqlite::Connection;

use crate::schema::ColumnMeta;
use crate::table::Table;

pub const ID_COLUMN: &str = "id";

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Creates `name` with only the synthetic primary key column.
pub fn create_table(conn: &Connection, name: &str) -> Result<()> {
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {} ({} INTEGER PRIMARY KEY)",
        quote_ident(name),
        quote_ident(ID_COLUMN)
    );
    conn.execute(&sql, [])
        .with_context(|| format!("Creating table '{name}'"))?;
    Ok(())
}

/// Adds one column per schema entry, tolerating columns that already exist.
pub fn add_columns(conn: &Connection, table: &str, columns: &[ColumnMeta]) -> Result<()> {
    for column in columns {
        let sql = format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            quote_ident(table),
            quote_ident(&column.name),
            column.data_type.sql_name()
        );
        match conn.execute(&sql, []) {
            Ok(_) => {}
            Err(err) if is_duplicate_column(&err) => {
                warn!("Table '{table}': {err}");
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Adding column '{}' to '{table}'", column.name));
            }
        }
    }
    Ok(())
}

fn is_duplicate_column(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(message))
            if message.contains("duplicate column name")
    )
}

/// Bulk-inserts `rows` into `table` in header order.
pub fn insert_rows(
    conn: &Connection,
    table: &str,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        headers.iter().map(|name| quote_ident(name)).join(", "),
        (0..headers.len()).map(|_| "?").join(", ")
    );
    let mut statement = conn
        .prepare(&sql)
        .with_context(|| format!("Preparing insert for '{table}'"))?;
    for row in rows {
        statement
            .execute(rusqlite::params_from_iter(row.iter()))
            .with_context(|| format!("Inserting row into '{table}'"))?;
    }
    info!("Inserted {} record(s) into '{table}'", rows.len());
    Ok(())
}

/// Creates, widens, and fills one schema-annotated table.
pub fn load_table(conn: &Connection, table: &Table) -> Result<()> {
    let Some(schema) = table.schema() else {
        bail!("table '{}' has no schema attached", table.name);
    };
    create_table(conn, &table.name)?;
    add_columns(conn, &table.name, schema)?;
    insert_rows(conn, &table.name, &table.headers, &table.rows)
}
