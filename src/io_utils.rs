//! I/O helpers for reading the release files.
//!
//! The release data predates Unicode discipline: both the fixed-width
//! metadata files and the CSV payloads carry Latin-1 bytes (species and
//! place names with accented characters) and are not valid UTF-8. All
//! decoding funnels through `encoding_rs` here so the parser and ingest
//! layers only ever see `String`s.

use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, WINDOWS_1252};

/// Encoding used for every release file. The WHATWG `latin1` label resolves
/// to windows-1252; the two agree on every byte the survey files use.
pub static LATIN1: &Encoding = WINDOWS_1252;

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

/// Reads a whole metadata text file as Latin-1 lines.
pub fn read_latin1_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).with_context(|| format!("Reading {path:?}"))?;
    let text = decode_bytes(&bytes, LATIN1)?;
    Ok(text.lines().map(str::to_string).collect())
}

pub fn open_csv_reader_from_path(path: &Path) -> Result<csv::Reader<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .double_quote(true)
        .flexible(false);
    Ok(builder.from_reader(BufReader::new(file)))
}

/// Decodes one CSV byte record field-by-field, trimming surrounding
/// whitespace; the files pad some fields to fixed widths.
pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| Ok(decode_bytes(field, encoding)?.trim().to_string()))
        .collect()
}

pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers()?.clone();
    decode_record(&headers, encoding)
}
