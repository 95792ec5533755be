use crate::error::SchemaResult;
use crate::normalize::clean_headers;
use crate::schema::ColumnMeta;

/// One relational table extracted from a release file.
///
/// Produced by the fixed-width parser (or the metadata CSV reader) with
/// `schema` unset, annotated once by the schema inferencer, then consumed
/// read-only by the store layer.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    schema: Option<Vec<ColumnMeta>>,
}

impl Table {
    /// Builds a table from already-cleaned headers and row tuples.
    ///
    /// Headers are re-validated so the unique/non-empty invariant holds no
    /// matter which path constructed the table.
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> SchemaResult<Self> {
        clean_headers(&headers)?;
        debug_assert!(rows.iter().all(|row| row.len() == headers.len()));
        Ok(Self {
            name: name.into(),
            headers,
            rows,
            schema: None,
        })
    }

    pub fn attach_schema(&mut self, schema: Vec<ColumnMeta>) {
        debug_assert!(self.schema.is_none(), "schema attached twice");
        self.schema = Some(schema);
    }

    pub fn schema(&self) -> Option<&[ColumnMeta]> {
        self.schema.as_deref()
    }
}
