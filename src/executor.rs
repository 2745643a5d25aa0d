//! Statement execution and result materialization.
//!
//! Every statement is SQL template text plus a slice of [`SqlParam`] bind
//! values. Operator input only ever travels as a bind value, never as part
//! of the SQL text.

use chrono::NaiveDate;
use indexmap::IndexMap;
use std::io::Write;

use crate::error::DbError;

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i32),
    BigInt(i64),
    Text(String),
    Date(NaiveDate),
    Null,
}

/// Rows of a query with every value rendered as text.
///
/// `columns` is empty when the query returned no rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        ResultSet { columns, rows }
    }

    /// Decode rows produced by `row_to_json`, one JSON object per row.
    ///
    /// Column order follows the first row. Duplicate column names collapse
    /// to the last value.
    pub fn from_json_rows<I, S>(json_rows: I) -> Result<Self, DbError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = ResultSet::default();

        for json in json_rows {
            let object: IndexMap<String, serde_json::Value> =
                serde_json::from_str(json.as_ref())
                    .map_err(|e| DbError::Decode(format!("row is not a JSON object: {}", e)))?;

            if result.columns.is_empty() {
                result.columns = object.keys().cloned().collect();
            }
            result.rows.push(object.into_values().map(render_value).collect());
        }

        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First column of the first row, if any.
    pub fn scalar(&self) -> Option<&str> {
        self.rows.first().and_then(|row| row.first()).map(String::as_str)
    }

    /// Write the header once, then one line per row, each value followed by a tab.
    ///
    /// Nothing is written for an empty result. Returns the row count.
    pub fn write_tab_separated<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<usize> {
        if self.rows.is_empty() {
            return Ok(0);
        }

        for column in &self.columns {
            write!(out, "{}\t", column)?;
        }
        writeln!(out)?;

        for row in &self.rows {
            for value in row {
                write!(out, "{}\t", value)?;
            }
            writeln!(out)?;
        }

        Ok(self.rows.len())
    }
}

fn render_value(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Statement executor over an open session.
///
/// Implementors supply [`execute_update`](Self::execute_update) and
/// [`fetch`](Self::fetch); the remaining call shapes are built on them.
pub trait QueryExecutor {
    /// Run a statement that returns no rows. Returns the affected row count.
    fn execute_update(&mut self, sql: &str, params: &[SqlParam]) -> Result<usize, DbError>;

    /// Run a query and materialize every row.
    fn fetch(&mut self, query: &str, params: &[SqlParam]) -> Result<ResultSet, DbError>;

    /// Run a query and print it tab-separated with a header. Returns the row count.
    fn execute_query_and_print_result<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        query: &str,
        params: &[SqlParam],
    ) -> Result<usize, DbError> {
        let result = self.fetch(query, params)?;
        Ok(result.write_tab_separated(out)?)
    }

    /// Run a query and return its rows without a header.
    fn execute_query_and_return_result(
        &mut self,
        query: &str,
        params: &[SqlParam],
    ) -> Result<Vec<Vec<String>>, DbError> {
        Ok(self.fetch(query, params)?.rows)
    }

    /// Run a query and return the number of rows it produced.
    fn execute_query(&mut self, query: &str, params: &[SqlParam]) -> Result<usize, DbError> {
        Ok(self.fetch(query, params)?.len())
    }

    /// True when the query produced at least one row.
    fn has_rows(&mut self, query: &str, params: &[SqlParam]) -> Result<bool, DbError> {
        Ok(!self.fetch(query, params)?.is_empty())
    }

    /// Current value of `sequence` in this session, or -1 when the query yields no row.
    fn get_curr_seq_val(&mut self, sequence: &str) -> Result<i64, DbError> {
        let result = self.fetch(
            "SELECT currval($1::regclass) AS currval",
            &[SqlParam::Text(sequence.to_string())],
        )?;

        match result.scalar() {
            None => Ok(-1),
            Some(value) => value.parse::<i64>().map_err(|e| {
                DbError::Decode(format!("currval of '{}' was '{}': {}", sequence, value, e))
            }),
        }
    }
}
