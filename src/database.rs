//! Database session management and the PostgreSQL statement executor.
//!
//! One connection is opened at startup and held for the life of the process.

use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Date, Integer, Nullable, Text};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ConnectionConfig;
use crate::error::DbError;
use crate::executor::{QueryExecutor, ResultSet, SqlParam};

/// The single database session.
pub struct Database {
    conn: PgConnection,
}

impl Database {
    /// Open the session described by `config`.
    ///
    /// # Example
    /// ```ignore
    /// let db = Database::connect(&config)?;
    /// ```
    pub fn connect(config: &ConnectionConfig) -> Result<Self, DbError> {
        tracing::info!("Connecting to {}", config.display_url());
        let db = Self::establish(&config.connection_string())?;
        tracing::info!("Connected to database '{}'", config.dbname);
        Ok(db)
    }

    /// Open a session from a libpq connection string or a `postgres://` URL.
    pub fn establish(database_url: &str) -> Result<Self, DbError> {
        let conn = PgConnection::establish(database_url)?;
        Ok(Database { conn })
    }

    /// Test database connectivity
    pub fn test_connection(&mut self) -> Result<(), DbError> {
        diesel::sql_query("SELECT 1").execute(&mut self.conn)?;
        Ok(())
    }

    pub(crate) fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }

    /// Close the session. Closing never reports an error to the caller.
    pub fn cleanup(self) {
        drop(self.conn);
        tracing::info!("Disconnected from database");
    }
}

#[derive(QueryableByName)]
struct JsonRow {
    #[diesel(sql_type = Text)]
    json_row: String,
}

/// One ordering key: an optionally qualified column, direction, nulls placement.
static ORDER_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:[a-z_][a-z0-9_]*\.)?([a-z_][a-z0-9_]*)",
        r"(?:\s+(asc|desc))?(?:\s+nulls\s+(first|last))?$",
    ))
    .expect("ordering key pattern is valid")
});

/// Wrap `query` so each row comes back as one JSON object in select order.
///
/// A trailing `ORDER BY` is repeated on the outer query, since a subquery's
/// ordering is not guaranteed to survive the wrap.
fn as_json_rows(query: &str) -> String {
    let inner = query.trim().trim_end_matches(';').trim_end();
    let mut wrapped = format!("SELECT row_to_json(q)::text AS json_row FROM ({}) AS q", inner);
    if let Some(ordering) = outer_ordering(inner) {
        wrapped.push_str(" ORDER BY ");
        wrapped.push_str(&ordering);
    }
    wrapped
}

/// The query's trailing top-level `ORDER BY`, rewritten against the
/// subquery's output columns.
///
/// `None` unless every key is a plain column, so clauses with expressions,
/// `LIMIT` or `OFFSET` keep only their inner ordering. Keys must be selected
/// columns.
fn outer_ordering(query: &str) -> Option<String> {
    let start = last_top_level_order_by(query)?;
    let clause = &query[start + "ORDER BY".len()..];

    let keys = clause
        .split(',')
        .map(|key| {
            let caps = ORDER_KEY.captures(key.trim())?;
            let mut rewritten = caps[1].to_string();
            if let Some(direction) = caps.get(2) {
                rewritten.push(' ');
                rewritten.push_str(&direction.as_str().to_ascii_uppercase());
            }
            if let Some(nulls) = caps.get(3) {
                rewritten.push_str(" NULLS ");
                rewritten.push_str(&nulls.as_str().to_ascii_uppercase());
            }
            Some(rewritten)
        })
        .collect::<Option<Vec<_>>>()?;

    Some(keys.join(", "))
}

/// Byte offset of the last `ORDER BY` outside parentheses and string literals.
fn last_top_level_order_by(query: &str) -> Option<usize> {
    let upper = query.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    let mut depth = 0i32;
    let mut in_literal = false;
    let mut found = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\'' => in_literal = !in_literal,
            b'(' if !in_literal => depth += 1,
            b')' if !in_literal => depth -= 1,
            b'O' if !in_literal
                && depth == 0
                && bytes[i..].starts_with(b"ORDER BY")
                && (i == 0 || !is_word_byte(bytes[i - 1])) =>
            {
                found = Some(i)
            }
            _ => {}
        }
    }

    found
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn bind_params<'f>(sql: &str, params: &[SqlParam]) -> BoxedSqlQuery<'f, Pg, SqlQuery> {
    params
        .iter()
        .cloned()
        .fold(diesel::sql_query(sql).into_boxed::<Pg>(), |query, param| match param {
            SqlParam::Int(v) => query.bind::<Integer, _>(v),
            SqlParam::BigInt(v) => query.bind::<BigInt, _>(v),
            SqlParam::Text(v) => query.bind::<Text, _>(v),
            SqlParam::Date(v) => query.bind::<Date, _>(v),
            SqlParam::Null => query.bind::<Nullable<Text>, _>(None::<String>),
        })
}

impl QueryExecutor for Database {
    fn execute_update(&mut self, sql: &str, params: &[SqlParam]) -> Result<usize, DbError> {
        tracing::debug!("Executing update ({} params): {}", params.len(), sql);
        let affected = bind_params(sql, params).execute(&mut self.conn)?;
        Ok(affected)
    }

    fn fetch(&mut self, query: &str, params: &[SqlParam]) -> Result<ResultSet, DbError> {
        tracing::debug!("Executing query ({} params): {}", params.len(), query);
        let rows = bind_params(&as_json_rows(query), params).load::<JsonRow>(&mut self.conn)?;
        ResultSet::from_json_rows(rows.iter().map(|row| row.json_row.as_str()))
    }
}
