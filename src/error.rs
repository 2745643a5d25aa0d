//! Error types for the airline operations console.
//!
//! Errors fall into two tiers. A [`DbError::Connection`] raised while opening
//! the session is fatal and ends the process. Everything else surfaces as a
//! [`HandlerError`], which the menu loop prints before prompting again.

use std::fmt;
use std::io;

/// Failure talking to the database or materializing a result.
#[derive(Debug)]
pub enum DbError {
    Connection(diesel::ConnectionError),
    Query(diesel::result::Error),
    Decode(String),
    Io(io::Error),
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::Connection(e) => write!(f, "Unable to connect: {}", e),
            DbError::Query(e) => write!(f, "Database error: {}", e),
            DbError::Decode(msg) => write!(f, "Unexpected result: {}", msg),
            DbError::Io(e) => write!(f, "Output error: {}", e),
        }
    }
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DbError::Connection(e) => Some(e),
            DbError::Query(e) => Some(e),
            DbError::Io(e) => Some(e),
            DbError::Decode(_) => None,
        }
    }
}

impl From<diesel::ConnectionError> for DbError {
    fn from(e: diesel::ConnectionError) -> Self {
        DbError::Connection(e)
    }
}

impl From<diesel::result::Error> for DbError {
    fn from(e: diesel::result::Error) -> Self {
        DbError::Query(e)
    }
}

impl From<io::Error> for DbError {
    fn from(e: io::Error) -> Self {
        DbError::Io(e)
    }
}

/// Failure reading operator input.
#[derive(Debug)]
pub enum ConsoleError {
    Io(io::Error),
    /// Standard input was closed.
    Eof,
    Invalid {
        field: String,
        reason: String,
    },
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Io(e) => write!(f, "Console error: {}", e),
            ConsoleError::Eof => write!(f, "End of input"),
            ConsoleError::Invalid { field, reason } => {
                write!(f, "Invalid value for {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<io::Error> for ConsoleError {
    fn from(e: io::Error) -> Self {
        ConsoleError::Io(e)
    }
}

/// Failure of a single menu handler. Caught at the handler boundary.
#[derive(Debug)]
pub enum HandlerError {
    Database(DbError),
    Console(ConsoleError),
    NotFound(String),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::Database(e) => write!(f, "{}", e),
            HandlerError::Console(e) => write!(f, "{}", e),
            HandlerError::NotFound(what) => write!(f, "No such {}", what),
        }
    }
}

impl std::error::Error for HandlerError {}

impl From<DbError> for HandlerError {
    fn from(e: DbError) -> Self {
        HandlerError::Database(e)
    }
}

impl From<ConsoleError> for HandlerError {
    fn from(e: ConsoleError) -> Self {
        HandlerError::Console(e)
    }
}

impl From<io::Error> for HandlerError {
    fn from(e: io::Error) -> Self {
        HandlerError::Console(ConsoleError::Io(e))
    }
}
