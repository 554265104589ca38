//! Custom error types for the common library
//!
//! This module defines the error type shared by every component that talks
//! to the document store.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The store could not be reached or dropped the connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// No pooled connection became available in time
    #[error("Database operation timed out")]
    Timeout,

    /// Error occurred while preparing collection tables
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::PoolTimedOut => DatabaseError::Timeout,
            SqlxError::Io(_) | SqlxError::Tls(_) | SqlxError::PoolClosed => {
                DatabaseError::Connection(err)
            }
            SqlxError::Configuration(e) => DatabaseError::Configuration(e.to_string()),
            other => DatabaseError::Query(other),
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
