//! Core error types for the MiltonTV backend.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer,
//! and provider errors are classified into `NotFound` or `ExternalService`.

use miltontv_providers::MarketDataError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the backend.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown ticker, or no quote available for it.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A provider call failed or returned malformed data.
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored row does not match the domain schema.
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),
}

/// Validation errors for request parameters.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
}

impl From<MarketDataError> for Error {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::SymbolNotFound(symbol) => {
                Error::NotFound(format!("No quote data for {}", symbol))
            }
            other => Error::ExternalService(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_not_found_maps_to_not_found() {
        let err: Error = MarketDataError::SymbolNotFound("ZZZZ".to_string()).into();
        assert!(matches!(err, Error::NotFound(ref m) if m.contains("ZZZZ")));
    }

    #[test]
    fn other_provider_errors_map_to_external_service() {
        let err: Error = MarketDataError::RateLimited {
            provider: "YOUTUBE".to_string(),
        }
        .into();
        assert!(matches!(err, Error::ExternalService(_)));

        let err: Error = MarketDataError::provider("FINNHUB", "boom").into();
        assert_eq!(
            err.to_string(),
            "External service error: Provider error: FINNHUB - boom"
        );
    }

    #[test]
    fn out_of_range_message() {
        let err = ValidationError::OutOfRange {
            field: "pageSize",
            min: 1,
            max: 50,
            value: 80,
        };
        assert_eq!(err.to_string(), "pageSize must be between 1 and 50, got 80");
    }
}
