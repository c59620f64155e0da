// ⚠️ Error types for the transformation engine
//
// Record-level problems (bad names, unparsable fields) never reach this enum:
// they degrade to "absent" and are counted in the pass statistics.
// Everything here is structural and aborts the run.

use thiserror::Error;

/// Result type alias using the engine's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// An identifier could not be derived from its input
    #[error("Identity error: {0}")]
    Identity(String),

    /// A table the snapshot must provide is not there
    #[error("Missing source table: {0}")]
    MissingTable(String),

    /// A text column held a value that is not text (BLOB, non-UTF-8)
    #[error("Non-text value in {table}.{column}")]
    NonText { table: String, column: String },

    /// Snapshot could not be read
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Pass order declaration is inconsistent
    #[error("Pass order error: {0}")]
    PassOrder(String),

    /// Configuration value missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Triple store request failed
    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Snapshot(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Snapshot(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Store(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_table() {
        let err = Error::MissingTable("persons".to_string());
        assert_eq!(err.to_string(), "Missing source table: persons");
    }

    #[test]
    fn test_error_display_non_text() {
        let err = Error::NonText {
            table: "artworks".to_string(),
            column: "name".to_string(),
        };
        assert_eq!(err.to_string(), "Non-text value in artworks.name");
    }

    #[test]
    fn test_rusqlite_error_becomes_snapshot_error() {
        let err: Error = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, Error::Snapshot(_)));
    }
}
