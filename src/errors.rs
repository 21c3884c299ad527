use std::error::Error as StdError;
use std::fmt;

/// Custom error type for destination mapping
#[derive(Debug)]
pub enum Error {
    /// Error when a source path is malformed or empty
    InvalidSource { detail: String },
    /// Error when a filter string is not a recognised predicate name
    UnknownPredicate { name: String },
    /// Error related to options parsing
    ConfigParsing {
        source: Box<dyn StdError + Send + Sync>,
        detail: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSource { detail } => {
                write!(f, "Invalid source path: {detail}")
            }
            Error::UnknownPredicate { name } => {
                write!(
                    f,
                    "'{name}' is not a recognised filter predicate (expected one of: file, directory, symlink)"
                )
            }
            Error::ConfigParsing { detail, .. } => {
                write!(f, "Options parsing error: {detail}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::ConfigParsing { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Custom Result type for destination mapping
///
/// Used as the return type for every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create an invalid source error
pub fn invalid_source_error(detail: &str) -> Error {
    Error::InvalidSource {
        detail: detail.to_string(),
    }
}

/// Helper function to create an unknown predicate error
pub fn unknown_predicate_error(name: &str) -> Error {
    Error::UnknownPredicate {
        name: name.to_string(),
    }
}

/// Helper function to create an options parsing error
pub fn config_parsing_error<E: StdError + Send + Sync + 'static>(err: E, detail: &str) -> Error {
    Error::ConfigParsing {
        source: Box::new(err),
        detail: detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_source_error() {
        let error = invalid_source_error("source path is empty");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("source path is empty"),
            "Error message should contain the detail"
        );
    }

    #[test]
    fn test_unknown_predicate_error() {
        let error = unknown_predicate_error("weird");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("weird"),
            "Error message should contain the predicate name"
        );
        assert!(
            error_string.contains("file, directory, symlink"),
            "Error message should list the recognised predicates"
        );
    }

    #[test]
    fn test_config_parsing_error() {
        let io_error = io::Error::new(io::ErrorKind::InvalidData, "Invalid YAML");
        let error = config_parsing_error(io_error, "invalid options document");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("invalid options document"),
            "Error message should contain the detail"
        );
        assert!(error.source().is_some(), "Underlying error should be kept");
    }
}
