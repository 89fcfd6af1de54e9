//! Error types for taxonomy operations

use thiserror::Error;

use crate::types::TaxId;

/// Main error type for taxonomy operations
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("Taxid not found: {0}")]
    NotFound(TaxId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No consensus reached: {0}")]
    NoConsensus(String),

    #[error("Cycle detected in the ancestry of {0}")]
    Cycle(TaxId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for taxonomy operations
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;

impl From<toml::de::Error> for TaxonomyError {
    fn from(err: toml::de::Error) -> Self {
        TaxonomyError::Configuration(format!("Failed to parse config: {}", err))
    }
}

impl From<toml::ser::Error> for TaxonomyError {
    fn from(err: toml::ser::Error) -> Self {
        TaxonomyError::Configuration(format!("Failed to serialize config: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let not_found = TaxonomyError::NotFound(TaxId::from(9606));
        assert_eq!(format!("{}", not_found), "Taxid not found: 9606");

        let invalid = TaxonomyError::InvalidArgument("min_consensus out of range".to_string());
        assert_eq!(
            format!("{}", invalid),
            "Invalid argument: min_consensus out of range"
        );

        let no_consensus = TaxonomyError::NoConsensus("disjoint trees".to_string());
        assert_eq!(
            format!("{}", no_consensus),
            "No consensus reached: disjoint trees"
        );

        let cycle = TaxonomyError::Cycle(TaxId::from("12"));
        assert_eq!(format!("{}", cycle), "Cycle detected in the ancestry of 12");

        let parse = TaxonomyError::Parse("line 3: expected 3 fields".to_string());
        assert_eq!(
            format!("{}", parse),
            "Parsing error: line 3: expected 3 fields"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "nodes.dmp");
        let err: TaxonomyError = io_err.into();

        match err {
            TaxonomyError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_toml_error_conversion() {
        let parsed: Result<toml::Value, toml::de::Error> = toml::from_str("[loader\n");
        let err: TaxonomyError = parsed.unwrap_err().into();

        assert!(matches!(err, TaxonomyError::Configuration(_)));
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
