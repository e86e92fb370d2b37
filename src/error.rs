//! Error types for ferro-interface
//!
//! Errors are reserved for invalid input and missing collaborator data.
//! A residue that simply does not map (intronic, off-structure, unaligned)
//! is reported as an empty result, never as an error.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Input errors (E1xxx)
    /// Empty or otherwise unusable sequence handed to the aligner
    InvalidSequenceInput = 1001,

    // Reference data errors (E2xxx)
    /// Gene/transcript not found
    GeneNotFound = 2001,
    /// Protein entry not found
    ProteinNotFound = 2002,
    /// 3D structure not found
    StructureNotFound = 2003,
    /// Chain not present in a structure
    ChainNotFound = 2004,

    // Coordinate errors (E3xxx)
    /// Invalid coordinate range
    InvalidRange = 3001,

    // Mapping errors (E5xxx)
    /// Coordinate conversion failed
    ConversionFailed = 5001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON parsing error
    JsonError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSequenceInput => "invalid sequence input",
            ErrorCode::GeneNotFound => "gene not found",
            ErrorCode::ProteinNotFound => "protein not found",
            ErrorCode::StructureNotFound => "structure not found",
            ErrorCode::ChainNotFound => "chain not found",
            ErrorCode::InvalidRange => "invalid coordinate range",
            ErrorCode::ConversionFailed => "coordinate conversion failed",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
            ErrorCode::ConfigError => "configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-interface operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterfaceError {
    /// A sequence handed to the aligner was empty or unusable
    #[error("Invalid sequence input: {msg}")]
    InvalidSequenceInput { msg: String },

    /// Gene not present in the query scope
    #[error("Gene not found: {id}")]
    GeneNotFound { id: String },

    /// Protein entry not available from the provider
    #[error("Protein not found: {accession}")]
    ProteinNotFound { accession: String },

    /// Structure not available from the source
    #[error("Structure not found: {id}")]
    StructureNotFound { id: String },

    /// Chain missing from a structure
    #[error("Chain {chain} not found in structure {structure}")]
    ChainNotFound { structure: String, chain: String },

    /// Invalid coordinates provided
    #[error("Invalid coordinates: {msg}")]
    InvalidCoordinates { msg: String },

    /// Coordinate conversion error
    #[error("Coordinate conversion error: {msg}")]
    ConversionError { msg: String },

    /// Configuration error
    #[error("Configuration error: {msg}")]
    Config { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl InterfaceError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            InterfaceError::InvalidSequenceInput { .. } => ErrorCode::InvalidSequenceInput,
            InterfaceError::GeneNotFound { .. } => ErrorCode::GeneNotFound,
            InterfaceError::ProteinNotFound { .. } => ErrorCode::ProteinNotFound,
            InterfaceError::StructureNotFound { .. } => ErrorCode::StructureNotFound,
            InterfaceError::ChainNotFound { .. } => ErrorCode::ChainNotFound,
            InterfaceError::InvalidCoordinates { .. } => ErrorCode::InvalidRange,
            InterfaceError::ConversionError { .. } => ErrorCode::ConversionFailed,
            InterfaceError::Config { .. } => ErrorCode::ConfigError,
            InterfaceError::Io { .. } => ErrorCode::IoError,
            InterfaceError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Format the error prefixed with its code, e.g. `[E2003] Structure not found: 1abc`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }

    pub(crate) fn conversion(msg: impl Into<String>) -> Self {
        InterfaceError::ConversionError { msg: msg.into() }
    }
}

impl From<std::io::Error> for InterfaceError {
    fn from(err: std::io::Error) -> Self {
        InterfaceError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for InterfaceError {
    fn from(err: serde_json::Error) -> Self {
        InterfaceError::Json {
            msg: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::InvalidSequenceInput.as_str(), "E1001");
        assert_eq!(ErrorCode::GeneNotFound.as_str(), "E2001");
        assert_eq!(ErrorCode::StructureNotFound.as_str(), "E2003");
        assert_eq!(ErrorCode::InvalidRange.as_str(), "E3001");
        assert_eq!(ErrorCode::ConversionFailed.as_str(), "E5001");
        assert_eq!(ErrorCode::IoError.as_str(), "E9001");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(
            ErrorCode::InvalidSequenceInput.description(),
            "invalid sequence input"
        );
        assert_eq!(ErrorCode::ChainNotFound.description(), "chain not found");
        assert_eq!(ErrorCode::JsonError.description(), "JSON parsing error");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::ProteinNotFound), "E2002");
    }

    #[test]
    fn test_interface_error_code() {
        let err = InterfaceError::InvalidSequenceInput {
            msg: "empty".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::InvalidSequenceInput);

        let err = InterfaceError::ChainNotFound {
            structure: "1abc".to_string(),
            chain: "B".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::ChainNotFound);
        assert!(err.to_string().contains("1abc"));

        let err = InterfaceError::conversion("bad alignment");
        assert_eq!(err.code(), ErrorCode::ConversionFailed);
    }

    #[test]
    fn test_detailed_message() {
        let err = InterfaceError::StructureNotFound {
            id: "1abc".to_string(),
        };
        assert_eq!(err.detailed_message(), "[E2003] Structure not found: 1abc");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: InterfaceError = io_err.into();
        assert!(matches!(err, InterfaceError::Io { .. }));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: InterfaceError = json_err.into();
        assert_eq!(err.code(), ErrorCode::JsonError);
    }
}
