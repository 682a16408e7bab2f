//! Serialization errors
//!
//! Every error knows whether it only invalidates the field being decoded
//! ([`Severity::Field`]) or the whole session ([`Severity::Fatal`]).

use thiserror::Error;

use crate::config::ConfigError;
use crate::document::ValueKind;

/// Result type of the serialization layer
pub type Result<T> = std::result::Result<T, VlxError>;

/// How far an error reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The field is skipped, decoding continues
    Field,
    /// The session is aborted
    Fatal,
}

/// Direction an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Document to objects
    Import,
    /// Objects to document
    Export,
    /// Reading or writing bytes
    Io,
    /// Configuration
    Config,
}

/// Per-session error state, set by the first recorded error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorState {
    /// Nothing went wrong
    #[default]
    NoError,
    /// An import error was recorded
    ImportError,
    /// An export error was recorded
    ExportError,
}

/// Errors raised while importing, exporting, parsing or printing documents
#[derive(Error, Debug)]
pub enum VlxError {
    /// No codec is registered for a structure tag
    #[error("line {line}: no serializer registered for tag '{tag}'")]
    UnknownTag {
        /// The tag
        tag: String,
        /// Line of the structure
        line: usize,
    },

    /// No codec is registered for an object type
    #[error("no serializer registered for type '{type_name}'")]
    UnknownType {
        /// The runtime type name
        type_name: String,
    },

    /// A field holds the wrong kind of value
    #[error("line {line}: '{key}' expects {expected}, found {found}")]
    KindMismatch {
        /// Field name
        key: String,
        /// Expected kind
        expected: ValueKind,
        /// Actual kind
        found: ValueKind,
        /// Line of the value
        line: usize,
    },

    /// A decode check failed
    #[error("line {line}: check failed: {condition}")]
    Check {
        /// Text of the failed condition
        condition: String,
        /// Line of the value
        line: usize,
    },

    /// An array has the wrong number of elements
    #[error("line {line}: '{key}' expects {expected} values, found {found}")]
    Arity {
        /// Field name
        key: String,
        /// Description of the accepted lengths
        expected: String,
        /// Actual length
        found: usize,
        /// Line of the value
        line: usize,
    },

    /// An enumeration decoded to an illegal value
    #[error("line {line}: '{key}' has illegal value '{value}'")]
    UnknownEnum {
        /// Field name
        key: String,
        /// The identifier found
        value: String,
        /// Line of the value
        line: usize,
    },

    /// A reference resolved to an object of the wrong kind
    #[error("line {line}: '{key}' must reference {expected}, found {found}")]
    WrongReference {
        /// Field name
        key: String,
        /// Accepted type
        expected: String,
        /// Actual type
        found: String,
        /// Line of the value
        line: usize,
    },

    /// The document was written by another serializer version
    #[error("line {line}: unsupported serializer version {found}, expected {expected}")]
    Version {
        /// Version found
        found: i64,
        /// Version supported
        expected: i64,
        /// Line of the value
        line: usize,
    },

    /// The root structure does not have the required shape
    #[error("line {line}: malformed document: {message}")]
    DocumentShape {
        /// What was wrong
        message: String,
        /// Line of the offending node
        line: usize,
    },

    /// The text could not be parsed
    #[error("line {line}: parse error: {message}")]
    Parse {
        /// What was wrong
        message: String,
        /// Line of the offending token
        line: usize,
    },

    /// A `#uid` reference could not be linked
    #[error("line {line}: cannot link '{uid}': {message}")]
    Link {
        /// The UID
        uid: String,
        /// What was wrong
        message: String,
        /// Line of the reference
        line: usize,
    },

    /// A codec could not encode an object
    #[error("cannot export {type_name}: {message}")]
    Export {
        /// Runtime type name
        type_name: String,
        /// What was wrong
        message: String,
    },

    /// A structure key does not belong to the document
    #[error("structure key does not belong to the document")]
    DanglingStructure,

    /// An object handle does not belong to the store
    #[error("object handle does not belong to the store")]
    DanglingObject,

    /// The session was aborted by an earlier error
    #[error("session aborted by an earlier error")]
    Aborted,

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration failure
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl VlxError {
    /// How far the error reaches
    pub fn severity(&self) -> Severity {
        match self {
            VlxError::KindMismatch { .. }
            | VlxError::Check { .. }
            | VlxError::Arity { .. }
            | VlxError::UnknownEnum { .. }
            | VlxError::WrongReference { .. }
            | VlxError::Export { .. } => Severity::Field,
            _ => Severity::Fatal,
        }
    }

    /// Direction the error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            VlxError::UnknownType { .. } | VlxError::Export { .. } | VlxError::DanglingObject => {
                ErrorKind::Export
            }
            VlxError::Io(_) => ErrorKind::Io,
            VlxError::Config(_) => ErrorKind::Config,
            _ => ErrorKind::Import,
        }
    }

    /// Source line, when the error points into a document
    pub fn line(&self) -> Option<usize> {
        match self {
            VlxError::UnknownTag { line, .. }
            | VlxError::KindMismatch { line, .. }
            | VlxError::Check { line, .. }
            | VlxError::Arity { line, .. }
            | VlxError::UnknownEnum { line, .. }
            | VlxError::WrongReference { line, .. }
            | VlxError::Version { line, .. }
            | VlxError::DocumentShape { line, .. }
            | VlxError::Parse { line, .. }
            | VlxError::Link { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// True for [`Severity::Fatal`] errors
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
