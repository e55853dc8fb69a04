//! Error types for adflens.
//!
//! The conversion pipeline has exactly one failure mode: a structured
//! document that does not fit the schema. Everything else is total.

use thiserror::Error;

/// Errors that can occur while turning ADF JSON into a document tree.
#[derive(Debug, Error)]
pub enum AdfError {
    /// The document does not conform to the schema the tree builder expects.
    #[error("malformed document at {path}: {reason}")]
    MalformedDocument {
        /// JSON-pointer style location of the offending value (`/0/content/1`)
        path: String,
        /// What was wrong with it
        reason: Malformed,
    },
}

/// Why a structured document was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("unknown node type `{0}`")]
    UnknownNodeType(String),

    #[error("unknown mark type `{0}`")]
    UnknownMarkType(String),

    #[error("expected {0}")]
    WrongShape(&'static str),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid attribute `{name}`: {message}")]
    InvalidAttr {
        name: &'static str,
        message: String,
    },

    #[error("empty text nodes are not allowed")]
    EmptyText,

    #[error("`{child}` is not allowed inside `{parent}`")]
    UnexpectedChild {
        parent: &'static str,
        child: &'static str,
    },
}

/// Result type alias for ADF operations.
pub type AdfResult<T> = Result<T, AdfError>;

impl AdfError {
    /// Create a malformed-document error at `path`.
    pub fn malformed(path: impl Into<String>, reason: Malformed) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            reason,
        }
    }

    /// The rejection reason.
    pub fn reason(&self) -> &Malformed {
        match self {
            Self::MalformedDocument { reason, .. } => reason,
        }
    }

    /// Location of the offending value.
    pub fn path(&self) -> &str {
        match self {
            Self::MalformedDocument { path, .. } => path,
        }
    }
}

impl Malformed {
    /// Shorthand for [`Malformed::InvalidAttr`].
    pub fn invalid_attr(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidAttr {
            name,
            message: message.into(),
        }
    }
}
