//! Error types for keyword aggregation.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One rejected `key: value` line of a `SynapticRoute` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxError {
    /// Offending key (lower-cased).
    pub key: String,
    /// Raw value as written.
    pub value: String,
    /// Human-readable constraint message.
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn new(key: &str, value: &str, message: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}: {}\" {}", self.key, self.value, self.message)
    }
}

/// Error types for the synaptic pipeline.
#[derive(Error, Debug)]
pub enum SynapticError {
    /// Option block rejected; carries every offending key.
    #[error("{} syntax error(s) in SynapticRoute block", .0.len())]
    Syntax(Vec<SyntaxError>),
    /// A regular expression from settings or exclusion rules failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern text as configured.
        pattern: String,
        /// Compiler diagnostic.
        #[source]
        source: regex::Error,
    },
    /// Settings document could not be decoded.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    /// Frontmatter of a note is not valid YAML.
    #[error("malformed frontmatter in '{note}': {message}")]
    MalformedFrontmatter {
        /// Note path.
        note: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Requested note is not part of the graph snapshot.
    #[error("note not found: {0}")]
    NoteNotFound(String),
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynapticError {
    /// Syntax errors carried by this failure, if it is a syntax failure.
    #[must_use]
    pub fn syntax_errors(&self) -> Option<&[SyntaxError]> {
        match self {
            Self::Syntax(errors) => Some(errors),
            _ => None,
        }
    }
}
