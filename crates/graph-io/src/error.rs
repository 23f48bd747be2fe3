//! Error types for edge-list import and export

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Result type for edge-list operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for edge-list operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// I/O error while reading or writing an edge list
    #[error("I/O {operation} failed{}", path.as_ref().map_or(String::new(), |p| format!(": {}", p.display())))]
    #[diagnostic(
        code(graphkit_io::io),
        help("Check file permissions and ensure the path exists")
    )]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Path that caused the error, if available
        path: Option<Box<Path>>,
        /// Operation that failed ("read" or "write")
        operation: &'static str,
    },

    /// A line of the edge list could not be parsed
    #[error("Parse error on line {line}: {message}")]
    #[diagnostic(
        code(graphkit_io::parse),
        help("Each line must be 'source target', plus a weight for weighted graphs")
    )]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// A node or weight cannot be written without corrupting the line layout
    #[error("Value '{value}' cannot be written to an edge list: {reason}")]
    #[diagnostic(
        code(graphkit_io::unrepresentable),
        help("Choose a separator that does not occur in node names or weights")
    )]
    Unrepresentable {
        /// Display rendering of the node or weight
        value: String,
        /// Why the rendering cannot be written
        reason: &'static str,
    },

    /// The parsed edges could not be added to the graph
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] graphkit::Error),
}

impl Error {
    /// Create an I/O error with path context
    #[must_use]
    pub fn io(source: std::io::Error, path: impl AsRef<Path>, operation: &'static str) -> Self {
        Self::Io {
            source,
            path: Some(path.as_ref().into()),
            operation,
        }
    }

    /// Create an I/O error without path context
    #[must_use]
    pub const fn io_no_path(source: std::io::Error, operation: &'static str) -> Self {
        Self::Io {
            source,
            path: None,
            operation,
        }
    }

    /// Create a parse error for a 1-based line number
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Attach a path to an I/O error that was raised without one
    #[must_use]
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        match self {
            Self::Io {
                source,
                path: None,
                operation,
            } => Self::io(source, path, operation),
            other => other,
        }
    }
}
