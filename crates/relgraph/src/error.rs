//! Error types for relgraph operations.
//!
//! The layout engine itself never fails: degenerate geometry is absorbed by
//! numeric fallbacks. [`RelgraphError`] covers the surrounding stages:
//! loading forest documents, validating configuration and exporting output.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for relgraph operations.
#[derive(Debug, Error)]
pub enum RelgraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A forest document failed to parse or validate.
    ///
    /// `span` is the byte range within `src` the problem was reported at, when known.
    #[error("Document error: {message}")]
    Document {
        message: String,
        src: String,
        span: Option<Range<usize>>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for RelgraphError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl RelgraphError {
    /// Create a new `Document` error with the associated source text.
    pub fn new_document_error(
        message: impl Into<String>,
        src: impl Into<String>,
        span: Option<Range<usize>>,
    ) -> Self {
        Self::Document {
            message: message.into(),
            src: src.into(),
            span,
        }
    }
}
