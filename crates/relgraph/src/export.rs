//! Export functionality for relgraph layouts.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a relaxed [`Layout`] into an output format. It is the last stage
//! of the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Forest Document
//!     ↓ parse
//! Relation Forest
//!     ↓ build + relax
//! Layout
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::SvgExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`RelgraphError::Export`] at the crate
//! boundary.
//!
//! [`RelgraphError::Export`]: crate::RelgraphError::Export

/// SVG export backend.
pub mod svg;

use std::io;

use crate::layout::Layout;

/// Abstraction for layout export backends.
pub trait Exporter {
    /// Writes `layout` to `writer` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_layout(&self, layout: &Layout<'_>, writer: &mut dyn io::Write) -> Result<(), Error>;
}

/// Errors that can occur during layout export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
