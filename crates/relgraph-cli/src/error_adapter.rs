//! Error adapter for converting RelgraphError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Document errors
//! that carry a byte span are rendered with a labelled source snippet.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use relgraph::RelgraphError;

/// Adapter for [`RelgraphError::Document`].
pub struct DocumentAdapter<'a> {
    message: &'a str,
    /// Source document for displaying snippets
    src: &'a str,
    span: Option<&'a Range<usize>>,
}

impl<'a> DocumentAdapter<'a> {
    /// Create a new document error adapter.
    pub fn new(message: &'a str, src: &'a str, span: Option<&'a Range<usize>>) -> Self {
        Self { message, src, span }
    }
}

impl fmt::Debug for DocumentAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentAdapter")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for DocumentAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DocumentAdapter<'_> {}

impl MietteDiagnostic for DocumentAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("relgraph::document"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a forest document holds optional `width`/`height` and `[[relations]]` tables with `name`, `value`, `color`, `bgColor` and nested `relations`",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.span
            .is_some()
            .then_some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span_to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-document [`RelgraphError`] variants.
///
/// This adapter handles errors that don't have source location information,
/// such as I/O, configuration and export errors.
pub struct ErrorAdapter<'a>(pub &'a RelgraphError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            RelgraphError::Io(_) => "relgraph::io",
            RelgraphError::Document { .. } => "relgraph::document",
            RelgraphError::Config(_) => "relgraph::config",
            RelgraphError::Export(_) => "relgraph::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A document error with optional source location.
    Document(DocumentAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Document(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Document(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Document(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Document(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Document(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Document(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a byte range to a miette [`SourceSpan`].
fn span_to_miette(span: &Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Convert a [`RelgraphError`] into a reportable error.
pub fn to_reportable(err: &RelgraphError) -> Reportable<'_> {
    match err {
        RelgraphError::Document { message, src, span } => {
            Reportable::Document(DocumentAdapter::new(message, src, span.as_ref()))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
