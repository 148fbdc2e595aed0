//! Relgraph - force-directed layout for hierarchical relation forests.
//!
//! A forest of weighted, named [`Relation`](relation::Relation)s is turned into
//! circles whose radii reflect their weight relative to their siblings, placed
//! in a bounded viewport by a simple spring/repulsion simulation. The result
//! can be rendered to SVG.

pub mod config;
pub mod document;
pub mod export;
pub mod layout;

mod error;

pub use relgraph_core::{color, geometry, relation};

pub use error::RelgraphError;

use std::path::Path;

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use config::AppConfig;
use document::ForestDocument;
use geometry::Size;
use layout::{Layout, TreeBuilder};
use relation::Relation;

/// Builder for parsing, laying out and rendering relation forests.
///
/// # Examples
///
/// ```rust
/// use relgraph::{LayoutBuilder, config::AppConfig};
///
/// let source = r#"
/// width = 400
/// height = 300
///
/// [[relations]]
/// name = "Root"
///
///   [[relations.relations]]
///   name = "Peer"
///   value = 1
/// "#;
///
/// let builder = LayoutBuilder::new(AppConfig::default());
/// let document = builder.parse(source).expect("Failed to parse");
///
/// let layout = builder.layout(document.relations(), document.viewport());
/// assert_eq!(layout.len(), 2);
///
/// let svg = builder.render_svg(&layout).expect("Failed to render");
/// assert!(svg.contains("Peer"));
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML forest document.
    ///
    /// # Errors
    ///
    /// Returns [`RelgraphError::Document`] for malformed or invalid documents.
    pub fn parse(&self, source: &str) -> Result<ForestDocument, RelgraphError> {
        info!("Parsing forest document");
        let document = ForestDocument::parse(source)?;
        debug!(relations = document.relation_count(); "Forest document parsed successfully");
        Ok(document)
    }

    /// Build and relax a layout of `relations` inside `viewport`.
    ///
    /// Runs up to the configured `max_iterations`. Initial placement is drawn
    /// from a [`StdRng`] seeded with the configured seed when one is set, and
    /// from the thread-local generator otherwise.
    ///
    /// Configuration is not checked here; call
    /// [`LayoutConfig::validate`](config::LayoutConfig::validate) first when
    /// it comes from an untrusted source.
    pub fn layout<'a>(&self, relations: &'a [Relation], viewport: Size) -> Layout<'a> {
        let layout_config = self.config.layout();
        let builder = TreeBuilder::from_config(layout_config);

        info!(roots = relations.len(), seed:? = layout_config.seed(); "Building layout");
        let mut layout = match layout_config.seed() {
            Some(seed) => builder.build(relations, viewport, &mut StdRng::seed_from_u64(seed)),
            None => builder.build(relations, viewport, &mut rand::rng()),
        };

        let report = layout.relax(layout_config.max_iterations());
        info!(
            nodes = layout.len(),
            iterations = report.iterations,
            converged = report.converged;
            "Layout calculated"
        );

        layout
    }

    /// Render a layout to an SVG string using the configured style.
    ///
    /// # Errors
    ///
    /// Returns [`RelgraphError::Export`] if a configured or relation color
    /// cannot be parsed.
    pub fn render_svg(&self, layout: &Layout<'_>) -> Result<String, RelgraphError> {
        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;

        let svg = exporter.render(layout)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render a layout and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RelgraphError::Export`] for rendering or I/O failures.
    pub fn export_svg(&self, layout: &Layout<'_>, path: impl AsRef<Path>) -> Result<(), RelgraphError> {
        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;

        exporter.export_to_file(layout, path)?;
        Ok(())
    }
}
