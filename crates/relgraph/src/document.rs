//! Forest documents.
//!
//! A forest document is a TOML file describing one layout request: the
//! viewport size and the relation forest to lay out.
//!
//! ```toml
//! width = 400
//! height = 300
//!
//! [[relations]]
//! name = "Root"
//! value = 0
//! bgColor = "#000000"
//!
//!   [[relations.relations]]
//!   name = "Peer"
//!   value = 1
//! ```
//!
//! The layout engine accepts any input; rejecting unusable documents is the
//! loader's job, so [`ForestDocument::parse`] validates what it reads.

use log::debug;
use serde::Deserialize;

use relgraph_core::{color::Color, geometry::Size, relation::Relation};

use crate::RelgraphError;

const DEFAULT_WIDTH: f32 = 800.0;
const DEFAULT_HEIGHT: f32 = 600.0;

fn default_width() -> f32 {
    DEFAULT_WIDTH
}

fn default_height() -> f32 {
    DEFAULT_HEIGHT
}

/// A parsed and validated layout request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForestDocument {
    #[serde(default = "default_width")]
    width: f32,
    #[serde(default = "default_height")]
    height: f32,
    #[serde(default)]
    relations: Vec<Relation>,
}

impl Default for ForestDocument {
    fn default() -> Self {
        Self::new(Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT), Vec::new())
    }
}

impl ForestDocument {
    pub fn new(viewport: Size, relations: Vec<Relation>) -> Self {
        Self {
            width: viewport.width(),
            height: viewport.height(),
            relations,
        }
    }

    /// Parses and validates a TOML forest document.
    ///
    /// # Errors
    ///
    /// Returns [`RelgraphError::Document`] if the text is not valid TOML, does
    /// not match the document shape, declares a non-positive viewport, or
    /// holds a relation with a negative or non-finite value or an unparseable
    /// color hint.
    pub fn parse(source: &str) -> Result<Self, RelgraphError> {
        let document: Self = toml::from_str(source).map_err(|err| {
            RelgraphError::new_document_error(err.message(), source, err.span())
        })?;

        document
            .validate()
            .map_err(|message| RelgraphError::new_document_error(message, source, None))?;

        debug!(
            width = document.width,
            height = document.height,
            roots = document.relations.len();
            "Forest document parsed"
        );

        Ok(document)
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Total number of relations in the forest.
    pub fn relation_count(&self) -> usize {
        self.relations.iter().map(Relation::subtree_len).sum()
    }

    fn validate(&self) -> Result<(), String> {
        for (name, extent) in [("width", self.width), ("height", self.height)] {
            if !extent.is_finite() || extent <= 0.0 {
                return Err(format!("{name} must be a positive number, got {extent}"));
            }
        }

        for (index, relation) in self.relations.iter().enumerate() {
            validate_relation(relation, &format!("relations[{index}]"))?;
        }

        Ok(())
    }
}

fn validate_relation(relation: &Relation, path: &str) -> Result<(), String> {
    let value = relation.value();
    if !value.is_finite() || value < 0.0 {
        return Err(format!(
            "{path} (`{}`): value must be a finite, non-negative number, got {value}",
            relation.name()
        ));
    }

    for (key, hint) in [("color", relation.color()), ("bgColor", relation.bg_color())] {
        if let Some(hint) = hint {
            Color::new(hint).map_err(|err| {
                format!("{path} (`{}`): {key}: {err}", relation.name())
            })?;
        }
    }

    for (index, child) in relation.relations().iter().enumerate() {
        validate_relation(child, &format!("{path}.relations[{index}]"))?;
    }

    Ok(())
}
