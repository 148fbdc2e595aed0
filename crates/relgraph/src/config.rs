//! Configuration types for relgraph layouts.
//!
//! This module provides configuration structures that control how relation
//! forests are laid out and styled. All types implement [`serde::Deserialize`]
//! for loading from external sources, and every field falls back to its
//! default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Radius bounds and force simulation tunables.
//! - [`StyleConfig`] - Colors, font size and diagnostic overlay for the SVG renderer.
//!
//! # Example
//!
//! ```
//! # use relgraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.layout().validate().is_ok());
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use relgraph_core::color::Color;

use crate::RelgraphError;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the layout configuration for in-place overrides.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the style configuration for in-place overrides.
    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }
}

/// Radius bounds and force simulation parameters.
///
/// Defaults give radii in `[10, 50]` and an attraction factor of 6. Pair
/// forces are clamped to ±1000 and steps to ±5 per axis; a node freezes once
/// both force components drop below 1.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    min_radius: f32,
    max_radius: f32,
    attraction_factor: f32,
    max_iterations: usize,
    max_force: f32,
    max_step: f32,
    freeze_threshold: f32,
    placement_extent: f32,
    seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_radius: 10.0,
            max_radius: 50.0,
            attraction_factor: 6.0,
            max_iterations: 2000,
            max_force: 1000.0,
            max_step: 5.0,
            freeze_threshold: 1.0,
            placement_extent: 1000.0,
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Smallest radius a non-virtual node can receive.
    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }

    /// Radius of the single root (or of each root in a multi-root forest).
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    pub fn attraction_factor(&self) -> f32 {
        self.attraction_factor
    }

    /// Default iteration budget for a relaxation pass.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Per-axis clamp applied to each pairwise force.
    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    /// Per-axis clamp applied to each displacement step.
    pub fn max_step(&self) -> f32 {
        self.max_step
    }

    /// Force magnitude under which a node is frozen in place.
    pub fn freeze_threshold(&self) -> f32 {
        self.freeze_threshold
    }

    /// Side of the square `[0, extent)` used for random initial placement.
    pub fn placement_extent(&self) -> f32 {
        self.placement_extent
    }

    /// Seed for the initial placement, if layouts should be reproducible.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn with_radius_range(mut self, min_radius: f32, max_radius: f32) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    pub fn with_attraction_factor(mut self, factor: f32) -> Self {
        self.attraction_factor = factor;
        self
    }

    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the placement seed in place
    pub fn set_seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self
    }

    /// Set the iteration budget in place
    pub fn set_max_iterations(&mut self, iterations: usize) -> &mut Self {
        self.max_iterations = iterations;
        self
    }

    /// Checks that the tunables describe a usable simulation.
    ///
    /// # Errors
    ///
    /// Returns [`RelgraphError::Config`] when a value is non-finite, a radius
    /// or clamp is not positive, or `max_radius` is below `min_radius`.
    pub fn validate(&self) -> Result<(), RelgraphError> {
        let finite = [
            ("min_radius", self.min_radius),
            ("max_radius", self.max_radius),
            ("attraction_factor", self.attraction_factor),
            ("max_force", self.max_force),
            ("max_step", self.max_step),
            ("freeze_threshold", self.freeze_threshold),
            ("placement_extent", self.placement_extent),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(RelgraphError::Config(format!(
                "layout.{name} must be finite, got {value}"
            )));
        }

        let positive = [
            ("min_radius", self.min_radius),
            ("max_force", self.max_force),
            ("max_step", self.max_step),
            ("placement_extent", self.placement_extent),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(RelgraphError::Config(format!(
                "layout.{name} must be positive, got {value}"
            )));
        }

        if self.max_radius < self.min_radius {
            return Err(RelgraphError::Config(format!(
                "layout.max_radius ({}) must not be smaller than layout.min_radius ({})",
                self.max_radius, self.min_radius
            )));
        }

        Ok(())
    }
}

/// Visual styling configuration for rendered layouts.
///
/// Color fields are fallbacks used when a relation carries no hint of its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    node_color: String,
    label_color: String,
    line_color: String,
    force_color: String,
    font_size: f32,
    show_forces: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            node_color: "#1890ff".to_string(),
            label_color: "#ffffff".to_string(),
            line_color: "black".to_string(),
            force_color: "red".to_string(),
            font_size: 14.0,
            show_forces: false,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Fill color for nodes without a `bgColor` hint.
    pub fn node_color(&self) -> &str {
        &self.node_color
    }

    /// Label color for nodes without a `color` hint.
    pub fn label_color(&self) -> &str {
        &self.label_color
    }

    pub fn line_color(&self) -> &str {
        &self.line_color
    }

    pub fn force_color(&self) -> &str {
        &self.force_color
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Whether the per-node force overlay is rendered.
    pub fn show_forces(&self) -> bool {
        self.show_forces
    }

    pub fn with_show_forces(mut self, show_forces: bool) -> Self {
        self.show_forces = show_forces;
        self
    }

    /// Enable or disable the force overlay in place
    pub fn set_show_forces(&mut self, show_forces: bool) -> &mut Self {
        self.show_forces = show_forces;
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}
