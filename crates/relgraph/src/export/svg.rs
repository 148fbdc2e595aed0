//! SVG rendering of relaxed layouts.
//!
//! Elements are emitted bottom to top: background, connecting lines, node
//! circles, labels and, when enabled, the force overlay. The virtual anchor
//! of a multi-root forest is never drawn.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use relgraph_core::{
    color::Color,
    geometry::{Point, Size},
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    layout::{Layout, Node},
};

const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Builder for [`SvgExporter`].
#[derive(Debug, Default)]
pub struct SvgBuilder {
    style: StyleConfig,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Resolves the configured colors and builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if any configured color cannot be parsed.
    pub fn build(self) -> Result<SvgExporter, Error> {
        let background = self.style.background_color().map_err(Error::Render)?;
        let palette = Palette {
            node: parse_color("style.node_color", self.style.node_color())?,
            label: parse_color("style.label_color", self.style.label_color())?,
            line: parse_color("style.line_color", self.style.line_color())?,
            force: parse_color("style.force_color", self.style.force_color())?,
        };

        Ok(SvgExporter {
            background,
            palette,
            font_size: self.style.font_size(),
            show_forces: self.style.show_forces(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    node: Color,
    label: Color,
    line: Color,
    force: Color,
}

fn parse_color(field: &str, value: &str) -> Result<Color, Error> {
    Color::new(value).map_err(|err| Error::Render(format!("{field}: {err}")))
}

/// Renders layouts as SVG documents sized to the layout's viewport.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    background: Option<Color>,
    palette: Palette,
    font_size: f32,
    show_forces: bool,
}

impl SvgExporter {
    /// Renders `layout` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a relation carries a color hint that is
    /// not a valid CSS color.
    pub fn render(&self, layout: &Layout<'_>) -> Result<String, Error> {
        Ok(self.render_document(layout)?.to_string())
    }

    /// Writes `layout` as an SVG file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created or written, and
    /// [`Error::Render`] for invalid relation color hints.
    pub fn export_to_file(&self, layout: &Layout<'_>, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        info!(path:? = path; "Creating SVG file");

        let file = File::create(path).inspect_err(|err| {
            error!(path:? = path; "Failed to create SVG file: {err}");
        })?;
        let mut writer = BufWriter::new(file);

        self.export_layout(layout, &mut writer)?;
        writer.flush().inspect_err(|err| {
            error!(path:? = path; "Failed to write SVG content: {err}");
        })?;

        Ok(())
    }

    /// Builds the SVG document for `layout`.
    pub fn render_document(&self, layout: &Layout<'_>) -> Result<Document, Error> {
        let viewport = layout.viewport();
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", viewport.width(), viewport.height()),
            )
            .set("width", viewport.width())
            .set("height", viewport.height());

        if let Some(background) = &self.background {
            doc = doc.add(self.render_background(viewport, background));
        }

        let mut lines = svg_element::Group::new().set("class", "relations");
        for (parent, child) in layout.edges() {
            if let Some(line) = self.render_line(parent, child) {
                lines = lines.add(line);
            }
        }

        let mut circles = svg_element::Group::new().set("class", "nodes");
        let mut labels = svg_element::Group::new().set("class", "labels");
        for node in layout.visible_nodes() {
            circles = circles.add(self.render_circle(node)?);
            labels = labels.add(self.render_label(node)?);
        }

        doc = doc.add(lines).add(circles).add(labels);

        if self.show_forces {
            let mut overlay = svg_element::Group::new().set("class", "forces");
            for (node, force) in layout.nodes().iter().zip(layout.forces()) {
                if node.is_virtual() {
                    continue;
                }
                let force = force.rounded();
                overlay = overlay.add(self.render_force(node.position(), force.to_point()));
            }
            doc = doc.add(overlay);
        }

        debug!(
            nodes = layout.visible_nodes().count(),
            show_forces = self.show_forces;
            "SVG document rendered"
        );

        Ok(doc)
    }

    fn render_background(&self, size: Size, color: &Color) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", color)
            .set("fill-opacity", color.alpha())
    }

    fn render_line(&self, begin: &Node<'_>, end: &Node<'_>) -> Option<svg_element::Line> {
        let (start, stop) = trimmed_segment(begin, end)?;

        Some(
            svg_element::Line::new()
                .set("x1", start.x())
                .set("y1", start.y())
                .set("x2", stop.x())
                .set("y2", stop.y())
                .set("stroke", &self.palette.line),
        )
    }

    fn render_circle(&self, node: &Node<'_>) -> Result<svg_element::Circle, Error> {
        let fill = self.hint_or(node.bg_color(), node.name(), self.palette.node)?;

        Ok(svg_element::Circle::new()
            .set("cx", node.x())
            .set("cy", node.y())
            .set("r", node.radius())
            .set("fill", &fill)
            .set("fill-opacity", fill.alpha())
            .add(svg_element::Title::new(node.name())))
    }

    fn render_label(&self, node: &Node<'_>) -> Result<svg_element::Text, Error> {
        let color = self.hint_or(node.color(), node.name(), self.palette.label)?;

        Ok(svg_element::Text::new(node.name())
            .set("x", node.x())
            .set("y", node.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", DEFAULT_FONT_FAMILY)
            .set("font-size", self.font_size)
            .set("fill", &color))
    }

    fn render_force(&self, center: Point, force: Point) -> svg_element::Group {
        let tip = center.add_point(force);

        let arrow = svg_element::Line::new()
            .set("x1", center.x())
            .set("y1", center.y())
            .set("x2", tip.x())
            .set("y2", tip.y())
            .set("stroke", &self.palette.force);

        let label = svg_element::Text::new(format!("{},{}", force.x(), force.y()))
            .set("x", tip.x())
            .set("y", tip.y())
            .set("font-family", DEFAULT_FONT_FAMILY)
            .set("font-size", self.font_size * 0.75)
            .set("fill", &self.palette.force);

        svg_element::Group::new().add(arrow).add(label)
    }

    fn hint_or(&self, hint: Option<&str>, name: &str, fallback: Color) -> Result<Color, Error> {
        match hint {
            Some(hint) => Color::new(hint)
                .map_err(|err| Error::Render(format!("relation `{name}`: {err}"))),
            None => Ok(fallback),
        }
    }
}

/// Segment between two circles, trimmed to their boundaries. `None` when the centers coincide.
fn trimmed_segment(begin: &Node<'_>, end: &Node<'_>) -> Option<(Point, Point)> {
    let delta = end.position().sub_point(begin.position());
    let len = delta.hypot();
    if len == 0.0 {
        return None;
    }

    Some((
        begin.position().add_point(delta.scale(begin.radius() / len)),
        end.position().sub_point(delta.scale(end.radius() / len)),
    ))
}

impl Exporter for SvgExporter {
    fn export_layout(&self, layout: &Layout<'_>, writer: &mut dyn io::Write) -> Result<(), Error> {
        let doc = self.render_document(layout)?;
        svg::write(writer, &doc)?;
        Ok(())
    }
}
