//! Integration tests for the LayoutBuilder API
//!
//! These tests verify that the public API works end to end.

use relgraph::{
    LayoutBuilder, RelgraphError,
    config::{AppConfig, LayoutConfig, StyleConfig},
    geometry::{Point, Size},
    relation::Relation,
};

fn seeded(seed: u64) -> LayoutBuilder {
    let layout = LayoutConfig::default().with_seed(Some(seed));
    LayoutBuilder::new(AppConfig::new(layout, StyleConfig::default()))
}

#[test]
fn test_builder_api_exists() {
    let _builder = LayoutBuilder::default();
}

#[test]
fn test_parse_layout_and_render() {
    let source = r##"
        width = 400
        height = 300

        [[relations]]
        name = "Root"
        value = 0
        bgColor = "#222222"

          [[relations.relations]]
          name = "Peer"
          value = 1
    "##;

    let builder = LayoutBuilder::default();
    let document = builder.parse(source).expect("Failed to parse document");
    let layout = builder.layout(document.relations(), document.viewport());

    assert_eq!(layout.len(), 2);
    assert_eq!(layout.anchor().position(), Point::new(200.0, 150.0));

    let svg = builder.render_svg(&layout).expect("Failed to render layout");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Peer"));
}

#[test]
fn test_parse_invalid_document_returns_error() {
    let builder = LayoutBuilder::default();
    let result = builder.parse("[[relations]]\nname = \"Bad\"\nvalue = -3\n");

    assert!(
        matches!(result, Err(RelgraphError::Document { .. })),
        "Should return a document error: {result:?}"
    );
}

#[test]
fn test_seeded_layouts_are_reproducible() {
    let relations = vec![Relation::new("Root", 0.0).with_relations(vec![
        Relation::new("a", 1.0),
        Relation::new("b", 2.0),
        Relation::new("c", 3.0),
    ])];
    let viewport = Size::new(600.0, 600.0);

    let first = seeded(17).layout(&relations, viewport);
    let second = seeded(17).layout(&relations, viewport);

    let positions = |layout: &relgraph::layout::Layout<'_>| {
        layout
            .nodes()
            .iter()
            .map(|node| node.position())
            .collect::<Vec<_>>()
    };
    assert_eq!(positions(&first), positions(&second));
}

#[test]
fn test_unseeded_layout_is_contained() {
    let relations = vec![Relation::new("left", 1.0), Relation::new("right", 2.0)];
    let layout = LayoutBuilder::default().layout(&relations, Size::new(300.0, 200.0));

    for node in layout.visible_nodes() {
        assert!(node.x() >= node.radius() - 1e-3);
        assert!(node.x() <= 300.0 - node.radius() + 1e-3);
        assert!(node.y() >= node.radius() - 1e-3);
        assert!(node.y() <= 200.0 - node.radius() + 1e-3);
    }
}

#[test]
fn test_builder_reusability() {
    let builder = seeded(1);
    let forest_one = vec![Relation::new("one", 0.0)];
    let forest_two = vec![Relation::new("two", 0.0).with_relations(vec![Relation::new("leaf", 1.0)])];

    let svg_one = builder
        .render_svg(&builder.layout(&forest_one, Size::new(100.0, 100.0)))
        .expect("Failed to render first layout");
    let svg_two = builder
        .render_svg(&builder.layout(&forest_two, Size::new(400.0, 400.0)))
        .expect("Failed to render second layout");

    assert!(svg_one.contains("one"));
    assert!(svg_two.contains("leaf"));
}

#[test]
fn test_export_svg_writes_file() {
    let relations = vec![Relation::new("Root", 0.0)];
    let builder = seeded(2);
    let layout = builder.layout(&relations, Size::new(100.0, 100.0));

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("forest.svg");
    builder
        .export_svg(&layout, &path)
        .expect("Failed to export layout");

    let content = std::fs::read_to_string(&path).expect("Failed to read output");
    assert!(content.contains("Root"));
}

#[test]
fn test_invalid_style_is_an_export_error() {
    let style = StyleConfig::default().with_background_color("not-a-color");
    let builder = LayoutBuilder::new(AppConfig::new(LayoutConfig::default(), style));
    let relations = vec![Relation::new("Root", 0.0)];
    let layout = builder.layout(&relations, Size::new(100.0, 100.0));

    let result = builder.render_svg(&layout);
    assert!(matches!(result, Err(RelgraphError::Export(_))));
}

#[test]
fn test_unvalidated_clamps_do_not_panic() {
    let config: AppConfig = toml::from_str(
        r#"
        [layout]
        max_force = nan
        max_step = -5.0
        max_iterations = 50
        seed = 3
        "#,
    )
    .expect("valid config");
    assert!(config.layout().validate().is_err());

    let relations = vec![
        Relation::new("Root", 0.0)
            .with_relations(vec![Relation::new("a", 1.0), Relation::new("b", 2.0)]),
    ];
    let viewport = Size::new(400.0, 300.0);
    let layout = LayoutBuilder::new(config).layout(&relations, viewport);

    assert_eq!(layout.anchor().position(), Point::new(200.0, 150.0));
    for node in layout.nodes() {
        assert!(node.position().is_finite(), "{} is not finite", node.name());
        assert!(node.x() >= node.radius() - 1e-3);
        assert!(node.x() <= viewport.width() - node.radius() + 1e-3);
        assert!(node.y() >= node.radius() - 1e-3);
        assert!(node.y() <= viewport.height() - node.radius() + 1e-3);
    }
}
