//! Example: Laying out a relation forest built in code
//!
//! This example builds a small forest programmatically, relaxes it with a
//! fixed seed, reports each node's placement and prints the rendered SVG.

use relgraph::{
    LayoutBuilder,
    config::{AppConfig, LayoutConfig, StyleConfig},
    geometry::Size,
    relation::Relation,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let relations = vec![
        Relation::new("Alice", 0.0)
            .with_bg_color("#2f54eb")
            .with_relations(vec![
                Relation::new("Bob", 4.0),
                Relation::new("Carol", 2.0).with_relations(vec![Relation::new("Dan", 1.0)]),
                Relation::new("Erin", 1.0).with_color("#000000").with_bg_color("#ffd666"),
            ]),
    ];

    let config = AppConfig::new(
        LayoutConfig::default().with_seed(Some(42)),
        StyleConfig::default().with_background_color("#fafafa"),
    );
    let builder = LayoutBuilder::new(config);

    let mut layout = builder
        .layout(&relations, Size::new(640.0, 480.0))
        .with_click_handler(|relation: &Relation| println!("clicked {}", relation.name()));

    for node in layout.visible_nodes() {
        println!(
            "{:>6}  r={:>5.1}  at ({:>6.1}, {:>6.1})  fixed={}",
            node.name(),
            node.radius(),
            node.x(),
            node.y(),
            node.is_fixed()
        );
    }

    // Nudge the arrangement after freeing every node but the anchor
    layout.unfreeze();
    let report = layout.relax(200);
    println!("\nre-relaxed: {report:?}");

    if let Some(id) = layout.click_at(layout.anchor().position()) {
        println!("hit node {}", id.index());
    }

    println!("\n{}", builder.render_svg(&layout)?);

    Ok(())
}
