//! Tree builder
//!
//! Flattens a relation forest into the pre-ordered node list of a [`Layout`],
//! deriving each node's radius from its weight relative to its siblings and
//! scattering non-anchor nodes randomly across the placement square, clamped
//! so that every circle starts inside the viewport.

use log::debug;
use rand::Rng;

use relgraph_core::{
    geometry::{Point, Size},
    relation::Relation,
};

use super::{
    Layout,
    node::{EdgeSet, Node, NodeId},
    relax::Relaxer,
};
use crate::config::LayoutConfig;

/// Share of the parent's radius span a child of maximal weight receives, before the square root.
const WEIGHT_SHARE: f32 = 0.7;

/// Builds simulation nodes from a relation forest.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    min_radius: f32,
    max_radius: f32,
    placement_extent: f32,
    relaxer: Relaxer,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl TreeBuilder {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            min_radius: config.min_radius(),
            max_radius: config.max_radius(),
            placement_extent: config.placement_extent(),
            relaxer: Relaxer::from_config(config),
        }
    }

    /// Builds the node list for `relations` centered in `viewport`.
    ///
    /// A forest with exactly one root uses that root as a fixed anchor of
    /// maximal radius at the viewport center. Any other forest (including an
    /// empty one) gets a fixed, zero-radius virtual anchor there instead, with
    /// every root as its child.
    ///
    /// Positions of all other nodes are drawn from `rng`.
    pub fn build<'a, R>(&self, relations: &'a [Relation], viewport: Size, rng: &mut R) -> Layout<'a>
    where
        R: Rng,
    {
        let center = viewport.center();
        let capacity = 1 + relations.iter().map(Relation::subtree_len).sum::<usize>();
        let mut nodes = Vec::with_capacity(capacity);
        let mut edges = EdgeSet::new();

        let anchor_id = NodeId::new(0);
        let (anchor, children) = match relations {
            [root] => (
                Node::new(anchor_id, Some(root), center, self.max_radius, None),
                root.relations(),
            ),
            _ => (Node::new(anchor_id, None, center, 0.0, None), relations),
        };
        nodes.push(anchor);
        nodes[0].set_fixed(true);

        self.add_children(&mut nodes, &mut edges, viewport, anchor_id, children, rng);

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            virtual_anchor = nodes[0].is_virtual();
            "Relation tree built"
        );

        Layout::new(nodes, edges, viewport, self.relaxer.clone())
    }

    fn add_children<'a, R>(
        &self,
        nodes: &mut Vec<Node<'a>>,
        edges: &mut EdgeSet,
        viewport: Size,
        parent: NodeId,
        children: &'a [Relation],
        rng: &mut R,
    ) where
        R: Rng,
    {
        let parent_radius = nodes[parent.index()].radius();
        let parent_virtual = nodes[parent.index()].is_virtual();
        let max_sibling_value = children
            .iter()
            .map(Relation::value)
            .fold(1.0_f32, f32::max);

        for child in children {
            let radius = if parent_virtual {
                self.max_radius
            } else {
                self.child_radius(parent_radius, child.value(), max_sibling_value)
            };

            let id = NodeId::new(nodes.len());
            let position = viewport.contain_circle(self.random_position(rng), radius);
            nodes.push(Node::new(id, Some(child), position, radius, Some(parent)));
            nodes[parent.index()].push_child(id);
            edges.insert(parent, id);

            self.add_children(nodes, edges, viewport, id, child.relations(), rng);
        }
    }

    /// Radius of a child given its parent's radius and the heaviest sibling weight.
    fn child_radius(&self, parent_radius: f32, value: f32, max_sibling_value: f32) -> f32 {
        self.min_radius
            + (parent_radius - self.min_radius) * (WEIGHT_SHARE * value / max_sibling_value).sqrt()
    }

    fn random_position<R>(&self, rng: &mut R) -> Point
    where
        R: Rng,
    {
        Point::new(
            rng.random::<f32>() * self.placement_extent,
            rng.random::<f32>() * self.placement_extent,
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn build(relations: &[Relation]) -> Layout<'_> {
        let mut rng = StdRng::seed_from_u64(42);
        TreeBuilder::default().build(relations, Size::new(800.0, 600.0), &mut rng)
    }

    #[test]
    fn test_empty_forest_gets_virtual_anchor() {
        let layout = build(&[]);

        assert_eq!(layout.len(), 1);
        let anchor = layout.anchor();
        assert!(anchor.is_virtual());
        assert!(anchor.is_fixed());
        assert_eq!(anchor.radius(), 0.0);
        assert_eq!(anchor.position(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_single_root_is_anchor() {
        let relations = [Relation::new("Root", 0.0)];
        let layout = build(&relations);

        assert_eq!(layout.len(), 1);
        let anchor = layout.anchor();
        assert!(!anchor.is_virtual());
        assert!(anchor.is_fixed());
        assert_eq!(anchor.name(), "Root");
        assert_eq!(anchor.radius(), 50.0);
        assert_eq!(anchor.position(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_child_radius_formula() {
        let relations = [Relation::new("Root", 0.0).with_relations(vec![Relation::new("Peer", 1.0)])];
        let layout = build(&relations);

        assert_eq!(layout.len(), 2);
        let child = layout.node(NodeId::new(1));
        assert_approx_eq!(f32, child.radius(), 10.0 + 40.0 * 0.7_f32.sqrt(), epsilon = 1e-4);
        assert_eq!(child.parent(), Some(NodeId::new(0)));
        assert!(!child.is_fixed());
        assert_eq!(layout.anchor().children(), &[NodeId::new(1)]);
    }

    #[test]
    fn test_small_sibling_values_use_unit_floor() {
        let relations = [Relation::new("Root", 0.0).with_relations(vec![
            Relation::new("a", 0.25),
            Relation::new("b", 0.0),
        ])];
        let layout = build(&relations);

        // max sibling value floors at 1
        let a = layout.node(NodeId::new(1));
        assert_approx_eq!(f32, a.radius(), 10.0 + 40.0 * (0.7_f32 * 0.25).sqrt(), epsilon = 1e-4);
        let b = layout.node(NodeId::new(2));
        assert_approx_eq!(f32, b.radius(), 10.0);
    }

    #[test]
    fn test_radius_increases_with_value() {
        let relations = [Relation::new("Root", 0.0).with_relations(vec![
            Relation::new("one", 1.0),
            Relation::new("three", 3.0),
            Relation::new("two", 2.0),
            Relation::new("four", 4.0),
        ])];
        let layout = build(&relations);

        let radius_of = |name: &str| {
            layout
                .nodes()
                .iter()
                .find(|node| node.name() == name)
                .map(Node::radius)
                .expect("node exists")
        };
        assert!(radius_of("one") < radius_of("two"));
        assert!(radius_of("two") < radius_of("three"));
        assert!(radius_of("three") < radius_of("four"));
        assert!(radius_of("four") < 50.0);
    }

    #[test]
    fn test_nodes_are_pre_ordered() {
        let relations = [Relation::new("root", 0.0).with_relations(vec![
            Relation::new("a", 1.0).with_relations(vec![Relation::new("a1", 1.0)]),
            Relation::new("b", 1.0),
        ])];
        let layout = build(&relations);

        let names: Vec<_> = layout.nodes().iter().map(Node::name).collect();
        assert_eq!(names, ["root", "a", "a1", "b"]);

        let a = layout.node(NodeId::new(1));
        assert_eq!(a.children(), &[NodeId::new(2)]);
        assert_eq!(layout.node(NodeId::new(3)).parent(), Some(NodeId::new(0)));
    }

    #[test]
    fn test_multi_root_forest() {
        let relations = [
            Relation::new("left", 1.0).with_relations(vec![Relation::new("leaf", 5.0)]),
            Relation::new("right", 9.0),
        ];
        let layout = build(&relations);

        assert_eq!(layout.len(), 4);
        assert!(layout.anchor().is_virtual());
        assert_eq!(layout.anchor().children(), &[NodeId::new(1), NodeId::new(3)]);

        // roots are not scaled against each other
        assert_eq!(layout.node(NodeId::new(1)).radius(), 50.0);
        assert_eq!(layout.node(NodeId::new(3)).radius(), 50.0);

        let leaf = layout.node(NodeId::new(2));
        assert_approx_eq!(f32, leaf.radius(), 10.0 + 40.0 * 0.7_f32.sqrt(), epsilon = 1e-4);
    }

    #[test]
    fn test_edges_mirror_relation_tree() {
        let relations = [
            Relation::new("x", 1.0).with_relations(vec![Relation::new("x1", 1.0)]),
            Relation::new("y", 1.0),
        ];
        let layout = build(&relations);

        let edges = layout.edge_set();
        assert_eq!(edges.len(), 3);
        assert!(edges.contains(0, 1));
        assert!(edges.contains(1, 2));
        assert!(edges.contains(0, 3));
        assert!(!edges.contains(1, 3));
        assert!(!edges.contains(2, 3));
    }

    #[test]
    fn test_same_seed_same_placement() {
        let relations = [Relation::new("r", 0.0).with_relations(vec![
            Relation::new("a", 1.0),
            Relation::new("b", 2.0),
        ])];
        let first = build(&relations);
        let second = build(&relations);

        for (a, b) in first.nodes().iter().zip(second.nodes()) {
            assert_eq!(a.position(), b.position());
        }
    }

    #[test]
    fn test_placement_starts_inside_viewport() {
        let relations = [Relation::new("r", 0.0).with_relations(
            (0..20).map(|i| Relation::new(format!("n{i}"), i as f32)).collect(),
        )];
        let layout = build(&relations);

        for node in layout.nodes().iter().skip(1) {
            assert!((node.radius()..=800.0 - node.radius()).contains(&node.x()));
            assert!((node.radius()..=600.0 - node.radius()).contains(&node.y()));
        }
    }

    #[test]
    fn test_placement_is_clamped_in_small_viewport() {
        let relations = [Relation::new("Root", 0.0)
            .with_relations((0..6).map(|i| Relation::new(format!("n{i}"), 1.0)).collect())];
        let mut rng = StdRng::seed_from_u64(1);
        let layout = TreeBuilder::default().build(&relations, Size::new(300.0, 200.0), &mut rng);

        for node in layout.nodes() {
            let (x, y, r) = (node.x(), node.y(), node.radius());
            assert!(x >= r && x <= 300.0 - r, "{} x={x} r={r}", node.name());
            assert!(y >= r && y <= 200.0 - r, "{} y={y} r={r}", node.name());
        }
    }

    fn relation_strategy() -> impl Strategy<Value = Relation> {
        let leaf = (0.0f32..100.0).prop_map(|value| Relation::new("leaf", value));
        leaf.prop_recursive(3, 24, 4, |inner| {
            (0.0f32..100.0, prop::collection::vec(inner, 0..4))
                .prop_map(|(value, children)| Relation::new("branch", value).with_relations(children))
        })
    }

    proptest! {
        #[test]
        fn node_count_matches_forest(forest in prop::collection::vec(relation_strategy(), 0..4)) {
            let layout = build(&forest);
            let relation_count: usize = forest.iter().map(Relation::subtree_len).sum();
            let expected = if forest.len() == 1 { relation_count } else { relation_count + 1 };
            prop_assert_eq!(layout.len(), expected);
        }

        #[test]
        fn radii_stay_in_bounds(forest in prop::collection::vec(relation_strategy(), 0..4)) {
            let layout = build(&forest);
            for node in layout.nodes().iter().filter(|node| !node.is_virtual()) {
                prop_assert!(node.radius() >= 10.0 - 1e-4, "radius {} too small", node.radius());
                prop_assert!(node.radius() <= 50.0 + 1e-4, "radius {} too large", node.radius());
            }
        }

        #[test]
        fn every_non_anchor_has_one_parent(forest in prop::collection::vec(relation_strategy(), 0..4)) {
            let layout = build(&forest);
            prop_assert!(layout.anchor().parent().is_none());
            for node in layout.nodes().iter().skip(1) {
                let parent = node.parent().expect("non-anchor node has a parent");
                prop_assert!(layout.node(parent).children().contains(&node.id()));
            }
        }
    }
}
