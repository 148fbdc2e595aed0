//! Simulation nodes and the attraction edge set.

use std::collections::HashSet;

use relgraph_core::{geometry::Point, relation::Relation};

/// Index of a [`Node`] within its [`Layout`](super::Layout).
///
/// Node ids are assigned in pre-order, so the anchor is always `NodeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of the node in the layout's node list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A simulation entity derived from one [`Relation`].
///
/// The virtual anchor synthesized for multi-root forests has no relation,
/// a zero radius and is never rendered.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    id: NodeId,
    relation: Option<&'a Relation>,
    position: Point,
    radius: f32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    fixed: bool,
}

impl<'a> Node<'a> {
    pub(crate) fn new(
        id: NodeId,
        relation: Option<&'a Relation>,
        position: Point,
        radius: f32,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            relation,
            position,
            radius,
            parent,
            children: Vec::new(),
            fixed: false,
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The source relation, or `None` for the virtual anchor.
    pub fn relation(&self) -> Option<&'a Relation> {
        self.relation
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Relation name; empty for the virtual anchor.
    pub fn name(&self) -> &'a str {
        self.relation.map_or("", Relation::name)
    }

    /// Relation weight; zero for the virtual anchor.
    pub fn value(&self) -> f32 {
        self.relation.map_or(0.0, Relation::value)
    }

    pub fn color(&self) -> Option<&'a str> {
        self.relation.and_then(Relation::color)
    }

    pub fn bg_color(&self) -> Option<&'a str> {
        self.relation.and_then(Relation::bg_color)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes, in the order of the relation's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the node is frozen for the rest of the relaxation run.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Whether this is the synthetic anchor of a multi-root forest.
    pub fn is_virtual(&self) -> bool {
        self.relation.is_none()
    }

    /// Returns `true` if `point` lies within the node's circle.
    pub fn contains(&self, point: Point) -> bool {
        self.position.distance(point) <= self.radius
    }
}

/// Unordered set of directly related node pairs.
///
/// Captured once while the tree is built, so the force calculation asks
/// "are these two related" by index instead of comparing relations.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    pairs: Vec<(NodeId, NodeId)>,
    lookup: HashSet<(usize, usize)>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a parent/child link.
    pub fn insert(&mut self, parent: NodeId, child: NodeId) {
        if self.lookup.insert(Self::key(parent.index(), child.index())) {
            self.pairs.push((parent, child));
        }
    }

    /// Returns `true` if nodes `a` and `b` share a parent/child link, in either direction.
    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.lookup.contains(&Self::key(a, b))
    }

    /// `(parent, child)` pairs in insertion order.
    pub fn pairs(&self) -> &[(NodeId, NodeId)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn key(a: usize, b: usize) -> (usize, usize) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_set_is_unordered() {
        let mut edges = EdgeSet::new();
        edges.insert(NodeId::new(0), NodeId::new(3));

        assert!(edges.contains(0, 3));
        assert!(edges.contains(3, 0));
        assert!(!edges.contains(0, 2));
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn test_edge_set_ignores_duplicates() {
        let mut edges = EdgeSet::new();
        edges.insert(NodeId::new(1), NodeId::new(2));
        edges.insert(NodeId::new(2), NodeId::new(1));

        assert_eq!(edges.pairs(), &[(NodeId::new(1), NodeId::new(2))]);
    }

    #[test]
    fn test_virtual_node_accessors() {
        let node = Node::new(NodeId::new(0), None, Point::new(5.0, 5.0), 0.0, None);
        assert!(node.is_virtual());
        assert_eq!(node.name(), "");
        assert_eq!(node.value(), 0.0);
        assert_eq!(node.color(), None);
    }

    #[test]
    fn test_node_contains() {
        let relation = Relation::new("n", 1.0).with_bg_color("#000");
        let node = Node::new(
            NodeId::new(1),
            Some(&relation),
            Point::new(10.0, 10.0),
            5.0,
            Some(NodeId::new(0)),
        );

        assert!(node.contains(Point::new(13.0, 14.0)));
        assert!(!node.contains(Point::new(16.0, 10.0)));
        assert_eq!(node.bg_color(), Some("#000"));
        assert_eq!(node.parent(), Some(NodeId::new(0)));
    }
}
