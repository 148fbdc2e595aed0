//! Force-directed layout of relation forests.
//!
//! A layout pass has two stages:
//!
//! 1. [`TreeBuilder`] flattens a [`Relation`] forest into a [`Layout`]: one
//!    [`Node`] per relation (plus a virtual anchor for forests without a single
//!    root), radii derived from weights, random initial positions.
//! 2. [`Layout::relax`] runs the force simulation ([`ForceField`] evaluated by
//!    the [`Relaxer`]) until every node is fixed or the iteration budget runs out.
//!
//! The same [`Layout`] can be relaxed again later to nudge an existing
//! arrangement without rebuilding node identities.

mod force;
mod node;
mod relax;
mod tree;

pub use force::{Force, ForceField};
pub use node::{EdgeSet, Node, NodeId};
pub use relax::{RelaxReport, Relaxer};
pub use tree::TreeBuilder;

use std::fmt;

use log::debug;

use relgraph_core::{
    geometry::{Point, Size},
    relation::Relation,
};

use relax::Snapshot;

type ClickHandler<'a> = Box<dyn Fn(&Relation) + Send + Sync + 'a>;

/// Nodes of one relation forest together with their simulation state.
///
/// Nodes are stored in pre-order; [`Layout::anchor`] is always the first one.
/// The layout borrows the forest it was built from for its whole lifetime.
pub struct Layout<'a> {
    nodes: Vec<Node<'a>>,
    edges: EdgeSet,
    viewport: Size,
    relaxer: Relaxer,
    forces: Vec<Force>,
    click_handler: Option<ClickHandler<'a>>,
}

impl fmt::Debug for Layout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("viewport", &self.viewport)
            .field("forces", &self.forces)
            .field("click_handler", &self.click_handler.is_some())
            .finish()
    }
}

impl<'a> Layout<'a> {
    pub(crate) fn new(
        nodes: Vec<Node<'a>>,
        edges: EdgeSet,
        viewport: Size,
        relaxer: Relaxer,
    ) -> Self {
        let forces = vec![Force::default(); nodes.len()];
        Self {
            nodes,
            edges,
            viewport,
            relaxer,
            forces,
            click_handler: None,
        }
    }

    /// Attaches a handler called with the originating relation of a clicked node.
    pub fn with_click_handler(mut self, handler: impl Fn(&Relation) + Send + Sync + 'a) -> Self {
        self.click_handler = Some(Box::new(handler));
        self
    }

    /// All nodes in pre-order, anchor first.
    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this layout.
    pub fn node(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id.index()]
    }

    /// The fixed node at the viewport center: the single root, or the virtual anchor.
    pub fn anchor(&self) -> &Node<'a> {
        &self.nodes[0]
    }

    /// Number of nodes, anchor included. Never zero.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; every layout holds at least its anchor.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Attraction bookkeeping: every parent/child pair, virtual anchor included.
    pub fn edge_set(&self) -> &EdgeSet {
        &self.edges
    }

    /// Parent/child pairs to draw connecting lines for, skipping the virtual anchor.
    pub fn edges(&self) -> impl Iterator<Item = (&Node<'a>, &Node<'a>)> + '_ {
        self.edges
            .pairs()
            .iter()
            .map(|&(parent, child)| (self.node(parent), self.node(child)))
            .filter(|(parent, _)| !parent.is_virtual())
    }

    /// Nodes a renderer should draw, i.e. all but the virtual anchor.
    pub fn visible_nodes(&self) -> impl Iterator<Item = &Node<'a>> + '_ {
        self.nodes.iter().filter(|node| !node.is_virtual())
    }

    /// Force per node from the most recent relaxation run, in node order.
    ///
    /// All zero until [`Layout::relax`] has been called.
    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    /// Evaluates the force field at the current positions without moving anything.
    pub fn compute_forces(&self) -> Vec<Force> {
        let (positions, radii) = self.bodies();
        self.relaxer.field().compute(&positions, &radii, &self.edges)
    }

    /// Relaxes node positions for at most `iterations` steps.
    ///
    /// The run works on a snapshot of positions and freeze flags and commits
    /// it when done. Nodes fixed by an earlier run stay fixed; see
    /// [`Layout::unfreeze`] to let them move again.
    pub fn relax(&mut self, iterations: usize) -> RelaxReport {
        let (positions, radii) = self.bodies();
        let mut snapshot = Snapshot {
            positions,
            fixed: self.nodes.iter().map(Node::is_fixed).collect(),
            radii: &radii,
            edges: &self.edges,
        };

        let (report, forces) = self.relaxer.run(&mut snapshot, self.viewport, iterations);

        let Snapshot {
            positions, fixed, ..
        } = snapshot;
        for ((node, position), fixed) in self.nodes.iter_mut().zip(positions).zip(fixed) {
            node.set_position(position);
            node.set_fixed(fixed);
        }
        self.forces = forces;

        debug!(
            nodes = self.nodes.len(),
            iterations = report.iterations,
            fixed = report.fixed,
            converged = report.converged;
            "Relaxation finished"
        );

        report
    }

    /// Clears the fixed flag on every node except the anchor.
    pub fn unfreeze(&mut self) {
        for node in self.nodes.iter_mut().skip(1) {
            node.set_fixed(false);
        }
    }

    /// Topmost visible node whose circle contains `point`.
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|node| !node.is_virtual() && node.contains(point))
            .map(Node::id)
    }

    /// Invokes the click handler with the relation behind `id`.
    ///
    /// Returns `false` if no handler is attached or `id` is the virtual anchor.
    pub fn click(&self, id: NodeId) -> bool {
        match (&self.click_handler, self.node(id).relation()) {
            (Some(handler), Some(relation)) => {
                handler(relation);
                true
            }
            _ => false,
        }
    }

    /// Hit-tests `point` and dispatches a click to the node found there.
    pub fn click_at(&self, point: Point) -> Option<NodeId> {
        let id = self.node_at(point)?;
        self.click(id).then_some(id)
    }

    fn bodies(&self) -> (Vec<Point>, Vec<f32>) {
        self.nodes
            .iter()
            .map(|node| (node.position(), node.radius()))
            .unzip()
    }
}
