//! Relation forest input records.
//!
//! A [`Relation`] names one node of a hierarchy, carries the weight used to
//! size it, optional presentation hints, and its ordered children. The
//! layout engine borrows relations read-only for the whole layout pass.

use serde::Deserialize;

/// One node of the input forest.
///
/// Names are not required to be unique. `value` is expected to be a finite,
/// non-negative weight; the layout engine does not validate it.
///
/// # Examples
///
/// ```
/// # use relgraph_core::relation::Relation;
/// let root = Relation::new("Root", 0.0)
///     .with_bg_color("#000000")
///     .with_relations(vec![Relation::new("Peer", 1.0)]);
///
/// assert_eq!(root.relations().len(), 1);
/// assert_eq!(root.subtree_len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Relation {
    name: String,

    #[serde(default)]
    value: f32,

    #[serde(default)]
    color: Option<String>,

    #[serde(default, rename = "bgColor", alias = "bg_color")]
    bg_color: Option<String>,

    #[serde(default)]
    relations: Vec<Relation>,
}

impl Relation {
    /// Creates a leaf relation with the given label and weight.
    pub fn new(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            value,
            ..Self::default()
        }
    }

    /// Sets the foreground (label) color hint.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the background (fill) color hint.
    pub fn with_bg_color(mut self, bg_color: impl Into<String>) -> Self {
        self.bg_color = Some(bg_color.into());
        self
    }

    /// Replaces the children of this relation.
    pub fn with_relations(mut self, relations: Vec<Relation>) -> Self {
        self.relations = relations;
        self
    }

    /// Appends a child relation.
    pub fn push(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn bg_color(&self) -> Option<&str> {
        self.bg_color.as_deref()
    }

    /// Returns the ordered children of this relation.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Number of relations in the subtree rooted here, this one included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .relations
            .iter()
            .map(Relation::subtree_len)
            .sum::<usize>()
    }

    /// Visits this relation and every descendant in pre-order.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Relation)) {
        f(self);
        for child in &self.relations {
            child.visit(f);
        }
    }
}
