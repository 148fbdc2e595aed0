//! Relaxation engine
//!
//! Repeatedly evaluates the force field and moves every non-fixed node a small
//! step along its net force, with the radius acting as inertial mass. A node
//! whose force components both drop below the freeze threshold is fixed for
//! the rest of the run; it keeps acting on the others as a source of force.

use log::trace;

use relgraph_core::geometry::{Point, Size};

use super::{
    force::{Force, ForceField},
    node::EdgeSet,
};
use crate::config::LayoutConfig;

/// Summary of one relaxation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaxReport {
    /// Number of iterations actually executed.
    pub iterations: usize,
    /// Whether every node ended up fixed.
    pub converged: bool,
    /// Number of fixed nodes after the run, anchor included.
    pub fixed: usize,
}

/// Mutable per-run simulation state.
///
/// Holds working copies of node positions and freeze flags; the caller
/// commits them back to the layout once the run is over.
#[derive(Debug)]
pub(crate) struct Snapshot<'r> {
    pub(crate) positions: Vec<Point>,
    pub(crate) fixed: Vec<bool>,
    pub(crate) radii: &'r [f32],
    pub(crate) edges: &'r EdgeSet,
}

/// Force-directed relaxation engine.
///
/// By default displacement is clamped to ±5 per axis and per step, and a
/// node freezes once both force components are below 1.
#[derive(Debug, Clone)]
pub struct Relaxer {
    field: ForceField,
    max_step: f32,
    freeze_threshold: f32,
}

impl Default for Relaxer {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl Relaxer {
    /// Create a relaxation engine from layout configuration.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            field: ForceField::from_config(config),
            max_step: config.max_step(),
            freeze_threshold: config.freeze_threshold(),
        }
    }

    /// The force field used for every iteration.
    pub fn field(&self) -> &ForceField {
        &self.field
    }

    /// Runs up to `iterations` steps over `snapshot`, keeping every circle inside `viewport`.
    ///
    /// Stops early once all nodes are fixed. Returns the run summary and the
    /// force field of the last evaluated iteration (or of the current
    /// positions when no iteration ran).
    pub(crate) fn run(
        &self,
        snapshot: &mut Snapshot<'_>,
        viewport: Size,
        iterations: usize,
    ) -> (RelaxReport, Vec<Force>) {
        let mut executed = 0;
        let mut last_forces = None;

        for iteration in 0..iterations {
            if snapshot.fixed.iter().all(|&fixed| fixed) {
                break;
            }

            let forces = self
                .field
                .compute(&snapshot.positions, snapshot.radii, snapshot.edges);
            let moved = self.step(snapshot, &forces, viewport);
            trace!(iteration, moved; "Relaxation step");

            executed += 1;
            last_forces = Some(forces);
        }

        let forces = last_forces.unwrap_or_else(|| {
            self.field
                .compute(&snapshot.positions, snapshot.radii, snapshot.edges)
        });
        let fixed = snapshot.fixed.iter().filter(|&&fixed| fixed).count();

        (
            RelaxReport {
                iterations: executed,
                converged: fixed == snapshot.fixed.len(),
                fixed,
            },
            forces,
        )
    }

    /// Integrates one step for every non-fixed node; returns how many nodes moved.
    fn step(&self, snapshot: &mut Snapshot<'_>, forces: &[Force], viewport: Size) -> usize {
        let mut moved = 0;

        for (index, force) in forces.iter().enumerate() {
            if snapshot.fixed[index] {
                continue;
            }

            let radius = snapshot.radii[index];
            let displacement = force
                .to_point()
                .scale(1.0 / radius)
                .clamp_magnitude(self.max_step);

            if force.is_below(self.freeze_threshold) {
                snapshot.fixed[index] = true;
            }

            let position = snapshot.positions[index].add_point(displacement);
            snapshot.positions[index] = viewport.contain_circle(position, radius);
            moved += 1;
        }

        moved
    }
}
