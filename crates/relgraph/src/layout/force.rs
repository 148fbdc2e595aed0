//! Pairwise force field
//!
//! Every pair of nodes repels with a magnitude proportional to the product of
//! their radii and inversely proportional to their distance. Pairs linked by a
//! parent/child edge are additionally pulled together in proportion to the gap
//! between their circles. Each pair's net force is clamped per axis, added to
//! the first node and subtracted from the second.

use relgraph_core::geometry::Point;

use super::node::EdgeSet;
use crate::config::LayoutConfig;

/// Scales the edge attraction relative to the gap between two circles.
const ATTRACTION_SCALE: f32 = 0.02;

/// Net force acting on a node, split into axis components.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Force {
    fx: f32,
    fy: f32,
}

impl Force {
    pub fn new(fx: f32, fy: f32) -> Self {
        Self { fx, fy }
    }

    pub fn fx(self) -> f32 {
        self.fx
    }

    pub fn fy(self) -> f32 {
        self.fy
    }

    /// Components rounded to two decimal digits, for display.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relgraph::layout::Force;
    /// let force = Force::new(1.23456, -0.006).rounded();
    /// assert_eq!(force.fx(), 1.23);
    /// assert_eq!(force.fy(), -0.01);
    /// ```
    pub fn rounded(self) -> Self {
        Self {
            fx: round2(self.fx),
            fy: round2(self.fy),
        }
    }

    /// Returns `true` when both components are strictly below `threshold` in magnitude.
    pub fn is_below(self, threshold: f32) -> bool {
        self.fx.abs() < threshold && self.fy.abs() < threshold
    }

    /// The force as a vector.
    pub fn to_point(self) -> Point {
        Point::new(self.fx, self.fy)
    }

    fn add(&mut self, fx: f32, fy: f32) {
        self.fx += fx;
        self.fy += fy;
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Computes the force field over a set of circles.
#[derive(Debug, Clone)]
pub struct ForceField {
    attraction_factor: f32,
    max_force: f32,
}

impl Default for ForceField {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl ForceField {
    pub fn new(attraction_factor: f32, max_force: f32) -> Self {
        Self {
            attraction_factor,
            max_force,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.attraction_factor(), config.max_force())
    }

    /// Computes one force per circle, in input order.
    ///
    /// `positions` and `radii` are parallel slices indexed like the layout's
    /// nodes; `edges` selects which pairs attract.
    pub fn compute(&self, positions: &[Point], radii: &[f32], edges: &EdgeSet) -> Vec<Force> {
        debug_assert_eq!(positions.len(), radii.len());

        let mut forces = vec![Force::default(); positions.len()];

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let (fx, fy) = self.pair_force(
                    positions[i].sub_point(positions[j]),
                    radii[i],
                    radii[j],
                    edges.contains(i, j),
                );
                forces[i].add(fx, fy);
                forces[j].add(-fx, -fy);
            }
        }

        forces
    }

    /// Net force exerted on the first circle of a pair whose centers differ by `delta`.
    fn pair_force(&self, delta: Point, r_i: f32, r_j: f32, linked: bool) -> (f32, f32) {
        let len = delta.hypot();
        let (ux, uy) = if len == 0.0 {
            (1.0, 1.0)
        } else {
            (delta.x() / len, delta.y() / len)
        };

        let repulsion = r_i * r_j / len;
        let mut fx = repulsion * ux;
        let mut fy = repulsion * uy;

        if linked {
            let gap = (len - r_i - r_j).max(0.0);
            let attraction = self.attraction_factor * gap * ATTRACTION_SCALE;
            fx -= attraction * ux;
            fy -= attraction * uy;
        }

        (self.bounded(fx), self.bounded(fy))
    }

    fn bounded(&self, value: f32) -> f32 {
        if value.is_nan() {
            0.0
        } else {
            value.max(-self.max_force).min(self.max_force)
        }
    }
}
