// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Aggregate measurements over a set of bodies
//!
//! These are read-only reductions for hosts and tests: total mass, momentum,
//! kinetic energy and center of mass. With the `parallel` feature the
//! reduction runs on Rayon's thread pool; the physics step itself is always
//! sequential.

use crate::sim::Body;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summary of a body set at one instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SystemStats {
    /// Number of bodies measured
    pub body_count: usize,
    /// Sum of masses
    pub total_mass: f64,
    /// Total momentum along x
    pub momentum_x: f64,
    /// Total momentum along y
    pub momentum_y: f64,
    /// Sum of 0.5*m*v²
    pub kinetic_energy: f64,
    /// Mass-weighted mean position, `None` for an empty set
    pub center_of_mass: Option<(f64, f64)>,
}

/// Running sums combined across bodies (and across threads)
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    count: usize,
    mass: f64,
    px: f64,
    py: f64,
    kinetic: f64,
    moment_x: f64,
    moment_y: f64,
}

impl Totals {
    fn of(body: &Body) -> Self {
        let (x, y) = body.position();
        let (vx, vy) = body.velocity();
        let m = body.mass();
        Totals {
            count: 1,
            mass: m,
            px: m * vx,
            py: m * vy,
            kinetic: 0.5 * m * (vx * vx + vy * vy),
            moment_x: m * x,
            moment_y: m * y,
        }
    }

    fn combine(self, other: Totals) -> Self {
        Totals {
            count: self.count + other.count,
            mass: self.mass + other.mass,
            px: self.px + other.px,
            py: self.py + other.py,
            kinetic: self.kinetic + other.kinetic,
            moment_x: self.moment_x + other.moment_x,
            moment_y: self.moment_y + other.moment_y,
        }
    }
}

impl SystemStats {
    /// Measure every body that is not flagged for removal
    pub fn measure(bodies: &[Body]) -> Self {
        #[cfg(feature = "parallel")]
        let totals = bodies
            .par_iter()
            .filter(|body| !body.is_pending_removal())
            .map(Totals::of)
            .reduce(Totals::default, Totals::combine);

        #[cfg(not(feature = "parallel"))]
        let totals = bodies
            .iter()
            .filter(|body| !body.is_pending_removal())
            .map(Totals::of)
            .fold(Totals::default(), Totals::combine);

        let center_of_mass = if totals.count > 0 {
            Some((totals.moment_x / totals.mass, totals.moment_y / totals.mass))
        } else {
            None
        };

        SystemStats {
            body_count: totals.count,
            total_mass: totals.mass,
            momentum_x: totals.px,
            momentum_y: totals.py,
            kinetic_energy: totals.kinetic,
            center_of_mass,
        }
    }

    /// Magnitude of the total momentum vector
    pub fn momentum(&self) -> f64 {
        (self.momentum_x * self.momentum_x + self.momentum_y * self.momentum_y).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BodyRegistry, Color};

    #[test]
    fn test_empty_set() {
        let stats = SystemStats::measure(&[]);
        assert_eq!(stats.body_count, 0);
        assert_eq!(stats.total_mass, 0.0);
        assert_eq!(stats.center_of_mass, None);
    }

    #[test]
    fn test_two_body_totals() {
        let mut registry = BodyRegistry::new();
        registry.add(0.0, 0.0, 1.0, Color::WHITE, 1.0, 2.0, 0.0);
        registry.add(30.0, 60.0, 1.0, Color::WHITE, 2.0, 0.0, -1.0);

        let stats = SystemStats::measure(registry.snapshot());
        assert_eq!(stats.body_count, 2);
        assert_eq!(stats.total_mass, 3.0);
        assert_eq!(stats.momentum_x, 2.0);
        assert_eq!(stats.momentum_y, -2.0);
        assert_eq!(stats.kinetic_energy, 2.0 + 1.0);
        assert_eq!(stats.center_of_mass, Some((20.0, 40.0)));
        assert!((stats.momentum() - 8.0_f64.sqrt()).abs() < 1e-12);
    }
}
