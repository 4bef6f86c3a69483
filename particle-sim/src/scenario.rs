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
//! Initial conditions
//!
//! Physical constants are fixed, but the bodies a run starts with are
//! configuration. A [`ScenarioConfig`] is a list of [`BodySpec`]s that can be
//! written by hand, loaded from JSON, or generated:
//!
//! - [`ScenarioConfig::five_body`]: five heavy bodies on the main diagonal
//! - [`RandomScenario`]: `count` small bodies scattered at rest
//!
//! # JSON format
//!
//! ```json
//! {
//!   "bodies": [
//!     { "x": 500.0, "y": 500.0, "radius": 10.0,
//!       "color": { "r": 255, "g": 255, "b": 255 },
//!       "mass": 1e12, "vx": 5.0, "vy": 9.0 }
//!   ]
//! }
//! ```
//!
//! `vx` and `vy` default to zero when omitted.

use crate::error::SimError;
use crate::sim::{BodyId, BodyRegistry, BodySpec, Color, WORLD_SIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Radius of each body in the five-body scenario
pub const FIVE_BODY_RADIUS: f64 = 10.0;

/// Mass of each body in the five-body scenario
pub const FIVE_BODY_MASS: f64 = 1e12;

/// Mass per unit radius of randomly generated bodies
pub const RANDOM_MASS_PER_RADIUS: f64 = 2.0 * 1e10;

/// A list of bodies to seed a registry with, in insertion order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Bodies in the order they will be registered
    pub bodies: Vec<BodySpec>,
}

impl ScenarioConfig {
    /// Create a scenario from a list of bodies
    pub fn new(bodies: Vec<BodySpec>) -> Self {
        ScenarioConfig { bodies }
    }

    /// Parse a scenario from a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: ScenarioConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every body, reporting the first invalid one by index
    pub fn validate(&self) -> Result<(), SimError> {
        for (index, spec) in self.bodies.iter().enumerate() {
            spec.validate()
                .map_err(|err| SimError::InvalidScenario(format!("body {index}: {err}")))?;
        }
        Ok(())
    }

    /// Register every body, returning the ids in scenario order
    ///
    /// Nothing is registered if any body is invalid.
    pub fn populate(&self, registry: &mut BodyRegistry) -> Result<Vec<BodyId>, SimError> {
        self.validate()?;

        let ids: Vec<BodyId> = self.bodies.iter().map(|spec| registry.add_spec(*spec)).collect();
        tracing::info!(bodies = ids.len(), total = registry.len(), "seeded registry from scenario");
        Ok(ids)
    }

    /// Five bodies of equal size and mass spread along the diagonal,
    /// moving roughly toward and away from each other, with random colors
    pub fn five_body(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = [
            (500.0, 500.0, 5.0, 9.0),
            (700.0, 700.0, -9.0, -12.0),
            (300.0, 300.0, 2.0, 6.0),
            (100.0, 100.0, -12.0, -11.0),
            (900.0, 900.0, 9.0, 12.0),
        ];

        let bodies = layout
            .iter()
            .map(|&(x, y, vx, vy)| {
                BodySpec::new(x, y, FIVE_BODY_RADIUS, Color::random(&mut rng), FIVE_BODY_MASS, vx, vy)
            })
            .collect();

        ScenarioConfig::new(bodies)
    }

    /// Number of bodies in the scenario
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Check whether the scenario has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Generator for bodies scattered uniformly over a rectangle
///
/// Each body starts at rest at integer coordinates in `[0, width] x [0, height]`
/// with an integer radius in `[3, 9]`, a mass proportional to its radius and
/// a random color.
///
/// # Example
///
/// ```
/// use particle_sim::scenario::RandomScenario;
///
/// let scenario = RandomScenario { count: 25, ..RandomScenario::default() }.generate();
/// assert_eq!(scenario.len(), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomScenario {
    /// Number of bodies to generate
    pub count: usize,
    /// Width of the placement area
    pub width: u32,
    /// Height of the placement area
    pub height: u32,
    /// Seed for the random number generator
    pub seed: u64,
}

impl Default for RandomScenario {
    fn default() -> Self {
        RandomScenario {
            count: 10,
            width: WORLD_SIZE as u32,
            height: WORLD_SIZE as u32,
            seed: 0,
        }
    }
}

impl RandomScenario {
    /// Smallest generated radius
    pub const MIN_RADIUS: u32 = 3;
    /// Largest generated radius
    pub const MAX_RADIUS: u32 = 9;

    /// Produce the bodies; the same settings always give the same scenario
    pub fn generate(&self) -> ScenarioConfig {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let bodies = (0..self.count)
            .map(|_| {
                let x = rng.gen_range(0..=self.width);
                let y = rng.gen_range(0..=self.height);
                let color = Color::random(&mut rng);
                let radius = f64::from(rng.gen_range(Self::MIN_RADIUS..=Self::MAX_RADIUS));
                BodySpec::new(
                    f64::from(x),
                    f64::from(y),
                    radius,
                    color,
                    radius * RANDOM_MASS_PER_RADIUS,
                    0.0,
                    0.0,
                )
            })
            .collect();

        ScenarioConfig::new(bodies)
    }
}
