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
//! # Particle Sim
//!
//! A two-dimensional simulation of point-mass bodies that attract each other
//! gravitationally, bounce on contact, and merge when they collide too slowly
//! to escape each other's pull.
//!
//! ## Features
//!
//! - **Body Registry**: Ordered ownership of bodies with monotonic ids and deferred removal
//! - **Physics Step**: Pairwise gravity, collision reflection, merging, drag and boundary bounce
//! - **Scenarios**: Hand-written, JSON-loaded, or randomly generated initial conditions
//! - **Diagnostics**: Mass, momentum and energy totals, reduced in parallel with Rayon
//!
//! ## Example
//!
//! ```rust
//! use particle_sim::sim::{run_tick, BodyRegistry, Color};
//!
//! let mut registry = BodyRegistry::new();
//! registry.add(400.0, 500.0, 10.0, Color::WHITE, 1e12, 0.0, 0.0);
//! registry.add(600.0, 500.0, 10.0, Color::WHITE, 1e12, 0.0, 0.0);
//!
//! run_tick(&mut registry);
//!
//! for body in &registry {
//!     let (x, y) = body.position();
//!     assert!(x.is_finite() && y.is_finite());
//! }
//! ```

#![warn(missing_docs)]

/// Bodies, the registry and the physics step
pub mod sim;

/// Aggregate measurements over bodies
pub mod diagnostics;

/// Initial-condition configuration
pub mod scenario;

/// Error types
pub mod error;

pub use error::SimError;
pub use sim::{run_tick, Body, BodyId, BodyRegistry};
