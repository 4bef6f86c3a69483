//! Simulation core
//!
//! This module contains the body model, the registry that owns bodies, and
//! the per-tick physics step:
//! - Body identity, kinematics and appearance
//! - Ordered ownership with deferred removal
//! - Gravity, collision, merging, drag and boundary reflection

mod body;
mod registry;
mod step;

pub use body::{Body, BodyId, BodySpec, Color};
pub use registry::BodyRegistry;
pub use step::{
    attraction, escape_velocity, overlaps, run_tick, step, Force, DAMPING,
    GRAVITATIONAL_CONSTANT, TIMESTEP, WORLD_SIZE,
};
