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
//! Simulated bodies
//!
//! A body is a point mass with a position, velocity, radius and color. Bodies
//! are owned by the [`BodyRegistry`](crate::sim::BodyRegistry), which hands
//! out their identities; the physics step mutates them in place.

use crate::error::SimError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a body
///
/// Ids are allocated monotonically by a registry and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(u64);

impl BodyId {
    /// Create a new BodyId from a raw u64 value
    pub fn new(id: u64) -> Self {
        BodyId(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    /// Create a color from its channels
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Pick a color with every channel uniform in `[0, 255]`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Color::new(rng.gen(), rng.gen(), rng.gen())
    }

    /// Color of a merged body: per-channel mean plus one, saturating at 255
    pub fn blend(self, other: Color) -> Self {
        fn channel(a: u8, b: u8) -> u8 {
            ((u16::from(a) + u16::from(b)) / 2 + 1).min(255) as u8
        }

        Color::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

/// Initial state of a body, before the registry assigns it an id
///
/// # Examples
///
/// ```
/// use particle_sim::sim::{BodySpec, Color};
///
/// let spec = BodySpec::new(500.0, 500.0, 10.0, Color::WHITE, 1e12, 5.0, 9.0);
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    /// Initial x coordinate
    pub x: f64,
    /// Initial y coordinate
    pub y: f64,
    /// Radius, strictly positive
    pub radius: f64,
    /// Display color
    pub color: Color,
    /// Mass, strictly positive
    pub mass: f64,
    /// Initial x velocity
    #[serde(default)]
    pub vx: f64,
    /// Initial y velocity
    #[serde(default)]
    pub vy: f64,
}

impl BodySpec {
    /// Create a spec in the registry's argument order
    pub fn new(x: f64, y: f64, radius: f64, color: Color, mass: f64, vx: f64, vy: f64) -> Self {
        BodySpec { x, y, radius, color, mass, vx, vy }
    }

    /// Check that mass and radius are positive and every coordinate is finite
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(SimError::InvalidBody { field: "mass", value: self.mass });
        }
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(SimError::InvalidBody { field: "radius", value: self.radius });
        }

        let coordinates = [("x", self.x), ("y", self.y), ("vx", self.vx), ("vy", self.vy)];
        for (field, value) in coordinates {
            if !value.is_finite() {
                return Err(SimError::InvalidBody { field, value });
            }
        }

        Ok(())
    }
}

/// A simulated point mass
///
/// Mass and radius are strictly positive for the whole life of the body and
/// only grow, through merges. `pending_removal` is raised when another body
/// absorbs this one; the body is dropped at the end of that tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) vx: f64,
    pub(crate) vy: f64,
    pub(crate) radius: f64,
    pub(crate) mass: f64,
    pub(crate) color: Color,
    pub(crate) pending_removal: bool,
}

impl Body {
    /// Create a body from a spec
    ///
    /// # Panics
    ///
    /// Panics if the mass or radius is not positive and finite. For fallible
    /// construction, use `try_new`.
    pub fn new(id: BodyId, spec: BodySpec) -> Self {
        assert!(
            spec.mass > 0.0 && spec.mass.is_finite(),
            "Body mass must be positive and finite"
        );
        assert!(
            spec.radius > 0.0 && spec.radius.is_finite(),
            "Body radius must be positive and finite"
        );
        Self::from_spec(id, spec)
    }

    /// Try to create a body from a spec, rejecting invalid attributes
    pub fn try_new(id: BodyId, spec: BodySpec) -> Result<Self, SimError> {
        spec.validate()?;
        Ok(Self::from_spec(id, spec))
    }

    fn from_spec(id: BodyId, spec: BodySpec) -> Self {
        Body {
            id,
            x: spec.x,
            y: spec.y,
            vx: spec.vx,
            vy: spec.vy,
            radius: spec.radius,
            mass: spec.mass,
            color: spec.color,
            pending_removal: false,
        }
    }

    /// Get the body's identity
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Get the position as `(x, y)`
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Get the velocity as `(vx, vy)`
    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    /// Calculate the speed (velocity magnitude)
    pub fn speed(&self) -> f64 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    /// Get the radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Get the mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Get the color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether another body absorbed this one during the current tick
    pub fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }

    /// Check if position and velocity are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(mass: f64, radius: f64) -> BodySpec {
        BodySpec::new(1.0, 2.0, radius, Color::WHITE, mass, 3.0, 4.0)
    }

    #[test]
    fn test_body_creation() {
        let body = Body::new(BodyId::new(7), spec(10.0, 2.0));
        assert_eq!(body.id().raw(), 7);
        assert_eq!(body.position(), (1.0, 2.0));
        assert_eq!(body.velocity(), (3.0, 4.0));
        assert_eq!(body.speed(), 5.0); // 3-4-5 triangle
        assert!(!body.is_pending_removal());
        assert!(body.is_valid());
    }

    #[test]
    #[should_panic(expected = "Body mass must be positive and finite")]
    fn test_zero_mass_panics() {
        Body::new(BodyId::new(0), spec(0.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "Body radius must be positive and finite")]
    fn test_negative_radius_panics() {
        Body::new(BodyId::new(0), spec(1.0, -1.0));
    }

    #[test]
    fn test_try_new_rejects_invalid() {
        let err = Body::try_new(BodyId::new(0), spec(f64::NAN, 1.0)).unwrap_err();
        assert!(matches!(err, SimError::InvalidBody { field: "mass", .. }));

        let mut bad_position = spec(1.0, 1.0);
        bad_position.x = f64::INFINITY;
        let err = Body::try_new(BodyId::new(0), bad_position).unwrap_err();
        assert!(matches!(err, SimError::InvalidBody { field: "x", .. }));

        assert!(Body::try_new(BodyId::new(0), spec(1.0, 1.0)).is_ok());
    }

    #[test]
    fn test_color_blend() {
        let a = Color::new(10, 20, 255);
        let b = Color::new(30, 21, 255);
        assert_eq!(a.blend(b), Color::new(21, 21, 255));
        assert_eq!(Color::WHITE.blend(Color::WHITE), Color::WHITE);
        assert_eq!(Color::new(0, 0, 0).blend(Color::new(0, 0, 1)), Color::new(1, 1, 1));
    }

    #[test]
    fn test_body_id_ordering() {
        assert!(BodyId::new(1) < BodyId::new(2));
        assert_eq!(format!("{}", BodyId::new(3)), "Body(3)");
    }
}
