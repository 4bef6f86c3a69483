//! Body registry
//!
//! The registry owns the live bodies in insertion order and allocates their
//! ids. Insertion order is the iteration order of the physics step, so the
//! simulation is deterministic for a given sequence of `add` calls.

use crate::error::SimError;
use crate::sim::{Body, BodyId, BodySpec, Color};

/// Ordered owner of all live bodies
///
/// Removal is deferred: the physics step only flags absorbed bodies, and
/// [`compact`](BodyRegistry::compact) drops them once the tick is over.
#[derive(Debug, Default)]
pub struct BodyRegistry {
    next_id: u64,
    bodies: Vec<Body>,
}

impl BodyRegistry {
    /// Create an empty registry whose ids start at zero
    pub fn new() -> Self {
        BodyRegistry {
            next_id: 0,
            bodies: Vec::new(),
        }
    }

    /// Create and register a body, returning its freshly allocated id
    ///
    /// # Panics
    ///
    /// Panics if `mass` or `radius` is not positive and finite.
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        mass: f64,
        vx: f64,
        vy: f64,
    ) -> BodyId {
        self.add_spec(BodySpec::new(x, y, radius, color, mass, vx, vy))
    }

    /// Register a body described by a spec
    ///
    /// # Panics
    ///
    /// Panics if the spec's mass or radius is not positive and finite.
    pub fn add_spec(&mut self, spec: BodySpec) -> BodyId {
        let id = self.allocate_id();
        self.bodies.push(Body::new(id, spec));
        id
    }

    /// Register a body, rejecting invalid specs without consuming an id
    pub fn try_add_spec(&mut self, spec: BodySpec) -> Result<BodyId, SimError> {
        spec.validate()?;
        Ok(self.add_spec(spec))
    }

    fn allocate_id(&mut self) -> BodyId {
        let id = BodyId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// The id the next registered body will receive
    pub fn next_id(&self) -> BodyId {
        BodyId::new(self.next_id)
    }

    /// The live bodies in iteration order
    pub fn snapshot(&self) -> &[Body] {
        &self.bodies
    }

    /// Field-mutable view of the live bodies
    ///
    /// The slice cannot grow or shrink, so membership stays fixed while the
    /// physics step rewrites positions, velocities and removal flags.
    pub fn snapshot_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Drop every body flagged for removal, keeping survivors in order
    ///
    /// Returns the number of bodies removed.
    pub fn compact(&mut self) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|body| !body.is_pending_removal());
        let removed = before - self.bodies.len();

        if removed > 0 {
            tracing::debug!(removed, remaining = self.bodies.len(), "compacted registry");
        }

        removed
    }

    /// Look up a live body by id
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id() == id)
    }

    /// Iterate over the live bodies in order
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Get the number of live bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Check whether the registry holds no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl<'a> IntoIterator for &'a BodyRegistry {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
