use glam::Vec2;

use crate::error::SimError;

/// SoA particle storage.
///
/// Index `i` across every array refers to the same particle. All arrays
/// grow and shrink together, so their lengths are always equal.
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    /// Authoritative positions, written only by the integrator.
    pub(crate) position: Vec<Vec2>,
    /// Position after gravity, before the pressure correction.
    pub(crate) predicted: Vec<Vec2>,
    pub(crate) velocity: Vec<Vec2>,
    pub(crate) density: Vec<f32>,
    pub(crate) pressure: Vec<f32>,
    /// Per-step acceleration scratch filled by the force phase.
    pub(crate) acceleration: Vec<Vec2>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            position: Vec::with_capacity(capacity),
            predicted: Vec::with_capacity(capacity),
            velocity: Vec::with_capacity(capacity),
            density: Vec::with_capacity(capacity),
            pressure: Vec::with_capacity(capacity),
            acceleration: Vec::with_capacity(capacity),
        }
    }

    /// Append a particle at rest and return its dense index.
    pub fn add(&mut self, position: Vec2) -> usize {
        let id = self.position.len();
        self.position.push(position);
        self.predicted.push(position);
        self.velocity.push(Vec2::ZERO);
        self.density.push(0.0);
        self.pressure.push(0.0);
        self.acceleration.push(Vec2::ZERO);
        self.debug_check_lengths();
        id
    }

    pub fn reserve(&mut self, additional: usize) {
        self.position.reserve(additional);
        self.predicted.reserve(additional);
        self.velocity.reserve(additional);
        self.density.reserve(additional);
        self.pressure.reserve(additional);
        self.acceleration.reserve(additional);
    }

    pub fn clear(&mut self) {
        self.position.clear();
        self.predicted.clear();
        self.velocity.clear();
        self.density.clear();
        self.pressure.clear();
        self.acceleration.clear();
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn position(&self, id: usize) -> Result<Vec2, SimError> {
        self.check(id).map(|i| self.position[i])
    }

    pub fn predicted(&self, id: usize) -> Result<Vec2, SimError> {
        self.check(id).map(|i| self.predicted[i])
    }

    pub fn velocity(&self, id: usize) -> Result<Vec2, SimError> {
        self.check(id).map(|i| self.velocity[i])
    }

    pub fn density(&self, id: usize) -> Result<f32, SimError> {
        self.check(id).map(|i| self.density[i])
    }

    pub fn pressure(&self, id: usize) -> Result<f32, SimError> {
        self.check(id).map(|i| self.pressure[i])
    }

    pub fn acceleration(&self, id: usize) -> Result<Vec2, SimError> {
        self.check(id).map(|i| self.acceleration[i])
    }

    pub fn set_velocity(&mut self, id: usize, velocity: Vec2) -> Result<(), SimError> {
        let i = self.check(id)?;
        self.velocity[i] = velocity;
        Ok(())
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.position
    }

    pub fn predicted_positions(&self) -> &[Vec2] {
        &self.predicted
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocity
    }

    pub fn densities(&self) -> &[f32] {
        &self.density
    }

    pub fn pressures(&self) -> &[f32] {
        &self.pressure
    }

    pub fn accelerations(&self) -> &[Vec2] {
        &self.acceleration
    }

    fn check(&self, id: usize) -> Result<usize, SimError> {
        if id < self.len() {
            Ok(id)
        } else {
            Err(SimError::IndexOutOfRange {
                index: id,
                len: self.len(),
            })
        }
    }

    #[inline]
    fn debug_check_lengths(&self) {
        let n = self.position.len();
        debug_assert!(
            self.predicted.len() == n
                && self.velocity.len() == n
                && self.density.len() == n
                && self.pressure.len() == n
                && self.acceleration.len() == n,
            "particle arrays out of sync"
        );
    }
}
