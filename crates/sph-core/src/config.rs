use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Parameters of the optional elastic spring network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub enabled: bool,
    /// Spring constant applied to `(1 - L/r) * (d - L)`.
    pub stiffness: f32,
    /// Rate at which rest lengths yield toward the current distance.
    pub plasticity: f32,
    /// Fraction of the rest length a spring may deform before it yields.
    pub yield_ratio: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stiffness: 0.3,
            plasticity: 0.3,
            yield_ratio: 0.1,
        }
    }
}

/// Engine configuration, supplied at construction or reset.
///
/// Units are screen pixels and seconds; `y` grows downward, so gravity
/// accelerates along `+y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Kernel support radius. Also the grid cell size.
    pub interaction_radius: f32,
    /// Rest density, the zero point of the equation of state.
    pub target_density: f32,
    pub pressure_multiplier: f32,
    pub gravity_enabled: bool,
    pub gravity_magnitude: f32,
    /// Multiplied into every velocity once per step.
    pub velocity_damping: f32,
    /// Fraction of the normal velocity kept after a boundary bounce.
    pub boundary_damp_factor: f32,
    /// Margin kept between a particle center and the boundary.
    pub particle_radius: f32,
    /// `dt` used by [`Simulation::step`](crate::simulation::Simulation::step).
    pub fixed_timestep: f32,
    /// Zero disables the viscosity term.
    pub viscosity_strength: f32,
    pub springs: SpringConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            interaction_radius: 16.0,
            target_density: 0.02,
            pressure_multiplier: 500.0,
            gravity_enabled: true,
            gravity_magnitude: 400.0,
            velocity_damping: 0.99,
            boundary_damp_factor: 0.95,
            particle_radius: 6.0,
            fixed_timestep: 1.0 / 60.0,
            viscosity_strength: 0.0,
            springs: SpringConfig::default(),
        }
    }
}

impl SimConfig {
    /// Gravity as an acceleration vector, zero when disabled.
    pub fn gravity(&self) -> Vec2 {
        if self.gravity_enabled {
            Vec2::new(0.0, self.gravity_magnitude)
        } else {
            Vec2::ZERO
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.interaction_radius.is_finite() && self.interaction_radius > 0.0) {
            return Err(invalid("interaction_radius must be positive and finite"));
        }
        if !(self.target_density.is_finite() && self.target_density >= 0.0) {
            return Err(invalid("target_density must be non-negative"));
        }
        if !(self.pressure_multiplier.is_finite() && self.pressure_multiplier >= 0.0) {
            return Err(invalid("pressure_multiplier must be non-negative"));
        }
        if !self.gravity_magnitude.is_finite() {
            return Err(invalid("gravity_magnitude must be finite"));
        }
        if !(self.velocity_damping > 0.0 && self.velocity_damping <= 1.0) {
            return Err(invalid("velocity_damping must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.boundary_damp_factor) {
            return Err(invalid("boundary_damp_factor must be in [0, 1]"));
        }
        if !(self.particle_radius.is_finite() && self.particle_radius >= 0.0) {
            return Err(invalid("particle_radius must be non-negative"));
        }
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(invalid("fixed_timestep must be positive"));
        }
        if !(self.viscosity_strength.is_finite() && self.viscosity_strength >= 0.0) {
            return Err(invalid("viscosity_strength must be non-negative"));
        }
        let springs = &self.springs;
        if !(springs.stiffness.is_finite() && springs.stiffness >= 0.0) {
            return Err(invalid("springs.stiffness must be non-negative"));
        }
        if !(springs.plasticity.is_finite() && springs.plasticity >= 0.0) {
            return Err(invalid("springs.plasticity must be non-negative"));
        }
        if !(0.0..1.0).contains(&springs.yield_ratio) {
            return Err(invalid("springs.yield_ratio must be in [0, 1)"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> SimError {
    SimError::InvalidConfig(msg.to_string())
}
