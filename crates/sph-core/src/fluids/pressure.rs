use glam::Vec2;

use crate::config::SimConfig;
use crate::fluids::spiky_kernel_derivative;
use crate::grid::SpatialHashGrid;
use crate::math::pseudo_random_direction;
use crate::parallel;
use crate::particle::ParticleSet;

/// Mean of two pressures. Using it for both sides of a pair keeps the pair
/// forces equal and opposite.
#[inline]
pub fn shared_pressure(p_i: f32, p_j: f32) -> f32 {
    0.5 * (p_i + p_j)
}

/// Pressure-gradient force on particle `i`:
///
/// ```text
/// F_i = sum_j -shared(P_i, P_j) * dir(j -> i) * W'(d, h) / rho_j
/// ```
///
/// `W'` is never positive, so positive pressure pushes `i` away from `j`.
/// Coincident particles have no direction; they get a deterministic
/// pseudo-random one (see [`pseudo_random_direction`]) instead of a NaN.
pub fn pressure_force(
    i: usize,
    density: &[f32],
    pressure: &[f32],
    grid: &SpatialHashGrid,
    radius: f32,
) -> Vec2 {
    let p_i = pressure[i];
    let mut force = Vec2::ZERO;
    grid.for_each_neighbor(i, |j, offset| {
        if j == i {
            return;
        }
        let dist = offset.length();
        let dir = if dist > 0.0 {
            offset / dist
        } else {
            pseudo_random_direction(i, j)
        };
        let slope = spiky_kernel_derivative(dist, radius);
        force += -shared_pressure(p_i, pressure[j]) * dir * slope / density[j];
    });
    force
}

/// Overwrite every particle's acceleration with `F_i / rho_i`.
///
/// Densities and pressures must be complete for all particles first.
pub fn compute_pressure_accelerations(
    particles: &mut ParticleSet,
    grid: &SpatialHashGrid,
    config: &SimConfig,
) {
    let radius = config.interaction_radius;
    let ParticleSet {
        density,
        pressure,
        acceleration,
        ..
    } = particles;
    let density: &[f32] = density;
    let pressure: &[f32] = pressure;

    parallel::for_each_slot(acceleration, |i, acc| {
        *acc = pressure_force(i, density, pressure, grid, radius) / density[i];
    });
}
