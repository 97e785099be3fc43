use crate::config::SimConfig;
use crate::fluids::spiky_kernel;
use crate::grid::SpatialHashGrid;
use crate::parallel;
use crate::particle::ParticleSet;

/// Linear equation of state.
///
/// Negative below `target_density`, which pulls sparse regions together.
#[inline]
pub fn pressure_from_density(density: f32, target_density: f32, pressure_multiplier: f32) -> f32 {
    (density - target_density) * pressure_multiplier
}

/// Kernel-weighted neighbor sum for particle `i`.
///
/// The particle counts itself at distance zero, so the result is at least
/// `spiky_kernel(0, radius) > 0`.
pub fn density_at(i: usize, grid: &SpatialHashGrid, radius: f32) -> f32 {
    let mut rho = 0.0_f32;
    grid.for_each_neighbor(i, |_, offset| {
        rho += spiky_kernel(offset.length(), radius);
    });
    rho
}

/// Fill `density` and `pressure` for every particle.
///
/// The grid must have been built from the current predicted positions.
pub fn compute_densities(particles: &mut ParticleSet, grid: &SpatialHashGrid, config: &SimConfig) {
    let radius = config.interaction_radius;
    let target = config.target_density;
    let multiplier = config.pressure_multiplier;

    let ParticleSet {
        density, pressure, ..
    } = particles;

    parallel::for_each_slot_pair(density, pressure, |i, rho, p| {
        *rho = density_at(i, grid, radius);
        *p = pressure_from_density(*rho, target, multiplier);
    });
}
