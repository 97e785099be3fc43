use glam::Vec2;

use crate::config::SimConfig;
use crate::fluids::poly6_kernel;
use crate::grid::SpatialHashGrid;
use crate::parallel;
use crate::particle::ParticleSet;

/// Add a viscosity term to each particle's acceleration.
///
/// Blends each particle's velocity toward its neighbors':
///
/// a_i += c * sum_j { (v_j - v_i) * poly6(|x_i - x_j|, h) }
///
/// where c = `viscosity_strength`. Reads only the velocities from before
/// the force phase, so the result does not depend on particle order.
pub fn add_viscosity_accelerations(
    particles: &mut ParticleSet,
    grid: &SpatialHashGrid,
    config: &SimConfig,
) {
    let strength = config.viscosity_strength;
    if strength <= 0.0 {
        return;
    }
    let h = config.interaction_radius;

    let ParticleSet {
        velocity,
        acceleration,
        ..
    } = particles;
    let velocity: &[Vec2] = velocity;

    parallel::for_each_slot(acceleration, |i, acc| {
        let vel_i = velocity[i];
        let mut blend = Vec2::ZERO;
        grid.for_each_neighbor(i, |j, offset| {
            if j == i {
                return;
            }
            blend += (velocity[j] - vel_i) * poly6_kernel(offset.length(), h);
        });
        *acc += blend * strength;
    });
}
