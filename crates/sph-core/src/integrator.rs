use glam::Vec2;

use crate::config::SimConfig;
use crate::parallel;
use crate::particle::ParticleSet;

/// Apply gravity and compute predicted positions.
///
/// `v += g * dt`, then `x* = x + v * dt`.
pub fn predict(particles: &mut ParticleSet, config: &SimConfig, dt: f32) {
    let gravity = config.gravity();
    let ParticleSet {
        position,
        predicted,
        velocity,
        ..
    } = particles;
    let position: &[Vec2] = position;

    parallel::for_each_slot_pair(velocity, predicted, |i, vel, pred| {
        *vel += gravity * dt;
        *pred = position[i] + *vel * dt;
    });
}

/// `v += a * dt` using the accelerations left by the force phase.
pub fn apply_accelerations(particles: &mut ParticleSet, dt: f32) {
    let ParticleSet {
        velocity,
        acceleration,
        ..
    } = particles;
    let acceleration: &[Vec2] = acceleration;

    parallel::for_each_slot(velocity, |i, vel| {
        *vel += acceleration[i] * dt;
    });
}

/// Advance positions, damp velocities and bounce off the boundary box.
pub fn integrate(
    particles: &mut ParticleSet,
    config: &SimConfig,
    top_left: Vec2,
    bottom_right: Vec2,
    dt: f32,
) {
    let damping = config.velocity_damping;
    let margin = config.particle_radius;
    let bounce = config.boundary_damp_factor;
    let ParticleSet {
        position, velocity, ..
    } = particles;

    parallel::for_each_slot_pair(position, velocity, |_, pos, vel| {
        *pos += *vel * dt;
        *vel *= damping;
        let (p, v) = resolve_collision(*pos, *vel, top_left, bottom_right, margin, bounce);
        *pos = p;
        *vel = v;
    });
}

/// Clamp a position into `[top_left + margin, bottom_right - margin]` per
/// axis. On each axis that penetrates, the velocity component is negated
/// and scaled by `bounce`.
pub fn resolve_collision(
    mut position: Vec2,
    mut velocity: Vec2,
    top_left: Vec2,
    bottom_right: Vec2,
    margin: f32,
    bounce: f32,
) -> (Vec2, Vec2) {
    for axis in 0..2 {
        if position[axis] - margin < top_left[axis] {
            position[axis] = top_left[axis] + margin;
            velocity[axis] = -velocity[axis] * bounce;
        } else if position[axis] + margin > bottom_right[axis] {
            position[axis] = bottom_right[axis] - margin;
            velocity[axis] = -velocity[axis] * bounce;
        }
    }
    (position, velocity)
}
