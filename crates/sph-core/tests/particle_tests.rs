use glam::Vec2;
use sph_core::{ParticleSet, SimError};

#[test]
fn test_add_returns_dense_ids() {
    let mut particles = ParticleSet::with_capacity(4);
    assert!(particles.is_empty());

    for k in 0..4 {
        let id = particles.add(Vec2::new(k as f32, 0.0));
        assert_eq!(id, k);
    }
    assert_eq!(particles.len(), 4);
}

#[test]
fn test_new_particle_starts_at_rest() {
    let mut particles = ParticleSet::new();
    let id = particles.add(Vec2::new(3.0, 4.0));

    assert_eq!(particles.position(id).unwrap(), Vec2::new(3.0, 4.0));
    assert_eq!(particles.predicted(id).unwrap(), Vec2::new(3.0, 4.0));
    assert_eq!(particles.velocity(id).unwrap(), Vec2::ZERO);
    assert_eq!(particles.density(id).unwrap(), 0.0);
    assert_eq!(particles.pressure(id).unwrap(), 0.0);
    assert_eq!(particles.acceleration(id).unwrap(), Vec2::ZERO);
}

#[test]
fn test_arrays_stay_in_lockstep() {
    let mut particles = ParticleSet::new();
    for k in 0..17 {
        particles.add(Vec2::splat(k as f32));
    }
    let n = particles.len();
    assert_eq!(particles.positions().len(), n);
    assert_eq!(particles.predicted_positions().len(), n);
    assert_eq!(particles.velocities().len(), n);
    assert_eq!(particles.densities().len(), n);
    assert_eq!(particles.pressures().len(), n);
    assert_eq!(particles.accelerations().len(), n);
}

#[test]
fn test_out_of_range_access_is_error() {
    let mut particles = ParticleSet::new();
    particles.add(Vec2::ZERO);
    particles.add(Vec2::ONE);

    let expected = SimError::IndexOutOfRange { index: 2, len: 2 };
    assert_eq!(particles.position(2), Err(expected.clone()));
    assert_eq!(particles.velocity(2), Err(expected.clone()));
    assert_eq!(particles.density(99), Err(SimError::IndexOutOfRange { index: 99, len: 2 }));
    assert_eq!(particles.set_velocity(2, Vec2::X), Err(expected));
}

#[test]
fn test_set_velocity() {
    let mut particles = ParticleSet::new();
    particles.add(Vec2::ZERO);
    particles.set_velocity(0, Vec2::new(-2.0, 7.5)).unwrap();
    assert_eq!(particles.velocity(0).unwrap(), Vec2::new(-2.0, 7.5));
}

#[test]
fn test_clear_empties_every_array() {
    let mut particles = ParticleSet::new();
    particles.add(Vec2::ZERO);
    particles.add(Vec2::ONE);
    particles.clear();

    assert!(particles.is_empty());
    assert!(particles.velocities().is_empty());
    assert!(particles.accelerations().is_empty());
    assert!(particles.position(0).is_err());
}
