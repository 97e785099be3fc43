use glam::Vec2;
use sph_core::constraints::spring::{SpringKey, SpringNetwork};
use sph_core::{BoundaryVolume, ParticleSet, SimConfig, Simulation, SpatialHashGrid, SpringConfig};

const DT: f32 = 1.0 / 60.0;

fn spring_config() -> SimConfig {
    SimConfig {
        gravity_enabled: false,
        springs: SpringConfig {
            enabled: true,
            ..SpringConfig::default()
        },
        ..SimConfig::default()
    }
}

fn build(positions: &[Vec2], radius: f32) -> (ParticleSet, SpatialHashGrid) {
    let mut particles = ParticleSet::new();
    for &p in positions {
        particles.add(p);
    }
    let mut grid = SpatialHashGrid::new(radius, particles.len());
    grid.build(particles.predicted_positions()).unwrap();
    (particles, grid)
}

#[test]
fn test_spring_key_is_canonical() {
    assert_eq!(SpringKey::new(3, 9), SpringKey::new(9, 3));
    assert_eq!(SpringKey::new(9, 3).pair(), (3, 9));
    assert_ne!(SpringKey::new(3, 9), SpringKey::new(3, 10));

    let mut set = std::collections::HashSet::new();
    set.insert(SpringKey::new(1, 2));
    assert!(set.contains(&SpringKey::new(2, 1)));
}

#[test]
fn test_springs_form_between_neighbors_only() {
    let config = spring_config();
    let (_, grid) = build(
        &[Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(200.0, 0.0)],
        config.interaction_radius,
    );
    let mut network = SpringNetwork::new();
    network.adjust(&grid, &config, DT);

    assert_eq!(network.len(), 1);
    let keys: Vec<SpringKey> = network.keys().collect();
    assert_eq!(keys, vec![SpringKey::new(0, 1)]);
    let rest = network.rest_length(1, 0).unwrap();
    assert!(rest < config.interaction_radius, "compressed spring should shorten, rest = {rest}");
    assert!(network.rest_length(0, 2).is_none());
}

#[test]
fn test_spring_dropped_when_particles_separate() {
    let config = spring_config();
    let mut network = SpringNetwork::new();

    let (_, grid) = build(&[Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0)], config.interaction_radius);
    network.adjust(&grid, &config, DT);
    assert_eq!(network.len(), 1);

    let (_, grid) = build(&[Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0)], config.interaction_radius);
    network.adjust(&grid, &config, DT);
    assert!(network.is_empty());
}

#[test]
fn test_spring_accelerations_equal_and_opposite() {
    let config = spring_config();
    let (mut particles, grid) = build(
        &[Vec2::new(50.0, 50.0), Vec2::new(55.0, 54.0)],
        config.interaction_radius,
    );
    let mut network = SpringNetwork::new();
    network.adjust(&grid, &config, DT);
    network.add_spring_accelerations(&mut particles, &grid, &config);

    let a0 = particles.acceleration(0).unwrap();
    let a1 = particles.acceleration(1).unwrap();
    assert!(a0.length() > 0.0);
    assert!((a0 + a1).length() < 1e-6, "a0 = {a0}, a1 = {a1}");
    // compressed below its rest length, the spring pushes the pair apart
    let axis = Vec2::new(5.0, 4.0).normalize();
    assert!(a0.dot(axis) < 0.0);
}

#[test]
fn test_simulation_maintains_spring_network() {
    let config = spring_config();
    let boundary = BoundaryVolume::new(Vec2::ZERO, Vec2::new(1000.0, 1000.0));
    let mut sim = Simulation::new(config).unwrap();
    sim.add_particle(Vec2::new(400.0, 400.0));
    sim.add_particle(Vec2::new(408.0, 400.0));

    sim.update(DT, &boundary).unwrap();
    assert_eq!(sim.springs().len(), 1);

    sim.set_velocity(0, Vec2::new(-1200.0, 0.0)).unwrap();
    sim.set_velocity(1, Vec2::new(1200.0, 0.0)).unwrap();
    sim.update(DT, &boundary).unwrap();
    assert!(sim.springs().is_empty(), "springs should break once out of range");

    sim.clear();
    assert!(sim.springs().is_empty());
}

#[test]
fn test_disabled_springs_never_form() {
    let config = SimConfig {
        gravity_enabled: false,
        ..SimConfig::default()
    };
    let boundary = BoundaryVolume::new(Vec2::ZERO, Vec2::new(1000.0, 1000.0));
    let mut sim = Simulation::new(config).unwrap();
    sim.generate_block(Vec2::new(300.0, 300.0), 4, 4, 6.0);
    sim.step(&boundary).unwrap();
    assert!(sim.springs().is_empty());
}
