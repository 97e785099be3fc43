//! 2D particle fluid simulation (smoothed-particle hydrodynamics).
//!
//! Every step runs a fixed sequence of data-parallel phases
//! (see [`simulation::Phase`]):
//!
//! 1. Predict: gravity, then predicted positions.
//! 2. Build the spatial hash grid over predicted positions.
//! 3. Density and pressure per particle.
//! 4. Pressure-gradient force, applied to velocity.
//! 5. Integrate positions, damp, and bounce off the boundary box.
//!
//! # Modules
//! - [`particle`] -- struct-of-arrays particle storage.
//! - [`grid`] -- collision-safe uniform spatial hash for neighbor queries.
//! - [`fluids`] -- smoothing kernels, density and pressure solvers, viscosity.
//! - [`constraints`] -- optional elastic spring network.
//! - [`integrator`] -- prediction, velocity update and boundary collision.
//! - [`boundary`] -- the container box the host hands to each step.
//! - [`simulation`] -- the orchestrator.
//! - [`render`] -- GPU-ready snapshot of the particle state.

pub mod boundary;
pub mod config;
pub mod constraints;
pub mod error;
pub mod fluids;
pub mod grid;
pub mod integrator;
pub mod math;
pub mod parallel;
pub mod particle;
pub mod render;
pub mod simulation;

pub use boundary::{Boundary, BoundaryVolume};
pub use config::{SimConfig, SpringConfig};
pub use error::SimError;
pub use fluids::{poly6_kernel, spiky_kernel, spiky_kernel_derivative};
pub use grid::SpatialHashGrid;
pub use particle::ParticleSet;
pub use render::RenderParticle;
pub use simulation::{Phase, Simulation};
