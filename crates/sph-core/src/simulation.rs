use std::ops::Range;

use glam::Vec2;
use tracing::{debug, info, trace, trace_span, warn};

use crate::boundary::Boundary;
use crate::config::SimConfig;
use crate::constraints::spring::SpringNetwork;
use crate::error::SimError;
use crate::fluids::{density, pressure, viscosity};
use crate::grid::SpatialHashGrid;
use crate::integrator;
use crate::particle::ParticleSet;
use crate::render::{self, RenderParticle};

/// Steps below this are treated as zero.
const MIN_DT: f32 = 1.0e-9;

/// One stage of a simulation step.
///
/// Each phase finishes for every particle before the next one starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Gravity, then predicted positions.
    Predict,
    /// Spatial hash over predicted positions.
    BuildGrid,
    /// Densities and pressures. Needs the grid.
    Density,
    /// Pressure (plus optional viscosity/spring) accelerations, applied to
    /// velocities. Needs densities.
    Force,
    /// Positions, damping and boundary collision.
    Integrate,
}

impl Phase {
    /// Order `update` runs the phases in.
    pub const ORDER: [Phase; 5] = [
        Phase::Predict,
        Phase::BuildGrid,
        Phase::Density,
        Phase::Force,
        Phase::Integrate,
    ];
}

/// Particle fluid simulation.
///
/// Owns the particles, the neighbor grid and the spring network. The
/// boundary box is owned by the caller and borrowed for each step.
pub struct Simulation {
    config: SimConfig,
    particles: ParticleSet,
    grid: SpatialHashGrid,
    springs: SpringNetwork,
    densities_ready: bool,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        Self::with_capacity(config, 0)
    }

    /// Create a simulation with storage reserved for `capacity` particles.
    pub fn with_capacity(config: SimConfig, capacity: usize) -> Result<Self, SimError> {
        config.validate()?;
        info!(
            radius = config.interaction_radius,
            target_density = config.target_density,
            capacity,
            "simulation created"
        );
        Ok(Self {
            config,
            particles: ParticleSet::with_capacity(capacity),
            grid: SpatialHashGrid::new(config.interaction_radius, 0),
            springs: SpringNetwork::new(),
            densities_ready: false,
        })
    }

    /// Replace the configuration and remove every particle.
    pub fn reset(&mut self, config: SimConfig) -> Result<(), SimError> {
        config.validate()?;
        self.config = config;
        self.grid.set_interaction_radius(config.interaction_radius);
        self.clear();
        info!(radius = config.interaction_radius, "simulation reset");
        Ok(())
    }

    /// Add a particle at rest. Returns its id.
    pub fn add_particle(&mut self, position: Vec2) -> usize {
        let id = self.particles.add(position);
        self.resize_grid();
        trace!(id, x = position.x, y = position.y, "particle added");
        id
    }

    /// Spawn a `columns` x `rows` lattice starting at `origin`.
    ///
    /// Returns the id range of the new particles.
    pub fn generate_block(
        &mut self,
        origin: Vec2,
        columns: usize,
        rows: usize,
        spacing: f32,
    ) -> Range<usize> {
        let start = self.particles.len();
        self.particles.reserve(columns * rows);
        for row in 0..rows {
            for col in 0..columns {
                let offset = Vec2::new(col as f32, row as f32) * spacing;
                self.particles.add(origin + offset);
            }
        }
        self.resize_grid();
        debug!(count = columns * rows, total = self.particles.len(), "particle block generated");
        start..self.particles.len()
    }

    /// Remove every particle. Must not be called mid-step.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.springs.clear();
        self.resize_grid();
        debug!("simulation cleared");
    }

    /// Advance by `dt` seconds inside `boundary`.
    ///
    /// Zero `dt` leaves everything untouched. Large `dt` relative to the
    /// interaction radius is not corrected for and can blow up.
    pub fn update<B>(&mut self, dt: f32, boundary: &B) -> Result<(), SimError>
    where
        B: Boundary + ?Sized,
    {
        check_dt(dt)?;
        if dt < MIN_DT {
            trace!("zero timestep, nothing to do");
            return Ok(());
        }

        let _span = trace_span!("update", particles = self.particles.len(), dt).entered();
        for phase in Phase::ORDER {
            self.run_phase(phase, dt, boundary)?;
        }
        Ok(())
    }

    /// Advance by the configured fixed timestep.
    pub fn step<B>(&mut self, boundary: &B) -> Result<(), SimError>
    where
        B: Boundary + ?Sized,
    {
        self.update(self.config.fixed_timestep, boundary)
    }

    /// Run a single phase.
    ///
    /// Phases that depend on an earlier one fail with an error, and do
    /// nothing, if that phase has not completed since the last `Predict`.
    /// `Integrate` closes the step: the grid and densities are stale after it.
    pub fn run_phase<B>(&mut self, phase: Phase, dt: f32, boundary: &B) -> Result<(), SimError>
    where
        B: Boundary + ?Sized,
    {
        check_dt(dt)?;
        let result = match phase {
            Phase::Predict => {
                integrator::predict(&mut self.particles, &self.config, dt);
                self.grid.invalidate();
                self.densities_ready = false;
                Ok(())
            }
            Phase::BuildGrid => self.grid.build(&self.particles.predicted),
            Phase::Density => self.run_density(),
            Phase::Force => self.run_force(dt),
            Phase::Integrate => {
                integrator::integrate(
                    &mut self.particles,
                    &self.config,
                    boundary.top_left(),
                    boundary.bottom_right(),
                    dt,
                );
                // the step is over; neighbor data now describes old positions
                self.grid.invalidate();
                self.densities_ready = false;
                Ok(())
            }
        };
        if let Err(err) = &result {
            warn!(?phase, %err, "simulation phase rejected");
        }
        result
    }

    fn run_density(&mut self) -> Result<(), SimError> {
        if !self.grid.is_built() {
            return Err(SimError::GridNotBuilt);
        }
        density::compute_densities(&mut self.particles, &self.grid, &self.config);
        self.densities_ready = true;
        Ok(())
    }

    fn run_force(&mut self, dt: f32) -> Result<(), SimError> {
        if !self.grid.is_built() {
            return Err(SimError::GridNotBuilt);
        }
        if !self.densities_ready {
            return Err(SimError::DensityNotComputed);
        }

        let springs_enabled = self.config.springs.enabled;
        if springs_enabled {
            self.springs.adjust(&self.grid, &self.config, dt);
        }
        pressure::compute_pressure_accelerations(&mut self.particles, &self.grid, &self.config);
        viscosity::add_viscosity_accelerations(&mut self.particles, &self.grid, &self.config);
        if springs_enabled {
            self.springs
                .add_spring_accelerations(&mut self.particles, &self.grid, &self.config);
        }
        integrator::apply_accelerations(&mut self.particles, dt);
        Ok(())
    }

    /// Flip gravity on or off. Returns the new state.
    pub fn toggle_gravity(&mut self) -> bool {
        self.config.gravity_enabled = !self.config.gravity_enabled;
        debug!(enabled = self.config.gravity_enabled, "gravity toggled");
        self.config.gravity_enabled
    }

    pub fn gravity_enabled(&self) -> bool {
        self.config.gravity_enabled
    }

    pub fn position(&self, id: usize) -> Result<Vec2, SimError> {
        self.particles.position(id)
    }

    pub fn velocity(&self, id: usize) -> Result<Vec2, SimError> {
        self.particles.velocity(id)
    }

    pub fn density(&self, id: usize) -> Result<f32, SimError> {
        self.particles.density(id)
    }

    pub fn pressure(&self, id: usize) -> Result<f32, SimError> {
        self.particles.pressure(id)
    }

    pub fn set_velocity(&mut self, id: usize, velocity: Vec2) -> Result<(), SimError> {
        self.particles.set_velocity(id, velocity)
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn grid(&self) -> &SpatialHashGrid {
        &self.grid
    }

    pub fn springs(&self) -> &SpringNetwork {
        &self.springs
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Refill `out` with one [`RenderParticle`] per particle.
    pub fn write_render_buffer(&self, out: &mut Vec<RenderParticle>) {
        render::write_render_buffer(&self.particles, out);
    }

    fn resize_grid(&mut self) {
        self.grid.resize(self.particles.len());
        self.densities_ready = false;
        trace!(buckets = self.grid.bucket_count(), "grid resized");
    }
}

fn check_dt(dt: f32) -> Result<(), SimError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTimestep(dt))
    }
}
