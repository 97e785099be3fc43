use std::collections::HashMap;

use glam::Vec2;

use crate::config::SimConfig;
use crate::grid::SpatialHashGrid;
use crate::math::pseudo_random_direction;
use crate::parallel;
use crate::particle::ParticleSet;

/// Unordered particle pair.
///
/// Always stored as `(min, max)`, so `SpringKey::new(i, j) == SpringKey::new(j, i)`
/// and both hash the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpringKey {
    lo: u32,
    hi: u32,
}

impl SpringKey {
    pub fn new(i: usize, j: usize) -> Self {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        debug_assert!(u32::try_from(hi).is_ok(), "particle index {hi} exceeds u32");
        Self {
            lo: lo as u32,
            hi: hi as u32,
        }
    }

    pub fn pair(self) -> (usize, usize) {
        (self.lo as usize, self.hi as usize)
    }
}

/// Elastic springs between neighboring particles (viscoelastic model).
///
/// Springs appear between neighbors with a rest length equal to the
/// interaction radius, yield plastically when stretched or compressed past
/// `yield_ratio`, and disappear once their rest length exceeds the radius
/// or their particles stop being neighbors.
#[derive(Debug, Default, Clone)]
pub struct SpringNetwork {
    rest_lengths: HashMap<SpringKey, f32>,
    /// Rebuilt each step then swapped in; keeps its allocation.
    scratch: HashMap<SpringKey, f32>,
}

impl SpringNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rest_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rest_lengths.is_empty()
    }

    pub fn clear(&mut self) {
        self.rest_lengths.clear();
        self.scratch.clear();
    }

    pub fn rest_length(&self, i: usize, j: usize) -> Option<f32> {
        self.rest_lengths.get(&SpringKey::new(i, j)).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = SpringKey> + '_ {
        self.rest_lengths.keys().copied()
    }

    /// Create, deform and drop springs from the current neighbor pairs.
    ///
    /// Runs serially: it is the only phase step that writes shared state.
    pub fn adjust(&mut self, grid: &SpatialHashGrid, config: &SimConfig, dt: f32) {
        let radius = config.interaction_radius;
        let yield_ratio = config.springs.yield_ratio;
        let plasticity = config.springs.plasticity;

        self.scratch.clear();
        for i in 0..grid.len() {
            grid.for_each_neighbor(i, |j, offset| {
                if j <= i {
                    return;
                }
                let key = SpringKey::new(i, j);
                let rest = self.rest_lengths.get(&key).copied().unwrap_or(radius);
                let rest = deform(rest, offset.length(), yield_ratio, plasticity, dt);
                if rest <= radius {
                    self.scratch.insert(key, rest);
                }
            });
        }
        std::mem::swap(&mut self.rest_lengths, &mut self.scratch);
    }

    /// Add each particle's spring pull to its own acceleration.
    pub fn add_spring_accelerations(
        &self,
        particles: &mut ParticleSet,
        grid: &SpatialHashGrid,
        config: &SimConfig,
    ) {
        if self.rest_lengths.is_empty() {
            return;
        }
        let radius = config.interaction_radius;
        let stiffness = config.springs.stiffness;
        let springs = &self.rest_lengths;

        parallel::for_each_slot(&mut particles.acceleration, |i, acc| {
            grid.for_each_neighbor(i, |j, offset| {
                if j == i {
                    return;
                }
                let Some(&rest) = springs.get(&SpringKey::new(i, j)) else {
                    return;
                };
                let dist = offset.length();
                let toward_j = if dist > 0.0 {
                    -offset / dist
                } else {
                    -pseudo_random_direction(i, j)
                };
                *acc += toward_j * spring_magnitude(rest, dist, radius, stiffness);
            });
        });
    }
}

/// Signed pull along `i -> j`: positive when stretched.
#[inline]
fn spring_magnitude(rest: f32, dist: f32, radius: f32, stiffness: f32) -> f32 {
    stiffness * (1.0 - rest / radius) * (dist - rest)
}

/// Move the rest length toward `dist` once it leaves the yield band.
#[inline]
fn deform(rest: f32, dist: f32, yield_ratio: f32, plasticity: f32, dt: f32) -> f32 {
    let tolerance = yield_ratio * rest;
    if dist > rest + tolerance {
        rest + dt * plasticity * (dist - rest - tolerance)
    } else if dist < rest - tolerance {
        rest - dt * plasticity * (rest - tolerance - dist)
    } else {
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deform_inside_yield_band_is_noop() {
        assert_eq!(deform(10.0, 10.5, 0.1, 1.0, 0.1), 10.0);
        assert_eq!(deform(10.0, 9.5, 0.1, 1.0, 0.1), 10.0);
    }

    #[test]
    fn test_deform_moves_toward_distance() {
        let stretched = deform(10.0, 15.0, 0.1, 1.0, 0.1);
        assert!(stretched > 10.0 && stretched < 15.0, "stretched rest = {stretched}");
        let squashed = deform(10.0, 5.0, 0.1, 1.0, 0.1);
        assert!(squashed < 10.0 && squashed > 5.0, "squashed rest = {squashed}");
    }

    #[cfg(all(debug_assertions, target_pointer_width = "64"))]
    #[test]
    #[should_panic(expected = "exceeds u32")]
    fn test_key_rejects_index_beyond_u32() {
        SpringKey::new(0, u32::MAX as usize + 1);
    }

    #[test]
    fn test_spring_magnitude_sign() {
        assert!(spring_magnitude(5.0, 8.0, 16.0, 1.0) > 0.0, "stretched spring should pull");
        assert!(spring_magnitude(5.0, 2.0, 16.0, 1.0) < 0.0, "squashed spring should push");
        assert_eq!(spring_magnitude(16.0, 8.0, 16.0, 1.0), 0.0);
    }
}
