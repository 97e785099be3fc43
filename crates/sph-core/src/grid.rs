use glam::{IVec2, Vec2};

use crate::error::SimError;
use crate::parallel;

/// Odd multipliers mixing cell coordinates into a hash.
const HASH_P1: u32 = 73856093;
const HASH_P2: u32 = 19349663;

/// `start_index` value for buckets with no entries.
const EMPTY: u32 = u32::MAX;

const CELL_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(0, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// One particle's slot in the sorted grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridEntry {
    /// `cell_hash % bucket_count`.
    pub cell_key: u32,
    /// Full hash of the cell, kept to reject bucket collisions.
    pub cell_hash: u32,
    pub particle: u32,
}

/// Uniform spatial hash grid over predicted positions.
///
/// Cells are `interaction_radius` wide, so every particle within the radius
/// lies in the 3x3 block around the query cell. Cell hashes are folded into
/// `bucket_count` buckets (one per particle); entries are sorted by bucket
/// and `start_index` points at each bucket's first entry. Different cells
/// can share a bucket, so a query compares the full `cell_hash` before
/// accepting a candidate.
///
/// The grid keeps its own copy of the positions it was built from. Queries
/// are read-only and may run concurrently until the next `build`.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f32,
    inv_cell_size: f32,
    radius_sq: f32,
    bucket_count: usize,
    entries: Vec<GridEntry>,
    start_index: Vec<u32>,
    positions: Vec<Vec2>,
    built: bool,
}

impl SpatialHashGrid {
    /// Create a grid for `bucket_count` particles.
    pub fn new(interaction_radius: f32, bucket_count: usize) -> Self {
        let mut grid = Self {
            cell_size: interaction_radius,
            inv_cell_size: 1.0 / interaction_radius,
            radius_sq: interaction_radius * interaction_radius,
            bucket_count: 0,
            entries: Vec::new(),
            start_index: Vec::new(),
            positions: Vec::new(),
            built: false,
        };
        grid.resize(bucket_count);
        grid
    }

    /// Size every table for `bucket_count` particles. Invalidates the grid.
    ///
    /// Must be called whenever the particle count changes, between steps.
    pub fn resize(&mut self, bucket_count: usize) {
        debug_assert!(
            u32::try_from(bucket_count).is_ok(),
            "grid indexes particles with u32; {bucket_count} buckets is too many"
        );
        self.bucket_count = bucket_count;
        self.entries.resize(bucket_count, GridEntry::default());
        self.start_index.resize(bucket_count, EMPTY);
        self.positions.resize(bucket_count, Vec2::ZERO);
        self.built = false;
    }

    /// Change the cell size / query radius. Invalidates the grid.
    pub fn set_interaction_radius(&mut self, interaction_radius: f32) {
        self.cell_size = interaction_radius;
        self.inv_cell_size = 1.0 / interaction_radius;
        self.radius_sq = interaction_radius * interaction_radius;
        self.built = false;
    }

    /// Rebuild from scratch. `predicted.len()` must equal the bucket count.
    pub fn build(&mut self, predicted: &[Vec2]) -> Result<(), SimError> {
        if predicted.len() != self.bucket_count {
            self.built = false;
            return Err(SimError::BucketCountMismatch {
                buckets: self.bucket_count,
                particles: predicted.len(),
            });
        }
        if predicted.is_empty() {
            self.built = true;
            return Ok(());
        }

        self.positions.copy_from_slice(predicted);

        let inv_cell_size = self.inv_cell_size;
        let bucket_count = self.bucket_count as u32;
        parallel::for_each_slot(&mut self.entries, |i, entry| {
            let cell_hash = hash_cell(cell_of(predicted[i], inv_cell_size));
            *entry = GridEntry {
                cell_key: cell_hash % bucket_count,
                cell_hash,
                particle: i as u32,
            };
        });
        // particle index as tie-break keeps neighbor order (and float sums) stable
        parallel::sort_by_key(&mut self.entries, |e| (e.cell_key, e.particle));

        self.start_index.fill(EMPTY);
        for pos in 0..self.entries.len() {
            let key = self.entries[pos].cell_key;
            if pos == 0 || self.entries[pos - 1].cell_key != key {
                self.start_index[key as usize] = pos as u32;
            }
        }

        self.built = true;
        Ok(())
    }

    /// Mark the grid stale, e.g. after predicted positions move.
    pub fn invalidate(&mut self) {
        self.built = false;
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of particles indexed.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Entries sorted by bucket. Only meaningful after `build`.
    pub fn entries(&self) -> &[GridEntry] {
        &self.entries
    }

    /// First entry position of `key`, `None` if the bucket is empty.
    pub fn start_index(&self, key: u32) -> Option<usize> {
        match self.start_index.get(key as usize) {
            Some(&start) if start != EMPTY => Some(start as usize),
            _ => None,
        }
    }

    /// Integer cell containing `position`.
    #[inline]
    pub fn cell_coord(&self, position: Vec2) -> IVec2 {
        cell_of(position, self.inv_cell_size)
    }

    /// Bucket for a cell hash, `None` when the grid has no buckets.
    #[inline]
    pub fn cell_key(&self, cell_hash: u32) -> Option<u32> {
        match self.bucket_count {
            0 => None,
            n => Some(cell_hash % n as u32),
        }
    }

    /// Call `f(j, x_i - x_j)` for every particle `j` within the interaction
    /// radius of particle `i`, including `i` itself.
    ///
    /// Querying a grid that has not been built is a bug: it asserts in debug
    /// builds and reports no neighbors in release builds. An index the grid
    /// does not hold (including any index on an empty grid) has no neighbors.
    pub fn for_each_neighbor<F>(&self, particle: usize, mut f: F)
    where
        F: FnMut(usize, Vec2),
    {
        debug_assert!(self.built, "neighbor query on a grid that was not built");
        if !self.built || particle >= self.positions.len() {
            return;
        }

        let origin = self.positions[particle];
        let cell = self.cell_coord(origin);

        for offset in CELL_OFFSETS {
            let cell_hash = hash_cell(cell.wrapping_add(offset));
            let Some(key) = self.cell_key(cell_hash) else {
                return;
            };
            let Some(start) = self.start_index(key) else {
                continue;
            };
            for entry in &self.entries[start..] {
                if entry.cell_key != key {
                    break;
                }
                if entry.cell_hash != cell_hash {
                    continue;
                }
                let j = entry.particle as usize;
                let delta = origin - self.positions[j];
                if delta.length_squared() <= self.radius_sq {
                    f(j, delta);
                }
            }
        }
    }

    /// Indices of every particle within the interaction radius of `particle`.
    pub fn query_neighbors(&self, particle: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.for_each_neighbor(particle, |j, _| out.push(j));
        out
    }
}

/// Hash of an integer cell coordinate.
#[inline]
pub fn hash_cell(cell: IVec2) -> u32 {
    (cell.x as u32)
        .wrapping_mul(HASH_P1)
        .wrapping_add((cell.y as u32).wrapping_mul(HASH_P2))
}

#[inline]
fn cell_of(position: Vec2, inv_cell_size: f32) -> IVec2 {
    (position * inv_cell_size).floor().as_ivec2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_cell_distinct_for_adjacent_cells() {
        let center = IVec2::new(3, -7);
        let hashes: Vec<u32> = CELL_OFFSETS.iter().map(|o| hash_cell(center + *o)).collect();
        for a in 0..hashes.len() {
            for b in (a + 1)..hashes.len() {
                assert_ne!(hashes[a], hashes[b], "offsets {a} and {b} collide");
            }
        }
    }

    #[test]
    fn test_cell_of_floors_negative_coordinates() {
        assert_eq!(cell_of(Vec2::new(-0.5, 0.5), 1.0), IVec2::new(-1, 0));
        assert_eq!(cell_of(Vec2::new(31.9, 32.0), 1.0 / 16.0), IVec2::new(1, 2));
    }
}
