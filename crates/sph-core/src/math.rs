use glam::Vec2;
use std::f32::consts::TAU;

/// Integer hash of an unordered particle pair.
#[inline]
pub fn hash_pair(i: usize, j: usize) -> u32 {
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    let mut h = (lo as u32).wrapping_mul(73856093) ^ (hi as u32).wrapping_mul(19349663);
    // xorshift-multiply finalizer so neighboring pairs land far apart
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

/// Deterministic stand-in for the unit vector from `j` to `i` when the two
/// particles coincide.
///
/// The angle comes from the unordered pair, and the sign flips with the
/// argument order, so `pseudo_random_direction(i, j) == -pseudo_random_direction(j, i)`.
/// Forces built on it stay equal and opposite.
pub fn pseudo_random_direction(i: usize, j: usize) -> Vec2 {
    let angle = hash_pair(i, j) as f32 / u32::MAX as f32 * TAU;
    let dir = Vec2::from_angle(angle);
    if i < j {
        dir
    } else {
        -dir
    }
}
