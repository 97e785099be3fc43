//! Fork-join helpers for the per-particle phases.
//!
//! Each call is a barrier: it returns only after every slot has been
//! written. A closure receives the particle index and the slot(s) it owns;
//! anything else it reads must be shared and immutable for the duration of
//! the call. With the `parallel` feature the work is split across the rayon
//! pool, otherwise it runs in index order on the calling thread.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Run `f(i, &mut slots[i])` for every slot.
pub fn for_each_slot<T, F>(slots: &mut [T], f: F)
where
    T: Send,
    F: Fn(usize, &mut T) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        slots.par_iter_mut().enumerate().for_each(|(i, slot)| f(i, slot));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (i, slot) in slots.iter_mut().enumerate() {
            f(i, slot);
        }
    }
}

/// Run `f(i, &mut a[i], &mut b[i])` for two parallel arrays.
pub fn for_each_slot_pair<A, B, F>(a: &mut [A], b: &mut [B], f: F)
where
    A: Send,
    B: Send,
    F: Fn(usize, &mut A, &mut B) + Sync + Send,
{
    debug_assert_eq!(a.len(), b.len(), "parallel arrays must have equal length");

    #[cfg(feature = "parallel")]
    {
        a.par_iter_mut()
            .zip(b.par_iter_mut())
            .enumerate()
            .for_each(|(i, (x, y))| f(i, x, y));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (i, (x, y)) in a.iter_mut().zip(b.iter_mut()).enumerate() {
            f(i, x, y);
        }
    }
}

/// Unstable sort by key; parallel when the feature is on.
pub fn sort_by_key<T, K, F>(slice: &mut [T], key: F)
where
    T: Send,
    K: Ord,
    F: Fn(&T) -> K + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        slice.par_sort_unstable_by_key(key);
    }

    #[cfg(not(feature = "parallel"))]
    {
        slice.sort_unstable_by_key(key);
    }
}
