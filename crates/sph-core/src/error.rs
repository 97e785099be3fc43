use std::fmt;

/// Errors reported by the simulation engine.
///
/// Per-particle degenerate cases (coincident particles) are recovered
/// locally and never show up here; only caller mistakes and structural
/// invariant violations do.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A particle id outside `0..len` was passed to an accessor.
    IndexOutOfRange { index: usize, len: usize },
    /// A configuration value failed validation.
    InvalidConfig(String),
    /// `dt` was negative, NaN or infinite.
    InvalidTimestep(f32),
    /// The grid was built against a particle count it was not sized for.
    BucketCountMismatch { buckets: usize, particles: usize },
    /// A neighbor-dependent phase ran before the grid was built this step.
    GridNotBuilt,
    /// The force phase ran before densities were computed this step.
    DensityNotComputed,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::IndexOutOfRange { index, len } => {
                write!(f, "particle index {index} out of range (len {len})")
            }
            SimError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            SimError::InvalidTimestep(dt) => write!(f, "invalid timestep: {dt}"),
            SimError::BucketCountMismatch { buckets, particles } => write!(
                f,
                "grid has {buckets} buckets but was built with {particles} particles"
            ),
            SimError::GridNotBuilt => write!(f, "spatial hash grid not built for this step"),
            SimError::DensityNotComputed => write!(f, "densities not computed for this step"),
        }
    }
}

impl std::error::Error for SimError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_index_and_len() {
        let err = SimError::IndexOutOfRange { index: 7, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7') && msg.contains('3'), "unexpected message: {msg}");
    }
}
