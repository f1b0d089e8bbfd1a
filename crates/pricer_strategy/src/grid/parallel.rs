//! Rayon-based row parallelisation for grid builds.
//!
//! Rows of the grid are independent and each writes only its own vector,
//! so rows are mapped with `par_iter` once the grid is large enough.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default minimum cell count before rows are evaluated in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Configuration for parallel grid evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelConfig {
    /// Allow parallel evaluation at all
    pub enabled: bool,
    /// Minimum cell count (dates × prices × legs) before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(enabled: bool, parallel_threshold: usize) -> Self {
        Self {
            enabled,
            parallel_threshold,
        }
    }

    /// Sequential evaluation regardless of size.
    pub fn sequential() -> Self {
        Self::new(false, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given cell count.
    #[inline]
    pub fn should_parallelize(&self, n_cells: usize) -> bool {
        cfg!(feature = "parallel") && self.enabled && n_cells >= self.parallel_threshold
    }
}

/// Maps every row through `mapper`, in parallel when `config` allows it.
///
/// Output order always matches input order.
#[cfg(feature = "parallel")]
pub(crate) fn map_rows<T, R, F>(rows: &[T], n_cells: usize, config: &ParallelConfig, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if config.should_parallelize(n_cells) {
        return rows.par_iter().map(mapper).collect();
    }
    rows.iter().map(mapper).collect()
}

/// Maps every row through `mapper` on the calling thread.
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_rows<T, R, F>(rows: &[T], _n_cells: usize, _config: &ParallelConfig, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    rows.iter().map(mapper).collect()
}
