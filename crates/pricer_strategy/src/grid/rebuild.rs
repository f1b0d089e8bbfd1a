//! Cancellation-by-replacement for grid rebuilds.
//!
//! Every rebuild takes a ticket with a fresh generation number. Starting a
//! newer rebuild makes older tickets stale; stale rebuilds stop at the next
//! row boundary and their results are discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::GridError;

/// Shared generation counter. Clones observe the same counter.
#[derive(Debug, Clone, Default)]
pub struct RebuildTracker {
    latest: Arc<AtomicU64>,
}

impl RebuildTracker {
    /// Creates a tracker at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new rebuild, superseding all earlier tickets.
    pub fn begin(&self) -> RebuildTicket {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        RebuildTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }
}

/// Handle held by one in-flight rebuild.
#[derive(Debug, Clone)]
pub struct RebuildTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl RebuildTicket {
    /// Generation number of this rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` while no newer rebuild has started.
    #[inline]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.generation
    }

    /// Fails with `GridError::Superseded` once a newer rebuild has started.
    pub fn ensure_current(&self) -> Result<(), GridError> {
        if self.is_current() {
            return Ok(());
        }
        Err(GridError::Superseded {
            generation: self.generation,
            latest: self.latest.load(Ordering::Acquire),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_increase() {
        let tracker = RebuildTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert_eq!(first.generation(), 1);
        assert_eq!(second.generation(), 2);
        assert!(!first.is_current());
    }

    #[test]
    fn test_newer_rebuild_supersedes() {
        let tracker = RebuildTracker::new();
        let first = tracker.begin();
        assert!(first.ensure_current().is_ok());

        let second = tracker.begin();
        assert!(!first.is_current());
        assert_eq!(
            first.ensure_current(),
            Err(GridError::Superseded {
                generation: 1,
                latest: 2
            })
        );
        assert!(second.is_current());
    }

    #[test]
    fn test_clones_share_counter() {
        let tracker = RebuildTracker::new();
        let ticket = tracker.begin();
        let newer = tracker.clone().begin();
        assert!(!ticket.is_current());
        assert_eq!(newer.generation(), 2);
        assert!(newer.is_current());
    }

    #[test]
    fn test_supersede_across_threads() {
        let tracker = RebuildTracker::new();
        let ticket = tracker.begin();
        let handle = {
            let tracker = tracker.clone();
            std::thread::spawn(move || tracker.begin().generation())
        };
        let newer = handle.join().unwrap();
        assert_eq!(newer, 2);
        assert!(!ticket.is_current());
    }
}
