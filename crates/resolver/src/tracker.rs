//! Supersession of stale in-flight resolutions.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

/// Monotonic generation counter per polygon id.
///
/// Each issued resolution carries the generation it was started with; a
/// completion is applied only while its generation is still the latest
/// for that polygon. Removing a polygon forgets its counter, so any
/// completion still in flight fails the check and is discarded.
#[derive(Debug, Default)]
pub struct ResolutionTracker {
    generations: Mutex<HashMap<Uuid, u64>>,
}

impl ResolutionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a resolution, superseding any earlier one for this polygon.
    pub fn begin(&self, id: Uuid) -> u64 {
        let mut generations = self.generations.lock().expect("tracker lock poisoned");
        let generation = generations.entry(id).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Whether a completed resolution may still be applied.
    pub fn is_current(&self, id: Uuid, generation: u64) -> bool {
        let generations = self.generations.lock().expect("tracker lock poisoned");
        generations.get(&id) == Some(&generation)
    }

    /// Drop tracking for a removed polygon.
    pub fn forget(&self, id: Uuid) {
        let mut generations = self.generations.lock().expect("tracker lock poisoned");
        generations.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_are_monotonic_per_id() {
        let tracker = ResolutionTracker::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert_eq!(tracker.begin(a), 1);
        assert_eq!(tracker.begin(a), 2);
        assert_eq!(tracker.begin(b), 1);
    }

    #[test]
    fn test_later_begin_supersedes_earlier() {
        let tracker = ResolutionTracker::new();
        let id = Uuid::new_v4();

        let first = tracker.begin(id);
        let second = tracker.begin(id);

        assert!(!tracker.is_current(id, first));
        assert!(tracker.is_current(id, second));
    }

    #[test]
    fn test_forgotten_id_is_never_current() {
        let tracker = ResolutionTracker::new();
        let id = Uuid::new_v4();

        let generation = tracker.begin(id);
        tracker.forget(id);

        assert!(!tracker.is_current(id, generation));
    }

    #[test]
    fn test_unknown_id_is_not_current() {
        let tracker = ResolutionTracker::new();
        assert!(!tracker.is_current(Uuid::new_v4(), 1));
    }
}
