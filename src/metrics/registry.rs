use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::Snapshot;

/// Holds the most recent snapshot.
///
/// Publishing swaps a single `Arc` under the write lock, so a reader holds
/// either the old or the new snapshot, never a mix. Readers clone the `Arc`
/// and release the lock before rendering.
#[derive(Debug, Default)]
pub struct SampleRegistry {
    latest: RwLock<Option<Arc<Snapshot>>>,
}

impl SampleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot.
    pub fn publish(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        *self.latest.write() = Some(snapshot);
    }

    /// The latest published snapshot, `None` until the first publish.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.latest.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn snapshot_for_cycle(cycle: usize, size: usize) -> Snapshot {
        let samples = (0..size)
            .map(|i| {
                let labels = BTreeMap::from([
                    ("cycle".to_string(), cycle.to_string()),
                    ("id".to_string(), i.to_string()),
                ]);
                Sample::new("test_metric", "Test", labels, cycle as f64)
            })
            .collect();
        Snapshot::new(samples, size)
    }

    #[test]
    fn test_current_is_none_before_publish() {
        assert!(SampleRegistry::new().current().is_none());
    }

    #[test]
    fn test_publish_replaces_in_full() {
        let registry = SampleRegistry::new();
        registry.publish(snapshot_for_cycle(1, 3));
        registry.publish(snapshot_for_cycle(2, 1));

        let current = registry.current().unwrap();
        assert_eq!(current.samples.len(), 1);
        assert_eq!(current.samples[0].labels["cycle"], "2");
    }

    #[test]
    fn test_reader_keeps_its_snapshot_across_publish() {
        let registry = SampleRegistry::new();
        registry.publish(snapshot_for_cycle(1, 2));
        let held = registry.current().unwrap();

        registry.publish(snapshot_for_cycle(2, 2));
        assert!(held.samples.iter().all(|s| s.labels["cycle"] == "1"));
        assert_eq!(registry.current().unwrap().samples[0].labels["cycle"], "2");
    }

    #[test]
    fn test_concurrent_readers_never_see_mixed_cycles() {
        let registry = Arc::new(SampleRegistry::new());
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                let done = done.clone();
                thread::spawn(move || {
                    while !done.load(Ordering::Relaxed) {
                        if let Some(snapshot) = registry.current() {
                            let first = &snapshot.samples[0].labels["cycle"];
                            assert_eq!(snapshot.samples.len(), 50);
                            assert!(snapshot
                                .samples
                                .iter()
                                .all(|s| &s.labels["cycle"] == first));
                        }
                    }
                })
            })
            .collect();

        for cycle in 0..500 {
            registry.publish(snapshot_for_cycle(cycle, 50));
        }
        done.store(true, Ordering::Relaxed);

        for reader in readers {
            reader.join().expect("reader thread panicked");
        }
    }
}
