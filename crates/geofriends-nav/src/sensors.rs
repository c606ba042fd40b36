use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use geofriends_core::SensorUpdate;

/// The latest sensor snapshot, shared between the host's sensor callback
/// and the tick loop.
///
/// The lock covers only the swap of the snapshot. A newer snapshot replaces
/// an unread one.
#[derive(Debug, Clone, Default)]
pub struct SensorFeed {
    latest: Arc<Mutex<Option<SensorUpdate>>>,
}

impl SensorFeed {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<SensorUpdate>> {
        // plain data: still valid after a poisoning panic
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new snapshot.
    pub fn publish(&self, update: SensorUpdate) {
        *self.lock() = Some(update);
    }

    /// Take the latest snapshot, if one arrived since the last call.
    pub fn take(&self) -> Option<SensorUpdate> {
        self.lock().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofriends_core::Point;
    use std::thread;

    fn update(n: usize) -> SensorUpdate {
        SensorUpdate {
            diamonds: vec![Point::new(1, 1); n],
            ..SensorUpdate::default()
        }
    }

    #[test]
    fn latest_wins_and_take_empties() {
        let feed = SensorFeed::new();
        assert!(feed.take().is_none());
        feed.publish(update(1));
        feed.publish(update(2));
        assert_eq!(feed.take().unwrap().diamonds.len(), 2);
        assert!(feed.take().is_none());
    }

    #[test]
    fn publish_from_another_thread() {
        let feed = SensorFeed::new();
        let writer = feed.clone();
        thread::spawn(move || {
            for n in 0..50 {
                writer.publish(update(n));
            }
        })
        .join()
        .unwrap();
        assert_eq!(feed.take().unwrap().diamonds.len(), 49);
    }

    #[test]
    fn survives_a_poisoned_lock() {
        let feed = SensorFeed::new();
        let poisoner = feed.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.latest.lock().unwrap();
            panic!("sensor callback failed");
        })
        .join();
        feed.publish(update(3));
        assert_eq!(feed.take().unwrap().diamonds.len(), 3);
    }
}
