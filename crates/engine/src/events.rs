//! Event log.

use parking_lot::RwLock;
use relics_types::Event;
use std::sync::Arc;
use tracing::debug;

/// Ordered record of every event the engine has emitted.
///
/// Clones share the same log. Consumers either snapshot or drain.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<RwLock<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: Event) {
        debug!(target: "engine", "event: {:?}", event);
        self.events.write().push(event);
    }

    /// Copy of the log so far.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.read().clone()
    }

    /// Take everything recorded so far, leaving the log empty.
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.write())
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_snapshot_drain() {
        let log = EventLog::new();
        log.record(Event::Minted {
            id: 1,
            seed: relics_types::Seed::new([0u8; 32]),
        });
        assert_eq!(log.len(), 1);
        assert_eq!(log.snapshot().len(), 1);
        assert_eq!(log.drain().len(), 1);
        assert!(log.is_empty());
    }
}
