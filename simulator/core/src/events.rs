//! Event Log
//!
//! An append-only, bounded history of notable transitions. The log is owned
//! independently of the pet state so readers can list events without
//! touching the state lock.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Maximum number of events retained. Eviction is FIFO.
pub const EVENT_CAPACITY: usize = 50;

/// What kind of transition an event records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// The pet was fed.
    Feed,
    /// The pet played a game.
    Play,
    /// The pet slept.
    Sleep,
    /// The pet advanced to a new life stage.
    Evolution,
    /// The pet died.
    Death,
    /// A new pet replaced the old one.
    Restart,
    /// Offline time was replayed at startup.
    Progress,
}

impl EventKind {
    /// Icon shown next to the event on the events page.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Feed => "🍽️",
            Self::Play => "🎮",
            Self::Sleep => "😴",
            Self::Evolution => "🌟",
            Self::Death => "💔",
            Self::Restart => "🔄",
            Self::Progress => "📝",
        }
    }
}

/// An immutable record of one notable transition.
#[derive(Clone, Debug, PartialEq)]
pub struct GameEvent {
    /// The kind of transition.
    pub kind: EventKind,
    /// Human-readable description.
    pub message: String,
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
}

impl GameEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn now(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded ring of the most recent events, newest-last internally.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: VecDeque<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, evicting the oldest when over capacity.
    pub fn push(&mut self, event: GameEvent) {
        self.entries.push_back(event);
        while self.entries.len() > EVENT_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Drop all events.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the retained events in insertion order (oldest first).
    #[must_use]
    pub fn to_vec(&self) -> Vec<GameEvent> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_insertion_order() {
        let mut log = EventLog::new();
        log.push(GameEvent::now(EventKind::Feed, "first"));
        log.push(GameEvent::now(EventKind::Play, "second"));
        log.push(GameEvent::now(EventKind::Sleep, "third"));

        let events = log.to_vec();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].message, "first");
        assert_eq!(events[2].message, "third");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = EventLog::new();
        for i in 0..60 {
            log.push(GameEvent::now(EventKind::Feed, format!("event {i}")));
        }

        assert_eq!(log.len(), EVENT_CAPACITY);
        let events = log.to_vec();
        // Events 0..10 were evicted.
        assert_eq!(events[0].message, "event 10");
        assert_eq!(events[49].message, "event 59");
    }

    #[test]
    fn test_clear() {
        let mut log = EventLog::new();
        log.push(GameEvent::now(EventKind::Restart, "fresh egg"));
        log.clear();
        assert!(log.is_empty());
        assert!(log.to_vec().is_empty());
    }

    #[test]
    fn test_every_kind_has_an_icon() {
        let kinds = [
            EventKind::Feed,
            EventKind::Play,
            EventKind::Sleep,
            EventKind::Evolution,
            EventKind::Death,
            EventKind::Restart,
            EventKind::Progress,
        ];
        for kind in kinds {
            assert!(!kind.icon().is_empty());
        }
    }
}
