//! Selector change history.
//!
//! Every successful write is recorded as a [`SelectorChange`]. The history
//! keeps the most recent `depth` changes and drops older ones.

use super::selector::Selector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use uuid::Uuid;

/// Record of a single selector write.
///
/// # Example
///
/// ```rust
/// use selectdev::core::{Selector, SelectorChange};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let change = SelectorChange {
///     from: Selector::default(),
///     to: Selector::new(b'1'),
///     handle: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     accepted: 1,
/// };
/// assert!(change.to.choice().is_defined());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectorChange {
    /// Selector before the write
    pub from: Selector,
    /// Selector after the write
    pub to: Selector,
    /// Handle the write came through
    pub handle: Uuid,
    /// When the write completed
    pub timestamp: DateTime<Utc>,
    /// Byte count reported back to the writer
    pub accepted: usize,
}

/// Bounded, ordered history of selector changes.
///
/// A depth of zero records nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectorHistory {
    depth: usize,
    changes: VecDeque<SelectorChange>,
}

impl SelectorHistory {
    /// Create an empty history keeping at most `depth` changes.
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            changes: VecDeque::with_capacity(depth.min(64)),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Record a change, evicting the oldest one when full.
    pub fn record(&mut self, change: SelectorChange) {
        if self.depth == 0 {
            return;
        }
        if self.changes.len() == self.depth {
            self.changes.pop_front();
        }
        self.changes.push_back(change);
    }

    /// Get the selectors traversed.
    ///
    /// Returns the `from` selector of the oldest retained change, then the
    /// `to` selector of each change in order.
    pub fn get_path(&self) -> Vec<Selector> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(first) = self.changes.front() {
            path.push(first.from);
        }
        path.extend(self.changes.iter().map(|c| c.to));
        path
    }

    /// Time between the oldest and newest retained change.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.changes.front(), self.changes.back()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    /// Retained changes, oldest first.
    pub fn changes(&self) -> &VecDeque<SelectorChange> {
        &self.changes
    }

    pub fn last(&self) -> Option<&SelectorChange> {
        self.changes.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(from: u8, to: u8) -> SelectorChange {
        SelectorChange {
            from: Selector::new(from),
            to: Selector::new(to),
            handle: Uuid::nil(),
            timestamp: Utc::now(),
            accepted: 1,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = SelectorHistory::new(4);
        assert!(history.changes().is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_appends_in_order() {
        let mut history = SelectorHistory::new(4);
        history.record(change(b'0', b'1'));
        history.record(change(b'1', b'3'));

        let path = history.get_path();
        assert_eq!(
            path,
            vec![Selector::new(b'0'), Selector::new(b'1'), Selector::new(b'3')]
        );
        assert_eq!(history.last().map(|c| c.to), Some(Selector::new(b'3')));
    }

    #[test]
    fn oldest_change_is_evicted_at_depth() {
        let mut history = SelectorHistory::new(2);
        history.record(change(b'0', b'1'));
        history.record(change(b'1', b'2'));
        history.record(change(b'2', b'3'));

        assert_eq!(history.changes().len(), 2);
        assert_eq!(history.changes()[0].from, Selector::new(b'1'));
        assert_eq!(
            history.get_path(),
            vec![Selector::new(b'1'), Selector::new(b'2'), Selector::new(b'3')]
        );
    }

    #[test]
    fn full_history_keeps_the_newest_changes() {
        let mut history = SelectorHistory::new(3);
        for n in 0..100u8 {
            history.record(change(b'0' + n % 10, b'0' + (n + 1) % 10));
        }

        assert_eq!(history.changes().len(), 3);
        let tail: Vec<Selector> = history.changes().iter().map(|c| c.to).collect();
        assert_eq!(
            tail,
            vec![Selector::new(b'8'), Selector::new(b'9'), Selector::new(b'0')]
        );
        assert_eq!(history.last().map(|c| c.to), Some(Selector::new(b'0')));
    }

    #[test]
    fn zero_depth_records_nothing() {
        let mut history = SelectorHistory::new(0);
        history.record(change(b'0', b'1'));
        assert!(history.changes().is_empty());
    }

    #[test]
    fn duration_spans_first_to_last() {
        let mut history = SelectorHistory::new(4);
        let start = Utc::now();
        let mut first = change(b'0', b'1');
        first.timestamp = start;
        let mut second = change(b'1', b'2');
        second.timestamp = start + chrono::Duration::milliseconds(25);

        history.record(first);
        history.record(second);

        assert_eq!(history.duration(), Some(Duration::from_millis(25)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = SelectorHistory::new(3);
        history.record(change(b'0', b'2'));

        let json = serde_json::to_string(&history).unwrap();
        let back: SelectorHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
