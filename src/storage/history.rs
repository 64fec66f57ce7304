//! Chat history log
//!
//! Append-only sequence of chat turns persisted under the `history`
//! preference. Turns older than [`RETENTION_DAYS`] are pruned when the log is
//! loaded; appends never re-check expiry.

use crate::storage::preferences::{PreferenceStore, KEY_HISTORY};
use crate::types::message::{ChatTurn, Role};
#[cfg(test)]
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// How long a turn stays visible
pub const RETENTION_DAYS: i64 = 7;

const RETENTION_MILLIS: i64 = RETENTION_DAYS * 24 * 3600 * 1000;

/// Source of the current time in epoch millis
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Settable clock for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::Relaxed);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::Relaxed)
    }
}

/// Out-of-range stored timestamps count as expired
fn is_fresh(now: i64, timestamp: i64) -> bool {
    now.checked_sub(timestamp)
        .map_or(false, |age| age < RETENTION_MILLIS)
}

pub struct HistoryLog {
    turns: Vec<ChatTurn>,
    clock: Arc<dyn Clock>,
}

impl HistoryLog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            turns: Vec::new(),
            clock,
        }
    }

    /// Read persisted turns, dropping expired ones.
    ///
    /// The pruned sequence is written back when anything was dropped.
    /// Malformed stored data loads as an empty log.
    pub fn load(&mut self, store: &mut PreferenceStore) -> &[ChatTurn] {
        let now = self.clock.now_millis();
        let all: Vec<ChatTurn> = store.get(KEY_HISTORY, Vec::new());
        let total = all.len();
        let fresh: Vec<ChatTurn> = all
            .into_iter()
            .filter(|turn| is_fresh(now, turn.timestamp))
            .collect();

        if fresh.len() != total {
            tracing::info!("Pruned {} expired chat turns", total - fresh.len());
            store.set(KEY_HISTORY, &fresh);
        }

        self.turns = fresh;
        &self.turns
    }

    pub fn append(&mut self, store: &mut PreferenceStore, role: Role, content: impl Into<String>) {
        let turn = ChatTurn::new(self.clock.now_millis(), role, content);
        self.turns.push(turn);
        store.set(KEY_HISTORY, &self.turns);
    }

    pub fn clear(&mut self, store: &mut PreferenceStore) {
        self.turns.clear();
        store.set(KEY_HISTORY, &self.turns);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;
    use crate::storage::KeyValueStore;

    const DAY: i64 = 24 * 3600 * 1000;
    const NOW: i64 = 1_760_000_000_000;

    fn setup() -> (Arc<ManualClock>, HistoryLog, PreferenceStore) {
        let clock = Arc::new(ManualClock::new(NOW));
        let log = HistoryLog::new(clock.clone());
        let store = PreferenceStore::new(Box::new(MemoryStore::new()));
        (clock, log, store)
    }

    fn stored_history(store: &PreferenceStore) -> Vec<ChatTurn> {
        store.get(KEY_HISTORY, Vec::new())
    }

    #[test]
    fn test_append_then_load_round_trips() {
        let (clock, mut log, mut store) = setup();
        for i in 0..5 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            log.append(&mut store, role, format!("turn {}", i));
            clock.advance(1000);
        }
        let written = log.turns().to_vec();

        let mut reloaded = HistoryLog::new(clock.clone());
        let loaded = reloaded.load(&mut store);
        assert_eq!(loaded, written.as_slice());
        assert_eq!(loaded[3].content, "turn 3");
    }

    #[test]
    fn test_load_prunes_expired_turns() {
        let (clock, mut log, mut store) = setup();
        let turns = vec![
            ChatTurn::new(NOW - 10 * DAY, Role::User, "ancient"),
            ChatTurn::new(NOW - 7 * DAY, Role::Assistant, "exactly a week"),
            ChatTurn::new(NOW - 7 * DAY + 1, Role::User, "just inside"),
            ChatTurn::new(NOW - DAY, Role::Assistant, "yesterday"),
        ];
        store.set(KEY_HISTORY, &turns);

        let loaded: Vec<String> = log.load(&mut store).iter().map(|t| t.content.clone()).collect();
        assert_eq!(loaded, vec!["just inside", "yesterday"]);
        assert_eq!(stored_history(&store).len(), 2);

        clock.advance(2 * DAY);
        let mut later = HistoryLog::new(clock.clone());
        assert!(later.load(&mut store).is_empty());
        assert!(stored_history(&store).is_empty());
    }

    #[test]
    fn test_load_prunes_when_everything_expired() {
        let (_clock, mut log, mut store) = setup();
        let turns: Vec<ChatTurn> = (0..50)
            .map(|i| ChatTurn::new(NOW - 8 * DAY - i, Role::User, "old"))
            .collect();
        store.set(KEY_HISTORY, &turns);
        assert!(log.load(&mut store).is_empty());
        assert!(stored_history(&store).is_empty());
    }

    #[test]
    fn test_load_drops_out_of_range_timestamps() {
        let (_clock, mut log, mut store) = setup();
        let turns = vec![
            ChatTurn::new(i64::MIN, Role::User, "corrupted"),
            ChatTurn::new(NOW - DAY, Role::Assistant, "yesterday"),
        ];
        store.set(KEY_HISTORY, &turns);

        let loaded: Vec<String> = log.load(&mut store).iter().map(|t| t.content.clone()).collect();
        assert_eq!(loaded, vec!["yesterday"]);
        assert_eq!(stored_history(&store).len(), 1);
    }

    #[test]
    fn test_malformed_history_loads_empty() {
        let mut raw = MemoryStore::new();
        raw.set_raw("fura-ui:history", "{\"oops\": true}".to_string())
            .unwrap();
        let mut store = PreferenceStore::new(Box::new(raw));
        let mut log = HistoryLog::new(Arc::new(ManualClock::new(NOW)));
        assert!(log.load(&mut store).is_empty());
    }

    #[test]
    fn test_append_does_not_revalidate_expiry() {
        let (clock, mut log, mut store) = setup();
        log.append(&mut store, Role::User, "first");
        clock.advance(8 * DAY);
        log.append(&mut store, Role::User, "second");
        assert_eq!(log.len(), 2);
        assert_eq!(stored_history(&store).len(), 2);
    }

    #[test]
    fn test_clear() {
        let (_clock, mut log, mut store) = setup();
        log.append(&mut store, Role::User, "hello");
        log.clear(&mut store);
        assert!(log.is_empty());
        assert!(stored_history(&store).is_empty());
    }
}
