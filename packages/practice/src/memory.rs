use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::journal::JournalStore;

/// In-memory JournalStore for tests and native fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JournalStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.values.lock().ok()?.get(key).cloned()
    }

    async fn put(&self, key: &str, data: Vec<u8>) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), data);
        }
    }

    async fn delete(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::Journal;
    use crate::models::ProgressEntry;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn entry(exercise_id: &str) -> ProgressEntry {
        ProgressEntry {
            id: Uuid::new_v4(),
            child_id: "child-1".to_string(),
            exercise_id: exercise_id.to_string(),
            correct_steps: 4,
            total_steps: 5,
            completed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_enqueue_and_acknowledge() {
        let journal = Journal::new(MemoryStore::new());
        assert!(journal.pending().await.is_empty());

        let first = entry("s-sound");
        let second = entry("r-sound");
        journal.enqueue(first.clone()).await;
        journal.enqueue(second.clone()).await;
        assert_eq!(journal.pending().await.len(), 2);

        journal.acknowledge(&[first.id]).await;
        let pending = journal.pending().await;
        assert_eq!(pending, vec![second.clone()]);

        journal.acknowledge(&[second.id]).await;
        assert!(journal.pending().await.is_empty());
    }

    #[tokio::test]
    async fn test_enqueue_is_idempotent() {
        let journal = Journal::new(MemoryStore::new());
        let e = entry("s-sound");
        journal.enqueue(e.clone()).await;
        journal.enqueue(e).await;
        assert_eq!(journal.pending().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_ids_leave_queue_alone() {
        let journal = Journal::new(MemoryStore::new());
        journal.enqueue(entry("s-sound")).await;
        journal.acknowledge(&[Uuid::new_v4()]).await;
        assert_eq!(journal.pending().await.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_journal_reads_empty() {
        let store = MemoryStore::new();
        store.put("pending", b"not json".to_vec()).await;
        let journal = Journal::new(store);
        assert!(journal.pending().await.is_empty());
    }

    /// Yields to the scheduler around every access, the way IndexedDB
    /// transactions interleave in the browser.
    #[derive(Clone, Default)]
    struct YieldingStore(MemoryStore);

    impl JournalStore for YieldingStore {
        async fn get(&self, key: &str) -> Option<Vec<u8>> {
            tokio::task::yield_now().await;
            let value = self.0.get(key).await;
            tokio::task::yield_now().await;
            value
        }

        async fn put(&self, key: &str, data: Vec<u8>) {
            tokio::task::yield_now().await;
            self.0.put(key, data).await;
        }

        async fn delete(&self, key: &str) {
            tokio::task::yield_now().await;
            self.0.delete(key).await;
        }
    }

    #[tokio::test]
    async fn test_concurrent_acknowledge_keeps_new_entry() {
        let store = YieldingStore::default();
        let journal = Journal::new(store.clone());
        // A second handle on the same store, as the UI opens one per call
        let other = Journal::new(store);

        let uploaded = entry("s-sound");
        let fresh = entry("r-sound");
        journal.enqueue(uploaded.clone()).await;

        let acked = [uploaded.id];
        tokio::join!(journal.acknowledge(&acked), other.enqueue(fresh.clone()));

        assert_eq!(journal.pending().await, vec![fresh]);
    }

    #[tokio::test]
    async fn test_drain_picks_up_entries_added_mid_upload() {
        let store = MemoryStore::new();
        let journal = Journal::new(store.clone());
        let other = Journal::new(store);
        journal.enqueue(entry("s-sound")).await;
        let late = entry("r-sound");

        let mut batches = Vec::new();
        let result: Result<usize, ()> = journal
            .drain(|batch| {
                batches.push(batch.len());
                let first = batches.len() == 1;
                let late = late.clone();
                let other = &other;
                async move {
                    if first {
                        // Finished while the first upload was in flight
                        other.enqueue(late).await;
                    }
                    Ok(batch.len())
                }
            })
            .await;

        assert_eq!(result, Ok(2));
        assert_eq!(batches, vec![1, 1]);
        assert!(journal.pending().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_drain_keeps_entries() {
        let journal = Journal::new(MemoryStore::new());
        let e = entry("s-sound");
        journal.enqueue(e.clone()).await;

        let result = journal.drain(|_| async { Err::<usize, _>("offline") }).await;

        assert_eq!(result, Err("offline"));
        assert_eq!(journal.pending().await, vec![e]);
    }

    #[tokio::test]
    async fn test_last_synced() {
        let journal = Journal::new(MemoryStore::new());
        assert!(journal.last_synced().await.is_none());

        let at = Utc.with_ymd_and_hms(2024, 6, 18, 9, 30, 0).unwrap();
        journal.set_last_synced(at).await;
        assert_eq!(journal.last_synced().await, Some(at));
    }
}
