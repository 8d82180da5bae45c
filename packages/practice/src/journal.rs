//! # Offline progress journal
//!
//! A child can finish an exercise while the server is unreachable. Instead of
//! dropping the result, the player appends a [`ProgressEntry`] to a local
//! journal; the sync context uploads pending entries once the app is back
//! online and acknowledges exactly the entries the server confirmed.
//!
//! ## [`JournalStore`] trait
//!
//! A tiny async key/value interface (`get`, `put`, `delete`). Implementations
//! live in sibling modules: [`crate::MemoryStore`] (tests, fallback),
//! [`crate::FileStore`] (native) and `IdbStore` (browser IndexedDB).
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `pending` | JSON array of [`ProgressEntry`] awaiting upload |
//! | `last_synced` | RFC 3339 timestamp of the last successful upload |
//!
//! Corrupt values read as empty: the server copy is authoritative, and a
//! broken journal must never stop a child from practicing.
//!
//! `enqueue` and `acknowledge` rewrite the whole `pending` list. They take a
//! process-wide lock for the read-modify-write, because the UI opens a fresh
//! [`Journal`] per call and the stores may yield between `get` and `put`.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::ProgressEntry;

const PENDING_KEY: &str = "pending";
const LAST_SYNCED_KEY: &str = "last_synced";

static PENDING_LOCK: Mutex<()> = Mutex::const_new(());

/// Async key/value storage backing a [`Journal`].
pub trait JournalStore {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<Vec<u8>>>;
    fn put(&self, key: &str, data: Vec<u8>) -> impl std::future::Future<Output = ()>;
    fn delete(&self, key: &str) -> impl std::future::Future<Output = ()>;
}

#[derive(Clone, Debug)]
pub struct Journal<S: JournalStore> {
    store: S,
}

impl<S: JournalStore> Journal<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn pending(&self) -> Vec<ProgressEntry> {
        let Some(bytes) = self.store.get(PENDING_KEY).await else {
            return Vec::new();
        };
        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Discarding unreadable progress journal: {}", e);
                Vec::new()
            }
        }
    }

    async fn write_pending(&self, entries: &[ProgressEntry]) {
        if entries.is_empty() {
            self.store.delete(PENDING_KEY).await;
            return;
        }
        match serde_json::to_vec(entries) {
            Ok(bytes) => self.store.put(PENDING_KEY, bytes).await,
            Err(e) => tracing::error!("Failed to encode progress journal: {}", e),
        }
    }

    /// Append an entry. Enqueuing the same entry twice keeps one copy.
    pub async fn enqueue(&self, entry: ProgressEntry) {
        let _guard = PENDING_LOCK.lock().await;
        let mut entries = self.pending().await;
        if entries.iter().any(|e| e.id == entry.id) {
            return;
        }
        entries.push(entry);
        self.write_pending(&entries).await;
    }

    /// Drop entries the server has stored.
    pub async fn acknowledge(&self, ids: &[Uuid]) {
        let _guard = PENDING_LOCK.lock().await;
        let mut entries = self.pending().await;
        let before = entries.len();
        entries.retain(|e| !ids.contains(&e.id));
        if entries.len() != before {
            self.write_pending(&entries).await;
        }
    }

    /// Upload pending entries batch by batch until none are left, so entries
    /// enqueued while a batch was in flight go out in the same run. Stops at
    /// the first failed upload with the rest still pending. Returns the sum of
    /// what `upload` reported.
    pub async fn drain<F, Fut, E>(&self, mut upload: F) -> Result<usize, E>
    where
        F: FnMut(Vec<ProgressEntry>) -> Fut,
        Fut: std::future::Future<Output = Result<usize, E>>,
    {
        let mut total = 0;
        loop {
            let batch = self.pending().await;
            if batch.is_empty() {
                return Ok(total);
            }
            let ids: Vec<Uuid> = batch.iter().map(|e| e.id).collect();
            total += upload(batch).await?;
            self.acknowledge(&ids).await;
        }
    }

    pub async fn last_synced(&self) -> Option<DateTime<Utc>> {
        let bytes = self.store.get(LAST_SYNCED_KEY).await?;
        let text = String::from_utf8(bytes).ok()?;
        DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    pub async fn set_last_synced(&self, at: DateTime<Utc>) {
        self.store
            .put(LAST_SYNCED_KEY, at.to_rfc3339().into_bytes())
            .await;
    }
}
