//! # Filesystem-backed journal store
//!
//! [`FileStore`] keeps each journal key in its own file under a base
//! directory. Native builds use it so that completions made offline survive a
//! restart.
//!
//! ```text
//! <base_dir>/
//! ├── pending        # JSON array of progress entries
//! └── last_synced    # RFC 3339 timestamp
//! ```
//!
//! Writes go to `<key>.tmp` first and are renamed into place, so a crash
//! mid-write leaves the previous value intact. I/O errors are logged and
//! otherwise ignored.

use std::path::PathBuf;

use crate::journal::JournalStore;

#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl JournalStore for FileStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        std::fs::read(self.path(key)).ok()
    }

    async fn put(&self, key: &str, data: Vec<u8>) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create {}: {}", self.base.display(), e);
            return;
        }
        let path = self.path(key);
        let tmp = path.with_extension("tmp");
        if let Err(e) = std::fs::write(&tmp, data) {
            tracing::warn!("Failed to write journal key {}: {}", key, e);
            let _ = std::fs::remove_file(&tmp);
            return;
        }
        if let Err(e) = std::fs::rename(&tmp, &path) {
            tracing::warn!("Failed to replace journal key {}: {}", key, e);
            let _ = std::fs::remove_file(&tmp);
        }
    }

    async fn delete(&self, key: &str) {
        let _ = std::fs::remove_file(self.path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::Journal;
    use crate::models::ProgressEntry;
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_journal_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("companion_journal_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let entry = ProgressEntry {
            id: Uuid::new_v4(),
            child_id: "child-1".to_string(),
            exercise_id: "tongue-placement".to_string(),
            correct_steps: 3,
            total_steps: 5,
            completed_at: Utc::now(),
        };

        let journal = Journal::new(FileStore::new(dir.clone()));
        journal.enqueue(entry.clone()).await;

        // Re-open from the same directory
        let reopened = Journal::new(FileStore::new(dir.clone()));
        assert_eq!(reopened.pending().await, vec![entry.clone()]);

        reopened.acknowledge(&[entry.id]).await;
        assert!(!dir.join("pending").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_put_replaces_value_without_leftovers() {
        let dir = std::env::temp_dir().join(format!("companion_store_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store.put("last_synced", b"first".to_vec()).await;
        store.put("last_synced", b"second".to_vec()).await;

        assert_eq!(store.get("last_synced").await, Some(b"second".to_vec()));
        assert!(!dir.join("last_synced.tmp").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
