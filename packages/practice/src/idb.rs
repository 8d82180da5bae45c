//! # IndexedDB journal store — browser-side persistence
//!
//! [`IdbStore`] is the [`JournalStore`] used by the web build. Each signed-in
//! child gets a database named `"companion-<user_id>"` with a single object
//! store, `"journal"`, mapping journal keys to byte arrays (serialised through
//! `serde_wasm_bindgen`).
//!
//! A fresh [`Rexie`] connection is opened per operation; `Rexie` is not
//! `Clone`, and the browser keeps the underlying connection cached.
//!
//! Errors are swallowed: an unavailable IndexedDB reads as an empty journal.

use rexie::{ObjectStore as RexieObjectStore, Rexie, TransactionMode};
use wasm_bindgen::JsValue;

use crate::journal::JournalStore;

const DEFAULT_DB_NAME: &str = "companion";
const DB_VERSION: u32 = 1;
const JOURNAL_STORE: &str = "journal";

#[derive(Clone)]
pub struct IdbStore {
    db_name: String,
}

impl IdbStore {
    pub fn new() -> Self {
        Self::with_namespace(None)
    }

    /// - `Some("user-uuid")` → database `"companion-user-uuid"`
    /// - `None` → database `"companion"`
    pub fn with_namespace(namespace: Option<&str>) -> Self {
        let db_name = match namespace {
            Some(ns) => format!("{DEFAULT_DB_NAME}-{ns}"),
            None => DEFAULT_DB_NAME.to_string(),
        };
        Self { db_name }
    }

    async fn open_db(&self) -> Result<Rexie, rexie::Error> {
        Rexie::builder(&self.db_name)
            .version(DB_VERSION)
            .add_object_store(RexieObjectStore::new(JOURNAL_STORE))
            .build()
            .await
    }
}

impl Default for IdbStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JournalStore for IdbStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let db = self.open_db().await.ok()?;
        let tx = db
            .transaction(&[JOURNAL_STORE], TransactionMode::ReadOnly)
            .ok()?;
        let store = tx.store(JOURNAL_STORE).ok()?;

        let value = store.get(JsValue::from_str(key)).await.ok()??;
        serde_wasm_bindgen::from_value(value).ok()
    }

    async fn put(&self, key: &str, data: Vec<u8>) {
        let Ok(db) = self.open_db().await else {
            return;
        };
        let Ok(tx) = db.transaction(&[JOURNAL_STORE], TransactionMode::ReadWrite) else {
            return;
        };
        let Ok(store) = tx.store(JOURNAL_STORE) else {
            return;
        };

        let key = JsValue::from_str(key);
        let Ok(value) = serde_wasm_bindgen::to_value(&data) else {
            return;
        };
        let _ = store.put(&value, Some(&key)).await;
        let _ = tx.done().await;
    }

    async fn delete(&self, key: &str) {
        let Ok(db) = self.open_db().await else {
            return;
        };
        let Ok(tx) = db.transaction(&[JOURNAL_STORE], TransactionMode::ReadWrite) else {
            return;
        };
        let Ok(store) = tx.store(JOURNAL_STORE) else {
            return;
        };
        let _ = store.delete(JsValue::from_str(key)).await;
        let _ = tx.done().await;
    }
}
