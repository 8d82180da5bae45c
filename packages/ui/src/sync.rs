//! Upload of journaled exercise completions.
//!
//! Every finished exercise goes into the child's local journal first and is
//! then flushed through [`api::record_progress`]. Entries leave the journal
//! only once the server has answered, so a dropped connection at any point
//! leaves them pending for the next flush. A flush runs whenever a child is
//! signed in and the app comes online.

use api::{ProgressEntry, Role};
use chrono::{DateTime, Utc};
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::journal::make_journal_for_user;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncState {
    pub last_synced: Option<DateTime<Utc>>,
    pub syncing: bool,
    /// Completions waiting for upload.
    pub pending: usize,
}

pub fn use_sync() -> Signal<SyncState> {
    use_context::<Signal<SyncState>>()
}

/// Upload everything pending for `child_id`, including entries saved while
/// the upload runs. Returns how many entries the server stored as new.
pub async fn flush(mut sync: Signal<SyncState>, child_id: &str) -> Option<usize> {
    if sync.peek().syncing {
        // The running flush drains whatever was just enqueued
        return None;
    }
    let journal = make_journal_for_user(child_id);
    let pending = journal.pending().await.len();
    let last_synced = journal.last_synced().await;
    sync.set(SyncState {
        last_synced,
        syncing: pending > 0,
        pending,
    });
    if pending == 0 {
        return Some(0);
    }

    let result = journal
        .drain(|batch| {
            tracing::debug!("Uploading {} practice results", batch.len());
            api::record_progress(batch)
        })
        .await;
    let mut state = sync();
    state.syncing = false;
    state.pending = journal.pending().await.len();
    match result {
        Ok(inserted) => {
            let now = Utc::now();
            journal.set_last_synced(now).await;
            tracing::info!("Uploaded practice results ({} new)", inserted);
            state.last_synced = Some(now);
            sync.set(state);
            Some(inserted)
        }
        Err(e) => {
            tracing::warn!("Progress upload failed, keeping {} entries: {}", state.pending, e);
            sync.set(state);
            None
        }
    }
}

/// Store a finished exercise and try to upload it right away.
pub async fn save_completion(mut sync: Signal<SyncState>, online: bool, entry: ProgressEntry) {
    let child_id = entry.child_id.clone();
    let journal = make_journal_for_user(&child_id);
    journal.enqueue(entry).await;
    let pending = journal.pending().await.len();
    sync.with_mut(|s| s.pending = pending);

    if online {
        flush(sync, &child_id).await;
    }
}

/// Provides [`SyncState`] and flushes the journal whenever a signed-in child
/// comes online.
#[component]
pub fn SyncProvider(children: Element) -> Element {
    let auth = use_auth();
    let sync = use_context_provider(|| Signal::new(SyncState::default()));

    let online_child = use_memo(move || {
        let state = auth();
        let child = state
            .user
            .filter(|u| u.role == Role::Child)
            .map(|u| u.id);
        (child, state.online)
    });

    use_effect(move || {
        let (child, online) = online_child();
        let Some(child_id) = child else {
            return;
        };
        spawn(async move {
            if online {
                flush(sync, &child_id).await;
            } else {
                let journal = make_journal_for_user(&child_id);
                let pending = journal.pending().await.len();
                let last_synced = journal.last_synced().await;
                let mut sync = sync;
                sync.with_mut(|s| {
                    s.pending = pending;
                    s.last_synced = last_synced;
                });
            }
        });
    });

    rsx! {
        {children}
    }
}
