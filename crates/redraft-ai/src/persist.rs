//! Persistence seam and debounced autosave.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use redraft_core::types::{Document, DocumentId};

use crate::error::StoreError;

/// Quiet period after the last edit before a save fires.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_secs(2);

/// Backing store for documents. Writes are last-write-wins; there is no
/// optimistic concurrency on the save path.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn save(
        &self,
        id: DocumentId,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn load(&self) -> Result<Vec<Document>, StoreError>;

    async fn delete(&self, id: DocumentId) -> Result<(), StoreError>;
}

/// Debounced writer over a `DocumentStore`.
///
/// Each `schedule` call supersedes any save still waiting for the same
/// document, so a burst of keystrokes costs one write: the one issued
/// `delay` after the burst goes quiet. Distinct documents debounce
/// independently.
pub struct Autosave {
    store: Arc<dyn DocumentStore>,
    delay: Duration,
    inflight: Mutex<HashMap<DocumentId, JoinHandle<()>>>,
}

impl Autosave {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_delay(store, AUTOSAVE_DEBOUNCE)
    }

    pub fn with_delay(store: Arc<dyn DocumentStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Queue a save of `content` for `id`, replacing any save already
    /// queued for the same document.
    pub fn schedule(&self, id: DocumentId, content: String, updated_at: DateTime<Utc>) {
        let store = Arc::clone(&self.store);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = store.save(id, &content, updated_at).await {
                warn!(%id, %err, "autosave failed");
            } else {
                debug!(%id, "autosaved");
            }
        });
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = inflight.insert(id, handle) {
            previous.abort();
        }
    }

    /// Drop any save still queued for `id` without running it. Used when
    /// a document is deleted or closed with nothing worth keeping.
    pub fn cancel(&self, id: DocumentId) {
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = inflight.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        let inflight = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for handle in inflight.values() {
            handle.abort();
        }
    }
}
