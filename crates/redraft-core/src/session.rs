//! Per-document editing session: the composition root for selections,
//! pending changes, and content.
//!
//! All mutation happens on the caller's single thread of control (a UI
//! event loop); the session itself has no locking. The only concurrency
//! the session knows about is indirect: a transformation round runs
//! elsewhere while the user keeps editing, so results are tagged with the
//! generation they were produced against and discarded when it no longer
//! matches.

use tracing::debug;

use crate::error::SessionError;
use crate::markup::Markup;
use crate::pending::PendingChangeTracker;
use crate::selection::SelectionSet;
use crate::substitute::ApplyReport;
use crate::types::{DocumentId, Modification, SelectionId};

/// Monotonic revision marker for a session's content. Captured before a
/// transformation round is dispatched; a mismatch on arrival means the
/// content changed in the meantime and the results are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generation(u64);

/// Editing state for one open document.
pub struct EditorSession {
    document_id: DocumentId,
    content: Markup,
    selections: SelectionSet,
    pending: PendingChangeTracker,
    generation: u64,
}

impl EditorSession {
    pub fn new(document_id: DocumentId, content: Markup) -> Self {
        Self {
            document_id,
            content,
            selections: SelectionSet::new(),
            pending: PendingChangeTracker::new(),
            generation: 0,
        }
    }

    /// Open a session over wire-format content.
    pub fn open(document_id: DocumentId, html: &str) -> Self {
        Self::new(document_id, Markup::from_html(html))
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn content(&self) -> &Markup {
        &self.content
    }

    pub fn content_html(&self) -> String {
        self.content.to_html()
    }

    pub fn plain_text(&self) -> String {
        self.content.plain_text()
    }

    /// The current content revision. Pass this to the transformation
    /// orchestrator and hand it back to `apply_transformations`.
    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// The editor surface reported a highlighted span's plain text.
    pub fn handle_selection(&mut self, text: &str) -> Option<SelectionId> {
        self.selections.add(text)
    }

    pub fn remove_selection(&mut self, id: SelectionId) {
        self.selections.remove(id);
    }

    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }

    /// The user edited the document directly. Recorded fragment positions
    /// can no longer be trusted: selections are dropped, any pending batch
    /// is abandoned (content keeps the user's edit), and the generation
    /// advances so in-flight transformation results get discarded.
    pub fn handle_user_edit(&mut self, html: &str) {
        self.content = Markup::from_html(html);
        self.selections.clear();
        self.pending.abandon();
        self.generation += 1;
    }

    /// Apply a transformation batch that was produced against
    /// `generation`. Stale batches are refused without touching anything;
    /// a batch is also refused while a previous one awaits accept/reject.
    pub fn apply_transformations(
        &mut self,
        generation: Generation,
        batch: Vec<Modification>,
    ) -> Result<ApplyReport, SessionError> {
        if generation != self.generation() {
            debug!(
                document = %self.document_id,
                "discarding stale transformation batch"
            );
            return Err(SessionError::StaleBatch);
        }
        let report = self.pending.apply_batch(&mut self.content, batch)?;
        if !report.is_noop() {
            self.generation += 1;
        }
        Ok(report)
    }

    /// Commit the pending batch: content stays as substituted. No-op when
    /// nothing is pending.
    pub fn accept_changes(&mut self) -> Vec<Modification> {
        let accepted = self.pending.accept();
        if !accepted.is_empty() {
            self.selections.clear();
        }
        accepted
    }

    /// Revert the pending batch, restoring the original fragments. No-op
    /// when nothing is pending.
    pub fn reject_changes(&mut self) -> Option<ApplyReport> {
        let report = self.pending.reject(&mut self.content)?;
        self.selections.clear();
        self.generation += 1;
        Some(report)
    }

    /// Fragments the editor surface should mark with the pending style.
    pub fn pending_fragments(&self) -> impl Iterator<Item = &str> {
        self.pending.pending().iter().map(|m| m.modified.as_str())
    }
}
