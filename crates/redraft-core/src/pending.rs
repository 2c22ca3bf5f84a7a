//! Pending-change tracking: the accept/reject cycle over an applied batch.

use crate::error::SessionError;
use crate::markup::Markup;
use crate::substitute::{self, ApplyReport};
use crate::types::Modification;

/// Holds the currently-applied-but-unconfirmed batch for one document.
///
/// State machine: `Clean -> apply_batch -> Pending -> accept | reject ->
/// Clean`. A non-empty pending batch *is* the Pending state. Accept and
/// reject are no-ops when Clean so double-clicks in the UI stay harmless.
#[derive(Clone, Debug, Default)]
pub struct PendingChangeTracker {
    pending: Vec<Modification>,
}

impl PendingChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The modifications awaiting accept/reject.
    pub fn pending(&self) -> &[Modification] {
        &self.pending
    }

    /// Substitute `batch` into `content` and hold the succeeded subset for
    /// accept/reject. Refused while a previous batch is still pending.
    ///
    /// Only entries that actually landed become pending, so `reject` never
    /// tries to invert a substitution that did not happen. If nothing
    /// landed the tracker stays Clean.
    pub fn apply_batch(
        &mut self,
        content: &mut Markup,
        batch: Vec<Modification>,
    ) -> Result<ApplyReport, SessionError> {
        if self.is_pending() {
            return Err(SessionError::BatchPending);
        }
        let report = substitute::apply(content, &batch);
        self.pending = report.applied.clone();
        Ok(report)
    }

    /// Commit: keep the substituted content and forget the batch. Returns
    /// the accepted modifications (empty when Clean).
    pub fn accept(&mut self) -> Vec<Modification> {
        std::mem::take(&mut self.pending)
    }

    /// Revert: invert the pending batch against `content` and forget it.
    /// Returns `None` when Clean.
    pub fn reject(&mut self, content: &mut Markup) -> Option<ApplyReport> {
        if self.pending.is_empty() {
            return None;
        }
        let batch = std::mem::take(&mut self.pending);
        Some(substitute::apply_inverse(content, &batch))
    }

    /// Drop the pending batch without touching content. Used when the
    /// document is replaced wholesale (user edit) and the recorded
    /// fragments can no longer be trusted.
    pub fn abandon(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_then_accept() {
        let mut content = Markup::from_html("<p>draft text</p>");
        let mut tracker = PendingChangeTracker::new();

        let batch = vec![Modification::new("draft", "final")];
        let report = tracker.apply_batch(&mut content, batch).unwrap();
        assert!(report.is_complete());
        assert!(tracker.is_pending());
        assert_eq!(content.plain_text(), "final text");

        let accepted = tracker.accept();
        assert_eq!(accepted.len(), 1);
        assert!(!tracker.is_pending());
        assert_eq!(content.plain_text(), "final text");
    }

    #[test]
    fn test_apply_then_reject_restores_content() {
        let mut content = Markup::from_html("<p>draft text</p>");
        let mut tracker = PendingChangeTracker::new();

        tracker
            .apply_batch(&mut content, vec![Modification::new("draft", "final")])
            .unwrap();
        let report = tracker.reject(&mut content).unwrap();
        assert!(report.is_complete());
        assert!(!tracker.is_pending());
        assert_eq!(content.plain_text(), "draft text");
    }

    #[test]
    fn test_accept_reject_noop_when_clean() {
        let mut content = Markup::from_html("<p>text</p>");
        let mut tracker = PendingChangeTracker::new();
        assert!(tracker.accept().is_empty());
        assert!(tracker.reject(&mut content).is_none());
        assert_eq!(content.plain_text(), "text");
    }

    #[test]
    fn test_second_batch_blocked_while_pending() {
        let mut content = Markup::from_html("<p>a b</p>");
        let mut tracker = PendingChangeTracker::new();
        tracker
            .apply_batch(&mut content, vec![Modification::new("a", "x")])
            .unwrap();
        let err = tracker
            .apply_batch(&mut content, vec![Modification::new("b", "y")])
            .unwrap_err();
        assert_eq!(err, SessionError::BatchPending);
        assert_eq!(content.plain_text(), "x b");
    }

    #[test]
    fn test_only_applied_entries_become_pending() {
        let mut content = Markup::from_html("<p>present</p>");
        let mut tracker = PendingChangeTracker::new();
        let batch = vec![
            Modification::new("present", "here"),
            Modification::new("missing", "gone"),
        ];
        let report = tracker.apply_batch(&mut content, batch).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(tracker.pending().len(), 1);
        assert_eq!(tracker.pending()[0].original, "present");
    }

    #[test]
    fn test_all_skipped_stays_clean() {
        let mut content = Markup::from_html("<p>text</p>");
        let mut tracker = PendingChangeTracker::new();
        let report = tracker
            .apply_batch(&mut content, vec![Modification::new("missing", "x")])
            .unwrap();
        assert!(report.is_noop());
        assert!(!tracker.is_pending());
    }

    #[test]
    fn test_abandon_keeps_content() {
        let mut content = Markup::from_html("<p>draft</p>");
        let mut tracker = PendingChangeTracker::new();
        tracker
            .apply_batch(&mut content, vec![Modification::new("draft", "final")])
            .unwrap();
        tracker.abandon();
        assert!(!tracker.is_pending());
        assert_eq!(content.plain_text(), "final");
    }
}
