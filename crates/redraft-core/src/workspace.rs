//! Multi-document workspace: the open-document set, per-document
//! sessions, and reference materials.
//!
//! Pure in-memory state handed to the UI layer. Persistence is an
//! external collaborator: records are synced out of sessions with
//! `commit_session_content` and handed to whatever store the caller uses.

use std::collections::HashMap;

use crate::session::EditorSession;
use crate::types::{Document, DocumentId, Reference, ReferenceId};

#[derive(Default)]
pub struct Workspace {
    documents: Vec<Document>,
    open: Vec<DocumentId>,
    sessions: HashMap<DocumentId, EditorSession>,
    active: Option<DocumentId>,
    references: Vec<Reference>,
    selected_reference: Option<ReferenceId>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    // === Documents ===

    /// Replace the document list, e.g. after loading from the store.
    /// Open/active state for ids that disappeared is dropped.
    pub fn load_documents(&mut self, documents: Vec<Document>) {
        self.documents = documents;
        self.open.retain(|id| self.documents.iter().any(|d| d.id == *id));
        self.sessions.retain(|id, _| self.open.contains(id));
        if self.active.is_some_and(|id| !self.open.contains(&id)) {
            self.active = self.open.first().copied();
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Create a new untitled document, open it, and make it active.
    pub fn create_document(&mut self) -> DocumentId {
        let title = format!("Document {}", self.documents.len() + 1);
        let document = Document::new(title);
        let id = document.id;
        self.documents.insert(0, document);
        self.open_document(id);
        id
    }

    /// Open a document in a tab. Opening an already-open document just
    /// activates it. Returns false for unknown ids.
    pub fn open_document(&mut self, id: DocumentId) -> bool {
        let Some(document) = self.document(id) else {
            return false;
        };
        if !self.open.contains(&id) {
            let session = EditorSession::open(id, &document.content);
            self.sessions.insert(id, session);
            self.open.push(id);
        }
        self.active = Some(id);
        true
    }

    /// Close a tab, dropping its session. Unsaved session content is the
    /// caller's responsibility (`commit_session_content` first).
    pub fn close_document(&mut self, id: DocumentId) {
        self.open.retain(|open_id| *open_id != id);
        self.sessions.remove(&id);
        if self.active == Some(id) {
            self.active = self.open.first().copied();
        }
    }

    pub fn delete_document(&mut self, id: DocumentId) {
        self.documents.retain(|d| d.id != id);
        self.close_document(id);
    }

    pub fn open_documents(&self) -> &[DocumentId] {
        &self.open
    }

    pub fn active_document(&self) -> Option<DocumentId> {
        self.active
    }

    /// Switch the active tab. Only open documents can be activated.
    pub fn set_active(&mut self, id: DocumentId) -> bool {
        if self.open.contains(&id) {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    pub fn session(&self, id: DocumentId) -> Option<&EditorSession> {
        self.sessions.get(&id)
    }

    pub fn session_mut(&mut self, id: DocumentId) -> Option<&mut EditorSession> {
        self.sessions.get_mut(&id)
    }

    pub fn active_session(&self) -> Option<&EditorSession> {
        self.active.and_then(|id| self.sessions.get(&id))
    }

    pub fn active_session_mut(&mut self) -> Option<&mut EditorSession> {
        self.active.and_then(|id| self.sessions.get_mut(&id))
    }

    pub fn update_document_title(&mut self, id: DocumentId, title: impl Into<String>) -> bool {
        match self.documents.iter_mut().find(|d| d.id == id) {
            Some(document) => {
                document.title = title.into();
                document.touch();
                true
            }
            None => false,
        }
    }

    /// Sync a session's current content back into its document record,
    /// touching `updated_at`. Returns the refreshed record for handing to
    /// the persistence collaborator.
    pub fn commit_session_content(&mut self, id: DocumentId) -> Option<&Document> {
        let content = self.sessions.get(&id)?.content_html();
        let document = self.documents.iter_mut().find(|d| d.id == id)?;
        document.content = content;
        document.touch();
        Some(document)
    }

    // === References ===

    pub fn load_references(&mut self, references: Vec<Reference>) {
        self.references = references;
        if self
            .selected_reference
            .is_some_and(|id| !self.references.iter().any(|r| r.id == id))
        {
            self.selected_reference = None;
        }
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn create_reference(&mut self) -> ReferenceId {
        let title = format!("Reference {}", self.references.len() + 1);
        let reference = Reference::new(title);
        let id = reference.id;
        self.references.insert(0, reference);
        self.selected_reference = Some(id);
        id
    }

    pub fn select_reference(&mut self, id: ReferenceId) -> bool {
        if self.references.iter().any(|r| r.id == id) {
            self.selected_reference = Some(id);
            true
        } else {
            false
        }
    }

    pub fn selected_reference(&self) -> Option<&Reference> {
        self.selected_reference
            .and_then(|id| self.references.iter().find(|r| r.id == id))
    }

    /// Content of the selected reference, passed as context into
    /// transformation calls. Empty when nothing is selected.
    pub fn reference_context(&self) -> &str {
        self.selected_reference()
            .map(|r| r.content.as_str())
            .unwrap_or("")
    }

    pub fn update_reference_content(&mut self, id: ReferenceId, content: impl Into<String>) -> bool {
        match self.references.iter_mut().find(|r| r.id == id) {
            Some(reference) => {
                reference.content = content.into();
                reference.touch();
                true
            }
            None => false,
        }
    }

    pub fn update_reference_title(&mut self, id: ReferenceId, title: impl Into<String>) -> bool {
        match self.references.iter_mut().find(|r| r.id == id) {
            Some(reference) => {
                reference.title = title.into();
                reference.touch();
                true
            }
            None => false,
        }
    }

    pub fn delete_reference(&mut self, id: ReferenceId) {
        self.references.retain(|r| r.id != id);
        if self.selected_reference == Some(id) {
            self.selected_reference = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_opens_and_activates() {
        let mut workspace = Workspace::new();
        let id = workspace.create_document();
        assert_eq!(workspace.active_document(), Some(id));
        assert_eq!(workspace.open_documents(), [id]);
        assert!(workspace.active_session().is_some());
        assert_eq!(workspace.documents()[0].title, "Document 1");
    }

    #[test]
    fn test_open_existing_twice_just_activates() {
        let mut workspace = Workspace::new();
        let first = workspace.create_document();
        let second = workspace.create_document();
        assert_eq!(workspace.active_document(), Some(second));

        assert!(workspace.open_document(first));
        assert_eq!(workspace.active_document(), Some(first));
        assert_eq!(workspace.open_documents().len(), 2);
    }

    #[test]
    fn test_close_active_falls_back_to_first_open() {
        let mut workspace = Workspace::new();
        let first = workspace.create_document();
        let second = workspace.create_document();
        workspace.set_active(second);

        workspace.close_document(second);
        assert_eq!(workspace.active_document(), Some(first));
        assert!(workspace.session(second).is_none());
    }

    #[test]
    fn test_delete_removes_everywhere() {
        let mut workspace = Workspace::new();
        let id = workspace.create_document();
        workspace.delete_document(id);
        assert!(workspace.documents().is_empty());
        assert!(workspace.open_documents().is_empty());
        assert_eq!(workspace.active_document(), None);
    }

    #[test]
    fn test_commit_session_content_syncs_record() {
        let mut workspace = Workspace::new();
        let id = workspace.create_document();
        workspace
            .session_mut(id)
            .unwrap()
            .handle_user_edit("<p>written</p>");

        let document = workspace.commit_session_content(id).unwrap();
        assert_eq!(document.content, "<p>written</p>");
    }

    #[test]
    fn test_reference_selection_and_context() {
        let mut workspace = Workspace::new();
        assert_eq!(workspace.reference_context(), "");

        let id = workspace.create_reference();
        workspace.update_reference_content(id, "background notes");
        assert_eq!(workspace.reference_context(), "background notes");

        workspace.delete_reference(id);
        assert_eq!(workspace.reference_context(), "");
    }

    #[test]
    fn test_load_documents_drops_stale_open_state() {
        let mut workspace = Workspace::new();
        let kept = workspace.create_document();
        let dropped = workspace.create_document();

        let remaining: Vec<Document> = workspace
            .documents()
            .iter()
            .filter(|d| d.id == kept)
            .cloned()
            .collect();
        workspace.load_documents(remaining);

        assert!(workspace.document(dropped).is_none());
        assert_eq!(workspace.open_documents(), [kept]);
        assert_eq!(workspace.active_document(), Some(kept));
    }

    #[test]
    fn test_set_active_requires_open() {
        let mut workspace = Workspace::new();
        let id = workspace.create_document();
        workspace.close_document(id);
        assert!(!workspace.set_active(id));
    }
}
