//! The ordered set of text fragments currently flagged for transformation.

use crate::types::{SelectionId, TextSelection};

/// Selections for one document, in the order the user made them.
///
/// The set never holds two selections in a containment relationship:
/// adding a fragment first drops exact duplicates and any existing
/// selection that contains, or is contained by, the new text. A nested
/// selection would make substitution ambiguous about which occurrence is
/// "the" target.
///
/// Containment is plain substring matching. With repeated short words this
/// can absorb a selection the user considered distinct; that is a known
/// limitation of the heuristic, kept deliberately.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selections: Vec<TextSelection>,
    last_selected: Option<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selection. Blank or whitespace-only text is rejected and the
    /// set is left untouched. Returns the new selection's id.
    pub fn add(&mut self, text: &str) -> Option<SelectionId> {
        if text.trim().is_empty() {
            return None;
        }
        self.selections.retain(|existing| {
            existing.text != text
                && !existing.text.contains(text)
                && !text.contains(existing.text.as_str())
        });
        let selection = TextSelection::new(text);
        let id = selection.id;
        self.selections.push(selection);
        self.last_selected = Some(text.to_owned());
        Some(id)
    }

    /// Drop a selection by id. Absent ids are ignored.
    pub fn remove(&mut self, id: SelectionId) {
        self.selections.retain(|existing| existing.id != id);
    }

    pub fn clear(&mut self) {
        self.selections.clear();
        self.last_selected = None;
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn as_slice(&self) -> &[TextSelection] {
        &self.selections
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextSelection> {
        self.selections.iter()
    }

    /// The text of the most recent `add`, for single-selection UI
    /// affordances. Cleared together with the set.
    pub fn last_selected(&self) -> Option<&str> {
        self.last_selected.as_deref()
    }
}
