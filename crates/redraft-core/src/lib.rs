//! redraft-core: selection tracking and reversible AI text substitution
//! for structured documents.
//!
//! This crate provides:
//! - `Markup` - an HTML-like document tree with a plain-text projection
//!   and a structural splice primitive
//! - `locate` - fragment lookup over the projection
//! - `substitute` - ordered batch substitution and its exact inverse
//! - `SelectionSet` - the user's flagged fragments, containment-pruned
//! - `PendingChangeTracker` - the accept/reject cycle over applied batches
//! - `EditorSession` / `Workspace` - per-document and multi-document
//!   composition roots handed to the UI layer
//!
//! Everything here is synchronous; the asynchronous collaborators
//! (transformation fan-out, persistence) live in `redraft-ai`.

pub mod error;
pub mod locate;
pub mod markup;
pub mod pending;
pub mod selection;
pub mod session;
pub mod substitute;
pub mod types;
pub mod workspace;

pub use error::SessionError;
pub use locate::{Occurrence, locate};
pub use markup::{Element, Markup, Node};
pub use pending::PendingChangeTracker;
pub use selection::SelectionSet;
pub use session::{EditorSession, Generation};
pub use substitute::{ApplyReport, apply, apply_inverse};
pub use types::{
    Document, DocumentId, Modification, ModificationId, Reference, ReferenceId, SelectionId,
    TextSelection,
};
pub use workspace::Workspace;
