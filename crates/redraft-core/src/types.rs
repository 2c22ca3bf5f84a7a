//! Core data types shared across the engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type!(DocumentId);
id_type!(ReferenceId);
id_type!(SelectionId);
id_type!(ModificationId);

/// A fragment of plain text the user flagged for transformation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSelection {
    pub id: SelectionId,
    pub text: String,
}

impl TextSelection {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: SelectionId::new(),
            text: text.into(),
        }
    }
}

/// A proposed substitution: replace one occurrence of `original` with
/// `modified`. Lives in the pending tracker until accepted (discarded) or
/// rejected (inverted, then discarded).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    pub id: ModificationId,
    pub original: String,
    pub modified: String,
}

impl Modification {
    pub fn new(original: impl Into<String>, modified: impl Into<String>) -> Self {
        Self {
            id: ModificationId::new(),
            original: original.into(),
            modified: modified.into(),
        }
    }
}

/// A document owned by the user. `content` is the markup wire form;
/// editing happens through an `EditorSession`, and this record is synced
/// back from the session before persistence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    pub reference_content: String,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            title: title.into(),
            content: String::new(),
            reference_content: String::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Read-only reference material, passed as context into transformation
/// calls. Same lifecycle as a document but no substitution semantics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: ReferenceId,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl Reference {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ReferenceId::new(),
            title: title.into(),
            content: String::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
