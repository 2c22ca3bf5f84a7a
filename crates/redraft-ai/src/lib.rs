//! redraft-ai: asynchronous collaborators for the redraft engine.
//!
//! Two seams, both injected as trait objects so the core stays free of
//! IO concerns:
//! - `TextTransformer` - one generation call per selected fragment,
//!   fanned out by `TransformationOrchestrator` with an all-or-nothing
//!   join (`HttpTransformer` is the production implementation)
//! - `DocumentStore` - document persistence, written to through the
//!   debounced `Autosave` writer

pub mod client;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod persist;
pub mod prompts;

pub use client::{GenerationRequest, GenerationResponse, TextTransformer};
pub use error::{StoreError, TransformError};
pub use http::HttpTransformer;
pub use orchestrator::{DEFAULT_TIMEOUT, TransformationOrchestrator};
pub use persist::{AUTOSAVE_DEBOUNCE, Autosave, DocumentStore};
pub use prompts::{ModificationPrompt, TransformerConfig, modification_prompt};
