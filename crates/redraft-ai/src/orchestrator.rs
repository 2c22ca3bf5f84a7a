//! Fan-out/fan-in orchestration of transformation calls.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::try_join_all;
use tracing::{debug, warn};

use redraft_core::types::{Modification, TextSelection};

use crate::client::{GenerationRequest, TextTransformer};
use crate::error::TransformError;

/// Default per-call timeout for transformation requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Issues one transformation call per selection, concurrently, and joins
/// the results into a modification batch in selection order.
///
/// All-or-nothing: if any call fails or times out the whole round fails
/// and nothing reaches the document. A half-applied round with no way to
/// tell which pieces landed would be worse than a clean retry, and the
/// selections stay intact for that retry.
///
/// The orchestrator never touches document state itself; the caller pairs
/// the returned batch with the session generation it captured before
/// dispatching, and `EditorSession::apply_transformations` discards the
/// batch if the document moved on in the meantime.
pub struct TransformationOrchestrator {
    transformer: Arc<dyn TextTransformer>,
    timeout: Duration,
}

impl TransformationOrchestrator {
    pub fn new(transformer: Arc<dyn TextTransformer>) -> Self {
        Self {
            transformer,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one transformation round over `selections`.
    pub async fn run(
        &self,
        selections: &[TextSelection],
        instruction: &str,
        reference_context: &str,
        language: Option<&str>,
    ) -> Result<Vec<Modification>, TransformError> {
        if selections.is_empty() {
            return Ok(Vec::new());
        }
        debug!(count = selections.len(), "dispatching transformation round");

        let calls = selections.iter().map(|selection| {
            let request = GenerationRequest::TextModification {
                original_text: selection.text.clone(),
                instruction: instruction.to_owned(),
                reference_context: (!reference_context.is_empty())
                    .then(|| reference_context.to_owned()),
                language: language.map(str::to_owned),
            };
            async move {
                let result = tokio::time::timeout(self.timeout, self.transformer.generate(request))
                    .await
                    .map_err(|_| TransformError::Timeout(self.timeout))??;
                if result.trim().is_empty() {
                    return Err(TransformError::EmptyResult);
                }
                Ok(Modification::new(selection.text.clone(), result))
            }
        });

        match try_join_all(calls).await {
            Ok(batch) => {
                debug!(count = batch.len(), "transformation round complete");
                Ok(batch)
            }
            Err(err) => {
                warn!(%err, "transformation round failed, nothing applied");
                Err(err)
            }
        }
    }
}
