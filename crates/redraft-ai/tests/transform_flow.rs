//! End-to-end flow: selection, transformation round, apply, accept or
//! reject, with a scripted transformer standing in for the backend.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use redraft_ai::{GenerationRequest, TextTransformer, TransformError, TransformationOrchestrator};
use redraft_core::{DocumentId, EditorSession, SessionError};

/// Looks up replies by original text; anything unscripted is an error.
struct ScriptedTransformer {
    replies: HashMap<String, String>,
    calls: AtomicUsize,
}

impl ScriptedTransformer {
    fn new(replies: &[(&str, &str)]) -> Self {
        Self {
            replies: replies
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextTransformer for ScriptedTransformer {
    async fn generate(&self, request: GenerationRequest) -> Result<String, TransformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let GenerationRequest::TextModification { original_text, .. } = request else {
            return Err(TransformError::Api("unexpected request kind".to_owned()));
        };
        self.replies
            .get(&original_text)
            .cloned()
            .ok_or_else(|| TransformError::Api(format!("no script for {original_text:?}")))
    }
}

#[tokio::test]
async fn test_transform_apply_then_reject_restores_content() {
    let transformer = Arc::new(ScriptedTransformer::new(&[(
        "skilled engineer",
        "seasoned principal engineer",
    )]));
    let orchestrator = TransformationOrchestrator::new(transformer);

    let mut session = EditorSession::open(DocumentId::new(), "<p>I am a skilled engineer.</p>");
    session.handle_selection("skilled engineer");

    let generation = session.generation();
    let batch = orchestrator
        .run(
            session.selections().as_slice(),
            "make it more senior-sounding",
            "",
            None,
        )
        .await
        .unwrap();

    let report = session.apply_transformations(generation, batch).unwrap();
    assert!(report.is_complete());
    assert_eq!(
        session.content_html(),
        "<p>I am a seasoned principal engineer.</p>"
    );
    assert!(session.is_pending());

    session.reject_changes().unwrap();
    assert_eq!(session.content_html(), "<p>I am a skilled engineer.</p>");
    assert!(!session.is_pending());
    assert!(session.selections().is_empty());
}

#[tokio::test]
async fn test_transform_apply_then_accept_keeps_content() {
    let transformer = Arc::new(ScriptedTransformer::new(&[
        ("first", "1st"),
        ("second", "2nd"),
    ]));
    let orchestrator = TransformationOrchestrator::new(transformer);

    let mut session = EditorSession::open(DocumentId::new(), "<p>first and second</p>");
    session.handle_selection("first");
    session.handle_selection("second");

    let generation = session.generation();
    let batch = orchestrator
        .run(session.selections().as_slice(), "abbreviate", "", None)
        .await
        .unwrap();
    session.apply_transformations(generation, batch).unwrap();
    assert_eq!(session.plain_text(), "1st and 2nd");

    let accepted = session.accept_changes();
    assert_eq!(accepted.len(), 2);
    assert_eq!(session.plain_text(), "1st and 2nd");
    assert!(!session.is_pending());
}

#[tokio::test]
async fn test_edit_during_round_discards_results() {
    let transformer = Arc::new(ScriptedTransformer::new(&[("draft", "polished")]));
    let orchestrator = TransformationOrchestrator::new(transformer);

    let mut session = EditorSession::open(DocumentId::new(), "<p>the draft version</p>");
    session.handle_selection("draft");

    let generation = session.generation();
    let batch = orchestrator
        .run(session.selections().as_slice(), "polish", "", None)
        .await
        .unwrap();

    // User keeps typing while the round is in flight.
    session.handle_user_edit("<p>the rewritten version</p>");

    let err = session.apply_transformations(generation, batch).unwrap_err();
    assert_eq!(err, SessionError::StaleBatch);
    assert_eq!(session.plain_text(), "the rewritten version");
    assert!(!session.is_pending());
}

#[tokio::test]
async fn test_failed_round_leaves_selections_intact() {
    // Only one of the two selections is scripted, so the round fails.
    let transformer = Arc::new(ScriptedTransformer::new(&[("alpha", "A")]));
    let orchestrator = TransformationOrchestrator::new(transformer);

    let mut session = EditorSession::open(DocumentId::new(), "<p>alpha beta</p>");
    session.handle_selection("alpha");
    session.handle_selection("beta");

    let err = orchestrator
        .run(session.selections().as_slice(), "rewrite", "", None)
        .await
        .unwrap_err();
    assert!(matches!(err, TransformError::Api(_)));

    assert_eq!(session.selections().len(), 2);
    assert_eq!(session.plain_text(), "alpha beta");
    assert!(!session.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_slow_backend_times_out_whole_round() {
    struct Slow;

    #[async_trait]
    impl TextTransformer for Slow {
        async fn generate(&self, _request: GenerationRequest) -> Result<String, TransformError> {
            tokio::time::sleep(Duration::from_secs(120)).await;
            Ok("late".to_owned())
        }
    }

    let orchestrator =
        TransformationOrchestrator::new(Arc::new(Slow)).with_timeout(Duration::from_secs(10));

    let mut session = EditorSession::open(DocumentId::new(), "<p>waiting text</p>");
    session.handle_selection("waiting");

    let err = orchestrator
        .run(session.selections().as_slice(), "hurry", "", None)
        .await
        .unwrap_err();
    assert!(matches!(err, TransformError::Timeout(_)));
    assert_eq!(session.plain_text(), "waiting text");
}

#[tokio::test]
async fn test_one_call_per_selection() {
    let transformer = Arc::new(ScriptedTransformer::new(&[
        ("a", "x"),
        ("b", "y"),
        ("c", "z"),
    ]));
    let orchestrator = TransformationOrchestrator::new(transformer.clone());

    let mut session = EditorSession::open(DocumentId::new(), "<p>a b c</p>");
    session.handle_selection("a");
    session.handle_selection("b");
    session.handle_selection("c");

    let generation = session.generation();
    let batch = orchestrator
        .run(session.selections().as_slice(), "map", "", None)
        .await
        .unwrap();
    assert_eq!(transformer.calls.load(Ordering::SeqCst), 3);

    session.apply_transformations(generation, batch).unwrap();
    assert_eq!(session.plain_text(), "x y z");
}
