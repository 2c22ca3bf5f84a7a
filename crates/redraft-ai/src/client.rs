//! The external AI collaborator interface.
//!
//! The wire contract is a tagged request enum and a `{result}` envelope;
//! exactly one round trip per call, no streaming. `TextTransformer` is
//! the seam a UI injects: HTTP-backed in production (`HttpTransformer`),
//! scripted in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// One generation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GenerationRequest {
    /// Rewrite a selected fragment under an instruction.
    #[serde(rename_all = "camelCase")]
    TextModification {
        original_text: String,
        instruction: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference_context: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    /// Free-form question over the document and reference material.
    #[serde(rename_all = "camelCase")]
    GeneralQuestion {
        instruction: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        document_content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference_context: Option<String>,
    },
}

/// Response envelope from the generation backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub result: String,
}

/// An asynchronous, fallible text transformer.
#[async_trait]
pub trait TextTransformer: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, TransformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_modification_wire_shape() {
        let request = GenerationRequest::TextModification {
            original_text: "skilled engineer".into(),
            instruction: "make it more senior-sounding".into(),
            reference_context: Some("resume notes".into()),
            language: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "text-modification");
        assert_eq!(value["originalText"], "skilled engineer");
        assert_eq!(value["referenceContext"], "resume notes");
        assert!(value.get("language").is_none());
    }

    #[test]
    fn test_general_question_wire_shape() {
        let request = GenerationRequest::GeneralQuestion {
            instruction: "summarize this".into(),
            document_content: Some("<p>body</p>".into()),
            reference_context: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "general-question");
        assert_eq!(value["documentContent"], "<p>body</p>");
    }

    #[test]
    fn test_request_round_trip() {
        let request = GenerationRequest::TextModification {
            original_text: "a".into(),
            instruction: "b".into(),
            reference_context: None,
            language: Some("German".into()),
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: GenerationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
