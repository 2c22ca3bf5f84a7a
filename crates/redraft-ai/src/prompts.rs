//! Prompt construction for the text-modification call.

use std::fmt::Write as _;

/// Model parameters for the generation backend.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformerConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_owned(),
            temperature: 0.7,
            max_tokens: 2048,
        }
    }
}

/// Inputs for one modification prompt.
#[derive(Clone, Copy, Debug)]
pub struct ModificationPrompt<'a> {
    pub original_text: &'a str,
    pub instruction: &'a str,
    pub reference_context: Option<&'a str>,
    pub language: Option<&'a str>,
}

/// Render the prompt sent to the model for a text-modification request.
///
/// The rules matter for the substitution engine downstream: the model is
/// told to return only the modified text (no commentary), to keep the
/// original's language and capitalization, and to stay close to the
/// original length unless instructed otherwise.
pub fn modification_prompt(params: &ModificationPrompt<'_>) -> String {
    let mut prompt = String::from(
        "You are a professional writing assistant. The user has selected some text \
         and wants you to modify it.\n",
    );
    if let Some(language) = params.language {
        let _ = writeln!(
            prompt,
            "\nIMPORTANT: The original text is in {language}. You MUST respond in \
             {language}, regardless of what language the user instruction is written in."
        );
    }
    if let Some(context) = params.reference_context {
        let _ = writeln!(
            prompt,
            "\nReference Context (use this information to inform your modifications):\n{context}"
        );
    }
    let _ = write!(
        prompt,
        "\nOriginal Text:\n{original}\n\nUser Instruction:\n{instruction}\n\n\
         Instructions:\n\
         1. Modify the text according to the user's instruction\n\
         2. {language_rule}\n\
         3. Use the reference context (if provided) to inform your modifications\n\
         4. Maintain the same general structure and length unless instructed otherwise\n\
         5. Preserve the capitalization pattern of the original text: if it starts \
         lowercase, your response must also start lowercase\n\
         6. Keep a professional tone\n\
         7. Return ONLY the modified text\n\
         8. Do not include any explanations or additional commentary\n\n\
         Modified Text:",
        original = params.original_text,
        instruction = params.instruction,
        language_rule = match params.language {
            Some(language) => format!(
                "CRITICAL: Your response MUST be in {language}; the instruction's language does not matter"
            ),
            None => "Maintain the same language as the original text".to_owned(),
        },
    );
    prompt
}
