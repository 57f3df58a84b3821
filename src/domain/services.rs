//! Translation services for the notes workspace.
//!
//! This module defines the seam to the hosted language model and the
//! boundary action that turns every outcome of that call into a
//! [`TranslationResult`].

use super::errors::{TranslateError, TranslateResult};
use super::models::{is_blank, TranslateInput, TranslateOutput, TranslationResult};
use std::sync::Arc;

/// Instruction sent ahead of the user's text. The text itself is appended
/// verbatim.
pub const TRANSLATION_PROMPT: &str =
    "Translate the following Romanized Punjabi into formal Gurmukhi Punjabi:";

/// Renders the full prompt for one request.
///
/// # Examples
///
/// ```
/// use lipiantar::domain::{render_prompt, TranslateInput};
///
/// let input = TranslateInput { roman_punjabi_text: "Ho jadd vi bole".to_string() };
/// assert!(render_prompt(&input).ends_with("\n\nHo jadd vi bole"));
/// ```
pub fn render_prompt(input: &TranslateInput) -> String {
    format!("{}\n\n{}", TRANSLATION_PROMPT, input.roman_punjabi_text)
}

/// A single call to a hosted model that translates Roman Punjabi into
/// Gurmukhi.
///
/// Implementations make exactly one attempt per call and report every
/// failure as [`TranslateError::TranslationFailure`].
pub trait PromptInvoker: Send + Sync {
    fn display_name(&self) -> &str;
    fn invoke(&self, input: &TranslateInput) -> TranslateResult<TranslateOutput>;
}

/// The translation boundary action.
///
/// Validates input, calls the [`PromptInvoker`] and converts any failure
/// into a user-facing message. It never returns an `Err` and never panics on
/// model failures.
#[derive(Clone)]
pub struct TranslationService {
    invoker: Arc<dyn PromptInvoker>,
}

impl TranslationService {
    pub fn new(invoker: Arc<dyn PromptInvoker>) -> Self {
        Self { invoker }
    }

    pub fn provider_name(&self) -> &str {
        self.invoker.display_name()
    }

    /// Translates `roman_text`, returning either the Gurmukhi text or an
    /// error message.
    ///
    /// Blank input is rejected without calling the model.
    pub fn translate(&self, roman_text: &str) -> TranslationResult {
        if is_blank(roman_text) {
            tracing::warn!("Rejected blank translation input");
            return TranslationResult::failed(TranslateError::EmptyInput.to_string());
        }

        let input = TranslateInput {
            roman_punjabi_text: roman_text.to_string(),
        };
        match self.invoker.invoke(&input) {
            Ok(output) => TranslationResult::translated(output.gurmukhi_punjabi_text),
            Err(err) => {
                tracing::error!(provider = self.provider_name(), "Translation error: {}", err);
                TranslationResult::failed(format!(
                    "Failed to translate text: {}. Please try again.",
                    err
                ))
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedInvoker;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_translate_success() {
        let invoker = Arc::new(ScriptedInvoker::replying("ਹੋ ਜਦ ਵੀ ਬੋਲੇ"));
        let service = TranslationService::new(invoker.clone());

        let result = service.translate("Ho jadd vi bole");

        assert_eq!(result, TranslationResult::translated("ਹੋ ਜਦ ਵੀ ਬੋਲੇ"));
        assert_eq!(*invoker.calls.lock().unwrap(), vec!["Ho jadd vi bole".to_string()]);
    }

    #[test]
    fn test_translate_blank_input_never_calls_model() {
        let invoker = Arc::new(ScriptedInvoker::replying("unused"));
        let service = TranslationService::new(invoker.clone());

        for blank in ["", "   ", "\n\t ", "\u{FEFF}", " \u{FEFF} "] {
            assert_eq!(
                service.translate(blank),
                TranslationResult::failed("Input text cannot be empty.")
            );
        }
        assert_eq!(invoker.call_count(), 0);
    }

    #[test]
    fn test_translate_failure_is_wrapped() {
        let invoker = Arc::new(ScriptedInvoker::failing("quota exceeded"));
        let service = TranslationService::new(invoker);

        assert_eq!(
            service.translate("kiddan"),
            TranslationResult::failed("Failed to translate text: quota exceeded. Please try again.")
        );
    }

    #[test]
    fn test_input_passed_verbatim() {
        let invoker = Arc::new(ScriptedInvoker::replying("ਠੀਕ"));
        let service = TranslationService::new(invoker.clone());

        service.translate("  {{tricky}} \"quotes\"\n");

        assert_eq!(
            invoker.calls.lock().unwrap()[0],
            "  {{tricky}} \"quotes\"\n"
        );
    }

    #[test]
    fn test_render_prompt() {
        let input = TranslateInput {
            roman_punjabi_text: "Ho jadd vi bole".to_string(),
        };
        assert_eq!(
            render_prompt(&input),
            "Translate the following Romanized Punjabi into formal Gurmukhi Punjabi:\n\nHo jadd vi bole"
        );
    }
}
