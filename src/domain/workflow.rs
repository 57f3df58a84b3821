//! The translate-and-review state machine.
//!
//! A [`ReviewWorkflow`] owns the Roman-Punjabi source buffer and the Gurmukhi
//! notes buffer, and moves between the states of [`WorkflowState`] only
//! through the methods below. The review surface is open whenever the state
//! is not [`WorkflowState::Idle`].

use super::errors::WorkflowError;
use super::models::{is_blank, RequestToken, TextBuffer, TranslationRequest, TranslationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    /// A request is in flight. `original` is the text that was submitted.
    Translating {
        token: RequestToken,
        original: String,
    },
    ReviewReady {
        original: String,
        translated: String,
    },
    ReviewError {
        original: String,
        message: String,
    },
}

impl WorkflowState {
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "Idle",
            WorkflowState::Translating { .. } => "Translating",
            WorkflowState::ReviewReady { .. } => "Review",
            WorkflowState::ReviewError { .. } => "Error",
        }
    }
}

/// What happened to a response handed to [`ReviewWorkflow::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Ready,
    Failed(String),
    /// The response belonged to a request the workflow no longer waits for.
    Stale,
}

#[derive(Debug)]
pub struct ReviewWorkflow {
    state: WorkflowState,
    source: TextBuffer,
    notes: TextBuffer,
    last_token: u64,
}

impl Default for ReviewWorkflow {
    fn default() -> Self {
        Self {
            state: WorkflowState::Idle,
            source: TextBuffer::default(),
            notes: TextBuffer::default(),
            last_token: 0,
        }
    }
}

impl ReviewWorkflow {
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn source(&self) -> &TextBuffer {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut TextBuffer {
        &mut self.source
    }

    pub fn notes(&self) -> &TextBuffer {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut TextBuffer {
        &mut self.notes
    }

    pub fn is_surface_open(&self) -> bool {
        !matches!(self.state, WorkflowState::Idle)
    }

    pub fn is_translating(&self) -> bool {
        matches!(self.state, WorkflowState::Translating { .. })
    }

    /// Translate is offered from Idle and from either review state.
    pub fn can_translate(&self) -> bool {
        !self.is_translating()
    }

    pub fn can_accept(&self) -> bool {
        self.translated_text().is_some()
    }

    /// The stored translation, present only in ReviewReady.
    pub fn translated_text(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::ReviewReady { translated, .. } => Some(translated),
            _ => None,
        }
    }

    /// The text that was submitted for the current review, if any.
    pub fn original_text(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::Idle => None,
            WorkflowState::Translating { original, .. }
            | WorkflowState::ReviewReady { original, .. }
            | WorkflowState::ReviewError { original, .. } => Some(original),
        }
    }

    /// Starts a translation of the current source text.
    ///
    /// On success the workflow is in Translating and the returned request
    /// must be dispatched. Any previous result is discarded.
    pub fn translate(&mut self) -> Result<TranslationRequest, WorkflowError> {
        if self.is_translating() {
            return Err(WorkflowError::RequestInFlight);
        }
        if self.source.is_blank() {
            return Err(WorkflowError::EmptyInput);
        }

        self.last_token += 1;
        let token = RequestToken(self.last_token);
        let original = self.source.text().to_string();
        self.state = WorkflowState::Translating {
            token,
            original: original.clone(),
        };

        Ok(TranslationRequest {
            token,
            roman_text: original,
        })
    }

    /// Applies a response if it matches the in-flight request.
    pub fn resolve(&mut self, token: RequestToken, result: TranslationResult) -> Resolution {
        let original = match &self.state {
            WorkflowState::Translating {
                token: current,
                original,
            } if *current == token => original.clone(),
            _ => return Resolution::Stale,
        };

        match result {
            TranslationResult::Translated { gurmukhi_text } if !is_blank(&gurmukhi_text) => {
                self.state = WorkflowState::ReviewReady {
                    original,
                    translated: gurmukhi_text,
                };
                Resolution::Ready
            }
            TranslationResult::Translated { .. } => {
                let message = "Translation returned no text. Please try again.".to_string();
                self.state = WorkflowState::ReviewError {
                    original,
                    message: message.clone(),
                };
                Resolution::Failed(message)
            }
            TranslationResult::Failed { error } => {
                self.state = WorkflowState::ReviewError {
                    original,
                    message: error.clone(),
                };
                Resolution::Failed(error)
            }
        }
    }

    /// Copies the stored translation into the notes buffer and closes the
    /// review.
    pub fn accept(&mut self) -> Result<(), WorkflowError> {
        let WorkflowState::ReviewReady { translated, .. } = &self.state else {
            return Err(WorkflowError::NothingToAccept);
        };
        self.notes.set_text(translated.as_str());
        self.state = WorkflowState::Idle;
        Ok(())
    }

    /// Closes the review surface, discarding any result. A request still in
    /// flight will resolve as stale.
    pub fn cancel(&mut self) {
        self.state = WorkflowState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn workflow_with(source: &str) -> ReviewWorkflow {
        let mut workflow = ReviewWorkflow::default();
        workflow.source_mut().set_text(source);
        workflow
    }

    #[test]
    fn test_initial_state() {
        let workflow = ReviewWorkflow::default();
        assert_eq!(*workflow.state(), WorkflowState::Idle);
        assert!(!workflow.is_surface_open());
        assert!(workflow.can_translate());
        assert!(!workflow.can_accept());
    }

    #[test]
    fn test_blank_source_stays_idle() {
        for blank in ["", "   ", "\n"] {
            let mut workflow = workflow_with(blank);
            assert_eq!(workflow.translate(), Err(WorkflowError::EmptyInput));
            assert_eq!(*workflow.state(), WorkflowState::Idle);
        }
    }

    #[test]
    fn test_translate_enters_translating() {
        let mut workflow = workflow_with("Ho jadd vi bole");

        let request = workflow.translate().unwrap();

        assert_eq!(request.roman_text, "Ho jadd vi bole");
        assert!(workflow.is_translating());
        assert!(workflow.is_surface_open());
        assert!(!workflow.can_translate());
        assert_eq!(workflow.original_text(), Some("Ho jadd vi bole"));
    }

    #[test]
    fn test_no_second_dispatch_while_translating() {
        let mut workflow = workflow_with("kiddan");
        workflow.translate().unwrap();

        assert_eq!(workflow.translate(), Err(WorkflowError::RequestInFlight));
    }

    #[test]
    fn test_full_accept_flow() {
        let mut workflow = workflow_with("Ho jadd vi bole");
        let request = workflow.translate().unwrap();

        let resolution = workflow.resolve(request.token, TranslationResult::translated("ਹੋ ਜਦ ਵੀ ਬੋਲੇ"));
        assert_eq!(resolution, Resolution::Ready);
        assert_eq!(workflow.translated_text(), Some("ਹੋ ਜਦ ਵੀ ਬੋਲੇ"));

        workflow.accept().unwrap();

        assert_eq!(workflow.notes().text(), "ਹੋ ਜਦ ਵੀ ਬੋਲੇ");
        assert_eq!(workflow.source().text(), "Ho jadd vi bole");
        assert_eq!(*workflow.state(), WorkflowState::Idle);
    }

    #[test]
    fn test_accept_overwrites_notes() {
        let mut workflow = workflow_with("sat sri akal");
        workflow.notes_mut().set_text("old notes");
        let request = workflow.translate().unwrap();
        workflow.resolve(request.token, TranslationResult::translated("ਸਤ ਸ੍ਰੀ ਅਕਾਲ"));

        workflow.accept().unwrap();

        assert_eq!(workflow.notes().text(), "ਸਤ ਸ੍ਰੀ ਅਕਾਲ");
    }

    #[test]
    fn test_empty_result_is_error() {
        for empty in ["", "  "] {
            let mut workflow = workflow_with("kiddan");
            let request = workflow.translate().unwrap();

            let resolution = workflow.resolve(request.token, TranslationResult::translated(empty));

            assert!(matches!(resolution, Resolution::Failed(_)));
            assert!(matches!(workflow.state(), WorkflowState::ReviewError { .. }));
            assert_eq!(workflow.translated_text(), None);
            assert!(!workflow.can_accept());
            assert_eq!(workflow.accept(), Err(WorkflowError::NothingToAccept));
        }
    }

    #[test]
    fn test_failure_reaches_review_error() {
        let mut workflow = workflow_with("kiddan");
        workflow.notes_mut().set_text("keep me");
        let request = workflow.translate().unwrap();

        let resolution = workflow.resolve(request.token, TranslationResult::failed("network down"));

        assert_eq!(resolution, Resolution::Failed("network down".to_string()));
        assert_eq!(
            *workflow.state(),
            WorkflowState::ReviewError {
                original: "kiddan".to_string(),
                message: "network down".to_string(),
            }
        );

        workflow.cancel();
        assert_eq!(*workflow.state(), WorkflowState::Idle);
        assert_eq!(workflow.notes().text(), "keep me");
    }

    #[test]
    fn test_cancel_from_ready_leaves_notes() {
        let mut workflow = workflow_with("kiddan");
        let request = workflow.translate().unwrap();
        workflow.resolve(request.token, TranslationResult::translated("ਕਿੱਦਾਂ"));

        workflow.cancel();

        assert_eq!(*workflow.state(), WorkflowState::Idle);
        assert!(workflow.notes().text().is_empty());
    }

    #[test]
    fn test_stale_response_after_cancel_is_discarded() {
        let mut workflow = workflow_with("kiddan");
        let request = workflow.translate().unwrap();
        workflow.cancel();

        let resolution = workflow.resolve(request.token, TranslationResult::translated("ਕਿੱਦਾਂ"));

        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(*workflow.state(), WorkflowState::Idle);
    }

    #[test]
    fn test_stale_response_from_earlier_request_is_discarded() {
        let mut workflow = workflow_with("first");
        let first = workflow.translate().unwrap();
        workflow.cancel();
        workflow.source_mut().set_text("second");
        let second = workflow.translate().unwrap();
        assert!(second.token > first.token);

        assert_eq!(
            workflow.resolve(first.token, TranslationResult::translated("ਪਹਿਲਾ")),
            Resolution::Stale
        );
        assert!(workflow.is_translating());

        assert_eq!(
            workflow.resolve(second.token, TranslationResult::translated("ਦੂਜਾ")),
            Resolution::Ready
        );
        assert_eq!(workflow.translated_text(), Some("ਦੂਜਾ"));
    }

    #[test]
    fn test_retranslate_from_review_states() {
        let mut workflow = workflow_with("kiddan");
        let request = workflow.translate().unwrap();
        workflow.resolve(request.token, TranslationResult::translated("ਕਿੱਦਾਂ"));

        let again = workflow.translate().unwrap();
        assert!(workflow.is_translating());
        assert_eq!(workflow.translated_text(), None);

        workflow.resolve(again.token, TranslationResult::failed("oops"));
        assert!(workflow.translate().is_ok());
    }

    #[test]
    fn test_accept_requires_review_ready() {
        let mut workflow = workflow_with("kiddan");
        assert_eq!(workflow.accept(), Err(WorkflowError::NothingToAccept));

        workflow.translate().unwrap();
        assert_eq!(workflow.accept(), Err(WorkflowError::NothingToAccept));
        assert!(workflow.is_translating());
    }
}
