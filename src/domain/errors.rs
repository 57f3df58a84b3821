use thiserror::Error;

/// Failures of the translation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("Input text cannot be empty.")]
    EmptyInput,
    /// Any failure of the external prompt call: transport, auth, quota or an
    /// unusable model response.
    #[error("{0}")]
    TranslationFailure(String),
}

impl TranslateError {
    pub fn failure(err: impl std::fmt::Display) -> Self {
        TranslateError::TranslationFailure(err.to_string())
    }
}

/// Rejected review-workflow transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Please enter some Roman Punjabi text to translate.")]
    EmptyInput,
    #[error("A translation is already in progress")]
    RequestInFlight,
    #[error("There is no translation to accept")]
    NothingToAccept,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0} is empty")]
    NothingToExport(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
}

pub type TranslateResult<T> = Result<T, TranslateError>;
