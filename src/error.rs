use thiserror::Error;

pub type TranslatorResult<T> = Result<T, TranslatorError>;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Translator API error: {status} {body}")]
    Provider { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed translator response: {0}")]
    MalformedResponse(String),

    #[error("Missing credential: {0} is not configured")]
    MissingCredential(&'static str),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Workbook error: {0}")]
    Workbook(String),
}

impl TranslatorError {
    /// True for errors caused by the caller's input rather than the provider or environment.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::SheetNotFound(_) | Self::InvalidInput(_))
    }

    /// True for errors raised while talking to the translation provider.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Provider { .. } | Self::Network(_) | Self::MalformedResponse(_)
        )
    }
}
