//! Error types for masal-spk

use thiserror::Error;

/// Speech synthesis errors
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Request failed a schema constraint (empty text, override out of range).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown voice_id: {0}")]
    UnknownVoice(String),

    /// The model refused the resolved parameter combination.
    /// Carries the model's own message so the caller can adjust inputs.
    #[error("generate() parameters incompatible: {0}")]
    IncompatibleParameters(String),

    #[error("Model not loaded: {0}")]
    ModelUnavailable(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpeechError {
    /// Whether the caller can fix this error by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SpeechError::Validation(_)
                | SpeechError::UnknownVoice(_)
                | SpeechError::IncompatibleParameters(_)
        )
    }
}
