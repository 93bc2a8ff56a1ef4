//! Error types for corefview.

use thiserror::Error;

/// Result type for corefview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for corefview operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Model loading failed.
    #[error("Model initialization failed: {0}")]
    ModelInit(String),

    /// A stage with this name is already attached to the pipeline.
    #[error("Pipeline already has a stage named '{0}'")]
    DuplicateStage(String),

    /// Pipeline stage failed while processing a document.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Invalid input provided (form values, CLI arguments).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a model initialization error.
    pub fn model_init(msg: impl Into<String>) -> Self {
        Error::ModelInit(msg.into())
    }

    /// Create an inference error.
    pub fn inference(msg: impl Into<String>) -> Self {
        Error::Inference(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// True if the error was caused by the caller's input rather than the system.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}
