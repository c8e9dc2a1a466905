//! Error types for the classifier library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Input vector length does not match the network's input size
    #[error("Invalid input: expected {expected} features, got {actual}")]
    InvalidInput { expected: usize, actual: usize },

    /// Training or evaluation was asked to run over zero samples
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Sample label is not a valid class index
    #[error("Label {label} out of range for {num_classes} classes")]
    LabelOutOfRange { label: usize, num_classes: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
