use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskboardError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transition from {from} to {to} is not allowed")]
    InvalidTransition { from: String, to: String },

    #[error("Malformed drag payload: {0}")]
    MalformedPayload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

