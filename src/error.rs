use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DhParamsError {
    #[error("secure random source unavailable")]
    RandomSourceUnavailable,
    #[error("no valid (p, q) found (seed_attempts={seed_attempts})")]
    GenerationExhausted { seed_attempts: usize },
    #[error("no generator found (draws={draws})")]
    SelectionExhausted { draws: usize },
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

pub type Result<T> = std::result::Result<T, DhParamsError>;
