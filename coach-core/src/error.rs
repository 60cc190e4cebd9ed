use thiserror::Error;

/// Error returned by chain handlers.
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Unauthorized access")]
    Unauthorized,
}

pub type Result<T> = std::result::Result<T, CoachError>;
