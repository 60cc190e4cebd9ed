use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Verification code is required")]
    EmptyCode,

    #[error("No pending verification code for this number")]
    NoPendingCode,

    #[error("Verification code does not match")]
    CodeMismatch,
}

pub type Result<T> = std::result::Result<T, VerificationError>;
