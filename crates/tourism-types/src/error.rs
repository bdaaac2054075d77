use thiserror::Error;

/// Errors that can occur when parsing governance types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    #[error("Unknown proposal status: {0}")]
    UnknownStatus(String),

    #[error("Unknown vote type: {0} (expected for, against or abstain)")]
    UnknownVoteType(String),
}
