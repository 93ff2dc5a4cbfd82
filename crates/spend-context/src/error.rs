//! error types for spend-context

use thiserror::Error;

use crate::purpose::SpendPurpose;

pub type Result<T> = std::result::Result<T, SpendContextError>;

/// every error here rejects the enclosing proof or transaction outright
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpendContextError {
    /// byte outside the assigned purpose values
    #[error("invalid spend purpose tag: {0:#04x}")]
    InvalidTag(u8),

    /// proof binding does not match the purpose the verifier expects
    #[error("proof is not bound to the expected spend purpose ({expected})")]
    WrongContext { expected: SpendPurpose },

    #[error("malformed public context: {0}")]
    MalformedContext(&'static str),

    #[error("malformed proof envelope: {0}")]
    MalformedProof(&'static str),

    #[error("unsupported envelope version: {0}")]
    UnsupportedVersion(u8),

    #[error("unknown spend purpose: {0:?}")]
    UnknownPurpose(String),

    #[error("unknown transaction kind: {0:?}")]
    UnknownTransactionKind(String),

    #[error("unknown challenge hash: {0:?}")]
    UnknownChallengeHash(String),
}
