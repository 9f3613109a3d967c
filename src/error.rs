//! Error types for DPPK operations.

use thiserror::Error;

/// Result type for DPPK operations.
pub type Result<T> = core::result::Result<T, DppkError>;

/// Errors that can occur during DPPK operations.
///
/// No operation retries internally; every failure is surfaced to the caller
/// unchanged. The single exception is the coefficient-distinctness resample
/// loop in key generation, which is not an error at all.
#[derive(Debug, Error)]
pub enum DppkError {
    /// The requested base polynomial degree is below the scheme minimum.
    #[error("order must be at least 5, got {0}")]
    OrderTooSmall(usize),

    /// The prime literal failed to parse as a positive base-10 integer.
    #[error("prime literal is not a positive base-10 integer")]
    InvalidPrime,

    /// The marker-encoded secret does not fit in GF(p).
    #[error("the secret to encrypt is not in GF(p)")]
    DataExceedsField,

    /// The public key coefficient vectors are malformed.
    #[error("public key coefficient vectors are malformed")]
    InvalidPublicKey,

    /// The ciphertext is missing a component.
    #[error("encrypted values cannot be null")]
    NullCiphertext,

    /// The decryption discriminant has no modular square root.
    #[error("discriminant is not a quadratic residue modulo p")]
    NoQuadraticResidue,

    /// The quadratic degenerated: `2a` has no modular inverse.
    #[error("quadratic coefficient has no modular inverse")]
    SingularQuadratic,

    /// A candidate root does not carry the secret marker prefix.
    #[error("candidate root lacks the secret marker")]
    InvalidSecretFormat,

    /// The host random number generator failed.
    #[error("random number generation failed")]
    Randomness(#[from] rand::Error),
}
