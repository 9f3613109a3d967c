#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//!
//! # Security Warning
//!
//! **DO NOT USE THIS LIBRARY IN PRODUCTION.**
//!
//! This is a research implementation for learning and experimentation.
//! It has not been audited, performs big-integer arithmetic that is not
//! constant-time, and provides no security guarantees. Encryption is
//! deterministic: the same message under the same public key always yields
//! the same ciphertext pair.
//!
//! # Usage
//!
//! ```
//! use dppk::PrivateKey;
//!
//! let key = PrivateKey::generate(10)?;
//! let ct = key.public().encrypt(b"hello quantum")?;
//! let msg = key.decrypt_message(&ct)?;
//! assert_eq!(msg, b"hello quantum");
//! # Ok::<(), dppk::DppkError>(())
//! ```

#[cfg(test)]
mod test_util;

/// GF(p) arithmetic
mod gfp;

/// field constants and prime parsing
mod param;

/// error taxonomy
mod error;

/// keypair generation and the polynomial core
mod pke;

/// message encoding and root disambiguation
pub mod kem;

pub use error::{DppkError, Result};
pub use param::DEFAULT_PRIME;
pub use pke::{Ciphertext, PrivateKey, PublicKey};
