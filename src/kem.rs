//! Message encoding and root disambiguation.
//!
//! Decryption of a DPPK ciphertext yields two candidate roots and no
//! intrinsic way to tell which one carries the plaintext. Encryption
//! therefore prepends a fixed 4-byte marker before interpreting the message
//! as a field element; recovery checks the marker and strips it. The marker
//! also preserves leading zero bytes of the plaintext, which a bare
//! big-endian integer conversion would drop.

use num_bigint::BigUint;
use subtle::ConstantTimeEq;

use crate::error::{DppkError, Result};
use crate::pke::{Ciphertext, PrivateKey, PublicKey};

/// The 4-byte sentinel prepended to every plaintext.
///
/// A fixed format discriminator with no cryptographic property claimed; an
/// unrelated root matches it with probability about 2⁻³².
pub const SECRET_MARKER: [u8; 4] = [0x5F, 0x37, 0x59, 0xDF];

/// Encodes a plaintext as a field-element candidate: marker, then message,
/// read as a big-endian integer.
pub(crate) fn encode_message(msg: &[u8]) -> BigUint {
    let mut buf = Vec::with_capacity(SECRET_MARKER.len() + msg.len());
    buf.extend_from_slice(&SECRET_MARKER);
    buf.extend_from_slice(msg);
    BigUint::from_bytes_be(&buf)
}

/// Verifies the marker prefix of a candidate root and strips it.
///
/// The candidate is serialized big-endian without padding; it must begin
/// with [`SECRET_MARKER`] or [`DppkError::InvalidSecretFormat`] is returned.
pub fn recover_message(candidate: &BigUint) -> Result<Vec<u8>> {
    let bytes = candidate.to_bytes_be();
    if bytes.len() < SECRET_MARKER.len() {
        return Err(DppkError::InvalidSecretFormat);
    }
    let (prefix, msg) = bytes.split_at(SECRET_MARKER.len());
    if bool::from(prefix.ct_eq(&SECRET_MARKER)) {
        Ok(msg.to_vec())
    } else {
        Err(DppkError::InvalidSecretFormat)
    }
}

impl PublicKey {
    /// Encrypts a message into a ciphertext pair.
    ///
    /// The marker-encoded message must fit in the field: for the default
    /// 2048-bit prime that allows about 250 message bytes; tiny primes may
    /// not even fit the marker, in which case encryption fails with
    /// [`DppkError::DataExceedsField`].
    pub fn encrypt(&self, msg: &[u8]) -> Result<Ciphertext> {
        self.encrypt_secret(&encode_message(msg))
    }
}

impl PrivateKey {
    /// Decrypts a ciphertext and recovers the plaintext.
    ///
    /// Tries the first candidate root, then the second; returns the first
    /// that passes marker verification, or
    /// [`DppkError::InvalidSecretFormat`] when neither does.
    pub fn decrypt_message(&self, ct: &Ciphertext) -> Result<Vec<u8>> {
        let (x1, x2) = self.decrypt(ct)?;
        recover_message(&x1).or_else(|_| recover_message(&x2))
    }
}
