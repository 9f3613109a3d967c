//! Field constants and prime-literal parsing.
//!
//! The default modulus is the 2048-bit prime published with the reference
//! DPPK parameters. Any other positive base-10 literal may be supplied
//! through [`PrivateKey::generate_with_prime`](crate::PrivateKey::generate_with_prime).

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{DppkError, Result};

/// The default prime modulus, a 2048-bit prime formatted in base 10.
pub const DEFAULT_PRIME: &str = "32317006071311007300714876688669951960444102669715484032130345427524655138867890893197201411522913463688717960921898019494119559150490921095088152386448283120630877367300996091750197750389652106796057638384067568276792218642619756161838094338476170470581645852036305042887575891541065808607552399123930385521914333389668342420684974786564569494856176035326322058077805659331026192708460314150258592864177116725943603718461857357598351152301645904403697613233287231227125684710820209725157101726931323469678542580656697935045997268352998638215525166389437335543602135433229604645318478604952148193555853611059596231637";

/// Minimum degree of the base polynomial.
pub(crate) const MIN_ORDER: usize = 5;

/// Parses a base-10 literal into a field modulus.
///
/// Only positivity is checked here; primality is the caller's contract,
/// matching the reference parameters.
pub(crate) fn parse_prime(literal: &str) -> Result<BigUint> {
    BigUint::parse_bytes(literal.trim().as_bytes(), 10)
        .filter(|p| !p.is_zero())
        .ok_or(DppkError::InvalidPrime)
}
