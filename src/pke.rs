//! DPPK keypair generation and the entangled-polynomial core.
//!
//! - Keygen samples two quadratic factors and a hidden base polynomial, then
//!   convolves them into the published coefficient vectors
//! - Encryption evaluates the two public polynomials at the encoded secret
//! - Decryption cancels the base polynomial by cross-multiplication and
//!   solves the remaining quadratic over GF(p)

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::{DppkError, Result};
use crate::gfp::Gfp;
use crate::param::{DEFAULT_PRIME, MIN_ORDER, parse_prime};

/// Public half of a DPPK keypair.
///
/// Holds the prime modulus and the coefficient vectors of the two entangled
/// polynomials `U(x) = Bn(x)·u(x)` and `V(x) = Bn(x)·v(x)`, published
/// without their constant and leading terms. For a base polynomial of
/// degree `n` each vector has `n + 1` entries: the coefficients of
/// `x^1 .. x^(n+1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) prime: BigUint,
    pub(crate) vector_u: Vec<BigUint>,
    pub(crate) vector_v: Vec<BigUint>,
}

/// Private half of a DPPK keypair.
///
/// Contains:
/// - s0: the constant term of the hidden base polynomial
/// - a0, a1: coefficients of the quadratic factor `u(x) = x² + a1·x + a0`
/// - b0, b1: coefficients of the quadratic factor `v(x) = x² + b1·x + b0`
/// - the public key (composition; the coefficient vectors are not duplicated)
#[derive(Clone, Debug)]
pub struct PrivateKey {
    pub(crate) s0: BigUint,
    pub(crate) a0: BigUint,
    pub(crate) a1: BigUint,
    pub(crate) b0: BigUint,
    pub(crate) b1: BigUint,
    pub(crate) public: PublicKey,
}

/// Ciphertext pair `(Ps, Qs)`: the two public polynomials evaluated at the
/// encoded secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub(crate) ps: BigUint,
    pub(crate) qs: BigUint,
}

impl PublicKey {
    /// Assembles a public key from its persisted fields, validating the
    /// vector invariants.
    pub fn new(prime: BigUint, vector_u: Vec<BigUint>, vector_v: Vec<BigUint>) -> Result<Self> {
        if vector_u.len() != vector_v.len() || vector_u.len() < MIN_ORDER + 1 {
            return Err(DppkError::InvalidPublicKey);
        }
        if vector_u.iter().chain(vector_v.iter()).any(|c| *c >= prime) {
            return Err(DppkError::InvalidPublicKey);
        }
        Ok(PublicKey {
            prime,
            vector_u,
            vector_v,
        })
    }

    /// The prime modulus of the field.
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// Published coefficients of `U(x)`, lowest power (`x^1`) first.
    pub fn vector_u(&self) -> &[BigUint] {
        &self.vector_u
    }

    /// Published coefficients of `V(x)`, lowest power (`x^1`) first.
    pub fn vector_v(&self) -> &[BigUint] {
        &self.vector_v
    }

    /// The order of the key: the degree of the hidden base polynomial.
    pub fn order(&self) -> usize {
        self.vector_u.len() - 1
    }

    /// Evaluates both public polynomials at the encoded secret `s`.
    ///
    /// # Algorithm
    /// 1. Reject secrets outside `[0, p)` and malformed vectors
    /// 2. Re-append the withheld leading coefficient (always 1) to each
    ///    vector
    /// 3. Accumulate `Ps = Σ U_ext[i]·s^(i+1)` and `Qs = Σ V_ext[i]·s^(i+1)`
    ///
    /// The running power starts at `s^1` because the constant coefficient is
    /// withheld from the public key; the decryptor adds it back.
    pub(crate) fn encrypt_secret(&self, secret: &BigUint) -> Result<Ciphertext> {
        if self.vector_u.len() != self.vector_v.len() || self.vector_u.is_empty() {
            return Err(DppkError::InvalidPublicKey);
        }
        if *secret >= self.prime {
            return Err(DppkError::DataExceedsField);
        }

        let field = Gfp::new(&self.prime);
        let leading = BigUint::one();
        let mut ps = BigUint::zero();
        let mut qs = BigUint::zero();
        let mut power = secret.clone();

        let u_ext = self.vector_u.iter().chain(core::iter::once(&leading));
        let v_ext = self.vector_v.iter().chain(core::iter::once(&leading));
        for (u_i, v_i) in u_ext.zip(v_ext) {
            ps = field.add(&ps, &field.mul(u_i, &power));
            qs = field.add(&qs, &field.mul(v_i, &power));
            power = field.mul(&power, secret);
        }

        Ok(Ciphertext { ps, qs })
    }
}

impl PrivateKey {
    /// Generates a keypair of the given order over the default prime field,
    /// drawing randomness from the operating system.
    pub fn generate(order: usize) -> Result<Self> {
        Self::generate_with_prime(order, DEFAULT_PRIME)
    }

    /// Generates a keypair over the field given by a base-10 prime literal.
    pub fn generate_with_prime(order: usize, prime: &str) -> Result<Self> {
        Self::generate_from_rng(&mut OsRng, order, prime)
    }

    /// Generates a keypair with an explicit randomness source.
    ///
    /// # Algorithm
    /// 1. Sample `a0, a1, b0, b1` uniformly; resample until pairwise distinct
    /// 2. Sample the base polynomial `B[0..n)` and fix `B[n] = 1` (monic)
    /// 3. Convolve the base polynomial with each quadratic factor to obtain
    ///    the degree-(n+2) coefficient vectors of `U(x)` and `V(x)`
    /// 4. Publish indices `1..=n+1` of each vector; retain `S0 = B[0]` and
    ///    the quadratic coefficients privately
    pub fn generate_from_rng<R: CryptoRng + RngCore>(
        rng: &mut R,
        order: usize,
        prime: &str,
    ) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(DppkError::OrderTooSmall(order));
        }
        let prime = parse_prime(prime)?;
        let field = Gfp::new(&prime);

        // Step 1: distinct quadratic coefficients
        let (a0, a1, b0, b1) = loop {
            let a0 = field.rand_uniform(rng)?;
            let a1 = field.rand_uniform(rng)?;
            let b0 = field.rand_uniform(rng)?;
            let b1 = field.rand_uniform(rng)?;
            let distinct =
                a0 != a1 && a0 != b0 && a0 != b1 && a1 != b0 && a1 != b1 && b0 != b1;
            if distinct {
                break (a0, a1, b0, b1);
            }
        };

        // Step 2: monic base polynomial of degree `order`
        let mut base = Vec::with_capacity(order + 1);
        for _ in 0..order {
            base.push(field.rand_uniform(rng)?);
        }
        base.push(BigUint::one());

        // Step 3: U = Bn·u and V = Bn·v by convolution with (x² + c1·x + c0)
        let mut vec_u = vec![BigUint::zero(); order + 3];
        let mut vec_v = vec![BigUint::zero(); order + 3];
        for (i, b_i) in base.iter().enumerate() {
            vec_u[i] = field.add(&vec_u[i], &field.mul(&a0, b_i));
            vec_u[i + 1] = field.add(&vec_u[i + 1], &field.mul(&a1, b_i));
            vec_u[i + 2] = field.add(&vec_u[i + 2], b_i);

            vec_v[i] = field.add(&vec_v[i], &field.mul(&b0, b_i));
            vec_v[i + 1] = field.add(&vec_v[i + 1], &field.mul(&b1, b_i));
            vec_v[i + 2] = field.add(&vec_v[i + 2], b_i);
        }

        // Step 4: withhold the constant and leading terms from the public key
        let s0 = base.swap_remove(0);
        vec_u.truncate(order + 2);
        vec_v.truncate(order + 2);
        vec_u.remove(0);
        vec_v.remove(0);

        Ok(PrivateKey {
            s0,
            a0,
            a1,
            b0,
            b1,
            public: PublicKey {
                prime,
                vector_u: vec_u,
                vector_v: vec_v,
            },
        })
    }

    /// Reassembles a private key from its persisted fields.
    ///
    /// The quadratic coefficients must be pairwise distinct and all parts
    /// must be canonical residues of the public key's field.
    pub fn from_parts(
        s0: BigUint,
        a0: BigUint,
        a1: BigUint,
        b0: BigUint,
        b1: BigUint,
        public: PublicKey,
    ) -> Result<Self> {
        let distinct = a0 != a1 && a0 != b0 && a0 != b1 && a1 != b0 && a1 != b1 && b0 != b1;
        let p = &public.prime;
        if !distinct || [&s0, &a0, &a1, &b0, &b1].into_iter().any(|c| c >= p) {
            return Err(DppkError::InvalidPublicKey);
        }
        Ok(PrivateKey {
            s0,
            a0,
            a1,
            b0,
            b1,
            public,
        })
    }

    /// The public half of the keypair.
    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    /// The retained constant term of the base polynomial.
    pub fn s0(&self) -> &BigUint {
        &self.s0
    }

    /// Coefficients of the private quadratic factors, as
    /// `(a0, a1, b0, b1)`.
    pub fn factors(&self) -> (&BigUint, &BigUint, &BigUint, &BigUint) {
        (&self.a0, &self.a1, &self.b0, &self.b1)
    }

    /// Recovers the two candidate roots of a ciphertext.
    ///
    /// # Algorithm
    /// 1. Restore the full polynomial values by adding back the withheld
    ///    constant terms: `polyP = Ps + S0·A0`, `polyQ = Qs + S0·B0`
    /// 2. Cross-multiply `u(x)·polyQ == v(x)·polyP` into a quadratic
    ///    `a·x² + b·x + c == 0` over GF(p); the base polynomial cancels
    /// 3. Solve it: `x = (-b ± √(b² - 4ac)) · (2a)⁻¹`
    ///
    /// Exactly one of the returned roots is the encoded secret; the caller
    /// disambiguates via the marker prefix.
    pub fn decrypt(&self, ct: &Ciphertext) -> Result<(BigUint, BigUint)> {
        let field = Gfp::new(&self.public.prime);

        // Step 1: full polynomial values
        let poly_p = field.add(&ct.ps, &field.mul(&self.s0, &self.a0));
        let poly_q = field.add(&ct.qs, &field.mul(&self.s0, &self.b0));

        // Step 2: quadratic coefficients
        let a = field.sub(&poly_q, &poly_p);
        let b = field.sub(
            &field.mul(&self.a1, &poly_q),
            &field.mul(&self.b1, &poly_p),
        );
        let c = field.sub(
            &field.mul(&self.a0, &poly_q),
            &field.mul(&self.b0, &poly_p),
        );

        // Step 3: discriminant and roots
        let four_ac = field.mul(&BigUint::from(4u32), &field.mul(&a, &c));
        let disc = field.sub(&field.mul(&b, &b), &four_ac);
        let root = field.sqrt(&disc).ok_or(DppkError::NoQuadraticResidue)?;

        let two_a = field.mul(&BigUint::from(2u32), &a);
        let inv_2a = field.inv(&two_a).ok_or(DppkError::SingularQuadratic)?;

        let neg_b = field.neg(&b);
        let x1 = field.mul(&field.sub(&neg_b, &root), &inv_2a);
        let x2 = field.mul(&field.add(&neg_b, &root), &inv_2a);
        Ok((x1, x2))
    }
}

impl Ciphertext {
    /// Assembles a ciphertext from its two field elements.
    pub fn new(ps: BigUint, qs: BigUint) -> Self {
        Ciphertext { ps, qs }
    }

    /// The evaluation of `U` at the secret.
    pub fn ps(&self) -> &BigUint {
        &self.ps
    }

    /// The evaluation of `V` at the secret.
    pub fn qs(&self) -> &BigUint {
        &self.qs
    }

    /// Serializes the ciphertext to bytes.
    /// Format: len(Ps) || Ps || len(Qs) || Qs, lengths as 4-byte big-endian
    /// prefixes (components are runtime-sized).
    pub fn to_bytes(&self) -> Vec<u8> {
        let ps = self.ps.to_bytes_be();
        let qs = self.qs.to_bytes_be();
        let mut bytes = Vec::with_capacity(8 + ps.len() + qs.len());
        bytes.extend_from_slice(&(ps.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&ps);
        bytes.extend_from_slice(&(qs.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&qs);
        bytes
    }

    /// Deserializes a ciphertext produced by [`Ciphertext::to_bytes`].
    ///
    /// A truncated buffer, i.e. a missing or partial component, is rejected
    /// as [`DppkError::NullCiphertext`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (ps, rest) = take_component(bytes)?;
        let (qs, rest) = take_component(rest)?;
        if !rest.is_empty() {
            return Err(DppkError::NullCiphertext);
        }
        Ok(Ciphertext { ps, qs })
    }
}

fn take_component(bytes: &[u8]) -> Result<(BigUint, &[u8])> {
    if bytes.len() < 4 {
        return Err(DppkError::NullCiphertext);
    }
    let (prefix, rest) = bytes.split_at(4);
    let mut len = [0u8; 4];
    len.copy_from_slice(prefix);
    let len = u32::from_be_bytes(len) as usize;
    if rest.len() < len {
        return Err(DppkError::NullCiphertext);
    }
    let (component, rest) = rest.split_at(len);
    Ok((BigUint::from_bytes_be(component), rest))
}
