//! GF(p) arithmetic over arbitrary-precision integers.
//!
//! Every operation returns a canonical non-negative residue in `[0, p)`.
//! Subtraction is computed as `(a + (p - b)) % p` so intermediate values
//! never leave the unsigned domain.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

/// A borrowed view of the field modulus carrying the arithmetic.
///
/// Inputs are expected to already be canonical residues; `sub`, `neg` and
/// `sqrt` reduce their arguments first.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Gfp<'a> {
    p: &'a BigUint,
}

impl<'a> Gfp<'a> {
    pub fn new(p: &'a BigUint) -> Self {
        Gfp { p }
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % self.p
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + (self.p - (b % self.p))) % self.p
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % self.p
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        (self.p - (a % self.p)) % self.p
    }

    #[allow(dead_code)] // modpow passthrough, kept for adapter completeness
    pub fn pow(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        base.modpow(exp, self.p)
    }

    /// Modular inverse via the extended Euclidean algorithm.
    ///
    /// Returns `None` when `gcd(a, p) != 1`, in particular for `a == 0`.
    pub fn inv(&self, a: &BigUint) -> Option<BigUint> {
        let a = BigInt::from(a.clone());
        let p = BigInt::from(self.p.clone());
        let ext = a.extended_gcd(&p);
        if !ext.gcd.is_one() {
            return None;
        }
        ext.x.mod_floor(&p).to_biguint()
    }

    /// Modular square root, Tonelli-Shanks.
    ///
    /// Returns one root `r`; the other is `p - r`. `None` when `a` is a
    /// quadratic non-residue. Works for any odd prime modulus, with the
    /// usual `p == 3 (mod 4)` shortcut.
    pub fn sqrt(&self, a: &BigUint) -> Option<BigUint> {
        let p = self.p;
        let a = a % p;
        if a.is_zero() {
            return Some(BigUint::zero());
        }
        let one = BigUint::one();
        let p_minus_1 = p - &one;
        let euler = &p_minus_1 >> 1;
        if a.modpow(&euler, p) != one {
            return None;
        }
        if p % 4u32 == BigUint::from(3u32) {
            return Some(a.modpow(&((p + &one) >> 2), p));
        }

        // write p - 1 as q * 2^s with q odd
        let mut q = p_minus_1.clone();
        let mut s = 0u64;
        while q.is_even() {
            q >>= 1;
            s += 1;
        }

        // smallest quadratic non-residue
        let mut z = BigUint::from(2u32);
        while z.modpow(&euler, p) != p_minus_1 {
            z += 1u32;
        }

        let mut m = s;
        let mut c = z.modpow(&q, p);
        let mut t = a.modpow(&q, p);
        let mut r = a.modpow(&((&q + &one) >> 1), p);

        while !t.is_one() {
            // least i with t^(2^i) == 1; i < m is guaranteed for residues
            let mut i = 0u64;
            let mut t2i = t.clone();
            while !t2i.is_one() {
                t2i = (&t2i * &t2i) % p;
                i += 1;
                if i == m {
                    return None;
                }
            }
            let b = c.modpow(&(&one << (m - i - 1)), p);
            m = i;
            c = (&b * &b) % p;
            t = (&t * &c) % p;
            r = (&r * &b) % p;
        }
        Some(r)
    }

    /// Uniform sample in `[0, p)` by rejection, masking the excess bits of
    /// the top byte so roughly half the draws are accepted.
    pub fn rand_uniform<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<BigUint, rand::Error> {
        let bits = self.p.bits();
        let len = bits.div_ceil(8) as usize;
        let mask = 0xffu8 >> (len as u64 * 8 - bits);
        let mut buf = vec![0u8; len];
        loop {
            rng.try_fill_bytes(&mut buf)?;
            buf[0] &= mask;
            let candidate = BigUint::from_bytes_be(&buf);
            if candidate < *self.p {
                return Ok(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::test_rng;

    fn fp(p: u32) -> BigUint {
        BigUint::from(p)
    }

    fn u(v: u32) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn ring_laws_mod_977() {
        let p = fp(977);
        let f = Gfp::new(&p);
        for a in (0..977u32).step_by(61) {
            for b in (0..977u32).step_by(61) {
                let (a, b) = (u(a), u(b));
                // commutativity
                assert_eq!(f.add(&a, &b), f.add(&b, &a));
                assert_eq!(f.mul(&a, &b), f.mul(&b, &a));
                // sub is add of the negation
                assert_eq!(f.sub(&a, &b), f.add(&a, &f.neg(&b)));
                // canonical residues
                assert!(f.add(&a, &b) < p);
                assert!(f.sub(&a, &b) < p);
                assert!(f.mul(&a, &b) < p);
            }
        }
    }

    #[test]
    fn neg_is_additive_inverse() {
        let p = fp(977);
        let f = Gfp::new(&p);
        assert!(f.neg(&u(0)).is_zero());
        for a in 1..977u32 {
            let a = u(a);
            assert!(f.add(&a, &f.neg(&a)).is_zero());
        }
    }

    #[test]
    fn inv_properties() {
        let p = fp(977);
        let f = Gfp::new(&p);
        assert_eq!(f.inv(&u(0)), None);
        for a in 1..977u32 {
            let a = u(a);
            let inv_a = f.inv(&a).unwrap();
            assert!(f.mul(&a, &inv_a).is_one(), "inv({a}) failed");
            assert_eq!(f.inv(&inv_a).unwrap(), a);
        }
    }

    #[test]
    fn inv_rejects_composite_gcd() {
        // not a prime modulus: elements sharing a factor have no inverse
        let m = u(15);
        let f = Gfp::new(&m);
        assert_eq!(f.inv(&u(5)), None);
        assert_eq!(f.inv(&u(6)), None);
        assert!(f.mul(&u(7), &f.inv(&u(7)).unwrap()).is_one());
    }

    #[test]
    fn sqrt_mod_977_all_residues() {
        // 977 == 1 (mod 4): exercises the general Tonelli-Shanks path
        let p = fp(977);
        let f = Gfp::new(&p);
        let mut residues = 0;
        for a in 0..977u32 {
            let a = u(a);
            match f.sqrt(&a) {
                Some(r) => {
                    assert_eq!(f.mul(&r, &r), a, "sqrt({a})^2 != {a}");
                    residues += 1;
                }
                None => {
                    // Euler's criterion must agree
                    let euler = f.pow(&a, &u(488));
                    assert_eq!(euler, u(976));
                }
            }
        }
        // 0 plus (p - 1) / 2 squares
        assert_eq!(residues, 489);
    }

    #[test]
    fn sqrt_mod_983_all_residues() {
        // 983 == 3 (mod 4): exercises the shortcut path
        let p = fp(983);
        let f = Gfp::new(&p);
        for a in 0..983u32 {
            let a = u(a);
            if let Some(r) = f.sqrt(&a) {
                assert_eq!(f.mul(&r, &r), a);
            }
        }
    }

    #[test]
    fn rand_uniform_stays_in_range() {
        let p = fp(977);
        let f = Gfp::new(&p);
        let mut rng = test_rng();
        let mut seen_high = false;
        for _ in 0..500 {
            let v = f.rand_uniform(&mut rng).unwrap();
            assert!(v < p);
            seen_high |= v > u(488);
        }
        // a masked-but-unrejected sampler would never reach the top half
        assert!(seen_high);
    }

    #[test]
    fn rand_uniform_full_byte_modulus() {
        // p with bit length a multiple of 8: mask must keep all bits
        let p = u(65_521);
        let f = Gfp::new(&p);
        let mut rng = test_rng();
        for _ in 0..200 {
            assert!(f.rand_uniform(&mut rng).unwrap() < p);
        }
    }
}
