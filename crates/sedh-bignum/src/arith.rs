//! Arithmetic on unsigned big integers.

use crate::uint::{Uint, LIMB_BITS};
use sedh_types::CryptoError;
use std::cmp::Ordering;

impl Uint {
    /// Sum of two values.
    pub fn add(&self, other: &Uint) -> Uint {
        let (a, b) = (self.limbs(), other.limbs());
        let n = a.len().max(b.len());
        let mut out = vec![0u64; n + 1];
        let mut carry = 0u64;
        for (i, slot) in out.iter_mut().enumerate().take(n) {
            let av = *a.get(i).unwrap_or(&0) as u128;
            let bv = *b.get(i).unwrap_or(&0) as u128;
            let sum = av + bv + carry as u128;
            *slot = sum as u64;
            carry = (sum >> LIMB_BITS) as u64;
        }
        out[n] = carry;
        Uint::from_limbs(out)
    }

    /// Difference, or `None` when `other` exceeds `self`.
    pub fn checked_sub(&self, other: &Uint) -> Option<Uint> {
        if self < other {
            return None;
        }
        let mut out = self.limbs().to_vec();
        sub_assign(&mut out, other.limbs());
        Some(Uint::from_limbs(out))
    }

    /// Product of two values (schoolbook).
    pub fn mul(&self, other: &Uint) -> Uint {
        if self.is_zero() || other.is_zero() {
            return Uint::zero();
        }
        let (a, b) = (self.limbs(), other.limbs());
        let mut out = vec![0u64; a.len() + b.len()];
        for (i, &av) in a.iter().enumerate() {
            let mut carry = 0u64;
            for (j, &bv) in b.iter().enumerate() {
                let acc = av as u128 * bv as u128 + out[i + j] as u128 + carry as u128;
                out[i + j] = acc as u64;
                carry = (acc >> LIMB_BITS) as u64;
            }
            out[i + b.len()] = carry;
        }
        Uint::from_limbs(out)
    }

    /// Left shift by `bits`.
    pub fn shl(&self, bits: usize) -> Uint {
        if self.is_zero() {
            return Uint::zero();
        }
        let limb_shift = bits / LIMB_BITS;
        let bit_shift = bits % LIMB_BITS;
        let mut out = vec![0u64; self.limbs().len() + limb_shift + 1];
        for (i, &l) in self.limbs().iter().enumerate() {
            out[i + limb_shift] |= l << bit_shift;
            if bit_shift > 0 {
                out[i + limb_shift + 1] |= l >> (LIMB_BITS - bit_shift);
            }
        }
        Uint::from_limbs(out)
    }

    /// Quotient and remainder by binary long division.
    pub fn div_rem(&self, divisor: &Uint) -> Result<(Uint, Uint), CryptoError> {
        if divisor.is_zero() {
            return Err(CryptoError::DivisionByZero);
        }
        if self < divisor {
            return Ok((Uint::zero(), self.clone()));
        }

        let bits = self.bit_len();
        let mut quot = vec![0u64; self.limbs().len()];
        let mut rem: Vec<u64> = vec![0];
        for i in (0..bits).rev() {
            shl1_assign(&mut rem);
            rem[0] |= (self.limbs()[i / LIMB_BITS] >> (i % LIMB_BITS)) & 1;
            if cmp_limbs(&rem, divisor.limbs()) != Ordering::Less {
                sub_assign(&mut rem, divisor.limbs());
                quot[i / LIMB_BITS] |= 1u64 << (i % LIMB_BITS);
            }
        }
        Ok((Uint::from_limbs(quot), Uint::from_limbs(rem)))
    }

    /// `self mod modulus`.
    pub fn mod_reduce(&self, modulus: &Uint) -> Result<Uint, CryptoError> {
        let (_, r) = self.div_rem(modulus)?;
        Ok(r)
    }
}

/// Compare limb arrays as unsigned integers, tolerating leading zero limbs.
pub(crate) fn cmp_limbs(a: &[u64], b: &[u64]) -> Ordering {
    for i in (0..a.len().max(b.len())).rev() {
        let av = *a.get(i).unwrap_or(&0);
        let bv = *b.get(i).unwrap_or(&0);
        if av != bv {
            return av.cmp(&bv);
        }
    }
    Ordering::Equal
}

/// In-place `a -= b`. Caller guarantees `a >= b`.
fn sub_assign(a: &mut [u64], b: &[u64]) {
    let mut borrow = 0u64;
    for (i, av) in a.iter_mut().enumerate() {
        let bv = *b.get(i).unwrap_or(&0);
        let (d1, u1) = av.overflowing_sub(bv);
        let (d2, u2) = d1.overflowing_sub(borrow);
        *av = d2;
        borrow = u1 as u64 + u2 as u64;
    }
}

/// In-place `v <<= 1`, growing by one limb on carry-out.
fn shl1_assign(v: &mut Vec<u64>) {
    let mut carry = 0u64;
    for limb in v.iter_mut() {
        let hi = *limb >> (LIMB_BITS - 1);
        *limb = (*limb << 1) | carry;
        carry = hi;
    }
    if carry != 0 {
        v.push(carry);
    }
}
