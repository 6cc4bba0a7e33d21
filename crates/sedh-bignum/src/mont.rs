//! Montgomery modular arithmetic and windowed exponentiation.

use crate::uint::{Uint, LIMB_BITS};
use sedh_types::CryptoError;

/// Window width for exponentiation (16-entry table).
const WINDOW: usize = 4;

/// Montgomery context for a fixed odd modulus.
///
/// Precomputes the values needed to keep all multiplications in Montgomery
/// form: R = 2^(m * 64) where m is the limb count of the modulus.
pub struct MontCtx {
    /// The modulus N.
    n: Uint,
    /// Limb count of N.
    m: usize,
    /// -N^(-1) mod 2^64.
    n0: u64,
    /// R^2 mod N, used to enter Montgomery form.
    rr: Uint,
}

impl MontCtx {
    /// Build a context for `modulus`.
    ///
    /// The modulus must be odd and nonzero; anything else is rejected, which
    /// is what surfaces as an engine fault at the key-agreement layer.
    pub fn new(modulus: &Uint) -> Result<Self, CryptoError> {
        if modulus.is_zero() {
            return Err(CryptoError::DivisionByZero);
        }
        if modulus.is_even() {
            return Err(CryptoError::InvalidArg);
        }
        let m = modulus.limbs().len();
        let rr = Uint::from_u64(1)
            .shl(2 * m * LIMB_BITS)
            .mod_reduce(modulus)?;
        Ok(MontCtx {
            n: modulus.clone(),
            m,
            n0: mont_inv64(modulus.limbs()[0]),
            rr,
        })
    }

    /// The modulus this context reduces by.
    pub fn modulus(&self) -> &Uint {
        &self.n
    }

    /// Modular exponentiation: `base^exp mod N`.
    pub fn pow_mod(&self, base: &Uint, exp: &Uint) -> Result<Uint, CryptoError> {
        if exp.is_zero() {
            // a^0 = 1, except mod 1 where every residue is 0.
            return Ok(if self.n.is_one() {
                Uint::zero()
            } else {
                Uint::from_u64(1)
            });
        }

        let one = self.to_mont(&Uint::from_u64(1))?;
        let base_m = self.to_mont(base)?;

        // table[i] = base^i in Montgomery form.
        let mut table = Vec::with_capacity(1 << WINDOW);
        table.push(one.clone());
        for i in 1..(1 << WINDOW) {
            table.push(self.mont_mul(&table[i - 1], &base_m));
        }

        // Consume the exponent MSB-first in windows of up to WINDOW bits.
        let mut acc = one;
        let mut remaining = exp.bit_len();
        while remaining > 0 {
            let take = WINDOW.min(remaining);
            remaining -= take;
            for _ in 0..take {
                acc = self.mont_mul(&acc, &acc);
            }
            let mut window = 0usize;
            for b in 0..take {
                if exp.bit(remaining + b) {
                    window |= 1 << b;
                }
            }
            if window != 0 {
                acc = self.mont_mul(&acc, &table[window]);
            }
        }

        Ok(self.from_mont(&acc))
    }

    /// Enter Montgomery form: a * R mod N.
    fn to_mont(&self, a: &Uint) -> Result<Uint, CryptoError> {
        let reduced = a.mod_reduce(&self.n)?;
        Ok(self.redc(&reduced.mul(&self.rr)))
    }

    /// Leave Montgomery form: a * R^(-1) mod N.
    fn from_mont(&self, a: &Uint) -> Uint {
        self.redc(a)
    }

    /// Montgomery product of two values already in Montgomery form.
    fn mont_mul(&self, a: &Uint, b: &Uint) -> Uint {
        self.redc(&a.mul(b))
    }

    /// Montgomery reduction (HAC 14.32): T -> T * R^(-1) mod N.
    ///
    /// Requires T < N * R, which holds for every caller here since both
    /// factors are reduced below N before multiplying.
    fn redc(&self, t: &Uint) -> Uint {
        let m = self.m;
        let n = self.n.limbs();

        let mut w = vec![0u64; 2 * m + 2];
        let src = t.limbs();
        let len = src.len().min(w.len());
        w[..len].copy_from_slice(&src[..len]);

        for i in 0..m {
            let q = w[i].wrapping_mul(self.n0);
            let mut carry = 0u64;
            for j in 0..m {
                let acc = q as u128 * n[j] as u128 + w[i + j] as u128 + carry as u128;
                w[i + j] = acc as u64;
                carry = (acc >> LIMB_BITS) as u64;
            }
            let mut k = i + m;
            while carry != 0 && k < w.len() {
                let acc = w[k] as u128 + carry as u128;
                w[k] = acc as u64;
                carry = (acc >> LIMB_BITS) as u64;
                k += 1;
            }
        }

        // Result is w >> (m * 64), one conditional subtraction away from
        // the canonical residue. The extra limb w[2m] carries the case
        // where the pre-subtraction value reaches 2N.
        let out = Uint::from_limbs(w[m..2 * m + 1].to_vec());
        match out.checked_sub(&self.n) {
            Some(reduced) => reduced,
            None => out,
        }
    }
}

/// -N^(-1) mod 2^64 for odd N.
///
/// Newton iteration on the inverse; precision doubles each round, so six
/// rounds reach 64 bits from the seed inverse mod 2.
fn mont_inv64(n0: u64) -> u64 {
    let mut inv: u64 = 1;
    for _ in 0..6 {
        inv = inv.wrapping_mul(2u64.wrapping_sub(n0.wrapping_mul(inv)));
    }
    inv.wrapping_neg()
}
