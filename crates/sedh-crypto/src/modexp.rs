//! The private-exponent handle and the Montgomery-backed modexp engine.

use crate::provider::ModExpEngine;
use sedh_bignum::{MontCtx, Uint};
use sedh_types::CryptoError;
use zeroize::Zeroize;

/// An ephemeral private exponent behind an opaque handle.
///
/// The value is generated (or installed) inside the engine boundary and is
/// never readable back as bytes; it can only be consumed by a
/// [`ModExpEngine`]. Dropping the handle zeroizes the exponent.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct PrivateExponent {
    x: Uint,
}

impl PrivateExponent {
    /// Generate a fresh exponent uniform in `[2, p-2]` for the prime given
    /// as big-endian bytes.
    pub fn random_for(modulus: &[u8]) -> Result<Self, CryptoError> {
        let p = Uint::from_be_bytes(modulus);
        // Need p >= 5 for the range [2, p-2] to be non-degenerate.
        let span = p
            .checked_sub(&Uint::from_u64(3))
            .filter(|s| !s.is_zero())
            .ok_or(CryptoError::InvalidArg)?;
        let x = Uint::random_below(&span)?.add(&Uint::from_u64(2));
        Ok(Self { x })
    }

    /// Install a host-supplied exponent (big-endian). Intended for test
    /// vectors; the caller vouches for the value.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.is_empty() {
            return Err(CryptoError::InvalidArg);
        }
        Ok(Self {
            x: Uint::from_be_bytes(bytes),
        })
    }

    /// The exponent value, visible only to engine implementations.
    pub(crate) fn value(&self) -> &Uint {
        &self.x
    }
}

impl std::fmt::Debug for PrivateExponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the value.
        f.debug_struct("PrivateExponent").finish_non_exhaustive()
    }
}

/// Production [`ModExpEngine`] backed by Montgomery exponentiation.
///
/// The reference platform reaches modular exponentiation through its raw RSA
/// primitive; here the same capability is a direct constant-width bignum
/// routine.
#[derive(Debug, Default, Clone, Copy)]
pub struct MontModExp;

impl MontModExp {
    pub fn new() -> Self {
        MontModExp
    }
}

impl ModExpEngine for MontModExp {
    fn pow_mod(
        &self,
        base: &[u8],
        exponent: &PrivateExponent,
        modulus: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let width = base.len();
        if modulus.len() != width {
            return Err(CryptoError::LengthMismatch {
                expected: width,
                got: modulus.len(),
            });
        }

        let n = Uint::from_be_bytes(modulus);
        let ctx = MontCtx::new(&n).map_err(|_| CryptoError::EngineFault)?;
        let b = Uint::from_be_bytes(base);
        let r = ctx
            .pow_mod(&b, exponent.value())
            .map_err(|_| CryptoError::EngineFault)?;
        r.to_be_bytes_padded(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(n: u64) -> PrivateExponent {
        PrivateExponent::from_be_bytes(&n.to_be_bytes()).unwrap()
    }

    #[test]
    fn toy_group_public_values() {
        // W = 4, P = 11, G = 2 (the classic toy group): 2^3 = 8, 2^4 = 5.
        let engine = MontModExp::new();
        let p = [0, 0, 0, 11];
        let g = [0, 0, 0, 2];
        assert_eq!(engine.pow_mod(&g, &exp(3), &p).unwrap(), vec![0, 0, 0, 8]);
        assert_eq!(engine.pow_mod(&g, &exp(4), &p).unwrap(), vec![0, 0, 0, 5]);
    }

    #[test]
    fn toy_group_shared_secret_agreement() {
        // S_a = Y_b^a mod P and S_b = Y_a^b mod P both equal G^(a*b) mod P.
        let engine = MontModExp::new();
        let p = [0, 0, 0, 11];
        let y_a = [0, 0, 0, 8]; // 2^3 mod 11
        let y_b = [0, 0, 0, 5]; // 2^4 mod 11
        let s_a = engine.pow_mod(&y_b, &exp(3), &p).unwrap();
        let s_b = engine.pow_mod(&y_a, &exp(4), &p).unwrap();
        assert_eq!(s_a, vec![0, 0, 0, 4]); // 2^12 mod 11
        assert_eq!(s_a, s_b);
    }

    #[test]
    fn output_width_matches_input_width() {
        let engine = MontModExp::new();
        let mut p = vec![0u8; 32];
        p[31] = 11;
        let mut g = vec![0u8; 32];
        g[31] = 2;
        let y = engine.pow_mod(&g, &exp(3), &p).unwrap();
        assert_eq!(y.len(), 32);
        assert_eq!(y[31], 8);
        assert!(y[..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn even_modulus_is_engine_fault() {
        let engine = MontModExp::new();
        let p = [0, 0, 0, 12];
        let g = [0, 0, 0, 2];
        assert_eq!(
            engine.pow_mod(&g, &exp(3), &p).unwrap_err(),
            CryptoError::EngineFault
        );
    }

    #[test]
    fn zero_modulus_is_engine_fault() {
        let engine = MontModExp::new();
        assert_eq!(
            engine.pow_mod(&[0; 4], &exp(3), &[0; 4]).unwrap_err(),
            CryptoError::EngineFault
        );
    }

    #[test]
    fn width_mismatch_rejected() {
        let engine = MontModExp::new();
        let err = engine.pow_mod(&[0, 0, 0, 2], &exp(3), &[0, 11]).unwrap_err();
        assert!(matches!(err, CryptoError::LengthMismatch { expected: 4, got: 2 }));
    }

    #[test]
    fn random_exponent_bounds() {
        // p = 11: exponents must land in [2, 9].
        let p = [0u8, 0, 0, 11];
        for _ in 0..50 {
            let x = PrivateExponent::random_for(&p).unwrap();
            let v = x.value();
            assert!(*v >= sedh_bignum::Uint::from_u64(2));
            assert!(*v <= sedh_bignum::Uint::from_u64(9));
        }
    }

    #[test]
    fn random_exponent_needs_room() {
        assert!(PrivateExponent::random_for(&[0, 3]).is_err());
        assert!(PrivateExponent::random_for(&[0, 0]).is_err());
    }

    #[test]
    fn supplied_exponent_rejects_empty() {
        assert!(PrivateExponent::from_be_bytes(&[]).is_err());
    }
}
