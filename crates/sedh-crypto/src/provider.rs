//! Trait seams for the platform capabilities the engine consumes.
//!
//! The session core never names a concrete modexp routine or cipher; it
//! talks to these traits so a build can swap in whatever primitive the
//! platform provides.

use crate::modexp::PrivateExponent;
use sedh_types::CryptoError;

/// A modular-exponentiation capability over fixed-width big-endian integers.
pub trait ModExpEngine: Send + Sync {
    /// Compute `base^exponent mod modulus`.
    ///
    /// `base` and `modulus` must have the same length; the result is padded
    /// to exactly that length, leading zero bytes preserved. The exponent
    /// stays behind its opaque handle for the whole computation. A modulus
    /// the primitive cannot load (zero or even) fails with `EngineFault`.
    fn pow_mod(
        &self,
        base: &[u8],
        exponent: &PrivateExponent,
        modulus: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;
}

/// A block cipher restricted to the encrypt direction.
///
/// This is the demonstration-cipher seam: the device only ever encrypts one
/// diagnostic block under a freshly derived key.
pub trait BlockEncrypt: Send + Sync {
    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Encrypt a single block in place.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError>;
}
