//! Random big-integer generation from OS entropy.

use crate::uint::Uint;
use sedh_types::CryptoError;
use zeroize::Zeroizing;

impl Uint {
    /// Uniform random value in `[0, upper)` by rejection sampling.
    pub fn random_below(upper: &Uint) -> Result<Uint, CryptoError> {
        if upper.is_zero() {
            return Err(CryptoError::InvalidArg);
        }

        let bits = upper.bit_len();
        let num_bytes = bits.div_ceil(8);
        let excess = num_bytes * 8 - bits;

        loop {
            let mut buf = Zeroizing::new(vec![0u8; num_bytes]);
            getrandom::getrandom(&mut buf).map_err(|_| CryptoError::RandGenFail)?;
            // Mask excess bits in the most significant byte so candidates
            // land in [0, 2^bits), keeping rejection cheap.
            buf[0] &= 0xFF >> excess;

            let candidate = Uint::from_be_bytes(&buf);
            if candidate < *upper {
                return Ok(candidate);
            }
        }
    }
}
