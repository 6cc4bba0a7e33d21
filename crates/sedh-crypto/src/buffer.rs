//! Fixed-width parameter buffers.

use sedh_types::CryptoError;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// A byte buffer whose width is fixed at construction.
///
/// Every write replaces the whole buffer; there is no way to leave a
/// partially updated value behind. The contents are zeroized on drop.
#[derive(Debug, Clone, Zeroize)]
#[zeroize(drop)]
pub struct ParamBuf {
    bytes: Vec<u8>,
}

impl ParamBuf {
    /// An all-zero buffer of `width` bytes.
    pub fn new(width: usize) -> Self {
        Self {
            bytes: vec![0; width],
        }
    }

    /// A buffer holding a copy of `src`, width fixed to `src.len()`.
    pub fn from_bytes(src: &[u8]) -> Self {
        Self {
            bytes: src.to_vec(),
        }
    }

    /// The fixed width in bytes.
    pub fn width(&self) -> usize {
        self.bytes.len()
    }

    /// The current contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Overwrite the whole buffer.
    ///
    /// The source must exactly fill the buffer; anything shorter or longer
    /// fails with `LengthMismatch` before a single byte is touched.
    pub fn write_all(&mut self, src: &[u8]) -> Result<(), CryptoError> {
        if src.len() != self.bytes.len() {
            return Err(CryptoError::LengthMismatch {
                expected: self.bytes.len(),
                got: src.len(),
            });
        }
        self.bytes.copy_from_slice(src);
        Ok(())
    }

    /// Overwrite every byte with zero.
    pub fn zero(&mut self) {
        self.bytes.zeroize();
    }

    /// True when every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Full-width constant-time equality. Buffers of different widths are
    /// unequal without comparing contents.
    pub fn ct_eq(&self, other: &ParamBuf) -> bool {
        self.bytes.len() == other.bytes.len()
            && bool::from(self.bytes.as_slice().ct_eq(other.bytes.as_slice()))
    }
}
