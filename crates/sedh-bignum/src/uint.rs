//! Unsigned big integer type and byte-level conversions.

use sedh_types::CryptoError;
use zeroize::Zeroize;

/// Bits per limb.
pub(crate) const LIMB_BITS: usize = 64;

/// An unsigned, heap-allocated big integer, zeroized on drop.
///
/// Represented as a little-endian array of `u64` limbs and kept normalized:
/// at least one limb, no leading zero limbs. All byte-level I/O is
/// big-endian, matching the wire encoding of the key-agreement protocol.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct Uint {
    limbs: Vec<u64>,
}

impl Uint {
    /// The zero value.
    pub fn zero() -> Self {
        Self { limbs: vec![0] }
    }

    /// Build from a `u64`.
    pub fn from_u64(value: u64) -> Self {
        Self { limbs: vec![value] }
    }

    /// Build from big-endian bytes. Leading zero bytes are accepted.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::zero();
        }
        let mut limbs = vec![0u64; bytes.len().div_ceil(8)];
        for (i, &byte) in bytes.iter().rev().enumerate() {
            limbs[i / 8] |= (byte as u64) << ((i % 8) * 8);
        }
        Self::from_limbs(limbs)
    }

    /// Export as minimal big-endian bytes (a single zero byte for zero).
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let bits = self.bit_len();
        if bits == 0 {
            return vec![0];
        }
        let n = bits.div_ceil(8);
        let mut out = vec![0u8; n];
        for i in 0..n {
            out[n - 1 - i] = (self.limbs[i / 8] >> ((i % 8) * 8)) as u8;
        }
        out
    }

    /// Export as exactly `width` big-endian bytes, preserving leading zeros.
    ///
    /// Fails with `WidthOverflow` if the value needs more than `width` bytes.
    pub fn to_be_bytes_padded(&self, width: usize) -> Result<Vec<u8>, CryptoError> {
        let min = self.bit_len().div_ceil(8);
        if min > width {
            return Err(CryptoError::WidthOverflow);
        }
        let mut out = vec![0u8; width];
        for i in 0..min {
            out[width - 1 - i] = (self.limbs[i / 8] >> ((i % 8) * 8)) as u8;
        }
        Ok(out)
    }

    /// Number of significant bits.
    pub fn bit_len(&self) -> usize {
        for i in (0..self.limbs.len()).rev() {
            if self.limbs[i] != 0 {
                return (i + 1) * LIMB_BITS - self.limbs[i].leading_zeros() as usize;
            }
        }
        0
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    pub fn is_one(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 1
    }

    pub fn is_even(&self) -> bool {
        self.limbs[0] & 1 == 0
    }

    pub fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    /// Bit at position `idx`, counted from the least significant bit.
    pub fn bit(&self, idx: usize) -> bool {
        let limb = idx / LIMB_BITS;
        limb < self.limbs.len() && (self.limbs[limb] >> (idx % LIMB_BITS)) & 1 == 1
    }

    /// The limbs, least significant first.
    pub fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    /// Build from little-endian limbs, normalizing.
    pub fn from_limbs(limbs: Vec<u64>) -> Self {
        let mut n = Self {
            limbs: if limbs.is_empty() { vec![0] } else { limbs },
        };
        while n.limbs.len() > 1 && n.limbs[n.limbs.len() - 1] == 0 {
            n.limbs.pop();
        }
        n
    }
}

impl std::fmt::Debug for Uint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hex = self
            .to_be_bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>();
        write!(f, "Uint(0x{hex})")
    }
}

impl PartialOrd for Uint {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uint {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        crate::arith::cmp_limbs(&self.limbs, &other.limbs)
    }
}
