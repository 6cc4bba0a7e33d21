//! Built-in MODP group constants.
//!
//! The device ships with RFC 3526 group 14 (2048-bit MODP, generator 2),
//! the same default the reference hardware carried. Replacements are the
//! host's responsibility.

use sedh_types::DhGroupId;

/// Return (p, g) as fixed-width big-endian byte vectors for a built-in group.
pub(crate) fn modp_params(id: DhGroupId) -> (Vec<u8>, Vec<u8>) {
    match id {
        DhGroupId::Modp2048 => {
            let p = from_hex(MODP2048_P);
            let mut g = vec![0u8; p.len()];
            g[p.len() - 1] = 2;
            (p, g)
        }
    }
}

/// Parse a known-good hex constant into bytes.
fn from_hex(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

// RFC 3526 §3 group 14 prime (2048-bit, 512 hex chars).
const MODP2048_P: &str = "\
FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
29024E088A67CC74020BBEA63B139B22514A08798E3404DD\
EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245\
E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D\
C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F\
83655D23DCA3AD961C62F356208552BB9ED529077096966D\
670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9\
DE2BCBF6955817183995497CEA956AE515D2261898FA0510\
15728E5A8AACAA68FFFFFFFFFFFFFFFF";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modp2048_shape() {
        let (p, g) = modp_params(DhGroupId::Modp2048);
        assert_eq!(p.len(), 256);
        assert_eq!(g.len(), 256);
        // Prime is odd with the top bit set; generator is 2.
        assert_eq!(p[0], 0xFF);
        assert_eq!(p[255] & 1, 1);
        assert_eq!(g[255], 2);
        assert!(g[..255].iter().all(|&b| b == 0));
    }
}
