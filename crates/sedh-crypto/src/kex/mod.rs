//! Diffie-Hellman key agreement over finite fields.
//!
//! The device model is one long-lived session: domain parameters (p, g), a
//! single exchange slot, and an ephemeral private exponent. A full exchange
//! is `init` -> `public_value` -> `set_peer_value` -> `finalize`, after
//! which every secret intermediate has been zeroized and only the derived
//! session key survives, owned by the caller.

mod groups;

use crate::buffer::ParamBuf;
use crate::modexp::{MontModExp, PrivateExponent};
use crate::provider::ModExpEngine;
use sedh_types::{CryptoError, DhGroupId};
use zeroize::{Zeroize, Zeroizing};

/// Session keys are 128-bit: the leading bytes of the shared secret.
pub const SESSION_KEY_LEN: usize = 16;

/// Diffie-Hellman domain parameters (p, g), both exactly one parameter
/// width wide.
///
/// Setters replace whole buffers and validate nothing beyond length: the
/// group's cryptographic quality is the caller's responsibility, exactly as
/// on the reference hardware.
#[derive(Debug, Clone)]
pub struct DomainParams {
    p: ParamBuf,
    g: ParamBuf,
}

impl DomainParams {
    /// Parameters for a built-in group.
    pub fn from_group(id: DhGroupId) -> Self {
        let (p, g) = groups::modp_params(id);
        Self {
            p: ParamBuf::from_bytes(&p),
            g: ParamBuf::from_bytes(&g),
        }
    }

    /// Custom parameters from big-endian bytes. Both values must have the
    /// same length, which becomes the parameter width.
    pub fn from_parts(p: &[u8], g: &[u8]) -> Result<Self, CryptoError> {
        if p.is_empty() {
            return Err(CryptoError::InvalidArg);
        }
        if g.len() != p.len() {
            return Err(CryptoError::LengthMismatch {
                expected: p.len(),
                got: g.len(),
            });
        }
        Ok(Self {
            p: ParamBuf::from_bytes(p),
            g: ParamBuf::from_bytes(g),
        })
    }

    /// Parameter width in bytes.
    pub fn width(&self) -> usize {
        self.p.width()
    }

    /// The prime modulus p.
    pub fn prime(&self) -> &[u8] {
        self.p.as_bytes()
    }

    /// The generator g.
    pub fn generator(&self) -> &[u8] {
        self.g.as_bytes()
    }

    /// Replace p. The source must exactly fill the parameter width.
    pub fn set_prime(&mut self, src: &[u8]) -> Result<(), CryptoError> {
        self.p.write_all(src)
    }

    /// Replace g. The source must exactly fill the parameter width.
    pub fn set_generator(&mut self, src: &[u8]) -> Result<(), CryptoError> {
        self.g.write_all(src)
    }
}

/// Lifecycle of the one key-agreement session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No private exponent exists.
    Uninitialized,
    /// Exponent generated, exchange slot holds the local public value.
    Initialized,
    /// Exchange slot holds the peer's public value.
    PeerSet,
    /// Key derived; exponent and slot wiped.
    Finalized,
}

/// A derived 128-bit session key, zeroized on drop.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SessionKey {
    bytes: [u8; SESSION_KEY_LEN],
}

impl SessionKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("SessionKey").finish_non_exhaustive()
    }
}

/// The stateful key-agreement session.
///
/// One slot serves both public-value roles in turn: after `init` it holds
/// the locally computed value, and `set_peer_value` overwrites it with the
/// peer's. [`KexSession::public_value`] therefore always returns the
/// *current* slot contents — read the local value out before storing the
/// peer's. This mirrors the reference device, which budgeted a single
/// transient buffer for both.
pub struct KexSession {
    domain: DomainParams,
    engine: Box<dyn ModExpEngine>,
    exponent: Option<PrivateExponent>,
    exchange: ParamBuf,
    state: SessionState,
}

impl KexSession {
    /// A session over `domain` using the built-in Montgomery engine.
    pub fn new(domain: DomainParams) -> Self {
        Self::with_engine(domain, Box::new(MontModExp::new()))
    }

    /// A session over `domain` with a caller-chosen modexp engine.
    pub fn with_engine(domain: DomainParams, engine: Box<dyn ModExpEngine>) -> Self {
        let width = domain.width();
        Self {
            domain,
            engine,
            exponent: None,
            exchange: ParamBuf::new(width),
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Parameter width in bytes.
    pub fn width(&self) -> usize {
        self.domain.width()
    }

    pub fn prime(&self) -> &[u8] {
        self.domain.prime()
    }

    pub fn generator(&self) -> &[u8] {
        self.domain.generator()
    }

    /// Replace the prime modulus.
    ///
    /// Legal in any state, but doing so mid-exchange silently invalidates
    /// the exchange in progress: the next modexp uses the new value.
    pub fn set_prime(&mut self, src: &[u8]) -> Result<(), CryptoError> {
        self.domain.set_prime(src)
    }

    /// Replace the generator. Same mid-exchange caveat as [`Self::set_prime`].
    pub fn set_generator(&mut self, src: &[u8]) -> Result<(), CryptoError> {
        self.domain.set_generator(src)
    }

    /// Start a new exchange.
    ///
    /// Generates a fresh random private exponent, or installs `exponent`
    /// (exactly one width of big-endian bytes — the host-supplied variant
    /// used for test vectors), computes `g^x mod p` into the exchange slot
    /// and moves to `Initialized`. Any previous exponent is destroyed
    /// first; a validation failure leaves the previous session untouched,
    /// while an engine fault wipes everything back to `Uninitialized`.
    pub fn init(&mut self, exponent: Option<&[u8]>) -> Result<(), CryptoError> {
        let x = match exponent {
            Some(bytes) => {
                if bytes.len() != self.width() {
                    return Err(CryptoError::LengthMismatch {
                        expected: self.width(),
                        got: bytes.len(),
                    });
                }
                PrivateExponent::from_be_bytes(bytes)?
            }
            None => PrivateExponent::random_for(self.domain.prime())?,
        };

        // The prior exponent dies before the new exchange begins.
        self.exponent = None;

        let y = match self
            .engine
            .pow_mod(self.domain.generator(), &x, self.domain.prime())
        {
            Ok(y) => y,
            Err(e) => {
                self.reset();
                return Err(e);
            }
        };
        self.exchange.write_all(&y)?;
        self.exponent = Some(x);
        self.state = SessionState::Initialized;
        Ok(())
    }

    /// The current contents of the exchange slot, exactly one width long.
    ///
    /// This is the local public value after `init`, the peer's value after
    /// `set_peer_value`, and all zeros after `finalize`. Fails with
    /// `InvalidState` before the first `init`.
    pub fn public_value(&self) -> Result<&[u8], CryptoError> {
        if self.state == SessionState::Uninitialized {
            return Err(CryptoError::InvalidState);
        }
        Ok(self.exchange.as_bytes())
    }

    /// Store the peer's public value in the exchange slot.
    ///
    /// Requires an exponent to exist (`Initialized` or `PeerSet`) and
    /// exactly one width of bytes.
    pub fn set_peer_value(&mut self, value: &[u8]) -> Result<(), CryptoError> {
        if !matches!(
            self.state,
            SessionState::Initialized | SessionState::PeerSet
        ) {
            return Err(CryptoError::InvalidState);
        }
        self.exchange.write_all(value)?;
        self.state = SessionState::PeerSet;
        Ok(())
    }

    /// Complete the exchange and derive the session key.
    ///
    /// Computes `slot^x mod p`, takes the first 16 bytes as the key, then
    /// destroys the exponent and zeroizes both the shared secret and the
    /// exchange slot before returning. Calling this from `Initialized`
    /// (without a peer value) is allowed and operates on whatever the slot
    /// holds — the reference device behaves the same way.
    pub fn finalize(&mut self) -> Result<SessionKey, CryptoError> {
        if !matches!(
            self.state,
            SessionState::Initialized | SessionState::PeerSet
        ) {
            return Err(CryptoError::InvalidState);
        }
        if self.width() < SESSION_KEY_LEN {
            return Err(CryptoError::LengthMismatch {
                expected: SESSION_KEY_LEN,
                got: self.width(),
            });
        }

        let x = self.exponent.take().ok_or(CryptoError::InvalidState)?;
        let secret = match self
            .engine
            .pow_mod(self.exchange.as_bytes(), &x, self.domain.prime())
        {
            Ok(s) => Zeroizing::new(s),
            Err(e) => {
                self.reset();
                return Err(e);
            }
        };
        // Exponent destroyed before the key leaves the engine.
        drop(x);

        let mut key = SessionKey {
            bytes: [0; SESSION_KEY_LEN],
        };
        key.bytes.copy_from_slice(&secret[..SESSION_KEY_LEN]);
        drop(secret);

        self.exchange.zero();
        self.state = SessionState::Finalized;
        Ok(key)
    }

    /// Force the session back to `Uninitialized`, wiping the exponent and
    /// the exchange slot. Domain parameters are kept.
    pub fn reset(&mut self) {
        self.exponent = None;
        self.exchange.zero();
        self.state = SessionState::Uninitialized;
    }
}
