//! The device model: one session, one retained key, one dispatcher.

use crate::command::{
    Command, ParamSelector, Response, CLA, INS_FINAL, INS_GET, INS_INIT, INS_SET, INS_TEST,
};
use crate::status::StatusWord;
use sedh_crypto::aes::Aes128;
use sedh_crypto::kex::{DomainParams, KexSession, SessionKey};
use sedh_crypto::provider::BlockEncrypt;
use sedh_types::{DhGroupId, ProtocolError};

/// Known plaintext for the TEST instruction. The host encrypts the same
/// block under its own derived key and compares ciphertexts, proving key
/// agreement without moving the key.
pub const DIAG_PLAINTEXT: [u8; 16] = *b"SESSION-KEY-TEST";

/// A single key-agreement device instance.
///
/// Owns the one session and, after FINAL, the most recently derived session
/// key — the key never crosses the command interface, it is only exercised
/// through TEST. Commands are processed strictly one at a time; every
/// request is fully validated before any state is touched.
pub struct Device {
    session: KexSession,
    session_key: Option<SessionKey>,
}

impl Device {
    /// A device provisioned with the built-in group (RFC 3526 group 14,
    /// width 256).
    pub fn new() -> Self {
        Self::with_domain(DomainParams::from_group(DhGroupId::Modp2048))
    }

    /// A device over caller-chosen domain parameters.
    pub fn with_domain(domain: DomainParams) -> Self {
        Self {
            session: KexSession::new(domain),
            session_key: None,
        }
    }

    /// Parameter width of this device's session.
    pub fn width(&self) -> usize {
        self.session.width()
    }

    /// Handle one raw frame and produce the raw response.
    pub fn process(&mut self, frame: &[u8]) -> Vec<u8> {
        match Command::parse(frame) {
            Ok(cmd) => self.dispatch(&cmd).to_bytes(),
            Err(e) => Response::status(StatusWord::from(&e)).to_bytes(),
        }
    }

    /// Handle one parsed command. Errors become status-only responses; no
    /// command leaves the device in a partially mutated state.
    pub fn dispatch(&mut self, cmd: &Command) -> Response {
        match self.execute(cmd) {
            Ok(resp) => resp,
            Err(e) => Response::status(StatusWord::from(&e)),
        }
    }

    /// Device reset: back to the built-in group, no session, no key.
    pub fn reset(&mut self) {
        *self = Device::new();
    }

    fn execute(&mut self, cmd: &Command) -> Result<Response, ProtocolError> {
        if cmd.cla != CLA {
            return Err(ProtocolError::ClassNotSupported);
        }
        match cmd.ins {
            INS_INIT => self.handle_init(cmd),
            INS_GET => self.handle_get(cmd),
            INS_SET => self.handle_set(cmd),
            INS_FINAL => self.handle_final(),
            INS_TEST => self.handle_test(),
            _ => Err(ProtocolError::InstructionNotSupported),
        }
    }

    /// INIT: empty payload starts a fresh random exchange; a payload of
    /// exactly one width installs a host-supplied exponent (test vectors).
    fn handle_init(&mut self, cmd: &Command) -> Result<Response, ProtocolError> {
        if cmd.data.is_empty() {
            self.session.init(None)?;
        } else {
            self.session.init(Some(&cmd.data))?;
        }
        Ok(Response::status(StatusWord::Ok))
    }

    fn handle_get(&mut self, cmd: &Command) -> Result<Response, ProtocolError> {
        let bytes = match ParamSelector::from_p1(cmd.p1)? {
            ParamSelector::PublicValue => self.session.public_value()?,
            ParamSelector::Prime => self.session.prime(),
            ParamSelector::Generator => self.session.generator(),
        };
        Ok(Response::ok(bytes.to_vec()))
    }

    fn handle_set(&mut self, cmd: &Command) -> Result<Response, ProtocolError> {
        let selector = ParamSelector::from_p1(cmd.p1)?;
        // Exact-width payloads only; checked before any buffer is touched.
        if cmd.data.len() != self.session.width() {
            return Err(ProtocolError::LengthMismatch);
        }
        match selector {
            ParamSelector::PublicValue => self.session.set_peer_value(&cmd.data)?,
            ParamSelector::Prime => self.session.set_prime(&cmd.data)?,
            ParamSelector::Generator => self.session.set_generator(&cmd.data)?,
        }
        Ok(Response::status(StatusWord::Ok))
    }

    /// FINAL: derive the session key and keep it device-side.
    fn handle_final(&mut self) -> Result<Response, ProtocolError> {
        let key = self.session.finalize()?;
        self.session_key = Some(key);
        Ok(Response::status(StatusWord::Ok))
    }

    /// TEST: return the diagnostic block encrypted under the retained key.
    fn handle_test(&mut self) -> Result<Response, ProtocolError> {
        let key = self
            .session_key
            .as_ref()
            .ok_or(ProtocolError::InvalidStateTransition)?;
        let cipher = Aes128::new(key.as_bytes())?;
        let mut block = DIAG_PLAINTEXT;
        cipher.encrypt_block(&mut block)?;
        Ok(Response::ok(block.to_vec()))
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new()
    }
}
