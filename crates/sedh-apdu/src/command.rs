//! APDU command and response framing.
//!
//! Requests are `CLA | INS | P1 | P2 | payload` with no length field: the
//! payload is whatever follows the 4-byte header, and must be empty or
//! exactly one parameter width depending on the instruction. Responses are
//! `data ‖ status`, with the 2-byte status word always last.

use crate::status::StatusWord;
use sedh_types::ProtocolError;

/// Class byte for every command this device accepts.
pub const CLA: u8 = 0xB0;

/// Begin a new exchange (fresh or host-supplied exponent).
pub const INS_INIT: u8 = 0x10;
/// Read a parameter selected by P1.
pub const INS_GET: u8 = 0x11;
/// Overwrite a parameter selected by P1.
pub const INS_SET: u8 = 0x12;
/// Derive the session key and retain it device-side.
pub const INS_FINAL: u8 = 0x1F;
/// Encrypt the diagnostic block under the retained key.
pub const INS_TEST: u8 = 0x20;

/// P1 selector: the exchange slot (public value).
pub const P1_Y: u8 = 0x01;
/// P1 selector: the prime modulus.
pub const P1_P: u8 = 0x02;
/// P1 selector: the generator.
pub const P1_G: u8 = 0x03;

/// Unused modifier byte.
pub const BLANK: u8 = 0x00;

/// Request header length.
pub const HEADER_LEN: usize = 4;

/// The parameter a GET/SET instruction addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSelector {
    PublicValue,
    Prime,
    Generator,
}

impl ParamSelector {
    /// Decode a P1 byte; unknown selectors are a protocol error.
    pub fn from_p1(p1: u8) -> Result<Self, ProtocolError> {
        match p1 {
            P1_Y => Ok(ParamSelector::PublicValue),
            P1_P => Ok(ParamSelector::Prime),
            P1_G => Ok(ParamSelector::Generator),
            _ => Err(ProtocolError::InvalidSelector),
        }
    }

    /// The wire value of this selector.
    pub fn p1(self) -> u8 {
        match self {
            ParamSelector::PublicValue => P1_Y,
            ParamSelector::Prime => P1_P,
            ParamSelector::Generator => P1_G,
        }
    }
}

/// A parsed request, immutable once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    pub data: Vec<u8>,
}

impl Command {
    pub fn new(cla: u8, ins: u8, p1: u8, p2: u8, data: &[u8]) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: data.to_vec(),
        }
    }

    /// Parse a raw frame. Anything shorter than the header is rejected.
    pub fn parse(frame: &[u8]) -> Result<Self, ProtocolError> {
        if frame.len() < HEADER_LEN {
            return Err(ProtocolError::LengthMismatch);
        }
        Ok(Self {
            cla: frame[0],
            ins: frame[1],
            p1: frame[2],
            p2: frame[3],
            data: frame[HEADER_LEN..].to_vec(),
        })
    }

    /// Serialize back to a raw frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.data.len());
        out.extend_from_slice(&[self.cla, self.ins, self.p1, self.p2]);
        out.extend_from_slice(&self.data);
        out
    }
}

/// A response: optional data plus a status word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub data: Vec<u8>,
    pub sw: StatusWord,
}

impl Response {
    /// Success with data.
    pub fn ok(data: Vec<u8>) -> Self {
        Self {
            data,
            sw: StatusWord::Ok,
        }
    }

    /// Status only, no data.
    pub fn status(sw: StatusWord) -> Self {
        Self {
            data: Vec::new(),
            sw,
        }
    }

    /// Serialize as `data ‖ status`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + 2);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.sw.to_be_bytes());
        out
    }
}
