//! ISO 7816 status words and the protocol-error mapping.

use sedh_types::ProtocolError;

/// Two-byte status word closing every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum StatusWord {
    /// Normal completion.
    Ok = 0x9000,
    /// Payload length did not match the parameter width.
    WrongLength = 0x6700,
    /// Command not allowed in the current session state.
    ConditionsNotSatisfied = 0x6985,
    /// Unknown P1/P2 selector.
    IncorrectP1P2 = 0x6A86,
    /// Unknown instruction byte.
    InsNotSupported = 0x6D00,
    /// Wrong class byte.
    ClaNotSupported = 0x6E00,
    /// Engine fault or other internal failure.
    UnknownError = 0x6F00,
}

impl StatusWord {
    pub fn value(self) -> u16 {
        self as u16
    }

    pub fn to_be_bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

impl From<&ProtocolError> for StatusWord {
    fn from(err: &ProtocolError) -> Self {
        match err {
            ProtocolError::ClassNotSupported => StatusWord::ClaNotSupported,
            ProtocolError::InstructionNotSupported => StatusWord::InsNotSupported,
            ProtocolError::InvalidSelector => StatusWord::IncorrectP1P2,
            ProtocolError::LengthMismatch => StatusWord::WrongLength,
            ProtocolError::InvalidStateTransition => StatusWord::ConditionsNotSatisfied,
            ProtocolError::EngineFault => StatusWord::UnknownError,
        }
    }
}
