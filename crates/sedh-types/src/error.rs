/// Key-agreement engine errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("modular exponentiation primitive rejected input")]
    EngineFault,
    #[error("operation not valid in current session state")]
    InvalidState,
    #[error("random generation failed")]
    RandGenFail,
    #[error("division by zero")]
    DivisionByZero,
    #[error("value does not fit the parameter width")]
    WidthOverflow,
    #[error("invalid argument")]
    InvalidArg,
}

/// Command protocol errors, reported to the host as status words.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("class byte not supported")]
    ClassNotSupported,
    #[error("instruction not supported")]
    InstructionNotSupported,
    #[error("unknown parameter selector")]
    InvalidSelector,
    #[error("payload length mismatch")]
    LengthMismatch,
    #[error("command not valid in current state")]
    InvalidStateTransition,
    #[error("engine fault")]
    EngineFault,
}

impl From<CryptoError> for ProtocolError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::LengthMismatch { .. } => ProtocolError::LengthMismatch,
            CryptoError::InvalidState => ProtocolError::InvalidStateTransition,
            _ => ProtocolError::EngineFault,
        }
    }
}
