use crate::isa::Isa;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntrinsicError {
    /// The managed equivalent of `PlatformNotSupportedException`.
    #[error("Operation is not supported on this platform ({isa})")]
    PlatformNotSupported { isa: Isa },

    #[error("Unknown instruction set: {0}")]
    UnknownIsa(String),

    #[error("No intrinsic registered for {0}")]
    UnknownIntrinsic(String),

    #[error("Invalid method signature: {0}")]
    InvalidSignature(String),

    #[error("Expected {expected} arguments, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    #[error("Argument {index}: expected {expected}, got {actual}")]
    ArgumentType {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
