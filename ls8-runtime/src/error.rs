//! Runtime error types for LS-8

use ls8_spec::SpecError;
use thiserror::Error;

/// Failure raised while executing a single cycle.
///
/// Faults carry no PC/opcode context; the machine attaches it when it turns a
/// fatal fault into a [`RuntimeError::Execution`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("Memory access out of bounds: address {address:#x}")]
    MemoryAccess { address: usize },

    #[error("Stack overflow: SP {sp:#04x} cannot be decremented")]
    StackOverflow { sp: u8 },

    #[error("Stack underflow: SP {sp:#04x} cannot be incremented")]
    StackUnderflow { sp: u8 },

    #[error("Invalid register index: {0}")]
    InvalidRegister(u8),

    #[error("Unsupported ALU operation")]
    UnsupportedAluOperation,

    #[error("Malformed instruction: {0}")]
    Decode(String),

    #[error("Unknown opcode")]
    UnknownOpcode,
}

impl Fault {
    /// Check if this fault must stop the machine.
    ///
    /// Unknown opcodes are skipped one byte at a time; everything else aborts.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Fault::UnknownOpcode)
    }
}

impl From<SpecError> for Fault {
    fn from(err: SpecError) -> Self {
        match err {
            SpecError::InvalidRegister(index) => Fault::InvalidRegister(index),
            other => Fault::Decode(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Program too large: {size} bytes exceeds memory capacity of {capacity} bytes")]
    Load { size: usize, capacity: usize },

    #[error("{fault} at PC {pc:#04x} ({})", describe_opcode(.opcode))]
    Execution {
        pc: usize,
        opcode: Option<u8>,
        fault: Fault,
    },
}

impl RuntimeError {
    /// PC of the failing instruction, for execution errors
    pub fn pc(&self) -> Option<usize> {
        match self {
            RuntimeError::Execution { pc, .. } => Some(*pc),
            RuntimeError::Load { .. } => None,
        }
    }

    pub fn fault(&self) -> Option<&Fault> {
        match self {
            RuntimeError::Execution { fault, .. } => Some(fault),
            RuntimeError::Load { .. } => None,
        }
    }
}

fn describe_opcode(opcode: &Option<u8>) -> String {
    match opcode {
        Some(byte) => format!("opcode {:#04x}", byte),
        None => "opcode unreadable".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
