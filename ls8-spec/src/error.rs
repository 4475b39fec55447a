//! # Error Types for LS-8

use crate::opcode::Opcode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    // Program format errors
    #[error("Invalid program magic: expected 0x4c533800, got {0:#010x}")]
    InvalidMagic(u32),

    #[error("Invalid program version: expected {expected}, found {found}")]
    InvalidVersion { expected: u16, found: u16 },

    #[error("Invalid code size: header says {expected} bytes, found {found} bytes")]
    InvalidCodeSize { expected: usize, found: usize },

    #[error("Malformed program container: {0}")]
    Encoding(#[from] bincode::Error),

    // Instruction errors
    #[error("Invalid opcode: {0:#04x}")]
    InvalidOpcode(u8),

    #[error("Invalid register index: {0} (valid range: 0-7)")]
    InvalidRegister(u8),

    #[error("{opcode} expects {expected} operand bytes, found {found}")]
    MissingOperands {
        opcode: Opcode,
        expected: usize,
        found: usize,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpecError::InvalidRegister(9);
        assert_eq!(err.to_string(), "Invalid register index: 9 (valid range: 0-7)");

        let err = SpecError::InvalidOpcode(0xFF);
        assert_eq!(err.to_string(), "Invalid opcode: 0xff");

        let err = SpecError::MissingOperands {
            opcode: Opcode::Ldi,
            expected: 2,
            found: 0,
        };
        assert_eq!(err.to_string(), "LDI expects 2 operand bytes, found 0");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.ls8");
        let err: SpecError = io_err.into();
        assert!(err.to_string().contains("missing.ls8"));
    }
}
