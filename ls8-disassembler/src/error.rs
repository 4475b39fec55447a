//! Disassembler errors

use ls8_spec::Opcode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisassemblerError {
    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    #[error("Truncated {opcode} at 0x{addr:02X}: needs {needed} bytes, {available} available")]
    Truncated {
        addr: usize,
        opcode: Opcode,
        needed: usize,
        available: usize,
    },

    #[error("Invalid register index {index} in {opcode} at 0x{addr:02X}")]
    InvalidRegister {
        addr: usize,
        opcode: Opcode,
        index: u8,
    },

    #[error("Address 0x{0:02X} is past the end of the program")]
    OutOfBounds(usize),
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
