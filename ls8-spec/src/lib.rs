//! # LS-8 Specification
//!
//! 8-bit register machine with a 256-byte unified memory.
//!
//! ## Key Features
//! - 8 general-purpose 8-bit registers (R7 doubles as the stack pointer)
//! - 256 bytes of memory shared by program, data and stack
//! - Fixed 1-3 byte instructions: opcode byte followed by 0-2 operand bytes
//! - Compare flags (EQUAL, GREATER-THAN, LESS-THAN) consumed by conditional jumps
//! - Text program images of binary literals, one byte per line

pub mod error;
pub mod flags;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod register;

pub use error::SpecError;
pub use flags::Flags;
pub use instruction::Instruction;
pub use opcode::{AluOp, Opcode};
pub use program::{parse_image, Program, ProgramHeader};
pub use register::{Register, NUM_REGISTERS};

/// Size of the unified memory in bytes
pub const MEMORY_SIZE: usize = 256;

/// Initial stack pointer value written into R7 by a program load.
///
/// Addresses `0xF4..=0xFF` are left for the stack, `0x00..=0xF3` for code and data.
pub const STACK_POINTER_INIT: u8 = 0xF4;

/// Longest instruction encoding in bytes (opcode + two operands)
pub const MAX_INSTRUCTION_LEN: usize = 3;
