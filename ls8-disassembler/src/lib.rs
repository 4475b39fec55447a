//! # LS-8 Disassembler
//!
//! Turn LS-8 program bytes back into readable assembly.
//!
//! Bytes that do not start a valid instruction (zero filler, unknown opcodes,
//! instructions cut off by the end of the program) are listed as `DB` data so
//! the output can be fed back into the assembler.
//!
//! ## Example
//!
//! ```rust
//! use ls8_disassembler::disassemble;
//!
//! let listing = disassemble(&[0x82, 0x00, 0x08, 0x47, 0x00, 0x01]);
//! assert!(listing.contains("LDI R0, 8"));
//! ```

pub mod decoder;
pub mod disassembler;
pub mod error;
pub mod formatter;

pub use decoder::decode;
pub use disassembler::{disassemble, disassemble_program, lines, Entry, Line};
pub use error::{DisassemblerError, Result};
pub use formatter::format;
