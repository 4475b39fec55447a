//! LS-8 Assembler
//!
//! Assemble LS-8 assembly language into program bytes and image text.
//!
//! ## Syntax
//!
//! ```text
//! start:  LDI R0, 8       ; label, mnemonic, register, immediate
//!         LDI R1, print   # labels may be used as LDI immediates
//!         CALL R1
//!         HLT
//! print:  PRN R0
//!         RET
//! table:  DB 0x01, 0b10, 3
//! ```
//!
//! Mnemonics and registers are case-insensitive; `SP` is an alias for `R7`.
//!
//! ## Example
//!
//! ```rust
//! use ls8_assembler::{assemble, to_image_text};
//!
//! let program = assemble("LDI R0, 8\nPRN R0\nHLT").unwrap();
//! let image = to_image_text(program.code());
//! assert!(image.starts_with("10000010 # LDI R0, 8"));
//! ```

pub mod assembler;
pub mod encoder;
pub mod error;
pub mod image;
pub mod lexer;
pub mod parser;

pub use assembler::assemble;
pub use encoder::encode;
pub use error::{AssemblerError, Result};
pub use image::to_image_text;
pub use parser::{parse_instruction, parse_register};

/// Assemble source straight to program image text
pub fn assemble_to_image(source: &str) -> Result<String> {
    let program = assemble(source)?;
    Ok(to_image_text(program.code()))
}
