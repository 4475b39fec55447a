//! Assembler errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unknown instruction at line {line}: {mnemonic}")]
    UnknownInstruction { line: usize, mnemonic: String },

    #[error("Invalid register at line {line}: {name}")]
    InvalidRegister { line: usize, name: String },

    #[error("Invalid immediate value at line {line}: {value} (expected 0-255)")]
    InvalidImmediate { line: usize, value: String },

    #[error("Undefined label at line {line}: {label}")]
    UndefinedLabel { line: usize, label: String },

    #[error("Duplicate label at line {line}: {label} (first defined at line {first})")]
    DuplicateLabel {
        line: usize,
        label: String,
        first: usize,
    },

    #[error("Program too large: {size} bytes exceeds memory capacity of {capacity} bytes")]
    ProgramTooLarge { size: usize, capacity: usize },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AssemblerError {
    /// Source line the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            AssemblerError::SyntaxError { line, .. }
            | AssemblerError::UnknownInstruction { line, .. }
            | AssemblerError::InvalidRegister { line, .. }
            | AssemblerError::InvalidImmediate { line, .. }
            | AssemblerError::UndefinedLabel { line, .. }
            | AssemblerError::DuplicateLabel { line, .. } => Some(*line),
            AssemblerError::ProgramTooLarge { .. } | AssemblerError::IoError(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
