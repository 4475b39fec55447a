//! # LS-8 Opcode Definitions
//!
//! Opcode bytes carry their own shape in the high bits:
//!
//! ```text
//! AABCDDDD
//! ││││└┴┴┴─ instruction identifier
//! │││└───── sets PC directly
//! ││└────── handled by the ALU
//! └┴─────── number of operand bytes (0-2)
//! ```
//!
//! Byte `0x00` is not an opcode; the machine treats it as filler.

use crate::error::SpecError;
use serde::{Deserialize, Serialize};

/// Instruction opcode
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Data movement ==========
    /// HLT: stop the machine
    Hlt = 0b0000_0001,
    /// LDI: R[reg] = imm
    Ldi = 0b1000_0010,
    /// PRN: emit R[reg] as a decimal number
    Prn = 0b0100_0111,

    // ========== Stack ==========
    /// PUSH: SP -= 1; mem[SP] = R[reg]
    Push = 0b0100_0101,
    /// POP: R[reg] = mem[SP]; SP += 1
    Pop = 0b0100_0110,

    // ========== Subroutine ==========
    /// CALL: push return address; PC = R[reg]
    Call = 0b0101_0000,
    /// RET: PC = pop()
    Ret = 0b0001_0001,

    // ========== Branch ==========
    /// JMP: PC = R[reg]
    Jmp = 0b0101_0100,
    /// JEQ: if EQUAL { PC = R[reg] }
    Jeq = 0b0101_0101,
    /// JNE: if !EQUAL { PC = R[reg] }
    Jne = 0b0101_0110,

    // ========== ALU ==========
    /// ADD: R[a] = R[a] + R[b]
    Add = 0b1010_0000,
    /// MUL: R[a] = R[a] * R[b]
    Mul = 0b1010_0010,
    /// CMP: FL = compare(R[a], R[b])
    Cmp = 0b1010_0111,
}

impl Opcode {
    pub const ALL: [Opcode; 13] = [
        Opcode::Hlt,
        Opcode::Ldi,
        Opcode::Prn,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
        Opcode::Add,
        Opcode::Mul,
        Opcode::Cmp,
    ];

    const ALU_BIT: u8 = 0b0010_0000;
    const SETS_PC_BIT: u8 = 0b0001_0000;

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0b0000_0001 => Some(Opcode::Hlt),
            0b1000_0010 => Some(Opcode::Ldi),
            0b0100_0111 => Some(Opcode::Prn),
            0b0100_0101 => Some(Opcode::Push),
            0b0100_0110 => Some(Opcode::Pop),
            0b0101_0000 => Some(Opcode::Call),
            0b0001_0001 => Some(Opcode::Ret),
            0b0101_0100 => Some(Opcode::Jmp),
            0b0101_0101 => Some(Opcode::Jeq),
            0b0101_0110 => Some(Opcode::Jne),
            0b1010_0000 => Some(Opcode::Add),
            0b1010_0010 => Some(Opcode::Mul),
            0b1010_0111 => Some(Opcode::Cmp),
            _ => None,
        }
    }

    /// Look up an opcode by its assembly mnemonic (case-insensitive)
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }

    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Number of operand bytes following the opcode
    #[inline]
    pub const fn operand_count(self) -> usize {
        (self.to_u8() >> 6) as usize
    }

    /// Total encoded length in bytes
    #[inline]
    pub const fn encoded_len(self) -> usize {
        1 + self.operand_count()
    }

    #[inline]
    pub const fn is_alu(self) -> bool {
        self.to_u8() & Self::ALU_BIT != 0
    }

    /// Check if the instruction may overwrite PC instead of stepping past itself
    #[inline]
    pub const fn sets_pc(self) -> bool {
        self.to_u8() & Self::SETS_PC_BIT != 0
    }

    /// Symbolic ALU operation for ALU opcodes
    pub const fn alu_op(self) -> Option<AluOp> {
        match self {
            Opcode::Add => Some(AluOp::Add),
            Opcode::Mul => Some(AluOp::Mul),
            Opcode::Cmp => Some(AluOp::Cmp),
            _ => None,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ldi => "LDI",
            Opcode::Prn => "PRN",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Add => "ADD",
            Opcode::Mul => "MUL",
            Opcode::Cmp => "CMP",
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = SpecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(SpecError::InvalidOpcode(value))
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Operation selected by the ALU's second-level dispatch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AluOp {
    Add,
    Mul,
    Cmp,
}

impl AluOp {
    pub const fn name(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Mul => "MUL",
            AluOp::Cmp => "CMP",
        }
    }
}

impl std::fmt::Display for AluOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
