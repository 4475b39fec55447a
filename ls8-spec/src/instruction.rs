//! LS-8 Instruction Set
//!
//! ## Instruction Formats
//! - 0 operands: [opcode]
//! - 1 operand:  [opcode][reg]
//! - 2 operands: [opcode][reg][imm] or [opcode][reg_a][reg_b]

use crate::error::SpecError;
use crate::opcode::Opcode;
use crate::register::Register;
use serde::{Deserialize, Serialize};

/// Decoded LS-8 instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    // ========== Data movement ==========
    /// LDI: reg = value
    Ldi { reg: Register, value: u8 },

    /// PRN: print reg
    Prn { reg: Register },

    /// HLT: stop
    Hlt,

    // ========== Stack ==========
    /// PUSH: SP -= 1; mem[SP] = reg
    Push { reg: Register },

    /// POP: reg = mem[SP]; SP += 1
    Pop { reg: Register },

    // ========== Subroutine ==========
    /// CALL: push PC + 2; PC = reg
    Call { reg: Register },

    /// RET: PC = pop()
    Ret,

    // ========== Branch ==========
    /// JMP: PC = reg
    Jmp { reg: Register },

    /// JEQ: if EQUAL then PC = reg
    Jeq { reg: Register },

    /// JNE: if not EQUAL then PC = reg
    Jne { reg: Register },

    // ========== ALU ==========
    /// ADD: a = a + b
    Add { a: Register, b: Register },

    /// MUL: a = a * b
    Mul { a: Register, b: Register },

    /// CMP: FL = compare(a, b)
    Cmp { a: Register, b: Register },
}

impl Instruction {
    /// Decode an instruction from its opcode and the bytes that follow it.
    ///
    /// `operands` must hold at least `opcode.operand_count()` bytes; extra
    /// bytes are ignored.
    pub fn decode(opcode: Opcode, operands: &[u8]) -> Result<Self, SpecError> {
        let expected = opcode.operand_count();
        if operands.len() < expected {
            return Err(SpecError::MissingOperands {
                opcode,
                expected,
                found: operands.len(),
            });
        }

        let reg = |i: usize| decode_register(operands[i]);

        let instr = match opcode {
            Opcode::Hlt => Instruction::Hlt,
            Opcode::Ret => Instruction::Ret,
            Opcode::Ldi => Instruction::Ldi {
                reg: reg(0)?,
                value: operands[1],
            },
            Opcode::Prn => Instruction::Prn { reg: reg(0)? },
            Opcode::Push => Instruction::Push { reg: reg(0)? },
            Opcode::Pop => Instruction::Pop { reg: reg(0)? },
            Opcode::Call => Instruction::Call { reg: reg(0)? },
            Opcode::Jmp => Instruction::Jmp { reg: reg(0)? },
            Opcode::Jeq => Instruction::Jeq { reg: reg(0)? },
            Opcode::Jne => Instruction::Jne { reg: reg(0)? },
            Opcode::Add => Instruction::Add {
                a: reg(0)?,
                b: reg(1)?,
            },
            Opcode::Mul => Instruction::Mul {
                a: reg(0)?,
                b: reg(1)?,
            },
            Opcode::Cmp => Instruction::Cmp {
                a: reg(0)?,
                b: reg(1)?,
            },
        };

        Ok(instr)
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Ldi { .. } => Opcode::Ldi,
            Instruction::Prn { .. } => Opcode::Prn,
            Instruction::Hlt => Opcode::Hlt,
            Instruction::Push { .. } => Opcode::Push,
            Instruction::Pop { .. } => Opcode::Pop,
            Instruction::Call { .. } => Opcode::Call,
            Instruction::Ret => Opcode::Ret,
            Instruction::Jmp { .. } => Opcode::Jmp,
            Instruction::Jeq { .. } => Opcode::Jeq,
            Instruction::Jne { .. } => Opcode::Jne,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Mul { .. } => Opcode::Mul,
            Instruction::Cmp { .. } => Opcode::Cmp,
        }
    }

    /// Get instruction mnemonic
    pub fn mnemonic(&self) -> &'static str {
        self.opcode().mnemonic()
    }

    /// Encoded length in bytes
    pub fn encoded_len(&self) -> usize {
        self.opcode().encoded_len()
    }

    /// Encode to the opcode byte followed by its operands
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![self.opcode().to_u8()];
        match *self {
            Instruction::Hlt | Instruction::Ret => {}
            Instruction::Ldi { reg, value } => {
                bytes.push(reg as u8);
                bytes.push(value);
            }
            Instruction::Prn { reg }
            | Instruction::Push { reg }
            | Instruction::Pop { reg }
            | Instruction::Call { reg }
            | Instruction::Jmp { reg }
            | Instruction::Jeq { reg }
            | Instruction::Jne { reg } => bytes.push(reg as u8),
            Instruction::Add { a, b } | Instruction::Mul { a, b } | Instruction::Cmp { a, b } => {
                bytes.push(a as u8);
                bytes.push(b as u8);
            }
        }
        bytes
    }
}

fn decode_register(index: u8) -> Result<Register, SpecError> {
    Register::from_index(index).ok_or(SpecError::InvalidRegister(index))
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Hlt | Instruction::Ret => write!(f, "{}", self.mnemonic()),

            Instruction::Ldi { reg, value } => write!(f, "{} {}, {}", self.mnemonic(), reg, value),

            Instruction::Prn { reg }
            | Instruction::Push { reg }
            | Instruction::Pop { reg }
            | Instruction::Call { reg }
            | Instruction::Jmp { reg }
            | Instruction::Jeq { reg }
            | Instruction::Jne { reg } => write!(f, "{} {}", self.mnemonic(), reg),

            Instruction::Add { a, b } | Instruction::Mul { a, b } | Instruction::Cmp { a, b } => {
                write!(f, "{} {}, {}", self.mnemonic(), a, b)
            }
        }
    }
}
