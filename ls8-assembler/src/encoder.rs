//! Instruction encoding to LS-8 bytes
//!
//! Every instruction is its opcode byte followed by 0-2 operand bytes: a
//! register index or an 8-bit immediate.

use crate::error::{AssemblerError, Result};
use crate::parser::{Operand, Value};
use ls8_spec::{Instruction, Opcode, Register};

/// Encode instruction to its byte sequence
pub fn encode(instr: &Instruction) -> Vec<u8> {
    instr.to_bytes()
}

/// Build an instruction from a mnemonic's operands.
///
/// `resolve` turns label references into bytes.
pub fn build<F>(opcode: Opcode, operands: &[Operand], line: usize, resolve: F) -> Result<Instruction>
where
    F: Fn(&Value) -> Result<u8>,
{
    let shape_error = || AssemblerError::SyntaxError {
        line,
        column: 0,
        message: format!("{} expects {}", opcode, describe_shape(opcode)),
    };

    let instr = match (opcode, operands) {
        (Opcode::Hlt, []) => Instruction::Hlt,
        (Opcode::Ret, []) => Instruction::Ret,

        (Opcode::Ldi, [Operand::Register(reg), Operand::Value(value)]) => Instruction::Ldi {
            reg: *reg,
            value: resolve(value)?,
        },

        (op, [Operand::Register(reg)]) if op.operand_count() == 1 => single_register(op, *reg),

        (op, [Operand::Register(a), Operand::Register(b)]) if op.is_alu() => match op {
            Opcode::Add => Instruction::Add { a: *a, b: *b },
            Opcode::Mul => Instruction::Mul { a: *a, b: *b },
            _ => Instruction::Cmp { a: *a, b: *b },
        },

        _ => return Err(shape_error()),
    };

    Ok(instr)
}

fn single_register(opcode: Opcode, reg: Register) -> Instruction {
    match opcode {
        Opcode::Prn => Instruction::Prn { reg },
        Opcode::Push => Instruction::Push { reg },
        Opcode::Pop => Instruction::Pop { reg },
        Opcode::Call => Instruction::Call { reg },
        Opcode::Jmp => Instruction::Jmp { reg },
        Opcode::Jeq => Instruction::Jeq { reg },
        _ => Instruction::Jne { reg },
    }
}

fn describe_shape(opcode: Opcode) -> &'static str {
    match opcode {
        Opcode::Hlt | Opcode::Ret => "no operands",
        Opcode::Ldi => "a register and an immediate",
        Opcode::Add | Opcode::Mul | Opcode::Cmp => "two registers",
        _ => "one register",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: &Value) -> Result<u8> {
        match value {
            Value::Literal(byte) => Ok(*byte),
            Value::Label(label) => Err(AssemblerError::UndefinedLabel {
                line: 1,
                label: label.clone(),
            }),
        }
    }

    #[test]
    fn test_encode_ldi() {
        let instr = Instruction::Ldi {
            reg: Register::R0,
            value: 8,
        };
        assert_eq!(encode(&instr), vec![0b1000_0010, 0b0000_0000, 0b0000_1000]);
    }

    #[test]
    fn test_encode_hlt() {
        assert_eq!(encode(&Instruction::Hlt), vec![0b0000_0001]);
    }

    #[test]
    fn test_build_every_single_register_opcode() {
        for opcode in Opcode::ALL.into_iter().filter(|op| op.operand_count() == 1) {
            let instr = build(opcode, &[Operand::Register(Register::R5)], 1, literal).unwrap();
            assert_eq!(instr.opcode(), opcode);
            assert_eq!(encode(&instr), vec![opcode.to_u8(), 5]);
        }
    }

    #[test]
    fn test_build_alu() {
        let ops = [
            Operand::Register(Register::R1),
            Operand::Register(Register::R2),
        ];
        assert_eq!(
            build(Opcode::Cmp, &ops, 1, literal).unwrap(),
            Instruction::Cmp {
                a: Register::R1,
                b: Register::R2
            }
        );
    }

    #[test]
    fn test_build_wrong_shape() {
        let reg = Operand::Register(Register::R0);
        let imm = Operand::Value(Value::Literal(1));

        assert!(build(Opcode::Hlt, &[reg.clone()], 1, literal).is_err());
        assert!(build(Opcode::Prn, &[], 1, literal).is_err());
        assert!(build(Opcode::Prn, &[imm.clone()], 1, literal).is_err());
        assert!(build(Opcode::Ldi, &[reg.clone(), reg.clone()], 1, literal).is_err());
        assert!(build(Opcode::Add, &[reg.clone(), imm], 1, literal).is_err());

        let err = build(Opcode::Add, &[reg], 4, literal).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error at line 4, column 0: ADD expects two registers"
        );
    }

    #[test]
    fn test_build_unresolved_label() {
        let ops = [
            Operand::Register(Register::R0),
            Operand::Value(Value::Label("nowhere".to_string())),
        ];
        assert!(matches!(
            build(Opcode::Ldi, &ops, 1, literal),
            Err(AssemblerError::UndefinedLabel { .. })
        ));
    }
}
