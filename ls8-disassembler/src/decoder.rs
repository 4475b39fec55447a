//! Instruction decoder

use crate::error::{DisassemblerError, Result};
use ls8_spec::{Instruction, Opcode, SpecError};

/// Decode the instruction starting at `bytes[addr]`
pub fn decode(bytes: &[u8], addr: usize) -> Result<Instruction> {
    let byte = *bytes.get(addr).ok_or(DisassemblerError::OutOfBounds(addr))?;
    let opcode = Opcode::from_u8(byte).ok_or(DisassemblerError::UnknownOpcode(byte))?;

    let needed = opcode.encoded_len();
    let available = bytes.len() - addr;
    if available < needed {
        return Err(DisassemblerError::Truncated {
            addr,
            opcode,
            needed,
            available,
        });
    }

    Instruction::decode(opcode, &bytes[addr + 1..addr + needed]).map_err(|err| match err {
        SpecError::InvalidRegister(index) => DisassemblerError::InvalidRegister {
            addr,
            opcode,
            index,
        },
        // operand length was checked above
        _ => DisassemblerError::Truncated {
            addr,
            opcode,
            needed,
            available,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls8_spec::Register;

    #[test]
    fn test_decode_at_offset() {
        let bytes = [0x01, 0x82, 0x03, 0x2A];
        assert_eq!(decode(&bytes, 0).unwrap(), Instruction::Hlt);
        assert_eq!(
            decode(&bytes, 1).unwrap(),
            Instruction::Ldi {
                reg: Register::R3,
                value: 42
            }
        );
    }

    #[test]
    fn test_decode_unknown_opcode() {
        assert_eq!(
            decode(&[0xFF], 0).unwrap_err(),
            DisassemblerError::UnknownOpcode(0xFF)
        );
        // zero is filler, not an instruction
        assert_eq!(
            decode(&[0x00], 0).unwrap_err(),
            DisassemblerError::UnknownOpcode(0x00)
        );
    }

    #[test]
    fn test_decode_truncated() {
        let err = decode(&[0xA0, 0x01], 0).unwrap_err();
        assert_eq!(
            err,
            DisassemblerError::Truncated {
                addr: 0,
                opcode: Opcode::Add,
                needed: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_decode_invalid_register() {
        let err = decode(&[0x01, 0x45, 0x0C], 1).unwrap_err();
        assert_eq!(
            err,
            DisassemblerError::InvalidRegister {
                addr: 1,
                opcode: Opcode::Push,
                index: 12
            }
        );
    }

    #[test]
    fn test_decode_out_of_bounds() {
        assert_eq!(
            decode(&[0x01], 1).unwrap_err(),
            DisassemblerError::OutOfBounds(1)
        );
    }
}
