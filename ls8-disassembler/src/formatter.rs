//! Instruction formatting to assembly text for LS-8

use ls8_spec::{Instruction, MAX_INSTRUCTION_LEN};

/// Format instruction as assembly text
pub fn format(instr: &Instruction) -> String {
    instr.to_string()
}

/// Format a raw byte as a `DB` directive
pub fn format_data(byte: u8) -> String {
    format!("DB 0x{:02X}", byte)
}

/// Space-separated hex bytes, padded to the widest instruction
pub fn format_bytes(bytes: &[u8]) -> String {
    let hex: Vec<String> = bytes.iter().map(|b| format!("{:02X}", b)).collect();
    format!("{:width$}", hex.join(" "), width = MAX_INSTRUCTION_LEN * 3 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls8_spec::Register;

    #[test]
    fn test_format_instructions() {
        assert_eq!(format(&Instruction::Hlt), "HLT");
        assert_eq!(format(&Instruction::Pop { reg: Register::SP }), "POP R7");
        assert_eq!(
            format(&Instruction::Ldi {
                reg: Register::R2,
                value: 255
            }),
            "LDI R2, 255"
        );
        assert_eq!(
            format(&Instruction::Cmp {
                a: Register::R0,
                b: Register::R1
            }),
            "CMP R0, R1"
        );
    }

    #[test]
    fn test_format_bytes_padding() {
        assert_eq!(format_bytes(&[0x01]), "01      ");
        assert_eq!(format_bytes(&[0x82, 0x00, 0x08]), "82 00 08");
    }

    #[test]
    fn test_format_data() {
        assert_eq!(format_data(0x0F), "DB 0x0F");
    }
}
