//! Main disassembler logic

use crate::decoder::decode;
use crate::error::DisassemblerError;
use crate::formatter::{format, format_bytes, format_data};
use ls8_spec::{Instruction, Program};

/// One decoded unit of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Instruction(Instruction),
    /// A byte that does not start an instruction: filler, unknown opcode or
    /// the head of a truncated instruction
    Data {
        byte: u8,
        reason: Option<DisassemblerError>,
    },
}

/// A listing line: address, raw bytes and what they decode to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub addr: usize,
    pub bytes: Vec<u8>,
    pub entry: Entry,
}

impl Line {
    /// Assembly text for this line, with a `;` note on undecodable bytes
    pub fn text(&self) -> String {
        match &self.entry {
            Entry::Instruction(instr) => format(instr),
            Entry::Data { byte, reason: None } => format_data(*byte),
            Entry::Data {
                byte,
                reason: Some(err),
            } => format!("{} ; {}", format_data(*byte), err),
        }
    }
}

/// Walk `bytes` from address 0, one instruction or data byte at a time.
///
/// Undecodable bytes become single-byte data lines and decoding resumes at the
/// next address, mirroring how the machine skips them.
pub fn lines(bytes: &[u8]) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut addr = 0;

    while addr < bytes.len() {
        let byte = bytes[addr];
        let line = if byte == 0 {
            Line {
                addr,
                bytes: vec![byte],
                entry: Entry::Data { byte, reason: None },
            }
        } else {
            match decode(bytes, addr) {
                Ok(instr) => {
                    let len = instr.encoded_len();
                    Line {
                        addr,
                        bytes: bytes[addr..addr + len].to_vec(),
                        entry: Entry::Instruction(instr),
                    }
                }
                Err(err) => Line {
                    addr,
                    bytes: vec![byte],
                    entry: Entry::Data {
                        byte,
                        reason: Some(err),
                    },
                },
            }
        };

        addr += line.bytes.len();
        lines.push(line);
    }

    lines
}

/// Disassemble raw bytes into an address-annotated listing
pub fn disassemble(bytes: &[u8]) -> String {
    let mut output = String::new();

    output.push_str("; LS-8 Disassembly\n");
    output.push_str(&format!("; Code size: {} bytes\n", bytes.len()));
    output.push('\n');

    for line in lines(bytes) {
        output.push_str(&format!(
            "0x{:02X}:  {}  {}\n",
            line.addr,
            format_bytes(&line.bytes),
            line.text()
        ));
    }

    output
}

/// Disassemble a loaded program
pub fn disassemble_program(program: &Program) -> String {
    disassemble(program.code())
}
