//! # Program Images for LS-8
//!
//! Two on-disk forms hold the same byte sequence:
//!
//! - **Image text**: one base-2 literal per line, `#` starts a comment.
//!   Lines without a valid literal in `0..=255` are skipped.
//! - **Container**: header + code serialized with bincode.
//!
//! ```text
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 00000001 # HLT
//! ```

use crate::error::SpecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Magic number for LS-8 containers: "LS8\0" = 0x4C533800
pub const MAGIC: u32 = 0x4C53_3800;

/// Container format version
pub const VERSION: u16 = 1;

/// Container header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramHeader {
    /// Magic number: "LS8\0"
    pub magic: u32,

    /// Container format version
    pub version: u16,

    /// Code size in bytes
    pub code_size: u32,
}

impl ProgramHeader {
    pub fn new(code_size: usize) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            code_size: code_size as u32,
        }
    }

    /// Validate the header
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.magic != MAGIC {
            return Err(SpecError::InvalidMagic(self.magic));
        }

        if self.version != VERSION {
            return Err(SpecError::InvalidVersion {
                expected: VERSION,
                found: self.version,
            });
        }

        Ok(())
    }
}

/// A program: the byte sequence loaded into memory from address 0.
///
/// No size limit is enforced here; the machine rejects programs that do not
/// fit in memory when they are loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub header: ProgramHeader,
    pub code: Vec<u8>,
}

impl Program {
    pub fn new(code: Vec<u8>) -> Self {
        Self {
            header: ProgramHeader::new(code.len()),
            code,
        }
    }

    /// Parse image text
    pub fn from_image(text: &str) -> Self {
        Self::new(parse_image(text))
    }

    /// Read and parse an image file
    pub fn from_image_file(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_image(&text))
    }

    #[inline]
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Serialize to the binary container format
    pub fn to_bytes(&self) -> Result<Vec<u8>, SpecError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from the binary container format
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SpecError> {
        let program: Program = bincode::deserialize(bytes)?;
        program.header.validate()?;

        if program.header.code_size as usize != program.code.len() {
            return Err(SpecError::InvalidCodeSize {
                expected: program.header.code_size as usize,
                found: program.code.len(),
            });
        }

        Ok(program)
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Display for Program {
    /// Renders the program as image text
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.code {
            writeln!(f, "{:08b}", byte)?;
        }
        Ok(())
    }
}

/// Parse image text into bytes, in file order
pub fn parse_image(text: &str) -> Vec<u8> {
    let mut bytes = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        match parse_image_line(line) {
            Some(byte) => bytes.push(byte),
            None => {
                let content = strip_comment(line).trim();
                if !content.is_empty() {
                    tracing::debug!("skipping image line {}: {:?}", line_num + 1, content);
                }
            }
        }
    }

    bytes
}

/// Parse one image line; `None` if it holds no valid byte literal
pub fn parse_image_line(line: &str) -> Option<u8> {
    let literal = strip_comment(line).trim();
    let digits = literal
        .strip_prefix("0b")
        .or_else(|| literal.strip_prefix("0B"))
        .unwrap_or(literal);

    if digits.is_empty() || !digits.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }

    // u8 parsing rejects anything above 255
    u8::from_str_radix(digits, 2).ok()
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_line() {
        assert_eq!(parse_image_line("10000010"), Some(0b1000_0010));
        assert_eq!(parse_image_line("  00000001  # HLT"), Some(1));
        assert_eq!(parse_image_line("0b101"), Some(5));
        assert_eq!(parse_image_line("1"), Some(1));
    }

    #[test]
    fn test_parse_image_line_rejects() {
        assert_eq!(parse_image_line(""), None);
        assert_eq!(parse_image_line("# just a comment"), None);
        assert_eq!(parse_image_line("10201"), None);
        assert_eq!(parse_image_line("LDI R0, 8"), None);
        assert_eq!(parse_image_line("-101"), None);
        assert_eq!(parse_image_line("0b"), None);
        // 256 does not fit a memory cell
        assert_eq!(parse_image_line("100000000"), None);
    }

    #[test]
    fn test_parse_image() {
        let text = "\
# print8.ls8
10000010 # LDI R0,8
00000000
00001000

01000111 # PRN R0
00000000
00000001 # HLT
";
        assert_eq!(
            parse_image(text),
            vec![0b1000_0010, 0, 8, 0b0100_0111, 0, 1]
        );
    }

    #[test]
    fn test_display_is_image_text() {
        let program = Program::new(vec![0x82, 0x00, 0x08, 0x01]);
        let text = program.to_string();
        assert_eq!(text.lines().next(), Some("10000010"));
        assert_eq!(Program::from_image(&text), program);
    }

    #[test]
    fn test_container_round_trip() {
        let program = Program::new(vec![0x82, 0x01, 0x2A, 0x01]);
        let bytes = program.to_bytes().unwrap();
        let decoded = Program::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, program);
    }

    #[test]
    fn test_container_bad_magic() {
        let mut program = Program::new(vec![0x01]);
        program.header.magic = 0xDEADBEEF;
        let bytes = program.to_bytes().unwrap();
        assert!(matches!(
            Program::from_bytes(&bytes),
            Err(SpecError::InvalidMagic(0xDEADBEEF))
        ));
    }

    #[test]
    fn test_container_size_mismatch() {
        let mut program = Program::new(vec![0x01, 0x01]);
        program.header.code_size = 5;
        let bytes = program.to_bytes().unwrap();
        assert!(matches!(
            Program::from_bytes(&bytes),
            Err(SpecError::InvalidCodeSize { expected: 5, found: 2 })
        ));
    }

    #[test]
    fn test_container_truncated() {
        assert!(matches!(
            Program::from_bytes(&[0x00, 0x38]),
            Err(SpecError::Encoding(_))
        ));
    }
}
