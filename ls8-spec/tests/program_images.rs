//! Program image and container tests

use ls8_spec::program::{parse_image_line, MAGIC, VERSION};
use ls8_spec::{parse_image, Program, SpecError};
use proptest::prelude::*;

const PRINT8: &str = "\
# print8.ls8
10000010 # LDI R0,8
00000000
00001000
10000010 # LDI R1,9
00000001
00001001
01000111 # PRN R0
00000000
00000001 # HLT
";

#[test]
fn test_parse_print8() {
    let program = Program::from_image(PRINT8);
    assert_eq!(
        program.code(),
        &[0x82, 0x00, 0x08, 0x82, 0x01, 0x09, 0x47, 0x00, 0x01]
    );
}

#[test]
fn test_garbage_lines_are_skipped() {
    let text = "hello\n\n   \n100000000\n2\n00000001\n#10000010\n0b11";
    assert_eq!(parse_image(text), vec![1, 3]);
}

#[test]
fn test_display_renders_image() {
    let program = Program::from_image(PRINT8);
    let rendered = program.to_string();
    assert_eq!(Program::from_image(&rendered), program);
    assert!(rendered.starts_with("10000010\n"));
}

#[test]
fn test_image_file() {
    let path = std::env::temp_dir().join(format!("ls8-image-{}.ls8", std::process::id()));
    std::fs::write(&path, PRINT8).unwrap();
    let program = Program::from_image_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(program.len(), 9);
    assert!(matches!(
        Program::from_image_file(&path),
        Err(SpecError::IoError(_))
    ));
}

#[test]
fn test_container_round_trip() {
    let program = Program::from_image(PRINT8);
    let bytes = program.to_bytes().unwrap();
    let decoded = Program::from_bytes(&bytes).unwrap();

    assert_eq!(decoded, program);
    assert_eq!(decoded.header.magic, MAGIC);
    assert_eq!(decoded.header.version, VERSION);
}

#[test]
fn test_container_rejects_bad_header() {
    let mut program = Program::new(vec![1]);
    program.header.magic = 0xDEADBEEF;
    let bytes = program.to_bytes().unwrap();
    assert!(matches!(
        Program::from_bytes(&bytes),
        Err(SpecError::InvalidMagic(0xDEADBEEF))
    ));

    let mut program = Program::new(vec![1]);
    program.header.code_size = 5;
    let bytes = program.to_bytes().unwrap();
    assert!(matches!(
        Program::from_bytes(&bytes),
        Err(SpecError::InvalidCodeSize { expected: 5, found: 1 })
    ));

    assert!(matches!(
        Program::from_bytes(&[1, 2, 3]),
        Err(SpecError::Encoding(_))
    ));
}

proptest! {
    #[test]
    fn test_binary_literal_parses(byte in any::<u8>()) {
        let line = format!("{:08b} # comment", byte);
        prop_assert_eq!(parse_image_line(&line), Some(byte));
    }

    #[test]
    fn test_image_never_panics(text in "\\PC*") {
        let bytes = parse_image(&text);
        prop_assert!(bytes.len() <= text.lines().count());
    }
}
