//! End-to-end integration tests for the LS-8 toolchain
//!
//! These tests verify the complete workflow:
//! 1. Parse a program image (or assemble source) into a Program
//! 2. Execute it on the machine
//! 3. Check outputs, final state and reported faults
//! 4. Disassemble the program back to source

use ls8_assembler::{assemble, to_image_text};
use ls8_disassembler::disassemble;
use ls8_runtime::{Fault, HaltReason, Machine, MachineConfig, RuntimeError};
use ls8_spec::{Program, Register};

const PRINT8: &str = r#"
# print8.ls8
#
# From print8.asm:
#
# LDI R0,8
# LDI R1,9
# PRN R0
# HLT

10000010 # LDI R0,8
00000000
00001000
10000010 # LDI R1,9
00000001
00001001
01000111 # PRN R0
00000000
00000001 # HLT
"#;

fn run_image(image: &str) -> (Machine, ls8_runtime::ExecutionResult) {
    let program = Program::from_image(image);
    let mut machine = Machine::with_program(&program, MachineConfig::default()).unwrap();
    let result = machine.run().unwrap();
    (machine, result)
}

// ============================================================================
// Image -> Execute Tests
// ============================================================================

#[test]
fn test_print8_image() {
    let (machine, result) = run_image(PRINT8);

    assert_eq!(result.outputs, vec![8]);
    assert_eq!(result.halt_reason, HaltReason::Halt);
    assert!(!machine.is_running());
    assert_eq!(machine.state().pc, 8);
    assert_eq!(machine.state().read_reg(Register::R1), 9);
}

#[test]
fn test_stack_image() {
    let source = r#"
        LDI R0, 1
        LDI R1, 2
        PUSH R0
        PUSH R1
        LDI R0, 3
        POP R0
        PRN R0      ; 2
        POP R0
        PRN R0      ; 1
        HLT
    "#;
    let image = to_image_text(assemble(source).unwrap().code());
    let (_, result) = run_image(&image);
    assert_eq!(result.outputs, vec![2, 1]);
}

#[test]
fn test_call_image() {
    // square 2, 4, 16 via a subroutine
    let source = r#"
            LDI R1, square
            LDI R0, 2
        again:
            CALL R1
            PRN R0
            LDI R2, 16
            CMP R0, R2
            LDI R3, again
            JNE R3
            HLT
        square:
            MUL R0, R0
            RET
    "#;
    let image = to_image_text(assemble(source).unwrap().code());
    let (machine, result) = run_image(&image);

    assert_eq!(result.outputs, vec![4, 16]);
    assert_eq!(machine.state().sp(), 0xF4);
}

#[test]
fn test_image_with_garbage_and_unknown_opcode() {
    let image = "not a byte\n11111111 # unknown\n\n10000010\n00000000\n00000101\n01000111\n00000000\n00000001\n";
    let (_, result) = run_image(image);

    assert_eq!(result.outputs, vec![5]);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].opcode, 0xFF);
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_oversized_image_is_rejected() {
    let image = "00000001\n".repeat(257);
    let program = Program::from_image(&image);
    let err = Machine::with_program(&program, MachineConfig::default()).unwrap_err();
    assert!(matches!(err, RuntimeError::Load { size: 257, capacity: 256 }));
}

#[test]
fn test_runaway_stack_is_fatal() {
    // two-byte stack over the LDI that already ran
    let source = r#"
        LDI SP, 2
        LDI R1, loop
    loop:
        PUSH R0
        JMP R1
    "#;
    let program = assemble(source).unwrap();
    let mut machine = Machine::with_program(&program, MachineConfig::default()).unwrap();
    let err = machine.run().unwrap_err();

    assert!(matches!(err.fault(), Some(Fault::StackOverflow { sp: 0 })));
    assert_eq!(err.pc(), Some(6));
    assert_eq!(machine.state().sp(), 0);
}

#[test]
fn test_trace_through_full_run() {
    let program = Program::from_image(PRINT8);
    let config = MachineConfig {
        trace: true,
        ..MachineConfig::default()
    };
    let mut machine = Machine::with_program(&program, config).unwrap();
    let result = machine.run().unwrap();

    assert_eq!(result.trace.len(), 4);
    assert_eq!(result.trace[0], "TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4");
    assert_eq!(result.trace[3], "TRACE: 08 | 01 00 00 | 08 09 00 00 00 00 00 F4");
}

// ============================================================================
// Disassemble Tests
// ============================================================================

#[test]
fn test_disassembly_reassembles() {
    let program = Program::from_image(PRINT8);
    let listing = disassemble(program.code());

    // strip "0xNN:  bytes  " columns back to plain source
    let source: String = listing
        .lines()
        .filter(|line| line.starts_with("0x"))
        .map(|line| format!("{}\n", &line[17..]))
        .collect();

    let reassembled = assemble(&source).unwrap();
    assert_eq!(reassembled.code(), program.code());
}
