//! Per-cycle state dump

use crate::memory::Memory;
use crate::state::MachineState;
use std::fmt::Write;

/// Render `TRACE: PC | M[PC] M[PC+1] M[PC+2] | R0 .. R7` in upper-case hex
pub fn trace_line(state: &MachineState, memory: &Memory) -> String {
    let mut line = format!(
        "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
        state.pc,
        memory.peek(state.pc),
        memory.peek(state.pc + 1),
        memory.peek(state.pc + 2)
    );

    for value in state.registers {
        // writing to a String cannot fail
        let _ = write!(line, " {:02X}", value);
    }

    line
}
