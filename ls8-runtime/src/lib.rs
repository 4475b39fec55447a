//! # LS-8 Runtime
//!
//! Execute LS-8 programs.
//!
//! The [`Machine`] owns 256 bytes of memory, eight 8-bit registers, the flags
//! byte and the program counter. [`Machine::run`] drives the fetch/decode/execute
//! loop until `HLT` or the configured cycle limit.
//!
//! ## Features
//!
//! - **13 instructions**: data movement, stack, subroutines, branches and ALU
//! - **Stack**: grows down from `0xF4`, R7 is the stack pointer
//! - **Unknown opcodes**: skipped one byte at a time and reported, not fatal
//! - **Trace hook**: per-cycle `TRACE:` dump of PC, instruction bytes and registers
//!
//! ## Example
//!
//! ```rust
//! use ls8_runtime::{Machine, MachineConfig};
//!
//! // LDI R0,8; PRN R0; HLT
//! let mut machine = Machine::new(MachineConfig::default());
//! machine.load(&[0x82, 0x00, 0x08, 0x47, 0x00, 0x01]).unwrap();
//! let result = machine.run().unwrap();
//! assert_eq!(result.outputs, vec![8]);
//! ```

pub mod error;
pub mod execute;
pub mod io;
pub mod memory;
pub mod state;
pub mod trace;
pub mod vm;

pub use error::{Fault, RuntimeError};
pub use io::IoHandler;
pub use memory::Memory;
pub use state::{HaltReason, MachineState};
pub use trace::trace_line;
pub use vm::{ExecutionResult, Machine, MachineConfig, SkippedOpcode, Step};

/// Simple execution helper
///
/// Runs raw program bytes with the default configuration and returns the PRN outputs.
pub fn run(program: &[u8]) -> Result<Vec<u8>, RuntimeError> {
    let mut machine = Machine::default();
    machine.load(program)?;
    Ok(machine.run()?.outputs)
}
