//! Machine state for LS-8

use ls8_spec::{Flags, Register, NUM_REGISTERS, STACK_POINTER_INIT};
use serde::{Deserialize, Serialize};

/// Machine state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    /// General-purpose registers (R0-R7)
    pub registers: [u8; NUM_REGISTERS],

    /// Program counter
    pub pc: usize,

    /// Flags from the most recent CMP
    pub flags: Flags,

    /// Cycle count
    pub cycles: u64,

    /// Halt reason, `None` while running
    pub halt_reason: Option<HaltReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// HLT instruction
    Halt,
    /// Configured cycle limit reached
    CycleLimit,
}

impl MachineState {
    pub fn new() -> Self {
        let mut state = MachineState {
            registers: [0; NUM_REGISTERS],
            pc: 0,
            flags: Flags::default(),
            cycles: 0,
            halt_reason: None,
        };
        state.reset();
        state
    }

    /// Back to power-on: zeroed registers and flags, PC 0, SP at the stack base
    pub fn reset(&mut self) {
        self.registers = [0; NUM_REGISTERS];
        self.registers[Register::SP.index()] = STACK_POINTER_INIT;
        self.pc = 0;
        self.flags = Flags::default();
        self.cycles = 0;
        self.halt_reason = None;
    }

    #[inline]
    pub fn read_reg(&self, reg: Register) -> u8 {
        self.registers[reg.index()]
    }

    #[inline]
    pub fn write_reg(&mut self, reg: Register, value: u8) {
        self.registers[reg.index()] = value;
    }

    #[inline]
    pub fn sp(&self) -> u8 {
        self.read_reg(Register::SP)
    }

    #[inline]
    pub fn set_sp(&mut self, value: u8) {
        self.write_reg(Register::SP, value);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.halt_reason.is_none()
    }

    /// Halt execution
    pub fn halt(&mut self, reason: HaltReason) {
        self.halt_reason = Some(reason);
    }

    #[inline]
    pub fn inc_cycles(&mut self) {
        self.cycles += 1;
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = MachineState::new();
        assert_eq!(state.pc, 0);
        assert_eq!(state.sp(), 0xF4);
        assert_eq!(state.flags.bits(), 0);
        assert!(state.is_running());
    }

    #[test]
    fn test_sp_is_r7() {
        let mut state = MachineState::new();
        state.write_reg(Register::R7, 0x80);
        assert_eq!(state.sp(), 0x80);
        state.set_sp(0x10);
        assert_eq!(state.registers[7], 0x10);
    }

    #[test]
    fn test_halt_and_reset() {
        let mut state = MachineState::new();
        state.write_reg(Register::R2, 5);
        state.pc = 9;
        state.inc_cycles();
        state.halt(HaltReason::Halt);
        assert!(!state.is_running());

        state.reset();
        assert!(state.is_running());
        assert_eq!(state.read_reg(Register::R2), 0);
        assert_eq!(state.pc, 0);
        assert_eq!(state.cycles, 0);
    }
}
