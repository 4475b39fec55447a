//! Virtual Machine for LS-8

use crate::error::{Fault, Result, RuntimeError};
use crate::execute::execute;
use crate::io::IoHandler;
use crate::memory::Memory;
use crate::state::{HaltReason, MachineState};
use crate::trace::trace_line;
use std::collections::VecDeque;
use ls8_spec::{Instruction, Opcode, Program, MAX_INSTRUCTION_LEN};

/// Machine configuration
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Maximum number of cycles before halting
    pub max_cycles: u64,

    /// Emit a `TRACE:` line before every cycle
    pub trace: bool,

    /// Most recent trace lines kept for `ExecutionResult::trace`; 0 keeps none
    pub trace_buffer: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_cycles: 1_000_000,
            trace: false,
            trace_buffer: 1024,
        }
    }
}

/// An opcode byte the machine stepped over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedOpcode {
    pub pc: usize,
    pub opcode: u8,
}

/// Execution result
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Number of cycles executed since load
    pub cycles: u64,

    /// Values emitted by PRN, in order
    pub outputs: Vec<u8>,

    /// Reason for halting
    pub halt_reason: HaltReason,

    /// Unknown opcodes encountered, in order
    pub skipped: Vec<SkippedOpcode>,

    /// Last `trace_buffer` trace lines (if tracing enabled)
    pub trace: Vec<String>,
}

/// What a single cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed(Instruction),
    /// A zero byte; PC moved by one
    Filler,
    /// Unknown opcode; PC moved by one
    Skipped(u8),
    /// Machine was already halted, nothing happened
    Halted,
}

/// LS-8 Virtual Machine
#[derive(Debug, Clone)]
pub struct Machine {
    /// Registers, PC, flags
    state: MachineState,

    /// Memory subsystem
    memory: Memory,

    /// Output sink
    io: IoHandler,

    /// Configuration
    config: MachineConfig,

    skipped: Vec<SkippedOpcode>,

    trace: VecDeque<String>,
}

impl Machine {
    /// Create a machine with empty memory
    pub fn new(config: MachineConfig) -> Self {
        Self {
            state: MachineState::new(),
            memory: Memory::new(),
            io: IoHandler::new(),
            config,
            skipped: Vec::new(),
            trace: VecDeque::new(),
        }
    }

    /// Create a machine and load `program` into it
    pub fn with_program(program: &Program, config: MachineConfig) -> Result<Self> {
        let mut machine = Self::new(config);
        machine.load(program.code())?;
        Ok(machine)
    }

    /// Reset all execution state and copy `program` into memory from address 0
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load_program(program)?;
        self.state.reset();
        self.io.clear();
        self.skipped.clear();
        self.trace.clear();

        tracing::debug!(bytes = program.len(), "program loaded");
        Ok(())
    }

    /// Run until HLT or the cycle limit
    pub fn run(&mut self) -> Result<ExecutionResult> {
        self.run_with(|_| {})
    }

    /// Run until HLT or the cycle limit, handing each PRN value to `on_output`
    /// in the cycle that emits it.
    ///
    /// Buffered trace lines move into the result.
    pub fn run_with<F>(&mut self, mut on_output: F) -> Result<ExecutionResult>
    where
        F: FnMut(u8),
    {
        let mut emitted = self.io.outputs().len();

        while self.state.is_running() {
            if self.state.cycles >= self.config.max_cycles {
                self.state.halt(HaltReason::CycleLimit);
                tracing::info!(cycles = self.state.cycles, "cycle limit reached");
                break;
            }

            self.step()?;

            let outputs = self.io.outputs();
            for &value in &outputs[emitted..] {
                on_output(value);
            }
            emitted = outputs.len();
        }

        Ok(ExecutionResult {
            cycles: self.state.cycles,
            outputs: self.io.outputs().to_vec(),
            halt_reason: self.state.halt_reason.unwrap_or(HaltReason::Halt),
            skipped: self.skipped.clone(),
            trace: std::mem::take(&mut self.trace).into(),
        })
    }

    /// Execute one cycle
    pub fn step(&mut self) -> Result<Step> {
        if !self.state.is_running() {
            return Ok(Step::Halted);
        }

        if self.config.trace {
            let line = trace_line(&self.state, &self.memory);
            tracing::trace!(target: "ls8::trace", "{}", line);
            self.record_trace(line);
        }

        let pc = self.state.pc;
        let byte = self.memory.read(pc).map_err(|fault| RuntimeError::Execution {
            pc,
            opcode: None,
            fault,
        })?;

        let step = match self.dispatch(byte) {
            Ok(step) => step,
            Err(fault) if !fault.is_fatal() => {
                tracing::warn!(pc, opcode = byte, "unknown opcode {:#04x}, skipping", byte);
                self.skipped.push(SkippedOpcode { pc, opcode: byte });
                self.state.pc += 1;
                Step::Skipped(byte)
            }
            Err(fault) => {
                return Err(RuntimeError::Execution {
                    pc,
                    opcode: Some(byte),
                    fault,
                })
            }
        };

        self.state.inc_cycles();

        if let Some(reason) = self.state.halt_reason {
            tracing::info!(?reason, cycles = self.state.cycles, "machine halted");
        }

        Ok(step)
    }

    fn dispatch(&mut self, byte: u8) -> std::result::Result<Step, Fault> {
        if byte == 0 {
            self.state.pc += 1;
            return Ok(Step::Filler);
        }

        let opcode = Opcode::from_u8(byte).ok_or(Fault::UnknownOpcode)?;
        let instr = self.fetch_and_decode(opcode)?;

        tracing::debug!(pc = self.state.pc, "{}", instr);
        execute(&instr, &mut self.state, &mut self.memory, &mut self.io)?;

        Ok(Step::Executed(instr))
    }

    fn record_trace(&mut self, line: String) {
        let capacity = self.config.trace_buffer;
        if capacity == 0 {
            return;
        }
        if self.trace.len() == capacity {
            self.trace.pop_front();
        }
        self.trace.push_back(line);
    }

    /// Read the operand bytes following the opcode and decode them
    fn fetch_and_decode(&self, opcode: Opcode) -> std::result::Result<Instruction, Fault> {
        let count = opcode.operand_count();
        let mut operands = [0u8; MAX_INSTRUCTION_LEN - 1];

        for (i, slot) in operands.iter_mut().take(count).enumerate() {
            *slot = self.memory.read(self.state.pc + 1 + i)?;
        }

        Ok(Instruction::decode(opcode, &operands[..count])?)
    }

    /// Current state (for debugging)
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Memory (for debugging)
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn outputs(&self) -> &[u8] {
        self.io.outputs()
    }

    pub fn skipped(&self) -> &[SkippedOpcode] {
        &self.skipped
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}
