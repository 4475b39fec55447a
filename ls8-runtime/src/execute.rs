//! Instruction execution for LS-8

use crate::error::Fault;
use crate::io::IoHandler;
use crate::memory::Memory;
use crate::state::{HaltReason, MachineState};
use ls8_spec::{AluOp, Flags, Instruction, Opcode, Register};

/// Execute single instruction.
///
/// Opcodes without the PC-setting bit step PC past their own bytes once the
/// arm succeeds; the rest move PC themselves. HLT leaves PC on itself.
pub fn execute(
    instr: &Instruction,
    state: &mut MachineState,
    memory: &mut Memory,
    io: &mut IoHandler,
) -> Result<(), Fault> {
    let len = instr.encoded_len();

    match *instr {
        // ========== Data movement ==========
        Instruction::Ldi { reg, value } => {
            state.write_reg(reg, value);
        }

        Instruction::Prn { reg } => {
            io.write(state.read_reg(reg));
        }

        Instruction::Hlt => {
            state.halt(HaltReason::Halt);
        }

        // ========== Stack ==========
        Instruction::Push { reg } => {
            // SP moves before the source register is read, so PUSH R7 stores the new SP
            let sp = decrement_sp(state)?;
            memory.write(sp as usize, state.read_reg(reg))?;
        }

        Instruction::Pop { reg } => {
            let value = memory.read(state.sp() as usize)?;
            state.write_reg(reg, value);
            increment_sp(state)?;
        }

        // ========== Subroutine ==========
        Instruction::Call { reg } => {
            let return_addr = state.pc + len;
            let return_byte = u8::try_from(return_addr)
                .map_err(|_| Fault::MemoryAccess { address: return_addr })?;

            let sp = decrement_sp(state)?;
            memory.write(sp as usize, return_byte)?;
            state.pc = state.read_reg(reg) as usize;
        }

        Instruction::Ret => {
            let return_addr = memory.read(state.sp() as usize)?;
            increment_sp(state)?;
            state.pc = return_addr as usize;
        }

        // ========== Branch ==========
        Instruction::Jmp { reg } => {
            state.pc = state.read_reg(reg) as usize;
        }

        Instruction::Jeq { reg } => {
            let taken = state.flags.is_equal();
            branch(state, reg, taken, len);
        }

        Instruction::Jne { reg } => {
            let taken = !state.flags.is_equal();
            branch(state, reg, taken, len);
        }

        // ========== ALU ==========
        Instruction::Add { a, b } | Instruction::Mul { a, b } | Instruction::Cmp { a, b } => {
            alu(instr.opcode(), a, b, state)?;
        }
    }

    if !instr.opcode().sets_pc() && state.is_running() {
        state.pc += len;
    }

    Ok(())
}

/// Second-level dispatch for ALU opcodes
fn alu(opcode: Opcode, a: Register, b: Register, state: &mut MachineState) -> Result<(), Fault> {
    let op = opcode.alu_op().ok_or(Fault::UnsupportedAluOperation)?;
    let lhs = state.read_reg(a);
    let rhs = state.read_reg(b);

    match op {
        AluOp::Add => state.write_reg(a, lhs.wrapping_add(rhs)),
        AluOp::Mul => state.write_reg(a, lhs.wrapping_mul(rhs)),
        AluOp::Cmp => state.flags = Flags::compare(lhs, rhs),
    }

    Ok(())
}

fn branch(state: &mut MachineState, reg: Register, taken: bool, len: usize) {
    if taken {
        state.pc = state.read_reg(reg) as usize;
    } else {
        state.pc += len;
    }
}

fn decrement_sp(state: &mut MachineState) -> Result<u8, Fault> {
    let sp = state.sp();
    let next = sp.checked_sub(1).ok_or(Fault::StackOverflow { sp })?;
    state.set_sp(next);
    Ok(next)
}

fn increment_sp(state: &mut MachineState) -> Result<u8, Fault> {
    let sp = state.sp();
    let next = sp.checked_add(1).ok_or(Fault::StackUnderflow { sp })?;
    state.set_sp(next);
    Ok(next)
}
