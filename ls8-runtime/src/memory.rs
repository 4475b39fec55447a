//! Memory subsystem

use crate::error::{Fault, Result, RuntimeError};
use ls8_spec::MEMORY_SIZE;

/// 256 byte-wide cells, zero-initialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            cells: [0; MEMORY_SIZE],
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        MEMORY_SIZE
    }

    pub fn read(&self, address: usize) -> std::result::Result<u8, Fault> {
        self.cells
            .get(address)
            .copied()
            .ok_or(Fault::MemoryAccess { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> std::result::Result<(), Fault> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(Fault::MemoryAccess { address })?;
        *cell = value;
        Ok(())
    }

    /// Read without faulting; cells past the end read as zero
    #[inline]
    pub fn peek(&self, address: usize) -> u8 {
        self.cells.get(address).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Zero memory and copy `program` in from address 0.
    ///
    /// Memory is left untouched if the program does not fit.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MEMORY_SIZE {
            return Err(RuntimeError::Load {
                size: program.len(),
                capacity: MEMORY_SIZE,
            });
        }

        self.clear();
        self.cells[..program.len()].copy_from_slice(program);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
