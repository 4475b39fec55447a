//! I/O handling

/// Collects the values emitted by PRN, in order
#[derive(Debug, Clone, Default)]
pub struct IoHandler {
    outputs: Vec<u8>,
}

impl IoHandler {
    pub fn new() -> Self {
        IoHandler {
            outputs: Vec::new(),
        }
    }

    pub fn write(&mut self, value: u8) {
        self.outputs.push(value);
    }

    pub fn outputs(&self) -> &[u8] {
        &self.outputs
    }

    pub fn clear(&mut self) {
        self.outputs.clear();
    }
}
