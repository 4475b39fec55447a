//! Program image rendering
//!
//! An image is one 8-digit binary literal per line; the first byte of each
//! instruction carries its disassembly as a `#` comment.

use ls8_disassembler::lines;

/// Render bytes as program image text
pub fn to_image_text(bytes: &[u8]) -> String {
    let mut out = String::new();

    for line in lines(bytes) {
        for (i, byte) in line.bytes.iter().enumerate() {
            if i == 0 {
                out.push_str(&format!("{:08b} # {}\n", byte, line.text()));
            } else {
                out.push_str(&format!("{:08b}\n", byte));
            }
        }
    }

    out
}
