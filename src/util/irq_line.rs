// This file is part of i8255-rs.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use bit_field::BitField;

/// Active-high interrupt request line. Several sources may share one line;
/// the line stays raised while any source keeps its request asserted.
pub struct IrqLine {
    #[allow(unused)]
    kind: &'static str,
    signal: u8,
}

impl IrqLine {
    pub fn new(kind: &'static str) -> Self {
        Self { kind, signal: 0 }
    }

    pub fn is_raised(&self) -> bool {
        self.signal != 0
    }

    pub fn reset(&mut self) {
        self.signal = 0;
    }

    pub fn set_raised(&mut self, source: usize, value: bool) {
        self.signal.set_bit(source, value);
    }
}
