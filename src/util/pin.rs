// This file is part of i8255-rs.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

/// Two-state control line that remembers its previous level so edge
/// transitions can be detected. Handshake strobes on the 8255 act on the
/// falling edge only.
pub struct Pin {
    high: bool,
    last: bool,
}

impl Pin {
    pub fn new_high() -> Pin {
        Pin {
            high: true,
            last: true,
        }
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.last && !self.high
    }

    #[inline]
    pub fn is_high(&self) -> bool {
        self.high
    }

    #[inline]
    pub fn is_low(&self) -> bool {
        !self.high
    }

    #[inline]
    pub fn set_active(&mut self, active: bool) {
        self.last = self.high;
        self.high = active;
    }

    pub fn reset(&mut self) {
        self.high = true;
        self.last = true;
    }
}
