// This file is part of i8255-rs.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

/// A chip represents a register-mapped system component programmed by the
/// host bus. The consumer (usually an emulator's address decoder) interacts
/// with the component exclusively through this trait; all board-level wiring
/// is provided as separate I/O state at construction time (`IoPort`,
/// `IrqLine`), so chips never hold references to one another.
pub trait Chip {
    /// Handle reset signal.
    fn reset(&mut self);
    /// Read value from the specified register.
    fn read(&mut self, reg: u8) -> u8;
    /// Write value to the specified register.
    fn write(&mut self, reg: u8, value: u8);
}
