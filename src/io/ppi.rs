// This file is part of i8255-rs.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use bit_field::BitField;
use log::LogLevel;

use crate::factory::Chip;
use crate::util::{IoPort, IrqLine, Pin, Shared};

// Spec: INTEL 8255A PROGRAMMABLE PERIPHERAL INTERFACE Datasheet
// Spec: https://en.wikipedia.org/wiki/Intel_8255

/// Control word written at power-up and on reset: both groups in mode 0,
/// all ports configured as inputs.
const CONTROL_RESET: u8 = 0x9b;

pub mod reg {
    pub const PORT_A: u8 = 0x00;
    pub const PORT_B: u8 = 0x01;
    pub const PORT_C: u8 = 0x02;
    pub const CONTROL: u8 = 0x03;
}

/// The 8255 partitions its ports into group A (port A plus the upper nibble
/// of port C) and group B (port B plus the lower nibble of port C). Each
/// group carries its own handshake flags and interrupt request.
#[derive(Copy, Clone, PartialEq)]
pub enum Group {
    A = 0,
    B = 1,
}

impl Group {
    pub fn irq_source(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, PartialEq)]
enum Direction {
    Input,
    Output,
}

/// Role of a single port C bit under the current mode configuration. In
/// modes 1 and 2 the chip steals port C bits for handshake lines; everything
/// else stays generic I/O. Strobe and acknowledge positions are inputs
/// driven by the peripheral and read back as the INTE latches.
#[derive(Copy, Clone, PartialEq)]
enum PcSignal {
    Generic,
    ObfA,
    AckA,
    StbA,
    IbfA,
    IntrA,
    ObfB,
    AckB,
    StbB,
    IbfB,
    IntrB,
}

pub struct Ppi {
    // Functional Units
    control: u8,
    output_latch: [u8; 3],
    input_latch: [u8; 3],
    ibf: [bool; 2],
    obf: [bool; 2],
    inte: [bool; 2],
    inte1: bool,
    inte2: bool,
    intr: [bool; 2],
    // I/O
    port_a: Shared<IoPort>,
    port_b: Shared<IoPort>,
    port_c: Shared<IoPort>,
    intr_a_line: Shared<IrqLine>,
    intr_b_line: Shared<IrqLine>,
    pc2_pin: Pin,
    pc4_pin: Pin,
    pc6_pin: Pin,
}

impl Ppi {
    pub fn new(
        port_a: Shared<IoPort>,
        port_b: Shared<IoPort>,
        port_c: Shared<IoPort>,
        intr_a_line: Shared<IrqLine>,
        intr_b_line: Shared<IrqLine>,
    ) -> Self {
        Self {
            control: CONTROL_RESET,
            output_latch: [0; 3],
            input_latch: [0; 3],
            ibf: [false; 2],
            obf: [false; 2],
            inte: [false; 2],
            inte1: false,
            inte2: false,
            intr: [false; 2],
            port_a,
            port_b,
            port_c,
            intr_a_line,
            intr_b_line,
            pc2_pin: Pin::new_high(),
            pc4_pin: Pin::new_high(),
            pc6_pin: Pin::new_high(),
        }
    }

    // -- Mode decoding

    fn group_a_mode(&self) -> u8 {
        match (self.control >> 5) & 0x03 {
            0 => 0,
            1 => 1,
            _ => 2,
        }
    }

    fn group_b_mode(&self) -> u8 {
        (self.control >> 2) & 0x01
    }

    fn port_a_dir(&self) -> Direction {
        if self.control.get_bit(4) {
            Direction::Input
        } else {
            Direction::Output
        }
    }

    fn port_b_dir(&self) -> Direction {
        if self.control.get_bit(1) {
            Direction::Input
        } else {
            Direction::Output
        }
    }

    fn pc_generic_dir(&self, bit: usize) -> Direction {
        let select = if bit < 4 { 0 } else { 3 };
        if self.control.get_bit(select) {
            Direction::Input
        } else {
            Direction::Output
        }
    }

    /// Port A drives its pins when configured as an output or when group A
    /// runs in mode 2, where the direction bit is ignored.
    fn port_a_driven(&self) -> bool {
        self.group_a_mode() == 2 || self.port_a_dir() == Direction::Output
    }

    fn port_b_driven(&self) -> bool {
        self.port_b_dir() == Direction::Output
    }

    /// Fixed assignment of port C bits under the current mode configuration.
    fn pc_signals(&self) -> [PcSignal; 8] {
        let mut signals = [PcSignal::Generic; 8];
        match self.group_a_mode() {
            1 => {
                signals[3] = PcSignal::IntrA;
                match self.port_a_dir() {
                    Direction::Input => {
                        signals[4] = PcSignal::StbA;
                        signals[5] = PcSignal::IbfA;
                    }
                    Direction::Output => {
                        signals[6] = PcSignal::AckA;
                        signals[7] = PcSignal::ObfA;
                    }
                }
            }
            2 => {
                signals[3] = PcSignal::IntrA;
                signals[4] = PcSignal::StbA;
                signals[5] = PcSignal::IbfA;
                signals[6] = PcSignal::AckA;
                signals[7] = PcSignal::ObfA;
            }
            _ => {}
        }
        if self.group_b_mode() == 1 {
            signals[0] = PcSignal::IntrB;
            match self.port_b_dir() {
                Direction::Input => {
                    signals[1] = PcSignal::IbfB;
                    signals[2] = PcSignal::StbB;
                }
                Direction::Output => {
                    signals[1] = PcSignal::ObfB;
                    signals[2] = PcSignal::AckB;
                }
            }
        }
        signals
    }

    // -- Control

    /// Mode-set write. Changing mode invalidates any in-flight handshake, so
    /// all flags, enables and latches return to their power-up state before
    /// directions are re-derived and the pins re-driven.
    fn set_mode(&mut self, value: u8) {
        self.control = value;
        self.output_latch = [0; 3];
        self.ibf = [false; 2];
        self.obf = [false; 2];
        self.inte = [false; 2];
        self.inte1 = false;
        self.inte2 = false;
        self.input_latch[0] = self.port_a.borrow().get_input();
        self.input_latch[1] = self.port_b.borrow().get_input();
        self.input_latch[2] = self.port_c.borrow().get_input();
        self.update_intr(Group::A);
        self.update_intr(Group::B);
        self.output_pa();
        self.output_pb();
        self.output_pc();
    }

    /// Single-bit set/reset on port C (control write with bit 7 clear).
    /// When the addressed bit is the strobe/acknowledge position of the
    /// current mode, the same write doubles as the interrupt enable latch.
    fn bit_set_reset(&mut self, value: u8) {
        let bit = ((value >> 1) & 0x07) as usize;
        let state = value.get_bit(0);
        self.output_latch[2].set_bit(bit, state);
        match self.pc_signals()[bit] {
            PcSignal::StbA => {
                if self.group_a_mode() == 2 {
                    self.inte2 = state;
                } else {
                    self.inte[Group::A as usize] = state;
                }
            }
            PcSignal::AckA => {
                if self.group_a_mode() == 2 {
                    self.inte1 = state;
                } else {
                    self.inte[Group::A as usize] = state;
                }
            }
            PcSignal::StbB | PcSignal::AckB => {
                self.inte[Group::B as usize] = state;
            }
            _ => {}
        }
        self.update_intr(Group::A);
        self.update_intr(Group::B);
        self.output_pc();
    }

    /// Recompute the group's interrupt request from its enable and flag
    /// state. INTR is combinational; it is re-derived on every write that
    /// can affect it and mirrored onto the group's request line.
    fn update_intr(&mut self, group: Group) {
        let value = match group {
            Group::A => match self.group_a_mode() {
                0 => false,
                1 => match self.port_a_dir() {
                    Direction::Input => self.inte[0] && self.ibf[0],
                    Direction::Output => self.inte[0] && !self.obf[0],
                },
                _ => (self.inte1 && !self.obf[0]) || (self.inte2 && self.ibf[0]),
            },
            Group::B => {
                if self.group_b_mode() == 1 {
                    match self.port_b_dir() {
                        Direction::Input => self.inte[1] && self.ibf[1],
                        Direction::Output => self.inte[1] && !self.obf[1],
                    }
                } else {
                    false
                }
            }
        };
        self.intr[group as usize] = value;
        match group {
            Group::A => self
                .intr_a_line
                .borrow_mut()
                .set_raised(group.irq_source(), value),
            Group::B => self
                .intr_b_line
                .borrow_mut()
                .set_raised(group.irq_source(), value),
        }
    }

    // -- Port reads

    fn read_pa(&mut self) -> u8 {
        match self.group_a_mode() {
            0 => match self.port_a_dir() {
                Direction::Input => {
                    let value = self.port_a.borrow().get_input();
                    self.input_latch[0] = value;
                    value
                }
                Direction::Output => self.output_latch[0],
            },
            1 => match self.port_a_dir() {
                Direction::Input => self.ack_read_pa(),
                Direction::Output => self.output_latch[0],
            },
            // mode 2, reads always go through the input latch
            _ => self.ack_read_pa(),
        }
    }

    /// Strobed read of port A: hand out the latched byte and drop IBF, which
    /// acknowledges the transfer to the peripheral polling port C.
    fn ack_read_pa(&mut self) -> u8 {
        let value = self.input_latch[0];
        self.ibf[Group::A as usize] = false;
        self.update_intr(Group::A);
        self.output_pc();
        value
    }

    fn read_pb(&mut self) -> u8 {
        match self.group_b_mode() {
            0 => match self.port_b_dir() {
                Direction::Input => {
                    let value = self.port_b.borrow().get_input();
                    self.input_latch[1] = value;
                    value
                }
                Direction::Output => self.output_latch[1],
            },
            _ => match self.port_b_dir() {
                Direction::Input => {
                    let value = self.input_latch[1];
                    self.ibf[Group::B as usize] = false;
                    self.update_intr(Group::B);
                    self.output_pc();
                    value
                }
                Direction::Output => self.output_latch[1],
            },
        }
    }

    /// Status read of port C. Handshake flags appear at their assigned
    /// positions (IBF and INTR active high, /OBF active low), the strobe and
    /// acknowledge positions read back the INTE latches, and generic bits
    /// pass through live pin state or the output latch per direction.
    fn read_pc(&self) -> u8 {
        let signals = self.pc_signals();
        let live = self.port_c.borrow().get_input();
        let mode_2 = self.group_a_mode() == 2;
        let mut data = 0u8;
        for bit in 0..8 {
            let value = match signals[bit] {
                PcSignal::Generic => match self.pc_generic_dir(bit) {
                    Direction::Input => live.get_bit(bit),
                    Direction::Output => self.output_latch[2].get_bit(bit),
                },
                PcSignal::ObfA => !self.obf[0],
                PcSignal::IbfA => self.ibf[0],
                PcSignal::IntrA => self.intr[0],
                PcSignal::StbA => {
                    if mode_2 {
                        self.inte2
                    } else {
                        self.inte[0]
                    }
                }
                PcSignal::AckA => {
                    if mode_2 {
                        self.inte1
                    } else {
                        self.inte[0]
                    }
                }
                PcSignal::ObfB => !self.obf[1],
                PcSignal::IbfB => self.ibf[1],
                PcSignal::IntrB => self.intr[1],
                PcSignal::StbB | PcSignal::AckB => self.inte[1],
            };
            data.set_bit(bit, value);
        }
        data
    }

    // -- Port writes

    fn write_pa(&mut self, value: u8) {
        // The output latch shadows the written value even when port A is an
        // input; it never reaches the pins in that configuration.
        self.output_latch[0] = value;
        if !self.port_a_driven() {
            return;
        }
        if self.group_a_mode() != 0 {
            self.obf[Group::A as usize] = true;
            self.update_intr(Group::A);
        }
        self.output_pa();
        if self.group_a_mode() != 0 {
            self.output_pc();
        }
    }

    fn write_pb(&mut self, value: u8) {
        self.output_latch[1] = value;
        if !self.port_b_driven() {
            return;
        }
        if self.group_b_mode() != 0 {
            self.obf[Group::B as usize] = true;
            self.update_intr(Group::B);
        }
        self.output_pb();
        if self.group_b_mode() != 0 {
            self.output_pc();
        }
    }

    fn write_pc(&mut self, value: u8) {
        self.output_latch[2] = value;
        self.output_pc();
    }

    // -- Pin drivers

    fn output_pa(&self) {
        if self.port_a_driven() {
            self.port_a.borrow_mut().drive(self.output_latch[0]);
        }
    }

    fn output_pb(&self) {
        if self.port_b_driven() {
            self.port_b.borrow_mut().drive(self.output_latch[1]);
        }
    }

    fn output_pc(&self) {
        let signals = self.pc_signals();
        let mut data = 0u8;
        for bit in 0..8 {
            let value = match signals[bit] {
                PcSignal::Generic => match self.pc_generic_dir(bit) {
                    // undriven pins float high
                    Direction::Input => true,
                    Direction::Output => self.output_latch[2].get_bit(bit),
                },
                PcSignal::ObfA => !self.obf[0],
                PcSignal::IbfA => self.ibf[0],
                PcSignal::IntrA => self.intr[0],
                PcSignal::ObfB => !self.obf[1],
                PcSignal::IbfB => self.ibf[1],
                PcSignal::IntrB => self.intr[1],
                // peripheral-driven inputs
                PcSignal::StbA | PcSignal::AckA | PcSignal::StbB | PcSignal::AckB => true,
            };
            data.set_bit(bit, value);
        }
        self.port_c.borrow_mut().drive(data);
    }

    // -- Handshake line inputs

    /// Group B strobe/acknowledge input (/STBB or /ACKB depending on the
    /// configured direction). Active in group B mode 1 only.
    pub fn pc2_w(&mut self, state: bool) {
        self.pc2_pin.set_active(state);
        if self.group_b_mode() != 1 || !self.pc2_pin.is_falling() {
            return;
        }
        match self.port_b_dir() {
            Direction::Input => {
                if !self.ibf[Group::B as usize] {
                    self.input_latch[1] = self.port_b.borrow().get_input();
                    self.ibf[Group::B as usize] = true;
                    self.update_intr(Group::B);
                    self.output_pc();
                }
            }
            Direction::Output => {
                if self.obf[Group::B as usize] {
                    self.obf[Group::B as usize] = false;
                    self.update_intr(Group::B);
                    self.output_pc();
                }
            }
        }
    }

    /// Group A strobe input (/STBA). Active in mode 2 and in mode 1 when
    /// port A is an input: the falling edge samples the pins into the input
    /// latch and raises IBF.
    pub fn pc4_w(&mut self, state: bool) {
        self.pc4_pin.set_active(state);
        let strobed = self.group_a_mode() == 2
            || (self.group_a_mode() == 1 && self.port_a_dir() == Direction::Input);
        if strobed && self.pc4_pin.is_falling() && !self.ibf[Group::A as usize] {
            self.input_latch[0] = self.port_a.borrow().get_input();
            self.ibf[Group::A as usize] = true;
            self.update_intr(Group::A);
            self.output_pc();
        }
    }

    /// Group A acknowledge input (/ACKA). Active in mode 2 and in mode 1
    /// when port A is an output: the falling edge empties the output buffer.
    pub fn pc6_w(&mut self, state: bool) {
        self.pc6_pin.set_active(state);
        let strobed = self.group_a_mode() == 2
            || (self.group_a_mode() == 1 && self.port_a_dir() == Direction::Output);
        if strobed && self.pc6_pin.is_falling() && self.obf[Group::A as usize] {
            self.obf[Group::A as usize] = false;
            self.update_intr(Group::A);
            self.output_pc();
        }
    }

    // -- Peripheral-side taps, used when two chips are chained back to back

    /// Port A pin state as seen by the peripheral.
    pub fn pa_r(&self) -> u8 {
        if self.port_a_driven() {
            self.output_latch[0]
        } else {
            0xff
        }
    }

    /// Port B pin state as seen by the peripheral.
    pub fn pb_r(&self) -> u8 {
        if self.port_b_driven() {
            self.output_latch[1]
        } else {
            0xff
        }
    }
}

impl Chip for Ppi {
    fn reset(&mut self) {
        self.pc2_pin.reset();
        self.pc4_pin.reset();
        self.pc6_pin.reset();
        self.set_mode(CONTROL_RESET);
    }

    fn read(&mut self, reg: u8) -> u8 {
        let value = match reg {
            reg::PORT_A => self.read_pa(),
            reg::PORT_B => self.read_pb(),
            reg::PORT_C => self.read_pc(),
            reg::CONTROL => self.control,
            _ => panic!("invalid reg {}", reg),
        };
        if log_enabled!(LogLevel::Trace) {
            trace!(target: "ppi::reg", "Read 0x{:02x} = 0x{:02x}", reg, value);
        }
        value
    }

    fn write(&mut self, reg: u8, value: u8) {
        if log_enabled!(LogLevel::Trace) {
            trace!(target: "ppi::reg", "Write 0x{:02x} = 0x{:02x}", reg, value);
        }
        match reg {
            reg::PORT_A => self.write_pa(value),
            reg::PORT_B => self.write_pb(value),
            reg::PORT_C => self.write_pc(value),
            reg::CONTROL => {
                if value.get_bit(7) {
                    self.set_mode(value);
                } else {
                    self.bit_set_reset(value);
                }
            }
            _ => panic!("invalid reg {}", reg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{new_shared, new_shared_cell};

    fn setup_ppi() -> Ppi {
        let port_a = new_shared(IoPort::new(0xff));
        let port_b = new_shared(IoPort::new(0xff));
        let port_c = new_shared(IoPort::new(0xff));
        let intr_a = new_shared(IrqLine::new("irq"));
        let intr_b = new_shared(IrqLine::new("irq"));
        let mut ppi = Ppi::new(port_a, port_b, port_c, intr_a, intr_b);
        ppi.reset();
        ppi
    }

    #[test]
    fn reset_defaults() {
        let mut ppi = setup_ppi();
        assert_eq!(CONTROL_RESET, ppi.read(reg::CONTROL));
        assert_eq!(0xff, ppi.read(reg::PORT_A));
        assert_eq!(0xff, ppi.read(reg::PORT_B));
        assert_eq!(0xff, ppi.read(reg::PORT_C));
        assert_eq!([false; 2], ppi.ibf);
        assert_eq!([false; 2], ppi.obf);
        assert_eq!([false; 2], ppi.inte);
        assert_eq!(false, ppi.inte1);
        assert_eq!(false, ppi.inte2);
        assert_eq!([false; 2], ppi.intr);
        assert_eq!(false, ppi.intr_a_line.borrow().is_raised());
        assert_eq!(false, ppi.intr_b_line.borrow().is_raised());
    }

    #[test]
    fn mode_0_input_reads_bus() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0x9b);
        ppi.port_a.borrow_mut().set_input(0x12);
        ppi.port_b.borrow_mut().set_input(0x34);
        ppi.port_c.borrow_mut().set_input(0x56);
        assert_eq!(0x12, ppi.read(reg::PORT_A));
        assert_eq!(0x34, ppi.read(reg::PORT_B));
        assert_eq!(0x56, ppi.read(reg::PORT_C));
    }

    #[test]
    fn mode_0_write_to_input_port_shadows_only() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0x90);
        let writes = new_shared_cell(0u32);
        let counter = writes.clone();
        ppi.port_a
            .borrow_mut()
            .set_observer(Box::new(move |_| counter.set(counter.get() + 1)));
        ppi.port_a.borrow_mut().set_input(0xc3);
        ppi.write(reg::PORT_A, 0x55);
        // the latch shadows the value but nothing reaches the pins
        assert_eq!(0, writes.get());
        assert_eq!(0x55, ppi.output_latch[0]);
        assert_eq!(0xc3, ppi.read(reg::PORT_A));
    }

    #[test]
    fn mode_0_output_latch_round_trip() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0x80);
        let writes = new_shared_cell(0u32);
        let counter = writes.clone();
        ppi.port_a.borrow_mut().set_observer(Box::new(move |value| {
            if value == 0x55 {
                counter.set(counter.get() + 1);
            }
        }));
        ppi.write(reg::PORT_A, 0x55);
        assert_eq!(0x55, ppi.read(reg::PORT_A));
        assert_eq!(1, writes.get());
        assert_eq!(0x55, ppi.port_a.borrow().get_output());
    }

    #[test]
    fn bit_set_reset_preserves_control() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0x80);
        ppi.write(reg::CONTROL, 0x01); // set PC0
        assert_eq!(0x80, ppi.read(reg::CONTROL));
        assert_eq!(0x01, ppi.output_latch[2]);
        assert_eq!(0x01, ppi.port_c.borrow().get_output());
        ppi.write(reg::CONTROL, 0x0f); // set PC7
        assert_eq!(0x81, ppi.output_latch[2]);
        ppi.write(reg::CONTROL, 0x00); // reset PC0
        assert_eq!(0x80, ppi.output_latch[2]);
        assert_eq!(0x80, ppi.read(reg::CONTROL));
    }

    #[test]
    fn mode_set_clears_handshake_state() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0xb0); // group A mode 1 input
        ppi.write(reg::CONTROL, 0x09); // INTEA on (set PC4)
        ppi.port_a.borrow_mut().set_input(0x42);
        ppi.pc4_w(false);
        assert_eq!(true, ppi.ibf[0]);
        assert_eq!(true, ppi.intr[0]);
        ppi.write(reg::CONTROL, 0xa0); // any mode set
        assert_eq!([false; 2], ppi.ibf);
        assert_eq!([false; 2], ppi.obf);
        assert_eq!([false; 2], ppi.inte);
        assert_eq!(false, ppi.inte1);
        assert_eq!(false, ppi.inte2);
        assert_eq!([false; 2], ppi.intr);
        assert_eq!(false, ppi.intr_a_line.borrow().is_raised());
    }

    #[test]
    fn mode_1_input_handshake() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0xb0);
        ppi.write(reg::CONTROL, 0x09); // INTEA on (set PC4)
        ppi.port_a.borrow_mut().set_input(0x42);
        ppi.pc4_w(false);
        ppi.pc4_w(true);
        assert_eq!(true, ppi.ibf[0]);
        assert_eq!(true, ppi.intr[0]);
        assert_eq!(true, ppi.intr_a_line.borrow().is_raised());
        // status read: INTRA at PC3, INTEA at PC4, IBFA at PC5
        assert_eq!(0x38, ppi.read(reg::PORT_C));
        // reading the data acknowledges the strobe
        assert_eq!(0x42, ppi.read(reg::PORT_A));
        assert_eq!(false, ppi.ibf[0]);
        assert_eq!(false, ppi.intr[0]);
        assert_eq!(false, ppi.intr_a_line.borrow().is_raised());
    }

    #[test]
    fn mode_1_input_strobe_ignored_while_full() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0xb0);
        ppi.port_a.borrow_mut().set_input(0x11);
        ppi.pc4_w(false);
        ppi.pc4_w(true);
        ppi.port_a.borrow_mut().set_input(0x22);
        ppi.pc4_w(false);
        ppi.pc4_w(true);
        // second strobe arrives while IBF is still set and is lost
        assert_eq!(0x11, ppi.read(reg::PORT_A));
    }

    #[test]
    fn mode_1_output_handshake() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0xa0); // group A mode 1 output
        ppi.write(reg::CONTROL, 0x0d); // INTEA on (set PC6)
        // buffer is empty and interrupts are enabled: ready for data
        assert_eq!(true, ppi.intr[0]);
        ppi.write(reg::PORT_A, 0x77);
        assert_eq!(true, ppi.obf[0]);
        assert_eq!(false, ppi.intr[0]);
        assert_eq!(0x77, ppi.port_a.borrow().get_output());
        // /OBFA is active low at PC7
        assert_eq!(false, ppi.port_c.borrow().get_output().get_bit(7));
        ppi.pc6_w(false);
        assert_eq!(false, ppi.obf[0]);
        assert_eq!(true, ppi.intr[0]);
        assert_eq!(true, ppi.intr_a_line.borrow().is_raised());
        assert_eq!(true, ppi.port_c.borrow().get_output().get_bit(7));
        ppi.pc6_w(true);
    }

    #[test]
    fn mode_2_bidirectional() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0xc0);
        ppi.write(reg::CONTROL, 0x0d); // INTE1 on (set PC6)
        ppi.write(reg::CONTROL, 0x09); // INTE2 on (set PC4)
        assert_eq!(true, ppi.inte1);
        assert_eq!(true, ppi.inte2);
        // output half
        ppi.write(reg::PORT_A, 0x5a);
        assert_eq!(true, ppi.obf[0]);
        assert_eq!(0x5a, ppi.pa_r());
        // input half runs concurrently
        ppi.port_a.borrow_mut().set_input(0xa5);
        ppi.pc4_w(false);
        ppi.pc4_w(true);
        assert_eq!(true, ppi.ibf[0]);
        assert_eq!(true, ppi.intr[0]);
        assert_eq!(0xa5, ppi.read(reg::PORT_A));
        assert_eq!(false, ppi.ibf[0]);
        // output half still unacknowledged, so the request drops with IBF
        assert_eq!(false, ppi.intr[0]);
        ppi.pc6_w(false);
        assert_eq!(false, ppi.obf[0]);
        assert_eq!(true, ppi.intr[0]);
    }

    #[test]
    fn mode_2_status_read() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0xc0);
        ppi.write(reg::CONTROL, 0x0d); // INTE1
        ppi.write(reg::PORT_A, 0x01);
        // PC7 = /OBFA = 0, PC6 = INTE1 = 1, PC5 = IBFA = 0, PC4 = INTE2 = 0,
        // PC3 = INTRA = 0, PC0-2 generic (output latch, cleared)
        assert_eq!(0x40, ppi.read(reg::PORT_C));
    }

    #[test]
    fn group_b_mode_1_input_handshake() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0x86); // group B mode 1 input
        ppi.write(reg::CONTROL, 0x05); // INTEB on (set PC2)
        ppi.port_b.borrow_mut().set_input(0x99);
        ppi.pc2_w(false);
        ppi.pc2_w(true);
        assert_eq!(true, ppi.ibf[1]);
        assert_eq!(true, ppi.intr[1]);
        assert_eq!(true, ppi.intr_b_line.borrow().is_raised());
        // status read: INTRB at PC0, IBFB at PC1, INTEB at PC2
        assert_eq!(0x07, ppi.read(reg::PORT_C) & 0x07);
        assert_eq!(0x99, ppi.read(reg::PORT_B));
        assert_eq!(false, ppi.ibf[1]);
        assert_eq!(false, ppi.intr_b_line.borrow().is_raised());
    }

    #[test]
    fn group_b_mode_1_output_handshake() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0x84); // group B mode 1 output
        ppi.write(reg::CONTROL, 0x05); // INTEB on (set PC2)
        ppi.write(reg::PORT_B, 0x66);
        assert_eq!(true, ppi.obf[1]);
        assert_eq!(false, ppi.intr[1]);
        // /OBFB is active low at PC1
        assert_eq!(false, ppi.port_c.borrow().get_output().get_bit(1));
        ppi.pc2_w(false);
        assert_eq!(false, ppi.obf[1]);
        assert_eq!(true, ppi.intr[1]);
        ppi.pc2_w(true);
    }

    #[test]
    fn port_c_write_affects_generic_bits_only() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0xa0); // A mode 1 output, C generic bits output
        ppi.write(reg::PORT_A, 0x01);
        ppi.write(reg::PORT_C, 0xff);
        let driven = ppi.port_c.borrow().get_output();
        // generic PC4-5 and PC0-2 carry the latch, /OBFA stays low
        assert_eq!(false, driven.get_bit(7));
        assert_eq!(true, driven.get_bit(5));
        assert_eq!(true, driven.get_bit(4));
        assert_eq!(0x07, driven & 0x07);
    }

    #[test]
    fn bit_set_reset_ignores_inte_on_generic_bits() {
        let mut ppi = setup_ppi();
        ppi.write(reg::CONTROL, 0x80);
        ppi.write(reg::CONTROL, 0x09); // PC4 is generic in mode 0
        assert_eq!([false; 2], ppi.inte);
        assert_eq!(false, ppi.inte1);
        assert_eq!(false, ppi.inte2);
        assert_eq!(true, ppi.output_latch[2].get_bit(4));
    }

    #[test]
    #[should_panic(expected = "invalid reg")]
    fn read_invalid_reg_panics() {
        let mut ppi = setup_ppi();
        ppi.read(0x04);
    }

    #[test]
    #[should_panic(expected = "invalid reg")]
    fn write_invalid_reg_panics() {
        let mut ppi = setup_ppi();
        ppi.write(0x04, 0x00);
    }
}
