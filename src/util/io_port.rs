// This file is part of i8255-rs.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;
use bit_field::BitField;

pub type Observer = Box<dyn Fn(u8)>;

/// Bus endpoint for one 8-bit peripheral port. The board side sets the pin
/// state through `set_input`; the chip drives its side through `drive`,
/// which records the value and notifies the bound observer. Direction is not
/// tracked here: for the 8255 it lives in the chip's control word.
///
/// An endpoint with nothing wired to it floats high: the input defaults to
/// 0xff and a missing observer swallows writes.
pub struct IoPort {
    input: u8,
    output: u8,
    observer: Option<Observer>,
}

impl IoPort {
    pub fn new(input: u8) -> Self {
        Self {
            input,
            output: 0xff,
            observer: None,
        }
    }

    pub fn get_input(&self) -> u8 {
        self.input
    }

    /// Last value the chip drove onto the pins.
    pub fn get_output(&self) -> u8 {
        self.output
    }

    pub fn set_input(&mut self, value: u8) {
        self.input = value;
    }

    pub fn set_input_bit(&mut self, bit: usize, value: bool) {
        self.input.set_bit(bit, value);
    }

    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = Some(observer);
    }

    pub fn drive(&mut self, value: u8) {
        self.output = value;
        if let Some(ref observer) = self.observer {
            observer(value);
        }
    }

    pub fn reset(&mut self) {
        self.input = 0xff;
        self.output = 0xff;
    }
}
