// This file is part of i8255-rs.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[macro_use]
extern crate log;

pub mod factory;
pub mod io;
pub mod util;

pub use crate::factory::Chip;
pub use crate::io::Ppi;
pub use crate::util::{new_shared, new_shared_cell, IoPort, IrqLine, Pin, Shared, SharedCell};
