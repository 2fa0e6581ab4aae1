// This file is part of i8255-rs.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

pub mod ppi;

pub use self::ppi::Ppi;
