// This code is licensed under MIT license (see LICENSE for details)

//! Addressing: the CPY/MOV 2-bit [Mode] tag, and [Target] resolution of
//! full-byte addresses
//!
//! One 8-bit address covers both spaces: the top bit selects the register
//! file, the rest is the offset. Every address resolves to exactly one
//! space and one offset.

use crate::error::Error;

/// The 2-bit addressing-mode tag carried in CPY/MOV operands.
///
/// Bit pattern 3 is reserved; converting it fails with
/// [Error::InvalidAddressingMode].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// The operand sub-index is the value itself
    Value,
    /// The operand sub-index names a register
    Register,
    /// The operand sub-index is a main-memory address
    Memory,
}

impl TryFrom<u8> for Mode {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            0 => Ok(Mode::Value),
            1 => Ok(Mode::Register),
            2 => Ok(Mode::Memory),
            mode => Err(Error::InvalidAddressingMode { mode }),
        }
    }
}

/// Where a full-byte address points: bit 7 set selects the register file.
/// # Examples
/// ```rust
/// # use nybble::cpu::mode::Target;
/// assert_eq!(Target::Memory(0x30), Target::resolve(0x30));
/// assert_eq!(Target::Register(2), Target::resolve(0x82));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// A main-memory cell
    Memory(usize),
    /// A register-file slot (masked by the file on access)
    Register(usize),
}

impl Target {
    /// Splits an address into its space and offset
    pub fn resolve(addr: u8) -> Target {
        if addr & 0x80 != 0 {
            Target::Register((addr & 0x7F) as usize)
        } else {
            Target::Memory(addr as usize)
        }
    }
}
