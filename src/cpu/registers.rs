// This code is licensed under MIT license (see LICENSE for details)

//! The [Registers] file: a 7-cell [AddressSpace] with named slots
//!
//! The name table is stable and must never be reordered:
//! 0=OP1, 1=OP2, 2=RES, 3=R1, 4=R2, 5=R3, 6=OUT. The program counter is the
//! 7th logical register, held by [super::pc::ProgramCounter].

use crate::{
    error::{Error, Result},
    mem::AddressSpace,
};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Number of slots in the register file.
pub const NUM_REGISTERS: usize = 7;

/// Sentinel display string for indices outside the register table.
pub const NO_SUCH_REGISTER: &str = "??";

/// Names one slot of the register file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Register {
    /// First comparison/arithmetic operand
    Op1,
    /// Second comparison/arithmetic operand
    Op2,
    /// Arithmetic result, and the CJP jump target
    Res,
    /// General purpose
    R1,
    /// General purpose
    R2,
    /// General purpose
    R3,
    /// Source of the PRT/PRD print instructions
    Out,
}

impl Register {
    /// Gets the display name for a raw index.
    ///
    /// For diagnostic/pretty-printing use only: out-of-table indices yield
    /// the [NO_SUCH_REGISTER] sentinel instead of an error.
    /// # Examples
    /// ```rust
    /// # use nybble::cpu::registers::Register;
    /// assert_eq!("RES", Register::name(2));
    /// assert_eq!("??", Register::name(9));
    /// ```
    pub fn name(index: usize) -> &'static str {
        match index {
            0 => "OP1",
            1 => "OP2",
            2 => "RES",
            3 => "R1",
            4 => "R2",
            5 => "R3",
            6 => "OUT",
            _ => NO_SUCH_REGISTER,
        }
    }

    /// Gets the slot index backing this register.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Register::name(*self as usize))
    }
}

impl FromStr for Register {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OP1" => Ok(Register::Op1),
            "OP2" => Ok(Register::Op2),
            "RES" => Ok(Register::Res),
            "R1" => Ok(Register::R1),
            "R2" => Ok(Register::R2),
            "R3" => Ok(Register::R3),
            "OUT" => Ok(Register::Out),
            _ => Err(Error::UnknownRegister {
                name: s.to_string(),
            }),
        }
    }
}

/// The register file. Storage semantics (masking, truncation, listeners)
/// come from the backing [AddressSpace].
#[derive(Clone, Debug, PartialEq)]
pub struct Registers {
    file: AddressSpace,
}

impl Default for Registers {
    fn default() -> Self {
        Registers {
            file: AddressSpace::new(NUM_REGISTERS),
        }
    }
}

impl Registers {
    /// Constructs a zeroed register file
    pub fn new() -> Self {
        Registers::default()
    }

    /// Gets a register's value
    /// # Examples
    /// ```rust
    /// # use nybble::cpu::registers::{Register, Registers};
    /// let mut regs = Registers::new();
    /// regs.set(Register::Res, 10 - 25);
    /// assert_eq!(241, regs.get(Register::Res));
    /// ```
    pub fn get(&self, reg: Register) -> u8 {
        self.file.read(reg.index())
    }

    /// Sets a register's value; the storage layer truncates to 8 bits
    pub fn set(&mut self, reg: Register, value: i32) {
        self.file.write(reg.index(), value);
    }

    /// Gets a register by raw index, masked modulo [NUM_REGISTERS]
    pub fn get_index(&self, index: usize) -> u8 {
        self.file.read(index)
    }

    /// Sets a register by raw index, masked modulo [NUM_REGISTERS]
    pub fn set_index(&mut self, index: usize, value: i32) {
        self.file.write(index, value);
    }

    /// Gets a register by name; fails with [Error::UnknownRegister]
    /// # Examples
    /// ```rust
    /// # use nybble::cpu::registers::Registers;
    /// let regs = Registers::new();
    /// assert_eq!(0, regs.get_named("out").unwrap());
    /// regs.get_named("vF").unwrap_err();
    /// ```
    pub fn get_named(&self, name: &str) -> Result<u8> {
        Ok(self.get(name.parse()?))
    }

    /// Sets a register by name; fails with [Error::UnknownRegister]
    pub fn set_named(&mut self, name: &str, value: i32) -> Result<()> {
        self.set(name.parse()?, value);
        Ok(())
    }

    /// Zeroes every register
    pub fn reset(&mut self) {
        self.file.reset();
    }

    /// Registers a listener called with `(index, value)` on every register
    /// write. This is the register-changed surface the UI layer subscribes to.
    pub fn on_write(&mut self, listener: impl FnMut(usize, u8) + 'static) {
        self.file.on_write(listener);
    }

    /// Gets the whole file as a slice, OP1 first
    pub fn as_slice(&self) -> &[u8] {
        self.file.as_slice()
    }
}
