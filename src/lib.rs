// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements an educational 8-bit computer: a 128-cell main
//! memory and a 7-slot register file unified under one 8-bit address space,
//! a 16-class instruction set decoded from single bytes, and a plain
//! fetch-decode-execute engine with observable side effects (memory writes,
//! register writes, character output) for an editor UI to subscribe to.
//!
//! Programs are written one byte per line, in binary:
//! ```rust
//! use nybble::*;
//! let mut machine = Machine::new();
//! machine
//!     .load_program(
//!         "00010000 // add OP1 + OP2 -> RES
//!          00000000 // nop
//!          10110000 // hlt",
//!     )
//!     .unwrap();
//! machine.run().unwrap();
//! assert!(machine.cpu.pc().is_halted());
//! assert_eq!(3, machine.cpu.cycle());
//! ```

pub mod cpu;
pub mod error;
pub mod mem;
pub mod program;
pub mod snapshot;

pub use cpu::CPU;
pub use error::{Error, Result};
pub use mem::{AddressSpace, MEM_SIZE};

/// A whole machine: one CPU plus its main memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Machine {
    pub cpu: CPU,
    pub mem: AddressSpace,
}

impl Machine {
    /// Constructs a machine with zeroed memory, running from index 0
    pub fn new() -> Self {
        Machine::default()
    }

    /// Parses program text and loads it into memory from address 0,
    /// zeroing memory first. Bytes that don't fit are dropped.
    pub fn load_program(&mut self, source: &str) -> Result<&mut Self> {
        program::load(source, &mut self.mem)?;
        Ok(self)
    }

    /// Runs a single fetch-decode-execute cycle
    pub fn step(&mut self) -> Result<&mut Self> {
        self.cpu.step(&mut self.mem)?;
        Ok(self)
    }

    /// Steps until the machine halts (see [CPU::run] for the no-deadline
    /// caveat)
    pub fn run(&mut self) -> Result<&mut Self> {
        self.cpu.run(&mut self.mem)?;
        Ok(self)
    }

    /// Resets the program counter and registers; memory survives
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Encodes main memory as a snapshot blob
    pub fn snapshot(&self) -> String {
        snapshot::export(&self.mem)
    }

    /// Restores main memory from a snapshot blob
    pub fn restore(&mut self, blob: &str) -> Result<()> {
        snapshot::import(blob, &mut self.mem)
    }
}

/// Common imports for nybble
pub mod prelude {
    pub use super::Machine;
    pub use crate::cpu::{
        instruction::{Cmp, Insn},
        output::{Emitted, OutputChannel},
        pc::ProgramCounter,
        registers::{Register, Registers},
        CPU,
    };
    pub use crate::error::{Error, Result};
    pub use crate::mem::{AddressSpace, MEM_SIZE};
}
