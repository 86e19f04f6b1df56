// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod instruction;
pub mod mode;
pub mod output;
pub mod pc;
pub mod registers;

use self::{instruction::Insn, output::OutputChannel, pc::ProgramCounter, registers::Registers};
use crate::{
    error::{Error, Result},
    mem::AddressSpace,
};
use owo_colors::OwoColorize;

/// The execution engine: fetch, decode, execute.
///
/// Owns the register file, program counter, and output channel; main memory
/// is borrowed per step so an editor can hold it between steps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CPU {
    /// Set to print a live disassembly trace while stepping
    pub debug: bool,
    regs: Registers,
    pc: ProgramCounter,
    out: OutputChannel,
    cycle: usize,
}

impl CPU {
    /// Constructs a CPU at cycle 0, running from index 0
    pub fn new() -> Self {
        CPU::default()
    }

    /// Gets the register file
    pub fn regs(&self) -> &Registers {
        &self.regs
    }

    /// Gets the register file mutably, e.g. to preset operands or attach a
    /// register-changed listener
    pub fn regs_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    /// Gets the program counter
    pub fn pc(&self) -> &ProgramCounter {
        &self.pc
    }

    /// Gets the program counter mutably
    pub fn pc_mut(&mut self) -> &mut ProgramCounter {
        &mut self.pc
    }

    /// Gets the output channel
    pub fn out(&self) -> &OutputChannel {
        &self.out
    }

    /// Gets the output channel mutably, e.g. to attach an output-emitted
    /// listener
    pub fn out_mut(&mut self) -> &mut OutputChannel {
        &mut self.out
    }

    /// Gets the number of fetch-decode-execute cycles run so far
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Runs a single fetch-decode-execute cycle against `mem`.
    ///
    /// Fails with [Error::CpuHalted] if the machine has halted, without
    /// touching any register or memory cell; only [CPU::reset] recovers.
    /// # Examples
    /// ```rust
    /// # use nybble::*;
    /// let mut mem = AddressSpace::default();
    /// let mut cpu = CPU::new();
    /// cpu.step(&mut mem).unwrap(); // memory is zeroed: nop
    /// assert_eq!(1, cpu.cycle());
    /// assert_eq!(Some(1), cpu.pc().current());
    /// ```
    pub fn step(&mut self, mem: &mut AddressSpace) -> Result<&mut Self> {
        if self.pc.is_halted() {
            return Err(Error::CpuHalted);
        }
        self.cycle += 1;
        let at = self.pc.advance()?;
        let insn = Insn::decode(mem.read(at));

        // live disassembly trace
        if self.debug {
            std::println!("{:3} {:02x}: {}", self.cycle.bright_black(), at, insn);
        }

        self.execute(mem, at, insn)?;
        Ok(self)
    }

    /// Steps until the machine halts.
    ///
    /// Fails with [Error::CpuHalted] if already halted. There is no iteration
    /// cap: a program that never executes HLT never returns. Callers that
    /// need a deadline must bound the number of [CPU::step] calls themselves.
    /// # Examples
    /// ```rust
    /// # use nybble::*;
    /// let mut mem = AddressSpace::default();
    /// mem.write(0, 0b1011_0000); // hlt
    /// let mut cpu = CPU::new();
    /// cpu.run(&mut mem).unwrap();
    /// assert!(cpu.pc().is_halted());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    pub fn run(&mut self, mem: &mut AddressSpace) -> Result<&mut Self> {
        if self.pc.is_halted() {
            return Err(Error::CpuHalted);
        }
        while !self.pc.is_halted() {
            self.step(mem)?;
        }
        Ok(self)
    }

    /// Resets the program counter and registers (not main memory, not the
    /// output log) and zeroes the cycle counter.
    pub fn reset(&mut self) {
        self.pc.reset();
        self.regs.reset();
        self.cycle = 0;
    }

    /// Dumps the register file, program counter, and cycle count
    /// # Examples
    /// ```rust
    /// # use nybble::*;
    /// let cpu = CPU::new();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 00, CYC:      0
    /// OP1: 00 OP2: 00 RES: 00 R1: 00 R2: 00 R3: 00 OUT: 00
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {}, CYC: {:6}\n{}",
            match self.pc.current() {
                Some(index) => format!("{index:02x}"),
                None => "halted".to_string(),
            },
            self.cycle,
            self.regs
                .as_slice()
                .iter()
                .enumerate()
                .map(|(i, value)| format!("{}: {value:02x} ", registers::Register::name(i)))
                .collect::<String>()
                .trim_end(),
        );
    }
}
