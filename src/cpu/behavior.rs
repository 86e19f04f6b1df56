// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each nybble [Insn]
//!
//! Instructions read their immediate bytes through [ProgramCounter::advance],
//! which returns the index to read and moves the cursor past it. Arithmetic
//! never clamps here; results go to storage as `i32` and the storage layer
//! truncates.

use super::*;
use crate::cpu::{
    instruction::Cmp,
    mode::{Mode, Target},
    output::Emitted,
    registers::Register,
};

impl CPU {
    /// Executes a single [Insn]. `at` is the address the instruction was
    /// fetched from (the print-loop rewinds onto it).
    #[rustfmt::skip]
    pub(super) fn execute(&mut self, mem: &mut AddressSpace, at: usize, insn: Insn) -> Result<()> {
        match insn {
            Insn::nop               => Ok(()),
            Insn::add               => Ok(self.add()),
            Insn::sub               => Ok(self.sub()),
            Insn::inc { r }         => Ok(self.increment(r)),
            Insn::cpy { src, dst }  => self.copy(mem, src, dst, false),
            Insn::mov { src, dst }  => self.copy(mem, src, dst, true),
            Insn::ld  { r }         => self.load_immediate(mem, r),
            Insn::lda { r }         => self.load_indirect(mem, r),
            Insn::st  { r }         => self.store_direct(mem, r),
            Insn::sta               => self.store_indirect(mem),
            Insn::jmp { r }         => Ok(self.jump(r)),
            Insn::hlt               => Ok(self.halt()),
            Insn::je  { r }         => Ok(self.jump_equals(r)),
            Insn::jne { r }         => Ok(self.jump_not_equals(r)),
            Insn::jeq               => self.jump_pair_equals(mem),
            Insn::cjp { cmp }       => self.compare_jump(mem, cmp),
            Insn::prt               => Ok(self.print_value()),
            Insn::prd               => Ok(self.print_digit()),
            Insn::prl               => self.print_loop(mem, at),
        }
    }

    /// Reads the immediate byte following the current instruction
    fn fetch(&mut self, mem: &AddressSpace) -> Result<u8> {
        let at = self.pc.advance()?;
        Ok(mem.read(at))
    }

    /// Reads through a full-byte address (bit 7 selects the register file)
    fn read_at(&self, mem: &AddressSpace, addr: u8) -> u8 {
        match Target::resolve(addr) {
            Target::Memory(a) => mem.read(a),
            Target::Register(i) => self.regs.get_index(i),
        }
    }

    /// Writes through a full-byte address (bit 7 selects the register file)
    fn write_at(&mut self, mem: &mut AddressSpace, addr: u8, value: i32) {
        match Target::resolve(addr) {
            Target::Memory(a) => mem.write(a, value),
            Target::Register(i) => self.regs.set_index(i, value),
        }
    }
}

/// Arithmetic
///
/// |opcode| effect                                 |
/// |------|----------------------------------------|
/// |`1n`  | RES ← OP1 + OP2                        |
/// |`2n`  | RES ← OP1 − OP2                        |
/// |`3r`  | r ← r + 1                              |
///
/// Sums and differences leave here un-truncated; `sub` with OP1=10, OP2=25
/// hands −15 to the register file, which stores 241.
impl CPU {
    /// |`1n`| RES ← OP1 + OP2
    pub(super) fn add(&mut self) {
        let (a, b) = (self.regs.get(Register::Op1), self.regs.get(Register::Op2));
        self.regs.set(Register::Res, a as i32 + b as i32);
    }

    /// |`2n`| RES ← OP1 − OP2
    pub(super) fn sub(&mut self) {
        let (a, b) = (self.regs.get(Register::Op1), self.regs.get(Register::Op2));
        self.regs.set(Register::Res, a as i32 - b as i32);
    }

    /// |`3r`| r ← r + 1
    pub(super) fn increment(&mut self, r: usize) {
        let value = self.regs.get_index(r);
        self.regs.set_index(r, value as i32 + 1);
    }
}

/// Data movement
///
/// |opcode| effect                                 |
/// |------|----------------------------------------|
/// |`4m`  | cpy: src → dst per 2-bit modes         |
/// |`5m`  | mov: cpy, then zero the source         |
/// |`6r`  | ld:  r ← immediate                     |
/// |`7r`  | lda: r ← \[immediate address\]         |
/// |`8r`  | st:  \[immediate address\] ← r         |
/// |`9n`  | sta: \[dst register\] ← src register   |
impl CPU {
    /// |`4m`|`5m`| Copies src→dst, optionally zeroing the source afterward.
    ///
    /// Both modes are validated before the immediate byte is fetched, so an
    /// [Error::InvalidAddressingMode] leaves the machine untouched. A value
    /// can never be a destination, and a value source has no location to
    /// zero.
    pub(super) fn copy(
        &mut self,
        mem: &mut AddressSpace,
        src: u8,
        dst: u8,
        zero_source: bool,
    ) -> Result<()> {
        let (src, dst) = (Mode::try_from(src)?, Mode::try_from(dst)?);
        if dst == Mode::Value {
            return Err(Error::InvalidAddressingMode { mode: 0 });
        }
        let pair = self.fetch(mem)?;
        let (si, di) = (((pair >> 4) & 0xF) as usize, (pair & 0xF) as usize);
        let value = match src {
            Mode::Value => si as u8,
            Mode::Register => self.regs.get_index(si),
            Mode::Memory => mem.read(si),
        };
        match dst {
            Mode::Register => self.regs.set_index(di, value as i32),
            Mode::Memory => mem.write(di, value as i32),
            Mode::Value => unreachable!("rejected before the fetch"),
        }
        if zero_source {
            match src {
                Mode::Register => self.regs.set_index(si, 0),
                Mode::Memory => mem.write(si, 0),
                Mode::Value => {}
            }
        }
        Ok(())
    }

    /// |`6r`| r ← immediate
    pub(super) fn load_immediate(&mut self, mem: &AddressSpace, r: usize) -> Result<()> {
        let value = self.fetch(mem)?;
        self.regs.set_index(r, value as i32);
        Ok(())
    }

    /// |`7r`| r ← \[immediate address\]
    pub(super) fn load_indirect(&mut self, mem: &AddressSpace, r: usize) -> Result<()> {
        let addr = self.fetch(mem)?;
        let value = self.read_at(mem, addr);
        self.regs.set_index(r, value as i32);
        Ok(())
    }

    /// |`8r`| \[immediate address\] ← r
    pub(super) fn store_direct(&mut self, mem: &mut AddressSpace, r: usize) -> Result<()> {
        let addr = self.fetch(mem)?;
        let value = self.regs.get_index(r);
        self.write_at(mem, addr, value as i32);
        Ok(())
    }

    /// |`9n`| \[address in dst register\] ← src register
    ///
    /// The immediate byte carries the two register sub-indices, src high.
    pub(super) fn store_indirect(&mut self, mem: &mut AddressSpace) -> Result<()> {
        let pair = self.fetch(mem)?;
        let (sr, dr) = (((pair >> 4) & 0xF) as usize, (pair & 0xF) as usize);
        let addr = self.regs.get_index(dr);
        let value = self.regs.get_index(sr);
        self.write_at(mem, addr, value as i32);
        Ok(())
    }
}

/// Control flow
///
/// |opcode| effect                                          |
/// |------|-------------------------------------------------|
/// |`Ar`  | jmp: pc ← r                                     |
/// |`Bn`  | hlt: halt                                       |
/// |`Cr`  | je:  pc ← r if OP1 == OP2                       |
/// |`Dr`  | jne: pc ← r if OP1 != OP2                       |
/// |`E0`  | jeq: pc ← immediate target if the register pair |
/// |      | named by the first immediate byte is equal      |
/// |`E1`–`E6`| cjp: pc ← \[RES\] if the comparison holds    |
impl CPU {
    /// |`Ar`| pc ← address held in r
    pub(super) fn jump(&mut self, r: usize) {
        let target = self.regs.get_index(r);
        self.pc.jump_to(target as usize);
    }

    /// |`Bn`| Transitions the program counter to halted
    pub(super) fn halt(&mut self) {
        self.pc.halt();
    }

    /// |`Cr`| pc ← address held in r, iff OP1 == OP2
    pub(super) fn jump_equals(&mut self, r: usize) {
        if self.regs.get(Register::Op1) == self.regs.get(Register::Op2) {
            self.jump(r);
        }
    }

    /// |`Dr`| pc ← address held in r, iff OP1 != OP2
    pub(super) fn jump_not_equals(&mut self, r: usize) {
        if self.regs.get(Register::Op1) != self.regs.get(Register::Op2) {
            self.jump(r);
        }
    }

    /// |`E0`| Reads a register pair, then a target address; jumps if equal.
    ///
    /// Both immediates are consumed whether or not the jump is taken.
    pub(super) fn jump_pair_equals(&mut self, mem: &AddressSpace) -> Result<()> {
        let pair = self.fetch(mem)?;
        let (a, b) = (
            self.regs.get_index(((pair >> 4) & 0xF) as usize),
            self.regs.get_index((pair & 0xF) as usize),
        );
        let target = self.fetch(mem)?;
        if a == b {
            self.pc.jump_to(target as usize);
        }
        Ok(())
    }

    /// |`E1`–`E6`| Reads a register pair, compares per `cmp`, and jumps to
    /// the address held in RES if the comparison holds
    pub(super) fn compare_jump(&mut self, mem: &AddressSpace, cmp: Cmp) -> Result<()> {
        let pair = self.fetch(mem)?;
        let (a, b) = (
            self.regs.get_index(((pair >> 4) & 0xF) as usize),
            self.regs.get_index((pair & 0xF) as usize),
        );
        if cmp.test(a, b) {
            let target = self.regs.get(Register::Res);
            self.pc.jump_to(target as usize);
        }
        Ok(())
    }
}

/// Output
///
/// |opcode| effect                                      |
/// |------|---------------------------------------------|
/// |`F0`  | prt: emit OUT as a raw number               |
/// |`F1`  | prd: emit OUT in digit form                 |
/// |`F2`  | prl: emit \[OP1\] as a character, loop      |
impl CPU {
    /// |`F0`| Emits the OUT register as a raw number
    pub(super) fn print_value(&mut self) {
        let value = self.regs.get(Register::Out);
        self.out.emit(Emitted::Value(value));
    }

    /// |`F1`| Emits the OUT register in digit form
    pub(super) fn print_digit(&mut self) {
        let value = self.regs.get(Register::Out);
        self.out.emit(Emitted::Digit(value));
    }

    /// |`F2`| Emits the byte at the address held in OP1 as a character and
    /// increments OP1. While the incremented OP1 has not reached OP2 the
    /// program counter rewinds onto this instruction so the next step runs
    /// it again; once OP1 == OP2 (the terminator's address) the counter is
    /// left past it. Net effect: the pc advances exactly once, on the final
    /// iteration.
    pub(super) fn print_loop(&mut self, mem: &AddressSpace, at: usize) -> Result<()> {
        let addr = self.regs.get(Register::Op1);
        let ch = char::from(self.read_at(mem, addr));
        self.out.emit(Emitted::Char(ch));
        self.regs.set(Register::Op1, addr as i32 + 1);
        if self.regs.get(Register::Op1) != self.regs.get(Register::Op2) {
            self.pc.jump_to(at);
        }
        Ok(())
    }
}
