// This code is licensed under MIT license (see LICENSE for details)

//! Contains the definition of a nybble [Insn]
//!
//! One program byte is one instruction: the high nibble selects the opcode
//! class, the low nibble is the operand. Decoding is a *total* function over
//! the byte — unassigned codes decode to `nop`, never to an error. Some
//! instructions consume immediate bytes at execute time; those never reach
//! the decoder.

use crate::cpu::registers::{Register, NUM_REGISTERS};
use std::fmt::Display;

/// A comparison code, the CJP operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cmp {
    /// a == b
    Eq,
    /// a != b
    Ne,
    /// a < b
    Lt,
    /// a > b
    Gt,
    /// a <= b
    Le,
    /// a >= b
    Ge,
}

impl Cmp {
    /// Decodes operand codes 1..=6; anything else is not a comparison
    pub fn decode(code: u8) -> Option<Cmp> {
        match code {
            1 => Some(Cmp::Eq),
            2 => Some(Cmp::Ne),
            3 => Some(Cmp::Lt),
            4 => Some(Cmp::Gt),
            5 => Some(Cmp::Le),
            6 => Some(Cmp::Ge),
            _ => None,
        }
    }

    /// Applies the comparison
    /// # Examples
    /// ```rust
    /// # use nybble::cpu::instruction::Cmp;
    /// assert!(Cmp::Lt.test(2, 5));
    /// assert!(!Cmp::Lt.test(5, 2));
    /// ```
    pub fn test(self, a: u8, b: u8) -> bool {
        match self {
            Cmp::Eq => a == b,
            Cmp::Ne => a != b,
            Cmp::Lt => a < b,
            Cmp::Gt => a > b,
            Cmp::Le => a <= b,
            Cmp::Ge => a >= b,
        }
    }
}

impl Display for Cmp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cmp::Eq => "eq",
                Cmp::Ne => "ne",
                Cmp::Lt => "lt",
                Cmp::Gt => "gt",
                Cmp::Le => "le",
                Cmp::Ge => "ge",
            }
        )
    }
}

#[allow(non_camel_case_types, missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// The closed instruction set. `r` operands are register indices (masked by
/// the register file), `src`/`dst` are 2-bit addressing-mode tags.
pub enum Insn {
    /// | `0n` | No effect
    nop,
    /// | `1n` | RES ← OP1 + OP2
    add,
    /// | `2n` | RES ← OP1 − OP2 (storage truncates the negative case)
    sub,
    /// | `3r` | register r ← r + 1
    inc { r: usize },
    /// | `4m` | copy src→dst; immediate byte carries the two sub-indices
    cpy { src: u8, dst: u8 },
    /// | `5m` | like cpy, then zeroes the source
    mov { src: u8, dst: u8 },
    /// | `6r` | register r ← immediate byte
    ld { r: usize },
    /// | `7r` | register r ← memory\[immediate byte as address\]
    lda { r: usize },
    /// | `8r` | memory\[immediate byte as address\] ← register r
    st { r: usize },
    /// | `9n` | immediate byte names src/dst registers; \[dst\] ← src
    sta,
    /// | `Ar` | pc ← register r
    jmp { r: usize },
    /// | `Bn` | halt
    hlt,
    /// | `Cr` | if OP1 == OP2, pc ← register r
    je { r: usize },
    /// | `Dr` | if OP1 != OP2, pc ← register r
    jne { r: usize },
    /// | `E0` | immediate bytes: register pair, then target; jump if equal
    jeq,
    /// | `E1`–`E6` | immediate byte: register pair; compare, jump to \[RES\]
    cjp { cmp: Cmp },
    /// | `F0` | emit OUT as a raw number
    prt,
    /// | `F1` | emit OUT in digit form
    prd,
    /// | `F2` | print-loop: emit memory\[OP1\] as a character
    prl,
}

impl Insn {
    /// Decodes one program byte. Total: every byte value decodes, and the
    /// opcode class depends only on `byte & 0xF0`, the operand only on
    /// `byte & 0x0F`.
    /// # Examples
    /// ```rust
    /// # use nybble::cpu::instruction::Insn;
    /// assert_eq!(Insn::add, Insn::decode(0b0001_0000));
    /// assert_eq!(Insn::nop, Insn::decode(0b0000_0000));
    /// assert_eq!(Insn::hlt, Insn::decode(0b1011_0000));
    /// ```
    pub fn decode(byte: u8) -> Insn {
        let n = byte & 0x0F;
        let r = n as usize;
        match byte & 0xF0 {
            0x00 => Insn::nop,
            0x10 => Insn::add,
            0x20 => Insn::sub,
            0x30 => Insn::inc { r },
            0x40 => Insn::cpy {
                src: (n >> 2) & 0x3,
                dst: n & 0x3,
            },
            0x50 => Insn::mov {
                src: (n >> 2) & 0x3,
                dst: n & 0x3,
            },
            0x60 => Insn::ld { r },
            0x70 => Insn::lda { r },
            0x80 => Insn::st { r },
            0x90 => Insn::sta,
            0xA0 => Insn::jmp { r },
            0xB0 => Insn::hlt,
            0xC0 => Insn::je { r },
            0xD0 => Insn::jne { r },
            0xE0 => match Cmp::decode(n) {
                Some(cmp) => Insn::cjp { cmp },
                None if n == 0 => Insn::jeq,
                None => Insn::nop,
            },
            0xF0 => match n {
                0 => Insn::prt,
                1 => Insn::prd,
                2 => Insn::prl,
                _ => Insn::nop,
            },
            // the match scrutinee is masked to its high nibble
            _ => unreachable!(),
        }
    }
}

/// Names the register an operand nibble lands on after masking
fn reg(r: usize) -> &'static str {
    Register::name(r % NUM_REGISTERS)
}

/// Names a 2-bit addressing mode for listings
fn mode(bits: u8) -> &'static str {
    match bits {
        0 => "val",
        1 => "reg",
        2 => "mem",
        _ => "???",
    }
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::nop               => write!(f, "nop    "),
            Insn::add               => write!(f, "add    OP1, OP2"),
            Insn::sub               => write!(f, "sub    OP1, OP2"),
            Insn::inc { r }         => write!(f, "inc    {}", reg(*r)),
            Insn::cpy { src, dst }  => write!(f, "cpy    {}, {}", mode(*src), mode(*dst)),
            Insn::mov { src, dst }  => write!(f, "mov    {}, {}", mode(*src), mode(*dst)),
            Insn::ld { r }          => write!(f, "ld     #, {}", reg(*r)),
            Insn::lda { r }         => write!(f, "lda    @, {}", reg(*r)),
            Insn::st { r }          => write!(f, "st     {}, @", reg(*r)),
            Insn::sta               => write!(f, "sta    "),
            Insn::jmp { r }         => write!(f, "jmp    [{}]", reg(*r)),
            Insn::hlt               => write!(f, "hlt    "),
            Insn::je { r }          => write!(f, "je     [{}]", reg(*r)),
            Insn::jne { r }         => write!(f, "jne    [{}]", reg(*r)),
            Insn::jeq               => write!(f, "jeq    "),
            Insn::cjp { cmp }       => write!(f, "cjp    {cmp}, [RES]"),
            Insn::prt               => write!(f, "prt    OUT"),
            Insn::prd               => write!(f, "prd    OUT"),
            Insn::prl               => write!(f, "prl    [OP1]"),
        }
    }
}

impl From<u8> for Insn {
    fn from(byte: u8) -> Self {
        Insn::decode(byte)
    }
}
