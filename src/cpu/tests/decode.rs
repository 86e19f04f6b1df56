// This code is licensed under MIT license (see LICENSE for details)

//! Exercises the decoder against every opcode class
//!
//! Decoding is total: all 256 byte values map to an [Insn], unassigned codes
//! to `nop`. The operand nibble is carried raw; masking is the register
//! file's business.

use super::*;
use crate::cpu::instruction::{Cmp, Insn};

#[rustfmt::skip] mod class {
    use super::*;
    #[test] fn nop() { assert_eq!(Insn::nop, Insn::decode(0x00)); }
    #[test] fn add() { assert_eq!(Insn::add, Insn::decode(0x10)); }
    #[test] fn sub() { assert_eq!(Insn::sub, Insn::decode(0x20)); }
    #[test] fn inc() { assert_eq!(Insn::inc { r: 5 }, Insn::decode(0x35)); }
    #[test] fn cpy() { assert_eq!(Insn::cpy { src: 1, dst: 2 }, Insn::decode(0x46)); }
    #[test] fn mov() { assert_eq!(Insn::mov { src: 2, dst: 1 }, Insn::decode(0x59)); }
    #[test] fn ld()  { assert_eq!(Insn::ld  { r: 3 }, Insn::decode(0x63)); }
    #[test] fn lda() { assert_eq!(Insn::lda { r: 4 }, Insn::decode(0x74)); }
    #[test] fn st()  { assert_eq!(Insn::st  { r: 3 }, Insn::decode(0x83)); }
    #[test] fn sta() { assert_eq!(Insn::sta, Insn::decode(0x90)); }
    #[test] fn jmp() { assert_eq!(Insn::jmp { r: 1 }, Insn::decode(0xA1)); }
    #[test] fn hlt() { assert_eq!(Insn::hlt, Insn::decode(0xB0)); }
    #[test] fn je()  { assert_eq!(Insn::je  { r: 2 }, Insn::decode(0xC2)); }
    #[test] fn jne() { assert_eq!(Insn::jne { r: 2 }, Insn::decode(0xD2)); }
    #[test] fn jeq() { assert_eq!(Insn::jeq, Insn::decode(0xE0)); }
    #[test] fn cjp() { assert_eq!(Insn::cjp { cmp: Cmp::Lt }, Insn::decode(0xE3)); }
    #[test] fn prt() { assert_eq!(Insn::prt, Insn::decode(0xF0)); }
    #[test] fn prd() { assert_eq!(Insn::prd, Insn::decode(0xF1)); }
    #[test] fn prl() { assert_eq!(Insn::prl, Insn::decode(0xF2)); }
}

/// The operand nibble rides along unmasked
#[test]
fn operand_nibble_is_raw() {
    for n in 0..=0xF {
        assert_eq!(Insn::inc { r: n }, Insn::decode(0x30 | n as u8));
        assert_eq!(Insn::ld { r: n }, Insn::decode(0x60 | n as u8));
        assert_eq!(Insn::jmp { r: n }, Insn::decode(0xA0 | n as u8));
    }
}

/// Addressing modes split the low nibble into two 2-bit fields, src high
#[test]
fn copy_mode_split() {
    for src in 0..4u8 {
        for dst in 0..4u8 {
            let n = src << 2 | dst;
            assert_eq!(Insn::cpy { src, dst }, Insn::decode(0x40 | n));
            assert_eq!(Insn::mov { src, dst }, Insn::decode(0x50 | n));
        }
    }
}

/// The operand nibble is insignificant for operand-free classes
#[test]
fn operand_free_classes() {
    for n in 0..=0xF {
        assert_eq!(Insn::nop, Insn::decode(n));
        assert_eq!(Insn::add, Insn::decode(0x10 | n));
        assert_eq!(Insn::sub, Insn::decode(0x20 | n));
        assert_eq!(Insn::sta, Insn::decode(0x90 | n));
        assert_eq!(Insn::hlt, Insn::decode(0xB0 | n));
    }
}

/// `E0` is jeq, `E1`–`E6` are the comparisons, `E7`–`EF` fall to nop
#[test]
fn compare_family() {
    use Cmp::*;
    assert_eq!(Insn::jeq, Insn::decode(0xE0));
    for (n, cmp) in [(1, Eq), (2, Ne), (3, Lt), (4, Gt), (5, Le), (6, Ge)] {
        assert_eq!(Insn::cjp { cmp }, Insn::decode(0xE0 | n));
    }
    for n in 7..=0xF {
        assert_eq!(Insn::nop, Insn::decode(0xE0 | n));
    }
}

/// `F0`–`F2` print, `F3`–`FF` fall to nop
#[test]
fn print_family() {
    assert_eq!(Insn::prt, Insn::decode(0xF0));
    assert_eq!(Insn::prd, Insn::decode(0xF1));
    assert_eq!(Insn::prl, Insn::decode(0xF2));
    for n in 3..=0xF {
        assert_eq!(Insn::nop, Insn::decode(0xF0 | n));
    }
}

/// Every byte decodes; the class depends only on the high nibble
#[test]
fn totality() {
    for byte in 0..=0xFF {
        let insn = Insn::decode(byte);
        let class = std::mem::discriminant(&Insn::decode(byte & 0xF0));
        match byte & 0xF0 {
            // sub-nibble families collapse unassigned codes to nop
            0xE0 | 0xF0 => {}
            _ => assert_eq!(class, std::mem::discriminant(&insn), "{byte:#04x}"),
        }
        assert_eq!(insn, Insn::from(byte));
    }
}

/// Listings render a fixed-width mnemonic column
#[test]
fn display_mnemonics() {
    assert_eq!("hlt    ", Insn::decode(0xB0).to_string());
    assert_eq!("inc    R1", Insn::decode(0x33).to_string());
    assert_eq!("cpy    reg, mem", Insn::decode(0x46).to_string());
    assert_eq!("cjp    lt, [RES]", Insn::decode(0xE3).to_string());
    assert_eq!("prl    [OP1]", Insn::decode(0xF2).to_string());
}

/// Out-of-range register nibbles render the sentinel name, masked
#[test]
fn display_masks_register_names() {
    // 7 % NUM_REGISTERS == 0 -> OP1
    assert_eq!("inc    OP1", Insn::decode(0x37).to_string());
}
