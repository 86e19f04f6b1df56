// This code is licensed under MIT license (see LICENSE for details)

//! The program source format: one byte per line, written in binary
//!
//! Each line is exactly 8 `0`/`1` characters, most-significant bit first.
//! `//`, `#`, and `%` start comments, whitespace is stripped before
//! validation, and blank lines are skipped.

use crate::{
    cpu::instruction::Insn,
    error::{Error, Result},
    mem::AddressSpace,
};

/// Parses program text into bytes.
///
/// Fails with [Error::InvalidProgramFormat] at the first line (1-indexed)
/// that isn't an 8-character binary byte after comment/whitespace stripping.
/// # Examples
/// ```rust
/// # use nybble::program;
/// let source = "
/// 00010000 // add
/// 0000 0000 % spaces are fine
/// 10110000 # hlt
/// ";
/// assert_eq!(vec![0x10, 0x00, 0xB0], program::parse(source).unwrap());
/// program::parse("0001000").unwrap_err();
/// ```
pub fn parse(source: &str) -> Result<Vec<u8>> {
    let mut program = vec![];
    for (number, line) in source.lines().enumerate() {
        let text = code_of(line);
        if text.is_empty() {
            continue;
        }
        if text.len() != 8 || !text.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(Error::InvalidProgramFormat {
                line: number + 1,
                text,
            });
        }
        program.push(text.bytes().fold(0u8, |acc, bit| acc << 1 | (bit - b'0')));
    }
    Ok(program)
}

/// Renders bytes back out as commented binary lines, one per cell, with the
/// decoded mnemonic after each byte. Round-trips through [parse].
/// # Examples
/// ```rust
/// # use nybble::program;
/// let listing = program::render(&[0xB0]);
/// assert_eq!(vec![0xB0], program::parse(&listing).unwrap());
/// assert!(listing.contains("hlt"));
/// ```
pub fn render(bytes: &[u8]) -> String {
    bytes
        .iter()
        .enumerate()
        .map(|(addr, &byte)| {
            let insn = Insn::decode(byte).to_string();
            format!("{byte:08b} // {addr:02x}: {}\n", insn.trim_end())
        })
        .collect()
}

/// Parses program text and writes it into memory from address 0, zeroing
/// memory first. Returns the count of bytes that did not fit.
pub fn load(source: &str, mem: &mut AddressSpace) -> Result<usize> {
    let program = parse(source)?;
    mem.reset();
    Ok(mem.write_range(0, &program))
}

/// Strips comments and whitespace from one source line
fn code_of(line: &str) -> String {
    let mut code = line;
    for delimiter in ["//", "#", "%"] {
        if let Some(start) = code.find(delimiter) {
            code = &code[..start];
        }
    }
    code.split_whitespace().collect()
}
