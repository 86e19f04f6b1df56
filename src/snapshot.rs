// This code is licensed under MIT license (see LICENSE for details)

//! Memory snapshots: the full contents of an [AddressSpace] as one opaque,
//! loss-less text blob
//!
//! The format is a magic+version header followed by one lowercase hex pair
//! per cell. Import validates the header, the digits, and the cell count
//! against the target space.

use crate::{
    error::{Error, Result},
    mem::AddressSpace,
};

/// Snapshot header; the version bumps if the body encoding ever changes.
pub const SNAPSHOT_MAGIC: &str = "nybble-snapshot/1";

/// Encodes every cell of `mem` into a snapshot blob.
/// # Examples
/// ```rust
/// # use nybble::{mem::AddressSpace, snapshot};
/// let mut mem = AddressSpace::new(2);
/// mem.write(0, 0xAB);
/// assert_eq!("nybble-snapshot/1:ab00", snapshot::export(&mem));
/// ```
pub fn export(mem: &AddressSpace) -> String {
    let body: String = mem.as_slice().iter().map(|b| format!("{b:02x}")).collect();
    format!("{SNAPSHOT_MAGIC}:{body}")
}

/// Decodes a snapshot blob into `mem`, replacing every cell.
///
/// Fails with [Error::InvalidSnapshotFormat] without touching `mem` if the
/// blob is malformed or sized for a different space.
/// # Examples
/// ```rust
/// # use nybble::{mem::AddressSpace, snapshot};
/// let mut mem = AddressSpace::new(2);
/// snapshot::import("nybble-snapshot/1:ab00", &mut mem).unwrap();
/// assert_eq!(0xAB, mem.read(0));
/// snapshot::import("not a snapshot", &mut mem).unwrap_err();
/// ```
pub fn import(blob: &str, mem: &mut AddressSpace) -> Result<()> {
    let body = blob
        .trim()
        .strip_prefix(SNAPSHOT_MAGIC)
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(|| malformed("missing header"))?;
    if body.len() != mem.len() * 2 {
        return Err(malformed(&format!(
            "expected {} cells, found {} digits",
            mem.len(),
            body.len()
        )));
    }
    let mut cells = Vec::with_capacity(mem.len());
    for pair in body.as_bytes().chunks(2) {
        let cell = std::str::from_utf8(pair)
            .ok()
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| malformed("non-hex digit in body"))?;
        cells.push(cell);
    }
    mem.write_range(0, &cells);
    Ok(())
}

fn malformed(reason: &str) -> Error {
    Error::InvalidSnapshotFormat {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_byte() {
        let mut mem = AddressSpace::new(0x80);
        for addr in 0..mem.len() {
            mem.write(addr, (addr * 3) as i32);
        }
        let mut restored = AddressSpace::new(0x80);
        import(&export(&mem), &mut restored).unwrap();
        assert_eq!(mem, restored);
    }

    #[test]
    fn rejects_wrong_cell_count() {
        let mut mem = AddressSpace::new(4);
        let blob = export(&AddressSpace::new(8));
        import(&blob, &mut mem).unwrap_err();
        assert_eq!(AddressSpace::new(4), mem); // untouched
    }

    #[test]
    fn rejects_bad_digits() {
        let mut mem = AddressSpace::new(1);
        import("nybble-snapshot/1:zz", &mut mem).unwrap_err();
        assert_eq!(0, mem.read(0));
    }
}
