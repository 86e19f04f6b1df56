// This code is licensed under MIT license (see LICENSE for details)

//! The [AddressSpace] stores the machine's byte cells
//!
//! Two instances exist per machine: the 128-cell main memory and the 7-cell
//! register file. Both obey the same contract: fixed length, 8-bit cells,
//! single-cell addresses masked modulo the length, range operations clamped,
//! and write listeners notified on every mutation.

use std::{
    fmt::{Debug, Formatter},
    ops::Range,
};

/// Number of cells in main memory.
///
/// Addresses are 8 bits wide and the top bit selects the register file, so
/// main memory covers `0x00..=0x7F`.
pub const MEM_SIZE: usize = 0x80;

/// A write listener, called with `(address, stored_value)` after every cell
/// mutation.
pub type WriteListener = Box<dyn FnMut(usize, u8)>;

/// A fixed-length array of 8-bit cells with change notification.
///
/// Values are truncated to `value & 0xFF` *here*, at the storage boundary,
/// never by the instructions that produce them.
/// # Examples
/// ```rust
/// # use nybble::*;
/// let mut mem = AddressSpace::new(0x80);
/// mem.write(0, 10 - 25);
/// assert_eq!(241, mem.read(0));
/// ```
pub struct AddressSpace {
    cells: Vec<u8>,
    listeners: Vec<WriteListener>,
}

impl Default for AddressSpace {
    /// Constructs a main-memory-sized space of [MEM_SIZE] cells
    fn default() -> Self {
        AddressSpace::new(MEM_SIZE)
    }
}

impl AddressSpace {
    /// Constructs a new AddressSpace with `size` zeroed cells.
    ///
    /// The length is immutable afterward.
    pub fn new(size: usize) -> Self {
        AddressSpace {
            cells: vec![0; size],
            listeners: vec![],
        }
    }

    /// Gets the number of cells
    /// # Examples
    /// ```rust
    /// # use nybble::*;
    /// assert_eq!(0x80, AddressSpace::new(0x80).len());
    /// ```
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the space holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reads one cell. The address is masked modulo the length, so every
    /// address resolves to a cell.
    /// # Examples
    /// ```rust
    /// # use nybble::*;
    /// let mut mem = AddressSpace::new(0x80);
    /// mem.write(5, 0xAA);
    /// assert_eq!(0xAA, mem.read(0x85));
    /// ```
    pub fn read(&self, addr: usize) -> u8 {
        self.cells[self.mask(addr)]
    }

    /// Writes one cell, truncating `value` to its low 8 bits, then notifies
    /// listeners with `(address, stored_value)`.
    ///
    /// Takes an `i32` so that arithmetic results (including negatives) land
    /// here untouched; `-5 & 0xFF` stores as `251`.
    pub fn write(&mut self, addr: usize, value: i32) {
        let addr = self.mask(addr);
        let value = (value & 0xFF) as u8;
        self.cells[addr] = value;
        self.notify(addr, value);
    }

    /// Gets a slice of a contiguous range of cells, clamped to the valid
    /// range (range operations clamp rather than wrap).
    /// # Examples
    /// ```rust
    /// # use nybble::*;
    /// let mem = AddressSpace::new(8);
    /// assert_eq!(8, mem.read_range(0..100).len());
    /// ```
    pub fn read_range(&self, range: Range<usize>) -> &[u8] {
        &self.cells[self.clamp(range)]
    }

    /// Writes as many of `values` as fit starting at `lo`, and returns the
    /// count that did not fit and were dropped.
    /// # Examples
    /// ```rust
    /// # use nybble::*;
    /// let mut mem = AddressSpace::new(4);
    /// assert_eq!(2, mem.write_range(2, &[1, 2, 3, 4]));
    /// assert_eq!(&[0, 0, 1, 2], mem.read_range(0..4));
    /// ```
    pub fn write_range(&mut self, lo: usize, values: &[u8]) -> usize {
        let fits = values.len().min(self.len().saturating_sub(lo));
        for (i, &value) in values[..fits].iter().enumerate() {
            self.cells[lo + i] = value;
        }
        self.notify_range(lo..lo + fits);
        values.len() - fits
    }

    /// Moves the window of cells one slot toward *lower* addresses, rotating
    /// the displaced cell to the vacated end. Returns false if the move would
    /// go out of bounds.
    /// # Examples
    /// ```rust
    /// # use nybble::*;
    /// let mut mem = AddressSpace::new(4);
    /// mem.write_range(0, &[9, 1, 2, 3]);
    /// assert!(mem.shift_up(1..4));
    /// assert_eq!(&[1, 2, 3, 9], mem.read_range(0..4));
    /// assert!(!mem.shift_up(0..2));
    /// ```
    pub fn shift_up(&mut self, range: Range<usize>) -> bool {
        if range.is_empty() || range.start == 0 || range.end > self.len() {
            return false;
        }
        self.cells[range.start - 1..range.end].rotate_left(1);
        self.notify_range(range.start - 1..range.end);
        true
    }

    /// Moves the window of cells one slot toward *higher* addresses, rotating
    /// the displaced cell to the vacated start. Returns false if the move
    /// would go out of bounds.
    pub fn shift_down(&mut self, range: Range<usize>) -> bool {
        if range.is_empty() || range.end >= self.len() {
            return false;
        }
        self.cells[range.start..range.end + 1].rotate_right(1);
        self.notify_range(range.start..range.end + 1);
        true
    }

    /// Removes a range of cells, shifting all subsequent content left and
    /// zero-filling the vacated tail.
    /// # Examples
    /// ```rust
    /// # use nybble::*;
    /// let mut mem = AddressSpace::new(5);
    /// mem.write_range(0, &[1, 2, 3, 4, 5]);
    /// mem.delete_range(1..3);
    /// assert_eq!(&[1, 4, 5, 0, 0], mem.read_range(0..5));
    /// ```
    pub fn delete_range(&mut self, range: Range<usize>) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }
        self.cells.copy_within(range.end.., range.start);
        let tail = self.len() - (range.end - range.start);
        self.cells[tail..].fill(0);
        self.notify_range(range.start..self.len());
    }

    /// Zero-fills every cell, notifying listeners for each cell that changed.
    pub fn reset(&mut self) {
        let changed: Vec<usize> = (0..self.len()).filter(|&i| self.cells[i] != 0).collect();
        self.cells.fill(0);
        for addr in changed {
            self.notify(addr, 0);
        }
    }

    /// Registers a write listener. Listeners persist for the machine's
    /// lifetime and fire synchronously on every mutation.
    /// # Examples
    /// ```rust
    /// # use nybble::*;
    /// # use std::{cell::Cell, rc::Rc};
    /// let seen = Rc::new(Cell::new(0u8));
    /// let mut mem = AddressSpace::new(0x80);
    /// let tap = seen.clone();
    /// mem.on_write(move |_addr, value| tap.set(value));
    /// mem.write(3, 0x42);
    /// assert_eq!(0x42, seen.get());
    /// ```
    pub fn on_write(&mut self, listener: impl FnMut(usize, u8) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Gets the whole space as a slice, for snapshots and listings.
    pub fn as_slice(&self) -> &[u8] {
        self.cells.as_slice()
    }

    fn mask(&self, addr: usize) -> usize {
        addr % self.len()
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        range.start.min(self.len())..range.end.min(self.len())
    }

    fn notify(&mut self, addr: usize, value: u8) {
        for listener in &mut self.listeners {
            listener(addr, value);
        }
    }

    fn notify_range(&mut self, range: Range<usize>) {
        for addr in range {
            let value = self.cells[addr];
            self.notify(addr, value);
        }
    }
}

// Listeners aren't observable state: clones start with none, and equality
// compares cells only.
impl Clone for AddressSpace {
    fn clone(&self) -> Self {
        AddressSpace {
            cells: self.cells.clone(),
            listeners: vec![],
        }
    }
}

impl PartialEq for AddressSpace {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Debug for AddressSpace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressSpace")
            .field("cells", &self.cells)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
