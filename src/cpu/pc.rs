// This code is licensed under MIT license (see LICENSE for details)

//! The [ProgramCounter] is the execution cursor
//!
//! A two-state machine: `Running(index)` or `Halted`. The halted state is
//! the `None` side of an `Option<usize>` rather than a -1 sentinel. Every
//! transition notifies listeners with the `(old, new)` pair.

use crate::error::{Error, Result};
use std::fmt::{Debug, Formatter};

/// A program-counter change listener, called with `(old, new)` on every
/// advance, jump, halt, and reset. `None` is the halted state.
pub type PcListener = Box<dyn FnMut(Option<usize>, Option<usize>)>;

/// The execution cursor into main memory.
/// # Examples
/// ```rust
/// # use nybble::cpu::pc::ProgramCounter;
/// let mut pc = ProgramCounter::new();
/// assert_eq!(0, pc.advance().unwrap());
/// assert_eq!(Some(1), pc.current());
/// pc.halt();
/// assert!(pc.is_halted());
/// pc.advance().unwrap_err();
/// ```
pub struct ProgramCounter {
    index: Option<usize>,
    listeners: Vec<PcListener>,
}

impl Default for ProgramCounter {
    /// A fresh counter is running at index 0
    fn default() -> Self {
        ProgramCounter {
            index: Some(0),
            listeners: vec![],
        }
    }
}

impl ProgramCounter {
    /// Constructs a counter running at index 0
    pub fn new() -> Self {
        ProgramCounter::default()
    }

    /// Gets the current index, or `None` while halted
    pub fn current(&self) -> Option<usize> {
        self.index
    }

    /// Pure query for the halted state
    pub fn is_halted(&self) -> bool {
        self.index.is_none()
    }

    /// Returns the current index, then increments by 1.
    ///
    /// This is how instructions consume the immediate bytes that follow them:
    /// the returned index is where to read, and the cursor has already moved
    /// past it. Stepping a halted counter is a fatal [Error::CpuHalted].
    pub fn advance(&mut self) -> Result<usize> {
        let old = self.index.ok_or(Error::CpuHalted)?;
        self.transition(Some(old + 1));
        Ok(old)
    }

    /// Sets the index directly; used by the jump-family instructions
    pub fn jump_to(&mut self, index: usize) {
        self.transition(Some(index));
    }

    /// Transitions to the halted state
    pub fn halt(&mut self) {
        self.transition(None);
    }

    /// Transitions to running at index 0
    pub fn reset(&mut self) {
        self.transition(Some(0));
    }

    /// Registers a change listener. This is the program-counter-changed
    /// surface the UI layer subscribes to.
    pub fn on_change(&mut self, listener: impl FnMut(Option<usize>, Option<usize>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn transition(&mut self, new: Option<usize>) {
        let old = self.index;
        self.index = new;
        for listener in &mut self.listeners {
            listener(old, new);
        }
    }
}

// Listeners aren't observable state, as with AddressSpace.
impl Clone for ProgramCounter {
    fn clone(&self) -> Self {
        ProgramCounter {
            index: self.index,
            listeners: vec![],
        }
    }
}

impl PartialEq for ProgramCounter {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Debug for ProgramCounter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramCounter")
            .field("index", &self.index)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
