// This code is licensed under MIT license (see LICENSE for details)

//! The [OutputChannel] accumulates what the machine prints
//!
//! An append-only log of emitted values plus a monotonically increasing
//! modification counter. Listeners fire synchronously on every emission.

use std::fmt::{Debug, Display, Formatter};

/// One emitted datum: the three print instructions produce three forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Emitted {
    /// A raw number (PRT)
    Value(u8),
    /// A single decimal digit, `value % 10` (PRD)
    Digit(u8),
    /// A character (PRL)
    Char(char),
}

impl Display for Emitted {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Emitted::Value(v) => write!(f, "{v}"),
            Emitted::Digit(v) => write!(f, "{}", v % 10),
            Emitted::Char(c) => write!(f, "{c}"),
        }
    }
}

/// An emission listener, called with each datum as it is appended.
pub type EmitListener = Box<dyn FnMut(&Emitted)>;

/// The machine's output log.
/// # Examples
/// ```rust
/// # use nybble::cpu::output::{Emitted, OutputChannel};
/// let mut out = OutputChannel::new();
/// out.emit(Emitted::Char('H'));
/// out.emit(Emitted::Char('i'));
/// assert_eq!("Hi", out.text());
/// assert_eq!(2, out.mods());
/// ```
#[derive(Default)]
pub struct OutputChannel {
    emitted: Vec<Emitted>,
    mods: usize,
    listeners: Vec<EmitListener>,
}

impl OutputChannel {
    /// Constructs an empty channel
    pub fn new() -> Self {
        OutputChannel::default()
    }

    /// Appends a datum, bumps the modification counter, and notifies
    /// listeners
    pub fn emit(&mut self, datum: Emitted) {
        self.emitted.push(datum);
        self.mods += 1;
        for listener in &mut self.listeners {
            listener(&datum);
        }
    }

    /// Gets everything emitted so far, oldest first
    pub fn emitted(&self) -> &[Emitted] {
        self.emitted.as_slice()
    }

    /// Gets the modification counter. It never decreases, even across
    /// [OutputChannel::clear].
    pub fn mods(&self) -> usize {
        self.mods
    }

    /// Renders the log as display text
    pub fn text(&self) -> String {
        self.emitted.iter().map(Emitted::to_string).collect()
    }

    /// Empties the log (the counter keeps counting)
    pub fn clear(&mut self) {
        self.emitted.clear();
        self.mods += 1;
    }

    /// Registers an emission listener. This is the output-emitted surface
    /// the UI layer subscribes to.
    pub fn on_emit(&mut self, listener: impl FnMut(&Emitted) + 'static) {
        self.listeners.push(Box::new(listener));
    }
}

// Listeners aren't observable state, as with AddressSpace.
impl Clone for OutputChannel {
    fn clone(&self) -> Self {
        OutputChannel {
            emitted: self.emitted.clone(),
            mods: self.mods,
            listeners: vec![],
        }
    }
}

impl PartialEq for OutputChannel {
    fn eq(&self, other: &Self) -> bool {
        self.emitted == other.emitted && self.mods == other.mods
    }
}

impl Debug for OutputChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputChannel")
            .field("emitted", &self.emitted)
            .field("mods", &self.mods)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
