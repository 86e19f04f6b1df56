// This code is licensed under MIT license (see LICENSE for details)

//! Error type for nybble

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for nybble.
#[derive(Debug, Error)]
pub enum Error {
    /// Represents a step/run attempt on a halted machine
    #[error("cpu is halted; reset it before stepping")]
    CpuHalted,
    /// Tried to look up a register by a name that isn't in the register table
    #[error("\"{name}\" does not name a register")]
    UnknownRegister {
        /// The offending name
        name: String,
    },
    /// CPY/MOV carried a reserved mode bit pattern, or named a value as
    /// its destination
    #[error("addressing mode {mode:#04b} is not valid here")]
    InvalidAddressingMode {
        /// The offending 2-bit mode field
        mode: u8,
    },
    /// A program source line failed the 8-character binary pattern
    #[error("line {line}: \"{text}\" is not an 8-bit binary byte")]
    InvalidProgramFormat {
        /// The offending line number (1-indexed)
        line: usize,
        /// The offending line, comments and whitespace stripped
        text: String,
    },
    /// A memory snapshot blob failed validation
    #[error("malformed memory snapshot: {reason}")]
    InvalidSnapshotFormat {
        /// What was wrong with the blob
        reason: String,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
