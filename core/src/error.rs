use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Everything that can stop the interpreter.
///
/// Unknown opcodes are deliberately absent: they execute as no-ops.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("memory access out of bounds at address {address:#06X}")]
    OutOfBounds { address: usize },

    #[error("stack overflow: call depth exceeds capacity of {capacity}")]
    StackOverflow { capacity: usize },

    #[error("stack underflow: attempted to return with an empty call stack")]
    StackUnderflow,

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("failed to read ROM")]
    Io(#[from] io::Error),
}
