pub use chip8::Chip8;
pub use config::Config;
pub use disasm::{disassemble, Line};
pub use error::{Chip8Error, Result};
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use screen::FrameBuffer;
pub use state::RunState;

mod chip8;
mod config;
pub mod constants;
mod disasm;
mod error;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod screen;
mod stack;
mod state;
mod timers;
