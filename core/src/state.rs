use crate::constants::{PROGRAM_START, REGISTER_COUNT};
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::screen::{self, FrameBuffer};
use crate::stack::CallStack;
use crate::timers::Timers;

/// Whether the interpreter is executing or parked on `FX0A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Waiting for any key; it will be written to the given register.
    AwaitingKey(u8),
}

/// The Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per frame
///
/// ## Memory
/// - a bounded call stack of return addresses, separate from memory
/// - 4096 bytes of addressable memory
/// - 32x64 byte frame buffer
///     - stores the contents of the next frame to be drawn
///
/// ## Input
/// - the latched state of keys 0..F
/// - execution halts in `RunState::AwaitingKey` until one of them is pressed
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: CallStack,
    pub timers: Timers,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: Keypad,
    pub run_state: RunState,
}

impl State {
    pub fn new(stack_depth: usize) -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: CallStack::new(stack_depth),
            timers: Timers::default(),
            memory: Memory::new(),
            frame_buffer: screen::blank(),
            draw_flag: false,
            keypad: Keypad::default(),
            run_state: RunState::Running,
        }
    }

    /// Moves on to the next instruction.
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Jumps over the next instruction.
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(4);
    }

    pub fn skip_if(&mut self, condition: bool) {
        if condition {
            self.skip()
        } else {
            self.advance()
        }
    }
}
