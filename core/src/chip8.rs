use std::io::Read;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::constants::{KEY_COUNT, MAX_PROGRAM_SIZE, PROGRAM_START, REGISTER_COUNT};
use crate::error::{Chip8Error, Result};
use crate::instruction::Instruction;
use crate::operations;
use crate::screen::FrameBuffer;
use crate::state::{RunState, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the ROM that was loaded, so the machine can be reset
///  - a random source for `CXNN`
///
/// Supplies interfaces for:
/// - loading roms
/// - latching keys for the coming frame
/// - advancing the CPU and its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8<R = StdRng> {
    state: State,
    config: Config,
    rom: Vec<u8>,
    rng: R,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// A machine whose random source is seeded from `config.seed`, or from
    /// the OS when there is none.
    pub fn with_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Chip8<R> {
    pub fn with_rng(config: Config, rng: R) -> Self {
        Chip8 {
            state: State::new(config.stack_depth),
            config,
            rom: Vec::new(),
            rng,
        }
    }

    /// Copies a program into memory at 0x200.
    /// Nothing is copied if it doesn't fit.
    pub fn load(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ProgramTooLarge {
                size: rom.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        self.state.memory.write(PROGRAM_START as usize, rom)?;
        self.rom = rom.to_vec();
        info!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    ///
    /// At most one byte past the largest program is read, so an oversized
    /// stream reports `size` as `MAX_PROGRAM_SIZE + 1`.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::new();
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut rom)?;
        self.load(&rom)
    }

    /// Puts the machine back the way it was straight after `load`.
    pub fn reset(&mut self) -> Result<()> {
        self.state = State::new(self.config.stack_depth);
        let rom = std::mem::take(&mut self.rom);
        self.load(&rom)
    }

    /// Advances the CPU by a single instruction
    /// - if awaiting a keypress, checks the latch instead and only moves on once a key is down
    /// - otherwise fetches, decodes and executes the opcode at the pc
    pub fn step(&mut self) -> Result<()> {
        if let RunState::AwaitingKey(register) = self.state.run_state {
            if let Some(key) = self.state.keypad.first_pressed() {
                debug!("key {:X} released the wait on V{:X}", key, register);
                self.state.v[register as usize] = key;
                self.state.run_state = RunState::Running;
                self.state.advance();
            }
            return Ok(());
        }

        let op = self.get_op()?;
        let instruction = Instruction::decode(op);
        trace!(
            "{:04X} {:04X} {:<16} v{:02X?} i{:04X}",
            self.state.pc,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i
        );
        operations::execute(instruction, &mut self.state, &mut self.rng)
    }

    /// Counts both timers down by one; call once per frame.
    pub fn tick(&mut self) {
        self.state.timers.tick();
    }

    /// Runs one frame: latch `keys`, execute `cycles_per_frame` instructions,
    /// tick the timers and clear the latch.
    ///
    /// Stops at the first failing instruction and returns its error; the
    /// timers are not ticked for that frame but the latch is still cleared.
    pub fn run_frame(&mut self, keys: [bool; KEY_COUNT]) -> Result<()> {
        self.set_keys(keys);
        let result = (0..self.config.cycles_per_frame).try_for_each(|_| self.step());
        if result.is_ok() {
            self.tick();
        }
        self.end_frame();
        result
    }

    /// Replaces the whole key latch.
    pub fn set_keys(&mut self, keys: [bool; KEY_COUNT]) {
        self.state.keypad.set(keys);
    }

    /// Latch `key` as pressed
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keypad.release(key);
    }

    /// Clears the key latch once the frame's instructions and timers are done.
    pub fn end_frame(&mut self) {
        self.state.keypad.clear();
    }

    /// A copy of the current FrameBuffer.
    pub fn frame(&self) -> FrameBuffer {
        self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn, and marks it as drawn
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn registers(&self) -> [u8; REGISTER_COUNT] {
        self.state.v
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn i(&self) -> u16 {
        self.state.i
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound
    }

    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    pub fn stack_depth(&self) -> usize {
        self.state.stack.depth()
    }

    pub fn stack_capacity(&self) -> usize {
        self.state.stack.capacity()
    }

    /// The keys latched for the current frame.
    pub fn keys(&self) -> [bool; KEY_COUNT] {
        self.state.keypad.keys()
    }

    pub fn memory(&self) -> &[u8] {
        self.state.memory.as_slice()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16> {
        self.state.memory.read_word(self.state.pc as usize)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
