/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Where ROMs are loaded and where execution starts.
/// Everything below it belongs to the interpreter (font included).
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;

/// The carry/borrow/collision flag register.
pub const VF: usize = 0xF;

pub const DEFAULT_STACK_DEPTH: usize = 16;

/// ~600 instructions per second at 60 frames per second.
pub const DEFAULT_CYCLES_PER_FRAME: usize = 10;

pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Address of the first font glyph.
pub const FONT_START: u16 = 0x000;

/// Bytes per font glyph.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Sprite Sheet
/// The hexadecimal digits 0..F, each 4 pixels wide and 5 rows tall.
///
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
