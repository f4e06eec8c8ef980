use crate::constants::KEY_COUNT;

/// The latched state of the hexadecimal keypad.
///
/// The input adapter fills it before a frame's instructions run and the
/// interpreter clears it once the frame is over, so every key press is seen
/// by exactly one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn set(&mut self, keys: [bool; KEY_COUNT]) {
        self.keys = keys;
    }

    /// Keys outside 0..F are ignored.
    pub fn press(&mut self, key: u8) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = false;
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest numbered key that is down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }

    pub fn clear(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    pub fn keys(&self) -> [bool; KEY_COUNT] {
        self.keys
    }
}
