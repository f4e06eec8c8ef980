use crate::constants::{FONT_START, MEMORY_SIZE, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};
use crate::opcode::from_bytes;

/// 4K of byte-addressable memory.
///
/// Layout:
///   0x000-0x04f  font
///   0x050-0x1ff  reserved for the interpreter
///   0x200-0xfff  program and data
///
/// Every accessor is bounds checked; nothing here panics on a bad address.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Zeroed memory with the font installed.
    pub fn new() -> Self {
        let mut bytes = Box::new([0; MEMORY_SIZE]);
        let font = FONT_START as usize;
        bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Big-endian two byte word at `addr`.
    pub fn read_word(&self, addr: usize) -> Result<u16> {
        let word = self.slice(addr, 2)?;
        Ok(from_bytes(word[0], word[1]))
    }

    /// r/o view of `len` bytes from `addr`
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8]> {
        let end = Self::end(addr, len)?;
        Ok(&self.bytes[addr..end])
    }

    /// r/w view of `len` bytes from `addr`
    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        let end = Self::end(addr, len)?;
        Ok(&mut self.bytes[addr..end])
    }

    /// Copies `data` in at `addr`; nothing is written if any of it would fall off the end.
    pub fn write(&mut self, addr: usize, data: &[u8]) -> Result<()> {
        self.slice_mut(addr, data.len())?.copy_from_slice(data);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Exclusive end of the range, or the first address past the end of memory.
    fn end(addr: usize, len: usize) -> Result<usize> {
        let end = addr.saturating_add(len);
        if end > MEMORY_SIZE {
            Err(Chip8Error::OutOfBounds {
                address: addr.max(MEMORY_SIZE),
            })
        } else {
            Ok(end)
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed_after_font() {
        let m = Memory::new();
        assert_eq!(m.bytes[..80], SPRITE_SHEET[..]);
        assert!(m.bytes[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_slice_ok() {
        let mut m = Memory::new();
        m.write(0x200, &[0, 1, 2, 3]).unwrap();
        assert_eq!(m.slice(0x200, 4).unwrap(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_read_word() {
        let mut m = Memory::new();
        m.write(0x300, &[0x04, 0x05]).unwrap();
        assert_eq!(m.read_word(0x300).unwrap(), 0x0405);
    }

    #[test]
    fn test_read_word_straddling_end_fails() {
        let mut m = Memory::new();
        m.write(0xFFE, &[0x12, 0x34]).unwrap();
        assert_eq!(m.read_word(0xFFE).unwrap(), 0x1234);
        assert!(matches!(
            m.read_word(0xFFF),
            Err(Chip8Error::OutOfBounds { address: 0x1000 })
        ));
    }

    #[test]
    fn test_read_last_byte() {
        let mut m = Memory::new();
        m.write(0xFFF, &[0xAB]).unwrap();
        assert_eq!(m.slice(0xFFF, 1).unwrap(), &[0xAB]);
    }

    #[test]
    fn test_read_past_end_fails() {
        let m = Memory::new();
        assert!(matches!(
            m.slice(0x1000, 1),
            Err(Chip8Error::OutOfBounds { address: 0x1000 })
        ));
    }

    #[test]
    fn test_write_too_much_leaves_memory_untouched() {
        let mut m = Memory::new();
        assert!(m.write(0xFFC, &[1; 8]).is_err());
        assert_eq!(m.slice(0xFFC, 4).unwrap(), &[0, 0, 0, 0]);
    }
}
