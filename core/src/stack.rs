use crate::error::{Chip8Error, Result};

/// Return addresses for nested subroutine calls.
///
/// Lives apart from `Memory`; programs cannot read or clobber it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStack {
    frames: Vec<u16>,
    capacity: usize,
}

impl CallStack {
    pub fn new(capacity: usize) -> Self {
        CallStack {
            frames: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.frames.len() == self.capacity {
            return Err(Chip8Error::StackOverflow {
                capacity: self.capacity,
            });
        }
        self.frames.push(addr);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        self.frames.pop().ok_or(Chip8Error::StackUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut stack = CallStack::new(4);
        stack.push(0x202).unwrap();
        stack.push(0x304).unwrap();
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop().unwrap(), 0x304);
        assert_eq!(stack.pop().unwrap(), 0x202);
    }

    #[test]
    fn test_pop_empty_underflows() {
        let mut stack = CallStack::new(4);
        assert!(matches!(stack.pop(), Err(Chip8Error::StackUnderflow)));
    }

    #[test]
    fn test_push_full_overflows() {
        let mut stack = CallStack::new(2);
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert!(matches!(
            stack.push(3),
            Err(Chip8Error::StackOverflow { capacity: 2 })
        ));
        assert_eq!(stack.depth(), 2);
    }
}
