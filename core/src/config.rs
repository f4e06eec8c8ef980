use crate::constants::{DEFAULT_CYCLES_PER_FRAME, DEFAULT_STACK_DEPTH};

/// Tunables for a `Chip8`.
///
/// * `stack_depth` the number of nested calls before `StackOverflow`; not range checked, 0 makes every call overflow
/// * `cycles_per_frame` how many instructions `run_frame` executes between timer ticks
/// * `seed` seeds the random source used by `CXNN`; `None` draws from OS entropy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub stack_depth: usize,
    pub cycles_per_frame: usize,
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_stack_depth(self, stack_depth: usize) -> Self {
        Config {
            stack_depth,
            ..self
        }
    }

    pub fn with_cycles_per_frame(self, cycles_per_frame: usize) -> Self {
        Config {
            cycles_per_frame,
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Config {
            seed: Some(seed),
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stack_depth: DEFAULT_STACK_DEPTH,
            cycles_per_frame: DEFAULT_CYCLES_PER_FRAME,
            seed: None,
        }
    }
}
