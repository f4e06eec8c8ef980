/// The delay and sound timers.
///
/// Both count down once per frame and stop at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrements both timers, never below zero.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Whether a tone would be playing.
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
