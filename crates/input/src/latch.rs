//! Press latch between master ticks.
//!
//! Terminals deliver key presses asynchronously (and repeat held keys). The
//! latch records which buttons were pressed since the last tick and hands
//! them to the core as one pulse per button; extra presses of the same
//! button before the tick collapse into that single pulse.

use crate::map::Button;
use crate::types::ButtonPulses;

#[derive(Debug, Clone, Default)]
pub struct PulseLatch {
    pending: ButtonPulses,
    /// Presses merged into an already pending pulse.
    coalesced: u64,
}

impl PulseLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        let slot = match button {
            Button::Left => &mut self.pending.left,
            Button::Right => &mut self.pending.right,
            Button::Center => &mut self.pending.center,
            Button::Reset => &mut self.pending.reset,
        };
        if *slot {
            self.coalesced += 1;
        }
        *slot = true;
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Pulses for the next tick; the latch is cleared.
    pub fn take(&mut self) -> ButtonPulses {
        std::mem::take(&mut self.pending)
    }

    /// Put back pulses that no tick consumed.
    pub fn restore(&mut self, pulses: ButtonPulses) {
        self.pending = self.pending.merge(pulses);
    }

    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_presses_become_one_pulse() {
        let mut latch = PulseLatch::new();
        latch.press(Button::Left);
        latch.press(Button::Left);
        latch.press(Button::Left);
        assert_eq!(latch.take(), ButtonPulses::left());
        assert_eq!(latch.coalesced(), 2);
    }

    #[test]
    fn take_clears_pending() {
        let mut latch = PulseLatch::new();
        latch.press(Button::Center);
        assert!(latch.has_pending());
        latch.take();
        assert!(!latch.has_pending());
        assert!(latch.take().is_empty());
    }

    #[test]
    fn restored_pulses_merge_with_new_presses() {
        let mut latch = PulseLatch::new();
        latch.press(Button::Center);
        let p = latch.take();
        latch.press(Button::Right);
        latch.restore(p);
        let p = latch.take();
        assert!(p.center && p.right);
    }

    #[test]
    fn distinct_buttons_share_a_tick() {
        let mut latch = PulseLatch::new();
        latch.press(Button::Left);
        latch.press(Button::Right);
        let p = latch.take();
        assert!(p.left && p.right && !p.center);
    }
}
