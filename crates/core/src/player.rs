//! Player lane register
//!
//! Left takes priority: when left and right pulse on the same tick, only the
//! left pulse is considered (even if the player is already in the left lane).

use crate::types::{ButtonPulses, Lane};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Player {
    lane: Lane,
}

impl Player {
    pub fn new() -> Self {
        Self { lane: Lane::Middle }
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    /// Lane after applying this tick's pulses.
    pub fn next_lane(&self, pulses: &ButtonPulses, enabled: bool) -> Lane {
        if !enabled {
            return self.lane;
        }
        if pulses.left {
            self.lane.left()
        } else if pulses.right {
            self.lane.right()
        } else {
            self.lane
        }
    }

    /// Apply pulses; returns true when the lane changed.
    pub fn step(&mut self, pulses: &ButtonPulses, enabled: bool) -> bool {
        let next = self.next_lane(pulses, enabled);
        let moved = next != self.lane;
        self.lane = next;
        moved
    }

    pub fn reset(&mut self) {
        self.lane = Lane::Middle;
    }

    #[cfg(test)]
    pub(crate) fn set_lane(&mut self, lane: Lane) {
        self.lane = lane;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_middle() {
        assert_eq!(Player::new().lane(), Lane::Middle);
    }

    #[test]
    fn moves_and_clamps() {
        let mut p = Player::new();
        assert!(p.step(&ButtonPulses::left(), true));
        assert_eq!(p.lane(), Lane::Left);
        assert!(!p.step(&ButtonPulses::left(), true));
        assert_eq!(p.lane(), Lane::Left);

        p.step(&ButtonPulses::right(), true);
        p.step(&ButtonPulses::right(), true);
        assert!(!p.step(&ButtonPulses::right(), true));
        assert_eq!(p.lane(), Lane::Right);
    }

    #[test]
    fn ignores_input_when_disabled() {
        let mut p = Player::new();
        assert!(!p.step(&ButtonPulses::left(), false));
        assert_eq!(p.lane(), Lane::Middle);
    }

    #[test]
    fn left_wins_simultaneous_press() {
        let both = ButtonPulses {
            left: true,
            right: true,
            ..ButtonPulses::NONE
        };
        let mut p = Player::new();
        p.step(&both, true);
        assert_eq!(p.lane(), Lane::Left);

        // Already at the left edge: the right pulse is still ignored.
        p.step(&both, true);
        assert_eq!(p.lane(), Lane::Left);
    }
}
