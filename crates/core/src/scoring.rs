//! Collision register and BCD score counter
//!
//! The collision check is registered: it samples the bottom row against the
//! player lane on one tick and is visible to the rest of the game on the
//! next. The score counts obstacles that leave the bottom row without a
//! registered collision, as four decimal digits that stop at 9999.

use serde::{Deserialize, Serialize};

use crate::types::{Lane, LaneMask, DIGIT_COUNT};

/// Registered bottom-row collision flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionLatch {
    hit: bool,
}

impl CollisionLatch {
    /// Value registered on the previous tick.
    pub fn is_set(&self) -> bool {
        self.hit
    }

    /// Combinational check for this tick.
    pub fn sample(enabled: bool, bottom: LaneMask, lane: Lane) -> bool {
        enabled && bottom.contains(lane)
    }

    pub fn latch(&mut self, hit: bool) {
        self.hit = hit;
    }

    pub fn reset(&mut self) {
        self.hit = false;
    }
}

/// An obstacle leaves the bottom row safely on a move-tick when the
/// pre-shift bottom row was occupied and no collision is registered.
pub fn obstacle_passed(enabled: bool, move_tick: bool, pre_shift_bottom: LaneMask, collision: bool) -> bool {
    enabled && move_tick && !pre_shift_bottom.is_empty() && !collision
}

/// Four-digit decimal score, digit 0 = ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BcdScore {
    digits: [u8; DIGIT_COUNT],
}

impl BcdScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a decimal value; values above 9999 are capped.
    pub fn from_value(value: u16) -> Self {
        let mut v = value.min(crate::types::MAX_SCORE);
        let mut digits = [0u8; DIGIT_COUNT];
        for d in digits.iter_mut() {
            *d = (v % 10) as u8;
            v /= 10;
        }
        Self { digits }
    }

    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        self.digits
    }

    pub fn value(&self) -> u16 {
        self.digits
            .iter()
            .rev()
            .fold(0u16, |acc, &d| acc * 10 + d as u16)
    }

    pub fn is_max(&self) -> bool {
        self.digits.iter().all(|&d| d == 9)
    }

    /// Add one with decimal carry. At 9999 the score stays put.
    pub fn increment(&mut self) -> bool {
        if self.is_max() {
            return false;
        }
        for d in self.digits.iter_mut() {
            if *d >= 9 {
                *d = 0;
            } else {
                *d += 1;
                break;
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.digits = [0; DIGIT_COUNT];
    }

    /// Held reset wins over an increment on the same tick.
    pub fn step(&mut self, reset: bool, passed: bool) -> bool {
        if reset {
            self.clear();
            false
        } else if passed {
            self.increment()
        } else {
            false
        }
    }
}
