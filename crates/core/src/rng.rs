//! RNG module - 8-bit linear-feedback lane generator
//!
//! Feedback is the XOR of bits 7, 5, 4 and 3; each advance shifts left and
//! inserts the feedback bit at bit 0. From any non-zero value the sequence
//! cycles through all 255 non-zero states.
//!
//! Lanes come from the low two bits of the current value, with the spare
//! combination `0b11` folded onto lane 0 so every output is a valid lane.

use crate::types::{Lane, LFSR_SEED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneLfsr {
    state: u8,
}

impl LaneLfsr {
    /// Generator at the fixed power-on seed.
    pub fn new() -> Self {
        Self::with_seed(LFSR_SEED)
    }

    /// Zero would lock the register, so it is replaced by the default seed.
    pub fn with_seed(seed: u8) -> Self {
        let state = if seed == 0 { LFSR_SEED } else { seed };
        Self { state }
    }

    pub fn value(&self) -> u8 {
        self.state
    }

    #[inline]
    fn feedback(v: u8) -> u8 {
        ((v >> 7) ^ (v >> 5) ^ (v >> 4) ^ (v >> 3)) & 1
    }

    /// Shift once and return the new register value.
    #[inline]
    pub fn advance(&mut self) -> u8 {
        self.state = (self.state << 1) | Self::feedback(self.state);
        self.state
    }

    /// Lane selected by the current register value.
    #[inline]
    pub fn lane(&self) -> Lane {
        match self.state & 0b11 {
            1 => Lane::Middle,
            2 => Lane::Right,
            _ => Lane::Left,
        }
    }

    pub fn reset(&mut self) {
        self.state = LFSR_SEED;
    }
}

impl Default for LaneLfsr {
    fn default() -> Self {
        Self::new()
    }
}
