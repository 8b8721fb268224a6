use serde::{Deserialize, Serialize};

use crate::types::{GameMode, Glyph, Lane, DIGIT_COUNT, TRACK_LEN};

/// Every register of the game at one master tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub tick: u64,
    pub round: u32,
    pub mode: GameMode,
    pub countdown_secs: u8,
    pub lost_secs: u8,
    pub player_lane: Lane,
    /// Row masks, row 0 (bottom) first.
    pub track: [u8; TRACK_LEN],
    pub spawn_count: u8,
    pub held_lane: Option<Lane>,
    pub lfsr: u8,
    /// Score digits, ones first.
    pub score_digits: [u8; DIGIT_COUNT],
    pub score: u16,
    pub collision: bool,
    pub blink_on: bool,
    pub display: [Glyph; DIGIT_COUNT],
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Cheap fingerprint of what is on screen (mode + glyph rows).
    pub fn display_fingerprint(&self) -> u64 {
        self.display
            .iter()
            .fold(self.mode.bits() as u64, |acc, g| (acc << 8) | g.segments() as u64)
    }
}
