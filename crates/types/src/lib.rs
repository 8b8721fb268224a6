//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no I/O, making them usable in any context
//! (simulation core, terminal rendering, headless tracing).
//!
//! # Playfield
//!
//! - **Lanes**: 3 (left, middle, right), indexed 0-2
//! - **Track**: 4 rows, indexed 0 (bottom, where the player sits) to 3 (spawn)
//! - **Display**: 4 seven-segment digits, one per track row
//!
//! # Game Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `COUNTDOWN_SECONDS` | 3 | 1 Hz ticks spent in Countdown before Play |
//! | `LOST_SECONDS` | 5 | 1 Hz ticks spent in Lost before ScoreIdle |
//! | `SPAWN_INTERVAL` | 2 | Move-ticks per obstacle spawn |
//! | `LFSR_SEED` | 0xB5 | Power-on value of the lane generator |
//!
//! Timing rates live in [`ClockConfig`].
//!
//! # Examples
//!
//! ```
//! use lane_dodge_types::{GameMode, Lane, LaneMask};
//!
//! let mask = LaneMask::from_lane(Lane::Middle);
//! assert!(mask.contains(Lane::Middle));
//! assert!(!mask.contains(Lane::Left));
//!
//! assert_eq!(Lane::Left.right(), Lane::Middle);
//! assert_eq!(Lane::Left.left(), Lane::Left);
//!
//! assert!(GameMode::Play.gameplay_enabled());
//! assert!(GameMode::Countdown.score_reset());
//! ```

pub mod config;

pub use config::{ClockConfig, ConfigError};

use serde::{Deserialize, Serialize};

/// Number of lanes
pub const LANE_COUNT: usize = 3;

/// Number of rows on the obstacle track
pub const TRACK_LEN: usize = 4;

/// Number of display digits (one per track row)
pub const DIGIT_COUNT: usize = 4;

/// 1 Hz ticks spent in Countdown before Play begins
pub const COUNTDOWN_SECONDS: u8 = 3;

/// 1 Hz ticks spent in Lost before returning to ScoreIdle
pub const LOST_SECONDS: u8 = 5;

/// Move-ticks between obstacle spawns
pub const SPAWN_INTERVAL: u8 = 2;

/// Power-on value of the lane generator (must be non-zero)
pub const LFSR_SEED: u8 = 0xB5;

/// Largest displayable score
pub const MAX_SCORE: u16 = 9999;

/// Top-level game phase
///
/// The cycle is ScoreIdle → Countdown → Play → Lost → ScoreIdle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Showing the last score, waiting for the center button
    #[default]
    ScoreIdle,
    /// Blank display while the round is prepared
    Countdown,
    /// Obstacles advance and the player can move
    Play,
    /// "LOST" banner after a collision
    Lost,
}

impl GameMode {
    /// Gameplay (player movement, obstacle advance) runs only in Play.
    pub fn gameplay_enabled(&self) -> bool {
        matches!(self, GameMode::Play)
    }

    /// Score and round state are held in reset for the whole Countdown.
    pub fn score_reset(&self) -> bool {
        matches!(self, GameMode::Countdown)
    }

    /// Raw register encoding.
    pub fn bits(&self) -> u8 {
        match self {
            GameMode::ScoreIdle => 0,
            GameMode::Countdown => 1,
            GameMode::Play => 2,
            GameMode::Lost => 3,
        }
    }

    /// Decode a raw register value; anything undefined falls back to ScoreIdle.
    ///
    /// ```
    /// use lane_dodge_types::GameMode;
    ///
    /// assert_eq!(GameMode::from_bits(2), GameMode::Play);
    /// assert_eq!(GameMode::from_bits(7), GameMode::ScoreIdle);
    /// ```
    pub fn from_bits(bits: u8) -> Self {
        match bits {
            1 => GameMode::Countdown,
            2 => GameMode::Play,
            3 => GameMode::Lost,
            _ => GameMode::ScoreIdle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::ScoreIdle => "score",
            GameMode::Countdown => "countdown",
            GameMode::Play => "play",
            GameMode::Lost => "lost",
        }
    }
}

/// One of the three horizontal positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Middle,
    Right,
}

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Middle, Lane::Right];

    pub fn index(&self) -> u8 {
        match self {
            Lane::Left => 0,
            Lane::Middle => 1,
            Lane::Right => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Lane::Left),
            1 => Some(Lane::Middle),
            2 => Some(Lane::Right),
            _ => None,
        }
    }

    /// One lane to the left, clamped at the edge.
    pub fn left(&self) -> Self {
        match self {
            Lane::Left | Lane::Middle => Lane::Left,
            Lane::Right => Lane::Middle,
        }
    }

    /// One lane to the right, clamped at the edge.
    pub fn right(&self) -> Self {
        match self {
            Lane::Left => Lane::Middle,
            Lane::Middle | Lane::Right => Lane::Right,
        }
    }

    /// Single-bit occupancy mask for this lane.
    pub fn bit(&self) -> u8 {
        1 << self.index()
    }
}

/// Lane occupancy of one track row (bit `i` set = obstacle in lane `i`)
///
/// Spawning only ever produces single-lane masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LaneMask(u8);

impl LaneMask {
    pub const EMPTY: LaneMask = LaneMask(0);

    const VALID_BITS: u8 = 0b111;

    pub fn from_lane(lane: Lane) -> Self {
        LaneMask(lane.bit())
    }

    /// Build from raw bits. Bits above the three lanes are dropped.
    pub fn from_bits(bits: u8) -> Self {
        LaneMask(bits & Self::VALID_BITS)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, lane: Lane) -> bool {
        self.0 & lane.bit() != 0
    }

    /// The occupied lane, if exactly one bit is set.
    pub fn lane(&self) -> Option<Lane> {
        match self.0 {
            0b001 => Some(Lane::Left),
            0b010 => Some(Lane::Middle),
            0b100 => Some(Lane::Right),
            _ => None,
        }
    }

    pub fn is_single(&self) -> bool {
        self.0.count_ones() == 1
    }
}

impl From<Lane> for LaneMask {
    fn from(lane: Lane) -> Self {
        LaneMask::from_lane(lane)
    }
}

/// Seven-segment pattern, active-high (bit 0 = segment a ... bit 6 = segment g)
///
/// ```text
///  aaa
/// f   b
///  ggg
/// e   c
///  ddd
/// ```
///
/// Lanes map onto the three horizontal segments: left = a, middle = g,
/// right = d. The physical board is read with the digits rotated a quarter
/// turn, so the horizontal bars become three side-by-side lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Glyph(u8);

impl Glyph {
    pub const SEG_A: u8 = 1 << 0;
    pub const SEG_B: u8 = 1 << 1;
    pub const SEG_C: u8 = 1 << 2;
    pub const SEG_D: u8 = 1 << 3;
    pub const SEG_E: u8 = 1 << 4;
    pub const SEG_F: u8 = 1 << 5;
    pub const SEG_G: u8 = 1 << 6;

    pub const BLANK: Glyph = Glyph(0);

    pub const LETTER_L: Glyph = Glyph(Self::SEG_D | Self::SEG_E | Self::SEG_F);
    pub const LETTER_O: Glyph = Glyph(0x3F);
    pub const LETTER_S: Glyph = Glyph(0x6D);
    pub const LETTER_T: Glyph = Glyph(Self::SEG_D | Self::SEG_E | Self::SEG_F | Self::SEG_G);

    const NUMERALS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

    pub fn from_segments(segments: u8) -> Self {
        Glyph(segments & 0x7F)
    }

    pub fn segments(&self) -> u8 {
        self.0
    }

    pub fn is_lit(&self, segment: u8) -> bool {
        self.0 & segment != 0
    }

    pub fn is_blank(&self) -> bool {
        self.0 == 0
    }

    /// Decimal numeral; anything outside 0-9 is blank.
    pub fn numeral(digit: u8) -> Self {
        Self::NUMERALS
            .get(digit as usize)
            .map(|&s| Glyph(s))
            .unwrap_or(Self::BLANK)
    }

    /// Lane indicator bar.
    pub fn lane(lane: Lane) -> Self {
        match lane {
            Lane::Left => Glyph(Self::SEG_A),
            Lane::Middle => Glyph(Self::SEG_G),
            Lane::Right => Glyph(Self::SEG_D),
        }
    }

    /// Lane indicator for a row mask (blank when empty).
    pub fn lane_mask(mask: LaneMask) -> Self {
        debug_assert!(mask.bits().count_ones() <= 1, "multi-lane row {:#05b}", mask.bits());
        Lane::ALL
            .iter()
            .filter(|lane| mask.contains(**lane))
            .fold(Self::BLANK, |g, lane| g.overlay(Self::lane(*lane)))
    }

    /// Combine two patterns on one digit.
    ///
    /// On the active-low segment lines this is a bitwise AND of the two
    /// drive patterns, i.e. the union of the lit segments.
    pub fn overlay(self, other: Glyph) -> Self {
        Glyph(self.0 | other.0)
    }

    /// Segment drive lines for a common-anode digit (0 = lit), bit 7 unused.
    pub fn active_low(&self) -> u8 {
        !self.0 & 0x7F
    }
}

/// One glyph per track row, index 0 = bottom row (player row)
pub type GlyphBuffer = [Glyph; DIGIT_COUNT];

/// Clean single-tick button pulses for one master tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonPulses {
    pub left: bool,
    pub right: bool,
    pub center: bool,
    /// Master reset (synchronous, overrides everything else)
    pub reset: bool,
}

impl ButtonPulses {
    pub const NONE: ButtonPulses = ButtonPulses {
        left: false,
        right: false,
        center: false,
        reset: false,
    };

    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::NONE
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::NONE
        }
    }

    pub fn center() -> Self {
        Self {
            center: true,
            ..Self::NONE
        }
    }

    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::NONE
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.left || self.right || self.center || self.reset)
    }

    /// Merge two pulse sets; repeated presses of one button stay a single pulse.
    pub fn merge(self, other: ButtonPulses) -> Self {
        Self {
            left: self.left || other.left,
            right: self.right || other.right,
            center: self.center || other.center,
            reset: self.reset || other.reset,
        }
    }
}

/// Pulses emitted by the tick fabric on one master tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickSet {
    /// 1 Hz (countdown and lost dwell)
    pub second: bool,
    /// 3 Hz player blink
    pub blink: bool,
    /// Obstacle advance / spawn decision
    pub movement: bool,
    /// Digit multiplexing cadence for the renderer
    pub refresh: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_outputs_are_exclusive() {
        for mode in [
            GameMode::ScoreIdle,
            GameMode::Countdown,
            GameMode::Play,
            GameMode::Lost,
        ] {
            assert!(!(mode.gameplay_enabled() && mode.score_reset()));
            assert_eq!(mode.gameplay_enabled(), mode == GameMode::Play);
            assert_eq!(mode.score_reset(), mode == GameMode::Countdown);
            assert_eq!(GameMode::from_bits(mode.bits()), mode);
        }
    }

    #[test]
    fn lane_moves_clamp_at_edges() {
        assert_eq!(Lane::Left.left(), Lane::Left);
        assert_eq!(Lane::Right.right(), Lane::Right);
        assert_eq!(Lane::Middle.left(), Lane::Left);
        assert_eq!(Lane::Middle.right(), Lane::Right);
        assert_eq!(Lane::from_index(3), None);
    }

    #[test]
    fn lane_mask_decodes_single_lane() {
        for lane in Lane::ALL {
            let mask = LaneMask::from_lane(lane);
            assert!(mask.is_single());
            assert_eq!(mask.lane(), Some(lane));
        }
        assert_eq!(LaneMask::EMPTY.lane(), None);
        assert_eq!(LaneMask::from_bits(0xFF).bits(), 0b111);
    }

    #[test]
    fn numerals_match_seven_segment_table() {
        assert_eq!(Glyph::numeral(0).segments(), 0x3F);
        assert_eq!(Glyph::numeral(1).segments(), 0x06);
        assert_eq!(Glyph::numeral(8).segments(), 0x7F);
        assert!(Glyph::numeral(10).is_blank());
        assert!(Glyph::numeral(0xF).is_blank());
    }

    #[test]
    fn overlay_is_and_of_active_low_lines() {
        let a = Glyph::lane(Lane::Left);
        let b = Glyph::lane(Lane::Right);
        let combined = a.overlay(b);
        assert_eq!(combined.active_low(), a.active_low() & b.active_low());
        assert_eq!(Glyph::BLANK.active_low(), 0x7F);
    }

    #[test]
    fn pulses_merge_coalesces() {
        let p = ButtonPulses::left().merge(ButtonPulses::left());
        assert_eq!(p, ButtonPulses::left());
        assert!(ButtonPulses::NONE.is_empty());
    }
}
