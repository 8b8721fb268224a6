//! Game mode state machine
//!
//! ```text
//! ScoreIdle --center--> Countdown --3 s--> Play --collision--> Lost --5 s--> ScoreIdle
//! ```
//!
//! The dwell timers count 1 Hz pulses and sit at zero outside their mode.

use crate::types::{GameMode, COUNTDOWN_SECONDS, LOST_SECONDS};

/// Inputs sampled by the mode machine on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeInputs {
    pub center: bool,
    pub second: bool,
    /// Registered collision flag
    pub collision: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeFsm {
    mode: GameMode,
    countdown_secs: u8,
    lost_secs: u8,
}

impl ModeFsm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn countdown_secs(&self) -> u8 {
        self.countdown_secs
    }

    pub fn lost_secs(&self) -> u8 {
        self.lost_secs
    }

    pub fn gameplay_enabled(&self) -> bool {
        self.mode.gameplay_enabled()
    }

    pub fn score_reset(&self) -> bool {
        self.mode.score_reset()
    }

    /// Advance one tick. Returns `Some((from, to))` on a transition.
    pub fn step(&mut self, inputs: ModeInputs) -> Option<(GameMode, GameMode)> {
        let from = self.mode;
        let to = match self.mode {
            GameMode::ScoreIdle => {
                if inputs.center {
                    GameMode::Countdown
                } else {
                    GameMode::ScoreIdle
                }
            }
            GameMode::Countdown => {
                if inputs.second {
                    self.countdown_secs = self.countdown_secs.saturating_add(1);
                }
                if self.countdown_secs >= COUNTDOWN_SECONDS {
                    GameMode::Play
                } else {
                    GameMode::Countdown
                }
            }
            GameMode::Play => {
                if inputs.collision {
                    GameMode::Lost
                } else {
                    GameMode::Play
                }
            }
            GameMode::Lost => {
                if inputs.second {
                    self.lost_secs = self.lost_secs.saturating_add(1);
                }
                if self.lost_secs >= LOST_SECONDS {
                    GameMode::ScoreIdle
                } else {
                    GameMode::Lost
                }
            }
        };

        if to != GameMode::Countdown {
            self.countdown_secs = 0;
        }
        if to != GameMode::Lost {
            self.lost_secs = 0;
        }
        self.mode = to;

        (from != to).then_some((from, to))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load a raw mode register value (undefined values fall back to ScoreIdle).
    pub fn load_bits(&mut self, bits: u8) {
        *self = Self {
            mode: GameMode::from_bits(bits),
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: ModeInputs = ModeInputs {
        center: false,
        second: true,
        collision: false,
    };
    const IDLE: ModeInputs = ModeInputs {
        center: false,
        second: false,
        collision: false,
    };

    #[test]
    fn center_starts_countdown() {
        let mut fsm = ModeFsm::new();
        assert_eq!(fsm.step(SECOND), None);
        let t = fsm.step(ModeInputs {
            center: true,
            ..IDLE
        });
        assert_eq!(t, Some((GameMode::ScoreIdle, GameMode::Countdown)));
    }

    #[test]
    fn countdown_lasts_three_seconds() {
        let mut fsm = ModeFsm::new();
        fsm.step(ModeInputs {
            center: true,
            ..IDLE
        });
        assert_eq!(fsm.step(SECOND), None);
        assert_eq!(fsm.step(IDLE), None);
        assert_eq!(fsm.step(SECOND), None);
        assert_eq!(fsm.countdown_secs(), 2);
        assert_eq!(
            fsm.step(SECOND),
            Some((GameMode::Countdown, GameMode::Play))
        );
        assert_eq!(fsm.countdown_secs(), 0);
    }

    #[test]
    fn center_ignored_outside_score_idle() {
        let mut fsm = ModeFsm::new();
        fsm.load_bits(GameMode::Play.bits());
        assert_eq!(
            fsm.step(ModeInputs {
                center: true,
                ..IDLE
            }),
            None
        );
    }

    #[test]
    fn collision_loses_then_five_seconds_to_idle() {
        let mut fsm = ModeFsm::new();
        fsm.load_bits(GameMode::Play.bits());
        assert_eq!(
            fsm.step(ModeInputs {
                collision: true,
                ..IDLE
            }),
            Some((GameMode::Play, GameMode::Lost))
        );
        for _ in 0..4 {
            assert_eq!(fsm.step(SECOND), None);
        }
        assert_eq!(fsm.step(SECOND), Some((GameMode::Lost, GameMode::ScoreIdle)));
    }

    #[test]
    fn undefined_register_value_falls_back_to_idle() {
        let mut fsm = ModeFsm::new();
        fsm.load_bits(0xFF);
        assert_eq!(fsm.mode(), GameMode::ScoreIdle);
    }
}
