use crate::core::GameSnapshot;
use crate::types::{ButtonPulses, GameMode, Lane, LaneMask};

/// Snapshot-driven player.
///
/// In ScoreIdle it presses center after `start_delay` ticks. In Play it only
/// reacts to the obstacle in row 1 (the one that lands on the player row at
/// the next move-tick), stepping into a neighbouring lane that is clear in
/// rows 0 and 1.
#[derive(Debug, Clone)]
pub struct Autopilot {
    start_delay: u64,
    press_interval: u64,
    idle_ticks: u64,
    cooldown: u64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Autopilot {
    pub fn new(start_delay: u64, press_interval: u64) -> Self {
        Self {
            start_delay,
            press_interval,
            idle_ticks: 0,
            cooldown: 0,
        }
    }

    /// Pulses to feed into the next master tick.
    pub fn next_pulses(&mut self, snap: &GameSnapshot) -> ButtonPulses {
        match snap.mode {
            GameMode::ScoreIdle => {
                self.idle_ticks += 1;
                if self.idle_ticks > self.start_delay {
                    self.idle_ticks = 0;
                    return ButtonPulses::center();
                }
                ButtonPulses::NONE
            }
            GameMode::Play => {
                self.idle_ticks = 0;
                if self.cooldown > 0 {
                    self.cooldown -= 1;
                    return ButtonPulses::NONE;
                }
                match dodge(snap) {
                    Some(pulses) => {
                        self.cooldown = self.press_interval;
                        pulses
                    }
                    None => ButtonPulses::NONE,
                }
            }
            GameMode::Countdown | GameMode::Lost => {
                self.idle_ticks = 0;
                self.cooldown = 0;
                ButtonPulses::NONE
            }
        }
    }
}

/// Press needed to step out of an incoming obstacle, if any.
fn dodge(snap: &GameSnapshot) -> Option<ButtonPulses> {
    let lane = snap.player_lane;
    let incoming = LaneMask::from_bits(snap.track[1]);
    if !incoming.contains(lane) {
        return None;
    }
    let blocked = LaneMask::from_bits(snap.track[0] | snap.track[1]);

    let candidates: &[Lane] = match lane {
        Lane::Middle => &[Lane::Left, Lane::Right],
        Lane::Left | Lane::Right => &[Lane::Middle],
    };
    let target = candidates.iter().copied().find(|l| !blocked.contains(*l))?;

    Some(if target.index() < lane.index() {
        ButtonPulses::left()
    } else {
        ButtonPulses::right()
    })
}
