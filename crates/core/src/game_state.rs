//! Game state module - the whole game as one synchronous step function
//!
//! Every register lives in [`GameState`]. [`GameState::step`] models one
//! master tick: all next values are computed from the current register
//! contents, then committed together. In particular the scoring check reads
//! the bottom row before the conveyor shifts it away, and the collision
//! check reads the track and lane as they were at the start of the tick.

use arrayvec::ArrayVec;
use log::{debug, trace};

use crate::clock::TickFabric;
use crate::display::compose;
use crate::mode::{ModeFsm, ModeInputs};
use crate::obstacles::{ObstaclePipeline, ObstacleTrack};
use crate::player::Player;
use crate::rng::LaneLfsr;
use crate::scoring::{obstacle_passed, BcdScore, CollisionLatch};
use crate::snapshot::GameSnapshot;
use crate::types::{ButtonPulses, ClockConfig, GameMode, GlyphBuffer, Lane, TickSet};

/// Most events a single tick can produce (mode change, spawn, pass, collision).
pub const MAX_EVENTS_PER_TICK: usize = 4;

/// Something observable that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Master reset was applied
    Reset,
    ModeChanged { from: GameMode, to: GameMode },
    Spawned { lane: Lane },
    /// An obstacle left the bottom row without hitting the player
    Passed { score: u16 },
    /// Collision registered against the player's lane
    Collision { lane: Lane },
}

/// Outcome of one master tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub ticks: TickSet,
    pub events: ArrayVec<GameEvent, MAX_EVENTS_PER_TICK>,
}

impl StepReport {
    pub fn mode_change(&self) -> Option<(GameMode, GameMode)> {
        self.events.iter().find_map(|e| match *e {
            GameEvent::ModeChanged { from, to } => Some((from, to)),
            _ => None,
        })
    }

    pub fn spawned(&self) -> Option<Lane> {
        self.events.iter().find_map(|e| match *e {
            GameEvent::Spawned { lane } => Some(lane),
            _ => None,
        })
    }

    pub fn passed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::Passed { .. }))
    }

    pub fn collided(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::Collision { .. }))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: ClockConfig,
    clock: TickFabric,
    mode: ModeFsm,
    player: Player,
    obstacles: ObstaclePipeline,
    lfsr: LaneLfsr,
    score: BcdScore,
    collision: CollisionLatch,
    blink_on: bool,
    /// Master ticks since the last reset.
    tick: u64,
    /// Increments on every entry into Countdown.
    round: u32,
}

impl GameState {
    /// Power-on state for the given clock.
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            clock: TickFabric::new(&config),
            mode: ModeFsm::new(),
            player: Player::new(),
            obstacles: ObstaclePipeline::new(),
            lfsr: LaneLfsr::new(),
            score: BcdScore::new(),
            collision: CollisionLatch::default(),
            blink_on: false,
            tick: 0,
            round: 0,
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode.mode()
    }

    pub fn gameplay_enabled(&self) -> bool {
        self.mode.gameplay_enabled()
    }

    pub fn score_reset(&self) -> bool {
        self.mode.score_reset()
    }

    pub fn player_lane(&self) -> Lane {
        self.player.lane()
    }

    pub fn track(&self) -> &ObstacleTrack {
        self.obstacles.track()
    }

    pub fn score(&self) -> &BcdScore {
        &self.score
    }

    pub fn collision(&self) -> bool {
        self.collision.is_set()
    }

    pub fn blink_on(&self) -> bool {
        self.blink_on
    }

    pub fn lfsr(&self) -> &LaneLfsr {
        &self.lfsr
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Master ticks between move pulses.
    pub fn move_period(&self) -> u64 {
        self.clock.move_period()
    }

    /// Master ticks between 1 Hz pulses.
    pub fn second_period(&self) -> u64 {
        self.clock.second_period()
    }

    /// Current display rows, index 0 = bottom.
    pub fn display(&self) -> GlyphBuffer {
        compose(
            self.mode.mode(),
            &self.score,
            self.player.lane(),
            self.obstacles.track(),
            self.blink_on,
        )
    }

    /// Synchronous master reset: every register back to power-on.
    pub fn reset(&mut self) {
        debug!("master reset at tick {}", self.tick);
        *self = Self::new(self.config);
    }

    /// Advance one master tick.
    pub fn step(&mut self, input: ButtonPulses) -> StepReport {
        let mut report = StepReport::default();
        if input.reset {
            self.reset();
            report.events.push(GameEvent::Reset);
            return report;
        }

        let ticks = self.clock.step();
        report.ticks = ticks;

        // Snapshot of the registers this tick reads.
        let enabled = self.mode.gameplay_enabled();
        let round_reset = self.mode.score_reset();
        let lane = self.player.lane();
        let bottom = self.obstacles.track().bottom();
        let collision = self.collision.is_set();
        let candidate = self.lfsr.lane();

        let hit = CollisionLatch::sample(enabled, bottom, lane);
        let passed = obstacle_passed(enabled, ticks.movement, bottom, collision);

        // Commit.
        let transition = self.mode.step(ModeInputs {
            center: input.center,
            second: ticks.second,
            collision,
        });

        if round_reset {
            self.player.reset();
            self.obstacles.clear();
        } else {
            self.player.step(&input, enabled);
        }

        let spawned = self.obstacles.step(enabled, ticks.movement, candidate);

        if enabled && ticks.movement {
            self.lfsr.advance();
        }

        self.score.step(round_reset, passed);
        self.collision.latch(hit);

        if ticks.blink {
            self.blink_on = !self.blink_on;
        }
        self.tick = self.tick.wrapping_add(1);

        if let Some((from, to)) = transition {
            if to == GameMode::Countdown {
                self.round = self.round.wrapping_add(1);
            }
            debug!("mode {} -> {} at tick {}", from.as_str(), to.as_str(), self.tick);
            report.events.push(GameEvent::ModeChanged { from, to });
        }
        if let Some(lane) = spawned {
            trace!("spawn in lane {}", lane.index());
            report.events.push(GameEvent::Spawned { lane });
        }
        if passed {
            // Reported even at 9999 where the counter no longer moves.
            trace!("obstacle passed, score {}", self.score.value());
            report.events.push(GameEvent::Passed {
                score: self.score.value(),
            });
        }
        if hit && !collision {
            debug!("collision in lane {}", lane.index());
            report.events.push(GameEvent::Collision { lane });
        }

        report
    }

    /// Step `n` ticks with no input, returning how many of them carried a move pulse.
    pub fn run_idle(&mut self, n: u64) -> u64 {
        (0..n)
            .filter(|_| self.step(ButtonPulses::NONE).ticks.movement)
            .count() as u64
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.tick = self.tick;
        out.round = self.round;
        out.mode = self.mode.mode();
        out.countdown_secs = self.mode.countdown_secs();
        out.lost_secs = self.mode.lost_secs();
        out.player_lane = self.player.lane();
        out.track = self.obstacles.track().to_bits();
        out.spawn_count = self.obstacles.spawn_count();
        out.held_lane = self.obstacles.held_lane();
        out.lfsr = self.lfsr.value();
        out.score_digits = self.score.digits();
        out.score = self.score.value();
        out.collision = self.collision.is_set();
        out.blink_on = self.blink_on;
        out.display = self.display();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn obstacles_mut(&mut self) -> &mut ObstaclePipeline {
        &mut self.obstacles
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub(crate) fn score_mut(&mut self) -> &mut BcdScore {
        &mut self.score
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Glyph, LaneMask};

    /// 12 master ticks per second: second/move pulse every 12 ticks, blink every 4.
    fn fast_clock() -> ClockConfig {
        ClockConfig {
            master_hz: 12,
            second_hz: 1,
            blink_hz: 3,
            move_hz: 1,
            refresh_hz: 6,
        }
    }

    fn step_until(state: &mut GameState, mut pred: impl FnMut(&StepReport) -> bool) -> u64 {
        for n in 1..=10_000 {
            let r = state.step(ButtonPulses::NONE);
            if pred(&r) {
                return n;
            }
        }
        panic!("condition not reached");
    }

    fn start_play(state: &mut GameState) {
        state.step(ButtonPulses::center());
        assert_eq!(state.mode(), GameMode::Countdown);
        step_until(state, |r| r.mode_change().is_some());
        assert_eq!(state.mode(), GameMode::Play);
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(fast_clock());
        assert_eq!(state.mode(), GameMode::ScoreIdle);
        assert_eq!(state.player_lane(), Lane::Middle);
        assert_eq!(state.score().value(), 0);
        assert_eq!(state.track().occupied(), 0);
        assert_eq!(state.lfsr().value(), crate::types::LFSR_SEED);
        assert!(!state.collision());
    }

    #[test]
    fn countdown_counts_three_second_pulses() {
        let mut state = GameState::new(fast_clock());
        state.step(ButtonPulses::center());
        let mut seconds = 0;
        loop {
            let r = state.step(ButtonPulses::NONE);
            if r.ticks.second {
                seconds += 1;
            }
            if let Some((from, to)) = r.mode_change() {
                assert_eq!((from, to), (GameMode::Countdown, GameMode::Play));
                break;
            }
            assert!(seconds < 3);
        }
        assert_eq!(seconds, 3);
        assert_eq!(state.round(), 1);
    }

    #[test]
    fn countdown_clears_previous_round() {
        let mut state = GameState::new(fast_clock());
        *state.score_mut() = BcdScore::from_value(321);
        state
            .obstacles_mut()
            .track_mut()
            .set_row(2, LaneMask::from_lane(Lane::Left));
        state.player_mut().set_lane(Lane::Right);

        state.step(ButtonPulses::center());
        state.step(ButtonPulses::NONE);
        assert_eq!(state.score().value(), 0);
        assert_eq!(state.track().occupied(), 0);
        assert_eq!(state.player_lane(), Lane::Middle);
    }

    #[test]
    fn input_ignored_outside_play() {
        let mut state = GameState::new(fast_clock());
        state.step(ButtonPulses::left());
        assert_eq!(state.player_lane(), Lane::Middle);
    }

    #[test]
    fn collision_registers_then_loses() {
        let mut state = GameState::new(fast_clock());
        start_play(&mut state);
        let lane = state.player_lane();
        state
            .obstacles_mut()
            .track_mut()
            .set_row(1, LaneMask::from_lane(lane));

        // Move-tick shifts the obstacle into the player row.
        step_until(&mut state, |r| r.ticks.movement);
        assert!(state.track().bottom().contains(lane));
        assert!(!state.collision());
        assert_eq!(state.mode(), GameMode::Play);

        let r = state.step(ButtonPulses::NONE);
        assert!(r.collided());
        assert!(state.collision());
        assert_eq!(state.mode(), GameMode::Play);

        let r = state.step(ButtonPulses::NONE);
        assert_eq!(r.mode_change(), Some((GameMode::Play, GameMode::Lost)));
        assert!(!r.collided(), "collision is reported once");
        assert_eq!(state.display(), crate::display::LOST_GLYPHS);
    }

    #[test]
    fn dodged_obstacle_scores_on_next_move_tick() {
        let mut state = GameState::new(fast_clock());
        start_play(&mut state);
        state
            .obstacles_mut()
            .track_mut()
            .set_row(0, LaneMask::from_lane(Lane::Left));

        let r = state.step(ButtonPulses::NONE);
        assert!(!r.collided());
        step_until(&mut state, |r| r.ticks.movement);
        assert_eq!(state.score().value(), 1);
        assert_eq!(state.mode(), GameMode::Play);
    }

    #[test]
    fn moving_out_on_shift_tick_avoids_collision() {
        let mut state = GameState::new(fast_clock());
        start_play(&mut state);
        state
            .obstacles_mut()
            .track_mut()
            .set_row(1, LaneMask::from_lane(Lane::Middle));

        // Press left on exactly the tick the conveyor shifts.
        let mut probe = state.clone();
        let n = step_until(&mut probe, |r| r.ticks.movement);
        for _ in 1..n {
            state.step(ButtonPulses::NONE);
        }
        let r = state.step(ButtonPulses::left());
        assert!(r.ticks.movement);
        assert_eq!(state.player_lane(), Lane::Left);

        state.step(ButtonPulses::NONE);
        assert!(!state.collision());
    }

    #[test]
    fn lost_returns_to_idle_after_five_seconds() {
        let mut state = GameState::new(fast_clock());
        start_play(&mut state);
        let lane = state.player_lane();
        state
            .obstacles_mut()
            .track_mut()
            .set_row(0, LaneMask::from_lane(lane));
        step_until(&mut state, |r| r.mode_change() == Some((GameMode::Play, GameMode::Lost)));

        let mut seconds = 0;
        step_until(&mut state, |r| {
            seconds += r.ticks.second as u32;
            r.mode_change().is_some()
        });
        assert_eq!(seconds, 5);
        assert_eq!(state.mode(), GameMode::ScoreIdle);
    }

    #[test]
    fn reset_restores_power_on_state() {
        let mut state = GameState::new(fast_clock());
        start_play(&mut state);
        state.run_idle(30);
        let r = state.step(ButtonPulses::reset());
        assert_eq!(r.events.as_slice(), &[GameEvent::Reset]);
        assert_eq!(state.mode(), GameMode::ScoreIdle);
        assert_eq!(state.tick(), 0);
        assert_eq!(state.track().occupied(), 0);
        assert_eq!(state.lfsr().value(), crate::types::LFSR_SEED);
    }

    #[test]
    fn blink_toggles_on_blink_pulse() {
        let mut state = GameState::new(fast_clock());
        let before = state.blink_on();
        step_until(&mut state, |r| r.ticks.blink);
        assert_ne!(state.blink_on(), before);
    }

    #[test]
    fn play_display_tracks_player_row() {
        let mut state = GameState::new(fast_clock());
        start_play(&mut state);
        if !state.blink_on() {
            step_until(&mut state, |r| r.ticks.blink);
        }
        assert_eq!(state.display()[0], Glyph::lane(state.player_lane()));
    }

    #[test]
    fn snapshot_mirrors_registers() {
        let mut state = GameState::new(fast_clock());
        start_play(&mut state);
        state.run_idle(40);
        let snap = state.snapshot();
        assert_eq!(snap.mode, state.mode());
        assert_eq!(snap.track, state.track().to_bits());
        assert_eq!(snap.score, state.score().value());
        assert_eq!(snap.lfsr, state.lfsr().value());
        assert_eq!(snap.display, state.display());
        assert_eq!(snap.tick, state.tick());
    }
}
