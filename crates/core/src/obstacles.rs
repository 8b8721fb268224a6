//! Obstacle pipeline - spawn gate and the 4-row conveyor
//!
//! Row 0 is the player row, row 3 the spawn row. Every move-tick while
//! gameplay is enabled the rows shift one step toward row 0 (dropping the old
//! row 0) and row 3 receives either a freshly spawned single-lane obstacle or
//! nothing.

use serde::{Deserialize, Serialize};

use crate::types::{Lane, LaneMask, SPAWN_INTERVAL, TRACK_LEN};

/// Fixed 4-row conveyor of lane masks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ObstacleTrack {
    rows: [LaneMask; TRACK_LEN],
}

impl ObstacleTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[LaneMask; TRACK_LEN] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> LaneMask {
        self.rows.get(index).copied().unwrap_or(LaneMask::EMPTY)
    }

    /// The row the player occupies.
    pub fn bottom(&self) -> LaneMask {
        self.rows[0]
    }

    /// Number of rows holding an obstacle.
    pub fn occupied(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_empty()).count()
    }

    /// Shift toward row 0 and fill the spawn row.
    pub fn advance(&mut self, incoming: LaneMask) {
        debug_assert!(incoming.bits().count_ones() <= 1);
        self.rows.copy_within(1.., 0);
        self.rows[TRACK_LEN - 1] = incoming;
    }

    pub fn clear(&mut self) {
        self.rows = [LaneMask::EMPTY; TRACK_LEN];
    }

    /// Raw masks, row 0 first.
    pub fn to_bits(&self) -> [u8; TRACK_LEN] {
        self.rows.map(|r| r.bits())
    }

    #[cfg(test)]
    pub(crate) fn set_row(&mut self, index: usize, mask: LaneMask) {
        self.rows[index] = mask;
    }
}

/// Spawn gate plus the conveyor it feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObstaclePipeline {
    track: ObstacleTrack,
    spawn_count: u8,
    held_lane: Option<Lane>,
}

impl ObstaclePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self) -> &ObstacleTrack {
        &self.track
    }

    pub fn spawn_count(&self) -> u8 {
        self.spawn_count
    }

    /// Lane captured at the most recent spawn of the current play window.
    pub fn held_lane(&self) -> Option<Lane> {
        self.held_lane
    }

    /// Advance one master tick.
    ///
    /// `candidate` is the generator's current lane; it is captured only when a
    /// spawn fires. Returns the spawned lane, if any.
    pub fn step(&mut self, enabled: bool, move_tick: bool, candidate: Lane) -> Option<Lane> {
        if !enabled {
            self.spawn_count = 0;
            self.held_lane = None;
            return None;
        }
        if !move_tick {
            return None;
        }

        let spawned = if self.spawn_count + 1 >= SPAWN_INTERVAL {
            self.spawn_count = 0;
            self.held_lane = Some(candidate);
            Some(candidate)
        } else {
            self.spawn_count += 1;
            None
        };

        self.track
            .advance(spawned.map(LaneMask::from_lane).unwrap_or(LaneMask::EMPTY));
        spawned
    }

    /// Round reset: empty conveyor and idle gate.
    pub fn clear(&mut self) {
        self.track.clear();
        self.spawn_count = 0;
        self.held_lane = None;
    }

    #[cfg(test)]
    pub(crate) fn track_mut(&mut self) -> &mut ObstacleTrack {
        &mut self.track
    }
}
