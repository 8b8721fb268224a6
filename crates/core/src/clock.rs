//! Tick fabric - periodic pulse streams derived from the master tick
//!
//! Each stream is a free-running half-period divider that toggles a level,
//! followed by a rising-edge detector. The detector output is high for
//! exactly one master tick per period regardless of the divider ratio, and
//! can never fire twice within one period.

use crate::types::{ClockConfig, TickSet};

/// Free-running divider toggling its level every `half_period` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockDivider {
    half_period: u32,
    count: u32,
    level: bool,
}

impl ClockDivider {
    pub fn new(half_period: u32) -> Self {
        Self {
            half_period: half_period.max(1),
            count: 0,
            level: false,
        }
    }

    pub fn half_period(&self) -> u32 {
        self.half_period
    }

    pub fn level(&self) -> bool {
        self.level
    }

    /// Advance one master tick and return the new level.
    #[inline]
    pub fn step(&mut self) -> bool {
        if self.count + 1 >= self.half_period {
            self.count = 0;
            self.level = !self.level;
        } else {
            self.count += 1;
        }
        self.level
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.level = false;
    }
}

/// Rising-edge detector: one-tick pulse on each low→high transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeDetector {
    prev: bool,
}

impl EdgeDetector {
    #[inline]
    pub fn step(&mut self, level: bool) -> bool {
        let rising = level && !self.prev;
        self.prev = level;
        rising
    }

    pub fn reset(&mut self) {
        self.prev = false;
    }
}

/// Divider composed with an edge detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseGenerator {
    divider: ClockDivider,
    edge: EdgeDetector,
}

impl PulseGenerator {
    pub fn new(half_period: u32) -> Self {
        Self {
            divider: ClockDivider::new(half_period),
            edge: EdgeDetector::default(),
        }
    }

    /// Master ticks between pulses.
    pub fn period(&self) -> u64 {
        self.divider.half_period() as u64 * 2
    }

    #[inline]
    pub fn step(&mut self) -> bool {
        let level = self.divider.step();
        self.edge.step(level)
    }

    pub fn reset(&mut self) {
        self.divider.reset();
        self.edge.reset();
    }
}

/// The four pulse streams of the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickFabric {
    second: PulseGenerator,
    blink: PulseGenerator,
    movement: PulseGenerator,
    refresh: PulseGenerator,
}

impl TickFabric {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            second: PulseGenerator::new(config.half_period(config.second_hz)),
            blink: PulseGenerator::new(config.half_period(config.blink_hz)),
            movement: PulseGenerator::new(config.half_period(config.move_hz)),
            refresh: PulseGenerator::new(config.half_period(config.refresh_hz)),
        }
    }

    /// Advance every stream by one master tick.
    #[inline]
    pub fn step(&mut self) -> TickSet {
        TickSet {
            second: self.second.step(),
            blink: self.blink.step(),
            movement: self.movement.step(),
            refresh: self.refresh.step(),
        }
    }

    pub fn reset(&mut self) {
        self.second.reset();
        self.blink.reset();
        self.movement.reset();
        self.refresh.reset();
    }

    /// Master ticks between move pulses.
    pub fn move_period(&self) -> u64 {
        self.movement.period()
    }

    /// Master ticks between 1 Hz pulses.
    pub fn second_period(&self) -> u64 {
        self.second.period()
    }
}
