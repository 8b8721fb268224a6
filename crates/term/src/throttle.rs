use crate::types::TickSet;

/// Decides which master ticks get a terminal frame.
///
/// Refresh pulses from the tick fabric pace the frames; a paced frame is
/// only drawn when the display changed, or when `min_static_ticks` have
/// passed since the last draw (so a static screen still heals after
/// terminal glitches).
#[derive(Debug, Clone)]
pub struct RefreshThrottle {
    frame_divisor: u32,
    refresh_count: u32,
    min_static_ticks: u64,
    last_draw_tick: u64,
    last_fingerprint: u64,
    has_drawn: bool,
}

impl RefreshThrottle {
    /// `frame_divisor` refresh pulses make one frame slot (0 is treated as 1).
    pub fn new(frame_divisor: u32, min_static_ticks: u64) -> Self {
        Self {
            frame_divisor: frame_divisor.max(1),
            refresh_count: 0,
            min_static_ticks,
            last_draw_tick: 0,
            last_fingerprint: 0,
            has_drawn: false,
        }
    }

    /// Feed the pulses of one master tick.
    pub fn observe(&mut self, ticks: &TickSet) {
        if ticks.refresh {
            self.refresh_count = self.refresh_count.saturating_add(1);
        }
    }

    pub fn frame_due(&self) -> bool {
        self.refresh_count >= self.frame_divisor
    }

    pub fn should_draw(&mut self, tick: u64, fingerprint: u64) -> bool {
        if !self.has_drawn {
            self.mark(tick, fingerprint);
            return true;
        }
        if !self.frame_due() {
            return false;
        }
        let stale = tick.saturating_sub(self.last_draw_tick) >= self.min_static_ticks;
        if fingerprint != self.last_fingerprint || stale {
            self.mark(tick, fingerprint);
            return true;
        }
        false
    }

    /// Force a draw on the next call (terminal resized).
    pub fn invalidate(&mut self) {
        self.has_drawn = false;
    }

    fn mark(&mut self, tick: u64, fingerprint: u64) {
        self.has_drawn = true;
        self.refresh_count = 0;
        self.last_draw_tick = tick;
        self.last_fingerprint = fingerprint;
    }
}
