//! Clock configuration
//!
//! Every periodic rate is derived from one master tick rate. Only the ratios
//! matter to the simulation: the hardware board runs a 100 MHz reference,
//! the terminal build runs a much slower master so that a real-time loop can
//! step it cheaply.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Master rate used by the original board
pub const HARDWARE_MASTER_HZ: u32 = 100_000_000;

/// Default master rate for software runs
pub const SIM_MASTER_HZ: u32 = 6_000;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be non-zero")]
    ZeroRate { name: &'static str },

    #[error("{name} of {rate_hz} Hz is faster than half the master rate ({master_hz} Hz)")]
    RateTooHigh {
        name: &'static str,
        rate_hz: u32,
        master_hz: u32,
    },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Rates of the four pulse streams, in Hz of the master tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    pub master_hz: u32,
    /// Countdown / lost dwell pulse
    pub second_hz: u32,
    /// Player blink pulse
    pub blink_hz: u32,
    /// Obstacle advance pulse
    pub move_hz: u32,
    /// Display multiplexing pulse
    pub refresh_hz: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::with_master(SIM_MASTER_HZ)
    }
}

impl ClockConfig {
    /// Standard rates (1 Hz, 3 Hz, 1 Hz, 1 kHz) on the given master.
    pub fn with_master(master_hz: u32) -> Self {
        Self {
            master_hz,
            second_hz: 1,
            blink_hz: 3,
            move_hz: 1,
            refresh_hz: 1_000,
        }
    }

    /// The 100 MHz board configuration.
    pub fn hardware() -> Self {
        Self::with_master(HARDWARE_MASTER_HZ)
    }

    /// Master ticks between level toggles for a stream of `rate_hz`.
    ///
    /// Never returns 0, so a divider built from an unvalidated config still
    /// toggles every tick instead of stalling.
    pub fn half_period(&self, rate_hz: u32) -> u32 {
        if rate_hz == 0 {
            return u32::MAX;
        }
        (self.master_hz / rate_hz.saturating_mul(2)).max(1)
    }

    /// Master ticks per full period of a stream of `rate_hz`.
    pub fn period(&self, rate_hz: u32) -> u64 {
        self.half_period(rate_hz) as u64 * 2
    }

    fn streams(&self) -> [(&'static str, u32); 4] {
        [
            ("second_hz", self.second_hz),
            ("blink_hz", self.blink_hz),
            ("move_hz", self.move_hz),
            ("refresh_hz", self.refresh_hz),
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.master_hz == 0 {
            return Err(ConfigError::ZeroRate { name: "master_hz" });
        }
        for (name, rate_hz) in self.streams() {
            if rate_hz == 0 {
                return Err(ConfigError::ZeroRate { name });
            }
            if self.master_hz / rate_hz.saturating_mul(2) == 0 {
                return Err(ConfigError::RateTooHigh {
                    name,
                    rate_hz,
                    master_hz: self.master_hz,
                });
            }
        }
        Ok(())
    }

    /// Create from environment variables, starting from the defaults.
    ///
    /// Recognised: `LANE_DODGE_MASTER_HZ`, `LANE_DODGE_SECOND_HZ`,
    /// `LANE_DODGE_BLINK_HZ`, `LANE_DODGE_MOVE_HZ`, `LANE_DODGE_REFRESH_HZ`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`ClockConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &'static str, default: u32| -> Result<u32, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(raw) => {
                    let trimmed = raw.trim();
                    if trimmed.is_empty() {
                        return Ok(default);
                    }
                    trimmed.parse().map_err(|_| ConfigError::InvalidEnv {
                        var,
                        value: raw.clone(),
                    })
                }
            }
        };

        let base = Self::with_master(read("LANE_DODGE_MASTER_HZ", SIM_MASTER_HZ)?);
        let config = Self {
            master_hz: base.master_hz,
            second_hz: read("LANE_DODGE_SECOND_HZ", base.second_hz)?,
            blink_hz: read("LANE_DODGE_BLINK_HZ", base.blink_hz)?,
            move_hz: read("LANE_DODGE_MOVE_HZ", base.move_hz)?,
            refresh_hz: read("LANE_DODGE_REFRESH_HZ", base.refresh_hz)?,
        };
        config.validate()?;
        Ok(config)
    }
}
