//! Customer timing and movement tunables.

use crate::{CustomerError, CustomerResult};

/// Per-run customer parameters.  All durations are in simulated seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CustomerConfig {
    /// How long a seated customer waits for someone to take the order.
    pub ordering_patience_secs: f32,
    /// How long a customer waits for food after ordering.
    pub serving_patience_secs:  f32,
    pub eating_secs:            f32,
    /// World units per second.
    pub movement_speed:         f32,
    /// A customer within this world distance of a cell centre has arrived.
    pub arrive_epsilon:         f32,
    /// Seconds between automatic spawn attempts.
    pub spawn_interval_secs:    f32,
    /// Spawn customers on a timer.  Disable to place them by hand.
    pub auto_spawn:             bool,
}

impl CustomerConfig {
    /// Reject values that would stall or break the tick loop.
    pub fn validate(&self) -> CustomerResult<()> {
        let positive = [
            ("ordering_patience_secs", self.ordering_patience_secs),
            ("serving_patience_secs",  self.serving_patience_secs),
            ("eating_secs",            self.eating_secs),
            ("movement_speed",         self.movement_speed),
            ("spawn_interval_secs",    self.spawn_interval_secs),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CustomerError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.arrive_epsilon.is_finite() && self.arrive_epsilon >= 0.0) {
            return Err(CustomerError::Config(format!(
                "arrive_epsilon must be non-negative, got {}",
                self.arrive_epsilon
            )));
        }
        Ok(())
    }
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            ordering_patience_secs: 20.0,
            serving_patience_secs:  20.0,
            eating_secs:            5.0,
            movement_speed:         10.0,
            arrive_epsilon:         0.01,
            spawn_interval_secs:    1.5,
            auto_spawn:             true,
        }
    }
}
