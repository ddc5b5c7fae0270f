//! Simulation time model.
//!
//! # Design
//!
//! Time advances in discrete `Tick`s.  Each tick represents `tick_secs`
//! seconds of simulated time; patience timers and movement interpolation
//! consume that delta.  A game loop that wants frame-accurate deltas can
//! bypass the fixed step with `Sim::step(dt, ..)`.

use std::fmt;

use crate::{CafeError, CafeResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and the simulated seconds elapsed so far.
///
/// Elapsed time is accumulated rather than derived from `tick * tick_secs`
/// because variable-delta steps (`Sim::step`) also advance the clock.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Default seconds per tick.
    pub tick_secs: f32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
    /// Simulated seconds since tick 0.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new(tick_secs: f32) -> Self {
        Self {
            tick_secs,
            current_tick: Tick::ZERO,
            elapsed_secs: 0.0,
        }
    }

    /// Advance the clock by one tick of `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.elapsed_secs += dt as f64;
    }

    /// Break elapsed time into (minutes, seconds) for human-readable logs.
    pub fn elapsed_ms(&self) -> (u64, f64) {
        let total = self.elapsed_secs.max(0.0);
        let minutes = (total / 60.0).floor();
        (minutes as u64, total - minutes * 60.0)
    }

    /// How many fixed ticks span `secs` seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        (secs / self.tick_secs).ceil().max(0.0) as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_ms();
        write!(f, "{} ({:02}:{:04.1})", self.current_tick, m, s)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seconds of simulated time per fixed tick.  A 60 Hz game loop uses
    /// `1.0 / 60.0`.
    pub tick_secs: f32,

    /// Total ticks to simulate with `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count for the `parallel` intent phase.  `None` uses
    /// all logical cores.
    pub num_threads: Option<usize>,

    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_secs)
    }

    /// Reject configurations the tick loop cannot run.
    pub fn validate(&self) -> CafeResult<()> {
        if !(self.tick_secs.is_finite() && self.tick_secs > 0.0) {
            return Err(CafeError::Config(format!(
                "tick_secs must be positive and finite, got {}",
                self.tick_secs
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CafeError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_secs:             1.0 / 30.0,
            total_ticks:           30 * 60 * 5,
            seed:                  0,
            num_threads:           None,
            output_interval_ticks: 30,
        }
    }
}
