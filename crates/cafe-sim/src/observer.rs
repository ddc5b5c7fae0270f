//! Simulation observer trait for scoring, progress reporting, and data
//! collection.

use cafe_core::{AgentId, Tick};
use cafe_customer::{Customer, CustomerStore, StateChange};
use cafe_grid::GridWorld;

/// Per-tick aggregate figures, passed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct TickSummary {
    pub tick:         Tick,
    /// Simulated seconds at the end of the tick.
    pub elapsed_secs: f64,
    /// Customers on the floor at the end of the tick.
    pub customers:    usize,
    pub spawned:      usize,
    pub departed:     usize,
    /// Cell transitions committed this tick.
    pub moves:        usize,
    /// Step requests that lost their claim to a higher-priority customer.
    pub blocked:      usize,
    pub free_seats:   usize,
    /// Running score after this tick.
    pub score:        i64,
}

/// Callbacks invoked by [`Sim`][crate::Sim] during the tick loop and on
/// external events.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — score printer
///
/// ```rust,ignore
/// struct ScorePrinter;
///
/// impl SimObserver for ScorePrinter {
///     fn on_score(&mut self, tick: Tick, agent: AgentId, delta: i64, total: i64) {
///         println!("{tick}: {agent} {delta:+} (total {total})");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A customer appeared on a spawn cell.
    fn on_spawn(&mut self, _tick: Tick, _customer: &Customer) {}

    /// A customer changed state.
    fn on_state_change(&mut self, _tick: Tick, _agent: AgentId, _change: &StateChange) {}

    /// The score moved by `delta`: positive on a correct delivery, negative
    /// when a customer leaves unserved.
    fn on_score(&mut self, _tick: Tick, _agent: AgentId, _delta: i64, _total: i64) {}

    /// A customer reached the exit and was removed.  Its seat has already
    /// been released.
    fn on_departure(&mut self, _tick: Tick, _customer: &Customer) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to every customer and the grid.
    fn on_snapshot(&mut self, _tick: Tick, _customers: &CustomerStore, _grid: &GridWorld) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
