//! The `Sim` struct and its tick loop.

use cafe_core::{AgentId, Cell, ItemId, SimClock, SimConfig, SimRng, Tick};
use cafe_customer::{Arrival, Customer, CustomerConfig, CustomerStore, Menu, StateChange};
use cafe_grid::{GridError, GridWorld, Occupant, PathFinder};

use crate::claims::{resolve_claims, StepIntent};
use crate::{SimError, SimObserver, SimResult, TickSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P>` owns the grid and every customer and drives the tick:
///
/// 1. **Spawn and timers**: attempt a spawn when the interval has elapsed,
///    then run patience and eating countdowns.  Expiry starts the customer
///    walking to a random entrance.
/// 2. **Intent phase** (optionally parallel with the `parallel` feature):
///    every walking customer without a valid reservation asks the
///    [`PathFinder`] for its next cell against the unchanged grid.
/// 3. **Claim phase**: requests are granted in `(priority, id)` order, one
///    per cell.  Winners write their id into the cell; losers wait.
/// 4. **Movement phase** (ascending id): customers walk toward their
///    reserved cell.  On arrival they vacate the old cell and apply the
///    arrival transition (sit down, or leave the cafe).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathFinder> {
    pub config:          SimConfig,
    pub customer_config: CustomerConfig,

    /// Simulation clock — tracks the current tick and elapsed seconds.
    pub clock: SimClock,

    /// Static layout plus live occupancy and the free-seat pool.
    pub grid: GridWorld,

    pub customers: CustomerStore,

    pub menu: Menu,

    pub path_finder: P,

    /// Grid-level draws: spawn cells, seats, exit entrances.
    pub rng: SimRng,

    /// Running score from deliveries and unsatisfied departures.
    pub score: i64,

    /// Seconds since the last spawn attempt.
    pub(crate) spawn_elapsed: f32,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<P: PathFinder> Sim<P> {
    // ── Running ───────────────────────────────────────────────────────────

    /// Run fixed `config.tick_secs` steps from the current tick to
    /// `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(self.config.tick_secs, observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` fixed steps from the current position (ignores
    /// `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(self.config.tick_secs, observer)?;
        }
        Ok(())
    }

    /// Advance one tick of `dt` seconds.
    ///
    /// A game loop with a variable frame time calls this directly instead of
    /// [`run`](Self::run).  A zero `dt` is a paused frame.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if `dt` is negative or not finite; nothing is
    /// advanced and no observer hook runs.
    pub fn step<O: SimObserver>(&mut self, dt: f32, observer: &mut O) -> SimResult<TickSummary> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimError::Config(format!("dt must be finite and non-negative, got {dt}")));
        }
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let mut summary = TickSummary {
            tick: now,
            elapsed_secs: self.clock.elapsed_secs + dt as f64,
            ..TickSummary::default()
        };

        // ── Phase 1: spawn, then timers ───────────────────────────────────
        if self.customer_config.auto_spawn {
            self.spawn_elapsed += dt;
            if self.spawn_elapsed >= self.customer_config.spawn_interval_secs {
                self.spawn_elapsed = 0.0;
                match self.try_spawn() {
                    Ok(id) => {
                        summary.spawned += 1;
                        if let Some(c) = self.customers.get(id) {
                            observer.on_spawn(now, c);
                        }
                    }
                    Err(e) if e.is_spawn_skip() => log::debug!("{now}: spawn skipped: {e}"),
                    Err(e) => return Err(e),
                }
            }
        }
        self.run_timers(now, dt, observer);

        // ── Phase 2: intents against the unchanged grid ───────────────────
        let intents = self.compute_intents();

        // ── Phase 3: claims ───────────────────────────────────────────────
        let claims = resolve_claims(intents);
        for intent in &claims.granted {
            self.grid.set_occupant(intent.to, Occupant::agent(intent.agent, intent.priority));
            if let Some(c) = self.customers.get_mut(intent.agent) {
                c.movement.next_step = Some(intent.to);
            }
        }
        for intent in &claims.denied {
            if let Some(c) = self.customers.get_mut(intent.agent) {
                c.movement.next_step = None;
            }
        }
        summary.blocked = claims.denied.len();

        // ── Phase 4: movement ─────────────────────────────────────────────
        self.move_customers(now, dt, observer, &mut summary);

        summary.customers  = self.customers.len();
        summary.free_seats = self.grid.counts().seats_free;
        summary.score      = self.score;
        observer.on_tick_end(now, &summary);

        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.customers, &self.grid);
        }

        self.clock.advance(dt);
        Ok(summary)
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Spawn one customer on a random free spawn cell with a random free
    /// seat.
    ///
    /// # Errors
    ///
    /// [`SimError::NoSpawnAvailable`] or [`SimError::NoSeatAvailable`] when
    /// the cafe is full; nothing changes and the caller may retry later.
    pub fn try_spawn(&mut self) -> SimResult<AgentId> {
        let cell = self
            .grid
            .free_spawn_cell(&mut self.rng)
            .ok_or(SimError::NoSpawnAvailable)?;
        self.spawn_at(cell)
    }

    /// Spawn one customer at `cell`, which need not be a spawn cell.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] for cells off the grid,
    /// [`SimError::SpawnBlocked`] for walls, seats, and occupied cells,
    /// [`SimError::NoSeatAvailable`] when every seat is reserved.
    pub fn spawn_at(&mut self, cell: Cell) -> SimResult<AgentId> {
        let kind = self.grid.cell_kind(cell).ok_or(GridError::OutOfBounds(cell))?;
        if !kind.is_spawnable() || !self.grid.is_vacant(cell) {
            return Err(SimError::SpawnBlocked(cell));
        }
        let seat = self.grid.take_seat(&mut self.rng).ok_or(SimError::NoSeatAvailable)?;

        let now = self.clock.current_tick;
        let id = self.customers.allocate_id();
        let customer = Customer::new(id, seat, cell, self.grid.grid_to_world(cell), now, self.config.seed);
        self.grid.set_occupant(cell, Occupant::agent(id, customer.priority));
        self.customers.insert(customer);

        log::debug!("{now}: {id} spawned at {cell}, seat {seat}");
        Ok(id)
    }

    // ── External events ───────────────────────────────────────────────────

    /// The player took `agent`'s order.
    ///
    /// Rejected events are logged and returned; the customer is unchanged.
    pub fn take_order<O: SimObserver>(&mut self, agent: AgentId, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        let customer = self.customers.get_mut(agent).ok_or(SimError::UnknownCustomer(agent))?;
        match customer.take_order(&self.customer_config) {
            Ok(change) => {
                report(&mut self.score, now, agent, &change, observer);
                Ok(())
            }
            Err(e) => {
                log::warn!("{now}: take order rejected: {e}");
                Err(e.into())
            }
        }
    }

    /// The player served `item` to `agent`.  Returns the score awarded.
    ///
    /// Wrong items and deliveries to customers that are not waiting are
    /// logged and returned; the customer is unchanged.
    pub fn deliver_food<O: SimObserver>(
        &mut self,
        agent:    AgentId,
        item:     ItemId,
        observer: &mut O,
    ) -> SimResult<i64> {
        let now = self.clock.current_tick;
        let customer = self.customers.get_mut(agent).ok_or(SimError::UnknownCustomer(agent))?;
        match customer.deliver(item, &self.customer_config) {
            Ok(change) => {
                report(&mut self.score, now, agent, &change, observer);
                Ok(change.score_delta)
            }
            Err(e) => {
                log::warn!("{now}: delivery rejected: {e}");
                Err(e.into())
            }
        }
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn run_timers<O: SimObserver>(&mut self, now: Tick, dt: f32, observer: &mut O) {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let grid = &self.grid;
        let rng  = &mut self.rng;

        let changes: Vec<(AgentId, StateChange)> = self
            .customers
            .iter_mut()
            .filter_map(|c| {
                let change = c.tick_timer(dt, || grid.random_entrance(rng))?;
                Some((c.id, change))
            })
            .collect();

        for (agent, change) in changes {
            report(&mut self.score, now, agent, &change, observer);
        }
    }

    /// Desired steps for every walking customer whose reservation is missing
    /// or was taken by a higher-priority customer.
    ///
    /// With the `parallel` Cargo feature the searches run on Rayon's thread
    /// pool.  The result is sorted later, so collection order is irrelevant.
    fn compute_intents(&self) -> Vec<StepIntent> {
        let grid        = &self.grid;
        let path_finder = &self.path_finder;

        let requests: Vec<(StepIntent, Cell)> = self
            .customers
            .iter()
            .filter(|c| c.is_moving())
            .filter(|c| {
                !c.movement
                    .next_step
                    .is_some_and(|n| grid.occupant(n).agent_id() == Some(c.id))
            })
            .filter_map(|c| {
                let goal = c.target?;
                let from = c.curr();
                Some((StepIntent { agent: c.id, priority: c.priority, from, to: from }, goal))
            })
            .collect();

        let plan = |&(intent, goal): &(StepIntent, Cell)| StepIntent {
            to: path_finder.next_step(grid, intent.from, goal, intent.priority),
            ..intent
        };

        #[cfg(not(feature = "parallel"))]
        {
            requests.iter().map(plan).filter(|i| i.to != i.from).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let search = || -> Vec<StepIntent> {
                requests.par_iter().map(plan).filter(|i| i.to != i.from).collect()
            };
            match &self.pool {
                Some(pool) => pool.install(search),
                None       => search(),
            }
        }
    }

    fn move_customers<O: SimObserver>(
        &mut self,
        now:      Tick,
        dt:       f32,
        observer: &mut O,
        summary:  &mut TickSummary,
    ) {
        let max_delta = self.customer_config.movement_speed * dt;
        let epsilon   = self.customer_config.arrive_epsilon;

        for id in self.customers.ids() {
            let Some(c) = self.customers.get_mut(id) else { continue };
            let Some(next) = c.movement.next_step else { continue };

            // A higher-priority customer claimed the cell after us.
            if self.grid.occupant(next).agent_id() != Some(id) {
                c.movement.next_step = None;
                continue;
            }
            if !c.movement.advance(self.grid.grid_to_world(next), max_delta, epsilon) {
                continue;
            }
            let left = c.movement.commit(next);
            let arrival = c.arrive(&self.menu, &self.customer_config);

            summary.moves += 1;
            self.vacate(left, id);

            match arrival {
                Arrival::Seated(change) => report(&mut self.score, now, id, &change, observer),
                Arrival::Departed => {
                    if let Some(gone) = self.depart(id) {
                        summary.departed += 1;
                        observer.on_departure(now, &gone);
                    }
                }
                Arrival::Stationary => {}
            }
        }
    }

    /// Remove a customer that reached the exit and release its cells and
    /// seat.
    fn depart(&mut self, id: AgentId) -> Option<Customer> {
        let gone = self.customers.remove(id)?;
        self.vacate(gone.curr(), id);
        if let Some(next) = gone.movement.next_step {
            self.vacate(next, id);
        }
        self.grid.release_seat(gone.seat);
        log::debug!("{}: {id} left through {}", self.clock.current_tick, gone.curr());
        Some(gone)
    }

    /// `leaver` no longer stands on or reserves `cell`.
    ///
    /// If the cell is still marked as `leaver`'s, it passes to the
    /// highest-priority customer still standing on or reserving it, or back
    /// to the static sentinel when there is none.
    pub(crate) fn vacate(&mut self, cell: Cell, leaver: AgentId) {
        if self.grid.occupant(cell).agent_id() != Some(leaver) {
            return;
        }
        let heir = self
            .customers
            .iter()
            .filter(|c| c.id != leaver)
            .filter(|c| c.curr() == cell || c.movement.next_step == Some(cell))
            .min_by_key(|c| (c.priority, c.id));
        match heir {
            Some(c) => {
                let occupant = Occupant::agent(c.id, c.priority);
                self.grid.set_occupant(cell, occupant);
            }
            None => self.grid.reset_occupant(cell),
        }
    }
}

/// Forward a state change to the observer and book its score.
fn report<O: SimObserver>(score: &mut i64, now: Tick, agent: AgentId, change: &StateChange, observer: &mut O) {
    observer.on_state_change(now, agent, change);
    if change.score_delta != 0 {
        *score += change.score_delta;
        observer.on_score(now, agent, change.score_delta, *score);
    }
}
