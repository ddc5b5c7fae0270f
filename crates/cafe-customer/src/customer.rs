//! A single customer and its state machine.
//!
//! Every transition method returns a [`StateChange`] so the simulation can
//! forward it to observers without diffing customer state.  Methods never
//! touch the grid; the caller owns occupancy and the seat pool.

use cafe_core::{AgentId, AgentRng, Cell, ItemId, Priority, Tick, WorldPos};

use crate::{CustomerConfig, CustomerError, CustomerResult, CustomerState, Menu, Movement};

// ── Supporting types ──────────────────────────────────────────────────────────

/// The item a customer ordered and what it is worth.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Order {
    pub item: ItemId,
    pub cost: u32,
}

impl Order {
    /// Score lost when the customer leaves without being served: half the
    /// cost rounded up, and never less than one.
    #[inline]
    pub fn penalty(cost: u32) -> i64 {
        -((cost as i64 + 1) / 2).max(1)
    }
}

/// One FSM transition and the score it is worth.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct StateChange {
    pub from:        CustomerState,
    pub to:          CustomerState,
    pub score_delta: i64,
}

/// What reaching the current target means.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Arrival {
    /// Sat down at the reserved seat and started ordering.
    Seated(StateChange),
    /// Reached the exit; the customer should be removed.
    Departed,
    /// Nothing to do.
    Stationary,
}

// ── Customer ──────────────────────────────────────────────────────────────────

/// One customer on the floor.
#[derive(Clone, Debug)]
pub struct Customer {
    pub id:          AgentId,
    pub priority:    Priority,
    pub state:       CustomerState,
    /// Seat reserved at spawn.  Stays reserved until the customer is removed.
    pub seat:        Cell,
    /// Where the customer is walking.  `None` while seated.
    pub target:      Option<Cell>,
    pub order:       Option<Order>,
    /// Seconds left on the patience or eating countdown.  `None` while
    /// walking.
    pub timer:       Option<f32>,
    pub movement:    Movement,
    pub spawn_tick:  Tick,
    pub rng:         AgentRng,
}

impl Customer {
    /// A new customer standing at `spawn`, heading for `seat`.
    pub fn new(id: AgentId, seat: Cell, spawn: Cell, position: WorldPos, spawn_tick: Tick, seed: u64) -> Self {
        Self {
            id,
            priority:   Priority::from(id),
            state:      CustomerState::Seating,
            seat,
            target:     Some(seat),
            order:      None,
            timer:      None,
            movement:   Movement::at(spawn, position),
            spawn_tick,
            rng:        AgentRng::new(seed, id),
        }
    }

    #[inline]
    pub fn curr(&self) -> Cell {
        self.movement.curr
    }

    /// `true` if the customer has somewhere to walk to.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.target.is_some_and(|t| t != self.movement.curr)
    }

    /// Cost of the current order, `0` if none.
    #[inline]
    pub fn order_cost(&self) -> u32 {
        self.order.map_or(0, |o| o.cost)
    }

    fn transition(&mut self, to: CustomerState, score_delta: i64) -> StateChange {
        let from = self.state;
        self.state = to;
        log::trace!("{}: {from} -> {to} ({score_delta:+})", self.id);
        StateChange { from, to, score_delta }
    }

    // ── Movement-driven transitions ───────────────────────────────────────

    /// Apply the effect of standing on `target`.
    ///
    /// Seating customers sit down, pick an order from `menu`, and start the
    /// ordering countdown.  Leaving customers are done.
    pub fn arrive(&mut self, menu: &Menu, cfg: &CustomerConfig) -> Arrival {
        if self.is_moving() || self.target.is_none() {
            return Arrival::Stationary;
        }
        match self.state {
            CustomerState::Seating => {
                self.target = None;
                self.order = menu
                    .choose(&mut self.rng)
                    .map(|item| Order { item: item.id, cost: item.cost });
                self.timer = Some(cfg.ordering_patience_secs);
                Arrival::Seated(self.transition(CustomerState::Ordering, 0))
            }
            CustomerState::Leaving => Arrival::Departed,
            _ => Arrival::Stationary,
        }
    }

    /// Start walking to `exit`.  The seat stays reserved until departure.
    fn leave(&mut self, exit: Cell, score_delta: i64) -> StateChange {
        self.target = Some(exit);
        self.timer = None;
        self.transition(CustomerState::Leaving, score_delta)
    }

    // ── Timers ────────────────────────────────────────────────────────────

    /// Run the countdown for `dt` seconds.
    ///
    /// On expiry the customer starts leaving through the entrance picked by
    /// `exit`: impatient customers (ordering or waiting) cost the order
    /// penalty, customers who finished eating cost nothing.
    pub fn tick_timer(&mut self, dt: f32, exit: impl FnOnce() -> Cell) -> Option<StateChange> {
        let remaining = self.timer.as_mut()?;
        *remaining -= dt;
        if *remaining > 0.0 {
            return None;
        }
        match self.state {
            s if s.is_impatient() => {
                let penalty = Order::penalty(self.order_cost());
                Some(self.leave(exit(), penalty))
            }
            CustomerState::Eating => Some(self.leave(exit(), 0)),
            _ => {
                self.timer = None;
                None
            }
        }
    }

    // ── External events ───────────────────────────────────────────────────

    /// Someone took this customer's order.
    ///
    /// # Errors
    ///
    /// [`CustomerError::InvalidEvent`] unless the customer is ordering.
    pub fn take_order(&mut self, cfg: &CustomerConfig) -> CustomerResult<StateChange> {
        if self.state != CustomerState::Ordering {
            return Err(CustomerError::InvalidEvent { id: self.id, event: "take order", state: self.state });
        }
        self.timer = Some(cfg.serving_patience_secs);
        Ok(self.transition(CustomerState::Waiting, 0))
    }

    /// Serve `item`.  The correct item starts the meal and scores its cost.
    ///
    /// # Errors
    ///
    /// [`CustomerError::InvalidEvent`] unless the customer is waiting;
    /// [`CustomerError::NoOrder`] if it never chose an item;
    /// [`CustomerError::WrongItem`] if `item` is not what it ordered.
    pub fn deliver(&mut self, item: ItemId, cfg: &CustomerConfig) -> CustomerResult<StateChange> {
        if self.state != CustomerState::Waiting {
            return Err(CustomerError::InvalidEvent { id: self.id, event: "receive food", state: self.state });
        }
        let order = self.order.ok_or(CustomerError::NoOrder(self.id))?;
        if order.item != item {
            return Err(CustomerError::WrongItem { id: self.id, expected: order.item, got: item });
        }
        self.timer = Some(cfg.eating_secs);
        Ok(self.transition(CustomerState::Eating, order.cost as i64))
    }
}
