//! Per-customer movement state.

use cafe_core::{Cell, WorldPos};

/// Where a customer is on the floor.
///
/// `curr` is the cell the customer occupies in the grid; `position` is its
/// continuous world position, which trails behind while it walks toward the
/// centre of `next_step`.  The grid transition is committed only once
/// `position` reaches that centre.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Movement {
    pub curr:      Cell,
    /// Cell this customer has reserved and is walking into.  `None` when
    /// standing still or after losing a claim.
    pub next_step: Option<Cell>,
    pub position:  WorldPos,
}

impl Movement {
    /// Standing at `cell`, whose world centre is `position`.
    pub fn at(cell: Cell, position: WorldPos) -> Self {
        Self { curr: cell, next_step: None, position }
    }

    /// Step `position` toward `centre` by at most `max_delta`.
    ///
    /// Returns `true` once within `epsilon` of `centre`.
    pub fn advance(&mut self, centre: WorldPos, max_delta: f32, epsilon: f32) -> bool {
        self.position = self.position.move_towards(centre, max_delta);
        self.position.distance(centre) <= epsilon
    }

    /// Move the grid cell to `cell` and clear the reservation.  Returns the
    /// cell that was left.
    pub fn commit(&mut self, cell: Cell) -> Cell {
        let left = self.curr;
        self.curr = cell;
        self.next_step = None;
        left
    }
}
