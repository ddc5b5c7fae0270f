//! Plain data row types written by output backends.

use cafe_core::Tick;
use cafe_customer::{Customer, CustomerState};
use cafe_sim::TickSummary;

/// One customer's position and lifecycle state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerSnapshotRow {
    pub tick:        u64,
    pub customer_id: u32,
    pub state:       CustomerState,
    /// Committed grid cell.
    pub cell_x:      i32,
    pub cell_y:      i32,
    /// Continuous world position; lies between `cell` and the reserved next
    /// cell while walking.
    pub pos_x:       f32,
    pub pos_y:       f32,
    pub seat_x:      i32,
    pub seat_y:      i32,
    pub moving:      bool,
}

impl CustomerSnapshotRow {
    pub fn new(tick: Tick, c: &Customer) -> Self {
        let cell = c.curr();
        Self {
            tick:        tick.0,
            customer_id: c.id.0,
            state:       c.state,
            cell_x:      cell.x,
            cell_y:      cell.y,
            pos_x:       c.movement.position.x,
            pos_y:       c.movement.position.y,
            seat_x:      c.seat.x,
            seat_y:      c.seat.y,
            moving:      c.is_moving(),
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub elapsed_secs: f64,
    pub customers:    u64,
    pub spawned:      u64,
    pub departed:     u64,
    pub moves:        u64,
    pub blocked:      u64,
    pub free_seats:   u64,
    pub score:        i64,
}

impl TickSummaryRow {
    pub fn new(summary: &TickSummary) -> Self {
        Self {
            tick:         summary.tick.0,
            elapsed_secs: summary.elapsed_secs,
            customers:  summary.customers as u64,
            spawned:    summary.spawned as u64,
            departed:   summary.departed as u64,
            moves:      summary.moves as u64,
            blocked:    summary.blocked as u64,
            free_seats: summary.free_seats as u64,
            score:      summary.score,
        }
    }
}
