//! The shared occupancy grid.
//!
//! # Occupancy model
//!
//! Every cell holds exactly one [`Occupant`]: either the static sentinel
//! mirrored from the layout, or the customer currently standing on (or
//! reserving) it.  Customers write their own id when they claim a cell and
//! restore the sentinel with [`GridWorld::reset_occupant`] when they leave.
//!
//! # Bounds
//!
//! Layout extents are fixed at load time, so an out-of-range occupancy access
//! is a caller bug.  `occupant`, `set_occupant`, and `reset_occupant` panic
//! on it; [`GridWorld::cell_kind`] is the non-panicking query.

use std::collections::BTreeSet;

use cafe_core::{AgentId, Cell, Priority, SimRng, WorldPos};

use crate::{CellKind, GridError, GridResult, GridTransform, Layout};

// ── Occupant ──────────────────────────────────────────────────────────────────

/// What currently fills a cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Occupant {
    /// No customer; the static layout kind shows through.
    Static(CellKind),
    /// A customer stands on or has reserved this cell.
    Agent { id: AgentId, priority: Priority },
}

impl Occupant {
    #[inline]
    pub fn agent(id: AgentId, priority: Priority) -> Self {
        Occupant::Agent { id, priority }
    }

    /// The occupying customer, if any.
    #[inline]
    pub fn agent_id(self) -> Option<AgentId> {
        match self {
            Occupant::Agent { id, .. } => Some(id),
            Occupant::Static(_) => None,
        }
    }

    #[inline]
    pub fn is_agent(self) -> bool {
        matches!(self, Occupant::Agent { .. })
    }

    /// `true` if a searcher with `priority` may not enter this cell: walls,
    /// and customers that strictly outrank the searcher.
    #[inline]
    pub fn blocks(self, priority: Priority) -> bool {
        match self {
            Occupant::Static(kind) => kind == CellKind::Wall,
            Occupant::Agent { priority: p, .. } => p.outranks(priority),
        }
    }
}

// ── OccupancyCounts ───────────────────────────────────────────────────────────

/// Aggregate occupancy figures for UI and debug overlays.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct OccupancyCounts {
    pub seats_total:        usize,
    pub seats_free:         usize,
    pub entrances_total:    usize,
    pub entrances_occupied: usize,
    /// Cells currently held by a customer (standing or reserved).
    pub agent_cells:        usize,
}

// ── GridWorld ─────────────────────────────────────────────────────────────────

/// Static layout plus live occupancy, the free-seat pool, and the
/// cell ↔ world transform.
///
/// Constructed once by the simulation root and passed by reference to the
/// path finder and customers; there is no global grid.
pub struct GridWorld {
    layout:     Layout,
    occupancy:  Vec<Occupant>,
    /// Seats not reserved by any customer.  Ordered so that a seeded draw is
    /// reproducible.
    free_seats: BTreeSet<Cell>,
    transform:  GridTransform,
}

impl GridWorld {
    /// Build the live grid from a static layout.
    ///
    /// # Errors
    ///
    /// [`GridError::NoEntrances`] if the layout has no entrance cell;
    /// customers could never leave.
    pub fn new(layout: Layout, transform: GridTransform) -> GridResult<Self> {
        if layout.entrances().is_empty() {
            return Err(GridError::NoEntrances);
        }
        let occupancy = (0..layout.cell_count())
            .map(|i| {
                let cell = Cell::new((i % layout.width()) as i32, (i / layout.width()) as i32);
                Occupant::Static(layout.kind(cell).unwrap_or_default())
            })
            .collect();
        let free_seats = layout.seats().iter().copied().collect();

        Ok(Self { layout, occupancy, free_seats, transform })
    }

    // ── Extents ───────────────────────────────────────────────────────────

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn height(&self) -> usize {
        self.layout.height()
    }

    pub fn cell_count(&self) -> usize {
        self.layout.cell_count()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.layout.contains(cell)
    }

    /// Dense index of an in-bounds cell.
    ///
    /// # Panics
    /// Panics if `cell` is outside the grid.
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        match self.layout.index(cell) {
            Some(i) => i,
            None => panic!(
                "cell {cell} is outside the {}x{} grid",
                self.layout.width(),
                self.layout.height()
            ),
        }
    }

    // ── Static and dynamic queries ────────────────────────────────────────

    /// Static layout classification, or `None` outside the grid.
    #[inline]
    pub fn cell_kind(&self, cell: Cell) -> Option<CellKind> {
        self.layout.kind(cell)
    }

    /// Current occupant of `cell` (the static sentinel if no customer).
    ///
    /// # Panics
    /// Panics if `cell` is outside the grid.
    #[inline]
    pub fn occupant(&self, cell: Cell) -> Occupant {
        self.occupancy[self.index(cell)]
    }

    /// `true` if no customer holds `cell`.
    #[inline]
    pub fn is_vacant(&self, cell: Cell) -> bool {
        !self.occupant(cell).is_agent()
    }

    /// Unconditionally write `occupant` into `cell`.
    ///
    /// # Panics
    /// Panics if `cell` is outside the grid.
    pub fn set_occupant(&mut self, cell: Cell, occupant: Occupant) {
        let i = self.index(cell);
        self.occupancy[i] = occupant;
    }

    /// Restore the static sentinel at `cell`.
    ///
    /// # Panics
    /// Panics if `cell` is outside the grid.
    pub fn reset_occupant(&mut self, cell: Cell) {
        let i = self.index(cell);
        let kind = self.layout.kind(cell).unwrap_or_default();
        self.occupancy[i] = Occupant::Static(kind);
    }

    // ── Seats, entrances, spawn cells ─────────────────────────────────────

    /// Reserve a uniformly random free seat.
    ///
    /// Returns `None` when every seat is reserved; the caller should hold
    /// the spawn rather than treat this as an error.
    pub fn take_seat(&mut self, rng: &mut SimRng) -> Option<Cell> {
        if self.free_seats.is_empty() {
            return None;
        }
        let nth = rng.gen_range(0..self.free_seats.len());
        let seat = self.free_seats.iter().nth(nth).copied()?;
        self.free_seats.remove(&seat);
        Some(seat)
    }

    /// Return `seat` to the free pool.
    ///
    /// Idempotent: releasing an already-free seat is a no-op.  Returns `true`
    /// if the seat was newly freed.  Non-seat cells are ignored.
    pub fn release_seat(&mut self, seat: Cell) -> bool {
        if self.layout.kind(seat) != Some(CellKind::Seat) {
            log::warn!("release_seat: {seat} is not a seat; ignored");
            return false;
        }
        self.free_seats.insert(seat)
    }

    /// Free seats, ascending.
    pub fn free_seats(&self) -> impl Iterator<Item = Cell> + '_ {
        self.free_seats.iter().copied()
    }

    /// `true` if `seat` is in the free pool.
    pub fn is_seat_free(&self, seat: Cell) -> bool {
        self.free_seats.contains(&seat)
    }

    /// A uniformly random entrance.  Never fails: construction guarantees at
    /// least one entrance.
    pub fn random_entrance(&self, rng: &mut SimRng) -> Cell {
        let entrances = self.layout.entrances();
        entrances[rng.gen_range(0..entrances.len())]
    }

    /// A spawnable spawn cell not currently held by a customer, chosen
    /// uniformly among the vacant ones.  `None` if all are taken (or the
    /// layout has none).
    pub fn free_spawn_cell(&self, rng: &mut SimRng) -> Option<Cell> {
        let mut candidates = self.layout.spawn_cells().to_vec();
        rng.shuffle(&mut candidates);
        candidates.into_iter().find(|&c| {
            self.layout.kind(c).is_some_and(CellKind::is_spawnable) && self.is_vacant(c)
        })
    }

    /// Seat/entrance occupancy figures.
    pub fn counts(&self) -> OccupancyCounts {
        let entrances_occupied = self
            .layout
            .entrances()
            .iter()
            .filter(|&&c| !self.is_vacant(c))
            .count();
        OccupancyCounts {
            seats_total:     self.layout.seats().len(),
            seats_free:      self.free_seats.len(),
            entrances_total: self.layout.entrances().len(),
            entrances_occupied,
            agent_cells:     self.occupancy.iter().filter(|o| o.is_agent()).count(),
        }
    }

    // ── Coordinate transforms ─────────────────────────────────────────────

    pub fn transform(&self) -> &GridTransform {
        &self.transform
    }

    /// World-space centre of `cell`.
    #[inline]
    pub fn grid_to_world(&self, cell: Cell) -> WorldPos {
        self.transform.to_world(cell)
    }

    /// The cell containing `pos`.  May lie outside the grid.
    #[inline]
    pub fn world_to_grid(&self, pos: WorldPos) -> Cell {
        self.transform.to_cell(pos)
    }
}
