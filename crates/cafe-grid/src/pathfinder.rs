//! Path-finding trait and default priority-aware A* implementation.
//!
//! # Pluggability
//!
//! `cafe-sim` asks for movement via the [`PathFinder`] trait, so applications
//! can swap in a different search (flow fields, cached routes) without
//! touching the tick loop.
//!
//! # Replanning model
//!
//! Searches are run against the *current* occupancy every time a customer
//! needs a step.  Nothing is cached between ticks; grids are tens of cells
//! on a side and the customer count is small, so a full search per request
//! is cheap and lets customers react to each other immediately.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use cafe_core::{Cell, Priority};

use crate::{CellKind, GridError, GridResult, GridWorld};

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable single-step path finder.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so the intent phase can query them
/// from Rayon workers against a shared `&GridWorld`.
pub trait PathFinder: Send + Sync {
    /// The cell `priority`'s customer should step into next on its way from
    /// `start` to `goal`.
    ///
    /// Returns `goal` when `start == goal`, and `start` when the goal is
    /// currently unreachable.  Must not mutate occupancy.
    fn next_step(&self, grid: &GridWorld, start: Cell, goal: Cell, priority: Priority) -> Cell;
}

// ── AStarPathFinder ───────────────────────────────────────────────────────────

/// 8-connected best-first search keyed on steps taken plus straight-line
/// distance to the goal.
///
/// Every move (orthogonal or diagonal) costs one step.  A cell's parent is
/// fixed the first time it is discovered.  Frontier ties are broken by
/// ascending `x`, then ascending `y`, so results are fully deterministic.
///
/// A neighbour is not expanded when it:
///
/// 1. lies outside the grid;
/// 2. has already been discovered in this search;
/// 3. is a wall, or is held by a customer that strictly outranks the
///    searcher;
/// 4. shares the goal's static kind (seat or entrance) without being the
///    goal, or is any seat other than the goal;
/// 5. is a diagonal move whose two orthogonal corner cells are both blocked
///    in the sense of rule 3.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarPathFinder;

impl AStarPathFinder {
    /// Full path from `start` to `goal`, both included.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if either endpoint is off the grid;
    /// [`GridError::NoPath`] if the goal is unreachable under the current
    /// occupancy.
    pub fn find_path(
        &self,
        grid:     &GridWorld,
        start:    Cell,
        goal:     Cell,
        priority: Priority,
    ) -> GridResult<Vec<Cell>> {
        for cell in [start, goal] {
            if !grid.contains(cell) {
                return Err(GridError::OutOfBounds(cell));
            }
        }
        if start == goal {
            return Ok(vec![goal]);
        }
        search(grid, start, goal, priority).ok_or(GridError::NoPath { from: start, to: goal })
    }
}

impl PathFinder for AStarPathFinder {
    fn next_step(&self, grid: &GridWorld, start: Cell, goal: Cell, priority: Priority) -> Cell {
        assert!(grid.contains(start), "path start {start} is outside the grid");
        assert!(grid.contains(goal), "path goal {goal} is outside the grid");

        match self.find_path(grid, start, goal, priority) {
            Ok(path) => path.get(1).copied().unwrap_or(goal),
            Err(e) => {
                log::debug!("{priority} waits at {start}: {e}");
                start
            }
        }
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// Frontier entry.  Ordered by `(f, x, y)` ascending.
#[derive(Copy, Clone, Debug)]
struct Frontier {
    f:    f32,
    cell: Cell,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.total_cmp(&other.f).then_with(|| self.cell.cmp(&other.cell))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

/// Whether `cell` may be entered at all on the way to `goal`.
#[inline]
fn passable(grid: &GridWorld, cell: Cell, goal: Cell, goal_kind: CellKind, priority: Priority) -> bool {
    if grid.occupant(cell).blocks(priority) {
        return false;
    }
    if cell == goal {
        return true;
    }
    let kind = grid.cell_kind(cell).unwrap_or_default();
    let shares_goal_kind = matches!(goal_kind, CellKind::Seat | CellKind::Entrance) && kind == goal_kind;
    !(shares_goal_kind || kind == CellKind::Seat)
}

fn search(grid: &GridWorld, start: Cell, goal: Cell, priority: Priority) -> Option<Vec<Cell>> {
    let n = grid.cell_count();
    // parent[i] = the cell `i` was discovered from; `None` = undiscovered.
    let mut parent: Vec<Option<Cell>> = vec![None; n];
    let mut steps:  Vec<u32>          = vec![0; n];

    parent[grid.index(start)] = Some(start);
    let goal_kind = grid.cell_kind(goal).unwrap_or_default();

    // Reverse turns BinaryHeap (max) into a min-heap.
    let mut heap: BinaryHeap<Reverse<Frontier>> = BinaryHeap::new();
    heap.push(Reverse(Frontier { f: 0.0, cell: start }));

    while let Some(Reverse(Frontier { cell: current, .. })) = heap.pop() {
        if current == goal {
            break;
        }
        let next_steps = steps[grid.index(current)] + 1;

        for dx in -1..=1 {
            for dy in -1..=1 {
                let child = current.offset(dx, dy);
                if !grid.contains(child) {
                    continue;
                }
                let ci = grid.index(child);
                if parent[ci].is_some() {
                    continue;
                }
                if !passable(grid, child, goal, goal_kind, priority) {
                    continue;
                }
                if dx != 0 && dy != 0 {
                    let corner_a = grid.occupant(Cell::new(current.x, child.y));
                    let corner_b = grid.occupant(Cell::new(child.x, current.y));
                    if corner_a.blocks(priority) && corner_b.blocks(priority) {
                        continue;
                    }
                }

                parent[ci] = Some(current);
                steps[ci]  = next_steps;
                heap.push(Reverse(Frontier {
                    f:    next_steps as f32 + child.euclidean(goal),
                    cell: child,
                }));
            }
        }
    }

    parent[grid.index(goal)]?;
    Some(reconstruct(grid, &parent, start, goal))
}

fn reconstruct(grid: &GridWorld, parent: &[Option<Cell>], start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        match parent[grid.index(cur)] {
            Some(prev) => cur = prev,
            None => break,
        }
        path.push(cur);
    }
    path.reverse();
    path
}
