//! Discrete grid coordinates and continuous world positions.
//!
//! `Cell` orders by `x`, then `y`.  The path search relies on that ordering
//! for deterministic tie-breaks, so the field order must not change.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// An integer grid coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell `(dx, dy)` away from `self`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }

    /// King-move distance: the number of 8-connected steps between two cells
    /// on an obstacle-free grid.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> u32 {
        (self.x - other.x).unsigned_abs().max((self.y - other.y).unsigned_abs())
    }

    /// Straight-line distance in cell units.
    #[inline]
    pub fn euclidean(self, other: Cell) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` if `other` is one of the eight cells surrounding `self`.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self != other && self.chebyshev(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── WorldPos ──────────────────────────────────────────────────────────────────

/// A continuous 2-D position in world units (what a renderer would draw).
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move from `self` toward `target` by at most `max_delta`.
    ///
    /// Lands exactly on `target` when it is within reach, so repeated calls
    /// never overshoot or oscillate.
    pub fn move_towards(self, target: WorldPos, max_delta: f32) -> WorldPos {
        let dist = self.distance(target);
        if dist <= max_delta || dist == 0.0 {
            return target;
        }
        let t = max_delta / dist;
        WorldPos::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
