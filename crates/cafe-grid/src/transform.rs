//! Affine mapping between grid cells and world positions.

use cafe_core::{Cell, WorldPos};

/// Maps cells to the world-space centre of their square and back.
///
/// `origin` is the world position of the bottom-left corner of `Cell(0, 0)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridTransform {
    /// Side length of one cell in world units.
    pub cell_size: f32,
    pub origin:    WorldPos,
}

impl GridTransform {
    pub fn new(cell_size: f32, origin: WorldPos) -> Self {
        Self { cell_size, origin }
    }

    /// World-space centre of `cell`.
    #[inline]
    pub fn to_world(&self, cell: Cell) -> WorldPos {
        let half = self.cell_size * 0.5;
        WorldPos::new(
            cell.x as f32 * self.cell_size + self.origin.x + half,
            cell.y as f32 * self.cell_size + self.origin.y + half,
        )
    }

    /// The cell whose square contains `pos`.
    ///
    /// Uses `floor`, so positions left of or below the origin map to negative
    /// cells instead of being truncated toward zero.
    #[inline]
    pub fn to_cell(&self, pos: WorldPos) -> Cell {
        Cell::new(
            ((pos.x - self.origin.x) / self.cell_size).floor() as i32,
            ((pos.y - self.origin.y) / self.cell_size).floor() as i32,
        )
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self { cell_size: 1.0, origin: WorldPos::default() }
    }
}
