//! Static floor layout and builder.
//!
//! # Cell encoding
//!
//! Layout files use the integer codes the cafe floor plans were authored in:
//!
//! | Code | Kind       |
//! |------|------------|
//! | `0`  | `Empty`    |
//! | `1`  | `Wall`     |
//! | `-1` | `Seat`     |
//! | `-2` | `Entrance` |
//!
//! # Padding
//!
//! [`Layout::from_codes`] surrounds the authored plan with a band of `Empty`
//! cells `padding` wide.  Row `r`, column `c` of the plan lands at
//! `Cell(r + padding, c + padding)`.  The four corner blocks of the band are
//! the spawn cells: customers appear there and walk in through an entrance.

use cafe_core::Cell;

use crate::{GridError, GridResult};

// ── CellKind ──────────────────────────────────────────────────────────────────

/// Static classification of one grid cell, fixed at load time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Seat,
    Entrance,
}

impl CellKind {
    /// Decode a layout-file integer.  Returns `None` for unknown codes.
    pub fn from_code(code: i32) -> Option<CellKind> {
        match code {
            0  => Some(CellKind::Empty),
            1  => Some(CellKind::Wall),
            -1 => Some(CellKind::Seat),
            -2 => Some(CellKind::Entrance),
            _  => None,
        }
    }

    /// `true` for the kinds a customer may appear on: open floor and
    /// entrances.
    pub fn is_spawnable(self) -> bool {
        matches!(self, CellKind::Empty | CellKind::Entrance)
    }

    /// Human-readable label, useful for debug dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            CellKind::Empty    => "empty",
            CellKind::Wall     => "wall",
            CellKind::Seat     => "seat",
            CellKind::Entrance => "entrance",
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Immutable static layout: cell kinds plus the derived seat, entrance, and
/// spawn lists.
///
/// Do not construct directly; use [`LayoutBuilder`] or
/// [`Layout::from_codes`].
#[derive(Clone, Debug)]
pub struct Layout {
    width:       usize,
    height:      usize,
    kinds:       Vec<CellKind>,
    seats:       Vec<Cell>,
    entrances:   Vec<Cell>,
    spawn_cells: Vec<Cell>,
}

impl Layout {
    /// Build a padded layout from rows of integer codes.
    ///
    /// Every row must have the same length.
    pub fn from_codes(rows: &[Vec<i32>], padding: usize) -> GridResult<Layout> {
        let plan_rows = rows.len();
        let plan_cols = rows.first().map_or(0, Vec::len);

        let width  = plan_rows + 2 * padding;
        let height = plan_cols + 2 * padding;
        let mut b = LayoutBuilder::new(width, height);

        for (r, row) in rows.iter().enumerate() {
            if row.len() != plan_cols {
                return Err(GridError::RaggedLayout { row: r, expected: plan_cols, got: row.len() });
            }
            for (c, &code) in row.iter().enumerate() {
                let kind = CellKind::from_code(code)
                    .ok_or(GridError::UnknownCellCode { code, row: r, col: c })?;
                b.set(Cell::new((r + padding) as i32, (c + padding) as i32), kind)?;
            }
        }

        for x in 0..width {
            for y in 0..height {
                let in_band_x = x < padding || x >= width - padding;
                let in_band_y = y < padding || y >= height - padding;
                if in_band_x && in_band_y {
                    b.spawn(Cell::new(x as i32, y as i32))?;
                }
            }
        }

        Ok(b.build())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.kinds.len()
    }

    /// `true` if `cell` lies inside the grid extents.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Dense index of `cell`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    /// Static kind of `cell`, or `None` outside the grid.
    #[inline]
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        self.index(cell).map(|i| self.kinds[i])
    }

    /// All seat cells, ascending.
    pub fn seats(&self) -> &[Cell] {
        &self.seats
    }

    /// All entrance cells, ascending.
    pub fn entrances(&self) -> &[Cell] {
        &self.entrances
    }

    /// Cells where new customers may appear, ascending.
    pub fn spawn_cells(&self) -> &[Cell] {
        &self.spawn_cells
    }
}

// ── LayoutBuilder ─────────────────────────────────────────────────────────────

/// Construct a [`Layout`] cell by cell, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use cafe_core::Cell;
/// use cafe_grid::{CellKind, LayoutBuilder};
///
/// let mut b = LayoutBuilder::new(5, 5);
/// b.set(Cell::new(4, 4), CellKind::Seat).unwrap();
/// b.set(Cell::new(0, 0), CellKind::Entrance).unwrap();
/// let layout = b.build();
/// assert_eq!(layout.seats(), &[Cell::new(4, 4)]);
/// ```
pub struct LayoutBuilder {
    width:  usize,
    height: usize,
    kinds:  Vec<CellKind>,
    spawns: Vec<Cell>,
}

impl LayoutBuilder {
    /// An all-`Empty` grid of the given extents.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            kinds:  vec![CellKind::Empty; width * height],
            spawns: Vec::new(),
        }
    }

    fn index(&self, cell: Cell) -> GridResult<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x as usize >= self.width || cell.y as usize >= self.height {
            return Err(GridError::OutOfBounds(cell));
        }
        Ok(cell.y as usize * self.width + cell.x as usize)
    }

    /// Set the static kind of one cell.
    pub fn set(&mut self, cell: Cell, kind: CellKind) -> GridResult<&mut Self> {
        let i = self.index(cell)?;
        self.kinds[i] = kind;
        Ok(self)
    }

    /// Mark `cell` as a spawn cell.  Duplicates are ignored.
    ///
    /// The cell must currently be `Empty` or an `Entrance`.  A spawn cell
    /// later overwritten with a wall or seat is dropped by
    /// [`build`](Self::build).
    pub fn spawn(&mut self, cell: Cell) -> GridResult<&mut Self> {
        let kind = self.kinds[self.index(cell)?];
        if !kind.is_spawnable() {
            return Err(GridError::NotSpawnable { cell, kind });
        }
        if !self.spawns.contains(&cell) {
            self.spawns.push(cell);
        }
        Ok(self)
    }

    /// Consume the builder and produce a [`Layout`].
    pub fn build(self) -> Layout {
        let mut seats     = Vec::new();
        let mut entrances = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                let cell = Cell::new(x as i32, y as i32);
                match self.kinds[y * self.width + x] {
                    CellKind::Seat     => seats.push(cell),
                    CellKind::Entrance => entrances.push(cell),
                    _ => {}
                }
            }
        }
        let width = self.width;
        let kinds = &self.kinds;
        let mut spawn_cells: Vec<Cell> = self
            .spawns
            .into_iter()
            .filter(|c| {
                let kind = kinds[c.y as usize * width + c.x as usize];
                if !kind.is_spawnable() {
                    log::warn!("spawn cell {c} was overwritten with a {kind}; dropped");
                }
                kind.is_spawnable()
            })
            .collect();
        spawn_cells.sort_unstable();

        Layout {
            width: self.width,
            height: self.height,
            kinds: self.kinds,
            seats,
            entrances,
            spawn_cells,
        }
    }
}
