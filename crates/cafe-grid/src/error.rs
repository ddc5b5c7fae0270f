//! Grid-subsystem error type.

use thiserror::Error;

use cafe_core::Cell;

use crate::CellKind;

/// Errors produced by `cafe-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("no path from {from} to {to}")]
    NoPath { from: Cell, to: Cell },

    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("cell {cell} is a {kind} and cannot be a spawn cell")]
    NotSpawnable { cell: Cell, kind: CellKind },

    #[error("layout has no entrance cells")]
    NoEntrances,

    #[error("layout row {row} has {got} columns, expected {expected}")]
    RaggedLayout { row: usize, expected: usize, got: usize },

    #[error("unknown cell code {code} at row {row}, column {col}")]
    UnknownCellCode { code: i32, row: usize, col: usize },

    #[error("layout parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
