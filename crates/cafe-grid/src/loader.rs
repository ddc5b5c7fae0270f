//! CSV layout loader.
//!
//! # CSV format
//!
//! Headerless, one plan row per line, integer cell codes (see
//! [`CellKind::from_code`][crate::CellKind::from_code]).  Whitespace around
//! fields is ignored.
//!
//! ```csv
//! 1, 1, 1, 1
//! 1,-1, 0, 1
//! 1, 0, 0, 1
//! 1,-2, 1, 1
//! ```

use std::io::Read;
use std::path::Path;

use crate::{GridError, GridResult, Layout};

/// Load a padded [`Layout`] from a CSV file.
pub fn load_layout_csv(path: &Path, padding: usize) -> GridResult<Layout> {
    let file = std::fs::File::open(path).map_err(GridError::Io)?;
    load_layout_reader(file, padding)
}

/// Like [`load_layout_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for layouts embedded in
/// the binary.
pub fn load_layout_reader<R: Read>(reader: R, padding: usize) -> GridResult<Layout> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut rows: Vec<Vec<i32>> = Vec::new();
    for (r, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| GridError::Parse(e.to_string()))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(c, field)| {
                field.parse::<i32>().map_err(|_| {
                    GridError::Parse(format!("row {r}, column {c}: {field:?} is not an integer"))
                })
            })
            .collect::<GridResult<Vec<i32>>>()?;
        rows.push(row);
    }

    Layout::from_codes(&rows, padding)
}
