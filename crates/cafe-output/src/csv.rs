//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `customer_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{CustomerSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

pub(crate) const SNAPSHOT_HEADER: [&str; 10] = [
    "tick", "customer_id", "state", "cell_x", "cell_y",
    "pos_x", "pos_y", "seat_x", "seat_y", "moving",
];

pub(crate) const SUMMARY_HEADER: [&str; 9] = [
    "tick", "elapsed_secs", "customers", "spawned", "departed",
    "moves", "blocked", "free_seats", "score",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    ///
    /// `dir` must exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("customer_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[CustomerSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.customer_id.to_string(),
                row.state.as_str().to_owned(),
                row.cell_x.to_string(),
                row.cell_y.to_string(),
                format!("{:.3}", row.pos_x),
                format!("{:.3}", row.pos_y),
                row.seat_x.to_string(),
                row.seat_y.to_string(),
                (row.moving as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_secs.to_string(),
            row.customers.to_string(),
            row.spawned.to_string(),
            row.departed.to_string(),
            row.moves.to_string(),
            row.blocked.to_string(),
            row.free_seats.to_string(),
            row.score.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
