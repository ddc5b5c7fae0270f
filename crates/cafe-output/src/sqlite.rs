//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `customer_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{CustomerSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS customer_snapshots (
                 tick        INTEGER NOT NULL,
                 customer_id INTEGER NOT NULL,
                 state       TEXT    NOT NULL,
                 cell_x      INTEGER NOT NULL,
                 cell_y      INTEGER NOT NULL,
                 pos_x       REAL    NOT NULL,
                 pos_y       REAL    NOT NULL,
                 seat_x      INTEGER NOT NULL,
                 seat_y      INTEGER NOT NULL,
                 moving      INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick         INTEGER PRIMARY KEY,
                 elapsed_secs REAL    NOT NULL,
                 customers    INTEGER NOT NULL,
                 spawned      INTEGER NOT NULL,
                 departed     INTEGER NOT NULL,
                 moves        INTEGER NOT NULL,
                 blocked      INTEGER NOT NULL,
                 free_seats   INTEGER NOT NULL,
                 score        INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[CustomerSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO customer_snapshots \
                 (tick, customer_id, state, cell_x, cell_y, pos_x, pos_y, seat_x, seat_y, moving) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.customer_id,
                    row.state.as_str(),
                    row.cell_x,
                    row.cell_y,
                    row.pos_x as f64,
                    row.pos_y as f64,
                    row.seat_x,
                    row.seat_y,
                    row.moving as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, elapsed_secs, customers, spawned, departed, moves, blocked, free_seats, score) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.tick,
                row.elapsed_secs,
                row.customers,
                row.spawned,
                row.departed,
                row.moves,
                row.blocked,
                row.free_seats,
                row.score,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
