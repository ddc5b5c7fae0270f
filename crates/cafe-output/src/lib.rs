//! `cafe-output` — simulation output writers for the cafe simulation.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created                                   |
//! |-----------|-------------|-------------------------------------------------|
//! | *(none)*  | CSV         | `customer_snapshots.csv`, `tick_summaries.csv`  |
//! | `sqlite`  | SQLite      | `output.db`                                     |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `cafe_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cafe_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CustomerSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
