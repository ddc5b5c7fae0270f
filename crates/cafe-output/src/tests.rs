//! Integration tests for cafe-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use cafe_customer::CustomerState;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADER, SUMMARY_HEADER};
    use crate::row::{CustomerSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(customer_id: u32, tick: u64) -> CustomerSnapshotRow {
        CustomerSnapshotRow {
            tick,
            customer_id,
            state:  CustomerState::Seating,
            cell_x: customer_id as i32,
            cell_y: 0,
            pos_x:  customer_id as f32 + 0.25,
            pos_y:  0.5,
            seat_x: 4,
            seat_y: 4,
            moving: true,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            elapsed_secs: (tick + 1) as f64 * 0.5,
            customers:    3,
            spawned:      1,
            departed:     0,
            moves:        2,
            blocked:      1,
            free_seats:   5,
            score:        -4,
        }
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("customer_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(dir.path().join("customer_snapshots.csv")), SNAPSHOT_HEADER);
        assert_eq!(headers(dir.path().join("tick_summaries.csv")), SUMMARY_HEADER);
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(1, 5), snap_row(2, 5), snap_row(3, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("customer_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "5");       // tick
        assert_eq!(&rows[0][1], "1");       // customer_id
        assert_eq!(&rows[0][2], "seating");
        assert_eq!(&rows[0][5], "1.250");   // pos_x
        assert_eq!(&rows[0][9], "1");       // moving
        assert_eq!(&rows[2][1], "3");
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "2");       // (3 + 1) * 0.5
        assert_eq!(&rows[0][6], "1");       // blocked
        assert_eq!(&rows[0][8], "-4");      // score
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_missing_dir_is_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use cafe_core::{Cell, SimConfig};
    use cafe_customer::{CustomerConfig, Menu};
    use cafe_grid::{AStarPathFinder, CellKind, GridTransform, GridWorld, LayoutBuilder};
    use cafe_sim::{Sim, SimBuilder, SimObserver};

    use crate::{CsvWriter, CustomerSnapshotRow, OutputError, OutputResult, OutputWriter,
                SimOutputObserver, TickSummaryRow};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn config() -> SimConfig {
        SimConfig {
            tick_secs:             1.0,
            total_ticks:           6,
            seed:                  1,
            num_threads:           Some(1),
            output_interval_ticks: 2,
        }
    }

    /// One seat in the far corner of a 5×5 floor, one customer spawned on
    /// the entrance at the origin.
    fn one_customer_sim() -> Sim<AStarPathFinder> {
        let mut b = LayoutBuilder::new(5, 5);
        b.set(Cell::new(4, 4), CellKind::Seat).unwrap();
        b.set(Cell::new(0, 0), CellKind::Entrance).unwrap();
        let grid = GridWorld::new(b.build(), GridTransform::default()).unwrap();
        let customers = CustomerConfig {
            movement_speed: 2.0,
            auto_spawn:     false,
            ..CustomerConfig::default()
        };
        let mut sim = SimBuilder::new(config(), grid, AStarPathFinder)
            .customer_config(customers)
            .menu(Menu::new([("tea", 3)]).unwrap())
            .build()
            .unwrap();
        sim.spawn_at(Cell::new(0, 0)).unwrap();
        sim
    }

    #[test]
    fn integration_csv() {
        let mut sim = one_customer_sim();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Interval 2 → snapshots after ticks 0, 2, 4; one customer each time.
        let mut rdr = csv::Reader::from_path(dir.path().join("customer_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        let cells: Vec<(&str, &str, &str, &str)> =
            rows.iter().map(|r| (&r[0], &r[2], &r[3], &r[4])).collect();
        assert_eq!(cells, [
            ("0", "seating",  "1", "1"),
            ("2", "seating",  "3", "3"),
            ("4", "ordering", "4", "4"),
        ]);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[5][0], "5");
        assert_eq!(&rows[5][1], "6");
    }

    #[test]
    fn elapsed_follows_variable_dt() {
        let mut sim = one_customer_sim();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        for _ in 0..4 {
            sim.step(0.25, &mut obs).unwrap();
        }
        obs.on_sim_end(sim.clock.current_tick);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let elapsed: Vec<String> = rdr.records().map(|r| r.unwrap()[1].to_owned()).collect();
        assert_eq!(elapsed, ["0.25", "0.5", "0.75", "1"]);
    }

    /// Fails every write with an I/O error naming the call.
    struct FailingWriter;

    fn fail(what: &str) -> OutputResult<()> {
        Err(OutputError::Io(std::io::Error::other(what.to_owned())))
    }

    impl OutputWriter for FailingWriter {
        fn write_snapshots(&mut self, _rows: &[CustomerSnapshotRow]) -> OutputResult<()> {
            fail("snapshots")
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            fail("summary")
        }
        fn finish(&mut self) -> OutputResult<()> {
            fail("finish")
        }
    }

    #[test]
    fn first_error_kept() {
        use cafe_core::Tick;
        use cafe_sim::TickSummary;

        let mut obs = SimOutputObserver::new(FailingWriter);
        obs.on_tick_end(Tick(0), &TickSummary::default());
        obs.on_sim_end(Tick(1));

        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("summary"), "got {err}");
        assert!(obs.take_error().is_none());
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use cafe_customer::CustomerState;

    use crate::row::{CustomerSnapshotRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(customer_id: u32, state: CustomerState, moving: bool) -> CustomerSnapshotRow {
        CustomerSnapshotRow {
            tick: 1,
            customer_id,
            state,
            cell_x: 2,
            cell_y: 3,
            pos_x:  2.0,
            pos_y:  3.5,
            seat_x: 6,
            seat_y: 6,
            moving,
        }
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_columns() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[
            snap_row(1, CustomerState::Seating, true),
            snap_row(2, CustomerState::Waiting, false),
        ]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM customer_snapshots", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 2);

        let (state, moving, pos_y): (String, i64, f64) = conn.query_row(
            "SELECT state, moving, pos_y FROM customer_snapshots WHERE customer_id = 2",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!(state, "waiting");
        assert_eq!(moving, 0);
        assert_eq!(pos_y, 3.5);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick: 7, elapsed_secs: 8.0, customers: 4, spawned: 1, departed: 2,
            moves: 3, blocked: 0, free_seats: 2, score: -3,
        }).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (tick, departed, score): (i64, i64, i64) = conn.query_row(
            "SELECT tick, departed, score FROM tick_summaries WHERE tick = 7",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!((tick, departed, score), (7, 2, -3));
    }
}
