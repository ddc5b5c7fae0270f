//! cafe-demo — headless run of the cafe floor.
//!
//! Customers spawn in the corners outside the building, walk in through the
//! entrance, sit, order, and leave.  A scripted waiter takes one order and
//! serves one plate every few seconds, so the score shows both deliveries
//! and walk-outs.
//!
//! ```text
//! cargo run -p cafe-demo [-- settings.json]
//! ```
//!
//! The optional settings file may override `customers` (any subset of
//! fields) and `sim` (all fields).

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;

use cafe_core::{AgentId, SimConfig, Tick};
use cafe_customer::{Customer, CustomerConfig, CustomerState, CustomerStore, StateChange, load_menu_reader};
use cafe_grid::{AStarPathFinder, GridTransform, GridWorld, PathFinder, load_layout_reader};
use cafe_output::{CsvWriter, OutputWriter, SimOutputObserver};
use cafe_sim::{Sim, SimBuilder, SimObserver, TickSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64 = 42;
const TICK_SECS:             f32 = 1.0 / 10.0;
const SIM_SECS:              u64 = 180;
const OUTPUT_INTERVAL_TICKS: u64 = 10;   // one snapshot per simulated second
const WAITER_INTERVAL_SECS:  f32 = 3.0;
const PROGRESS_SECS:         f32 = 10.0;
const PADDING:               usize = 1;

// ── Embedded data ─────────────────────────────────────────────────────────────

// 0 floor, 1 wall, -1 seat, -2 entrance.  Rows map to x, columns to y.
const LAYOUT_CSV: &str = "\
1,1,1,1,1,1,1,1,1,1\n\
1,0,0,0,0,0,0,0,0,1\n\
1,-1,0,0,-1,0,0,-1,0,1\n\
1,1,0,0,1,0,0,1,0,1\n\
1,-1,0,0,-1,0,0,-1,0,1\n\
1,-1,0,0,-1,0,0,-1,0,1\n\
1,1,0,0,1,0,0,1,0,1\n\
1,-1,0,0,-1,0,0,-1,0,1\n\
1,0,0,0,0,0,0,0,0,1\n\
1,0,0,0,0,0,0,0,0,1\n\
1,0,0,0,0,0,0,0,0,1\n\
1,0,0,0,0,0,0,0,0,1\n\
1,0,0,0,0,1,1,1,0,1\n\
1,0,0,0,0,1,0,0,0,1\n\
1,0,0,0,0,1,0,0,0,1\n\
1,0,0,0,0,1,0,0,0,1\n\
1,0,0,0,0,1,0,0,0,1\n\
1,-2,-2,1,1,1,1,1,1,1\n\
";

const MENU_CSV: &str = "\
name,cost\n\
espresso,3\n\
latte,4\n\
croissant,5\n\
sandwich,8\n\
";

// ── Settings ──────────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct Settings {
    sim:       Option<SimConfig>,
    customers: CustomerConfig,
}

fn load_settings(path: Option<String>) -> Result<(SimConfig, CustomerConfig)> {
    let settings = match path {
        Some(p) => {
            let text = std::fs::read_to_string(&p).with_context(|| format!("reading {p}"))?;
            serde_json::from_str::<Settings>(&text).with_context(|| format!("parsing {p}"))?
        }
        None => Settings::default(),
    };
    let sim = settings.sim.unwrap_or(SimConfig {
        tick_secs:             TICK_SECS,
        total_ticks:           (SIM_SECS as f32 / TICK_SECS).round() as u64,
        seed:                  SEED,
        num_threads:           None,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
    });
    Ok((sim, settings.customers))
}

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Forwards to the CSV observer and keeps the counts printed at the end.
struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    spawned:       usize,
    served:        usize,
    walkouts:      usize,
    progress_every: u64,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>, progress_every: u64) -> Self {
        Self {
            inner,
            snapshot_rows: 0,
            summary_rows:  0,
            spawned:       0,
            served:        0,
            walkouts:      0,
            progress_every,
        }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_spawn(&mut self, _tick: Tick, _customer: &Customer) {
        self.spawned += 1;
    }

    fn on_state_change(&mut self, _tick: Tick, _agent: AgentId, change: &StateChange) {
        match (change.from, change.to) {
            (CustomerState::Waiting, CustomerState::Eating) => self.served += 1,
            (CustomerState::Ordering | CustomerState::Waiting, CustomerState::Leaving) => self.walkouts += 1,
            _ => {}
        }
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.summary_rows += 1;
        if self.progress_every > 0 && tick.0 % self.progress_every == 0 {
            println!(
                "{tick:>10}  customers {:>3}  free seats {:>3}  blocked {:>3}  score {:>5}",
                summary.customers, summary.free_seats, summary.blocked, summary.score
            );
        }
        self.inner.on_tick_end(tick, summary);
    }

    fn on_snapshot(&mut self, tick: Tick, customers: &CustomerStore, grid: &GridWorld) {
        self.snapshot_rows += customers.len();
        self.inner.on_snapshot(tick, customers, grid);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Waiter ────────────────────────────────────────────────────────────────────

/// Take the longest-seated order and serve the longest-waiting customer.
fn wait_tables<P: PathFinder, O: SimObserver>(sim: &mut Sim<P>, obs: &mut O) -> Result<()> {
    let first_in = |sim: &Sim<P>, state: CustomerState| {
        sim.customers.iter().find(|c| c.state == state).map(|c| c.id)
    };

    if let Some(id) = first_in(&*sim, CustomerState::Waiting) {
        let order = sim.customers.get(id).and_then(|c| c.order);
        if let Some(order) = order {
            sim.deliver_food(id, order.item, obs)?;
        }
    }
    if let Some(id) = first_in(&*sim, CustomerState::Ordering) {
        sim.take_order(id, obs)?;
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let (config, customers) = load_settings(std::env::args().nth(1))?;

    println!("=== cafe-demo ===");
    println!(
        "Ticks: {}  |  Tick: {:.3} s  |  Seed: {}",
        config.total_ticks, config.tick_secs, config.seed
    );

    // 1. Floor plan and menu.
    let layout = load_layout_reader(Cursor::new(LAYOUT_CSV), PADDING)?;
    println!(
        "Layout: {}×{} cells, {} seats, {} entrances, {} spawn cells",
        layout.width(),
        layout.height(),
        layout.seats().len(),
        layout.entrances().len(),
        layout.spawn_cells().len()
    );
    let menu = load_menu_reader(Cursor::new(MENU_CSV))?;
    println!("Menu: {} items", menu.len());
    println!();

    // 2. Build sim.
    let grid = GridWorld::new(layout, GridTransform::default())?;
    let mut sim = SimBuilder::new(config.clone(), grid, AStarPathFinder)
        .customer_config(customers)
        .menu(menu)
        .build()?;

    // 3. Set up output.
    std::fs::create_dir_all("output/cafe-demo")?;
    let writer = CsvWriter::new(Path::new("output/cafe-demo"))?;
    let inner_obs = SimOutputObserver::new(writer);
    let progress_every = sim.clock.ticks_for_secs(PROGRESS_SECS).max(1);
    let mut obs = CountingObserver::new(inner_obs, progress_every);

    // 4. Run, with the waiter acting between ticks.
    let waiter_every = sim.clock.ticks_for_secs(WAITER_INTERVAL_SECS).max(1);
    let t0 = Instant::now();
    while sim.clock.current_tick < config.end_tick() {
        if sim.clock.current_tick.0 % waiter_every == 0 {
            wait_tables(&mut sim, &mut obs)?;
        }
        sim.step(config.tick_secs, &mut obs)?;
    }
    obs.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!();
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!("  spawned  : {}", obs.spawned);
    println!("  served   : {}", obs.served);
    println!("  walk-outs: {}", obs.walkouts);
    println!("  score    : {}", sim.score);
    println!("  customer_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv     : {} rows", obs.summary_rows);
    println!();

    // 6. Who is still inside.
    let by_state: Vec<String> = CustomerState::ALL
        .iter()
        .map(|&s| format!("{} {}", s.as_str(), sim.customers.count_in(s)))
        .collect();
    println!("Still inside: {}", by_state.join(", "));
    println!("{:<10} {:<10} {:<10} {:<10}", "Customer", "State", "Cell", "Seat");
    println!("{}", "-".repeat(40));
    for c in sim.customers.iter() {
        println!(
            "{:<10} {:<10} {:<10} {:<10}",
            c.id.0,
            c.state.as_str(),
            c.curr().to_string(),
            c.seat.to_string()
        );
    }

    Ok(())
}
