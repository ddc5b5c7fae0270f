//! `cafe-sim` — tick loop orchestrator for the cafe customer simulation.
//!
//! # Two-phase tick loop
//!
//! ```text
//! each tick (dt seconds):
//!   ① Spawn     — every spawn_interval_secs, place a customer on a free
//!                 spawn cell with a free seat (skipped when full).
//!   ② Timers    — patience/eating countdowns; expiry ⇒ Leaving.
//!   ③ Intents   — PathFinder::next_step for each walking customer without
//!                 a valid reservation, against the unchanged grid
//!                 (parallel with the `parallel` feature).
//!   ④ Claims    — grant one request per cell in (priority, id) order;
//!                 winners write occupancy, losers wait a tick.
//!   ⑤ Movement  — ascending id: walk toward the reserved cell; on arrival
//!                 vacate the old cell and sit down or leave.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the intent phase on Rayon's thread pool.          |
//! | `fx-hash`  | FxHash for the claimed-cell set.                       |
//! | `serde`    | Propagates serde derives to config types.              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cafe_core::SimConfig;
//! use cafe_grid::{load_layout_csv, AStarPathFinder, GridTransform, GridWorld};
//! use cafe_sim::{NoopObserver, SimBuilder};
//!
//! let grid = GridWorld::new(load_layout_csv(path, 1)?, GridTransform::default())?;
//! let mut sim = SimBuilder::new(SimConfig::default(), grid, AStarPathFinder).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod claims;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use claims::{resolve_claims, Claims, StepIntent};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
