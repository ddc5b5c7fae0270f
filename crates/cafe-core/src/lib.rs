//! `cafe-core` — foundational types for the cafe customer simulation.
//!
//! This crate is a dependency of every other `cafe-*` crate.  It has no
//! `cafe-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ItemId`, `Priority`                       |
//! | [`cell`]        | `Cell` (grid coordinate), `WorldPos` (continuous)     |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng` (per-customer), `SimRng` (global)          |
//! | [`error`]       | `CafeError`, `CafeResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, WorldPos};
pub use error::{CafeError, CafeResult};
pub use ids::{AgentId, ItemId, Priority};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
