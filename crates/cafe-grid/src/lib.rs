//! `cafe-grid` — static layout, shared occupancy, and path finding.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`layout`]     | `CellKind`, `Layout`, `LayoutBuilder`                       |
//! | [`loader`]     | `load_layout_csv`, `load_layout_reader`                     |
//! | [`transform`]  | `GridTransform` (cell ↔ world)                              |
//! | [`world`]      | `GridWorld`, `Occupant`, `OccupancyCounts`                  |
//! | [`pathfinder`] | `PathFinder` trait, `AStarPathFinder`                       |
//! | [`error`]      | `GridError`, `GridResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public config types.    |

pub mod error;
pub mod layout;
pub mod loader;
pub mod pathfinder;
pub mod transform;
pub mod world;


pub use error::{GridError, GridResult};
pub use layout::{CellKind, Layout, LayoutBuilder};
pub use loader::{load_layout_csv, load_layout_reader};
pub use pathfinder::{AStarPathFinder, PathFinder};
pub use transform::GridTransform;
pub use world::{GridWorld, OccupancyCounts, Occupant};
