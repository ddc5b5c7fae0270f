//! `cafe-customer` — customer lifecycle, movement state, and the menu.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`state`]      | `CustomerState` FSM states                                |
//! | [`customer`]   | `Customer`, `Order`, `StateChange`, `Arrival`             |
//! | [`movement`]   | `Movement` — grid cell, reservation, world position       |
//! | [`menu`]       | `Menu`, `MenuItem`, CSV menu loader                       |
//! | [`config`]     | `CustomerConfig` timing and speed tunables                |
//! | [`store`]      | `CustomerStore` — id-ordered customer map                 |
//! | [`error`]      | `CustomerError`, `CustomerResult<T>`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on config and state.     |

pub mod config;
pub mod customer;
pub mod error;
pub mod menu;
pub mod movement;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::CustomerConfig;
pub use customer::{Arrival, Customer, Order, StateChange};
pub use error::{CustomerError, CustomerResult};
pub use menu::{load_menu_csv, load_menu_reader, Menu, MenuItem};
pub use movement::Movement;
pub use state::CustomerState;
pub use store::CustomerStore;
