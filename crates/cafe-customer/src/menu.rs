//! The cafe menu and its CSV loader.
//!
//! # CSV format
//!
//! One row per item, with a header.  Items receive [`ItemId`]s in file order.
//!
//! ```csv
//! name,cost
//! espresso,3
//! latte,4
//! croissant,5
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cafe_core::{AgentRng, ItemId};

use crate::{CustomerError, CustomerResult};

// ── MenuItem / Menu ───────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MenuItem {
    pub id:   ItemId,
    pub name: String,
    /// Score awarded when this item is served to the customer who ordered it.
    pub cost: u32,
}

/// What customers can order.  May be empty, in which case customers sit
/// without ordering anything and eventually leave.
#[derive(Clone, Debug, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Build a menu from `(name, cost)` pairs, assigning ids in order.
    ///
    /// # Errors
    ///
    /// [`CustomerError::Menu`] if there are more items than `ItemId` can
    /// address.
    pub fn new<S: Into<String>>(items: impl IntoIterator<Item = (S, u32)>) -> CustomerResult<Self> {
        let items = items
            .into_iter()
            .enumerate()
            .map(|(i, (name, cost))| {
                let id = ItemId::try_from(i)
                    .ok()
                    .filter(|id| *id != ItemId::INVALID)
                    .ok_or_else(|| CustomerError::Menu(format!("too many menu items ({i})")))?;
                Ok(MenuItem { id, name: name.into(), cost })
            })
            .collect::<CustomerResult<Vec<_>>>()?;
        Ok(Self { items })
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.get(id.index())
    }

    /// A uniformly random item drawn with the customer's own RNG.
    pub fn choose(&self, rng: &mut AgentRng) -> Option<&MenuItem> {
        rng.choose(&self.items)
    }
}

// ── CSV loading ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MenuRecord {
    name: String,
    cost: u32,
}

/// Load a [`Menu`] from a CSV file.
pub fn load_menu_csv(path: &Path) -> CustomerResult<Menu> {
    let file = std::fs::File::open(path).map_err(CustomerError::Io)?;
    load_menu_reader(file)
}

/// Like [`load_menu_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for menus embedded in
/// the binary.
pub fn load_menu_reader<R: Read>(reader: R) -> CustomerResult<Menu> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<MenuRecord>() {
        let row = result.map_err(|e| CustomerError::Menu(e.to_string()))?;
        if row.name.is_empty() {
            return Err(CustomerError::Menu(format!("item {} has an empty name", rows.len())));
        }
        rows.push((row.name, row.cost));
    }

    Menu::new(rows)
}
