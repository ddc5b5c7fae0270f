//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.
//!
//! Identity and movement precedence are deliberately separate types: a
//! customer's [`Priority`] starts out numerically equal to its [`AgentId`],
//! but nothing outside spawning relies on that.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Unique customer identity, assigned in increasing spawn order.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of an item on the cafe menu, in menu file order.
    pub struct ItemId(u16);
}

// ── Priority ──────────────────────────────────────────────────────────────────

/// Right-of-way rank used by path search and claim resolution.
///
/// **Lower value wins.**  Customers spawned earlier get lower values, so an
/// agent already walking the floor is never routed around by a newcomer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority(pub u32);

impl Priority {
    /// `true` if `self` has strictly higher precedence than `other`.
    #[inline]
    pub fn outranks(self, other: Priority) -> bool {
        self.0 < other.0
    }
}

impl From<AgentId> for Priority {
    #[inline]
    fn from(id: AgentId) -> Priority {
        Priority(id.0)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
