//! Customer lifecycle states.

use std::fmt;

/// Where a customer is in its visit.
///
/// ```text
///   Seating ──arrive at seat──▶ Ordering ──take order──▶ Waiting ──correct food──▶ Eating
///                                  │                        │                        │
///                               timeout                  timeout                  finished
///                                  ▼                        ▼                        ▼
///                               Leaving ◀───────────────────┴────────────────────────┘
///                                  │
///                          arrive at entrance ──▶ removed
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CustomerState {
    /// Walking from the spawn cell to the reserved seat.
    #[default]
    Seating,
    /// Seated; waiting for someone to take the order.
    Ordering,
    /// Order taken; waiting for the food.
    Waiting,
    Eating,
    /// Walking to an entrance to leave.
    Leaving,
}

impl CustomerState {
    pub const ALL: [CustomerState; 5] = [
        CustomerState::Seating,
        CustomerState::Ordering,
        CustomerState::Waiting,
        CustomerState::Eating,
        CustomerState::Leaving,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CustomerState::Seating  => "seating",
            CustomerState::Ordering => "ordering",
            CustomerState::Waiting  => "waiting",
            CustomerState::Eating   => "eating",
            CustomerState::Leaving  => "leaving",
        }
    }

    /// `true` for the states with a patience countdown that ends in an
    /// unsatisfied departure.
    #[inline]
    pub fn is_impatient(self) -> bool {
        matches!(self, CustomerState::Ordering | CustomerState::Waiting)
    }
}

impl fmt::Display for CustomerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
