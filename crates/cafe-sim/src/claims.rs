//! Claim resolution for the second half of the two-phase tick.
//!
//! Every customer computes its desired step against the same frozen grid, so
//! two customers can ask for the same cell.  Requests are granted in
//! `(priority, id)` order; the first request for a cell wins and the rest
//! wait a tick.

use cafe_core::{AgentId, Cell, Priority};

#[cfg(feature = "fx-hash")]
type CellSet = rustc_hash::FxHashSet<Cell>;
#[cfg(not(feature = "fx-hash"))]
type CellSet = std::collections::HashSet<Cell>;

/// One customer's desired move for this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct StepIntent {
    pub agent:    AgentId,
    pub priority: Priority,
    pub from:     Cell,
    pub to:       Cell,
}

/// Result of [`resolve_claims`].  Both lists are in resolution order.
#[derive(Clone, Debug, Default)]
pub struct Claims {
    pub granted: Vec<StepIntent>,
    pub denied:  Vec<StepIntent>,
}

/// Grant at most one intent per target cell, highest priority first.
pub fn resolve_claims(mut intents: Vec<StepIntent>) -> Claims {
    intents.sort_unstable_by_key(|i| (i.priority, i.agent));

    let mut taken = CellSet::default();
    let mut claims = Claims::default();
    for intent in intents {
        if taken.insert(intent.to) {
            claims.granted.push(intent);
        } else {
            log::trace!("{} loses {} and waits at {}", intent.agent, intent.to, intent.from);
            claims.denied.push(intent);
        }
    }
    claims
}
