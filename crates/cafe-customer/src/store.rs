//! `CustomerStore` — every customer currently on the floor.

use std::collections::BTreeMap;

use cafe_core::AgentId;

use crate::{Customer, CustomerState};

/// Customers keyed by id.
///
/// A `BTreeMap` keeps iteration in ascending id order, which is also
/// descending priority order; the movement phase depends on that.
#[derive(Debug)]
pub struct CustomerStore {
    customers: BTreeMap<AgentId, Customer>,
    next_id:   u32,
}

impl CustomerStore {
    pub fn new() -> Self {
        Self { customers: BTreeMap::new(), next_id: 1 }
    }

    /// Reserve the next id.  Ids start at 1 and are never reused.
    pub fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, customer: Customer) {
        self.customers.insert(customer.id, customer);
    }

    pub fn remove(&mut self, id: AgentId) -> Option<Customer> {
        self.customers.remove(&id)
    }

    pub fn get(&self, id: AgentId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Customer> {
        self.customers.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.customers.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.customers.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Customer> + '_ {
        self.customers.values_mut()
    }

    /// Number of customers in `state`.
    pub fn count_in(&self, state: CustomerState) -> usize {
        self.customers.values().filter(|c| c.state == state).count()
    }
}

impl Default for CustomerStore {
    fn default() -> Self {
        Self::new()
    }
}
