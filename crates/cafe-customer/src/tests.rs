//! Unit tests for cafe-customer.

#[cfg(test)]
mod helpers {
    use cafe_core::{AgentId, Cell, Tick, WorldPos};
    use crate::{Customer, CustomerConfig, CustomerState, Menu};

    pub const SEAT: Cell = Cell { x: 4, y: 4 };
    pub const EXIT: Cell = Cell { x: 0, y: 0 };

    pub fn menu() -> Menu {
        Menu::new([("espresso", 3), ("latte", 4), ("cake", 7)]).unwrap()
    }

    pub fn cfg() -> CustomerConfig {
        CustomerConfig::default()
    }

    pub fn customer() -> Customer {
        Customer::new(AgentId(1), SEAT, Cell::new(0, 0), WorldPos::new(0.5, 0.5), Tick::ZERO, 42)
    }

    /// A customer that has just sat down and is ordering.
    pub fn seated() -> Customer {
        let mut c = customer();
        c.movement.curr = SEAT;
        c.arrive(&menu(), &cfg());
        assert_eq!(c.state, CustomerState::Ordering);
        c
    }

    pub fn waiting() -> Customer {
        let mut c = seated();
        c.take_order(&cfg()).unwrap();
        c
    }

    pub fn eating() -> Customer {
        let mut c = waiting();
        let item = c.order.unwrap().item;
        c.deliver(item, &cfg()).unwrap();
        c
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod state {
    use crate::CustomerState;

    #[test]
    fn labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            CustomerState::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels.len(), CustomerState::ALL.len());
        assert_eq!(CustomerState::Waiting.to_string(), "waiting");
    }

    #[test]
    fn only_ordering_and_waiting_are_impatient() {
        let impatient: Vec<_> = CustomerState::ALL.into_iter().filter(|s| s.is_impatient()).collect();
        assert_eq!(impatient, vec![CustomerState::Ordering, CustomerState::Waiting]);
    }
}

// ── FSM transitions ───────────────────────────────────────────────────────────

#[cfg(test)]
mod fsm {
    use cafe_core::{Cell, ItemId};
    use crate::{Arrival, CustomerError, CustomerState, Menu, Order, StateChange};
    use super::helpers::{cfg, customer, eating, menu, seated, waiting, EXIT, SEAT};

    #[test]
    fn new_customer_heads_for_seat() {
        let c = customer();
        assert_eq!(c.state, CustomerState::Seating);
        assert_eq!(c.target, Some(SEAT));
        assert!(c.is_moving());
        assert_eq!(c.timer, None);
        assert_eq!(c.priority.0, c.id.0);
    }

    #[test]
    fn arrive_before_target_does_nothing() {
        let mut c = customer();
        assert_eq!(c.arrive(&menu(), &cfg()), Arrival::Stationary);
        assert_eq!(c.state, CustomerState::Seating);
    }

    #[test]
    fn seating_to_ordering_on_reaching_seat() {
        let mut c = customer();
        c.movement.curr = SEAT;
        let arrival = c.arrive(&menu(), &cfg());

        assert_eq!(
            arrival,
            Arrival::Seated(StateChange { from: CustomerState::Seating, to: CustomerState::Ordering, score_delta: 0 })
        );
        assert_eq!(c.timer, Some(20.0));
        assert_eq!(c.target, None);
        assert!(!c.is_moving());
        let order = c.order.unwrap();
        assert_eq!(menu().get(order.item).unwrap().cost, order.cost);
    }

    #[test]
    fn order_choice_is_deterministic_per_seed_and_id() {
        let a = seated();
        let b = seated();
        assert_eq!(a.order, b.order);
    }

    #[test]
    fn empty_menu_seats_without_order() {
        let mut c = customer();
        c.movement.curr = SEAT;
        c.arrive(&Menu::default(), &cfg());
        assert_eq!(c.state, CustomerState::Ordering);
        assert_eq!(c.order, None);
    }

    #[test]
    fn ordering_to_waiting_on_take_order() {
        let mut c = seated();
        let change = c.take_order(&cfg()).unwrap();
        assert_eq!((change.from, change.to), (CustomerState::Ordering, CustomerState::Waiting));
        assert_eq!(c.state, CustomerState::Waiting);
        assert_eq!(c.timer, Some(20.0));
    }

    #[test]
    fn ordering_timeout_leaves_with_penalty() {
        let mut c = seated();
        let cost = c.order_cost();
        assert_eq!(c.tick_timer(19.5, || EXIT), None);
        let change = c.tick_timer(0.5, || EXIT).unwrap();

        assert_eq!((change.from, change.to), (CustomerState::Ordering, CustomerState::Leaving));
        assert_eq!(change.score_delta, Order::penalty(cost));
        assert_eq!(c.target, Some(EXIT));
        assert_eq!(c.timer, None);
        assert_eq!(c.seat, SEAT, "seat stays reserved while leaving");
    }

    #[test]
    fn waiting_to_eating_on_correct_item() {
        let mut c = waiting();
        let order = c.order.unwrap();
        let change = c.deliver(order.item, &cfg()).unwrap();

        assert_eq!((change.from, change.to), (CustomerState::Waiting, CustomerState::Eating));
        assert_eq!(change.score_delta, order.cost as i64);
        assert_eq!(c.timer, Some(5.0));
    }

    #[test]
    fn wrong_item_rejected_without_state_change() {
        let mut c = waiting();
        let order = c.order.unwrap();
        let wrong = ItemId((order.item.0 + 1) % 3);
        let timer = c.timer;

        let err = c.deliver(wrong, &cfg()).unwrap_err();
        assert!(matches!(err, CustomerError::WrongItem { got, .. } if got == wrong));
        assert_eq!(c.state, CustomerState::Waiting);
        assert_eq!(c.timer, timer);
    }

    #[test]
    fn waiting_timeout_leaves_with_penalty() {
        let mut c = waiting();
        let cost = c.order_cost();
        let change = c.tick_timer(20.0, || Cell::new(9, 9)).unwrap();
        assert_eq!(change.to, CustomerState::Leaving);
        assert_eq!(change.score_delta, Order::penalty(cost));
        assert_eq!(c.target, Some(Cell::new(9, 9)));
    }

    #[test]
    fn eating_to_leaving_without_penalty() {
        let mut c = eating();
        assert_eq!(c.tick_timer(4.0, || EXIT), None);
        let change = c.tick_timer(1.0, || EXIT).unwrap();
        assert_eq!((change.from, change.to), (CustomerState::Eating, CustomerState::Leaving));
        assert_eq!(change.score_delta, 0);
    }

    #[test]
    fn leaving_arrival_departs() {
        let mut c = eating();
        c.tick_timer(5.0, || EXIT);
        assert_eq!(c.arrive(&menu(), &cfg()), Arrival::Stationary, "still walking");

        c.movement.curr = EXIT;
        assert_eq!(c.arrive(&menu(), &cfg()), Arrival::Departed);
    }

    #[test]
    fn walking_customers_have_no_timer() {
        let mut c = customer();
        let mut called = false;
        assert_eq!(c.tick_timer(100.0, || { called = true; EXIT }), None);
        assert!(!called, "exit is only chosen on expiry");
    }

    #[test]
    fn events_in_wrong_state_rejected() {
        let mut c = customer();
        assert!(matches!(
            c.take_order(&cfg()),
            Err(CustomerError::InvalidEvent { state: CustomerState::Seating, .. })
        ));
        assert!(matches!(
            c.deliver(ItemId(0), &cfg()),
            Err(CustomerError::InvalidEvent { .. })
        ));

        let mut c = waiting();
        assert!(matches!(c.take_order(&cfg()), Err(CustomerError::InvalidEvent { .. })));
        assert_eq!(c.state, CustomerState::Waiting);
    }

    #[test]
    fn waiting_without_order_cannot_be_served() {
        let mut c = customer();
        c.movement.curr = SEAT;
        c.arrive(&Menu::default(), &cfg());
        c.take_order(&cfg()).unwrap();
        assert!(matches!(c.deliver(ItemId(0), &cfg()), Err(CustomerError::NoOrder(_))));
    }

    #[test]
    fn penalty_is_half_cost_rounded_up_at_least_one() {
        assert_eq!(Order::penalty(0), -1);
        assert_eq!(Order::penalty(1), -1);
        assert_eq!(Order::penalty(3), -2);
        assert_eq!(Order::penalty(4), -2);
        assert_eq!(Order::penalty(7), -4);
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use cafe_core::{Cell, WorldPos};
    use crate::Movement;

    #[test]
    fn advance_reports_arrival_within_epsilon() {
        let mut m = Movement::at(Cell::new(0, 0), WorldPos::new(0.5, 0.5));
        let centre = WorldPos::new(2.5, 0.5);

        assert!(!m.advance(centre, 1.0, 0.01));
        assert!((m.position.x - 1.5).abs() < 1e-6);
        assert!(m.advance(centre, 1.0, 0.01));
        assert_eq!(m.position, centre);
    }

    #[test]
    fn commit_moves_cell_and_clears_reservation() {
        let mut m = Movement::at(Cell::new(0, 0), WorldPos::new(0.5, 0.5));
        m.next_step = Some(Cell::new(1, 1));
        let left = m.commit(Cell::new(1, 1));
        assert_eq!(left, Cell::new(0, 0));
        assert_eq!(m.curr, Cell::new(1, 1));
        assert_eq!(m.next_step, None);
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod menu {
    use std::io::{Cursor, Write};

    use cafe_core::{AgentId, AgentRng, ItemId};
    use crate::{load_menu_csv, load_menu_reader, CustomerError, Menu};

    const CSV: &str = "name,cost\nespresso,3\nlatte, 4\ncroissant,5\n";

    #[test]
    fn reader_assigns_ids_in_file_order() {
        let menu = load_menu_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(menu.len(), 3);
        assert_eq!(menu.get(ItemId(1)).unwrap().name, "latte");
        assert_eq!(menu.get(ItemId(1)).unwrap().cost, 4);
        assert_eq!(menu.items()[2].id, ItemId(2));
        assert!(menu.get(ItemId(3)).is_none());
    }

    #[test]
    fn bad_cost_is_menu_error() {
        let err = load_menu_reader(Cursor::new("name,cost\ntea,free\n")).unwrap_err();
        assert!(matches!(err, CustomerError::Menu(_)));
    }

    #[test]
    fn empty_name_rejected() {
        let err = load_menu_reader(Cursor::new("name,cost\n,3\n")).unwrap_err();
        assert!(matches!(err, CustomerError::Menu(_)));
    }

    #[test]
    fn file_loader() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let menu = load_menu_csv(file.path()).unwrap();
        assert_eq!(menu.items().iter().map(|i| i.cost).sum::<u32>(), 12);
    }

    #[test]
    fn choose_from_empty_menu_is_none() {
        let mut rng = AgentRng::new(0, AgentId(1));
        assert!(Menu::default().choose(&mut rng).is_none());
        assert!(Menu::default().is_empty());
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{CustomerConfig, CustomerError};

    #[test]
    fn defaults_are_valid() {
        let cfg = CustomerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.ordering_patience_secs, 20.0);
        assert_eq!(cfg.eating_secs, 5.0);
        assert!(cfg.auto_spawn);
    }

    #[test]
    fn non_positive_speed_rejected() {
        let cfg = CustomerConfig { movement_speed: 0.0, ..CustomerConfig::default() };
        assert!(matches!(cfg.validate(), Err(CustomerError::Config(_))));
    }

    #[test]
    fn negative_epsilon_rejected() {
        let cfg = CustomerConfig { arrive_epsilon: -1.0, ..CustomerConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use cafe_core::{AgentId, Cell, Tick, WorldPos};
    use crate::{Customer, CustomerState, CustomerStore};

    fn put(store: &mut CustomerStore) -> AgentId {
        let id = store.allocate_id();
        store.insert(Customer::new(id, Cell::new(1, 1), Cell::new(0, 0), WorldPos::default(), Tick::ZERO, 0));
        id
    }

    #[test]
    fn ids_start_at_one_and_never_repeat() {
        let mut store = CustomerStore::new();
        let a = put(&mut store);
        let b = put(&mut store);
        store.remove(a);
        let c = put(&mut store);
        assert_eq!((a, b, c), (AgentId(1), AgentId(2), AgentId(3)));
        assert_eq!(store.ids(), vec![AgentId(2), AgentId(3)]);
    }

    #[test]
    fn iterates_in_id_order_and_counts_states() {
        let mut store = CustomerStore::new();
        for _ in 0..4 {
            put(&mut store);
        }
        store.get_mut(AgentId(3)).unwrap().state = CustomerState::Eating;

        let order: Vec<_> = store.iter().map(|c| c.id.0).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
        assert_eq!(store.count_in(CustomerState::Seating), 3);
        assert_eq!(store.count_in(CustomerState::Eating), 1);
        assert_eq!(store.len(), 4);
    }
}
