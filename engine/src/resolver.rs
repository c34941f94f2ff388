//! The turn resolution orchestrator (§4.D): runs Conflict, Income,
//! Command, Maintenance in order against a borrowed `GameState` and
//! returns the events raised, mirroring how the teacher workspace's
//! `execute` entry point threads a mutable state through staged
//! processing.

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::errors::{CoreError, ValidationError};
use ec4x_common::ids::HouseId;
use ec4x_store::GameState;
use std::collections::BTreeMap;

use crate::events::TurnEvent;
use crate::phases::{command, conflict, income, maintenance};

/// Outcome of resolving one turn: the events every phase raised plus the
/// validation errors of any orders that were discarded (§7).
#[derive(Debug, Default)]
pub struct TurnOutcome {
    pub events: Vec<TurnEvent>,
    pub rejected_orders: BTreeMap<HouseId, Vec<ValidationError>>,
}

/// Resolve one full turn. Preconditions (§4.D): `state` is not
/// quarantined, every packet declares `state.turn`, and no packet comes
/// from an eliminated house — violations are recorded as rejected
/// orders rather than aborting the whole turn.
pub fn resolve_turn(
    state: &mut GameState,
    config: &AuthoritativeConfig,
    orders: &BTreeMap<HouseId, ec4x_common::orders::CommandPacket>,
) -> Result<TurnOutcome, CoreError> {
    let mut outcome = TurnOutcome::default();

    let (conflict_events, conflict_rejected) = conflict::run(state, config, state.turn, orders);
    outcome.events.extend(conflict_events);
    for (house, errs) in conflict_rejected {
        outcome.rejected_orders.entry(house).or_default().extend(errs);
    }

    outcome.events.extend(income::run(state, config));

    for (house, packet) in orders {
        let (events, rejected) = command::apply_packet(state, config, packet);
        outcome.events.extend(events);
        if !rejected.is_empty() {
            outcome.rejected_orders.insert(*house, rejected);
        }
    }

    outcome.events.extend(command::finalize_diplomacy(state, state.turn));

    outcome.events.extend(maintenance::run(state, config));

    state.assert_indices_consistent()?;
    state.turn += 1;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec4x_common::entities::House;
    use ec4x_common::ids::HouseId;

    #[test]
    fn resolve_turn_advances_turn_counter() {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        let config = AuthoritativeConfig::default_for_tests();
        let orders = BTreeMap::new();
        let before = state.turn;
        resolve_turn(&mut state, &config, &orders).unwrap();
        assert_eq!(state.turn, before + 1);
    }

    #[test]
    fn resolve_turn_records_rejected_orders_for_wrong_turn() {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        let config = AuthoritativeConfig::default_for_tests();
        let mut orders = BTreeMap::new();
        orders.insert(HouseId(1), ec4x_common::orders::CommandPacket::new(99, HouseId(1)));
        let outcome = resolve_turn(&mut state, &config, &orders).unwrap();
        assert!(outcome.rejected_orders.contains_key(&HouseId(1)));
    }
}
