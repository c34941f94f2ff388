//! Population transfer dispatch and arrival resolution (§4.F, §8 S4).
//! Souls leave the source colony immediately on dispatch and only
//! become the destination's on arrival; a blockade at the destination
//! on the arrival turn returns the shipment to the source untouched.

use ec4x_common::constants::{MIN_SOURCE_SOULS, PER_JUMP_SURCHARGE, SOULS_PER_PTU};
use ec4x_common::entities::PopulationTransit;
use ec4x_common::errors::ValidationError;
use ec4x_common::ids::{HouseId, SystemId, TransitId};
use ec4x_common::orders::PopulationTransferCommand;

use crate::events::TurnEvent;
use ec4x_store::GameState;

/// Jump-count shortest path between two systems over the lane graph, or
/// `None` if no route exists (§4.F `BlockedPath`).
fn jump_distance(state: &GameState, from: SystemId, to: SystemId) -> Option<u32> {
    use std::collections::{HashSet, VecDeque};

    if from == to {
        return Some(0);
    }
    let mut visited: HashSet<SystemId> = HashSet::new();
    let mut queue: VecDeque<(SystemId, u32)> = VecDeque::new();
    visited.insert(from);
    queue.push_back((from, 0));
    while let Some((current, dist)) = queue.pop_front() {
        let Some(system) = state.systems.get(current) else {
            continue;
        };
        for lane in &system.lanes {
            if lane.to == to {
                return Some(dist + 1);
            }
            if visited.insert(lane.to) {
                queue.push_back((lane.to, dist + 1));
            }
        }
    }
    None
}

/// PP cost for shipping `ptu_amount` PTU across `jumps` jumps of a
/// colony of `planet_class` (§4.F): `class_index * ptu_amount * (1 +
/// surcharge * extra_jumps)`, where the first jump is free of surcharge.
fn transfer_cost(ptu_amount: u64, planet_class_index: u32, jumps: u32) -> u64 {
    let extra_jumps = jumps.saturating_sub(1);
    let modifier = 1.0 + PER_JUMP_SURCHARGE * extra_jumps as f64;
    (planet_class_index as f64 * ptu_amount as f64 * modifier).round() as u64
}

fn next_transit_id(state: &GameState) -> TransitId {
    let max = state.transits.iter().map(|t| t.id.0).max().unwrap_or(0);
    TransitId(max + 1)
}

/// Validate and dispatch a population transfer, debiting the source
/// house's treasury and moving souls out of the source colony
/// immediately (§4.F, §8 S4).
pub fn dispatch_transfer(
    state: &mut GameState,
    house: HouseId,
    cmd: &PopulationTransferCommand,
) -> Result<TurnEvent, ValidationError> {
    let (source_owner, source_system, source_souls, source_functional, source_class_index) = {
        let source = state.colonies().get(cmd.source).ok_or(ValidationError::ColonyNotFound(cmd.source))?;
        (source.owner, source.system, source.souls, source.is_functional(), source.planet_class.raw_production_index())
    };
    if source_owner != house {
        return Err(ValidationError::NotColonyOwner(house, cmd.source));
    }
    if !source_functional {
        return Err(ValidationError::ColonyNonFunctional(cmd.source));
    }
    let destination_system = state
        .colonies()
        .get(cmd.destination)
        .ok_or(ValidationError::ColonyNotFound(cmd.destination))?
        .system;

    let ptu_souls = cmd.ptu_amount.saturating_mul(SOULS_PER_PTU);
    if source_souls < MIN_SOURCE_SOULS || source_souls - ptu_souls < MIN_SOURCE_SOULS {
        return Err(ValidationError::ColonyNonFunctional(cmd.source));
    }

    let Some(jumps) = jump_distance(state, source_system, destination_system) else {
        return Err(ValidationError::BlockedPath(source_system, destination_system));
    };

    let cost = transfer_cost(cmd.ptu_amount, source_class_index, jumps);

    let treasury = state.houses.get(house).map(|h| h.treasury).unwrap_or(0);
    if treasury < cost as i64 {
        return Err(ValidationError::InsufficientTreasury { required: cost as i64, available: treasury });
    }

    let arrival_turn = state.turn + 1;

    if let Some(h) = state.houses.get_mut(house) {
        h.treasury -= cost as i64;
    }
    state.with_colony_mut(cmd.source, |c| {
        c.souls -= ptu_souls;
    });

    let transit = PopulationTransit::new(
        next_transit_id(state),
        source_system,
        destination_system,
        house,
        cmd.ptu_amount,
        cost,
        arrival_turn,
    );
    state.add_transit(transit).map_err(|_| ValidationError::ColonyNonFunctional(cmd.source))?;

    Ok(TurnEvent::TransferDispatched { house, ptu: cmd.ptu_amount, cost })
}

/// Resolve every population-in-transit entry that arrives this turn
/// (§4.F, §8 S4): a blockaded destination returns the shipment to the
/// source with souls credited back and no PP refund; otherwise the
/// souls land at the destination.
pub fn resolve_arrivals(state: &mut GameState) -> Vec<TurnEvent> {
    let mut events = Vec::new();
    let due: Vec<_> = state
        .transits
        .iter()
        .filter(|t| t.has_arrived(state.turn))
        .map(|t| (t.id, t.owner))
        .collect();

    for (transit_id, owner) in due {
        let Some(transit) = state.remove_transit(transit_id, owner) else {
            continue;
        };
        let destination_colony = state.colonies_in_system(transit.destination).find(|c| c.owner == transit.owner).map(|c| c.id);
        let destination_blockaded = state.colonies_in_system(transit.destination).any(|c| c.blockade.blockaded);

        if destination_blockaded || destination_colony.is_none() {
            let ptu_souls = transit.ptu_amount.saturating_mul(SOULS_PER_PTU);
            let source_colony = state.colonies_in_system(transit.source).find(|c| c.owner == transit.owner).map(|c| c.id);
            if let Some(source_colony) = source_colony {
                state.with_colony_mut(source_colony, |c| {
                    c.souls += ptu_souls;
                });
            }
            events.push(TurnEvent::TransferReturned { house: transit.owner, ptu: transit.ptu_amount });
            continue;
        }

        if let Some(colony_id) = destination_colony {
            let ptu_souls = transit.ptu_amount.saturating_mul(SOULS_PER_PTU);
            state.with_colony_mut(colony_id, |c| {
                c.souls += ptu_souls;
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec4x_common::entities::{Colony, HexCoord, House, JumpLane, System};
    use ec4x_common::enums::{LaneClass, PlanetClass, ResourceRating};
    use ec4x_common::ids::ColonyId;

    fn linked_systems() -> GameState {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();

        let mut sys1 = System::new(SystemId(1), HexCoord::new(0, 0));
        sys1.lanes.push(JumpLane { to: SystemId(2), class: LaneClass::Major });
        state.systems.add(sys1).unwrap();

        let mut sys2 = System::new(SystemId(2), HexCoord::new(1, 0));
        sys2.lanes.push(JumpLane { to: SystemId(1), class: LaneClass::Major });
        state.systems.add(sys2).unwrap();

        state
            .add_colony(Colony::new(ColonyId(1), SystemId(1), HouseId(1), 10_000_000, PlanetClass::Benign, ResourceRating::Abundant))
            .unwrap();
        state
            .add_colony(Colony::new(ColonyId(2), SystemId(2), HouseId(1), 200_000, PlanetClass::Benign, ResourceRating::Abundant))
            .unwrap();
        state
    }

    #[test]
    fn dispatch_debits_treasury_and_souls() {
        let mut state = linked_systems();
        if let Some(h) = state.houses.get_mut(HouseId(1)) {
            h.treasury = 1_000;
        }
        let cmd = PopulationTransferCommand {
            source: ColonyId(1),
            destination: ColonyId(2),
            ptu_amount: 5,
            cargo_kind: ec4x_common::enums::CargoKind::Colonists,
        };
        dispatch_transfer(&mut state, HouseId(1), &cmd).unwrap();
        assert_eq!(state.colonies().get(ColonyId(1)).unwrap().souls, 10_000_000 - 250_000);
        assert_eq!(state.transits.iter().count(), 1);
        assert!(state.houses.get(HouseId(1)).unwrap().treasury < 1_000);
    }

    #[test]
    fn blockaded_arrival_returns_shipment() {
        let mut state = linked_systems();
        if let Some(h) = state.houses.get_mut(HouseId(1)) {
            h.treasury = 1_000;
        }
        let cmd = PopulationTransferCommand {
            source: ColonyId(1),
            destination: ColonyId(2),
            ptu_amount: 5,
            cargo_kind: ec4x_common::enums::CargoKind::Colonists,
        };
        dispatch_transfer(&mut state, HouseId(1), &cmd).unwrap();
        state.turn += 1;
        state.with_colony_mut(ColonyId(2), |c| {
            c.blockade.blockaded = true;
        });
        let events = resolve_arrivals(&mut state);
        assert_eq!(events.len(), 1);
        assert_eq!(state.colonies().get(ColonyId(1)).unwrap().souls, 10_000_000);
        assert_eq!(state.colonies().get(ColonyId(2)).unwrap().souls, 200_000);
        assert!(state.transits.iter().count() == 0);
    }

    #[test]
    fn unblocked_arrival_credits_destination() {
        let mut state = linked_systems();
        if let Some(h) = state.houses.get_mut(HouseId(1)) {
            h.treasury = 1_000;
        }
        let cmd = PopulationTransferCommand {
            source: ColonyId(1),
            destination: ColonyId(2),
            ptu_amount: 5,
            cargo_kind: ec4x_common::enums::CargoKind::Colonists,
        };
        dispatch_transfer(&mut state, HouseId(1), &cmd).unwrap();
        state.turn += 1;
        resolve_arrivals(&mut state);
        assert_eq!(state.colonies().get(ColonyId(2)).unwrap().souls, 200_000 + 250_000);
    }
}
