//! Conflict phase (§4.D step 1): resolve espionage actions, combat in
//! every contested system, then bombardment and invasion for colonies
//! whose defenders lost, all before Income sees this turn's state.

use std::collections::{BTreeMap, BTreeSet};

use ec4x_combat::{resolve_system_combat, SquadronOutcome};
use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::errors::ValidationError;
use ec4x_common::ids::{HouseId, SystemId};
use ec4x_common::orders::CommandPacket;
use ec4x_store::GameState;

use crate::espionage;
use crate::events::TurnEvent;

/// Systems where at least two houses have armed squadrons present are
/// contested and must fight this turn.
fn contested_systems(state: &GameState) -> Vec<SystemId> {
    let mut by_system: std::collections::BTreeMap<SystemId, BTreeSet<HouseId>> = std::collections::BTreeMap::new();
    for fleet in state.fleets().iter() {
        if state.squadrons_in_fleet(fleet.id).next().is_some() {
            by_system.entry(fleet.location).or_default().insert(fleet.owner);
        }
    }
    by_system
        .into_iter()
        .filter(|(_, owners)| owners.len() > 1)
        .map(|(system, _)| system)
        .collect()
}

/// Dispatch each house's (at most one) espionage action before combat,
/// since a successful sabotage or tech theft this turn must be in effect
/// for the fight it was aimed at (§4.D, §4.I). Packets failing the same
/// turn/eliminated-house checks the Command phase applies are silently
/// skipped here; the Command phase records the authoritative rejection.
fn dispatch_espionage(
    state: &mut GameState,
    config: &AuthoritativeConfig,
    turn: u64,
    orders: &BTreeMap<HouseId, CommandPacket>,
) -> (Vec<TurnEvent>, BTreeMap<HouseId, Vec<ValidationError>>) {
    let mut events = Vec::new();
    let mut rejected: BTreeMap<HouseId, Vec<ValidationError>> = BTreeMap::new();

    for (house, packet) in orders {
        if packet.turn != turn {
            continue;
        }
        if state.houses.get(*house).map(|h| h.eliminated).unwrap_or(true) {
            continue;
        }
        if !packet.has_valid_espionage_cardinality() {
            rejected.entry(*house).or_default().push(ValidationError::EspionageAlreadySubmitted(*house));
            continue;
        }
        let Some(cmd) = packet.espionage_actions.first() else { continue };
        match espionage::apply_espionage(state, config, turn, *house, cmd) {
            Ok(espionage_events) => events.extend(espionage_events),
            Err(e) => rejected.entry(*house).or_default().push(e),
        }
    }

    (events, rejected)
}

/// Run conflict resolution for this turn: espionage, then every
/// contested system's combat, applied directly to the store.
pub fn run(
    state: &mut GameState,
    config: &AuthoritativeConfig,
    turn: u64,
    orders: &BTreeMap<HouseId, CommandPacket>,
) -> (Vec<TurnEvent>, BTreeMap<HouseId, Vec<ValidationError>>) {
    let (mut events, rejected) = dispatch_espionage(state, config, turn, orders);

    for system in contested_systems(state) {
        let mut rng = ec4x_common::rng::combat_rng(turn, system.0);
        let report = resolve_system_combat(state, config, system, &mut rng);
        apply_combat_report(state, config, &report, &mut events);
    }

    (events, rejected)
}

fn apply_combat_report(
    state: &mut GameState,
    config: &AuthoritativeConfig,
    report: &ec4x_combat::CombatReport,
    events: &mut Vec<TurnEvent>,
) {
    for result in &report.squadron_results {
        match result.outcome {
            SquadronOutcome::Destroyed => {
                if let Some(fleet) = owning_fleet(state, result.squadron) {
                    for ship in state.ships_in_squadron(result.squadron).map(|s| s.id).collect::<Vec<_>>() {
                        state.remove_ship(ship, result.squadron);
                    }
                    state.remove_squadron(result.squadron, fleet);
                    if state.squadrons_in_fleet(fleet).next().is_none() {
                        if let Some(f) = state.remove_fleet(fleet) {
                            events.push(TurnEvent::FleetDestroyed { fleet: f.id, owner: f.owner });
                        }
                    }
                }
            }
            SquadronOutcome::Crippled => {
                if let Some(squadron) = state.squadrons.get(result.squadron) {
                    let ships: Vec<_> = squadron.all_ships().collect();
                    for ship_id in ships {
                        if let Some(ship) = state.ships.get_mut(ship_id) {
                            ship.crippled = true;
                        }
                    }
                }
            }
            SquadronOutcome::Retreated { to } => {
                if let Some(fleet) = owning_fleet(state, result.squadron) {
                    let _ = state.relocate_fleet(fleet, to);
                }
            }
            SquadronOutcome::Undamaged => {}
        }
    }

    for (colony_id, damage) in &report.infrastructure_damage {
        state.with_colony_mut(*colony_id, |colony| {
            colony.infrastructure_damage_ratio = (colony.infrastructure_damage_ratio + damage).min(1.0);
        });
    }

    for invasion in &report.invasions {
        if invasion.defender_won {
            continue;
        }
        let previous_owner = state.colonies().get(invasion.colony).map(|c| c.owner);
        let applied =
            ec4x_combat::bombardment::apply_invasion_outcome(state, invasion.colony, true, invasion.attacker, config)
                .is_ok();
        if applied {
            if let Some(previous_owner) = previous_owner {
                events.push(TurnEvent::ColonyCaptured {
                    colony: invasion.colony,
                    previous_owner,
                    new_owner: invasion.attacker,
                });
            }
        }
    }
}

fn owning_fleet(state: &GameState, squadron: ec4x_common::ids::SquadronId) -> Option<ec4x_common::ids::FleetId> {
    state.fleets().iter().find(|f| f.squadrons.contains(&squadron)).map(|f| f.id)
}
