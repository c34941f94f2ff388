//! # EC4X Combat
//!
//! Task-force assembly, round-based combat resolution, retreat,
//! bombardment, invasion, and espionage (§4.E, §4.I). Every stochastic
//! decision here is drawn from an RNG the caller seeds from
//! `ec4x_common::rng`, so a system's combat outcome is a pure function
//! of `(turn, system, state-at-conflict-start)`.

pub mod bombardment;
pub mod espionage;
pub mod report;
pub mod retreat;
pub mod rounds;
pub mod taskforce;

use std::collections::BTreeMap;

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::enums::CargoKind;
use ec4x_common::ids::{ColonyId, HouseId, SystemId};
use ec4x_store::GameState;
use rand_chacha::ChaCha8Rng;

pub use report::{CombatReport, EspionageReport, InvasionResult, SquadronOutcome, SquadronResult};
pub use taskforce::{build_task_forces, CombatSquadron, TaskForce};

/// Resolve one system's combat for one turn (§4.E): assemble task
/// forces, fight rounds, evaluate retreats, and bombard/invade any
/// colony the victor doesn't already hold. Does not mutate `state`; the
/// caller applies the report.
pub fn resolve_system_combat(
    state: &GameState,
    config: &AuthoritativeConfig,
    system: SystemId,
    rng: &mut ChaCha8Rng,
) -> CombatReport {
    let mut forces = build_task_forces(state, config, system);
    let rounds_fought = rounds::fight(&mut forces, config, rng);

    let retreat_threshold = config.sections.combat_tables.retreat_strength_threshold;
    let mut retreats: BTreeMap<HouseId, Option<SystemId>> = BTreeMap::new();
    for force in &forces {
        if !force.has_combat_capable_squadrons() || force.is_homeworld_defender {
            continue;
        }
        let roe_rating = retreat::roe_rating_for(state, force.owner, system);
        if retreat::must_retreat(force, rounds_fought, roe_rating, retreat_threshold) {
            let destination = state
                .houses
                .get(force.owner)
                .and_then(|house| retreat::retreat_destination(state, house, system));
            retreats.insert(force.owner, destination);
        }
    }

    let mut squadron_results = Vec::new();
    for force in &forces {
        for squadron in &force.squadrons {
            let outcome = if squadron.destroyed {
                SquadronOutcome::Destroyed
            } else if let Some(destination) = retreats.get(&force.owner) {
                match destination {
                    Some(to) => SquadronOutcome::Retreated { to: *to },
                    None => SquadronOutcome::Destroyed,
                }
            } else if squadron.crippled {
                SquadronOutcome::Crippled
            } else {
                SquadronOutcome::Undamaged
            };
            squadron_results.push(SquadronResult {
                squadron: squadron.id,
                owner: force.owner,
                outcome,
            });
        }
    }

    let staying: Vec<_> = forces
        .iter()
        .filter(|f| f.has_combat_capable_squadrons() && !retreats.contains_key(&f.owner))
        .collect();
    let (victor, contested) = match staying.len() {
        1 => (Some(staying[0].owner), false),
        0 if forces.len() > 1 => (None, true),
        _ => (None, false),
    };

    let mut infrastructure_damage = Vec::new();
    let mut invasions = Vec::new();
    if let Some(victor_owner) = victor {
        for colony in state.colonies_in_system(system).filter(|c| c.owner != victor_owner) {
            let damage = bombardment::bombardment_damage(config);
            infrastructure_damage.push((colony.id, damage));

            let marine_strength = marine_strength_in_system(state, victor_owner, system);
            if marine_strength == 0 {
                continue;
            }
            let garrison_strength = garrison_strength_at(state, colony.id);
            let attacker_won = bombardment::resolve_invasion(marine_strength, garrison_strength);
            invasions.push(InvasionResult {
                colony: colony.id,
                attacker: victor_owner,
                defender_won: !attacker_won,
            });
        }
    }

    CombatReport {
        system,
        rounds_fought,
        squadron_results,
        victor,
        contested,
        infrastructure_damage,
        invasions,
    }
}

/// Sum of marine cargo carried by `house`'s ships present at `system`
/// (§4.E: invasions are committed by marine-carrying ships, not bare
/// combat strength).
fn marine_strength_in_system(state: &GameState, house: HouseId, system: SystemId) -> u32 {
    state
        .fleets_in_system(system)
        .filter(|f| f.owner == house)
        .flat_map(|f| state.squadrons_in_fleet(f.id))
        .flat_map(|squadron| state.ships_in_squadron(squadron.id))
        .filter_map(|ship| ship.cargo)
        .filter(|cargo| cargo.kind == CargoKind::Marines)
        .map(|cargo| cargo.quantity)
        .sum()
}

fn garrison_strength_at(state: &GameState, colony: ColonyId) -> u32 {
    state
        .ground_units_at(colony)
        .filter(|unit| unit.role == ec4x_common::entities::GroundUnitRole::Army)
        .map(|unit| unit.strength)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combat_report_on_empty_system_has_no_results() {
        let state = GameState::new();
        let config = AuthoritativeConfig::default_for_tests();
        let mut rng = ec4x_common::rng::combat_rng(1, 1);
        let report = resolve_system_combat(&state, &config, SystemId(1), &mut rng);
        assert!(report.squadron_results.is_empty());
        assert!(report.victor.is_none());
    }
}
