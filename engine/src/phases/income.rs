//! Income phase (§4.D step 2): blockade recomputation, NCV collection,
//! population growth, construction advancement, and ongoing-effect
//! ticking.

use ec4x_common::config::AuthoritativeConfig;
use ec4x_store::GameState;

use crate::economy;
use crate::events::TurnEvent;

pub fn run(state: &mut GameState, config: &AuthoritativeConfig) -> Vec<TurnEvent> {
    let mut events = Vec::new();

    let colony_ids: Vec<_> = state.colonies().iter().map(|c| c.id).collect();
    for colony_id in &colony_ids {
        economy::recompute_blockade(state, *colony_id);
    }

    for colony_id in &colony_ids {
        let Some(colony) = state.colonies().get(*colony_id) else { continue };
        let owner = colony.owner;
        let (ncv_reduction, tax_reduction) = economy::ongoing_reduction_ratios(state, owner);
        let Some(colony) = state.colonies().get(*colony_id) else { continue };
        let ncv = economy::net_colony_value(colony, config, ncv_reduction, tax_reduction) as i64;
        let blockaded = colony.blockade.blockaded;
        let consecutive_turns = colony.blockade.consecutive_turns;
        if let Some(house) = state.houses.get_mut(owner) {
            house.treasury += ncv;
            if blockaded {
                house.prestige -= config.sections.prestige_values.blockade_penalty_per_turn;
            }
        }
        if blockaded && consecutive_turns == 1 {
            let attackers = state.colonies().get(*colony_id).map(|c| c.blockade.attackers.clone()).unwrap_or_default();
            events.push(TurnEvent::ColonyBlockaded { colony: *colony_id, attackers });
        }
    }

    for colony_id in &colony_ids {
        let starbase_count = state
            .facilities_at(*colony_id)
            .filter(|f| f.id.kind == ec4x_common::ids::FacilityKind::Starbase && !f.crippled)
            .count() as u32;
        state.with_colony_mut(*colony_id, |colony| {
            economy::grow_population(colony, starbase_count, config);
        });
    }

    let facility_ids: Vec<_> = state.facilities.iter().map(|f| f.id).collect();
    for facility_id in facility_ids {
        let Some(colony) = state
            .colonies()
            .iter()
            .find(|c| c.facilities.contains(&facility_id))
            .map(|c| c.id)
        else {
            continue;
        };
        let Some(owner) = state.colonies().get(colony).map(|c| c.owner) else { continue };
        let (ncv_reduction, tax_reduction) = economy::ongoing_reduction_ratios(state, owner);
        let Some(colony_ref) = state.colonies().get(colony) else { continue };
        let ncv = economy::net_colony_value(colony_ref, config, ncv_reduction, tax_reduction).max(0.0);
        let Some(facility) = state.facilities.get(facility_id).cloned() else { continue };
        if facility.active_projects.is_empty() {
            continue;
        }
        let per_dock = ncv / facility.active_projects.len().max(1) as f64;
        let completed = economy::advance_projects(state, &facility, per_dock);
        let turn = state.turn;
        for project_id in completed {
            apply_project_completion(state, project_id, facility_id, turn);
        }
        if let Some(facility) = state.facilities.get_mut(facility_id) {
            while facility.promote_from_queue().is_some() {}
        }
    }

    for effect in &mut state.ongoing_effects {
        effect.tick();
    }
    state.ongoing_effects.retain(|e| e.remaining_turns > 0);

    events.extend(tick_scouts(state));

    events
}

/// Roll each outstanding scout against its observed house's effective
/// espionage strength, removing any that are caught (§4.I).
fn tick_scouts(state: &mut GameState) -> Vec<TurnEvent> {
    let mut events = Vec::new();
    let scout_ids: Vec<_> = state.scouts.iter().map(|s| s.id).collect();
    for scout_id in scout_ids {
        let Some(scout) = state.scouts.get(scout_id) else { continue };
        let (owner, observed_house, system) = (scout.owner, scout.observed_house, scout.system);
        let owner_eli = state.houses.get(owner).map(|h| h.tech_tree.field_level(ec4x_common::enums::TechField::Espionage)).unwrap_or(0);
        let rival_eli = state
            .houses
            .get(observed_house)
            .map(|h| h.tech_tree.field_level(ec4x_common::enums::TechField::Espionage))
            .unwrap_or(0);
        let rival_has_starbase = state
            .colonies_of_house(observed_house)
            .any(|c| state.facilities_at(c.id).any(|f| f.id.kind == ec4x_common::ids::FacilityKind::Starbase && !f.crippled));

        let mut rng = ec4x_common::rng::scout_survival_rng(state.turn, scout_id.0, observed_house.0);
        if !ec4x_combat::espionage::scout_survives(owner_eli, rival_eli, rival_has_starbase, &mut rng) {
            state.scouts.remove(scout_id);
            events.push(TurnEvent::ScoutCaught { owner, observed_house, system });
        }
    }
    events
}

fn apply_project_completion(
    state: &mut GameState,
    project_id: ec4x_common::ids::ProjectId,
    facility_id: ec4x_common::ids::FacilityId,
    turn: u64,
) {
    let Some(project) = state.remove_project(project_id, facility_id) else { return };
    if let Some(facility) = state.facilities.get_mut(facility_id) {
        facility.active_projects.retain(|p| *p != project_id);
    }

    match project.item {
        ec4x_common::entities::ProjectItem::Ship { class } => {
            let Some(colony) = state
                .colonies()
                .iter()
                .find(|c| c.facilities.contains(&facility_id))
                .map(|c| c.id)
            else {
                return;
            };
            let Some(owner) = state.colonies().get(colony).map(|c| c.owner) else { return };
            let ship_id = next_ship_id(state);
            let squadron_id = next_squadron_id(state);
            let _ = state.ships.add(ec4x_common::entities::Ship::new(ship_id, class, 1));
            let squadron_type = if class.is_spacelift() {
                ec4x_common::enums::SquadronType::Spacelift
            } else {
                ec4x_common::enums::SquadronType::Combat
            };
            let system = state.colonies().get(colony).map(|c| c.system).unwrap_or_default();
            if state
                .add_squadron(
                    ec4x_common::entities::Squadron::new(squadron_id, owner, system, squadron_type, ship_id),
                    ec4x_common::ids::FleetId::NONE,
                )
                .is_ok()
            {
                state.with_colony_mut(colony, |c| {
                    c.unassigned_squadrons.push(squadron_id);
                });
            }
        }
        ec4x_common::entities::ProjectItem::Industrial => {
            let colony = state
                .colonies()
                .iter()
                .find(|c| c.facilities.contains(&facility_id))
                .map(|c| c.id);
            if let Some(colony) = colony {
                state.with_colony_mut(colony, |c| {
                    c.industrial_units += 1;
                });
            }
        }
        ec4x_common::entities::ProjectItem::Terraform => {
            let colony = state
                .colonies()
                .iter()
                .find(|c| c.facilities.contains(&facility_id))
                .map(|c| c.id);
            if let Some(colony) = colony {
                state.with_colony_mut(colony, |c| {
                    c.planet_class = c.planet_class.terraformed();
                    c.active_terraform_project = None;
                });
            }
        }
        ec4x_common::entities::ProjectItem::Repair { fleet } => {
            let squadrons: Vec<_> = state.squadrons_in_fleet(fleet).map(|s| s.id).collect();
            for squadron in squadrons {
                let ships: Vec<_> = state.ships_in_squadron(squadron).map(|s| s.id).collect();
                for ship in ships {
                    if let Some(ship) = state.ships.get_mut(ship) {
                        ship.crippled = false;
                    }
                }
            }
        }
        ec4x_common::entities::ProjectItem::Building { facility: kind } => {
            let colony = state
                .colonies()
                .iter()
                .find(|c| c.facilities.contains(&facility_id))
                .map(|c| c.id);
            if let Some(colony) = colony {
                let next_index = state
                    .facilities
                    .iter()
                    .filter(|f| f.id.kind == kind)
                    .map(|f| f.id.index)
                    .max()
                    .map_or(0, |i| i + 1);
                let new_facility =
                    ec4x_common::entities::Facility::new(ec4x_common::ids::FacilityId::new(kind, next_index), turn);
                let _ = state.add_facility(new_facility, colony);
            }
        }
    }
}

fn next_ship_id(state: &GameState) -> ec4x_common::ids::ShipId {
    ec4x_common::ids::ShipId(state.ships.iter().map(|s| s.id.0).max().unwrap_or(0) + 1)
}

fn next_squadron_id(state: &GameState) -> ec4x_common::ids::SquadronId {
    ec4x_common::ids::SquadronId(state.squadrons.iter().map(|s| s.id.0).max().unwrap_or(0) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_produces_no_events() {
        let mut state = GameState::new();
        let config = AuthoritativeConfig::default_for_tests();
        let events = run(&mut state, &config);
        assert!(events.is_empty());
    }

    #[test]
    fn weak_scout_against_strong_rival_is_eventually_caught() {
        use ec4x_common::entities::{House, ScoutAsset};
        use ec4x_common::enums::TechField;
        use ec4x_common::ids::{HouseId, ScoutId, SystemId};

        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        let mut rival = House::new(HouseId(2), "B", (0, 0, 0));
        rival.tech_tree.field_levels.insert(TechField::Espionage, 20);
        state.houses.add(rival).unwrap();
        state.scouts.add(ScoutAsset::new(ScoutId(1), HouseId(1), HouseId(2), SystemId(1), 0)).unwrap();

        let mut caught = false;
        for turn in 1..50 {
            state.turn = turn;
            let events = tick_scouts(&mut state);
            if events.iter().any(|e| matches!(e, TurnEvent::ScoutCaught { .. })) {
                caught = true;
                break;
            }
        }
        assert!(caught);
        assert!(state.scouts.get(ScoutId(1)).is_none());
    }
}
