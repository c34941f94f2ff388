//! Maintenance phase (§4.D step 4): reputation countdowns, ship/facility
//! upkeep, collapse tracking, and elimination checks.

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::constants::{DEFAULT_COLLAPSE_PRESTIGE_THRESHOLD, DEFAULT_COLLAPSE_TURN_COUNT};
use ec4x_store::GameState;

use crate::diplomacy;
use crate::events::TurnEvent;
use crate::research;
use crate::transfer;

pub fn run(state: &mut GameState, config: &AuthoritativeConfig) -> Vec<TurnEvent> {
    let mut events = transfer::resolve_arrivals(state);

    for house in state.houses.iter_mut() {
        diplomacy::tick_reputation(house);
    }

    if research::is_upgrade_turn(state.turn) {
        for house in state.houses.iter_mut() {
            events.extend(research::advance_tech(house, config));
        }
    }

    pay_upkeep(state, config);

    let house_ids: Vec<_> = state.houses.iter().map(|h| h.id).collect();
    for house_id in house_ids {
        let has_colonies = state.colonies_of_house(house_id).next().is_some();
        let Some(house) = state.houses.get_mut(house_id) else { continue };
        if house.eliminated {
            continue;
        }
        if house.prestige < DEFAULT_COLLAPSE_PRESTIGE_THRESHOLD {
            house.consecutive_negative_prestige_turns += 1;
        } else {
            house.consecutive_negative_prestige_turns = 0;
        }
        let collapsed = house.consecutive_negative_prestige_turns >= DEFAULT_COLLAPSE_TURN_COUNT;
        if !has_colonies || collapsed {
            house.eliminated = true;
            let reason = if !has_colonies {
                "no remaining colonies".to_string()
            } else {
                "defensive collapse: sustained negative prestige".to_string()
            };
            events.push(TurnEvent::HouseEliminated { house: house_id, reason });
        }
    }

    events
}

fn pay_upkeep(state: &mut GameState, config: &AuthoritativeConfig) {
    let mut upkeep_by_owner: std::collections::BTreeMap<ec4x_common::ids::HouseId, i64> =
        std::collections::BTreeMap::new();
    for squadron in state.squadrons.iter() {
        for ship_id in squadron.all_ships() {
            let Some(ship) = state.ships.get(ship_id) else { continue };
            let Some(stats) = config.sections.ship_stats.get(&ship.class) else { continue };
            *upkeep_by_owner.entry(squadron.owner).or_insert(0) += stats.upkeep as i64;
        }
    }
    for (owner, upkeep) in upkeep_by_owner {
        if let Some(house) = state.houses.get_mut(owner) {
            house.treasury -= upkeep;
        }
    }
}
