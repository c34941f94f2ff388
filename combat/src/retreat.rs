//! Retreat evaluation (§4.E). Evaluated once after the round loop ends
//! (or after an early victor emerges), not per-round, since the round
//! loop itself already stops once only one capable force remains.

use ec4x_common::entities::House;
use ec4x_common::ids::{HouseId, SystemId};
use ec4x_store::GameState;

use crate::taskforce::TaskForce;

/// The ROE rating a house's presence at `system` fights under: the
/// weakest (most cautious) rating among its fleets there, since a single
/// skittish fleet captures the house's overall posture for the
/// engagement (§4.E). Zero if the house has no fleet present.
pub fn roe_rating_for(state: &GameState, house: HouseId, system: SystemId) -> u8 {
    state
        .fleets_in_system(system)
        .filter(|f| f.owner == house)
        .map(|f| f.roe_rating)
        .min()
        .unwrap_or(0)
}

/// Whether `force` must retreat given the round it stopped fighting at
/// (§4.E: ROE <= round number and current strength below the configured
/// threshold of starting strength). Homeworld defenders never retreat.
pub fn must_retreat(
    force: &TaskForce,
    rounds_fought: u32,
    roe_rating: u8,
    retreat_threshold: f64,
) -> bool {
    if force.is_homeworld_defender {
        return false;
    }
    if force.starting_strength <= 0.0 {
        return false;
    }
    let ratio = force.current_strength() / force.starting_strength;
    (roe_rating as u32) <= rounds_fought && ratio < retreat_threshold
}

/// Pick a retreat destination for a house fleeing `from`: nearest
/// fallback route, else nearest friendly colony, else `None` meaning the
/// force is destroyed in place (§4.E).
pub fn retreat_destination(state: &GameState, house: &House, from: SystemId) -> Option<SystemId> {
    if let Some(&first) = house.retreat_policy.fallback_routes.first() {
        return Some(first);
    }
    state
        .colonies_of_house(house.id)
        .filter(|c| c.system != from)
        .map(|c| c.system)
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taskforce::CombatSquadron;
    use ec4x_common::enums::TargetBucket;
    use ec4x_common::ids::{HouseId, SquadronId};

    fn weak_force() -> TaskForce {
        TaskForce {
            owner: HouseId(1),
            squadrons: vec![CombatSquadron {
                id: SquadronId(1),
                bucket: TargetBucket::Capital,
                attack: 1.0,
                defense: 100.0,
                damage_taken: 95.0,
                crippled: true,
                destroyed: false,
                is_spacelift: false,
                is_starbase: false,
            }],
            is_homeworld_defender: false,
            starting_strength: 100.0,
        }
    }

    #[test]
    fn low_strength_past_roe_round_retreats() {
        let force = weak_force();
        assert!(must_retreat(&force, 5, 3, 0.3));
    }

    #[test]
    fn homeworld_defender_never_retreats() {
        let mut force = weak_force();
        force.is_homeworld_defender = true;
        assert!(!must_retreat(&force, 5, 3, 0.3));
    }
}
