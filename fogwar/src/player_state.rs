//! `PlayerState` derivation (§4.K): the pure, deterministic projection
//! of authoritative state into one house's filtered view.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use ec4x_common::enums::{Act, DiplomaticState, IntelQuality};
use ec4x_common::ids::{ColonyId, FleetId, HouseId, SystemId};
use ec4x_store::GameState;

use crate::intel::{apply_quality_fields, ColonyIntel, FleetIntel};

/// Coords and outgoing lanes for one visible system (§4.K).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleSystem {
    pub system: SystemId,
    pub coords: ec4x_common::entities::HexCoord,
    pub lanes: Vec<ec4x_common::entities::JumpLane>,
}

/// Prestige and colony count visible to every house for every house
/// (§4.K public info).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicHouseInfo {
    pub house: HouseId,
    pub prestige: i64,
    pub colony_count: u32,
    pub eliminated: bool,
}

/// Act-progression snapshot (§4.K public info).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActProgression {
    pub current_act: Act,
    pub start_turn: u64,
}

/// The filtered view one house has of the game (§4.K). Deriving this
/// twice from the same `GameState` for the same house must produce
/// identical canonical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub house: HouseId,
    pub turn: u64,
    pub own_colonies: Vec<ColonyId>,
    pub own_fleets: Vec<FleetId>,
    pub visible_systems: Vec<VisibleSystem>,
    pub colony_intel: Vec<ColonyIntel>,
    pub fleet_intel: Vec<FleetIntel>,
    pub public_info: Vec<PublicHouseInfo>,
    pub relations: BTreeMap<HouseId, DiplomaticState>,
    pub act: ActProgression,
}

/// Derive the full `PlayerState` for `house` from `state` (§4.K). Pure:
/// takes no RNG and mutates nothing.
pub fn derive_player_state(state: &GameState, house: HouseId, act: ActProgression) -> PlayerState {
    let own_colonies: Vec<_> = state.colonies_of_house(house).map(|c| c.id).collect();
    let own_fleets: Vec<_> = state.fleets_of_house(house).map(|f| f.id).collect();

    let mut visible: BTreeSet<SystemId> = BTreeSet::new();
    for colony in state.colonies_of_house(house) {
        visible.insert(colony.system);
    }
    for fleet in state.fleets_of_house(house) {
        visible.insert(fleet.location);
    }
    for scout in state.scouts.iter().filter(|s| s.owner == house) {
        visible.insert(scout.system);
    }
    for system in visible.clone() {
        if let Some(sys) = state.systems.get(system) {
            for lane in &sys.lanes {
                visible.insert(lane.to);
            }
        }
    }

    let visible_systems: Vec<_> = visible
        .iter()
        .filter_map(|id| {
            state.systems.get(*id).map(|sys| VisibleSystem {
                system: sys.id,
                coords: sys.coords,
                lanes: sys.lanes.clone(),
            })
        })
        .collect();

    let mut colony_intel = Vec::new();
    for system in &visible {
        for colony in state.colonies_in_system(*system) {
            if colony.owner == house {
                continue;
            }
            let quality = intel_quality_for(state, house, colony.system);
            let mut entry = ColonyIntel::new(colony.id, colony.system, colony.owner, quality, state.turn);
            let starbase_count = state
                .facilities_at(colony.id)
                .filter(|f| f.id.kind == ec4x_common::ids::FacilityKind::Starbase && !f.crippled)
                .count() as u32;
            apply_quality_fields(&mut entry, colony.population_units(), colony.industrial_units, starbase_count);
            colony_intel.push(entry);
        }
    }

    let mut fleet_intel = Vec::new();
    for system in &visible {
        for fleet in state.fleets_in_system(*system) {
            if fleet.owner == house {
                continue;
            }
            let quality = intel_quality_for(state, house, fleet.location);
            let mut entry = FleetIntel::new(fleet.id, fleet.owner, fleet.location, quality, state.turn);
            if quality >= IntelQuality::Scan {
                entry.estimated_ship_count = Some(state.squadrons_in_fleet(fleet.id).count() as u32);
            }
            fleet_intel.push(entry);
        }
    }

    let public_info: Vec<_> = state
        .houses
        .iter()
        .map(|h| PublicHouseInfo {
            house: h.id,
            prestige: h.prestige,
            colony_count: state.colonies_of_house(h.id).count() as u32,
            eliminated: h.eliminated,
        })
        .collect();

    let relations = state
        .houses
        .get(house)
        .map(|h| h.diplomacy.relations.clone())
        .unwrap_or_default();

    PlayerState {
        house,
        turn: state.turn,
        own_colonies,
        own_fleets,
        visible_systems,
        colony_intel,
        fleet_intel,
        public_info,
        relations,
        act,
    }
}

/// Intel quality a house has on a given system (§4.K, §4.I): `Perfect`
/// if H has a colony or fleet there, `Scan` if H has a surviving planted
/// scout observing the system's owner, `Visual` otherwise (lane-adjacent
/// visibility with no asset present). Spy tier is not yet backed by a
/// distinct asset and never returned here.
fn intel_quality_for(state: &GameState, house: HouseId, system: SystemId) -> IntelQuality {
    let has_presence = state.colonies_in_system(system).any(|c| c.owner == house)
        || state.fleets_in_system(system).any(|f| f.owner == house);
    if has_presence {
        return IntelQuality::Perfect;
    }
    let has_scout = state.scouts.iter().any(|s| s.owner == house && s.system == system);
    if has_scout {
        IntelQuality::Scan
    } else {
        IntelQuality::Visual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec4x_common::entities::{Colony, HexCoord, House, System};
    use ec4x_common::enums::{PlanetClass, ResourceRating};

    fn act() -> ActProgression {
        ActProgression { current_act: Act::LandGrab, start_turn: 0 }
    }

    #[test]
    fn own_colony_is_perfect_quality_neighbor_is_visual() {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        state.houses.add(House::new(HouseId(2), "B", (0, 0, 0))).unwrap();
        state.systems.add(System::new(SystemId(1), HexCoord::new(0, 0))).unwrap();
        let mut sys2 = System::new(SystemId(2), HexCoord::new(1, 0));
        sys2.lanes.push(ec4x_common::entities::JumpLane { to: SystemId(1), class: ec4x_common::enums::LaneClass::Major });
        state.systems.add(sys2).unwrap();
        let mut sys1 = state.systems.get(SystemId(1)).unwrap().clone();
        sys1.lanes.push(ec4x_common::entities::JumpLane { to: SystemId(2), class: ec4x_common::enums::LaneClass::Major });
        *state.systems.get_mut(SystemId(1)).unwrap() = sys1;

        state
            .add_colony(Colony::new(ColonyId(1), SystemId(1), HouseId(1), 1_000_000, PlanetClass::Benign, ResourceRating::Abundant))
            .unwrap();
        state
            .add_colony(Colony::new(ColonyId(2), SystemId(2), HouseId(2), 1_000_000, PlanetClass::Benign, ResourceRating::Abundant))
            .unwrap();

        let view = derive_player_state(&state, HouseId(1), act());
        assert_eq!(view.own_colonies, vec![ColonyId(1)]);
        let intel = view.colony_intel.iter().find(|i| i.colony == ColonyId(2)).unwrap();
        assert_eq!(intel.quality, IntelQuality::Visual);
        assert!(intel.estimated_population_units.is_none());
    }

    #[test]
    fn derivation_is_deterministic() {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        state
            .add_colony(Colony::new(ColonyId(1), SystemId(1), HouseId(1), 1_000_000, PlanetClass::Benign, ResourceRating::Abundant))
            .unwrap();
        let a = derive_player_state(&state, HouseId(1), act());
        let b = derive_player_state(&state, HouseId(1), act());
        assert_eq!(a, b);
    }

    #[test]
    fn surviving_scout_grants_scan_quality() {
        use ec4x_common::entities::ScoutAsset;
        use ec4x_common::ids::ScoutId;

        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        state.houses.add(House::new(HouseId(2), "B", (0, 0, 0))).unwrap();
        state
            .add_colony(Colony::new(ColonyId(2), SystemId(2), HouseId(2), 1_000_000, PlanetClass::Benign, ResourceRating::Abundant))
            .unwrap();
        state.scouts.add(ScoutAsset::new(ScoutId(1), HouseId(1), HouseId(2), SystemId(2), 0)).unwrap();

        let view = derive_player_state(&state, HouseId(1), act());
        let intel = view.colony_intel.iter().find(|i| i.colony == ColonyId(2)).unwrap();
        assert_eq!(intel.quality, IntelQuality::Scan);
        assert!(intel.estimated_population_units.is_some());
    }
}
