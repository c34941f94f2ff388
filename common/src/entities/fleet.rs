//! The `Fleet` entity (§3): an ordered collection of squadrons under one
//! standing order and mission state.

use serde::{Deserialize, Serialize};

use crate::enums::{FleetOrderPriority, MissionState};
use crate::ids::{FleetId, HouseId, SquadronId, SystemId};

/// A persistent standing order a fleet carries between turns (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandingOrder {
    MoveTo { destination: SystemId, priority: FleetOrderPriority },
    Patrol { route: Vec<SystemId> },
    SeekHome,
}

/// A fleet: house, location, ordered squadron membership, mission state,
/// and ROE rating (§3). Empty fleets are destroyed at the end of any
/// phase that made them empty — enforced by the entity-ops layer, not
/// represented here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub owner: HouseId,
    pub location: SystemId,
    pub squadrons: Vec<SquadronId>,
    pub standing_order: Option<StandingOrder>,
    pub mission_state: MissionState,
    pub roe_rating: u8,
    pub is_homeworld_defender: bool,
}

impl Fleet {
    pub fn new(id: FleetId, owner: HouseId, location: SystemId) -> Self {
        Self {
            id,
            owner,
            location,
            squadrons: Vec::new(),
            standing_order: None,
            mission_state: MissionState::Idle,
            roe_rating: 5,
            is_homeworld_defender: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.squadrons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fleet_is_empty_and_idle() {
        let fleet = Fleet::new(FleetId(1), HouseId(1), SystemId(1));
        assert!(fleet.is_empty());
        assert_eq!(fleet.mission_state, MissionState::Idle);
    }
}
