//! The `Colony` entity (§3): a populated, owned world with its economy,
//! construction/repair queues, and facility attachments.

use serde::{Deserialize, Serialize};

use crate::constants::{SOULS_PER_PTU, SOULS_PER_PU};
use crate::enums::{PlanetClass, ResourceRating};
use crate::ids::{ColonyId, FacilityId, GroundUnitId, HouseId, ProjectId, SquadronId, SystemId};

/// A capacity violation in progress (§3): the colony exceeds a rule-book
/// limit and has `grace_turns_remaining` turns before enforcement kicks
/// in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityViolation {
    pub kind: String,
    pub grace_turns_remaining: u32,
}

/// Blockade status (§3): whether the colony is currently blockaded, by
/// whom, and for how many consecutive turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockadeState {
    pub blockaded: bool,
    pub attackers: Vec<HouseId>,
    pub consecutive_turns: u32,
}

/// Per-colony auto-management toggles a house can leave on standing
/// orders (§3, §4.F).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoSettings {
    pub auto_tax: bool,
    pub auto_repair: bool,
    pub auto_build_industrial: bool,
}

/// A populated world (§3). Population is tracked in raw souls; PU/PTU are
/// derived, never stored redundantly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    pub id: ColonyId,
    pub system: SystemId,
    pub owner: HouseId,
    pub souls: u64,
    pub infrastructure: u8,
    pub industrial_units: u32,
    pub planet_class: PlanetClass,
    pub resource_rating: ResourceRating,
    pub construction_queue: Vec<ProjectId>,
    pub repair_queue: Vec<ProjectId>,
    pub active_terraform_project: Option<ProjectId>,
    pub tax_rate_percent: u8,
    pub infrastructure_damage_ratio: f64,
    pub facilities: Vec<FacilityId>,
    pub unassigned_squadrons: Vec<SquadronId>,
    pub ground_units: Vec<GroundUnitId>,
    pub blockade: BlockadeState,
    pub capacity_violation: Option<CapacityViolation>,
    pub auto_settings: AutoSettings,
}

impl Colony {
    pub fn new(
        id: ColonyId,
        system: SystemId,
        owner: HouseId,
        souls: u64,
        planet_class: PlanetClass,
        resource_rating: ResourceRating,
    ) -> Self {
        Self {
            id,
            system,
            owner,
            souls,
            infrastructure: 1,
            industrial_units: 0,
            planet_class,
            resource_rating,
            construction_queue: Vec::new(),
            repair_queue: Vec::new(),
            active_terraform_project: None,
            tax_rate_percent: 0,
            infrastructure_damage_ratio: 0.0,
            facilities: Vec::new(),
            unassigned_squadrons: Vec::new(),
            ground_units: Vec::new(),
            blockade: BlockadeState::default(),
            capacity_violation: None,
            auto_settings: AutoSettings::default(),
        }
    }

    /// Population Units, derived from souls (GLOSSARY: PU).
    pub fn population_units(&self) -> u64 {
        self.souls / SOULS_PER_PU
    }

    /// Population Transfer Units available to ship out, derived from
    /// souls (GLOSSARY: PTU).
    pub fn population_transfer_units(&self) -> u64 {
        self.souls / SOULS_PER_PTU
    }

    /// Whether the colony is populous enough to accept inbound transfers
    /// or host construction (§3 invariant).
    pub fn is_functional(&self) -> bool {
        self.souls >= crate::constants::MIN_FUNCTIONAL_SOULS
    }

    /// Gross Colony Output before blockade/damage adjustments: PU × raw
    /// production index + IU × energy modifier (§4.F). The energy
    /// modifier is taken as 1 here; callers scale by tech-derived energy
    /// bonuses separately.
    pub fn raw_gco(&self) -> f64 {
        self.population_units() as f64 * self.planet_class.raw_production_index() as f64
            + self.industrial_units as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Colony {
        Colony::new(
            ColonyId(1),
            SystemId(1),
            HouseId(1),
            SOULS_PER_PU * 3,
            PlanetClass::Benign,
            ResourceRating::Abundant,
        )
    }

    #[test]
    fn population_units_derived_from_souls() {
        let colony = sample();
        assert_eq!(colony.population_units(), 3);
    }

    #[test]
    fn founding_souls_are_functional() {
        let mut colony = sample();
        colony.souls = SOULS_PER_PTU;
        assert!(colony.is_functional());
        colony.souls = SOULS_PER_PTU - 1;
        assert!(!colony.is_functional());
    }
}
