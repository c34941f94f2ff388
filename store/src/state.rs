//! `GameState`: the aggregate owner of every entity table and secondary
//! index (§4.A ownership model). Entities reference each other only by
//! id; every cross-entity relationship a reader needs goes through a
//! typed iterator here, and every indexed-field change goes through a
//! dedicated mutator that updates primary storage and the affected index
//! in one step.

use ec4x_common::entities::{
    Colony, Facility, Fleet, GroundUnit, House, OngoingEffect, PopulationTransit, Project, ScoutAsset, Ship, Squadron,
    System,
};
use ec4x_common::errors::CorruptionError;
use ec4x_common::ids::{ColonyId, FacilityId, FleetId, GroundUnitId, HouseId, ProjectId, ShipId, SquadronId, SystemId, TransitId};

use crate::indices::SecondaryIndex;
use crate::table::Table;

/// The full authoritative game state (§3, §4.A). `ongoing_effects` is a
/// flat list rather than an indexed table since it has no stable id of
/// its own and is always scanned in full once per phase.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub turn: u64,

    pub houses: Table<House>,
    pub systems: Table<System>,
    /// Private: `owner`/`system` are indexed fields (§4.A). External
    /// crates read via `colonies()`/the `colonies_*` iterators and
    /// mutate non-indexed fields via `with_colony_mut`; an owner or
    /// system change must go through `transfer_colony` instead.
    colonies: Table<Colony>,
    /// Private for the same reason as `colonies` (`owner`/`location`
    /// are indexed); use `fleets()`/`with_fleet_mut`/`relocate_fleet`.
    fleets: Table<Fleet>,
    pub squadrons: Table<Squadron>,
    pub ships: Table<Ship>,
    pub ground_units: Table<GroundUnit>,
    pub facilities: Table<Facility>,
    pub projects: Table<Project>,
    pub transits: Table<PopulationTransit>,
    pub ongoing_effects: Vec<OngoingEffect>,
    /// Planted espionage scouts. Scanned in full per Income phase like
    /// `ongoing_effects`, so it carries no secondary index.
    pub scouts: Table<ScoutAsset>,

    colonies_by_system: SecondaryIndex<SystemId, ColonyId>,
    colonies_by_owner: SecondaryIndex<HouseId, ColonyId>,
    fleets_by_system: SecondaryIndex<SystemId, FleetId>,
    fleets_by_owner: SecondaryIndex<HouseId, FleetId>,
    squadrons_by_fleet: SecondaryIndex<FleetId, SquadronId>,
    squadrons_by_owner: SecondaryIndex<HouseId, SquadronId>,
    ships_by_squadron: SecondaryIndex<SquadronId, ShipId>,
    ground_units_by_colony: SecondaryIndex<ColonyId, GroundUnitId>,
    facilities_by_colony: SecondaryIndex<ColonyId, FacilityId>,
    projects_by_facility: SecondaryIndex<FacilityId, ProjectId>,
    transits_by_owner: SecondaryIndex<HouseId, TransitId>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of every colony (§4.A). Mutation goes through
    /// `with_colony_mut` or a dedicated indexed mutator below.
    pub fn colonies(&self) -> &Table<Colony> {
        &self.colonies
    }

    /// Mutate one colony's non-indexed fields in place. Returns `None`
    /// if `id` doesn't resolve. Never reassign `owner` inside `f` —
    /// use `transfer_colony` so the owner index stays in sync.
    pub fn with_colony_mut<R>(&mut self, id: ColonyId, f: impl FnOnce(&mut Colony) -> R) -> Option<R> {
        self.colonies.get_mut(id).map(f)
    }

    /// Read-only view of every fleet (§4.A). Mutation goes through
    /// `with_fleet_mut` or a dedicated indexed mutator below.
    pub fn fleets(&self) -> &Table<Fleet> {
        &self.fleets
    }

    /// Mutate one fleet's non-indexed fields in place. Returns `None`
    /// if `id` doesn't resolve. Never reassign `location` inside `f` —
    /// use `relocate_fleet` so the system index stays in sync.
    pub fn with_fleet_mut<R>(&mut self, id: FleetId, f: impl FnOnce(&mut Fleet) -> R) -> Option<R> {
        self.fleets.get_mut(id).map(f)
    }

    // ---- Colony: indexed by system and by owner ----

    pub fn add_colony(&mut self, colony: Colony) -> Result<(), CorruptionError> {
        let (id, system, owner) = (colony.id, colony.system, colony.owner);
        self.colonies.add(colony)?;
        self.colonies_by_system.insert(system, id);
        self.colonies_by_owner.insert(owner, id);
        Ok(())
    }

    pub fn remove_colony(&mut self, id: ColonyId) -> Option<Colony> {
        let colony = self.colonies.remove(id)?;
        self.colonies_by_system.remove(colony.system, id);
        self.colonies_by_owner.remove(colony.owner, id);
        Some(colony)
    }

    /// Transfer a colony to a new owner, e.g. after a successful
    /// invasion (§4.E), updating the owner index in the same step as the
    /// field change.
    pub fn transfer_colony(&mut self, id: ColonyId, new_owner: HouseId) -> Result<(), CorruptionError> {
        let colony = self
            .colonies
            .get_mut(id)
            .ok_or_else(|| CorruptionError::IndexDesync(id.to_string()))?;
        let old_owner = colony.owner;
        colony.owner = new_owner;
        self.colonies_by_owner.rekey(old_owner, new_owner, id);
        Ok(())
    }

    pub fn colonies_in_system(&self, system: SystemId) -> impl Iterator<Item = &Colony> {
        self.colonies_by_system
            .get(system)
            .iter()
            .filter_map(move |id| self.colonies.get(*id))
    }

    pub fn colonies_of_house(&self, house: HouseId) -> impl Iterator<Item = &Colony> {
        self.colonies_by_owner
            .get(house)
            .iter()
            .filter_map(move |id| self.colonies.get(*id))
    }

    // ---- Fleet: indexed by system and by owner ----

    pub fn add_fleet(&mut self, fleet: Fleet) -> Result<(), CorruptionError> {
        let (id, location, owner) = (fleet.id, fleet.location, fleet.owner);
        self.fleets.add(fleet)?;
        self.fleets_by_system.insert(location, id);
        self.fleets_by_owner.insert(owner, id);
        Ok(())
    }

    pub fn remove_fleet(&mut self, id: FleetId) -> Option<Fleet> {
        let fleet = self.fleets.remove(id)?;
        self.fleets_by_system.remove(fleet.location, id);
        self.fleets_by_owner.remove(fleet.owner, id);
        Some(fleet)
    }

    /// Move a fleet to a new system (§4.D movement step), keeping the
    /// system index in sync.
    pub fn relocate_fleet(&mut self, id: FleetId, new_system: SystemId) -> Result<(), CorruptionError> {
        let fleet = self
            .fleets
            .get_mut(id)
            .ok_or_else(|| CorruptionError::IndexDesync(id.to_string()))?;
        let old_system = fleet.location;
        fleet.location = new_system;
        self.fleets_by_system.rekey(old_system, new_system, id);
        Ok(())
    }

    pub fn fleets_in_system(&self, system: SystemId) -> impl Iterator<Item = &Fleet> {
        self.fleets_by_system
            .get(system)
            .iter()
            .filter_map(move |id| self.fleets.get(*id))
    }

    pub fn fleets_of_house(&self, house: HouseId) -> impl Iterator<Item = &Fleet> {
        self.fleets_by_owner
            .get(house)
            .iter()
            .filter_map(move |id| self.fleets.get(*id))
    }

    // ---- Squadron: indexed by fleet and by owner ----

    pub fn add_squadron(&mut self, squadron: Squadron, fleet: FleetId) -> Result<(), CorruptionError> {
        let (id, owner) = (squadron.id, squadron.owner);
        self.squadrons.add(squadron)?;
        self.squadrons_by_fleet.insert(fleet, id);
        self.squadrons_by_owner.insert(owner, id);
        if let Some(f) = self.fleets.get_mut(fleet) {
            f.squadrons.push(id);
        }
        Ok(())
    }

    pub fn remove_squadron(&mut self, id: SquadronId, fleet: FleetId) -> Option<Squadron> {
        let squadron = self.squadrons.remove(id)?;
        self.squadrons_by_fleet.remove(fleet, id);
        self.squadrons_by_owner.remove(squadron.owner, id);
        if let Some(f) = self.fleets.get_mut(fleet) {
            f.squadrons.retain(|s| *s != id);
        }
        Some(squadron)
    }

    /// Move a squadron from one fleet to another (§6 `JoinFleet`
    /// priority), keeping both fleets' membership lists and the
    /// secondary index consistent in one step.
    pub fn reassign_squadron_fleet(
        &mut self,
        id: SquadronId,
        old_fleet: FleetId,
        new_fleet: FleetId,
    ) -> Result<(), CorruptionError> {
        self.squadrons
            .assert_contains(id)?;
        self.squadrons_by_fleet.rekey(old_fleet, new_fleet, id);
        if let Some(f) = self.fleets.get_mut(old_fleet) {
            f.squadrons.retain(|s| *s != id);
        }
        if let Some(f) = self.fleets.get_mut(new_fleet) {
            f.squadrons.push(id);
        }
        Ok(())
    }

    pub fn squadrons_in_fleet(&self, fleet: FleetId) -> impl Iterator<Item = &Squadron> {
        self.squadrons_by_fleet
            .get(fleet)
            .iter()
            .filter_map(move |id| self.squadrons.get(*id))
    }

    // ---- Ship: indexed by squadron ----

    pub fn add_ship(&mut self, ship: Ship, squadron: SquadronId) -> Result<(), CorruptionError> {
        let id = ship.id;
        self.ships.add(ship)?;
        self.ships_by_squadron.insert(squadron, id);
        Ok(())
    }

    pub fn remove_ship(&mut self, id: ShipId, squadron: SquadronId) -> Option<Ship> {
        let ship = self.ships.remove(id)?;
        self.ships_by_squadron.remove(squadron, id);
        Some(ship)
    }

    pub fn ships_in_squadron(&self, squadron: SquadronId) -> impl Iterator<Item = &Ship> {
        self.ships_by_squadron
            .get(squadron)
            .iter()
            .filter_map(move |id| self.ships.get(*id))
    }

    // ---- GroundUnit: indexed by colony ----

    pub fn add_ground_unit(&mut self, unit: GroundUnit) -> Result<(), CorruptionError> {
        let (id, colony) = (unit.id, unit.colony);
        self.ground_units.add(unit)?;
        self.ground_units_by_colony.insert(colony, id);
        Ok(())
    }

    pub fn remove_ground_unit(&mut self, id: GroundUnitId, colony: ColonyId) -> Option<GroundUnit> {
        let unit = self.ground_units.remove(id)?;
        self.ground_units_by_colony.remove(colony, id);
        Some(unit)
    }

    pub fn ground_units_at(&self, colony: ColonyId) -> impl Iterator<Item = &GroundUnit> {
        self.ground_units_by_colony
            .get(colony)
            .iter()
            .filter_map(move |id| self.ground_units.get(*id))
    }

    // ---- Facility: indexed by colony ----

    pub fn add_facility(&mut self, facility: Facility, colony: ColonyId) -> Result<(), CorruptionError> {
        let id = facility.id;
        self.facilities.add(facility)?;
        self.facilities_by_colony.insert(colony, id);
        if let Some(c) = self.colonies.get_mut(colony) {
            c.facilities.push(id);
        }
        Ok(())
    }

    pub fn facilities_at(&self, colony: ColonyId) -> impl Iterator<Item = &Facility> {
        self.facilities_by_colony
            .get(colony)
            .iter()
            .filter_map(move |id| self.facilities.get(*id))
    }

    // ---- Project: indexed by facility ----

    pub fn add_project(&mut self, project: Project) -> Result<(), CorruptionError> {
        let (id, facility) = (project.id, project.facility);
        self.projects_by_facility.insert(facility, id);
        self.projects.add(project)
    }

    pub fn remove_project(&mut self, id: ProjectId, facility: FacilityId) -> Option<Project> {
        let project = self.projects.remove(id)?;
        self.projects_by_facility.remove(facility, id);
        Some(project)
    }

    pub fn projects_at(&self, facility: FacilityId) -> impl Iterator<Item = &Project> {
        self.projects_by_facility
            .get(facility)
            .iter()
            .filter_map(move |id| self.projects.get(*id))
    }

    // ---- PopulationTransit: indexed by owner ----

    pub fn add_transit(&mut self, transit: PopulationTransit) -> Result<(), CorruptionError> {
        let (id, owner) = (transit.id, transit.owner);
        self.transits.add(transit)?;
        self.transits_by_owner.insert(owner, id);
        Ok(())
    }

    pub fn remove_transit(&mut self, id: TransitId, owner: HouseId) -> Option<PopulationTransit> {
        let transit = self.transits.remove(id)?;
        self.transits_by_owner.remove(owner, id);
        Some(transit)
    }

    pub fn transits_of_house(&self, house: HouseId) -> impl Iterator<Item = &PopulationTransit> {
        self.transits_by_owner
            .get(house)
            .iter()
            .filter_map(move |id| self.transits.get(*id))
    }

    /// Active (non-eliminated) houses, the only ones the resolver
    /// accepts orders from or scores in end-of-turn checks (§8 Invariant
    /// 11).
    pub fn active_houses(&self) -> impl Iterator<Item = &House> {
        self.houses.iter().filter(|h| !h.eliminated)
    }

    /// Full store-invariant sweep (§8 Invariant 1): every id present in a
    /// secondary index resolves in its owning primary table. Run after a
    /// batch of mutations in tests and at phase boundaries in the
    /// resolver; a failure here means the game is quarantined (§7
    /// Corruption).
    pub fn assert_indices_consistent(&self) -> Result<(), CorruptionError> {
        for colony in self.colonies.iter() {
            if !self.colonies_by_system.get(colony.system).contains(&colony.id) {
                return Err(CorruptionError::IndexDesync(colony.id.to_string()));
            }
        }
        for fleet in self.fleets.iter() {
            for squadron_id in &fleet.squadrons {
                self.squadrons.assert_contains(*squadron_id)?;
            }
        }
        for squadron in self.squadrons.iter() {
            for ship_id in squadron.all_ships() {
                self.ships.assert_contains(ship_id)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec4x_common::enums::{PlanetClass, ResourceRating, SquadronType};

    fn system(id: u32) -> System {
        System::new(SystemId(id), ec4x_common::entities::HexCoord::new(0, 0))
    }

    #[test]
    fn relocate_fleet_moves_between_system_buckets() {
        let mut state = GameState::new();
        state.systems.add(system(1)).unwrap();
        state.systems.add(system(2)).unwrap();
        state
            .add_fleet(Fleet::new(FleetId(1), HouseId(1), SystemId(1)))
            .unwrap();
        assert_eq!(state.fleets_in_system(SystemId(1)).count(), 1);
        state.relocate_fleet(FleetId(1), SystemId(2)).unwrap();
        assert_eq!(state.fleets_in_system(SystemId(1)).count(), 0);
        assert_eq!(state.fleets_in_system(SystemId(2)).count(), 1);
    }

    #[test]
    fn transfer_colony_moves_owner_index() {
        let mut state = GameState::new();
        state
            .add_colony(Colony::new(
                ColonyId(1),
                SystemId(1),
                HouseId(1),
                1_000_000,
                PlanetClass::Benign,
                ResourceRating::Abundant,
            ))
            .unwrap();
        assert_eq!(state.colonies_of_house(HouseId(1)).count(), 1);
        state.transfer_colony(ColonyId(1), HouseId(2)).unwrap();
        assert_eq!(state.colonies_of_house(HouseId(1)).count(), 0);
        assert_eq!(state.colonies_of_house(HouseId(2)).count(), 1);
    }

    #[test]
    fn squadron_reassignment_updates_both_fleets() {
        let mut state = GameState::new();
        state
            .add_fleet(Fleet::new(FleetId(1), HouseId(1), SystemId(1)))
            .unwrap();
        state
            .add_fleet(Fleet::new(FleetId(2), HouseId(1), SystemId(1)))
            .unwrap();
        state
            .add_squadron(
                Squadron::new(SquadronId(1), HouseId(1), SystemId(1), SquadronType::Combat, ShipId(1)),
                FleetId(1),
            )
            .unwrap();
        state
            .reassign_squadron_fleet(SquadronId(1), FleetId(1), FleetId(2))
            .unwrap();
        assert!(state.fleets.get(FleetId(1)).unwrap().squadrons.is_empty());
        assert_eq!(state.fleets.get(FleetId(2)).unwrap().squadrons, vec![SquadronId(1)]);
        assert_eq!(state.squadrons_in_fleet(FleetId(2)).count(), 1);
    }
}
