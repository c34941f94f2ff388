//! Construction-dock order dispatch: queueing build/repair/terraform
//! projects and scrapping squadrons for a partial PP refund (§6, §4.F).

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::constants::{
    BUILDING_PROJECT_PP_COST, INDUSTRIAL_PROJECT_PP_COST, REPAIR_PROJECT_PP_COST_PER_SHIP, SCRAP_REFUND_RATIO,
    TERRAFORM_PROJECT_PP_COST,
};
use ec4x_common::entities::{Project, ProjectItem};
use ec4x_common::enums::{ProjectKind, ShipClass};
use ec4x_common::errors::ValidationError;
use ec4x_common::ids::{ColonyId, FacilityId, FleetId, HouseId, ProjectId};
use ec4x_common::orders::{BuildCommand, RepairCommand, ScrapCommand, TerraformCommand};
use ec4x_store::GameState;

use crate::events::TurnEvent;

fn next_project_id(state: &GameState) -> ProjectId {
    ProjectId(state.projects.iter().map(|p| p.id.0).max().unwrap_or(0) + 1)
}

fn colony_owning_facility(state: &GameState, facility: FacilityId) -> Option<(ColonyId, HouseId)> {
    state.colonies().iter().find(|c| c.facilities.contains(&facility)).map(|c| (c.id, c.owner))
}

/// Place a new project on `facility`'s active docks if one is free, or
/// at the back of its FIFO queue otherwise (§4.F).
fn enqueue(
    state: &mut GameState,
    colony: ColonyId,
    facility: FacilityId,
    kind: ProjectKind,
    item: ProjectItem,
    pp_total: u64,
) -> Result<TurnEvent, ValidationError> {
    let project_id = next_project_id(state);
    let project = Project::new(project_id, kind, item, pp_total, facility);
    state.add_project(project).map_err(|_| ValidationError::FacilityNotFound(facility))?;

    let Some(f) = state.facilities.get_mut(facility) else {
        return Err(ValidationError::FacilityNotFound(facility));
    };
    if f.has_free_dock() {
        f.active_projects.push(project_id);
    } else {
        f.queue.push(project_id);
    }

    Ok(TurnEvent::ProjectQueued { colony, facility, kind })
}

/// Queue a construction order submitted against a named facility (§6
/// `BuildCommand`). `Repair` projects carry a target fleet and are
/// submitted through `RepairCommand` instead.
pub fn queue_build(
    state: &mut GameState,
    house: HouseId,
    config: &AuthoritativeConfig,
    cmd: &BuildCommand,
) -> Result<TurnEvent, ValidationError> {
    let Some((colony, owner)) = colony_owning_facility(state, cmd.facility) else {
        return Err(ValidationError::FacilityNotFound(cmd.facility));
    };
    if owner != house {
        return Err(ValidationError::NotColonyOwner(house, colony));
    }
    if !cmd.facility.kind.hosts_construction() {
        return Err(ValidationError::NoDockCapacity(colony));
    }

    let (item, pp_total) = match cmd.kind {
        ProjectKind::Ship => {
            let class = ShipClass::from_tag(&cmd.item_tag).ok_or_else(|| ValidationError::InvalidItemTag(cmd.item_tag.clone()))?;
            let cost = config.sections.ship_stats.get(&class).map(|s| s.build_cost_pp as u64).unwrap_or(0);
            (ProjectItem::Ship { class }, cost)
        }
        ProjectKind::Building => {
            let kind = ec4x_common::ids::FacilityKind::from_tag(&cmd.item_tag)
                .ok_or_else(|| ValidationError::InvalidItemTag(cmd.item_tag.clone()))?;
            (ProjectItem::Building { facility: kind }, BUILDING_PROJECT_PP_COST)
        }
        ProjectKind::Industrial => (ProjectItem::Industrial, INDUSTRIAL_PROJECT_PP_COST),
        ProjectKind::Terraform => (ProjectItem::Terraform, TERRAFORM_PROJECT_PP_COST),
        ProjectKind::Repair => return Err(ValidationError::InvalidItemTag(cmd.item_tag.clone())),
    };

    enqueue(state, colony, cmd.facility, cmd.kind, item, pp_total)
}

/// Queue a fleet repair order against a drydock (§6 `RepairCommand`).
/// Cost scales with the number of crippled ships in the fleet.
pub fn queue_repair(state: &mut GameState, house: HouseId, cmd: &RepairCommand) -> Result<TurnEvent, ValidationError> {
    let Some((colony, owner)) = colony_owning_facility(state, cmd.facility) else {
        return Err(ValidationError::FacilityNotFound(cmd.facility));
    };
    if owner != house {
        return Err(ValidationError::NotColonyOwner(house, colony));
    }
    if !cmd.facility.kind.hosts_repair() {
        return Err(ValidationError::NoDockCapacity(colony));
    }
    let Some(fleet) = state.fleets().get(cmd.fleet) else {
        return Err(ValidationError::FleetNotFound(cmd.fleet));
    };
    if fleet.owner != house {
        return Err(ValidationError::NotFleetOwner(house, cmd.fleet));
    }

    let crippled_count: u64 = state
        .squadrons_in_fleet(cmd.fleet)
        .flat_map(|squadron| state.ships_in_squadron(squadron.id))
        .filter(|ship| ship.crippled)
        .count() as u64;
    let pp_total = REPAIR_PROJECT_PP_COST_PER_SHIP * crippled_count.max(1);

    enqueue(state, colony, cmd.facility, ProjectKind::Repair, ProjectItem::Repair { fleet: cmd.fleet }, pp_total)
}

/// Queue a terraform order against a colony (§6 `TerraformCommand`),
/// picking any facility at the colony that hosts construction docks.
pub fn queue_terraform(state: &mut GameState, house: HouseId, cmd: &TerraformCommand) -> Result<TurnEvent, ValidationError> {
    let Some(colony) = state.colonies().get(cmd.colony) else {
        return Err(ValidationError::ColonyNotFound(cmd.colony));
    };
    if colony.owner != house {
        return Err(ValidationError::NotColonyOwner(house, cmd.colony));
    }
    if colony.active_terraform_project.is_some() {
        return Err(ValidationError::TerraformAlreadyInProgress(cmd.colony));
    }
    let Some(facility_id) = state.facilities_at(cmd.colony).find(|f| f.id.kind.hosts_construction()).map(|f| f.id) else {
        return Err(ValidationError::NoDockCapacity(cmd.colony));
    };

    let project_id_before = next_project_id(state);
    let event = enqueue(state, cmd.colony, facility_id, ProjectKind::Terraform, ProjectItem::Terraform, TERRAFORM_PROJECT_PP_COST)?;
    state.with_colony_mut(cmd.colony, |c| {
        c.active_terraform_project = Some(project_id_before);
    });
    Ok(event)
}

fn squadron_fleet(state: &GameState, squadron: ec4x_common::ids::SquadronId) -> FleetId {
    state
        .fleets()
        .iter()
        .find(|f| f.squadrons.contains(&squadron))
        .map(|f| f.id)
        .unwrap_or(FleetId::NONE)
}

/// Scrap a squadron for a partial PP refund to its owner's treasury
/// (§6 `ScrapCommand`).
pub fn scrap_squadron(
    state: &mut GameState,
    house: HouseId,
    config: &AuthoritativeConfig,
    cmd: &ScrapCommand,
) -> Result<TurnEvent, ValidationError> {
    let Some(squadron) = state.squadrons.get(cmd.squadron) else {
        return Err(ValidationError::SquadronNotFound(cmd.squadron));
    };
    if squadron.owner != house {
        return Err(ValidationError::NotSquadronOwner(house, cmd.squadron));
    }

    let ship_ids: Vec<_> = state.ships_in_squadron(cmd.squadron).map(|s| s.id).collect();
    let refund: i64 = ship_ids
        .iter()
        .filter_map(|id| state.ships.get(*id))
        .filter_map(|ship| config.sections.ship_stats.get(&ship.class))
        .map(|stats| (stats.build_cost_pp as f64 * SCRAP_REFUND_RATIO) as i64)
        .sum();

    let fleet = squadron_fleet(state, cmd.squadron);
    for ship_id in &ship_ids {
        state.remove_ship(*ship_id, cmd.squadron);
    }
    state.remove_squadron(cmd.squadron, fleet);
    if fleet.is_none() {
        let colony = state.colonies().iter().find(|c| c.unassigned_squadrons.contains(&cmd.squadron)).map(|c| c.id);
        if let Some(colony) = colony {
            state.with_colony_mut(colony, |c| {
                c.unassigned_squadrons.retain(|s| *s != cmd.squadron);
            });
        }
    }

    if let Some(h) = state.houses.get_mut(house) {
        h.treasury += refund;
    }

    Ok(TurnEvent::SquadronScrapped { house, squadron: cmd.squadron, refund })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec4x_common::entities::{Colony, Facility, Fleet, House, Ship, Squadron};
    use ec4x_common::enums::{PlanetClass, ResourceRating, SquadronType};
    use ec4x_common::ids::{FacilityKind, ShipId, SquadronId, SystemId};

    fn base_state() -> (GameState, ColonyId, FacilityId) {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        state
            .systems
            .add(ec4x_common::entities::System::new(SystemId(1), ec4x_common::entities::HexCoord::new(0, 0)))
            .unwrap();
        let colony = ColonyId(1);
        state
            .add_colony(Colony::new(colony, SystemId(1), HouseId(1), 5_000_000, PlanetClass::Benign, ResourceRating::Abundant))
            .unwrap();
        let facility_id = FacilityId::new(FacilityKind::Shipyard, 0);
        state.add_facility(Facility::new(facility_id, 1), colony).unwrap();
        (state, colony, facility_id)
    }

    #[test]
    fn build_command_queues_industrial_project_into_free_dock() {
        let (mut state, colony, facility_id) = base_state();
        let config = AuthoritativeConfig::default_for_tests();
        let cmd = BuildCommand { facility: facility_id, kind: ProjectKind::Industrial, item_tag: String::new() };
        let event = queue_build(&mut state, HouseId(1), &config, &cmd).unwrap();
        assert!(matches!(event, TurnEvent::ProjectQueued { .. }));
        let facility = state.facilities.get(facility_id).unwrap();
        assert_eq!(facility.active_projects.len(), 1);
        assert!(state.colonies().get(colony).is_some());
    }

    #[test]
    fn build_command_rejects_wrong_owner() {
        let (mut state, _colony, facility_id) = base_state();
        let config = AuthoritativeConfig::default_for_tests();
        let cmd = BuildCommand { facility: facility_id, kind: ProjectKind::Industrial, item_tag: String::new() };
        let result = queue_build(&mut state, HouseId(2), &config, &cmd);
        assert!(result.is_err());
    }

    #[test]
    fn build_command_rejects_unknown_ship_tag() {
        let (mut state, _colony, facility_id) = base_state();
        let config = AuthoritativeConfig::default_for_tests();
        let cmd = BuildCommand { facility: facility_id, kind: ProjectKind::Ship, item_tag: "NotAClass".into() };
        let result = queue_build(&mut state, HouseId(1), &config, &cmd);
        assert_eq!(result, Err(ValidationError::InvalidItemTag("NotAClass".into())));
    }

    #[test]
    fn scrap_removes_squadron_and_refunds_owner() {
        let (mut state, _colony, _facility_id) = base_state();
        state.add_fleet(Fleet::new(ec4x_common::ids::FleetId(1), HouseId(1), SystemId(1))).unwrap();
        state.ships.add(Ship::new(ShipId(1), ShipClass::Frigate, 1)).unwrap();
        state
            .add_squadron(
                Squadron::new(SquadronId(1), HouseId(1), SystemId(1), SquadronType::Combat, ShipId(1)),
                ec4x_common::ids::FleetId(1),
            )
            .unwrap();
        let config = AuthoritativeConfig::default_for_tests();
        let cmd = ScrapCommand { squadron: SquadronId(1) };
        let event = scrap_squadron(&mut state, HouseId(1), &config, &cmd).unwrap();
        assert!(matches!(event, TurnEvent::SquadronScrapped { .. }));
        assert!(state.squadrons.get(SquadronId(1)).is_none());
        assert!(state.ships.get(ShipId(1)).is_none());
    }

    #[test]
    fn scrap_rejects_non_owner() {
        let (mut state, _colony, _facility_id) = base_state();
        state.add_fleet(Fleet::new(ec4x_common::ids::FleetId(1), HouseId(1), SystemId(1))).unwrap();
        state.ships.add(Ship::new(ShipId(1), ShipClass::Frigate, 1)).unwrap();
        state
            .add_squadron(
                Squadron::new(SquadronId(1), HouseId(1), SystemId(1), SquadronType::Combat, ShipId(1)),
                ec4x_common::ids::FleetId(1),
            )
            .unwrap();
        let config = AuthoritativeConfig::default_for_tests();
        let cmd = ScrapCommand { squadron: SquadronId(1) };
        let result = scrap_squadron(&mut state, HouseId(2), &config, &cmd);
        assert_eq!(result, Err(ValidationError::NotSquadronOwner(HouseId(2), SquadronId(1))));
    }
}
