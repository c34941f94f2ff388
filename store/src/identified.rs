//! `Identified` impls wiring the `ec4x-common` entity records into the
//! generic `Table` container.

use ec4x_common::entities::{
    Colony, Facility, Fleet, GroundUnit, House, PopulationTransit, Project, ScoutAsset, Ship, Squadron, System,
};
use ec4x_common::ids::{
    ColonyId, FacilityId, FleetId, GroundUnitId, HouseId, ProjectId, ScoutId, ShipId, SquadronId, SystemId, TransitId,
};

use crate::table::Identified;

impl Identified for House {
    type Id = HouseId;
    fn id(&self) -> HouseId {
        self.id
    }
}

impl Identified for System {
    type Id = SystemId;
    fn id(&self) -> SystemId {
        self.id
    }
}

impl Identified for Colony {
    type Id = ColonyId;
    fn id(&self) -> ColonyId {
        self.id
    }
}

impl Identified for Fleet {
    type Id = FleetId;
    fn id(&self) -> FleetId {
        self.id
    }
}

impl Identified for Squadron {
    type Id = SquadronId;
    fn id(&self) -> SquadronId {
        self.id
    }
}

impl Identified for Ship {
    type Id = ShipId;
    fn id(&self) -> ShipId {
        self.id
    }
}

impl Identified for GroundUnit {
    type Id = GroundUnitId;
    fn id(&self) -> GroundUnitId {
        self.id
    }
}

impl Identified for Facility {
    type Id = FacilityId;
    fn id(&self) -> FacilityId {
        self.id
    }
}

impl Identified for PopulationTransit {
    type Id = TransitId;
    fn id(&self) -> TransitId {
        self.id
    }
}

impl Identified for Project {
    type Id = ProjectId;
    fn id(&self) -> ProjectId {
        self.id
    }
}

impl Identified for ScoutAsset {
    type Id = ScoutId;
    fn id(&self) -> ScoutId {
        self.id
    }
}
