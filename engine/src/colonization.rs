//! ETAC consumption and colony founding (§4.G).

use ec4x_common::constants::COLONY_FOUNDING_SOULS;
use ec4x_common::entities::Colony;
use ec4x_common::enums::{PlanetClass, ResourceRating, ShipClass};
use ec4x_common::errors::CorruptionError;
use ec4x_common::ids::{ColonyId, HouseId, SquadronId, SystemId};
use ec4x_store::GameState;

use crate::events::TurnEvent;

/// Consume the ETAC flagship of `squadron` to found a colony at `system`,
/// seeding it at `COLONY_FOUNDING_SOULS` (§8 S1). The squadron is removed
/// entirely: an ETAC squadron carries no escorts worth preserving once
/// its cargo hull is spent.
pub fn found_colony(
    state: &mut GameState,
    squadron: SquadronId,
    fleet: ec4x_common::ids::FleetId,
    colony_id: ColonyId,
    system: SystemId,
    owner: HouseId,
    planet_class: PlanetClass,
    resource_rating: ResourceRating,
) -> Result<TurnEvent, CorruptionError> {
    let flagship_class = state
        .squadrons
        .get(squadron)
        .map(|s| s.flagship)
        .and_then(|ship_id| state.ships.get(ship_id))
        .map(|ship| ship.class);
    if flagship_class != Some(ShipClass::Etac) {
        return Err(CorruptionError::InvariantViolated(format!(
            "{squadron} is not an ETAC squadron"
        )));
    }

    state.remove_squadron(squadron, fleet);
    state.add_colony(Colony::new(
        colony_id,
        system,
        owner,
        COLONY_FOUNDING_SOULS,
        planet_class,
        resource_rating,
    ))?;

    Ok(TurnEvent::ColonyEstablished {
        colony: colony_id,
        system,
        owner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec4x_common::entities::{Fleet, Ship, Squadron};
    use ec4x_common::enums::SquadronType;
    use ec4x_common::ids::{FleetId, ShipId};

    fn setup() -> (GameState, SquadronId, FleetId) {
        let mut state = GameState::new();
        state
            .systems
            .add(ec4x_common::entities::System::new(
                SystemId(1),
                ec4x_common::entities::HexCoord::new(0, 0),
            ))
            .unwrap();
        state
            .add_fleet(Fleet::new(FleetId(1), HouseId(1), SystemId(1)))
            .unwrap();
        state.ships.add(Ship::new(ShipId(1), ShipClass::Etac, 1)).unwrap();
        state
            .add_squadron(
                Squadron::new(SquadronId(1), HouseId(1), SystemId(1), SquadronType::Spacelift, ShipId(1)),
                FleetId(1),
            )
            .unwrap();
        (state, SquadronId(1), FleetId(1))
    }

    #[test]
    fn founding_consumes_etac_and_creates_colony() {
        let (mut state, squadron, fleet) = setup();
        let event = found_colony(
            &mut state,
            squadron,
            fleet,
            ColonyId(1),
            SystemId(1),
            HouseId(1),
            PlanetClass::Benign,
            ResourceRating::Abundant,
        )
        .unwrap();
        assert!(matches!(event, TurnEvent::ColonyEstablished { .. }));
        assert!(state.squadrons.get(squadron).is_none());
        assert_eq!(state.colonies().get(ColonyId(1)).unwrap().souls, COLONY_FOUNDING_SOULS);
    }

    #[test]
    fn non_etac_squadron_rejected() {
        let mut state = GameState::new();
        state
            .add_fleet(Fleet::new(FleetId(1), HouseId(1), SystemId(1)))
            .unwrap();
        state.ships.add(Ship::new(ShipId(2), ShipClass::Frigate, 1)).unwrap();
        state
            .add_squadron(
                Squadron::new(SquadronId(2), HouseId(1), SystemId(1), SquadronType::Combat, ShipId(2)),
                FleetId(1),
            )
            .unwrap();
        let result = found_colony(
            &mut state,
            SquadronId(2),
            FleetId(1),
            ColonyId(1),
            SystemId(1),
            HouseId(1),
            PlanetClass::Benign,
            ResourceRating::Abundant,
        );
        assert!(result.is_err());
    }
}
