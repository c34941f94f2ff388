//! Command phase (§4.D step 3): apply each house's order packet.
//! Per §7, a `ValidationError` on one order discards that order and
//! continues with the rest of the packet rather than aborting.

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::enums::{FleetOrderPriority, PlanetClass, ResourceRating, ShipClass};
use ec4x_common::errors::ValidationError;
use ec4x_common::ids::{ColonyId, FleetId, HouseId, SquadronId, SystemId};
use ec4x_common::orders::{CommandPacket, FleetCommand};
use ec4x_store::GameState;

use crate::colonization;
use crate::construction;
use crate::diplomacy;
use crate::events::TurnEvent;
use crate::research;
use crate::transfer;

/// Apply one house's packet against `state`, returning the events raised
/// and the validation errors of orders that were discarded.
pub fn apply_packet(
    state: &mut GameState,
    config: &AuthoritativeConfig,
    packet: &CommandPacket,
) -> (Vec<TurnEvent>, Vec<ValidationError>) {
    let mut events = Vec::new();
    let mut rejected = Vec::new();

    if packet.turn != state.turn {
        rejected.push(ValidationError::WrongTurn { declared: packet.turn, actual: state.turn });
        return (events, rejected);
    }
    if state.houses.get(packet.house).map(|h| h.eliminated).unwrap_or(true) {
        rejected.push(ValidationError::HouseEliminated(packet.house));
        return (events, rejected);
    }

    for cmd in &packet.fleet_commands {
        let (fleet_owner, fleet_location) = match state.fleets().get(cmd.fleet) {
            Some(fleet) => (fleet.owner, fleet.location),
            None => {
                rejected.push(ValidationError::FleetNotFound(cmd.fleet));
                continue;
            }
        };
        if fleet_owner != packet.house {
            rejected.push(ValidationError::NotFleetOwner(packet.house, cmd.fleet));
            continue;
        }

        if cmd.priority == FleetOrderPriority::Colonize {
            match try_colonize(state, packet.house, cmd, fleet_location) {
                Ok(event) => events.push(event),
                Err(e) => rejected.push(e),
            }
            continue;
        }

        state.with_fleet_mut(cmd.fleet, |fleet| {
            fleet.standing_order = match cmd.priority {
                FleetOrderPriority::Move => cmd.destination.map(|destination| {
                    ec4x_common::entities::StandingOrder::MoveTo { destination, priority: cmd.priority }
                }),
                FleetOrderPriority::Patrol => Some(ec4x_common::entities::StandingOrder::Patrol {
                    route: cmd.patrol_route.clone(),
                }),
                FleetOrderPriority::SeekHome => Some(ec4x_common::entities::StandingOrder::SeekHome),
                FleetOrderPriority::Colonize | FleetOrderPriority::JoinFleet => fleet.standing_order.clone(),
            };
        });
    }

    for cmd in &packet.colony_management {
        let owner = match state.colonies().get(cmd.colony) {
            Some(colony) => colony.owner,
            None => {
                rejected.push(ValidationError::ColonyNotFound(cmd.colony));
                continue;
            }
        };
        if owner != packet.house {
            rejected.push(ValidationError::NotColonyOwner(packet.house, cmd.colony));
            continue;
        }
        state.with_colony_mut(cmd.colony, |colony| {
            if let Some(rate) = cmd.tax_rate_percent {
                colony.tax_rate_percent = rate.min(100);
            }
            if let Some(v) = cmd.auto_tax {
                colony.auto_settings.auto_tax = v;
            }
            if let Some(v) = cmd.auto_repair {
                colony.auto_settings.auto_repair = v;
            }
            if let Some(v) = cmd.auto_build_industrial {
                colony.auto_settings.auto_build_industrial = v;
            }
        });
    }

    if let Some(house) = state.houses.get_mut(packet.house) {
        let espionage_investment = packet.ebp_investment + packet.cip_investment;
        let treasury = house.treasury.max(0) as u64;
        if espionage_investment > treasury {
            rejected.push(ValidationError::ResearchOverAllocated);
        } else {
            house.espionage_budget.ebp_points += packet.ebp_investment;
            house.espionage_budget.cip_points += packet.cip_investment;
            house.treasury -= espionage_investment as i64;
            let pp_for_research = treasury - espionage_investment;
            research::accumulate_research(house, pp_for_research, &packet.research_allocation);
        }
    }

    for cmd in &packet.population_transfers {
        match transfer::dispatch_transfer(state, packet.house, cmd) {
            Ok(event) => events.push(event),
            Err(e) => rejected.push(e),
        }
    }

    for cmd in &packet.build_commands {
        match construction::queue_build(state, packet.house, config, cmd) {
            Ok(event) => events.push(event),
            Err(e) => rejected.push(e),
        }
    }

    for cmd in &packet.repair_commands {
        match construction::queue_repair(state, packet.house, cmd) {
            Ok(event) => events.push(event),
            Err(e) => rejected.push(e),
        }
    }

    for cmd in &packet.scrap_commands {
        match construction::scrap_squadron(state, packet.house, config, cmd) {
            Ok(event) => events.push(event),
            Err(e) => rejected.push(e),
        }
    }

    for cmd in &packet.terraform_commands {
        match construction::queue_terraform(state, packet.house, cmd) {
            Ok(event) => events.push(event),
            Err(e) => rejected.push(e),
        }
    }

    if let Some(event) = apply_diplomatic_command(state, packet, config) {
        events.push(event);
    }

    (events, rejected)
}

fn apply_diplomatic_command(
    state: &mut GameState,
    packet: &CommandPacket,
    config: &AuthoritativeConfig,
) -> Option<TurnEvent> {
    use ec4x_common::orders::DiplomaticCommand;

    let command = packet.diplomatic_command.as_ref()?;
    match command {
        DiplomaticCommand::Propose { to, .. } => {
            if let Some(house) = state.houses.get_mut(packet.house) {
                diplomacy::propose_pact(house, *to, packet.turn);
            }
            None
        }
        DiplomaticCommand::Break { with } => {
            let penalty = config.sections.prestige_values.pact_break_penalty;
            let (breaker, victim) = state.houses.get_pair_mut(packet.house, *with)?;
            Some(diplomacy::break_pact(breaker, victim, packet.turn, penalty))
        }
        DiplomaticCommand::Accept { from } => {
            let (target, proposer) = state.houses.get_pair_mut(packet.house, *from)?;
            diplomacy::accept_proposal(target, proposer)
        }
        DiplomaticCommand::Reject { from } => {
            let (target, proposer) = state.houses.get_pair_mut(packet.house, *from)?;
            diplomacy::reject_proposal(target, proposer);
            None
        }
    }
}

/// End-of-Command-phase resolution (§4.J, §9 Open Question 1): every
/// pending proposal raised this turn auto-forms a pact unless its target
/// already resolved it via an explicit `Accept`/`Reject` (in which case
/// it is no longer pending) or has since turned dishonored/isolated.
pub fn finalize_diplomacy(state: &mut GameState, turn: u64) -> Vec<TurnEvent> {
    let mut events = Vec::new();
    let house_ids: Vec<_> = state.houses.iter().map(|h| h.id).collect();
    for &proposer_id in &house_ids {
        let targets: Vec<_> = state
            .houses
            .get(proposer_id)
            .map(|h| h.diplomacy.pending_proposals.iter().filter(|p| p.raised_turn == turn).map(|p| p.to).collect())
            .unwrap_or_default();
        for target_id in targets {
            if let Some((proposer, target)) = state.houses.get_pair_mut(proposer_id, target_id) {
                events.extend(diplomacy::resolve_pending_proposals(proposer, target, turn));
            }
        }
    }
    events
}

fn find_etac_squadron(state: &GameState, fleet: FleetId) -> Option<SquadronId> {
    state
        .squadrons_in_fleet(fleet)
        .find(|squadron| {
            state
                .ships
                .get(squadron.flagship)
                .map(|ship| ship.class == ShipClass::Etac)
                .unwrap_or(false)
        })
        .map(|squadron| squadron.id)
}

fn next_colony_id(state: &GameState) -> ColonyId {
    ColonyId(state.colonies().iter().map(|c| c.id.0).max().unwrap_or(0) + 1)
}

/// Handle a `Colonize`-priority fleet order: consume the fleet's ETAC
/// squadron to found a new colony at its current system (§4.G). Falls
/// back to a middling `Hostile`/`Poor` planet when the order omits the
/// rolled planet data.
fn try_colonize(
    state: &mut GameState,
    house: HouseId,
    cmd: &FleetCommand,
    system: SystemId,
) -> Result<TurnEvent, ValidationError> {
    if state.colonies().iter().any(|c| c.system == system) {
        return Err(ValidationError::AlreadyColonized(system));
    }
    let Some(squadron) = find_etac_squadron(state, cmd.fleet) else {
        return Err(ValidationError::NoEtacPresent(cmd.fleet));
    };
    let colony_id = next_colony_id(state);
    let planet_class = cmd.planet_class.unwrap_or(PlanetClass::Hostile);
    let resource_rating = cmd.resource_rating.unwrap_or(ResourceRating::Poor);
    colonization::found_colony(state, squadron, cmd.fleet, colony_id, system, house, planet_class, resource_rating)
        .map_err(|_| ValidationError::NoEtacPresent(cmd.fleet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec4x_common::entities::{Colony, Fleet, House, Squadron};
    use ec4x_common::enums::{ResourceRating, SquadronType};
    use ec4x_common::ids::{HouseId, ShipId, SquadronId};
    use ec4x_common::orders::{ColonyManagementCommand, DiplomaticCommand};

    #[test]
    fn packet_for_wrong_turn_is_rejected() {
        let mut state = GameState::new();
        state
            .houses
            .add(ec4x_common::entities::House::new(HouseId(1), "A", (0, 0, 0)))
            .unwrap();
        let config = AuthoritativeConfig::default_for_tests();
        let packet = CommandPacket::new(5, HouseId(1));
        let (_, rejected) = apply_packet(&mut state, &config, &packet);
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn colony_management_updates_tax_rate_for_owner_only() {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        state
            .add_colony(Colony::new(ColonyId(1), SystemId(1), HouseId(1), 1_000_000, PlanetClass::Benign, ResourceRating::Abundant))
            .unwrap();
        let config = AuthoritativeConfig::default_for_tests();
        let mut packet = CommandPacket::new(0, HouseId(1));
        packet.colony_management.push(ColonyManagementCommand {
            colony: ColonyId(1),
            tax_rate_percent: Some(40),
            auto_tax: None,
            auto_repair: None,
            auto_build_industrial: None,
        });
        let (_, rejected) = apply_packet(&mut state, &config, &packet);
        assert!(rejected.is_empty());
        assert_eq!(state.colonies().get(ColonyId(1)).unwrap().tax_rate_percent, 40);
    }

    #[test]
    fn colony_management_rejects_non_owner() {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        state.houses.add(House::new(HouseId(2), "B", (0, 0, 0))).unwrap();
        state
            .add_colony(Colony::new(ColonyId(1), SystemId(1), HouseId(1), 1_000_000, PlanetClass::Benign, ResourceRating::Abundant))
            .unwrap();
        let config = AuthoritativeConfig::default_for_tests();
        let mut packet = CommandPacket::new(0, HouseId(2));
        packet.colony_management.push(ColonyManagementCommand {
            colony: ColonyId(1),
            tax_rate_percent: Some(40),
            auto_tax: None,
            auto_repair: None,
            auto_build_industrial: None,
        });
        let (_, rejected) = apply_packet(&mut state, &config, &packet);
        assert_eq!(rejected.len(), 1);
        assert_eq!(state.colonies().get(ColonyId(1)).unwrap().tax_rate_percent, 0);
    }

    #[test]
    fn colonize_order_founds_colony_and_consumes_etac() {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        state
            .systems
            .add(ec4x_common::entities::System::new(SystemId(1), ec4x_common::entities::HexCoord::new(0, 0)))
            .unwrap();
        state.add_fleet(Fleet::new(FleetId(1), HouseId(1), SystemId(1))).unwrap();
        state.ships.add(ec4x_common::entities::Ship::new(ShipId(1), ShipClass::Etac, 1)).unwrap();
        state
            .add_squadron(
                Squadron::new(SquadronId(1), HouseId(1), SystemId(1), SquadronType::Spacelift, ShipId(1)),
                FleetId(1),
            )
            .unwrap();

        let config = AuthoritativeConfig::default_for_tests();
        let mut packet = CommandPacket::new(0, HouseId(1));
        packet.fleet_commands.push(FleetCommand {
            fleet: FleetId(1),
            priority: FleetOrderPriority::Colonize,
            destination: None,
            patrol_route: Vec::new(),
            planet_class: Some(PlanetClass::Benign),
            resource_rating: Some(ResourceRating::Abundant),
        });
        let (events, rejected) = apply_packet(&mut state, &config, &packet);
        assert!(rejected.is_empty());
        assert!(events.iter().any(|e| matches!(e, TurnEvent::ColonyEstablished { .. })));
        assert!(state.colonies().iter().any(|c| c.system == SystemId(1)));
        assert!(state.squadrons.get(SquadronId(1)).is_none());
    }

    #[test]
    fn accept_command_forms_pact_immediately() {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        state.houses.add(House::new(HouseId(2), "B", (0, 0, 0))).unwrap();
        let config = AuthoritativeConfig::default_for_tests();

        let mut propose_packet = CommandPacket::new(0, HouseId(1));
        propose_packet.diplomatic_command =
            Some(DiplomaticCommand::Propose { to: HouseId(2), state: ec4x_common::enums::DiplomaticState::NonAggression });
        apply_packet(&mut state, &config, &propose_packet);

        let mut accept_packet = CommandPacket::new(0, HouseId(2));
        accept_packet.diplomatic_command = Some(DiplomaticCommand::Accept { from: HouseId(1) });
        let (events, _) = apply_packet(&mut state, &config, &accept_packet);
        assert!(events.iter().any(|e| matches!(e, TurnEvent::PactFormed { .. })));
        assert_eq!(
            state.houses.get(HouseId(1)).unwrap().diplomacy.relations.get(&HouseId(2)),
            Some(&ec4x_common::enums::DiplomaticState::NonAggression)
        );
    }

    #[test]
    fn reject_command_clears_pending_proposal_before_auto_resolve() {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        state.houses.add(House::new(HouseId(2), "B", (0, 0, 0))).unwrap();
        let config = AuthoritativeConfig::default_for_tests();

        let mut propose_packet = CommandPacket::new(0, HouseId(1));
        propose_packet.diplomatic_command =
            Some(DiplomaticCommand::Propose { to: HouseId(2), state: ec4x_common::enums::DiplomaticState::NonAggression });
        apply_packet(&mut state, &config, &propose_packet);

        let mut reject_packet = CommandPacket::new(0, HouseId(2));
        reject_packet.diplomatic_command = Some(DiplomaticCommand::Reject { from: HouseId(1) });
        apply_packet(&mut state, &config, &reject_packet);

        let events = finalize_diplomacy(&mut state, 0);
        assert!(!events.iter().any(|e| matches!(e, TurnEvent::PactFormed { .. })));
        assert!(state.houses.get(HouseId(1)).unwrap().diplomacy.relations.get(&HouseId(2)).is_none());
    }

    #[test]
    fn espionage_and_research_investment_split_treasury() {
        let mut state = GameState::new();
        let mut house = House::new(HouseId(1), "A", (0, 0, 0));
        house.treasury = 1_000;
        state.houses.add(house).unwrap();
        let config = AuthoritativeConfig::default_for_tests();
        let mut packet = CommandPacket::new(0, HouseId(1));
        packet.ebp_investment = 100;
        packet.cip_investment = 50;
        let (_, rejected) = apply_packet(&mut state, &config, &packet);
        assert!(rejected.is_empty());
        let house = state.houses.get(HouseId(1)).unwrap();
        assert_eq!(house.espionage_budget.ebp_points, 100);
        assert_eq!(house.espionage_budget.cip_points, 50);
        assert_eq!(house.treasury, 850);
    }

    #[test]
    fn over_allocated_espionage_investment_is_rejected() {
        let mut state = GameState::new();
        let mut house = House::new(HouseId(1), "A", (0, 0, 0));
        house.treasury = 10;
        state.houses.add(house).unwrap();
        let config = AuthoritativeConfig::default_for_tests();
        let mut packet = CommandPacket::new(0, HouseId(1));
        packet.ebp_investment = 100;
        let (_, rejected) = apply_packet(&mut state, &config, &packet);
        assert_eq!(rejected, vec![ValidationError::ResearchOverAllocated]);
    }
}
