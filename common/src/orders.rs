//! Wire-facing order types (§6 CommandPacket). These are the untrusted,
//! player-submitted structures the Command phase validates one order at
//! a time; a bad order is discarded without aborting the rest of the
//! packet (§7).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{
    CargoKind, DiplomaticState, EspionageActionKind, FleetOrderPriority, PlanetClass, ProjectKind, ResourceRating,
    TechField,
};
use crate::ids::{ColonyId, FacilityId, FleetId, HouseId, SystemId};

/// A single fleet order: destination/priority plus optional escort
/// instructions (§4.D, §6). `planet_class`/`resource_rating` are only
/// consulted for a `Colonize` priority, since the system itself carries
/// no pre-rolled planet data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetCommand {
    pub fleet: FleetId,
    pub priority: FleetOrderPriority,
    pub destination: Option<SystemId>,
    pub patrol_route: Vec<SystemId>,
    pub planet_class: Option<PlanetClass>,
    pub resource_rating: Option<ResourceRating>,
}

/// A queued construction order submitted against a facility (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildCommand {
    pub facility: FacilityId,
    pub kind: ProjectKind,
    pub item_tag: String,
}

/// A queued repair order (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairCommand {
    pub facility: FacilityId,
    pub fleet: FleetId,
}

/// Scrap a ship/squadron for partial PP refund (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapCommand {
    pub squadron: crate::ids::SquadronId,
}

/// Per-colony management toggles submitted this turn (§6, §4.F).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonyManagementCommand {
    pub colony: ColonyId,
    pub tax_rate_percent: Option<u8>,
    pub auto_tax: Option<bool>,
    pub auto_repair: Option<bool>,
    pub auto_build_industrial: Option<bool>,
}

/// A population transfer order between two colonies (§6, §4.F).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationTransferCommand {
    pub source: ColonyId,
    pub destination: ColonyId,
    pub ptu_amount: u64,
    pub cargo_kind: CargoKind,
}

/// A terraform order against a colony (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerraformCommand {
    pub colony: ColonyId,
}

/// An espionage action order; at most one may appear per packet (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EspionageActionCommand {
    pub kind: EspionageActionKind,
    pub target_house: HouseId,
    pub target_system: SystemId,
}

/// Allocation of this turn's RP output across economic, science, and
/// per-field tracks (§6, §4.H).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchAllocation {
    pub economic_percent: u8,
    pub science_percent: u8,
    pub field_percent: BTreeMap<TechField, u8>,
}

/// A diplomatic proposal or break submitted this turn (§6, §4.J).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiplomaticCommand {
    Propose { to: HouseId, state: DiplomaticState },
    Break { with: HouseId },
    Accept { from: HouseId },
    Reject { from: HouseId },
}

/// A "zero turn" command: an action resolved before the ordinary phase
/// pipeline, e.g. an initial homeworld placement pick (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroTurnCommand {
    pub house: HouseId,
    pub chosen_system: SystemId,
}

/// The full per-house order submission for one turn (§6 CommandPacket).
/// Validation happens order-by-order in the Command phase; a malformed
/// or unauthorized order is dropped and recorded as a `ValidationError`
/// without aborting the rest of the packet (§7).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandPacket {
    pub turn: u64,
    pub house: HouseId,
    pub zero_turn_commands: Vec<ZeroTurnCommand>,
    pub fleet_commands: Vec<FleetCommand>,
    pub build_commands: Vec<BuildCommand>,
    pub repair_commands: Vec<RepairCommand>,
    pub scrap_commands: Vec<ScrapCommand>,
    pub colony_management: Vec<ColonyManagementCommand>,
    pub population_transfers: Vec<PopulationTransferCommand>,
    pub terraform_commands: Vec<TerraformCommand>,
    pub espionage_actions: Vec<EspionageActionCommand>,
    pub ebp_investment: u64,
    pub cip_investment: u64,
    pub research_allocation: ResearchAllocation,
    pub diplomatic_command: Option<DiplomaticCommand>,
}

impl CommandPacket {
    pub fn new(turn: u64, house: HouseId) -> Self {
        Self {
            turn,
            house,
            ..Default::default()
        }
    }

    /// §6: at most one espionage action per packet.
    pub fn has_valid_espionage_cardinality(&self) -> bool {
        self.espionage_actions.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_packet_has_no_espionage_action() {
        let packet = CommandPacket::new(1, HouseId(1));
        assert!(packet.has_valid_espionage_cardinality());
    }

    #[test]
    fn more_than_one_espionage_action_is_invalid() {
        let mut packet = CommandPacket::new(1, HouseId(1));
        packet.espionage_actions.push(EspionageActionCommand {
            kind: EspionageActionKind::TechTheft,
            target_house: HouseId(2),
            target_system: SystemId(1),
        });
        packet.espionage_actions.push(EspionageActionCommand {
            kind: EspionageActionKind::SabotageTax,
            target_house: HouseId(2),
            target_system: SystemId(1),
        });
        assert!(!packet.has_valid_espionage_cardinality());
    }
}
