//! Events emitted by a turn resolution, consumed by the wire layer to
//! build per-house deltas and by the TUI to show a turn summary.

use serde::{Deserialize, Serialize};

use ec4x_common::ids::{ColonyId, FacilityId, FleetId, HouseId, SquadronId, SystemId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    ColonyEstablished { colony: ColonyId, system: SystemId, owner: HouseId },
    ColonyCaptured { colony: ColonyId, previous_owner: HouseId, new_owner: HouseId },
    ColonyBlockaded { colony: ColonyId, attackers: Vec<HouseId> },
    PrestigeAwarded { house: HouseId, amount: i64, reason: String },
    PrestigePenalized { house: HouseId, amount: i64, reason: String },
    TechAdvanced { house: HouseId, field: Option<ec4x_common::enums::TechField>, new_level: u32 },
    HouseEliminated { house: HouseId, reason: String },
    PactBroken { breaker: HouseId, victim: HouseId },
    PactFormed { a: HouseId, b: HouseId },
    FleetDestroyed { fleet: FleetId, owner: HouseId },
    TransferDispatched { house: HouseId, ptu: u64, cost: u64 },
    TransferReturned { house: HouseId, ptu: u64 },
    EspionageDetected { attacker: HouseId, target: HouseId },
    ProjectQueued { colony: ColonyId, facility: FacilityId, kind: ec4x_common::enums::ProjectKind },
    SquadronScrapped { house: HouseId, squadron: SquadronId, refund: i64 },
    ScoutPlanted { owner: HouseId, observed_house: HouseId, system: SystemId },
    ScoutCaught { owner: HouseId, observed_house: HouseId, system: SystemId },
}
