//! Outcomes returned by the combat and espionage resolvers, consumed by
//! the engine's Conflict phase to apply state changes and emit events.

use ec4x_common::ids::{ColonyId, HouseId, SquadronId, SystemId};

#[derive(Debug, Clone, PartialEq)]
pub enum SquadronOutcome {
    Undamaged,
    Crippled,
    Destroyed,
    Retreated { to: SystemId },
}

#[derive(Debug, Clone)]
pub struct SquadronResult {
    pub squadron: SquadronId,
    pub owner: HouseId,
    pub outcome: SquadronOutcome,
}

#[derive(Debug, Clone)]
pub struct InvasionResult {
    pub colony: ColonyId,
    pub attacker: HouseId,
    pub defender_won: bool,
}

/// The full outcome of one system's Conflict-phase combat (§4.E).
#[derive(Debug, Clone, Default)]
pub struct CombatReport {
    pub system: SystemId,
    pub rounds_fought: u32,
    pub squadron_results: Vec<SquadronResult>,
    pub victor: Option<HouseId>,
    pub contested: bool,
    pub infrastructure_damage: Vec<(ColonyId, f64)>,
    pub invasions: Vec<InvasionResult>,
}

#[derive(Debug, Clone)]
pub struct EspionageReport {
    pub attacker: HouseId,
    pub target: HouseId,
    pub detected: bool,
    pub succeeded: bool,
    pub srp_stolen: u64,
}
