//! Small supporting entities (§3): population in transit, and ongoing
//! espionage aftermath effects.

use serde::{Deserialize, Serialize};

use crate::enums::OngoingEffectKind;
use crate::ids::{HouseId, ScoutId, SystemId, TransitId};

/// Population en route between two colonies, consuming a shipping
/// contract's worth of PP (§3, §4.F).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationTransit {
    pub id: TransitId,
    pub source: SystemId,
    pub destination: SystemId,
    pub owner: HouseId,
    pub ptu_amount: u64,
    pub pp_paid: u64,
    pub arrival_turn: u64,
}

impl PopulationTransit {
    pub fn new(
        id: TransitId,
        source: SystemId,
        destination: SystemId,
        owner: HouseId,
        ptu_amount: u64,
        pp_paid: u64,
        arrival_turn: u64,
    ) -> Self {
        Self {
            id,
            source,
            destination,
            owner,
            ptu_amount,
            pp_paid,
            arrival_turn,
        }
    }

    pub fn has_arrived(&self, current_turn: u64) -> bool {
        current_turn >= self.arrival_turn
    }
}

/// A multi-turn aftermath effect applied against a house, typically from
/// a successful espionage action (§3, §4.I).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OngoingEffect {
    pub target: HouseId,
    pub kind: OngoingEffectKind,
    pub magnitude_ratio: f64,
    pub remaining_turns: u32,
}

impl OngoingEffect {
    pub fn new(target: HouseId, kind: OngoingEffectKind, magnitude_ratio: f64, remaining_turns: u32) -> Self {
        Self {
            target,
            kind,
            magnitude_ratio,
            remaining_turns,
        }
    }

    /// Advance one turn, returning whether the effect has expired.
    pub fn tick(&mut self) -> bool {
        self.remaining_turns = self.remaining_turns.saturating_sub(1);
        self.remaining_turns == 0
    }
}

/// A planted espionage scout surviving in a rival's system, rolled for
/// detection every Income phase until it is caught (§3, §4.I).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutAsset {
    pub id: ScoutId,
    pub owner: HouseId,
    pub observed_house: HouseId,
    pub system: SystemId,
    pub planted_turn: u64,
}

impl ScoutAsset {
    pub fn new(id: ScoutId, owner: HouseId, observed_house: HouseId, system: SystemId, planted_turn: u64) -> Self {
        Self {
            id,
            owner,
            observed_house,
            system,
            planted_turn,
        }
    }
}
