//! The `House` entity (§3) — a player's empire: prestige, treasury, tech
//! tree, research accumulators, tax policy, espionage budget, diplomatic
//! relations, and elimination tracking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::TAX_HISTORY_WINDOW;
use crate::enums::{DiplomaticState, TechField};
use crate::ids::HouseId;

/// Tech tree scalar levels plus per-field levels, all starting at >= 1
/// (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechTree {
    pub economic_level: u32,
    pub science_level: u32,
    pub field_levels: BTreeMap<TechField, u32>,
}

impl TechTree {
    pub fn new() -> Self {
        let mut field_levels = BTreeMap::new();
        for field in TechField::all() {
            field_levels.insert(*field, 1);
        }
        Self {
            economic_level: 1,
            science_level: 1,
            field_levels,
        }
    }

    pub fn field_level(&self, field: TechField) -> u32 {
        *self.field_levels.get(&field).unwrap_or(&1)
    }
}

impl Default for TechTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulated research points (§3 House, GLOSSARY ERP/SRP/TRP).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchAccumulators {
    pub erp: u64,
    pub srp: u64,
    pub trp: BTreeMap<TechField, u64>,
}

/// A house's tax policy: current rate and a rolling window of past rates
/// (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxPolicy {
    pub rate_percent: u8,
    pub history: Vec<u8>,
}

impl TaxPolicy {
    pub fn new(initial_rate: u8) -> Self {
        Self {
            rate_percent: initial_rate.min(100),
            history: vec![initial_rate.min(100)],
        }
    }

    /// Record the current rate into the rolling window, keeping at most
    /// `TAX_HISTORY_WINDOW` entries (§3).
    pub fn record_turn(&mut self) {
        self.history.push(self.rate_percent);
        if self.history.len() > TAX_HISTORY_WINDOW {
            let excess = self.history.len() - TAX_HISTORY_WINDOW;
            self.history.drain(0..excess);
        }
    }
}

/// Espionage budget tracking (§3, GLOSSARY EBP/CIP).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EspionageBudget {
    pub ebp_points: u64,
    pub cip_points: u64,
    pub turns_since_ebp_investment: u32,
    pub turns_since_cip_investment: u32,
}

/// A recorded pact violation, kept in the breaker's history for
/// reputation computations (§4.J).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub turn: u64,
    pub victim: HouseId,
}

/// Diplomatic pact proposal state (§4.J, §9 Open Question 1): a
/// proposal auto-resolves at the end of the Command phase it was raised
/// in, unless the target is dishonored or isolated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PactProposal {
    pub to: HouseId,
    pub raised_turn: u64,
}

/// Per-pair diplomatic bookkeeping owned by the proposing/breaking house
/// (§3, §4.J).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiplomacyState {
    pub relations: BTreeMap<HouseId, DiplomaticState>,
    pub pending_proposals: Vec<PactProposal>,
    pub violations: Vec<ViolationRecord>,
}

impl DiplomacyState {
    pub fn relation_with(&self, other: HouseId) -> DiplomaticState {
        self.relations
            .get(&other)
            .copied()
            .unwrap_or(DiplomaticState::Neutral)
    }
}

/// Auto-retreat policy for a house's fleets (§3): a fallback-route list
/// consulted by the combat retreat rule (§4.E).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetreatPolicy {
    pub fallback_routes: Vec<crate::ids::SystemId>,
    pub auto_retreat: bool,
}

/// A player's house (§3). `eliminated` is a one-way flag (§8 Invariant
/// 11); once true, active-house queries must skip it and its fleets and
/// colonies must already be cleared in the same phase that set it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,
    pub name: String,
    pub color: (u8, u8, u8),
    pub prestige: i64,
    pub treasury: i64,
    pub tech_tree: TechTree,
    pub research: ResearchAccumulators,
    pub tax_policy: TaxPolicy,
    pub espionage_budget: EspionageBudget,
    pub diplomacy: DiplomacyState,
    pub dishonored_turns_remaining: u32,
    pub isolated_turns_remaining: u32,
    pub retreat_policy: RetreatPolicy,
    pub consecutive_negative_prestige_turns: u32,
    pub planet_breaker_count: u32,
    pub eliminated: bool,
}

impl House {
    pub fn new(id: HouseId, name: impl Into<String>, color: (u8, u8, u8)) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            prestige: 0,
            treasury: 0,
            tech_tree: TechTree::new(),
            research: ResearchAccumulators::default(),
            tax_policy: TaxPolicy::new(0),
            espionage_budget: EspionageBudget::default(),
            diplomacy: DiplomacyState::default(),
            dishonored_turns_remaining: 0,
            isolated_turns_remaining: 0,
            retreat_policy: RetreatPolicy::default(),
            consecutive_negative_prestige_turns: 0,
            planet_breaker_count: 0,
            eliminated: false,
        }
    }

    pub fn is_dishonored(&self) -> bool {
        self.dishonored_turns_remaining > 0
    }

    pub fn is_isolated(&self) -> bool {
        self.isolated_turns_remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_history_window_caps_at_six() {
        let mut policy = TaxPolicy::new(10);
        for rate in 0..10u8 {
            policy.rate_percent = rate;
            policy.record_turn();
        }
        assert_eq!(policy.history.len(), TAX_HISTORY_WINDOW);
        assert_eq!(*policy.history.last().unwrap(), 9);
    }

    #[test]
    fn new_house_relations_default_to_neutral() {
        let house = House::new(HouseId(1), "Acme", (0, 0, 0));
        assert_eq!(
            house.diplomacy.relation_with(HouseId(2)),
            DiplomaticState::Neutral
        );
    }
}
