//! Research: PP to RP conversion and upgrade-turn tech advancement
//! (§4.H).

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::constants::{UPGRADE_TURN_MODULUS, UPGRADE_TURN_REMAINDER};
use ec4x_common::entities::House;
use ec4x_common::enums::TechField;
use ec4x_common::orders::ResearchAllocation;

use crate::events::TurnEvent;

/// Whether `turn` is an upgrade turn, when accumulated RP may be spent
/// against tech costs (§4.D, §4.H: `turn mod 6 == 1`).
pub fn is_upgrade_turn(turn: u64) -> bool {
    turn % UPGRADE_TURN_MODULUS == UPGRADE_TURN_REMAINDER
}

/// Convert a house's PP allocation into ERP/SRP/TRP for the turn,
/// scaling by its economic/science levels as a stand-in for the
/// efficiency curve named in §4.H (GHO derivation is wire/UI-facing and
/// out of scope for the core resolver).
pub fn accumulate_research(house: &mut House, pp_available: u64, allocation: &ResearchAllocation) {
    let economic_pp = pp_available * allocation.economic_percent as u64 / 100;
    let science_pp = pp_available * allocation.science_percent as u64 / 100;

    house.research.erp += economic_pp * house.tech_tree.economic_level as u64;
    house.research.srp += science_pp * house.tech_tree.science_level as u64;

    let field_total: u64 = allocation.field_percent.values().map(|p| *p as u64).sum();
    if field_total == 0 {
        return;
    }
    for (field, percent) in &allocation.field_percent {
        let field_pp = pp_available * *percent as u64 / 100;
        let level = house.tech_tree.field_level(*field);
        *house.research.trp.entry(*field).or_insert(0) += field_pp * level as u64;
    }
}

/// On an upgrade turn, spend accumulated TRP against the next level's
/// cost for each field that can afford it, awarding prestige per
/// advance (§4.H, §8 S5).
pub fn advance_tech(house: &mut House, config: &AuthoritativeConfig) -> Vec<TurnEvent> {
    let mut events = Vec::new();
    for field in TechField::all() {
        let level = house.tech_tree.field_level(*field);
        let Some(cost) = config.sections.tech_costs.cost_for_next_level(*field, level) else {
            continue;
        };
        let accumulated = house.research.trp.entry(*field).or_insert(0);
        if *accumulated >= cost {
            *accumulated -= cost;
            house.tech_tree.field_levels.insert(*field, level + 1);
            house.prestige += config.sections.prestige_values.tech_advance_award;
            events.push(TurnEvent::TechAdvanced {
                house: house.id,
                field: Some(*field),
                new_level: level + 1,
            });
        }
    }

    if let Some(cost) = config.sections.tech_costs.el_costs.get(&house.tech_tree.economic_level) {
        if house.research.erp >= *cost {
            house.research.erp -= *cost;
            house.tech_tree.economic_level += 1;
            house.prestige += config.sections.prestige_values.tech_advance_award;
            events.push(TurnEvent::TechAdvanced {
                house: house.id,
                field: None,
                new_level: house.tech_tree.economic_level,
            });
        }
    }

    if let Some(cost) = config.sections.tech_costs.sl_costs.get(&house.tech_tree.science_level) {
        if house.research.srp >= *cost {
            house.research.srp -= *cost;
            house.tech_tree.science_level += 1;
            house.prestige += config.sections.prestige_values.tech_advance_award;
            events.push(TurnEvent::TechAdvanced {
                house: house.id,
                field: None,
                new_level: house.tech_tree.science_level,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec4x_common::ids::HouseId;
    use std::collections::BTreeMap;

    #[test]
    fn upgrade_turn_cadence() {
        assert!(is_upgrade_turn(1));
        assert!(!is_upgrade_turn(2));
        assert!(is_upgrade_turn(7));
    }

    #[test]
    fn research_accumulates_proportionally() {
        let mut house = House::new(HouseId(1), "Test", (0, 0, 0));
        let allocation = ResearchAllocation {
            economic_percent: 50,
            science_percent: 50,
            field_percent: BTreeMap::new(),
        };
        accumulate_research(&mut house, 1000, &allocation);
        assert_eq!(house.research.erp, 500);
        assert_eq!(house.research.srp, 500);
    }

    #[test]
    fn advance_tech_spends_trp_and_awards_prestige() {
        let config = AuthoritativeConfig::default_for_tests();
        let mut house = House::new(HouseId(1), "Test", (0, 0, 0));
        let cost = config
            .sections
            .tech_costs
            .cost_for_next_level(TechField::Weapons, 1)
            .unwrap();
        house.research.trp.insert(TechField::Weapons, cost);
        let events = advance_tech(&mut house, &config);
        assert_eq!(house.tech_tree.field_level(TechField::Weapons), 2);
        assert!(!events.is_empty());
        assert_eq!(house.prestige, config.sections.prestige_values.tech_advance_award);
    }
}
