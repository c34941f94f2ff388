//! Espionage command handling (§4.I, §8 S3): resolves the single
//! per-turn espionage action a house may submit, applying the resulting
//! ongoing effect to the target and the prestige consequences to the
//! attacker.

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::entities::ScoutAsset;
use ec4x_common::enums::EspionageActionKind;
use ec4x_common::errors::ValidationError;
use ec4x_common::ids::{HouseId, ScoutId};
use ec4x_common::orders::EspionageActionCommand;
use ec4x_store::GameState;

use crate::events::TurnEvent;

fn next_scout_id(state: &GameState) -> ScoutId {
    ScoutId(state.scouts.iter().map(|s| s.id.0).max().unwrap_or(0) + 1)
}

/// Resolve `cmd` on behalf of `attacker_id` (§4.I). Returns the events
/// raised; a missing target or the target being eliminated is a
/// `ValidationError` per §7, not silently dropped.
pub fn apply_espionage(
    state: &mut GameState,
    config: &AuthoritativeConfig,
    turn: u64,
    attacker_id: HouseId,
    cmd: &EspionageActionCommand,
) -> Result<Vec<TurnEvent>, ValidationError> {
    if state.houses.get(cmd.target_house).map(|h| h.eliminated).unwrap_or(true) {
        return Err(ValidationError::TargetEliminated(cmd.target_house));
    }

    let mut rng = ec4x_common::rng::espionage_rng(turn, attacker_id.0, cmd.target_house.0);
    let (report, effect) = {
        let attacker = state.houses.get(attacker_id).ok_or(ValidationError::TargetEliminated(attacker_id))?;
        let target = state.houses.get(cmd.target_house).ok_or(ValidationError::TargetEliminated(cmd.target_house))?;
        ec4x_combat::espionage::resolve_espionage(attacker, target, cmd.kind, &mut rng)
    };

    let mut events = Vec::new();

    if report.succeeded {
        if report.srp_stolen > 0 {
            if let Some(target) = state.houses.get_mut(cmd.target_house) {
                target.research.srp = target.research.srp.saturating_sub(report.srp_stolen);
            }
            if let Some(attacker) = state.houses.get_mut(attacker_id) {
                attacker.research.srp = attacker.research.srp.saturating_add(report.srp_stolen);
            }
        }
        if let Some(effect) = effect {
            state.ongoing_effects.push(effect);
        }
        if cmd.kind == EspionageActionKind::PlantScout {
            let scout_id = next_scout_id(state);
            let scout = ScoutAsset::new(scout_id, attacker_id, cmd.target_house, cmd.target_system, turn);
            let _ = state.scouts.add(scout);
            events.push(TurnEvent::ScoutPlanted {
                owner: attacker_id,
                observed_house: cmd.target_house,
                system: cmd.target_system,
            });
        }
    } else {
        let penalty = config.sections.prestige_values.failed_espionage_penalty;
        if let Some(attacker) = state.houses.get_mut(attacker_id) {
            attacker.prestige -= penalty;
        }
        events.push(TurnEvent::PrestigePenalized {
            house: attacker_id,
            amount: penalty,
            reason: "failed espionage attempt".to_string(),
        });
    }

    if report.detected {
        events.push(TurnEvent::EspionageDetected { attacker: attacker_id, target: cmd.target_house });
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec4x_common::entities::House;
    use ec4x_common::enums::{EspionageActionKind, TechField};
    use ec4x_common::ids::SystemId;

    #[test]
    fn failed_attempt_penalizes_attacker_prestige() {
        let mut state = GameState::new();
        let mut attacker = House::new(HouseId(1), "A", (0, 0, 0));
        attacker.tech_tree.field_levels.insert(TechField::Espionage, 1);
        state.houses.add(attacker).unwrap();

        let mut target = House::new(HouseId(2), "B", (0, 0, 0));
        target.tech_tree.field_levels.insert(TechField::Espionage, 10);
        target.espionage_budget.cip_points = 1000;
        state.houses.add(target).unwrap();

        let config = AuthoritativeConfig::default_for_tests();
        let cmd = EspionageActionCommand {
            kind: EspionageActionKind::TechTheft,
            target_house: HouseId(2),
            target_system: SystemId(1),
        };
        let events = apply_espionage(&mut state, &config, 1, HouseId(1), &cmd).unwrap();
        assert!(state.houses.get(HouseId(1)).unwrap().prestige < 0);
        assert!(events.iter().any(|e| matches!(e, TurnEvent::PrestigePenalized { .. })));
    }

    #[test]
    fn successful_plant_scout_leaves_a_surviving_scout_asset() {
        let mut state = GameState::new();
        let mut attacker = House::new(HouseId(1), "A", (0, 0, 0));
        attacker.tech_tree.field_levels.insert(TechField::Espionage, 10);
        attacker.espionage_budget.ebp_points = 1000;
        state.houses.add(attacker).unwrap();

        let target = House::new(HouseId(2), "B", (0, 0, 0));
        state.houses.add(target).unwrap();

        let config = AuthoritativeConfig::default_for_tests();
        let cmd = EspionageActionCommand {
            kind: EspionageActionKind::PlantScout,
            target_house: HouseId(2),
            target_system: SystemId(3),
        };
        let mut events = Vec::new();
        for turn in 1..20 {
            events = apply_espionage(&mut state, &config, turn, HouseId(1), &cmd).unwrap();
            if state.scouts.iter().any(|s| s.owner == HouseId(1)) {
                break;
            }
        }
        let scout = state.scouts.iter().find(|s| s.owner == HouseId(1)).expect("scout should eventually plant");
        assert_eq!(scout.observed_house, HouseId(2));
        assert_eq!(scout.system, SystemId(3));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::ScoutPlanted { .. })));
    }

    #[test]
    fn eliminated_target_is_rejected() {
        let mut state = GameState::new();
        state.houses.add(House::new(HouseId(1), "A", (0, 0, 0))).unwrap();
        let mut target = House::new(HouseId(2), "B", (0, 0, 0));
        target.eliminated = true;
        state.houses.add(target).unwrap();
        let config = AuthoritativeConfig::default_for_tests();
        let cmd = EspionageActionCommand {
            kind: EspionageActionKind::TechTheft,
            target_house: HouseId(2),
            target_system: SystemId(1),
        };
        let result = apply_espionage(&mut state, &config, 1, HouseId(1), &cmd);
        assert_eq!(result, Err(ValidationError::TargetEliminated(HouseId(2))));
    }
}
