//! Bombardment and invasion resolution (§4.E). Executed in the Conflict
//! phase so infrastructure damage precedes Income.

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::ids::ColonyId;
use ec4x_store::GameState;

/// The infrastructure-damage-ratio delta one turn's worth of bombardment
/// rounds inflicts (§4.F: diminishing returns per round). Pure so the
/// Conflict phase can compute it from a `&GameState` before any colony
/// is mutated.
pub fn bombardment_damage(config: &AuthoritativeConfig) -> f64 {
    let tables = &config.sections.combat_tables;
    let mut total_damage = 0.0;
    let mut round_damage = 0.05_f64;
    for _ in 0..tables.bombardment_rounds_per_turn {
        total_damage += round_damage;
        round_damage *= tables.bombardment_diminishing_factor;
    }
    total_damage
}

/// Apply one turn's worth of bombardment rounds against a colony,
/// returning the total infrastructure-damage-ratio delta (§4.F).
pub fn bombard(colony: &mut ec4x_common::entities::Colony, config: &AuthoritativeConfig) -> f64 {
    let total_damage = bombardment_damage(config);
    colony.infrastructure_damage_ratio = (colony.infrastructure_damage_ratio + total_damage).min(1.0);
    total_damage
}

/// Resolve ground combat for one invasion attempt: attacker marine
/// strength vs. the colony's garrison strength (§4.E). Returns true if
/// the attacker wins and ownership should transfer.
pub fn resolve_invasion(attacker_marine_strength: u32, defender_garrison_strength: u32) -> bool {
    attacker_marine_strength > defender_garrison_strength
}

/// Apply the consequences of an invasion result: on attacker win,
/// transfer ownership and apply the configured IU loss; on defender win,
/// the attacker's marines (already removed by the caller) are simply
/// lost with no further colony effect.
pub fn apply_invasion_outcome(
    state: &mut GameState,
    colony: ColonyId,
    attacker_won: bool,
    new_owner: ec4x_common::ids::HouseId,
    config: &AuthoritativeConfig,
) -> Result<(), ec4x_common::errors::CorruptionError> {
    if !attacker_won {
        return Ok(());
    }
    state.transfer_colony(colony, new_owner)?;
    state.with_colony_mut(colony, |c| {
        let loss_ratio = config.sections.combat_tables.invasion_iu_loss_ratio;
        let lost = (c.industrial_units as f64 * loss_ratio).round() as u32;
        c.industrial_units = c.industrial_units.saturating_sub(lost);
    });
    Ok(())
}
