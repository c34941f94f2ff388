//! Economy: GCO/NCV computation, population growth, construction-dock
//! project advancement (§4.F).

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::entities::{Colony, Facility};
use ec4x_store::GameState;

/// Gross Colony Output before tax/blockade/damage (§4.F, GLOSSARY).
pub fn gross_colony_output(colony: &Colony, config: &AuthoritativeConfig) -> f64 {
    let class_index = config
        .sections
        .planet_classes
        .raw_production_index
        .get(&colony.planet_class)
        .copied()
        .unwrap_or(colony.planet_class.raw_production_index());
    let rating_mult = config
        .sections
        .planet_classes
        .resource_rating_multiplier
        .get(&colony.resource_rating)
        .copied()
        .unwrap_or(1.0);
    (colony.population_units() as f64 * class_index as f64 + colony.industrial_units as f64) * rating_mult
}

/// Net Colony Value: what the treasury actually receives (§4.F,
/// GLOSSARY). `ncv_reduction_ratio`/`tax_reduction_ratio` fold in any
/// active espionage aftermath (`OngoingEffectKind::NcvReduction` /
/// `TaxReduction`) targeting the colony's owner; pass 0.0 for either when
/// no such effect is active.
pub fn net_colony_value(
    colony: &Colony,
    config: &AuthoritativeConfig,
    ncv_reduction_ratio: f64,
    tax_reduction_ratio: f64,
) -> f64 {
    let gco = gross_colony_output(colony, config) * (1.0 - colony.infrastructure_damage_ratio);
    let effective_tax_percent = (colony.tax_rate_percent as f64 * (1.0 - tax_reduction_ratio)).max(0.0);
    let after_tax = gco * (1.0 - effective_tax_percent / 100.0) * (1.0 - ncv_reduction_ratio.clamp(0.0, 1.0));
    if colony.blockade.blockaded {
        after_tax * (1.0 - ec4x_common::constants::BLOCKADE_DAMAGE_RATIO)
    } else {
        after_tax
    }
}

/// Strongest active `NcvReduction`/`TaxReduction` ratios targeting
/// `owner`, for feeding into `net_colony_value` (§4.I aftermath).
/// Multiple simultaneous effects of the same kind do not stack; the
/// harshest one applies.
pub fn ongoing_reduction_ratios(state: &GameState, owner: ec4x_common::ids::HouseId) -> (f64, f64) {
    use ec4x_common::enums::OngoingEffectKind;

    let mut ncv_reduction = 0.0_f64;
    let mut tax_reduction = 0.0_f64;
    for effect in &state.ongoing_effects {
        if effect.target != owner {
            continue;
        }
        match effect.kind {
            OngoingEffectKind::NcvReduction => ncv_reduction = ncv_reduction.max(effect.magnitude_ratio),
            OngoingEffectKind::TaxReduction => tax_reduction = tax_reduction.max(effect.magnitude_ratio),
            OngoingEffectKind::SrpReduction | OngoingEffectKind::StarbaseCrippled => {}
        }
    }
    (ncv_reduction, tax_reduction)
}

/// Recompute blockade status for a colony: blockaded iff a hostile armed
/// squadron sits at its system with no friendly defender present (§4.D
/// Income phase).
pub fn recompute_blockade(state: &mut GameState, colony_id: ec4x_common::ids::ColonyId) {
    let Some(colony) = state.colonies().get(colony_id) else { return };
    let system = colony.system;
    let owner = colony.owner;

    let mut attackers = Vec::new();
    let mut defender_present = false;
    for fleet in state.fleets_in_system(system) {
        if fleet.owner == owner {
            if state.squadrons_in_fleet(fleet.id).next().is_some() {
                defender_present = true;
            }
            continue;
        }
        if state.squadrons_in_fleet(fleet.id).next().is_some() {
            attackers.push(fleet.owner);
        }
    }
    attackers.sort();
    attackers.dedup();

    state.with_colony_mut(colony_id, |colony| {
        let newly_blockaded = !attackers.is_empty() && !defender_present;
        if newly_blockaded {
            colony.blockade.consecutive_turns += 1;
        } else {
            colony.blockade.consecutive_turns = 0;
        }
        colony.blockade.blockaded = newly_blockaded;
        colony.blockade.attackers = if newly_blockaded { attackers } else { Vec::new() };
    });
}

/// Apply one turn of population growth, modulated by operational
/// starbases (§4.F: +5% per starbase, max 3).
pub fn grow_population(colony: &mut Colony, starbase_count: u32, config: &AuthoritativeConfig) {
    let rules = &config.sections.population_rules;
    let bonus_units = starbase_count.min(rules.starbase_growth_bonus_max_units);
    let growth_ratio = rules.base_growth_ratio + bonus_units as f64 * rules.starbase_growth_bonus_per_unit;
    let growth = (colony.souls as f64 * growth_ratio).round() as u64;
    colony.souls += growth;
}

/// Advance every active project at `facility` by its share of the
/// colony's GCO allocated to that dock, completing and returning
/// finished project ids (§4.F).
pub fn advance_projects(state: &mut GameState, facility: &Facility, pp_available_per_dock: f64) -> Vec<ec4x_common::ids::ProjectId> {
    let mut completed = Vec::new();
    for &project_id in &facility.active_projects {
        if let Some(project) = state.projects.get_mut(project_id) {
            project.pay(pp_available_per_dock.max(0.0) as u64);
            if project.is_complete() {
                completed.push(project_id);
            } else {
                project.estimated_turns_remaining = project
                    .estimated_turns_remaining
                    .saturating_sub(1)
                    .max(1);
            }
        }
    }
    completed
}
