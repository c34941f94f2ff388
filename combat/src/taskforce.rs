//! Task force assembly (§4.E): per house, the union of all fleets and
//! squadrons present at a system, plus planetary defense if that house
//! owns the colony there.

use ec4x_common::enums::TargetBucket;
use ec4x_common::ids::{HouseId, SquadronId, SystemId};
use ec4x_store::GameState;

/// One squadron's combat-relevant snapshot for the duration of an
/// engagement. Taken once at task-force assembly; mutated in place as
/// rounds resolve rather than written back to the squadron entity until
/// the engagement concludes.
#[derive(Debug, Clone)]
pub struct CombatSquadron {
    pub id: SquadronId,
    pub bucket: TargetBucket,
    pub attack: f64,
    pub defense: f64,
    pub damage_taken: f64,
    pub crippled: bool,
    pub destroyed: bool,
    pub is_spacelift: bool,
    pub is_starbase: bool,
}

impl CombatSquadron {
    /// Effective attack this round (§4.E: tech multiplier, halved if
    /// crippled).
    pub fn effective_attack(&self) -> f64 {
        let mut attack = self.attack;
        if self.crippled {
            attack *= ec4x_common::constants::CRIPPLED_ATTACK_MULTIPLIER;
        }
        attack
    }

    pub fn is_combat_capable(&self) -> bool {
        !self.destroyed && !self.is_spacelift
    }
}

/// A house's assembled combat presence at one system (§4.E).
#[derive(Debug, Clone)]
pub struct TaskForce {
    pub owner: HouseId,
    pub squadrons: Vec<CombatSquadron>,
    pub is_homeworld_defender: bool,
    pub starting_strength: f64,
}

impl TaskForce {
    pub fn current_strength(&self) -> f64 {
        self.squadrons
            .iter()
            .filter(|s| !s.destroyed)
            .map(|s| s.defense - s.damage_taken)
            .filter(|remaining| *remaining > 0.0)
            .sum()
    }

    pub fn has_combat_capable_squadrons(&self) -> bool {
        self.squadrons.iter().any(|s| s.is_combat_capable())
    }

    pub fn squadrons_in_bucket(&self, bucket: TargetBucket) -> impl Iterator<Item = &CombatSquadron> {
        self.squadrons
            .iter()
            .filter(move |s| s.bucket == bucket && s.is_combat_capable())
    }
}

/// Build one task force per house present with at least one squadron at
/// `system` (§4.E). Houses with zero squadrons there are skipped
/// (failure semantics: an invalid, empty task force is never created).
pub fn build_task_forces(
    state: &GameState,
    config: &ec4x_common::config::AuthoritativeConfig,
    system: SystemId,
) -> Vec<TaskForce> {
    use std::collections::BTreeMap;

    let mut by_house: BTreeMap<HouseId, Vec<CombatSquadron>> = BTreeMap::new();
    let mut homeworld_defenders: std::collections::BTreeSet<HouseId> = std::collections::BTreeSet::new();

    for fleet in state.fleets_in_system(system) {
        if fleet.is_homeworld_defender {
            homeworld_defenders.insert(fleet.owner);
        }
        for squadron in state.squadrons_in_fleet(fleet.id) {
            let ships: Vec<_> = state.ships_in_squadron(squadron.id).collect();
            let Some(flagship) = ships.iter().find(|s| s.id == squadron.flagship) else {
                continue;
            };
            let bucket = flagship.class.targeting_bucket();
            let is_spacelift = flagship.class.is_spacelift();
            let is_starbase = matches!(flagship.class, ec4x_common::enums::ShipClass::Starbase);

            let mut attack = 0.0;
            let mut defense = 0.0;
            for ship in &ships {
                if let Some(stats) = config.sections.ship_stats.get(&ship.class) {
                    let tech_mult = ec4x_common::constants::WEAPON_TECH_MULTIPLIER_BASE
                        .powi(ship.tech_level.saturating_sub(1) as i32);
                    attack += stats.attack as f64 * tech_mult;
                    defense += stats.defense as f64;
                }
            }

            by_house.entry(squadron.owner).or_default().push(CombatSquadron {
                id: squadron.id,
                bucket,
                attack,
                defense,
                damage_taken: 0.0,
                crippled: ships.iter().any(|s| s.crippled),
                destroyed: false,
                is_spacelift,
                is_starbase,
            });
        }
    }

    by_house
        .into_iter()
        .map(|(owner, squadrons)| {
            let starting_strength: f64 = squadrons.iter().map(|s| s.defense).sum();
            TaskForce {
                is_homeworld_defender: homeworld_defenders.contains(&owner),
                owner,
                squadrons,
                starting_strength,
            }
        })
        .filter(|tf| !tf.squadrons.is_empty())
        .collect()
}
