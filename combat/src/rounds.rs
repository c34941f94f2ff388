//! Round-by-round combat resolution (§4.E): effective attack, per-bucket
//! proportional damage allocation, crit rolls, and the
//! crippled-then-destroyed damage thresholds.

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::enums::TargetBucket;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::taskforce::TaskForce;

/// Run up to `config.sections.combat_tables.max_rounds` rounds against
/// `task_forces`, mutating each squadron's `damage_taken`/`crippled`/
/// `destroyed` in place. Returns the number of rounds actually fought.
pub fn fight(task_forces: &mut [TaskForce], config: &AuthoritativeConfig, rng: &mut ChaCha8Rng) -> u32 {
    let tables = &config.sections.combat_tables;
    let mut rounds_fought = 0;

    for round in 1..=tables.max_rounds {
        let capable_forces = task_forces.iter().filter(|tf| tf.has_combat_capable_squadrons()).count();
        if capable_forces <= 1 {
            break;
        }
        rounds_fought = round;

        // Snapshot attack contributions per (attacker house index, bucket) before
        // any mutation this round, so simultaneous fire doesn't see partial results.
        let attacks_by_force: Vec<Vec<(TargetBucket, f64)>> = task_forces
            .iter()
            .map(|tf| {
                TargetBucket::all()
                    .iter()
                    .map(|&bucket| {
                        let total: f64 = tf
                            .squadrons_in_bucket(bucket)
                            .map(|s| s.effective_attack())
                            .sum();
                        (bucket, total)
                    })
                    .collect()
            })
            .collect();

        for (attacker_idx, attacks) in attacks_by_force.iter().enumerate() {
            let total_attack: f64 = attacks.iter().map(|(_, a)| a).sum();
            if total_attack <= 0.0 {
                continue;
            }
            for (defender_idx, defender) in task_forces.iter_mut().enumerate() {
                if defender_idx == attacker_idx || !defender.has_combat_capable_squadrons() {
                    continue;
                }
                apply_bucket_damage(defender, total_attack, tables, rng);
            }
        }
    }

    rounds_fought
}

fn apply_bucket_damage(
    defender: &mut TaskForce,
    incoming_total: f64,
    tables: &ec4x_common::config::CombatTables,
    rng: &mut ChaCha8Rng,
) {
    for &bucket in TargetBucket::all() {
        let weight = tables.bucket_weights.get(&bucket).copied().unwrap_or(0.0);
        let bucket_damage = incoming_total * weight;
        if bucket_damage <= 0.0 {
            continue;
        }
        let targets: Vec<usize> = defender
            .squadrons
            .iter()
            .enumerate()
            .filter(|(_, s)| s.bucket == bucket && s.is_combat_capable())
            .map(|(i, _)| i)
            .collect();
        if targets.is_empty() {
            continue;
        }
        let per_target = bucket_damage / targets.len() as f64;
        for idx in targets {
            let squadron = &mut defender.squadrons[idx];

            let crit_chance = tables.critical_hit_chance_percent;
            let mut rerolls = if squadron.is_starbase { tables.starbase_crit_rerolls } else { 0 };
            let mut is_crit = rng.gen_range(0..100) < crit_chance;
            while !is_crit && rerolls > 0 {
                rerolls -= 1;
                is_crit = rng.gen_range(0..100) < crit_chance;
            }
            let damage = if is_crit { per_target * 2.0 } else { per_target };

            squadron.damage_taken += damage;
            if !squadron.crippled && squadron.damage_taken >= squadron.defense {
                squadron.crippled = true;
            } else if squadron.crippled && squadron.damage_taken >= squadron.defense * 2.0 {
                squadron.destroyed = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taskforce::CombatSquadron;
    use ec4x_common::ids::{HouseId, SquadronId};

    fn squadron(id: u32, bucket: TargetBucket, attack: f64, defense: f64) -> CombatSquadron {
        CombatSquadron {
            id: SquadronId(id),
            bucket,
            attack,
            defense,
            damage_taken: 0.0,
            crippled: false,
            destroyed: false,
            is_spacelift: false,
            is_starbase: false,
        }
    }

    #[test]
    fn overwhelming_attacker_destroys_lone_defender() {
        let config = AuthoritativeConfig::default_for_tests();
        let mut rng = ec4x_common::rng::combat_rng(1, 1);
        let mut forces = vec![
            TaskForce {
                owner: HouseId(1),
                squadrons: vec![squadron(1, TargetBucket::Capital, 10_000.0, 50.0)],
                is_homeworld_defender: false,
                starting_strength: 50.0,
            },
            TaskForce {
                owner: HouseId(2),
                squadrons: vec![squadron(2, TargetBucket::Capital, 1.0, 50.0)],
                is_homeworld_defender: false,
                starting_strength: 50.0,
            },
        ];
        let rounds = fight(&mut forces, &config, &mut rng);
        assert!(rounds >= 1);
        assert!(forces[1].squadrons[0].destroyed);
    }

    #[test]
    fn evenly_matched_forces_exhaust_round_cap_or_resolve() {
        let config = AuthoritativeConfig::default_for_tests();
        let mut rng = ec4x_common::rng::combat_rng(1, 2);
        let mut forces = vec![
            TaskForce {
                owner: HouseId(1),
                squadrons: vec![squadron(1, TargetBucket::Capital, 5.0, 50.0)],
                is_homeworld_defender: false,
                starting_strength: 50.0,
            },
            TaskForce {
                owner: HouseId(2),
                squadrons: vec![squadron(2, TargetBucket::Capital, 5.0, 50.0)],
                is_homeworld_defender: false,
                starting_strength: 50.0,
            },
        ];
        let rounds = fight(&mut forces, &config, &mut rng);
        assert!(rounds <= config.sections.combat_tables.max_rounds);
    }
}
