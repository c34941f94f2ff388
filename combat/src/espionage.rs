//! Espionage action resolution and scout survival (§4.I).

use ec4x_common::entities::{House, OngoingEffect};
use ec4x_common::enums::{EspionageActionKind, OngoingEffectKind, TechField};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::report::EspionageReport;

/// Resolve one espionage attempt: detection roll compares attacker
/// ELI+EBP against target CIC+CIP (§4.I). Espionage tech level stands in
/// for both ELI (attacking) and CIC (defending), per the spec's
/// single-field tech model.
pub fn resolve_espionage(
    attacker: &House,
    target: &House,
    action: EspionageActionKind,
    rng: &mut ChaCha8Rng,
) -> (EspionageReport, Option<OngoingEffect>) {
    let attacker_score = attacker.tech_tree.field_level(TechField::Espionage) as f64 * 10.0
        + attacker.espionage_budget.ebp_points as f64;
    let target_score = target.tech_tree.field_level(TechField::Espionage) as f64 * 10.0
        + target.espionage_budget.cip_points as f64;

    let roll: f64 = rng.gen_range(0.0..1.0);
    let total = attacker_score + target_score;
    let attacker_share = if total > 0.0 { attacker_score / total } else { 0.5 };
    let succeeded = roll < attacker_share && attacker_score > target_score;
    let detected = !succeeded || rng.gen_bool(0.3);

    let mut effect = None;
    let mut srp_stolen = 0;
    if succeeded {
        match action {
            EspionageActionKind::TechTheft => {
                srp_stolen = (target.research.srp as f64 * 0.15).round() as u64;
            }
            EspionageActionKind::SabotageIndustry => {
                effect = Some(OngoingEffect::new(target.id, OngoingEffectKind::NcvReduction, 0.20, 3));
            }
            EspionageActionKind::SabotageTax => {
                effect = Some(OngoingEffect::new(target.id, OngoingEffectKind::TaxReduction, 0.30, 3));
            }
            EspionageActionKind::CrippleStarbase => {
                effect = Some(OngoingEffect::new(target.id, OngoingEffectKind::StarbaseCrippled, 1.0, 1));
            }
            EspionageActionKind::PlantScout => {}
        }
    }

    let report = EspionageReport {
        attacker: attacker.id,
        target: target.id,
        detected,
        succeeded,
        srp_stolen,
    };
    (report, effect)
}

/// Scout-survival check: each Income phase, an outstanding spy scout
/// rolls against the rival's effective espionage strength (§4.I).
pub fn scout_survives(
    owner_eli_level: u32,
    rival_eli_level: u32,
    rival_has_starbase: bool,
    rng: &mut ChaCha8Rng,
) -> bool {
    let mut rival_strength = rival_eli_level as f64;
    if rival_has_starbase {
        rival_strength *= 1.5;
    }
    let owner_strength = owner_eli_level as f64;
    let detection_chance = (rival_strength / (rival_strength + owner_strength + 1.0)).clamp(0.0, 0.95);
    rng.gen_range(0.0..1.0) >= detection_chance
}
