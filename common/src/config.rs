//! The authoritative config snapshot (§4.C, §6). Loading from disk is out
//! of scope (§1); this module only validates and hashes an
//! already-materialized snapshot and carries the rules tables every
//! subsystem reads.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::canonical::content_hash;
use crate::constants::*;
use crate::enums::{PlanetClass, ResourceRating, ShipClass, TargetBucket, TechField};

/// Names of the sections a valid config must carry (§6).
pub const REQUIRED_SECTIONS: &[&str] = &[
    "tech_costs",
    "ship_stats",
    "prestige_values",
    "combat_tables",
    "planet_classes",
    "population_rules",
    "espionage_rules",
];

/// Tech level -> RP cost to advance from that level to the next (§4.H).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechCosts {
    pub by_field: BTreeMap<TechField, BTreeMap<u32, u64>>,
    pub el_costs: BTreeMap<u32, u64>,
    pub sl_costs: BTreeMap<u32, u64>,
}

impl TechCosts {
    pub fn cost_for_next_level(&self, field: TechField, current_level: u32) -> Option<u64> {
        self.by_field.get(&field).and_then(|t| t.get(&current_level)).copied()
    }
}

/// Per-class ship stats (§3 Ship).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipStats {
    pub attack: u32,
    pub defense: u32,
    pub command_cost: u32,
    pub command_rating: u32,
    pub build_cost_pp: u32,
    pub upkeep: u32,
    pub carry_limit: u32,
}

/// Prestige award/penalty table referenced throughout the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrestigeValues {
    pub establish_colony: i64,
    pub blockade_penalty_per_turn: i64,
    pub failed_espionage_penalty: i64,
    pub pact_break_penalty: i64,
    pub tech_advance_award: i64,
}

impl Default for PrestigeValues {
    fn default() -> Self {
        Self {
            establish_colony: ESTABLISH_COLONY_PRESTIGE,
            blockade_penalty_per_turn: BLOCKADE_PRESTIGE_PENALTY,
            failed_espionage_penalty: FAILED_ESPIONAGE_PRESTIGE_PENALTY,
            pact_break_penalty: PACT_BREAK_PRESTIGE_PENALTY,
            tech_advance_award: 5,
        }
    }
}

/// Combat weights and rules, per Open Question 3: the weight table and
/// crippled/destroyed tie-break are config-driven rather than re-derived
/// (decision recorded in DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatTables {
    pub bucket_weights: BTreeMap<TargetBucket, f64>,
    pub max_rounds: u32,
    pub critical_hit_chance_percent: u32,
    pub starbase_crit_rerolls: u32,
    pub retreat_strength_threshold: f64,
    pub invasion_iu_loss_ratio: f64,
    pub bombardment_rounds_per_turn: u32,
    pub bombardment_diminishing_factor: f64,
}

impl Default for CombatTables {
    fn default() -> Self {
        let mut bucket_weights = BTreeMap::new();
        bucket_weights.insert(TargetBucket::Raider, 0.05);
        bucket_weights.insert(TargetBucket::Fighter, 0.15);
        bucket_weights.insert(TargetBucket::Destroyer, 0.25);
        bucket_weights.insert(TargetBucket::Capital, 0.45);
        bucket_weights.insert(TargetBucket::Starbase, 0.10);
        Self {
            bucket_weights,
            max_rounds: MAX_COMBAT_ROUNDS,
            critical_hit_chance_percent: CRITICAL_HIT_CHANCE_PERCENT,
            starbase_crit_rerolls: STARBASE_CRIT_REROLLS,
            retreat_strength_threshold: RETREAT_STRENGTH_THRESHOLD,
            invasion_iu_loss_ratio: INVASION_IU_LOSS_RATIO,
            bombardment_rounds_per_turn: BOMBARDMENT_ROUNDS_PER_TURN,
            bombardment_diminishing_factor: BOMBARDMENT_DIMINISHING_FACTOR,
        }
    }
}

/// Per-planet-class production parameters (§4.F).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetClassRules {
    pub raw_production_index: BTreeMap<PlanetClass, u32>,
    pub resource_rating_multiplier: BTreeMap<ResourceRating, f64>,
}

impl Default for PlanetClassRules {
    fn default() -> Self {
        let mut raw_production_index = BTreeMap::new();
        for class in [
            PlanetClass::Benign,
            PlanetClass::Hostile,
            PlanetClass::Barren,
            PlanetClass::GasGiant,
            PlanetClass::Asteroid,
        ] {
            raw_production_index.insert(class, class.raw_production_index());
        }
        let mut resource_rating_multiplier = BTreeMap::new();
        resource_rating_multiplier.insert(ResourceRating::Poor, 0.75);
        resource_rating_multiplier.insert(ResourceRating::Abundant, 1.0);
        resource_rating_multiplier.insert(ResourceRating::Rich, 1.25);
        resource_rating_multiplier.insert(ResourceRating::UltraRich, 1.5);
        Self {
            raw_production_index,
            resource_rating_multiplier,
        }
    }
}

/// Population growth and transfer parameters (§4.F).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationRules {
    pub souls_per_ptu: u64,
    pub souls_per_pu: u64,
    pub base_growth_ratio: f64,
    pub starbase_growth_bonus_per_unit: f64,
    pub starbase_growth_bonus_max_units: u32,
    pub per_jump_surcharge: f64,
}

impl Default for PopulationRules {
    fn default() -> Self {
        Self {
            souls_per_ptu: SOULS_PER_PTU,
            souls_per_pu: SOULS_PER_PU,
            base_growth_ratio: 0.02,
            starbase_growth_bonus_per_unit: STARBASE_GROWTH_BONUS_PER_UNIT,
            starbase_growth_bonus_max_units: STARBASE_GROWTH_BONUS_MAX_UNITS,
            per_jump_surcharge: PER_JUMP_SURCHARGE,
        }
    }
}

/// Espionage detection and effect parameters (§4.I).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EspionageRules {
    pub ongoing_effect_duration_turns: u32,
    pub srp_theft_ratio: f64,
    pub industry_sabotage_ratio: f64,
    pub tax_sabotage_ratio: f64,
}

impl Default for EspionageRules {
    fn default() -> Self {
        Self {
            ongoing_effect_duration_turns: 3,
            srp_theft_ratio: 0.15,
            industry_sabotage_ratio: 0.20,
            tax_sabotage_ratio: 0.30,
        }
    }
}

/// The full rules payload carried by a config snapshot (§6 required
/// sections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesSections {
    pub tech_costs: TechCosts,
    pub ship_stats: BTreeMap<ShipClass, ShipStats>,
    pub prestige_values: PrestigeValues,
    pub combat_tables: CombatTables,
    pub planet_classes: PlanetClassRules,
    pub population_rules: PopulationRules,
    pub espionage_rules: EspionageRules,
}

/// The authoritative config snapshot (§4.C, §6): schema version, content
/// hash, capability set, and required sections. A config is valid iff
/// all required sections and capabilities are present and its computed
/// hash equals its declared hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeConfig {
    pub schema_version: u32,
    pub declared_hash: [u8; 32],
    pub capabilities: BTreeSet<String>,
    pub sections: RulesSections,
}

/// The subset of a config that participates in the content hash, kept
/// separate from `declared_hash` so hashing never includes itself.
#[derive(Serialize)]
struct HashedConfig<'a> {
    schema_version: u32,
    capabilities: &'a BTreeSet<String>,
    sections: &'a RulesSections,
}

impl AuthoritativeConfig {
    /// Build a config snapshot, computing and stamping its own content
    /// hash over schema version, capabilities, and sections in that
    /// declared order (§4.L canonical serialization note).
    pub fn build(
        schema_version: u32,
        capabilities: BTreeSet<String>,
        sections: RulesSections,
    ) -> Result<Self, crate::errors::CoreError> {
        let hashed = HashedConfig {
            schema_version,
            capabilities: &capabilities,
            sections: &sections,
        };
        let declared_hash = content_hash(&hashed)?;
        Ok(Self {
            schema_version,
            declared_hash,
            capabilities,
            sections,
        })
    }

    /// Recompute the hash over the current contents and compare against
    /// the declared hash (§6 validity rule).
    pub fn hash_matches(&self) -> Result<bool, crate::errors::CoreError> {
        let hashed = HashedConfig {
            schema_version: self.schema_version,
            capabilities: &self.capabilities,
            sections: &self.sections,
        };
        Ok(content_hash(&hashed)? == self.declared_hash)
    }

    /// A config is valid iff every required section is present (always
    /// true by construction of `RulesSections`, which is not an
    /// `Option`-shaped struct — the check here exists for the
    /// capability-set half of the validity rule) and its hash matches.
    pub fn is_valid(&self, required_capabilities: &[&str]) -> Result<bool, crate::errors::CoreError> {
        if !self.hash_matches()? {
            return Ok(false);
        }
        Ok(required_capabilities
            .iter()
            .all(|cap| self.capabilities.contains(*cap)))
    }

    /// Default test/demo config with every section populated from the
    /// constants in this crate.
    pub fn default_for_tests() -> Self {
        let mut capabilities = BTreeSet::new();
        for section in REQUIRED_SECTIONS {
            capabilities.insert(section.to_string());
        }
        let mut ship_stats = BTreeMap::new();
        for class in [
            ShipClass::Scout,
            ShipClass::Interceptor,
            ShipClass::Corvette,
            ShipClass::Frigate,
            ShipClass::Destroyer,
            ShipClass::LightCruiser,
            ShipClass::HeavyCruiser,
            ShipClass::Battlecruiser,
            ShipClass::Battleship,
            ShipClass::Dreadnought,
            ShipClass::PlanetBreaker,
            ShipClass::Carrier,
            ShipClass::Fighter,
            ShipClass::Etac,
            ShipClass::Freighter,
            ShipClass::TroopTransport,
            ShipClass::Starbase,
        ] {
            ship_stats.insert(class, default_ship_stats(class));
        }
        let mut by_field = BTreeMap::new();
        for field in TechField::all() {
            let mut levels = BTreeMap::new();
            for lvl in 1..=10u32 {
                levels.insert(lvl, (lvl as u64).pow(2) * 100);
            }
            by_field.insert(*field, levels);
        }
        let mut el_costs = BTreeMap::new();
        let mut sl_costs = BTreeMap::new();
        for lvl in 1..=10u32 {
            el_costs.insert(lvl, (lvl as u64) * 500);
            sl_costs.insert(lvl, (lvl as u64) * 500);
        }
        let sections = RulesSections {
            tech_costs: TechCosts {
                by_field,
                el_costs,
                sl_costs,
            },
            ship_stats,
            prestige_values: PrestigeValues::default(),
            combat_tables: CombatTables::default(),
            planet_classes: PlanetClassRules::default(),
            population_rules: PopulationRules::default(),
            espionage_rules: EspionageRules::default(),
        };
        AuthoritativeConfig::build(1, capabilities, sections).expect("default config must hash")
    }
}

fn default_ship_stats(class: ShipClass) -> ShipStats {
    let (attack, defense, cmd_cost, cmd_rating, cost, upkeep, carry) = match class {
        ShipClass::Scout => (1, 2, 1, 0, 20, 1, 0),
        ShipClass::Interceptor => (3, 3, 1, 0, 30, 1, 0),
        ShipClass::Corvette => (5, 5, 2, 0, 50, 2, 0),
        ShipClass::Frigate => (8, 8, 2, 0, 80, 2, 0),
        ShipClass::Destroyer => (12, 10, 3, 0, 120, 3, 0),
        ShipClass::LightCruiser => (18, 16, 4, 8, 200, 4, 0),
        ShipClass::HeavyCruiser => (26, 24, 5, 12, 300, 6, 0),
        ShipClass::Battlecruiser => (34, 30, 6, 16, 420, 8, 0),
        ShipClass::Battleship => (45, 42, 7, 24, 600, 12, 0),
        ShipClass::Dreadnought => (60, 58, 9, 36, 900, 18, 0),
        ShipClass::PlanetBreaker => (120, 100, 12, 60, 3000, 40, 0),
        ShipClass::Carrier => (10, 40, 8, 20, 700, 14, 6),
        ShipClass::Fighter => (6, 2, 1, 0, 15, 0, 0),
        ShipClass::Etac => (0, 4, 1, 0, 150, 2, 1),
        ShipClass::Freighter => (0, 6, 1, 0, 100, 2, 10),
        ShipClass::TroopTransport => (1, 6, 1, 0, 120, 2, 8),
        ShipClass::Starbase => (50, 120, 0, 0, 2000, 20, 0),
    };
    ShipStats {
        attack,
        defense,
        command_cost: cmd_cost,
        command_rating: cmd_rating,
        build_cost_pp: cost,
        upkeep,
        carry_limit: carry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AuthoritativeConfig::default_for_tests();
        assert!(config
            .is_valid(REQUIRED_SECTIONS)
            .expect("hashing should not fail"));
    }

    #[test]
    fn tampering_breaks_hash() {
        let mut config = AuthoritativeConfig::default_for_tests();
        config.sections.prestige_values.establish_colony += 1;
        assert!(!config.hash_matches().unwrap());
    }
}
