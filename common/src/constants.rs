//! Default tunables for the rules tables carried by `AuthoritativeConfig`
//! (§6). These are the values used when a caller builds a config without
//! overriding a section, and are also the numbers the §8 scenarios are
//! written against.

/// Souls per Population Transfer Unit (GLOSSARY: PTU).
pub const SOULS_PER_PTU: u64 = 50_000;

/// Souls per Population Unit (GLOSSARY: PU).
pub const SOULS_PER_PU: u64 = 1_000_000;

/// A colony below this soul count cannot accept inbound transfers or host
/// construction (§3 Colony invariant).
pub const MIN_FUNCTIONAL_SOULS: u64 = SOULS_PER_PTU;

/// A colony must retain at least one PU to remain a valid transfer source
/// (§4.F).
pub const MIN_SOURCE_SOULS: u64 = SOULS_PER_PU;

/// Starting souls for a newly colonized world (§8 S1).
pub const COLONY_FOUNDING_SOULS: u64 = SOULS_PER_PTU;

/// Prestige award for establishing a colony (§8 S1).
pub const ESTABLISH_COLONY_PRESTIGE: i64 = 10;

/// Prestige penalty per turn a colony sits blockaded (§4.F, §8 S2).
pub const BLOCKADE_PRESTIGE_PENALTY: i64 = 2;

/// Default GCO fraction lost to an active blockade (§4.F, §8 S2).
pub const BLOCKADE_DAMAGE_RATIO: f64 = 0.6;

/// Prestige lost by the attacker on a failed/detected espionage attempt
/// (§4.I, §8 S3).
pub const FAILED_ESPIONAGE_PRESTIGE_PENALTY: i64 = 3;

/// Maximum combat rounds per engagement (§4.E).
pub const MAX_COMBAT_ROUNDS: u32 = 20;

/// Tech multiplier base for effective attack: `1.10 ^ (wep_level - 1)`
/// (§4.E).
pub const WEAPON_TECH_MULTIPLIER_BASE: f64 = 1.10;

/// Attack multiplier applied to a crippled squadron (§4.E).
pub const CRIPPLED_ATTACK_MULTIPLIER: f64 = 0.5;

/// Starbases get one extra critical-hit reroll (§4.E).
pub const STARBASE_CRIT_REROLLS: u32 = 1;

/// Base critical hit chance, percent (§4.E).
pub const CRITICAL_HIT_CHANCE_PERCENT: u32 = 5;

/// Default retreat-strength threshold: a task force retreats when its
/// current strength falls below starting strength times this ratio and
/// ROE <= round number (§4.E).
pub const RETREAT_STRENGTH_THRESHOLD: f64 = 0.3;

/// IU lost by the colony on a successful invasion (§4.E).
pub const INVASION_IU_LOSS_RATIO: f64 = 0.25;

/// Bombardment infrastructure-damage diminishing-returns exponent per
/// round (§4.E): damage_round_n = base * factor^(n-1).
pub const BOMBARDMENT_DIMINISHING_FACTOR: f64 = 0.7;

/// Default bombardment rounds per turn (§4.E).
pub const BOMBARDMENT_ROUNDS_PER_TURN: u32 = 3;

/// Growth bonus per operational starbase, max 3 starbases counted
/// (§4.F).
pub const STARBASE_GROWTH_BONUS_PER_UNIT: f64 = 0.05;
pub const STARBASE_GROWTH_BONUS_MAX_UNITS: u32 = 3;

/// Cost surcharge per jump beyond the first for population transfer and
/// for bulk PTU shipping (§4.F).
pub const PER_JUMP_SURCHARGE: f64 = 0.20;

/// Ships built at a spaceport (vs. a shipyard) cost this multiplier in PP
/// (§4.F).
pub const SPACEPORT_SHIP_COST_MULTIPLIER: u32 = 2;

/// Turn cadence of upgrade turns: `turn mod 6 == 1` (§4.D).
pub const UPGRADE_TURN_MODULUS: u64 = 6;
pub const UPGRADE_TURN_REMAINDER: u64 = 1;

/// Consecutive negative-prestige turns before defensive-collapse
/// elimination becomes eligible (§4.D elimination check).
pub const DEFAULT_COLLAPSE_TURN_COUNT: u32 = 6;

/// Prestige threshold below which the collapse counter advances (§4.D).
pub const DEFAULT_COLLAPSE_PRESTIGE_THRESHOLD: i64 = 0;

/// Dishonored/isolated durations after breaking a NonAggression pact
/// (§4.J).
pub const DISHONORED_TURNS: u32 = 3;
pub const ISOLATED_TURNS: u32 = 5;

/// Prestige penalty for breaking a pact (§4.J).
pub const PACT_BREAK_PRESTIGE_PENALTY: i64 = 15;

/// Rolling tax-history window length, in turns (§3 House).
pub const TAX_HISTORY_WINDOW: usize = 6;

/// Default checkpoint cadence for full-state snapshots, in turns (§4.L).
pub const DEFAULT_SNAPSHOT_CHECKPOINT_CADENCE: u64 = 10;

/// Grace-turn countdown granted on a fresh capacity violation before it
/// is enforced (§3 Colony).
pub const DEFAULT_CAPACITY_VIOLATION_GRACE_TURNS: u32 = 2;

/// PP cost of a queued industrial-unit construction project (§4.F).
pub const INDUSTRIAL_PROJECT_PP_COST: u64 = 200;

/// PP cost of a queued building construction project (§4.F).
pub const BUILDING_PROJECT_PP_COST: u64 = 800;

/// PP cost of a queued terraform project (§4.F).
pub const TERRAFORM_PROJECT_PP_COST: u64 = 1_500;

/// PP cost of a fleet repair project, per crippled ship (§4.F).
pub const REPAIR_PROJECT_PP_COST_PER_SHIP: u64 = 100;

/// Fraction of a squadron's build cost refunded on scrapping (§4.F).
pub const SCRAP_REFUND_RATIO: f64 = 0.5;
