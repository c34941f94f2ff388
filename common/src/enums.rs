//! Scalar enums of the domain model (§3, §4.B). Parsed once at the wire
//! boundary, never string-typed internally, per the "string-typed IDs and
//! enum names" re-architecture note (§9).

use serde::{Deserialize, Serialize};

/// Jump-lane classification (§3). The lane graph is symmetric: if a
/// system has an outgoing `Major` lane to another, that system has a
/// `Major` lane back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneClass {
    Major,
    Minor,
    Restricted,
}

/// Planet classification, driving raw production index (§4.F) and
/// colonization prestige/ETAC rules (§4.G).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanetClass {
    Benign,
    Hostile,
    Barren,
    GasGiant,
    Asteroid,
}

impl PlanetClass {
    /// Raw production index used in GCO = PU × raw_index + IU × energy_mod.
    pub fn raw_production_index(self) -> u32 {
        match self {
            PlanetClass::Benign => 10,
            PlanetClass::Hostile => 6,
            PlanetClass::Barren => 4,
            PlanetClass::GasGiant => 3,
            PlanetClass::Asteroid => 2,
        }
    }

    /// The class one completed terraform project shifts a colony toward
    /// (§4.F). `Benign` is already the top tier and is unaffected.
    pub fn terraformed(self) -> Self {
        match self {
            PlanetClass::Asteroid => PlanetClass::GasGiant,
            PlanetClass::GasGiant => PlanetClass::Barren,
            PlanetClass::Barren => PlanetClass::Hostile,
            PlanetClass::Hostile => PlanetClass::Benign,
            PlanetClass::Benign => PlanetClass::Benign,
        }
    }
}

/// Resource rating tiers for a colony, affecting construction and
/// terraform costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceRating {
    Poor,
    Abundant,
    Rich,
    UltraRich,
}

/// Per-field tech advancement tracks (§3, §4.H). EL and SL are the two
/// scalar tech levels; everything else is a per-field track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum TechField {
    Weapons,
    Shields,
    Propulsion,
    Espionage,
    Construction,
    Terraforming,
}

impl TechField {
    pub fn all() -> &'static [TechField] {
        &[
            TechField::Weapons,
            TechField::Shields,
            TechField::Propulsion,
            TechField::Espionage,
            TechField::Construction,
            TechField::Terraforming,
        ]
    }
}

/// Ship class; ~17 variants per §3, grouped by role for targeting
/// buckets (§4.E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    Scout,
    Interceptor,
    Corvette,
    Frigate,
    Destroyer,
    LightCruiser,
    HeavyCruiser,
    Battlecruiser,
    Battleship,
    Dreadnought,
    PlanetBreaker,
    Carrier,
    Fighter,
    Etac,
    Freighter,
    TroopTransport,
    Starbase,
}

impl ShipClass {
    /// Which targeting bucket (§4.E) this class's flagship role falls into.
    pub fn targeting_bucket(self) -> TargetBucket {
        match self {
            ShipClass::Scout | ShipClass::Interceptor => TargetBucket::Raider,
            ShipClass::Fighter => TargetBucket::Fighter,
            ShipClass::Corvette | ShipClass::Frigate | ShipClass::Destroyer => {
                TargetBucket::Destroyer
            }
            ShipClass::LightCruiser
            | ShipClass::HeavyCruiser
            | ShipClass::Battlecruiser
            | ShipClass::Battleship
            | ShipClass::Dreadnought
            | ShipClass::PlanetBreaker
            | ShipClass::Carrier => TargetBucket::Capital,
            ShipClass::Starbase => TargetBucket::Starbase,
            ShipClass::Etac | ShipClass::Freighter | ShipClass::TroopTransport => {
                TargetBucket::Destroyer
            }
        }
    }

    pub fn is_spacelift(self) -> bool {
        matches!(
            self,
            ShipClass::Etac | ShipClass::Freighter | ShipClass::TroopTransport
        )
    }

    pub fn is_fighter(self) -> bool {
        matches!(self, ShipClass::Fighter)
    }

    /// Parse a build-order item tag (§6 `BuildCommand::item_tag`) into a
    /// ship class. Case-sensitive; matches the variant name exactly.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "Scout" => ShipClass::Scout,
            "Interceptor" => ShipClass::Interceptor,
            "Corvette" => ShipClass::Corvette,
            "Frigate" => ShipClass::Frigate,
            "Destroyer" => ShipClass::Destroyer,
            "LightCruiser" => ShipClass::LightCruiser,
            "HeavyCruiser" => ShipClass::HeavyCruiser,
            "Battlecruiser" => ShipClass::Battlecruiser,
            "Battleship" => ShipClass::Battleship,
            "Dreadnought" => ShipClass::Dreadnought,
            "PlanetBreaker" => ShipClass::PlanetBreaker,
            "Carrier" => ShipClass::Carrier,
            "Fighter" => ShipClass::Fighter,
            "Etac" => ShipClass::Etac,
            "Freighter" => ShipClass::Freighter,
            "TroopTransport" => ShipClass::TroopTransport,
            "Starbase" => ShipClass::Starbase,
            _ => return None,
        })
    }
}

/// Targeting buckets for combat (§4.E). `Raider` is only targetable by
/// squadrons with detection-capable Espionage tech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TargetBucket {
    Raider,
    Fighter,
    Destroyer,
    Capital,
    Starbase,
}

impl TargetBucket {
    pub fn all() -> &'static [TargetBucket] {
        &[
            TargetBucket::Raider,
            TargetBucket::Fighter,
            TargetBucket::Destroyer,
            TargetBucket::Capital,
            TargetBucket::Starbase,
        ]
    }
}

/// Squadron composition type (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquadronType {
    Combat,
    Spacelift,
}

/// Fleet mission state (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionState {
    Idle,
    Moving,
    OnMission,
    Returning,
}

/// Cargo kind carried in a ship's cargo slot (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CargoKind {
    Marines,
    Colonists,
}

/// Diplomatic relation between an ordered pair of houses (§3, §4.J).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiplomaticState {
    Neutral,
    NonAggression,
    Enemy,
    Allied,
}

/// Construction/repair project kind (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectKind {
    Ship,
    Building,
    Industrial,
    Repair,
    Terraform,
}

/// Espionage action kinds submitted in an order packet (§4.I).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EspionageActionKind {
    TechTheft,
    SabotageIndustry,
    SabotageTax,
    CrippleStarbase,
    PlantScout,
}

/// Ongoing effect kind, an espionage aftermath applied over several
/// Maintenance phases (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OngoingEffectKind {
    SrpReduction,
    NcvReduction,
    TaxReduction,
    StarbaseCrippled,
}

/// Intel quality tiers for fog-of-war projection (§4.K), ordered worst to
/// best so `max` picks the best observation a house has of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntelQuality {
    Visual,
    Scan,
    Spy,
    Perfect,
}

/// Dynamic game-act progression (§3, GLOSSARY), driven by thresholds, not
/// turn count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Act {
    LandGrab,
    Consolidation,
    TotalWar,
    Endgame,
}

/// Game lifecycle status (§4.D postcondition, §6 game-definition event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Placeholder,
    Cancelled,
    Removed,
    Completed,
}

/// Fleet order priority classes sorted ascending per §5 ordering
/// guarantee; ties are broken by fleet id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FleetOrderPriority {
    Move = 0,
    Patrol = 1,
    SeekHome = 2,
    Colonize = 3,
    JoinFleet = 4,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targeting_buckets_cover_combat_classes() {
        assert_eq!(ShipClass::Dreadnought.targeting_bucket(), TargetBucket::Capital);
        assert_eq!(ShipClass::Scout.targeting_bucket(), TargetBucket::Raider);
        assert_eq!(ShipClass::Fighter.targeting_bucket(), TargetBucket::Fighter);
        assert_eq!(ShipClass::Starbase.targeting_bucket(), TargetBucket::Starbase);
    }

    #[test]
    fn spacelift_classification() {
        assert!(ShipClass::Etac.is_spacelift());
        assert!(!ShipClass::Frigate.is_spacelift());
    }

    #[test]
    fn intel_quality_ordering() {
        assert!(IntelQuality::Perfect > IntelQuality::Spy);
        assert!(IntelQuality::Spy > IntelQuality::Scan);
        assert!(IntelQuality::Scan > IntelQuality::Visual);
    }
}
