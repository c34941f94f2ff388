//! Degraded intel on a colony or fleet, tiered by `IntelQuality` (§4.K).

use serde::{Deserialize, Serialize};

use ec4x_common::enums::IntelQuality;
use ec4x_common::ids::{ColonyId, FleetId, HouseId, SystemId};

/// What a house knows about a colony it does not own, fields gated by
/// the best `IntelQuality` it has observed it at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonyIntel {
    pub colony: ColonyId,
    pub system: SystemId,
    pub owner: HouseId,
    pub quality: IntelQuality,
    pub last_observed_turn: u64,
    pub estimated_population_units: Option<u64>,
    pub estimated_industrial_units: Option<u32>,
    pub estimated_defenses: Option<u32>,
}

impl ColonyIntel {
    /// Owner is always visible at `Visual` or better; everything past
    /// that is gated by quality tier (§4.K).
    pub fn new(colony: ColonyId, system: SystemId, owner: HouseId, quality: IntelQuality, turn: u64) -> Self {
        Self {
            colony,
            system,
            owner,
            quality,
            last_observed_turn: turn,
            estimated_population_units: None,
            estimated_industrial_units: None,
            estimated_defenses: None,
        }
    }
}

/// What a house knows about a fleet it does not own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetIntel {
    pub fleet: FleetId,
    pub owner: HouseId,
    pub location: SystemId,
    pub quality: IntelQuality,
    pub estimated_ship_count: Option<u32>,
    pub last_detected_turn: u64,
}

impl FleetIntel {
    pub fn new(fleet: FleetId, owner: HouseId, location: SystemId, quality: IntelQuality, turn: u64) -> Self {
        Self {
            fleet,
            owner,
            location,
            quality,
            estimated_ship_count: None,
            last_detected_turn: turn,
        }
    }
}

/// The field set a given intel quality unlocks (§4.K). `Visual` sees
/// only presence, `Scan` adds a rough population/ship-count estimate,
/// `Spy` adds industry and defenses, `Perfect` is exact.
pub fn apply_quality_fields(intel: &mut ColonyIntel, population_units: u64, industrial_units: u32, defenses: u32) {
    match intel.quality {
        IntelQuality::Visual => {}
        IntelQuality::Scan => {
            intel.estimated_population_units = Some(round_to_nearest(population_units, 1_000_000));
        }
        IntelQuality::Spy => {
            intel.estimated_population_units = Some(round_to_nearest(population_units, 100_000));
            intel.estimated_industrial_units = Some(industrial_units);
        }
        IntelQuality::Perfect => {
            intel.estimated_population_units = Some(population_units);
            intel.estimated_industrial_units = Some(industrial_units);
            intel.estimated_defenses = Some(defenses);
        }
    }
}

fn round_to_nearest(value: u64, step: u64) -> u64 {
    if step == 0 {
        return value;
    }
    ((value + step / 2) / step) * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_quality_reveals_nothing_numeric() {
        let mut intel = ColonyIntel::new(ColonyId(1), SystemId(1), HouseId(1), IntelQuality::Visual, 1);
        apply_quality_fields(&mut intel, 5_000_000, 10, 3);
        assert!(intel.estimated_population_units.is_none());
    }

    #[test]
    fn perfect_quality_reveals_exact_figures() {
        let mut intel = ColonyIntel::new(ColonyId(1), SystemId(1), HouseId(1), IntelQuality::Perfect, 1);
        apply_quality_fields(&mut intel, 5_000_000, 10, 3);
        assert_eq!(intel.estimated_population_units, Some(5_000_000));
        assert_eq!(intel.estimated_defenses, Some(3));
    }
}
