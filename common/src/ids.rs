//! Opaque entity identifiers.
//!
//! Every entity kind gets its own newtype around `u32` so the compiler
//! rejects mixing a `FleetId` with a `ColonyId`. Zero is reserved as
//! "none" per the data model; allocation is monotonic per kind within a
//! game and freed ids are never reused.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! scalar_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u32);

        impl $name {
            /// The reserved "no entity" sentinel.
            pub const NONE: $name = $name(0);

            pub fn is_none(self) -> bool {
                self.0 == 0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::NONE
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                $name(value)
            }
        }
    };
}

scalar_id!(HouseId, "Identifies a player's house.");
scalar_id!(SystemId, "Identifies a star-map node.");
scalar_id!(ColonyId, "Identifies a colony.");
scalar_id!(FleetId, "Identifies a fleet.");
scalar_id!(SquadronId, "Identifies a squadron.");
scalar_id!(ShipId, "Identifies an individual ship.");
scalar_id!(GroundUnitId, "Identifies a ground unit (army or marine stack).");
scalar_id!(ProjectId, "Identifies a construction or repair project.");
scalar_id!(TransitId, "Identifies a population-in-transit entry.");
scalar_id!(ScoutId, "Identifies a planted espionage scout asset.");

/// A facility is addressed by kind plus a per-kind monotonic id, since the
/// kinds have distinct effective-dock rules (§4.F) and must never collide
/// with each other even though they share one namespace conceptually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacilityId {
    pub kind: FacilityKind,
    pub index: u32,
}

impl FacilityId {
    pub const fn new(kind: FacilityKind, index: u32) -> Self {
        Self { kind, index }
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.index)
    }
}

/// Facility kinds, each with its own effective-dock and queueing rules
/// (§3, §4.F). `Kastra` and `Neoria` are colony ground-defense and
/// population-growth facilities respectively; they do not host
/// construction docks but participate in the same id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FacilityKind {
    Spaceport,
    Shipyard,
    Drydock,
    Starbase,
    Kastra,
    Neoria,
}

impl FacilityKind {
    /// Base effective-dock count before crippling, per §4.F.
    pub fn base_docks(self) -> u32 {
        match self {
            FacilityKind::Spaceport => 5,
            FacilityKind::Shipyard => 10,
            FacilityKind::Drydock => 10,
            FacilityKind::Starbase | FacilityKind::Kastra | FacilityKind::Neoria => 0,
        }
    }

    pub fn hosts_construction(self) -> bool {
        matches!(self, FacilityKind::Spaceport | FacilityKind::Shipyard)
    }

    /// Parse a build-order item tag (§6 `BuildCommand::item_tag`) into a
    /// facility kind. Case-sensitive; matches the variant name exactly.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "Spaceport" => FacilityKind::Spaceport,
            "Shipyard" => FacilityKind::Shipyard,
            "Drydock" => FacilityKind::Drydock,
            "Starbase" => FacilityKind::Starbase,
            "Kastra" => FacilityKind::Kastra,
            "Neoria" => FacilityKind::Neoria,
            _ => return None,
        })
    }

    pub fn hosts_repair(self) -> bool {
        matches!(self, FacilityKind::Drydock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_zero() {
        assert!(HouseId::NONE.is_none());
        assert_eq!(HouseId::default(), HouseId(0));
    }

    #[test]
    fn ids_are_distinguishable_types() {
        let h = HouseId(3);
        let c = ColonyId(3);
        assert_eq!(h.0, c.0);
        // Compile-time: h and c cannot be compared directly, which is the point.
    }

    #[test]
    fn facility_docks() {
        assert_eq!(FacilityKind::Spaceport.base_docks(), 5);
        assert_eq!(FacilityKind::Shipyard.base_docks(), 10);
        assert_eq!(FacilityKind::Starbase.base_docks(), 0);
    }
}
