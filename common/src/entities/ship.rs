//! The `Ship` entity (§3).

use serde::{Deserialize, Serialize};

use crate::enums::CargoKind;
use crate::ids::ShipId;
use crate::{enums::ShipClass, ids::SquadronId};

/// An optional cargo slot, typed by kind with a quantity bounded by the
/// ship's carry limit (§3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CargoSlot {
    pub kind: CargoKind,
    pub quantity: u32,
}

/// A single ship instance (§3). Crippled is a binary flag; full
/// destruction removes the ship from the store entirely rather than
/// leaving a "destroyed" tombstone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub class: ShipClass,
    pub tech_level: u32,
    pub crippled: bool,
    pub cargo: Option<CargoSlot>,
    pub assigned_carrier: Option<ShipId>,
    pub embarked_fighters: Vec<SquadronId>,
}

impl Ship {
    pub fn new(id: ShipId, class: ShipClass, tech_level: u32) -> Self {
        Self {
            id,
            class,
            tech_level,
            crippled: false,
            cargo: None,
            assigned_carrier: None,
            embarked_fighters: Vec::new(),
        }
    }

    pub fn is_carrier(&self) -> bool {
        matches!(self.class, ShipClass::Carrier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ship_is_not_crippled() {
        let ship = Ship::new(ShipId(1), ShipClass::Frigate, 1);
        assert!(!ship.crippled);
        assert!(ship.cargo.is_none());
    }
}
