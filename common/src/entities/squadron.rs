//! The `Squadron` entity (§3): a flagship plus escorts under one command
//! budget.

use serde::{Deserialize, Serialize};

use crate::enums::SquadronType;
use crate::ids::{HouseId, ShipId, SquadronId, SystemId};

/// A squadron: one flagship plus its escort ships, sharing a command
/// budget (§3 invariant: sum of escort command-costs <= flagship command
/// rating).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squadron {
    pub id: SquadronId,
    pub owner: HouseId,
    pub location: SystemId,
    pub squadron_type: SquadronType,
    pub flagship: ShipId,
    pub escorts: Vec<ShipId>,
}

impl Squadron {
    pub fn new(
        id: SquadronId,
        owner: HouseId,
        location: SystemId,
        squadron_type: SquadronType,
        flagship: ShipId,
    ) -> Self {
        Self {
            id,
            owner,
            location,
            squadron_type,
            flagship,
            escorts: Vec::new(),
        }
    }

    pub fn all_ships(&self) -> impl Iterator<Item = ShipId> + '_ {
        std::iter::once(self.flagship).chain(self.escorts.iter().copied())
    }

    pub fn ship_count(&self) -> usize {
        1 + self.escorts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ships_includes_flagship_first() {
        let mut squadron = Squadron::new(
            SquadronId(1),
            HouseId(1),
            SystemId(1),
            SquadronType::Combat,
            ShipId(10),
        );
        squadron.escorts.push(ShipId(11));
        let ships: Vec<_> = squadron.all_ships().collect();
        assert_eq!(ships, vec![ShipId(10), ShipId(11)]);
    }
}
