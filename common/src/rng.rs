//! Deterministic seeding (§4.D, §5). Every stochastic decision is drawn
//! from a PRNG seeded by a stable key so that `(state, orders)` always
//! produces bit-identical results.

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha3::{Digest, Sha3_256};

/// Derive a 32-byte seed from an arbitrary set of domain discriminators,
/// hashed with SHA3-256 so seeds for different discriminators are
/// independent even when the discriminators are numerically close.
fn derive_seed(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(b"EC4X_RNG_V1");
    for part in parts {
        hasher.update((part.len() as u32).to_le_bytes());
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    seed
}

/// The per-turn RNG used to seed the whole resolution pass (§4.D step 0).
pub fn turn_rng(turn: u64) -> ChaCha8Rng {
    ChaCha8Rng::from_seed(derive_seed(&[b"turn", &turn.to_le_bytes()]))
}

/// The RNG for one system's combat resolution (§4.E), independent of
/// other systems resolved in the same turn.
pub fn combat_rng(turn: u64, system: u32) -> ChaCha8Rng {
    ChaCha8Rng::from_seed(derive_seed(&[
        b"combat",
        &turn.to_le_bytes(),
        &system.to_le_bytes(),
    ]))
}

/// The RNG for one espionage attempt, keyed by (turn, attacker, target)
/// per §4.I.
pub fn espionage_rng(turn: u64, attacker: u32, target: u32) -> ChaCha8Rng {
    ChaCha8Rng::from_seed(derive_seed(&[
        b"espionage",
        &turn.to_le_bytes(),
        &attacker.to_le_bytes(),
        &target.to_le_bytes(),
    ]))
}

/// The RNG for a scout-survival roll, keyed by (turn, scout, observer)
/// per §4.I.
pub fn scout_survival_rng(turn: u64, scout_ship: u32, observer_house: u32) -> ChaCha8Rng {
    ChaCha8Rng::from_seed(derive_seed(&[
        b"scout",
        &turn.to_le_bytes(),
        &scout_ship.to_le_bytes(),
        &observer_house.to_le_bytes(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_turn_same_output() {
        let mut a = turn_rng(7);
        let mut b = turn_rng(7);
        let x: u64 = a.gen();
        let y: u64 = b.gen();
        assert_eq!(x, y);
    }

    #[test]
    fn different_turns_diverge() {
        let mut a = turn_rng(7);
        let mut b = turn_rng(8);
        let x: u64 = a.gen();
        let y: u64 = b.gen();
        assert_ne!(x, y);
    }

    #[test]
    fn combat_rng_independent_of_turn_rng() {
        let mut a = turn_rng(7);
        let mut b = combat_rng(7, 1);
        let x: u64 = a.gen();
        let y: u64 = b.gen();
        assert_ne!(x, y);
    }
}
