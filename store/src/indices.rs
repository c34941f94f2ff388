//! Secondary indices (§4.A): key -> ordered list of entity ids. Owned
//! and maintained by `GameState`'s mutators, never by the entities
//! themselves, so a location/owner change is always a single atomic
//! step across primary storage and every affected index.

use std::collections::HashMap;
use std::hash::Hash;

/// A one-to-many index from a key (house, system, fleet, colony, ...) to
/// the ids currently keyed under it.
#[derive(Debug, Clone)]
pub struct SecondaryIndex<K: Eq + Hash + Copy, V: Eq + Copy> {
    by_key: HashMap<K, Vec<V>>,
}

impl<K: Eq + Hash + Copy, V: Eq + Copy> Default for SecondaryIndex<K, V> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Copy, V: Eq + Copy> SecondaryIndex<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, value: V) {
        let bucket = self.by_key.entry(key).or_default();
        if !bucket.contains(&value) {
            bucket.push(value);
        }
    }

    /// Move `value` from `old_key` to `new_key` in one step, so the
    /// index never observes a state where the entity is keyed under
    /// both or neither (§4.A contract).
    pub fn rekey(&mut self, old_key: K, new_key: K, value: V) {
        self.remove(old_key, value);
        self.insert(new_key, value);
    }

    pub fn remove(&mut self, key: K, value: V) {
        if let Some(bucket) = self.by_key.get_mut(&key) {
            bucket.retain(|v| *v != value);
            if bucket.is_empty() {
                self.by_key.remove(&key);
            }
        }
    }

    pub fn get(&self, key: K) -> &[V] {
        self.by_key.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let mut index: SecondaryIndex<u32, u32> = SecondaryIndex::new();
        index.insert(1, 100);
        index.insert(1, 101);
        assert_eq!(index.get(1), &[100, 101]);
    }

    #[test]
    fn rekey_moves_atomically() {
        let mut index: SecondaryIndex<u32, u32> = SecondaryIndex::new();
        index.insert(1, 100);
        index.rekey(1, 2, 100);
        assert_eq!(index.get(1), &[] as &[u32]);
        assert_eq!(index.get(2), &[100]);
    }

    #[test]
    fn remove_empties_bucket() {
        let mut index: SecondaryIndex<u32, u32> = SecondaryIndex::new();
        index.insert(1, 100);
        index.remove(1, 100);
        assert_eq!(index.get(1), &[] as &[u32]);
    }
}
