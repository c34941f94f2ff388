//! Persistence trait for the relay-side cache (§6): one `GameStore`
//! implementation per backing technology, with a `MemoryGameStore`
//! reference implementation for tests and single-process daemons.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use ec4x_common::ids::{HouseId, SystemId};

/// A game's top-level relay record (§6 `games` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub name: String,
    pub turn: u64,
    pub status: String,
    pub relay_url: String,
    pub daemon_pubkey: [u8; 32],
}

/// A claimed player slot (§6 `player_slots` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub game_id: String,
    pub pubkey: [u8; 32],
    pub house_id: HouseId,
}

/// A cached per-house `PlayerState` snapshot (§6 `player_states` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStateRecord {
    pub game_id: String,
    pub house_id: HouseId,
    pub turn: u64,
    pub payload_bytes: Vec<u8>,
}

/// A cached config snapshot (§6 `config_snapshots` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshotRecord {
    pub game_id: String,
    pub schema_version: u32,
    pub config_hash: [u8; 32],
    pub payload_bytes: Vec<u8>,
}

/// A draft order packet a player has not yet submitted (§6
/// `order_drafts` table). Invalidated on load if its `turn` or
/// `config_hash` no longer match the current accepted values (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraftRecord {
    pub game_id: String,
    pub house_id: HouseId,
    pub turn: u64,
    pub config_hash: [u8; 32],
    pub payload_bytes: Vec<u8>,
}

/// An inter-house message (§6 `messages` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub game_id: String,
    pub from_house: HouseId,
    pub to_house: HouseId,
    pub text: String,
    pub ts: u64,
    pub is_read: bool,
}

/// A player-authored note attached to a system (§6 `intel_notes` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelNoteRecord {
    pub game_id: String,
    pub house_id: HouseId,
    pub system_id: SystemId,
    pub text: String,
}

/// A de-dup record for an already-processed relay event (§6
/// `received_events` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedEventRecord {
    pub event_id: String,
    pub kind: u32,
    pub game_id: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("game not found: {0}")]
    GameNotFound(String),
    #[error("backing store unavailable: {0}")]
    Unavailable(String),
}

/// The persistence interface a relay daemon or TUI client uses for the
/// cache described in §6. IO/Transport failures (§7) are surfaced as
/// `StoreError::Unavailable` and retried at the transport layer, never
/// inside this trait's implementors.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn upsert_game(&self, record: GameRecord) -> Result<(), StoreError>;
    async fn get_game(&self, game_id: &str) -> Result<Option<GameRecord>, StoreError>;

    async fn claim_slot(&self, slot: PlayerSlot) -> Result<(), StoreError>;
    async fn list_slots(&self, game_id: &str) -> Result<Vec<PlayerSlot>, StoreError>;

    async fn put_player_state(&self, record: PlayerStateRecord) -> Result<(), StoreError>;
    async fn get_player_state(
        &self,
        game_id: &str,
        house_id: HouseId,
    ) -> Result<Option<PlayerStateRecord>, StoreError>;

    async fn put_config_snapshot(&self, record: ConfigSnapshotRecord) -> Result<(), StoreError>;
    async fn get_config_snapshot(
        &self,
        game_id: &str,
    ) -> Result<Option<ConfigSnapshotRecord>, StoreError>;

    async fn put_order_draft(&self, record: OrderDraftRecord) -> Result<(), StoreError>;

    /// Load a draft, applying the §6 invalidation rule: a draft whose
    /// `turn` or `config_hash` no longer matches the current values is
    /// discarded rather than returned.
    async fn get_order_draft(
        &self,
        game_id: &str,
        house_id: HouseId,
        current_turn: u64,
        current_config_hash: [u8; 32],
    ) -> Result<Option<OrderDraftRecord>, StoreError>;

    async fn put_message(&self, record: MessageRecord) -> Result<(), StoreError>;
    async fn list_messages(&self, game_id: &str, house_id: HouseId) -> Result<Vec<MessageRecord>, StoreError>;

    async fn put_intel_note(&self, record: IntelNoteRecord) -> Result<(), StoreError>;
    async fn list_intel_notes(
        &self,
        game_id: &str,
        house_id: HouseId,
    ) -> Result<Vec<IntelNoteRecord>, StoreError>;

    /// Record an event id as processed, returning `true` if it was
    /// newly recorded and `false` if it had already been seen (§6
    /// de-dup table).
    async fn mark_event_received(&self, record: ReceivedEventRecord) -> Result<bool, StoreError>;
}

/// In-memory `GameStore` reference implementation, keyed the way the
/// schema's composite primary keys suggest. Good for tests and a
/// single-process daemon; not durable across restarts.
#[derive(Default)]
pub struct MemoryGameStore {
    games: RwLock<HashMap<String, GameRecord>>,
    slots: RwLock<HashMap<String, Vec<PlayerSlot>>>,
    player_states: RwLock<HashMap<(String, HouseId), PlayerStateRecord>>,
    config_snapshots: RwLock<HashMap<String, ConfigSnapshotRecord>>,
    order_drafts: RwLock<HashMap<(String, HouseId), OrderDraftRecord>>,
    messages: RwLock<HashMap<String, Vec<MessageRecord>>>,
    intel_notes: RwLock<HashMap<(String, HouseId), Vec<IntelNoteRecord>>>,
    received_events: RwLock<std::collections::HashSet<String>>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn upsert_game(&self, record: GameRecord) -> Result<(), StoreError> {
        self.games.write().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<GameRecord>, StoreError> {
        Ok(self.games.read().await.get(game_id).cloned())
    }

    async fn claim_slot(&self, slot: PlayerSlot) -> Result<(), StoreError> {
        let mut slots = self.slots.write().await;
        let entry = slots.entry(slot.game_id.clone()).or_default();
        entry.retain(|s| s.house_id != slot.house_id);
        entry.push(slot);
        Ok(())
    }

    async fn list_slots(&self, game_id: &str) -> Result<Vec<PlayerSlot>, StoreError> {
        Ok(self.slots.read().await.get(game_id).cloned().unwrap_or_default())
    }

    async fn put_player_state(&self, record: PlayerStateRecord) -> Result<(), StoreError> {
        let key = (record.game_id.clone(), record.house_id);
        self.player_states.write().await.insert(key, record);
        Ok(())
    }

    async fn get_player_state(
        &self,
        game_id: &str,
        house_id: HouseId,
    ) -> Result<Option<PlayerStateRecord>, StoreError> {
        let key = (game_id.to_string(), house_id);
        Ok(self.player_states.read().await.get(&key).cloned())
    }

    async fn put_config_snapshot(&self, record: ConfigSnapshotRecord) -> Result<(), StoreError> {
        self.config_snapshots.write().await.insert(record.game_id.clone(), record);
        Ok(())
    }

    async fn get_config_snapshot(
        &self,
        game_id: &str,
    ) -> Result<Option<ConfigSnapshotRecord>, StoreError> {
        Ok(self.config_snapshots.read().await.get(game_id).cloned())
    }

    async fn put_order_draft(&self, record: OrderDraftRecord) -> Result<(), StoreError> {
        let key = (record.game_id.clone(), record.house_id);
        self.order_drafts.write().await.insert(key, record);
        Ok(())
    }

    async fn get_order_draft(
        &self,
        game_id: &str,
        house_id: HouseId,
        current_turn: u64,
        current_config_hash: [u8; 32],
    ) -> Result<Option<OrderDraftRecord>, StoreError> {
        let key = (game_id.to_string(), house_id);
        let mut drafts = self.order_drafts.write().await;
        let Some(draft) = drafts.get(&key) else {
            return Ok(None);
        };
        if draft.turn != current_turn || draft.config_hash != current_config_hash {
            drafts.remove(&key);
            return Ok(None);
        }
        Ok(Some(draft.clone()))
    }

    async fn put_message(&self, record: MessageRecord) -> Result<(), StoreError> {
        self.messages.write().await.entry(record.game_id.clone()).or_default().push(record);
        Ok(())
    }

    async fn list_messages(&self, game_id: &str, house_id: HouseId) -> Result<Vec<MessageRecord>, StoreError> {
        let all = self.messages.read().await;
        let Some(msgs) = all.get(game_id) else {
            return Ok(Vec::new());
        };
        Ok(msgs
            .iter()
            .filter(|m| m.from_house == house_id || m.to_house == house_id)
            .cloned()
            .collect())
    }

    async fn put_intel_note(&self, record: IntelNoteRecord) -> Result<(), StoreError> {
        let key = (record.game_id.clone(), record.house_id);
        self.intel_notes.write().await.entry(key).or_default().push(record);
        Ok(())
    }

    async fn list_intel_notes(
        &self,
        game_id: &str,
        house_id: HouseId,
    ) -> Result<Vec<IntelNoteRecord>, StoreError> {
        let key = (game_id.to_string(), house_id);
        Ok(self.intel_notes.read().await.get(&key).cloned().unwrap_or_default())
    }

    async fn mark_event_received(&self, record: ReceivedEventRecord) -> Result<bool, StoreError> {
        Ok(self.received_events.write().await.insert(record.event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str) -> GameRecord {
        GameRecord {
            id: id.to_string(),
            name: "Test Game".to_string(),
            turn: 0,
            status: "active".to_string(),
            relay_url: "wss://relay.example/ec4x".to_string(),
            daemon_pubkey: [0u8; 32],
        }
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let store = MemoryGameStore::new();
        store.upsert_game(game("g1")).await.unwrap();
        let loaded = store.get_game("g1").await.unwrap().unwrap();
        assert_eq!(loaded.name, "Test Game");
    }

    #[tokio::test]
    async fn missing_game_returns_none() {
        let store = MemoryGameStore::new();
        assert!(store.get_game("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stale_draft_is_discarded_on_load() {
        let store = MemoryGameStore::new();
        store
            .put_order_draft(OrderDraftRecord {
                game_id: "g1".to_string(),
                house_id: HouseId(1),
                turn: 3,
                config_hash: [1u8; 32],
                payload_bytes: vec![1, 2, 3],
            })
            .await
            .unwrap();

        let stale = store.get_order_draft("g1", HouseId(1), 4, [1u8; 32]).await.unwrap();
        assert!(stale.is_none());

        store
            .put_order_draft(OrderDraftRecord {
                game_id: "g1".to_string(),
                house_id: HouseId(1),
                turn: 4,
                config_hash: [1u8; 32],
                payload_bytes: vec![4, 5, 6],
            })
            .await
            .unwrap();
        let fresh = store.get_order_draft("g1", HouseId(1), 4, [1u8; 32]).await.unwrap();
        assert!(fresh.is_some());
    }

    #[tokio::test]
    async fn event_dedup_reports_first_insert_only() {
        let store = MemoryGameStore::new();
        let record = |id: &str| ReceivedEventRecord {
            event_id: id.to_string(),
            kind: 4,
            game_id: "g1".to_string(),
        };
        assert!(store.mark_event_received(record("e1")).await.unwrap());
        assert!(!store.mark_event_received(record("e1")).await.unwrap());
    }
}
