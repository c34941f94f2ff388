//! Full-state vs. delta distinction and the client-side delta-rejection
//! rule (§4.L hard invariant, §8 S6).

use serde::{Deserialize, Serialize};

use ec4x_common::config::AuthoritativeConfig;
use ec4x_common::ids::HouseId;
use ec4x_fogwar::PlayerState;

use crate::store::MessageRecord;

/// An inter-house message as delivered to a client, stripped of the
/// relay-internal `game_id`/`to_house` bookkeeping the recipient already
/// knows from context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboxMessage {
    pub from_house: HouseId,
    pub text: String,
    pub ts: u64,
    pub is_read: bool,
}

impl From<&MessageRecord> for InboxMessage {
    fn from(record: &MessageRecord) -> Self {
        Self {
            from_house: record.from_house,
            text: record.text.clone(),
            ts: record.ts,
            is_read: record.is_read,
        }
    }
}

/// A full-state payload: the recipient's `PlayerState` plus the config
/// snapshot it was derived under (§4.L), and the relay-held message
/// inbox. `PlayerState` stays a pure projection of `GameState` (§4.K);
/// messages live in `GameStore` instead and are stitched in here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullStatePayload {
    pub config: AuthoritativeConfig,
    pub state: PlayerState,
    pub messages: Vec<InboxMessage>,
}

/// An incremental delta payload, declaring the turn and config hash it
/// applies on top of (§4.L).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaPayload {
    pub declared_turn: u64,
    pub declared_config_hash: [u8; 32],
    pub declared_schema_version: u32,
    pub events: Vec<ec4x_engine::TurnEvent>,
}

/// Why a delta was rejected, per the §4.L hard invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeltaRejection {
    #[error("delta config hash does not match the last-accepted authoritative config hash")]
    ConfigHashMismatch,
    #[error("delta declares turn {declared} which is not ahead of the client's current turn {current}")]
    NotAhead { declared: u64, current: u64 },
    #[error("delta author does not match the known daemon pubkey")]
    UntrustedAuthor,
    #[error("no accepted config: deltas are refused until a valid full-state snapshot arrives")]
    NoAcceptedConfig,
}

/// The client-side acceptance state needed to evaluate the delta rule
/// (§4.L): the last accepted config hash/schema version and the
/// client's current turn. `None` accepted config means "no full-state
/// snapshot yet".
#[derive(Debug, Clone, Default)]
pub struct ClientAcceptanceState {
    pub accepted_config_hash: Option<[u8; 32]>,
    pub accepted_schema_version: u32,
    pub current_turn: u64,
    pub daemon_pubkey: Option<[u8; 32]>,
}

impl ClientAcceptanceState {
    /// Apply the §4.L delta-rejection rule: reject if the declared
    /// config hash doesn't match the last accepted one, the declared
    /// turn isn't strictly ahead, or the author isn't the known daemon.
    pub fn validate_delta(&self, payload: &DeltaPayload, author: [u8; 32]) -> Result<(), DeltaRejection> {
        let Some(accepted_hash) = self.accepted_config_hash else {
            return Err(DeltaRejection::NoAcceptedConfig);
        };
        if let Some(daemon) = self.daemon_pubkey {
            if author != daemon {
                return Err(DeltaRejection::UntrustedAuthor);
            }
        }
        if payload.declared_config_hash != accepted_hash {
            return Err(DeltaRejection::ConfigHashMismatch);
        }
        if payload.declared_turn <= self.current_turn {
            return Err(DeltaRejection::NotAhead {
                declared: payload.declared_turn,
                current: self.current_turn,
            });
        }
        Ok(())
    }

    /// Accept a full-state snapshot, updating the acceptance baseline.
    pub fn accept_full_state(&mut self, config: &AuthoritativeConfig, turn: u64) {
        self.accepted_config_hash = Some(config.declared_hash);
        self.accepted_schema_version = config.schema_version;
        self.current_turn = turn;
    }

    pub fn accept_delta(&mut self, payload: &DeltaPayload) {
        self.current_turn = payload.declared_turn;
    }
}
