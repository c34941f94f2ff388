//! # EC4X wire protocol
//!
//! Signed event envelopes over the pub/sub relay (§4.L, §6), the
//! full-state/delta distinction and the client-side hard rejection rule,
//! and the persistence trait for the relay-side cache.

pub mod cli;
pub mod delta;
pub mod envelope;
pub mod store;

pub use cli::CliOutcome;
pub use delta::{ClientAcceptanceState, DeltaPayload, DeltaRejection, FullStatePayload, InboxMessage};
pub use envelope::{EventBody, SignedEvent};
pub use store::{GameStore, MemoryGameStore, StoreError};
