//! # EC4X Store
//!
//! The entity store (§4.A): a generic dense-vec/id-index `Table` per
//! entity kind, secondary indices keyed by house/system/fleet/colony,
//! and `GameState`, the aggregate that owns every table and index and
//! exposes the only mutators allowed to touch an indexed field.

pub mod identified;
pub mod indices;
pub mod state;
pub mod table;

pub use indices::SecondaryIndex;
pub use state::GameState;
pub use table::{Identified, Table};
