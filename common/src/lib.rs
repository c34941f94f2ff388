//! # EC4X Common
//!
//! Shared scalar types, domain enums, entity records, rules config, and
//! the error taxonomy for the EC4X turn-resolution core. Every other
//! crate in this workspace (store, engine, combat, fogwar, wire) builds
//! on the types defined here.

pub mod canonical;
pub mod config;
pub mod constants;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod orders;
pub mod rng;

pub use canonical::*;
pub use config::*;
pub use constants::*;
pub use entities::*;
pub use enums::*;
pub use errors::*;
pub use ids::*;
pub use orders::*;
pub use rng::*;
