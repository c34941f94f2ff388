//! Core entity records (§3). Each type here is a pure data record; all
//! behaviour that needs to preserve store invariants (location/owner
//! changes, id allocation) lives in `ec4x-store`'s mutators, not as
//! methods that borrow across entities. Entities reference each other by
//! id only, never by direct borrow (§3 ownership model, §9 Design Note on
//! cyclic references).

mod colony;
mod facility;
mod fleet;
mod ground_unit;
mod house;
mod misc;
mod ship;
mod squadron;
mod system;

pub use colony::*;
pub use facility::*;
pub use fleet::*;
pub use ground_unit::*;
pub use house::*;
pub use misc::*;
pub use ship::*;
pub use squadron::*;
pub use system::*;
