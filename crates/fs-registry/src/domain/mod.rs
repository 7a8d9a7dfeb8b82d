//! Domain layer for the airline/flight registry
//!
//! Pure state and rules. No I/O, no async.
//!
//! - access: owner, authorized caller, operational flag
//! - policy: bootstrap/consensus thresholds
//! - index: name map + append-only list as one structure
//! - registry: the aggregate every operation runs against

mod access;
mod entities;
mod error;
mod index;
mod policy;
mod registry;
mod value_objects;

pub use access::*;
pub use entities::*;
pub use error::*;
pub use index::*;
pub use policy::*;
pub use registry::*;
pub use value_objects::*;
