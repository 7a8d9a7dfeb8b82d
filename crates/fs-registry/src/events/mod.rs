//! Events layer (EDA)
//!
//! One event per committed mutation. Nothing is published for rejected
//! calls or for operational toggles.

mod published;

pub use published::*;
