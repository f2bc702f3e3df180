//! Epsilon-aware geometric predicates and operations.
//!
//! All functions in this module take explicit tolerance parameters.
//! No hidden epsilons are used.

mod predicates;
mod weld;

pub use predicates::{orient2d, signed_area2, Orientation};
pub use weld::weld_keep_first;
