//! Test helpers shared by the workspace crates.

mod approx_eq;
pub mod fixtures;

#[doc(hidden)]
pub use float_cmp::approx_eq;

pub use crate::approx_eq::ApproxEqIter;
