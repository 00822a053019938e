pub mod finite_diff;

pub use finite_diff::{FiniteDifference, UpdateMode};
