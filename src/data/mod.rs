pub mod dataset;
pub mod truth_tables;

pub use dataset::Dataset;
pub use truth_tables::{full_adder, half_adder, LogicGate};
