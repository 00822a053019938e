pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{NnError, Result, Shape};
pub use math::matrix::Matrix;
pub use math::rng::seeded_rng;
pub use activation::sigmoid::sigmoid;
pub use layers::{Connection, Layer};
pub use network::network::Network;
pub use loss::mse::MseLoss;
pub use optim::finite_diff::{FiniteDifference, UpdateMode};
pub use data::{Dataset, LogicGate, full_adder, half_adder};
pub use train::{train_loop, train_network, IterationStats, TrainConfig};
