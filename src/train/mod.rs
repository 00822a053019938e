pub mod trainer;
pub mod iteration_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::train_network;
pub use iteration_stats::IterationStats;
pub use train_config::TrainConfig;
pub use loop_fn::train_loop;
