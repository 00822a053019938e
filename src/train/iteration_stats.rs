use serde::{Serialize, Deserialize};

/// Training progress emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one value is
/// sent every `report_every` iterations and after the final iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    pub total_iterations: usize,
    /// Loss over the whole dataset after this iteration's update.
    pub loss: f64,
    /// Wall-clock time since the loop started, in milliseconds.
    pub elapsed_ms: u64,
}
