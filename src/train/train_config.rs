use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::error::{NnError, Result};
use crate::optim::finite_diff::{FiniteDifference, UpdateMode};
use crate::train::iteration_stats::IterationStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `iterations`    — number of finite-difference steps
/// - `epsilon`       — perturbation added to each parameter
/// - `learning_rate` — scale of each update
/// - `update_mode`   — sequential (default) or frozen-snapshot updates
/// - `report_every`  — progress is logged and sent every this many iterations
/// - `seed`          — seed for weight initialisation; entropy when absent
/// - `progress_tx`   — optional channel sender for `IterationStats`.  If the
///                     receiver is dropped the loop terminates early.
/// - `stop_flag`     — optional atomic flag; when set to `true` from another
///                     thread the loop terminates after the current step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub iterations: usize,
    pub epsilon: f64,
    pub learning_rate: f64,
    pub update_mode: UpdateMode,
    pub report_every: usize,
    pub seed: Option<u64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            iterations: 10_000,
            epsilon: 0.5,
            learning_rate: 1.0,
            update_mode: UpdateMode::Sequential,
            report_every: 1_000,
            seed: None,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel and no stop flag.
    pub fn new(iterations: usize, epsilon: f64, learning_rate: f64) -> Self {
        TrainConfig {
            iterations,
            epsilon,
            learning_rate,
            ..TrainConfig::default()
        }
    }

    /// Validates the hyper-parameters and builds the optimiser they describe.
    pub fn optimizer(&self) -> Result<FiniteDifference> {
        if self.iterations == 0 {
            return Err(NnError::InvalidParameter("iterations must be at least 1".into()));
        }
        if self.report_every == 0 {
            return Err(NnError::InvalidParameter("report_every must be at least 1".into()));
        }
        FiniteDifference::with_mode(self.epsilon, self.learning_rate, self.update_mode)
    }

    /// Serializes the hyper-parameters to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Deserializes a `TrainConfig` from a JSON file. Missing keys take
    /// their default values.
    pub fn load_json(path: &str) -> std::io::Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_logic_gate_run() {
        let config = TrainConfig::default();
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.epsilon, 0.5);
        assert_eq!(config.learning_rate, 1.0);
        assert_eq!(config.update_mode, UpdateMode::Sequential);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let json = r#"{ "iterations": 50, "update_mode": "frozen", "seed": 7 }"#;
        let config: TrainConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.iterations, 50);
        assert_eq!(config.update_mode, UpdateMode::Frozen);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.learning_rate, 1.0);
        assert!(config.progress_tx.is_none());
    }

    #[test]
    fn json_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("lamp-nn-config-{}.json", std::process::id()));
        let path = path.to_str().unwrap();

        let mut config = TrainConfig::new(200, 0.1, 0.05);
        config.seed = Some(3);
        config.save_json(path).unwrap();
        let loaded = TrainConfig::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(loaded.iterations, 200);
        assert_eq!(loaded.epsilon, 0.1);
        assert_eq!(loaded.learning_rate, 0.05);
        assert_eq!(loaded.seed, Some(3));
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        let name = format!("lamp-nn-bad-config-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        let path = path.to_str().unwrap();
        std::fs::write(path, r#"{ "iterations": "many" }"#).unwrap();

        let err = TrainConfig::load_json(path).unwrap_err();
        std::fs::remove_file(path).unwrap();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn optimizer_validates_hyper_parameters() {
        assert!(TrainConfig::new(0, 0.5, 1.0).optimizer().is_err());
        assert!(TrainConfig::new(10, 0.0, 1.0).optimizer().is_err());
        let opt = TrainConfig::new(10, 0.5, 1.0).optimizer().unwrap();
        assert_eq!(opt.mode, UpdateMode::Sequential);
    }
}
