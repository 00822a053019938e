use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::data::dataset::Dataset;
use crate::error::Result;
use crate::network::network::Network;
use crate::train::iteration_stats::IterationStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_network;

/// Trains `network` for `config.iterations` finite-difference steps and
/// returns the loss after the **last completed step**.
///
/// The network must already be initialised (see `Network::randomize`);
/// `config.seed` is not consumed here.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// Invalid hyper-parameters or a dataset that does not fit the network are
/// reported before any parameter is touched.
pub fn train_loop(network: &mut Network, dataset: &Dataset, config: &TrainConfig) -> Result<f64> {
    let optimizer = config.optimizer()?;
    let mut last_loss = network.loss(dataset.inputs(), dataset.targets())?;

    log::debug!(
        "training {:?} on {} examples for {} iterations (epsilon {}, learning rate {}, {:?})",
        network.architecture(),
        dataset.len(),
        config.iterations,
        optimizer.epsilon,
        optimizer.learning_rate,
        optimizer.mode
    );

    let t_start = Instant::now();

    for iteration in 1..=config.iterations {
        if stop_requested(config) {
            log::warn!("training stopped at iteration {iteration} of {}", config.iterations);
            break;
        }

        last_loss = train_network(network, dataset, &optimizer)?;

        if iteration % config.report_every != 0 && iteration != config.iterations {
            continue;
        }

        let stats = IterationStats {
            iteration,
            total_iterations: config.iterations,
            loss: last_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        log::info!(
            "iteration {}/{}: loss = {:.6}",
            stats.iteration,
            stats.total_iterations,
            stats.loss
        );

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                log::warn!("progress receiver dropped, stopping at iteration {iteration}");
                break;
            }
        }
    }

    Ok(last_loss)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}
