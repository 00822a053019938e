use crate::{
    data::dataset::Dataset,
    error::Result,
    network::network::Network,
    optim::finite_diff::FiniteDifference,
};

/// Runs one finite-difference step over `dataset` and returns the loss
/// after the update.
pub fn train_network(
    network: &mut Network,
    dataset: &Dataset,
    optimizer: &FiniteDifference,
) -> Result<f64> {
    optimizer.step(network, dataset.inputs(), dataset.targets())?;
    network.loss(dataset.inputs(), dataset.targets())
}
