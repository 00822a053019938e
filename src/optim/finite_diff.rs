use serde::{Deserialize, Serialize};

use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Smallest accepted magnitude for epsilon and learning rate.
pub const MIN_STEP: f64 = 1e-6;

/// How parameter updates are scheduled within one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Each parameter is updated as soon as its gradient is known, so later
    /// estimates in the same step see the already-updated network.
    #[default]
    Sequential,
    /// Every gradient is estimated against the parameters as they were at
    /// the start of the step; updates are applied together at the end.
    Frozen,
}

#[derive(Debug, Clone, Copy)]
enum Param {
    Weight,
    Bias,
}

/// Gradient descent with one-sided finite-difference gradient estimates.
///
/// For every connection in network order, weights first and then biases,
/// each in row-major order: perturb the parameter by `epsilon`, recompute
/// the loss, estimate `g = (perturbed - base) / epsilon`, restore it and
/// move it by `-learning_rate * g`. The base loss is computed once per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifference {
    pub epsilon: f64,
    pub learning_rate: f64,
    pub mode: UpdateMode,
}

impl FiniteDifference {
    pub fn new(epsilon: f64, learning_rate: f64) -> Result<FiniteDifference> {
        FiniteDifference::with_mode(epsilon, learning_rate, UpdateMode::Sequential)
    }

    pub fn with_mode(
        epsilon: f64,
        learning_rate: f64,
        mode: UpdateMode,
    ) -> Result<FiniteDifference> {
        check_step("epsilon", epsilon)?;
        check_step("learning rate", learning_rate)?;
        Ok(FiniteDifference { epsilon, learning_rate, mode })
    }

    /// Updates every weight and bias of `network` once.
    ///
    /// Costs one loss evaluation per parameter plus one for the base loss.
    pub fn step(&self, network: &mut Network, inputs: &Matrix, targets: &Matrix) -> Result<()> {
        // Fields are public and may have changed since `new`.
        check_step("epsilon", self.epsilon)?;
        check_step("learning rate", self.learning_rate)?;
        network.check_dataset(inputs, targets)?;

        let base_loss = network.evaluate_loss(inputs, targets);
        log::trace!(
            "finite-difference step over {} parameters, base loss {:.6}",
            network.parameter_count(),
            base_loss
        );

        match self.mode {
            UpdateMode::Sequential => self.step_sequential(network, inputs, targets, base_loss),
            UpdateMode::Frozen => self.step_frozen(network, inputs, targets, base_loss),
        }
        Ok(())
    }

    fn step_sequential(
        &self,
        network: &mut Network,
        inputs: &Matrix,
        targets: &Matrix,
        base_loss: f64,
    ) {
        for conn in 0..network.connections.len() {
            for param in [Param::Weight, Param::Bias] {
                for idx in 0..param_len(network, conn, param) {
                    let grad = self.estimate(network, inputs, targets, base_loss, conn, param, idx);
                    *param_mut(network, conn, param, idx) -= self.learning_rate * grad;
                }
            }
        }
    }

    fn step_frozen(
        &self,
        network: &mut Network,
        inputs: &Matrix,
        targets: &Matrix,
        base_loss: f64,
    ) {
        let mut grads = Vec::with_capacity(network.parameter_count());
        for conn in 0..network.connections.len() {
            for param in [Param::Weight, Param::Bias] {
                for idx in 0..param_len(network, conn, param) {
                    let grad = self.estimate(network, inputs, targets, base_loss, conn, param, idx);
                    grads.push(grad);
                }
            }
        }

        let mut grads = grads.into_iter();
        for conn in 0..network.connections.len() {
            for param in [Param::Weight, Param::Bias] {
                for idx in 0..param_len(network, conn, param) {
                    if let Some(grad) = grads.next() {
                        *param_mut(network, conn, param, idx) -= self.learning_rate * grad;
                    }
                }
            }
        }
    }

    /// Perturbs one parameter, measures the loss and restores it.
    #[allow(clippy::too_many_arguments)]
    fn estimate(
        &self,
        network: &mut Network,
        inputs: &Matrix,
        targets: &Matrix,
        base_loss: f64,
        conn: usize,
        param: Param,
        idx: usize,
    ) -> f64 {
        let original = *param_mut(network, conn, param, idx);
        *param_mut(network, conn, param, idx) = original + self.epsilon;
        let perturbed_loss = network.evaluate_loss(inputs, targets);
        *param_mut(network, conn, param, idx) = original;
        (perturbed_loss - base_loss) / self.epsilon
    }
}

fn check_step(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value.abs() <= MIN_STEP {
        return Err(NnError::InvalidParameter(format!(
            "{name} must be finite with magnitude above {MIN_STEP}, got {value}"
        )));
    }
    Ok(())
}

fn param_len(network: &Network, conn: usize, param: Param) -> usize {
    let connection = &network.connections[conn];
    match param {
        Param::Weight => connection.weights.len(),
        Param::Bias => connection.bias.len(),
    }
}

fn param_mut(network: &mut Network, conn: usize, param: Param, idx: usize) -> &mut f64 {
    let connection = &mut network.connections[conn];
    match param {
        Param::Weight => &mut connection.weights.as_mut_slice()[idx],
        Param::Bias => &mut connection.bias.as_mut_slice()[idx],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::rng::seeded_rng;

    fn and_gate() -> (Matrix, Matrix) {
        (
            Matrix::from_flat(4, 2, &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]).unwrap(),
            Matrix::from_flat(4, 1, &[0.0, 0.0, 0.0, 1.0]).unwrap(),
        )
    }

    fn seeded_network(seed: u64) -> Network {
        let mut nn = Network::build(&[2, 2, 1]).unwrap();
        nn.randomize(&mut seeded_rng(Some(seed)));
        nn
    }

    fn params(nn: &Network) -> Vec<f64> {
        nn.connections()
            .iter()
            .flat_map(|c| c.weights().as_slice().iter().chain(c.bias().as_slice()).copied())
            .collect()
    }

    /// Straight-line transcription of the update order, used as a reference.
    fn reference_step(nn: &mut Network, inputs: &Matrix, targets: &Matrix, eps: f64, lr: f64) {
        let base = nn.loss(inputs, targets).unwrap();
        for c in 0..nn.connections().len() {
            for i in 0..nn.connections()[c].weights().len() {
                let original = nn.connections()[c].weights().as_slice()[i];
                nn.connection_mut(c).unwrap().weights_mut()[i] += eps;
                let g = (nn.loss(inputs, targets).unwrap() - base) / eps;
                nn.connection_mut(c).unwrap().weights_mut()[i] = original - lr * g;
            }
            for i in 0..nn.connections()[c].bias().len() {
                let original = nn.connections()[c].bias().as_slice()[i];
                nn.connection_mut(c).unwrap().bias_mut()[i] += eps;
                let g = (nn.loss(inputs, targets).unwrap() - base) / eps;
                nn.connection_mut(c).unwrap().bias_mut()[i] = original - lr * g;
            }
        }
    }

    #[test]
    fn rejects_tiny_or_non_finite_steps() {
        assert!(matches!(FiniteDifference::new(1e-7, 1.0), Err(NnError::InvalidParameter(_))));
        assert!(FiniteDifference::new(0.5, -1e-7).is_err());
        assert!(FiniteDifference::new(f64::NAN, 1.0).is_err());
        assert!(FiniteDifference::new(0.5, f64::INFINITY).is_err());
        assert!(FiniteDifference::new(-0.5, -1.0).is_ok());
    }

    #[test]
    fn sequential_step_matches_reference_order() {
        let (inputs, targets) = and_gate();
        let mut nn = seeded_network(42);
        let mut expected = nn.clone();

        FiniteDifference::new(0.5, 1.0).unwrap().step(&mut nn, &inputs, &targets).unwrap();
        reference_step(&mut expected, &inputs, &targets, 0.5, 1.0);

        assert_eq!(params(&nn), params(&expected));
    }

    #[test]
    fn network_method_delegates_to_sequential_step() {
        let (inputs, targets) = and_gate();
        let mut a = seeded_network(5);
        let mut b = a.clone();

        a.apply_finite_difference_gradient_step(&inputs, &targets, 0.1, 0.1).unwrap();
        FiniteDifference::new(0.1, 0.1).unwrap().step(&mut b, &inputs, &targets).unwrap();

        assert_eq!(params(&a), params(&b));
    }

    #[test]
    fn frozen_differs_from_sequential_but_both_reduce_loss() {
        let (inputs, targets) = and_gate();
        let mut seq = seeded_network(3);
        let mut frozen = seq.clone();
        let start = seq.loss(&inputs, &targets).unwrap();

        FiniteDifference::new(0.01, 0.5).unwrap().step(&mut seq, &inputs, &targets).unwrap();
        FiniteDifference::with_mode(0.01, 0.5, UpdateMode::Frozen)
            .unwrap()
            .step(&mut frozen, &inputs, &targets)
            .unwrap();

        assert_ne!(params(&seq), params(&frozen));
        assert!(seq.loss(&inputs, &targets).unwrap() < start);
        assert!(frozen.loss(&inputs, &targets).unwrap() < start);
    }

    #[test]
    fn frozen_first_parameter_matches_sequential() {
        // The very first parameter sees the same network in both modes.
        let (inputs, targets) = and_gate();
        let mut seq = seeded_network(8);
        let mut frozen = seq.clone();

        FiniteDifference::new(0.1, 0.1).unwrap().step(&mut seq, &inputs, &targets).unwrap();
        FiniteDifference::with_mode(0.1, 0.1, UpdateMode::Frozen)
            .unwrap()
            .step(&mut frozen, &inputs, &targets)
            .unwrap();

        assert_eq!(params(&seq)[0], params(&frozen)[0]);
    }

    #[test]
    fn invalid_arguments_leave_network_untouched() {
        let (inputs, targets) = and_gate();
        let mut nn = seeded_network(4);
        let before = params(&nn);

        assert!(nn.apply_finite_difference_gradient_step(&inputs, &targets, 0.0, 1.0).is_err());
        assert!(nn
            .apply_finite_difference_gradient_step(&inputs, &Matrix::zeros(4, 2).unwrap(), 0.5, 1.0)
            .is_err());

        let mut tampered = FiniteDifference::new(0.5, 1.0).unwrap();
        tampered.learning_rate = 0.0;
        assert!(tampered.step(&mut nn, &inputs, &targets).is_err());

        assert_eq!(params(&nn), before);
    }
}
