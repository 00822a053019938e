use std::fmt;

use rand::Rng;

use crate::activation::sigmoid::sigmoid;
use crate::error::{NnError, Result, Shape};
use crate::layers::{Connection, Layer};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::optim::finite_diff::FiniteDifference;

/// Feed-forward network of sigmoid layers.
///
/// Connection `k` links layer `k` to layer `k + 1`. Its weights are shaped
/// `(layer[k+1].size, layer[k].size)` and its bias `(layer[k+1].size, 1)`.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) layers: Vec<Layer>,
    pub(crate) connections: Vec<Connection>,
}

impl Network {
    /// Builds a network from per-layer neuron counts, input layer first.
    ///
    /// All activations, weights and biases start at zero; call
    /// [`Network::randomize`] before training.
    pub fn build(architecture: &[usize]) -> Result<Network> {
        if architecture.len() < 2 {
            return Err(NnError::shape_mismatch(
                "build",
                Shape::new(2, 1),
                Shape::new(architecture.len(), 1),
            ));
        }

        let layers = architecture
            .iter()
            .map(|&size| Layer::new(size))
            .collect::<Result<Vec<_>>>()?;

        let connections = architecture
            .windows(2)
            .enumerate()
            .map(|(begin, pair)| Connection::new(begin, pair[0], pair[1]))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "built network {:?} with {} parameters",
            architecture,
            connections.iter().map(Connection::parameter_count).sum::<usize>()
        );

        Ok(Network { layers, connections })
    }

    /// Fills every weight and bias with uniform draws in `[0, 1]`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for connection in &mut self.connections {
            connection.randomize(rng);
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection_mut(&mut self, index: usize) -> Option<&mut Connection> {
        self.connections.get_mut(index)
    }

    /// Neuron counts per layer, input first.
    pub fn architecture(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    pub fn input_size(&self) -> usize {
        self.input_layer().size()
    }

    pub fn output_size(&self) -> usize {
        self.output_layer().size()
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.connections.iter().map(Connection::parameter_count).sum()
    }

    fn input_layer(&self) -> &Layer {
        &self.layers[0]
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Activations of the output layer as of the last forward pass.
    pub fn output(&self) -> &Matrix {
        &self.output_layer().activations
    }

    /// Copies one example into the input layer.
    pub fn set_input(&mut self, values: &[f64]) -> Result<()> {
        let expected = self.input_size();
        if values.len() != expected {
            return Err(NnError::shape_mismatch(
                "set_input",
                Shape::new(1, expected),
                Shape::new(1, values.len()),
            ));
        }
        self.layers[0].activations.as_mut_slice().copy_from_slice(values);
        Ok(())
    }

    /// Propagates the input layer through every connection in order:
    /// `end = sigmoid(weights * begin + bias)`.
    pub fn forward(&mut self) {
        for connection in &self.connections {
            let (head, tail) = self.layers.split_at_mut(connection.end);
            let begin = &head[connection.begin].activations;
            let end = &mut tail[0].activations;

            Matrix::multiply_into_unchecked(end, &connection.weights, begin);
            end.add_unchecked(&connection.bias);
            end.apply(sigmoid);
        }
    }

    /// Runs one example through the network and returns a copy of the output.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.set_input(input)?;
        self.forward();
        Ok(self.output().as_slice().to_vec())
    }

    /// Squared error summed over the outputs, averaged over the examples.
    ///
    /// Leaves the activations of the last example's forward pass in place.
    pub fn loss(&mut self, inputs: &Matrix, targets: &Matrix) -> Result<f64> {
        self.check_dataset(inputs, targets)?;
        Ok(self.evaluate_loss(inputs, targets))
    }

    /// One finite-difference update of every weight and bias, applied
    /// sequentially in network order.
    ///
    /// See [`FiniteDifference`] for the exact update order.
    pub fn apply_finite_difference_gradient_step(
        &mut self,
        inputs: &Matrix,
        targets: &Matrix,
        epsilon: f64,
        learning_rate: f64,
    ) -> Result<()> {
        FiniteDifference::new(epsilon, learning_rate)?.step(self, inputs, targets)
    }

    pub(crate) fn check_dataset(&self, inputs: &Matrix, targets: &Matrix) -> Result<()> {
        if inputs.rows() != targets.rows() {
            return Err(NnError::shape_mismatch(
                "loss",
                Shape::new(inputs.rows(), self.output_size()),
                targets.shape(),
            ));
        }
        if inputs.cols() != self.input_size() {
            return Err(NnError::shape_mismatch(
                "loss",
                Shape::new(inputs.rows(), self.input_size()),
                inputs.shape(),
            ));
        }
        if targets.cols() != self.output_size() {
            return Err(NnError::shape_mismatch(
                "loss",
                Shape::new(targets.rows(), self.output_size()),
                targets.shape(),
            ));
        }
        Ok(())
    }

    /// Loss without shape checks; callers go through `check_dataset` first.
    pub(crate) fn evaluate_loss(&mut self, inputs: &Matrix, targets: &Matrix) -> f64 {
        let mut total = 0.0;
        for i in 0..inputs.rows() {
            self.layers[0].activations.as_mut_slice().copy_from_slice(inputs.row(i));
            self.forward();
            total += MseLoss::sample_error(self.output().as_slice(), targets.row(i));
        }
        MseLoss::mean(total, inputs.rows())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tinput:")?;
        write!(f, "{}", self.input_layer().activations)?;

        for (k, connection) in self.connections.iter().enumerate() {
            writeln!(f, "\tw{}", k + 1)?;
            write!(f, "{}", connection.weights)?;
            writeln!(f, "\tb{}", k + 1)?;
            write!(f, "{}", connection.bias)?;
            writeln!(f, "\ta{}", k + 1)?;
            write!(f, "{}", self.layers[connection.end].activations)?;
        }
        writeln!(f)
    }
}
