use rand::Rng;

use crate::error::Result;
use crate::math::matrix::Matrix;

/// Weight and bias transform between two adjacent layers.
///
/// `begin` and `end` are positions in the owning network's layer list;
/// the connection never owns the layers themselves.
#[derive(Debug, Clone)]
pub struct Connection {
    pub(crate) weights: Matrix,
    pub(crate) bias: Matrix,
    pub(crate) begin: usize,
    pub(crate) end: usize,
}

impl Connection {
    /// Zero-initialised connection from a layer of `begin_size` neurons at
    /// position `begin` to a layer of `end_size` neurons right after it.
    pub fn new(begin: usize, begin_size: usize, end_size: usize) -> Result<Connection> {
        Ok(Connection {
            weights: Matrix::zeros(end_size, begin_size)?,
            bias: Matrix::zeros(end_size, 1)?,
            begin,
            end: begin + 1,
        })
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// Row-major weight values. The slice length is fixed, so the
    /// `(end, begin)` shape cannot change through it.
    pub fn weights_mut(&mut self) -> &mut [f64] {
        self.weights.as_mut_slice()
    }

    /// Overwrites the weights; `weights` must match the current shape.
    pub fn set_weights(&mut self, weights: &Matrix) -> Result<()> {
        self.weights.copy_from(weights)
    }

    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    pub fn bias_mut(&mut self) -> &mut [f64] {
        self.bias.as_mut_slice()
    }

    /// Overwrites the bias; `bias` must match the current `(end, 1)` shape.
    pub fn set_bias(&mut self, bias: &Matrix) -> Result<()> {
        self.bias.copy_from(bias)
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Weights plus biases.
    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.bias.len()
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.weights.randomize(rng);
        self.bias.randomize(rng);
    }
}
