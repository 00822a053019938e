use crate::error::Result;
use crate::math::matrix::Matrix;

/// A group of neurons held as an `(n, 1)` column of activations.
#[derive(Debug, Clone)]
pub struct Layer {
    pub(crate) activations: Matrix,
}

impl Layer {
    pub fn new(size: usize) -> Result<Layer> {
        Ok(Layer {
            activations: Matrix::zeros(size, 1)?,
        })
    }

    /// Number of neurons.
    pub fn size(&self) -> usize {
        self.activations.rows()
    }

    pub fn activations(&self) -> &Matrix {
        &self.activations
    }
}
