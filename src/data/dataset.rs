use crate::error::{NnError, Result, Shape};
use crate::math::matrix::Matrix;

/// Labelled examples: one row per example in both `inputs` and `targets`.
#[derive(Debug, Clone)]
pub struct Dataset {
    inputs: Matrix,
    targets: Matrix,
}

impl Dataset {
    pub fn new(inputs: Matrix, targets: Matrix) -> Result<Dataset> {
        if inputs.rows() != targets.rows() {
            return Err(NnError::shape_mismatch(
                "dataset",
                Shape::new(inputs.rows(), targets.cols()),
                targets.shape(),
            ));
        }
        Ok(Dataset { inputs, targets })
    }

    /// Builds a dataset from per-example input and target vectors.
    pub fn from_rows(inputs: Vec<Vec<f64>>, targets: Vec<Vec<f64>>) -> Result<Dataset> {
        Dataset::new(Matrix::from_rows(inputs)?, Matrix::from_rows(targets)?)
    }

    pub fn inputs(&self) -> &Matrix {
        &self.inputs
    }

    pub fn targets(&self) -> &Matrix {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.inputs.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.rows() == 0
    }

    pub fn input_width(&self) -> usize {
        self.inputs.cols()
    }

    pub fn target_width(&self) -> usize {
        self.targets.cols()
    }

    /// Iterates `(input_row, target_row)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        (0..self.len()).map(move |i| (self.inputs.row(i), self.targets.row(i)))
    }
}
