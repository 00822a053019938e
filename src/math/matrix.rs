use std::fmt;
use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::error::{NnError, Result, Shape};

/// Absolute per-element tolerance used by [`Matrix::approx_eq`].
pub const EQ_TOLERANCE: f64 = 1e-6;

/// Dense 2-D matrix of `f64` stored contiguously in row-major order.
///
/// Element `(i, j)` lives at linear index `i * cols + j`, and the backing
/// store always holds exactly `rows * cols` elements. Clones are deep.
#[derive(Debug, Clone)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Allocates a `rows x cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix> {
        if rows == 0 || cols == 0 {
            return Err(NnError::InvalidDimensions { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(NnError::AllocationFailure { rows, cols })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| NnError::AllocationFailure { rows, cols })?;
        data.resize(len, 0.0);

        Ok(Matrix { rows, cols, data })
    }

    /// Allocates a `rows x cols` matrix of uniform draws in `[0, 1]`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Matrix> {
        let mut res = Matrix::zeros(rows, cols)?;
        res.randomize(rng);
        Ok(res)
    }

    /// Square matrix with ones on the diagonal.
    pub fn identity(size: usize) -> Result<Matrix> {
        let mut res = Matrix::zeros(size, size)?;
        for i in 0..size {
            res.data[i * size + i] = 1.0;
        }
        Ok(res)
    }

    /// Builds a `rows x cols` matrix from a row-major flat slice.
    pub fn from_flat(rows: usize, cols: usize, values: &[f64]) -> Result<Matrix> {
        let mut res = Matrix::zeros(rows, cols)?;
        if values.len() != res.data.len() {
            return Err(NnError::shape_mismatch(
                "from_flat",
                Shape::new(rows, cols),
                Shape::new(1, values.len()),
            ));
        }
        res.data.copy_from_slice(values);
        Ok(res)
    }

    /// Builds a matrix from a list of equally long rows.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map(|row| row.len()).unwrap_or(0);
        let mut res = Matrix::zeros(rows, cols)?;

        for (i, row) in data.iter().enumerate() {
            if row.len() != cols {
                return Err(NnError::shape_mismatch(
                    "from_rows",
                    Shape::new(1, cols),
                    Shape::new(1, row.len()),
                ));
            }
            res.data[i * cols..(i + 1) * cols].copy_from_slice(row);
        }

        Ok(res)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    /// Number of stored elements, always `rows * cols`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Returns element `(i, j)`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Overwrites element `(i, j)`.
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        if i >= self.rows || j >= self.cols {
            return Err(NnError::shape_mismatch(
                "set",
                self.shape(),
                Shape::new(i.saturating_add(1), j.saturating_add(1)),
            ));
        }
        self.data[i * self.cols + j] = value;
        Ok(())
    }

    /// Row `i` as a slice. Panics when `i` is out of range, like slice indexing.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Overwrites every element with an independent uniform draw in `[0, 1]`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for x in self.data.iter_mut() {
            *x = rng.gen_range(0.0..=1.0);
        }
    }

    /// Applies `functor` to every element in place.
    pub fn apply<F>(&mut self, functor: F)
    where
        F: Fn(f64) -> f64,
    {
        self.data.iter_mut().for_each(|x| *x = functor(*x));
    }

    pub fn equal_dimensions(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Element-wise comparison within [`EQ_TOLERANCE`].
    ///
    /// Matrices of different shape are never equal.
    pub fn approx_eq(&self, other: &Matrix) -> bool {
        self.equal_dimensions(other)
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= EQ_TOLERANCE)
    }

    /// Overwrites `self` with the contents of `src`.
    pub fn copy_from(&mut self, src: &Matrix) -> Result<()> {
        if !self.equal_dimensions(src) {
            return Err(NnError::shape_mismatch("copy_from", self.shape(), src.shape()));
        }
        self.data.copy_from_slice(&src.data);
        Ok(())
    }

    /// Computes `dst = a * b`.
    ///
    /// Requires `a.cols == b.rows` and `dst` shaped `a.rows x b.cols`.
    pub fn multiply_into(dst: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
        if a.cols != b.rows {
            return Err(NnError::shape_mismatch(
                "multiply",
                Shape::new(a.cols, b.cols),
                b.shape(),
            ));
        }
        if dst.rows != a.rows || dst.cols != b.cols {
            return Err(NnError::shape_mismatch(
                "multiply_into",
                Shape::new(a.rows, b.cols),
                dst.shape(),
            ));
        }
        Matrix::multiply_into_unchecked(dst, a, b);
        Ok(())
    }

    pub(crate) fn multiply_into_unchecked(dst: &mut Matrix, a: &Matrix, b: &Matrix) {
        debug_assert_eq!(a.cols, b.rows);
        debug_assert!(dst.rows == a.rows && dst.cols == b.cols);

        dst.fill(0.0);
        for i in 0..dst.rows {
            for j in 0..dst.cols {
                let mut sum = 0.0;
                for k in 0..a.cols {
                    sum += a.data[i * a.cols + k] * b.data[k * b.cols + j];
                }
                dst.data[i * dst.cols + j] += sum;
            }
        }
    }

    /// Allocates and returns `self * rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(NnError::shape_mismatch(
                "multiply",
                Shape::new(self.cols, rhs.cols),
                rhs.shape(),
            ));
        }
        let mut res = Matrix::zeros(self.rows, rhs.cols)?;
        Matrix::multiply_into_unchecked(&mut res, self, rhs);
        Ok(res)
    }

    /// In-place element-wise `self += src`.
    pub fn add(&mut self, src: &Matrix) -> Result<()> {
        if !self.equal_dimensions(src) {
            return Err(NnError::shape_mismatch("add", self.shape(), src.shape()));
        }
        self.add_unchecked(src);
        Ok(())
    }

    pub(crate) fn add_unchecked(&mut self, src: &Matrix) {
        debug_assert!(self.equal_dimensions(src));
        for (x, y) in self.data.iter_mut().zip(src.data.iter()) {
            *x += y;
        }
    }

    /// Allocates and returns `self + rhs`.
    pub fn sum(&self, rhs: &Matrix) -> Result<Matrix> {
        if !self.equal_dimensions(rhs) {
            return Err(NnError::shape_mismatch("sum", self.shape(), rhs.shape()));
        }
        let mut res = self.clone();
        res.add_unchecked(rhs);
        Ok(res)
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = vec![0.0; self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }

        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of range for {}",
            self.shape()
        );
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of range for {}",
            self.shape()
        );
        &mut self.data[i * self.cols + j]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[")?;
            for (j, value) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value:.6}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
