use std::fmt;
use std::ops::Index;

use rand::Rng;

use crate::error::MathError;
use crate::math::vector::Vector;

/// A dense 2D array stored as rows of `Vector`s.
///
/// Every row is guaranteed to have exactly `cols` elements; constructors
/// that take raw data reject ragged input instead of padding it.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vector>,
}

impl Matrix {
    /// Creates a zero matrix with the given dimensions.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: (0..rows).map(|_| Vector::zeros(cols)).collect(),
        }
    }

    /// Builds a matrix from row vectors, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vector>) -> Result<Self, MathError> {
        let cols = rows.first().map_or(0, Vector::len);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(MathError::NonRectangularData);
        }
        Ok(Matrix {
            rows: rows.len(),
            cols,
            data: rows,
        })
    }

    /// Builds a matrix from nested row data, rejecting ragged input.
    pub fn from_nested(data: Vec<Vec<f64>>) -> Result<Self, MathError> {
        Matrix::from_rows(data.into_iter().map(Vector::from_vec).collect())
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Borrows row `i`.
    pub fn row(&self, i: usize) -> &Vector {
        &self.data[i]
    }

    pub fn rows(&self) -> impl Iterator<Item = &Vector> {
        self.data.iter()
    }

    /// Multiplies this matrix by a vector: `result[i] = row_i . v`.
    pub fn vector_product(&self, v: &Vector) -> Result<Vector, MathError> {
        if v.len() != self.cols {
            return Err(MathError::LengthMismatch {
                expected: self.cols,
                found: v.len(),
            });
        }
        self.data.iter().map(|row| row.dot(v)).collect()
    }

    /// Elementwise in-place addition of another matrix.
    pub fn matrix_add(&mut self, other: &Matrix) -> Result<(), MathError> {
        if self.rows != other.rows {
            return Err(MathError::MismatchedHeight {
                expected: self.rows,
                found: other.rows,
            });
        }
        if self.cols != other.cols {
            return Err(MathError::MismatchedWidth {
                expected: self.cols,
                found: other.cols,
            });
        }
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            row.add(other_row, 1.0).expect("row widths checked above");
        }
        Ok(())
    }

    /// Returns a new matrix with the dimensions swapped.
    pub fn transpose(&self) -> Matrix {
        let data = (0..self.cols)
            .map(|i| self.data.iter().map(|row| row[i]).collect())
            .collect();
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Multiplies every element by a constant.
    pub fn scale(&mut self, factor: f64) {
        for row in self.data.iter_mut() {
            row.scale(factor);
        }
    }

    /// Returns a copy of `m` scaled by a constant.
    pub fn scaled(m: &Matrix, factor: f64) -> Matrix {
        let mut result = m.clone();
        result.scale(factor);
        result
    }

    /// Generates a matrix whose rows are small random vectors.
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        Matrix {
            rows,
            cols,
            data: (0..rows).map(|_| Vector::random(cols, rng)).collect(),
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row][col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
