use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::slice::Iter;

use rand::Rng;

use crate::error::MathError;

/// Each element of a freshly generated vector or matrix falls in
/// (-INIT_RANGE, INIT_RANGE). Small initial weights keep the sigmoid out of
/// its flat tails at the start of training.
pub const INIT_RANGE: f64 = 0.25;

/// A dense real-valued vector with a length fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Creates a zero vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Vector { data: vec![0.0; len] }
    }

    /// Wraps the given values.
    pub fn from_vec(data: Vec<f64>) -> Self {
        Vector { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// In-place scaled addition: `self[i] += scale * other[i]`.
    pub fn add(&mut self, other: &Vector, scale: f64) -> Result<(), MathError> {
        if other.len() != self.len() {
            return Err(MathError::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        for (a, b) in self.data.iter_mut().zip(other.iter()) {
            *a += scale * b;
        }
        Ok(())
    }

    /// Multiplies every element by a constant.
    pub fn scale(&mut self, factor: f64) {
        for v in self.data.iter_mut() {
            *v *= factor;
        }
    }

    /// Dot product of this vector and another. Commutative.
    pub fn dot(&self, other: &Vector) -> Result<f64, MathError> {
        if other.len() != self.len() {
            return Err(MathError::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a * b).sum())
    }

    /// Applies the logistic function `1 / (1 + e^-x)` to every element,
    /// replacing the contents with the results.
    pub fn sigmoid_transform(&mut self) {
        for v in self.data.iter_mut() {
            *v = 1.0 / (1.0 + (-*v).exp());
        }
    }

    /// Elementwise product of two vectors.
    pub fn hadamard(a: &Vector, b: &Vector) -> Result<Vector, MathError> {
        if a.len() != b.len() {
            return Err(MathError::LengthMismatch {
                expected: a.len(),
                found: b.len(),
            });
        }
        Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).collect())
    }

    /// Returns a new vector `b + scale * a` without modifying either input.
    pub fn add_scaled(a: &Vector, scale: f64, b: &Vector) -> Result<Vector, MathError> {
        let mut result = b.clone();
        result.add(a, scale)?;
        Ok(result)
    }

    /// Generates a vector of small random values, each uniform in
    /// (-INIT_RANGE, INIT_RANGE).
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Vector {
        (0..len).map(|_| rng.gen_range(-INIT_RANGE..INIT_RANGE)).collect()
    }

    /// Returns a copy of `v` scaled by a constant.
    pub fn scaled(v: &Vector, factor: f64) -> Vector {
        let mut result = v.clone();
        result.scale(factor);
        result
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
