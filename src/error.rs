use std::error::Error;
use std::fmt;

/// Shape disagreements raised by the vector/matrix primitives.
///
/// These are recoverable, typed errors: once layer shapes are fixed at
/// construction the trainer never expects to see them, but the math layer
/// refuses to silently truncate or pad mismatched operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Two vectors (or a matrix width and a vector) disagree in length.
    LengthMismatch { expected: usize, found: usize },
    /// Raw row data with uneven row lengths was used to build a matrix.
    NonRectangularData,
    /// Elementwise matrix addition with a different row count.
    MismatchedHeight { expected: usize, found: usize },
    /// Elementwise matrix addition with a different column count.
    MismatchedWidth { expected: usize, found: usize },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MathError::LengthMismatch { expected, found } => {
                write!(f, "expected vector of length {}, found {}", expected, found)
            }
            MathError::NonRectangularData => {
                write!(f, "matrix rows must all have the same length")
            }
            MathError::MismatchedHeight { expected, found } => {
                write!(f, "expected matrix with {} rows, found {}", expected, found)
            }
            MathError::MismatchedWidth { expected, found } => {
                write!(f, "expected matrix with {} columns, found {}", expected, found)
            }
        }
    }
}

impl Error for MathError {}
