use rand::Rng;

use crate::error::MathError;
use crate::math::{Matrix, Vector};

/// Error-gradient formula applied per output unit during backpropagation.
///
/// The first argument is the unit's activation; the second is the training
/// signal for that unit (the soft target for an output layer, the weighted
/// error propagated from the next layer for a hidden one). Layers share a
/// single implementation and differ only in the gradient they are handed,
/// so there is no per-role layer type.
pub type ErrorGradient = fn(output: f64, signal: f64) -> f64;

/// Gradient for a hidden layer: `o * (1 - o) * weighted_error`.
pub fn hidden_error_gradient(output: f64, weighted_error: f64) -> f64 {
    output * (1.0 - output) * weighted_error
}

/// Gradient for the output layer: `o * (1 - o) * (target - o)`.
pub fn output_error_gradient(output: f64, target: f64) -> f64 {
    output * (1.0 - output) * (target - output)
}

/// The weight and bias updates applied by one `train` call, retained so the
/// next call can fold them back in as its momentum term.
#[derive(Clone, Debug, PartialEq)]
pub struct Deltas {
    pub weight_deltas: Matrix,
    pub bias_deltas: Vector,
}

/// Backpropagation signal handed to the preceding layer.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedErrors {
    /// Errors weighted through the transposed weight matrix; one entry per
    /// input of this layer, consumed by the preceding layer's gradient.
    pub weight_errors: Vector,
    /// Hadamard product of this layer's biases with the upstream errors.
    /// Computed for parity with the original trainer; see DESIGN.md for why
    /// this diverges from the textbook bias gradient.
    pub bias_errors: Vector,
}

/// One fully-connected layer of sigmoid units.
#[derive(Clone, Debug, PartialEq)]
pub struct SigmoidLayer {
    weight_count: usize,
    input_count: usize,
    weights: Matrix,
    biases: Vector,
}

impl SigmoidLayer {
    /// Creates a layer with weights and biases drawn uniformly from the
    /// small-value initialization range.
    pub fn random<R: Rng>(weight_count: usize, input_count: usize, rng: &mut R) -> Self {
        SigmoidLayer {
            weight_count,
            input_count,
            weights: Matrix::random(weight_count, input_count, rng),
            biases: Vector::random(weight_count, rng),
        }
    }

    /// Restores a layer from explicit weight and bias state.
    pub fn from_parts(weights: Matrix, biases: Vector) -> Result<Self, MathError> {
        if biases.len() != weights.nrows() {
            return Err(MathError::LengthMismatch {
                expected: weights.nrows(),
                found: biases.len(),
            });
        }
        Ok(SigmoidLayer {
            weight_count: weights.nrows(),
            input_count: weights.ncols(),
            weights,
            biases,
        })
    }

    pub fn weight_count(&self) -> usize {
        self.weight_count
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Vector {
        &self.biases
    }

    /// Forward pass: `sigmoid(W . inputs + b)`.
    ///
    /// The input length is a precondition; callers fix shapes at network
    /// construction, so a violation here is a programming error rather than
    /// a condition to recover from.
    pub fn calculate_output(&self, inputs: &Vector) -> Vector {
        assert_eq!(
            inputs.len(),
            self.input_count,
            "layer expects {} inputs, got {}",
            self.input_count,
            inputs.len()
        );
        let mut output = self
            .weights
            .vector_product(inputs)
            .expect("input length asserted above");
        output
            .add(&self.biases, 1.0)
            .expect("bias length fixed at construction");
        output.sigmoid_transform();
        output
    }

    /// Computes per-unit errors by zipping activations with their training
    /// signal through the supplied gradient formula.
    pub fn calculate_errors(
        outputs: &Vector,
        signal: &Vector,
        gradient: ErrorGradient,
    ) -> Result<Vector, MathError> {
        if outputs.len() != signal.len() {
            return Err(MathError::LengthMismatch {
                expected: outputs.len(),
                found: signal.len(),
            });
        }
        Ok(outputs
            .iter()
            .zip(signal.iter())
            .map(|(&o, &s)| gradient(o, s))
            .collect())
    }

    /// Transforms this layer's errors into the signal consumed by the
    /// preceding layer: `weight_errors = W^T . errors`.
    pub fn weighted_errors(&self, errors: &Vector) -> Result<WeightedErrors, MathError> {
        let weight_errors = self.weights.transpose().vector_product(errors)?;
        let bias_errors = Vector::hadamard(&self.biases, errors)?;
        Ok(WeightedErrors {
            weight_errors,
            bias_errors,
        })
    }

    /// Applies one momentum-weighted gradient update in place.
    ///
    /// For each unit `i`, `weight_delta_row_i = learning_rate * errors[i] *
    /// inputs` and `bias_delta = learning_rate * errors`; when
    /// `previous_deltas` is supplied, `momentum` times it is folded into both
    /// before they are applied. Returns the deltas as applied so the caller
    /// can thread them into the next update.
    pub fn train(
        &mut self,
        learning_rate: f64,
        inputs: &Vector,
        errors: &Vector,
        momentum: f64,
        previous_deltas: Option<&Deltas>,
    ) -> Result<Deltas, MathError> {
        if inputs.len() != self.input_count {
            return Err(MathError::LengthMismatch {
                expected: self.input_count,
                found: inputs.len(),
            });
        }
        if errors.len() != self.weight_count {
            return Err(MathError::LengthMismatch {
                expected: self.weight_count,
                found: errors.len(),
            });
        }

        let rows = errors
            .iter()
            .map(|&e| Vector::scaled(inputs, learning_rate * e))
            .collect();
        let mut weight_deltas = Matrix::from_rows(rows).expect("rows share the input length");
        let mut bias_deltas = Vector::scaled(errors, learning_rate);

        if let Some(previous) = previous_deltas {
            weight_deltas.matrix_add(&Matrix::scaled(&previous.weight_deltas, momentum))?;
            bias_deltas.add(&previous.bias_deltas, momentum)?;
        }

        self.weights.matrix_add(&weight_deltas)?;
        self.biases.add(&bias_deltas, 1.0)?;

        Ok(Deltas {
            weight_deltas,
            bias_deltas,
        })
    }
}
