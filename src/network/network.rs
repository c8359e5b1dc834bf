use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::data_handling::Letter;
use crate::error::MathError;
use crate::math::Vector;
use crate::network::layer::{
    hidden_error_gradient, output_error_gradient, Deltas, SigmoidLayer,
};
use crate::report::{AccuracyHistory, AccuracyPair};

/// Number of attributes in a letter example.
pub const ATTRIBUTE_COUNT: usize = 16;
/// Number of letter classes ('A' through 'Z').
pub const CLASS_COUNT: usize = 26;

/// Soft one-hot target values. Using 0.9/0.1 instead of exact 1/0 keeps the
/// sigmoid away from saturation, where its gradient vanishes.
const SOFT_TARGET_HIGH: f64 = 0.9;
const SOFT_TARGET_LOW: f64 = 0.1;

/// Maps a class index in `0..26` to its letter.
pub fn char_from_class_index(index: usize) -> char {
    assert!(index < CLASS_COUNT, "class index must be below {}", CLASS_COUNT);
    (b'A' + index as u8) as char
}

/// Maps a letter in `'A'..='Z'` to its class index.
pub fn class_index_from_char(c: char) -> usize {
    assert!(c.is_ascii_uppercase(), "class symbol must be 'A'..='Z'");
    (c as u8 - b'A') as usize
}

/// Intermediate activations exposed for training.
#[derive(Debug)]
pub struct Activations {
    pub hidden: Vector,
    pub output: Vector,
    pub guess: char,
}

/// A feed-forward network with one sigmoid hidden layer and a 26-unit
/// sigmoid output layer, trained by online backpropagation with momentum.
///
/// The network exclusively owns its layers. Each training epoch operates on
/// a deep copy, whose layers then become the network's new state.
#[derive(Clone, Debug, PartialEq)]
pub struct NeuralNetwork {
    hidden: SigmoidLayer,
    output: SigmoidLayer,
}

impl NeuralNetwork {
    /// Creates a randomly initialized network with the given hidden width.
    pub fn new<R: Rng>(hidden_width: usize, rng: &mut R) -> Self {
        NeuralNetwork {
            hidden: SigmoidLayer::random(hidden_width, ATTRIBUTE_COUNT, rng),
            output: SigmoidLayer::random(CLASS_COUNT, hidden_width, rng),
        }
    }

    /// Restores a network from explicit layers.
    ///
    /// Preconditions: the hidden layer takes `ATTRIBUTE_COUNT` inputs, the
    /// output layer has `CLASS_COUNT` units, and the widths agree.
    pub fn from_layers(hidden: SigmoidLayer, output: SigmoidLayer) -> Self {
        assert_eq!(hidden.input_count(), ATTRIBUTE_COUNT);
        assert_eq!(output.weight_count(), CLASS_COUNT);
        assert_eq!(output.input_count(), hidden.weight_count());
        NeuralNetwork { hidden, output }
    }

    pub fn hidden(&self) -> &SigmoidLayer {
        &self.hidden
    }

    pub fn output(&self) -> &SigmoidLayer {
        &self.output
    }

    /// Guesses which letter the given example represents.
    ///
    /// Returns the class with the highest output activation; ties are broken
    /// by a uniform-random choice among the tied set.
    pub fn classify<R: Rng>(&self, letter: &Letter, rng: &mut R) -> char {
        self.classify_with_activations(letter, rng).guess
    }

    /// Like `classify`, but also exposes both layers' activations so the
    /// trainer can backpropagate from them.
    pub fn classify_with_activations<R: Rng>(&self, letter: &Letter, rng: &mut R) -> Activations {
        let hidden = self.hidden.calculate_output(letter.attributes());
        let output = self.output.calculate_output(&hidden);
        let guess = guess_from_activations(&output, rng);
        Activations {
            hidden,
            output,
            guess,
        }
    }

    /// Fraction of examples in `dataset` classified correctly.
    ///
    /// Precondition: `dataset` is non-empty.
    pub fn accuracy<R: Rng>(&self, dataset: &[Letter], rng: &mut R) -> f64 {
        assert!(!dataset.is_empty(), "accuracy requires a non-empty dataset");
        let correct = dataset
            .iter()
            .filter(|l| self.classify(l, rng) == l.known_value())
            .count();
        correct as f64 / dataset.len() as f64
    }

    /// Runs one training epoch over `training` in its given order (callers
    /// shuffle beforehand) and returns the resulting network, leaving this
    /// one untouched.
    ///
    /// Only misclassified examples trigger an update. Each layer's deltas
    /// from the previous update in this same epoch seed the next momentum
    /// term; the seed is never reset between examples.
    pub fn train_epoch<R: Rng>(
        &self,
        training: &[Letter],
        learning_rate: f64,
        momentum: f64,
        rng: &mut R,
    ) -> Result<NeuralNetwork, MathError> {
        let mut network = self.clone();

        let mut output_deltas: Option<Deltas> = None;
        let mut hidden_deltas: Option<Deltas> = None;

        for letter in training {
            let activations = network.classify_with_activations(letter, rng);
            if activations.guess == letter.known_value() {
                continue;
            }

            let targets = soft_targets(letter.known_value());
            let output_errors = SigmoidLayer::calculate_errors(
                &activations.output,
                &targets,
                output_error_gradient,
            )?;
            let weighted = network.output.weighted_errors(&output_errors)?;
            let hidden_errors = SigmoidLayer::calculate_errors(
                &activations.hidden,
                &weighted.weight_errors,
                hidden_error_gradient,
            )?;

            output_deltas = Some(network.output.train(
                learning_rate,
                &activations.hidden,
                &output_errors,
                momentum,
                output_deltas.as_ref(),
            )?);
            hidden_deltas = Some(network.hidden.train(
                learning_rate,
                letter.attributes(),
                &hidden_errors,
                momentum,
                hidden_deltas.as_ref(),
            )?);
        }

        Ok(network)
    }

    /// Runs the full training loop and returns the accuracy trace.
    ///
    /// The history starts with the pre-training baseline, then gains one
    /// `(training, test)` accuracy pair per epoch, giving `epoch_limit + 1`
    /// entries. Each epoch shuffles the training set, trains a copy of the
    /// network, and adopts the copy's layers unconditionally. With
    /// `early_stopping` set, an epoch whose training accuracy fails to
    /// improve ends the loop instead, leaving the previous weights in place.
    pub fn train<R: Rng>(
        &mut self,
        training: &[Letter],
        test: &[Letter],
        learning_rate: f64,
        momentum: f64,
        epoch_limit: usize,
        early_stopping: bool,
        rng: &mut R,
    ) -> Result<AccuracyHistory, MathError> {
        let mut history = AccuracyHistory::new();
        let mut training_accuracy = self.accuracy(training, rng);
        let test_accuracy = self.accuracy(test, rng);
        history.add(AccuracyPair::new(training_accuracy, test_accuracy));
        debug!(
            "baseline accuracy: training {:.4}, test {:.4}",
            training_accuracy, test_accuracy
        );

        let mut shuffled = training.to_vec();
        for epoch in 1..=epoch_limit {
            shuffled.shuffle(rng);
            let candidate = self.train_epoch(&shuffled, learning_rate, momentum, rng)?;

            let new_training_accuracy = candidate.accuracy(training, rng);
            let new_test_accuracy = candidate.accuracy(test, rng);
            history.add(AccuracyPair::new(new_training_accuracy, new_test_accuracy));
            info!(
                "epoch {}/{}: training accuracy {:.4}, test accuracy {:.4}",
                epoch, epoch_limit, new_training_accuracy, new_test_accuracy
            );

            if early_stopping && new_training_accuracy <= training_accuracy {
                info!(
                    "stopping early at epoch {}: training accuracy plateaued",
                    epoch
                );
                break;
            }

            training_accuracy = new_training_accuracy;
            *self = candidate;
        }

        Ok(history)
    }
}

/// Builds the soft one-hot target vector for a known class.
fn soft_targets(known_value: char) -> Vector {
    let mut targets = Vector::from_vec(vec![SOFT_TARGET_LOW; CLASS_COUNT]);
    targets[class_index_from_char(known_value)] = SOFT_TARGET_HIGH;
    targets
}

/// Picks the letter with the highest activation, choosing uniformly at
/// random among tied maxima.
fn guess_from_activations<R: Rng>(activations: &Vector, rng: &mut R) -> char {
    let max = activations
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let winners: Vec<usize> = activations
        .iter()
        .enumerate()
        .filter(|(_, &a)| a == max)
        .map(|(i, _)| i)
        .collect();
    let winner = winners[rng.gen_range(0..winners.len())];
    char_from_class_index(winner)
}
