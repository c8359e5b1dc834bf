//! The two-layer sigmoid network and its online backpropagation trainer.
pub mod layer;
pub mod network;

pub use layer::{
    hidden_error_gradient, output_error_gradient, Deltas, ErrorGradient, SigmoidLayer,
    WeightedErrors,
};
pub use network::{
    char_from_class_index, class_index_from_char, Activations, NeuralNetwork, ATTRIBUTE_COUNT,
    CLASS_COUNT,
};
