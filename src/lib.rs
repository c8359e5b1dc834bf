//! letterclass: online backpropagation for letter recognition.
//!
//! This crate trains a small feed-forward neural network (16 attribute
//! inputs, one sigmoid hidden layer, 26 sigmoid outputs) to classify letter
//! examples, one misclassified example at a time, with momentum-weighted
//! updates. It provides the dense vector/matrix primitives the network is
//! built on, the dataset loader and standardization helpers around it, and
//! CSV writers for the accuracy trace and confusion matrix.
//!
//! All randomness (weight initialization, per-epoch shuffling, tie-breaks
//! between equally activated outputs) flows through a caller-supplied
//! `rand::Rng`, so a seeded generator makes a whole training run
//! reproducible.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod math;
pub mod network;
pub mod preprocessing;
pub mod report;
