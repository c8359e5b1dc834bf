//! Integration tests for the dataset loader, standardization, and the CSV
//! result writers.

use std::io::Write;

use letterclass::config::TrainConfig;
use letterclass::data_handling::{load_letters, Letter};
use letterclass::math::Vector;
use letterclass::network::ATTRIBUTE_COUNT;
use letterclass::preprocessing::{fit_scaler, transform_all};
use letterclass::report::{AccuracyHistory, AccuracyPair, ConfusionMatrix};

fn write_dataset(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("letters.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}

// ---------------------------------------------------------------------------
// Dataset loader
// ---------------------------------------------------------------------------

#[test]
fn load_letters_parses_and_scales_attributes() {
    let (_dir, path) = write_dataset(
        "T,2,8,3,5,1,8,13,0,6,6,10,8,0,8,0,8\n\
         A,1,1,3,2,1,8,2,2,2,8,2,8,1,6,2,7\n",
    );
    let letters = load_letters(&path).unwrap();
    assert_eq!(letters.len(), 2);
    assert_eq!(letters[0].known_value(), 'T');
    assert_eq!(letters[1].known_value(), 'A');
    assert_eq!(letters[0].attributes().len(), ATTRIBUTE_COUNT);
    // raw ordinals are divided by 15
    assert!((letters[0].attributes()[0] - 2.0 / 15.0).abs() < 1e-15);
    assert!((letters[0].attributes()[6] - 13.0 / 15.0).abs() < 1e-15);
}

#[test]
fn load_letters_skips_empty_lines() {
    let (_dir, path) = write_dataset(
        "T,2,8,3,5,1,8,13,0,6,6,10,8,0,8,0,8\n\
         \n\
         A,1,1,3,2,1,8,2,2,2,8,2,8,1,6,2,7\n",
    );
    assert_eq!(load_letters(&path).unwrap().len(), 2);
}

#[test]
fn load_letters_invalid_path_errors() {
    let err = load_letters("/nonexistent/path/letters.csv").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/path/letters.csv"));
}

#[test]
fn load_letters_rejects_short_records() {
    let (_dir, path) = write_dataset("A,1,2,3\n");
    assert!(load_letters(&path).is_err());
}

#[test]
fn load_letters_rejects_bad_labels() {
    let (_dir, path) = write_dataset("5,2,8,3,5,1,8,13,0,6,6,10,8,0,8,0,8\n");
    assert!(load_letters(&path).is_err());
}

#[test]
fn load_letters_rejects_non_numeric_attributes() {
    let (_dir, path) = write_dataset("T,2,8,x,5,1,8,13,0,6,6,10,8,0,8,0,8\n");
    assert!(load_letters(&path).is_err());
}

// ---------------------------------------------------------------------------
// Standardization
// ---------------------------------------------------------------------------

#[test]
fn scaler_standardizes_each_feature() {
    let mut letters = vec![
        Letter::new('A', Vector::from_vec(vec![0.0; ATTRIBUTE_COUNT])),
        Letter::new('B', Vector::from_vec(vec![1.0; ATTRIBUTE_COUNT])),
        Letter::new('C', Vector::from_vec(vec![2.0; ATTRIBUTE_COUNT])),
    ];
    let scaler = fit_scaler(&letters);
    assert!((scaler.mean[0] - 1.0).abs() < 1e-12);
    assert!((scaler.std[0] - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);

    transform_all(&mut letters, &scaler);
    for c in 0..ATTRIBUTE_COUNT {
        let column: Vec<f64> = letters.iter().map(|l| l.attributes()[c]).collect();
        let mean = column.iter().sum::<f64>() / column.len() as f64;
        let var = column.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
            / column.len() as f64;
        assert!(mean.abs() < 1e-12);
        assert!((var.sqrt() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn scaler_clamps_constant_features() {
    let letters = vec![
        Letter::new('A', Vector::from_vec(vec![0.4; ATTRIBUTE_COUNT])),
        Letter::new('B', Vector::from_vec(vec![0.4; ATTRIBUTE_COUNT])),
    ];
    let scaler = fit_scaler(&letters);
    // zero variance clamps to the minimum instead of dividing by zero
    assert!(scaler.std.iter().all(|&s| s > 0.0));
}

// ---------------------------------------------------------------------------
// Accuracy history
// ---------------------------------------------------------------------------

#[test]
fn accuracy_history_records_pairs_in_order() {
    let mut history = AccuracyHistory::new();
    assert!(history.is_empty());
    history.add(AccuracyPair::new(0.1, 0.2));
    history.add(AccuracyPair::new(0.3, 0.4));
    assert_eq!(history.len(), 2);
    assert_eq!(history.pairs()[0], AccuracyPair::new(0.1, 0.2));
    assert_eq!(history.last(), Some(&AccuracyPair::new(0.3, 0.4)));
}

#[test]
fn accuracy_history_csv_has_one_headerless_line_per_pair() {
    let mut history = AccuracyHistory::new();
    history.add(AccuracyPair::new(0.5, 0.25));
    history.add(AccuracyPair::new(1.0, 0.75));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.csv");
    history.write_csv(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "0.5,0.25\n1,0.75\n");
}

// ---------------------------------------------------------------------------
// Confusion matrix
// ---------------------------------------------------------------------------

#[test]
fn confusion_matrix_counts_true_by_predicted() {
    let matrix = ConfusionMatrix::from_pairs(vec![('A', 'A'), ('A', 'B'), ('B', 'B'), ('A', 'B')]);
    assert_eq!(matrix.count('A', 'A'), 1);
    assert_eq!(matrix.count('A', 'B'), 2);
    assert_eq!(matrix.count('B', 'B'), 1);
    assert_eq!(matrix.count('B', 'A'), 0);
    assert_eq!(matrix.total(), 4);
    assert!((matrix.accuracy() - 0.5).abs() < 1e-15);
}

#[test]
fn confusion_matrix_csv_layout() {
    let mut matrix = ConfusionMatrix::new();
    matrix.record('A', 'B');
    matrix.record('Z', 'Z');

    let csv = matrix.to_csv_string();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 26);
    // row 'A': one count in column 'B'
    let mut expected_first = vec!["0"; 26];
    expected_first[1] = "1";
    assert_eq!(lines[0], expected_first.join(","));
    // row 'Z': one count on the diagonal
    let mut expected_last = vec!["0"; 26];
    expected_last[25] = "1";
    assert_eq!(lines[25], expected_last.join(","));
}

#[test]
fn confusion_matrix_write_csv_round_trips_bytes() {
    let matrix = ConfusionMatrix::from_pairs(vec![('C', 'D')]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("confusion.csv");
    matrix.write_csv(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), matrix.to_csv_string());
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn train_config_defaults() {
    let config = TrainConfig::default();
    assert_eq!(config.hidden_width, 8);
    assert_eq!(config.learning_rate, 0.1);
    assert_eq!(config.epoch_limit, 50);
    assert!(!config.early_stopping);
    assert!(!config.standardize);
    assert!(config.seed.is_none());
}

#[test]
fn train_config_json_fills_missing_fields_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "hidden_width": 4, "seed": 7 }"#).unwrap();

    let config = TrainConfig::from_json_file(&path).unwrap();
    assert_eq!(config.hidden_width, 4);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.momentum, TrainConfig::default().momentum);
}

#[test]
fn train_config_missing_file_errors() {
    assert!(TrainConfig::from_json_file("/nonexistent/config.json").is_err());
}
