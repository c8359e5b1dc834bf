use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use letterclass::config::TrainConfig;
use letterclass::data_handling::load_letters;
use letterclass::network::NeuralNetwork;
use letterclass::preprocessing::{fit_scaler, transform_all};
use letterclass::report::ConfusionMatrix;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("LETTERCLASS_LOG", "warn,letterclass=info"))
        .init();

    let matches = Command::new("letterclass")
        .version(clap::crate_version!())
        .about("Train a two-layer sigmoid network on letter attribute vectors")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Train a network and write the accuracy trace and confusion matrix")
                .arg(
                    Arg::new("train_data")
                        .short('d')
                        .long("train-data")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Path to the training data CSV (label,attr1,...,attr16 per line)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("test_data")
                        .short('t')
                        .long("test-data")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Path to the test data CSV")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Path to a JSON training configuration file")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("hidden_width")
                        .long("hidden-width")
                        .value_parser(clap::value_parser!(usize))
                        .help("Number of hidden units. Overrides the config file."),
                )
                .arg(
                    Arg::new("learning_rate")
                        .long("learning-rate")
                        .value_parser(clap::value_parser!(f64))
                        .help("Learning rate. Overrides the config file."),
                )
                .arg(
                    Arg::new("momentum")
                        .long("momentum")
                        .value_parser(clap::value_parser!(f64))
                        .help("Momentum term. Overrides the config file."),
                )
                .arg(
                    Arg::new("epochs")
                        .short('e')
                        .long("epochs")
                        .value_parser(clap::value_parser!(usize))
                        .help("Number of training epochs. Overrides the config file."),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(clap::value_parser!(u64))
                        .help("RNG seed for a reproducible run. Overrides the config file."),
                )
                .arg(
                    Arg::new("standardize")
                        .long("standardize")
                        .action(ArgAction::SetTrue)
                        .help("Z-score attributes per feature, fit on the training set."),
                )
                .arg(
                    Arg::new("early_stopping")
                        .long("early-stopping")
                        .action(ArgAction::SetTrue)
                        .help("Stop once an epoch fails to improve training accuracy."),
                )
                .arg(
                    Arg::new("history_out")
                        .long("history-out")
                        .default_value("accuracy_history.csv")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Output path for the accuracy history CSV")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("confusion_out")
                        .long("confusion-out")
                        .default_value("confusion_matrix.csv")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Output path for the test-set confusion matrix CSV")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub)) => run_train(sub),
        _ => unreachable!("subcommand required"),
    }
}

fn resolve_config(matches: &ArgMatches) -> Result<TrainConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => TrainConfig::from_json_file(path)?,
        None => TrainConfig::default(),
    };
    if let Some(&width) = matches.get_one::<usize>("hidden_width") {
        config.hidden_width = width;
    }
    if let Some(&rate) = matches.get_one::<f64>("learning_rate") {
        config.learning_rate = rate;
    }
    if let Some(&momentum) = matches.get_one::<f64>("momentum") {
        config.momentum = momentum;
    }
    if let Some(&epochs) = matches.get_one::<usize>("epochs") {
        config.epoch_limit = epochs;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }
    if matches.get_flag("standardize") {
        config.standardize = true;
    }
    if matches.get_flag("early_stopping") {
        config.early_stopping = true;
    }
    Ok(config)
}

fn run_train(matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(matches)?;
    info!("training configuration: {:?}", config);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let train_path = matches.get_one::<PathBuf>("train_data").expect("required");
    let test_path = matches.get_one::<PathBuf>("test_data").expect("required");
    let mut training = load_letters(train_path)?;
    let mut test = load_letters(test_path)?;
    info!(
        "loaded {} training and {} test examples",
        training.len(),
        test.len()
    );

    if config.standardize {
        let scaler = fit_scaler(&training);
        transform_all(&mut training, &scaler);
        transform_all(&mut test, &scaler);
        info!("standardized attributes with training-set statistics");
    }

    let mut network = NeuralNetwork::new(config.hidden_width, &mut rng);
    let history = network.train(
        &training,
        &test,
        config.learning_rate,
        config.momentum,
        config.epoch_limit,
        config.early_stopping,
        &mut rng,
    )?;

    let history_out = matches.get_one::<PathBuf>("history_out").expect("defaulted");
    history.write_csv(history_out)?;
    info!("wrote accuracy history to {}", history_out.display());

    let confusion = ConfusionMatrix::from_pairs(
        test.iter()
            .map(|l| (l.known_value(), network.classify(l, &mut rng))),
    );
    let confusion_out = matches
        .get_one::<PathBuf>("confusion_out")
        .expect("defaulted");
    confusion.write_csv(confusion_out)?;
    info!("wrote confusion matrix to {}", confusion_out.display());

    if let Some(last) = history.last() {
        info!(
            "final accuracy: training {:.4}, test {:.4}",
            last.training_accuracy, last.test_accuracy
        );
    }

    Ok(())
}
