use clap::Parser;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use voc2yolo::{split_train_validation, SplitArgs, SplitConfig};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = SplitArgs::parse();
    let config = SplitConfig::from(&args);

    let mut rng = match args.seed {
        Some(seed) => {
            info!("Shuffling with seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    if let Err(e) = split_train_validation(&config, &mut rng) {
        error!("Failed to split dataset: {}", e);
        std::process::exit(1);
    }
}
