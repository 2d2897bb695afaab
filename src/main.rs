use clap::Parser;

use log::{error, info};

use voc2yolo::{convert_data, create_dataset_yaml, ClassVocabulary, ConvertArgs};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = ConvertArgs::parse();

    let vocabulary = match ClassVocabulary::from_label_list(&args.label_list) {
        Ok(vocabulary) => vocabulary,
        Err(e) => {
            error!("Invalid label list: {}", e);
            std::process::exit(2);
        }
    };

    info!(
        "Converting VOC annotations under {}...",
        args.labels_dir.display()
    );
    let summary = convert_data(&args.labels_dir, vocabulary);

    if let Some(yaml_path) = &args.dataset_yaml {
        info!("Creating {}...", yaml_path.display());
        if let Err(e) = create_dataset_yaml(yaml_path, &args.data_root, &summary.vocabulary) {
            error!("Failed to create dataset.yaml: {}", e);
        }
    }
}
