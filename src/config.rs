use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line arguments for converting Pascal VOC XML labels to YOLO format.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct ConvertArgs {
    /// Directory holding the train/val/test label folders
    #[arg(long = "labels_dir", default_value = "data/labels")]
    pub labels_dir: PathBuf,

    /// Write an Ultralytics dataset description to this file after conversion
    #[arg(long = "dataset_yaml")]
    pub dataset_yaml: Option<PathBuf>,

    /// Dataset root recorded as `path:` in the dataset description
    #[arg(long = "data_root", default_value = "data")]
    pub data_root: PathBuf,

    /// Ordered list of class names; defaults to the keyboard classes
    #[arg(value_delimiter = ',')]
    pub label_list: Vec<String>,
}

/// Command-line arguments for splitting raw images into train/val/test folders.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct SplitArgs {
    /// Raw training pool, split into train and val
    #[arg(long = "train_dir", default_value = "data/raw/dataset_final/train")]
    pub train_dir: PathBuf,

    /// Raw test pool, copied unsplit
    #[arg(long = "test_dir", default_value = "data/raw/dataset_final/test")]
    pub test_dir: PathBuf,

    /// Root receiving images/{train,val,test} and labels/{train,val,test}
    #[arg(long = "output_dir", default_value = "data")]
    pub output_dir: PathBuf,

    /// Proportion of the training pool kept for training
    #[arg(long = "train_size", default_value_t = 0.85, value_parser = validate_size)]
    pub train_size: f64,

    /// Seed for random shuffling; a fresh split is drawn when omitted
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

impl From<&SplitArgs> for SplitConfig {
    fn from(args: &SplitArgs) -> Self {
        SplitConfig {
            raw_train: args.train_dir.clone(),
            raw_test: args.test_dir.clone(),
            output_root: args.output_dir.clone(),
            train_ratio: args.train_size,
        }
    }
}

/// Where the splitter reads from and writes to.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitConfig {
    pub raw_train: PathBuf,
    pub raw_test: PathBuf,
    pub output_root: PathBuf,
    pub train_ratio: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            raw_train: PathBuf::from("data/raw/dataset_final/train"),
            raw_test: PathBuf::from("data/raw/dataset_final/test"),
            output_root: PathBuf::from("data"),
            train_ratio: 0.85,
        }
    }
}

// Validate that the size is between 0.0 and 1.0
pub(crate) fn validate_size(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("SIZE must be between 0.0 and 1.0".to_string()),
    }
}
