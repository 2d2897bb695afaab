//! Pascal VOC to YOLO dataset preparation
//!
//! This library converts Pascal VOC XML annotations to YOLO label files and
//! splits a raw image pool into train/val/test folders for object-detection
//! training.

pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;
pub mod vocabulary;
pub mod voc;
pub mod yolo_dataset;

// Re-export commonly used types and functions
pub use config::{ConvertArgs, SplitArgs, SplitConfig};
pub use conversion::{convert_annotation, convert_box};
pub use dataset::{partition, split_train_validation};
pub use error::{ConvertError, FieldError, SplitError, VocabularyError};
pub use io::create_dataset_yaml;
pub use types::{
    BoundingBox, ConversionReport, ConversionSummary, FileOutcome, Split, SplitCounts,
    SplitOutcome, VocAnnotation, VocObject, YoloBox,
};
pub use vocabulary::{ClassVocabulary, KEYBOARD_CLASSES};
pub use yolo_dataset::convert_data;
