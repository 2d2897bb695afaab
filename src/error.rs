use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning one VOC XML file into a YOLO label file.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },
}

/// A required VOC element that is absent or does not hold a number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("missing required element <{0}>")]
    MissingElement(&'static str),

    #[error("invalid number in <{field}>: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Errors that abort a dataset split.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("source directory not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("class vocabulary is empty")]
    Empty,

    #[error("duplicate class name in vocabulary: {0:?}")]
    Duplicate(String),
}
