use std::fmt;
use std::path::PathBuf;

use crate::error::{ConvertError, FieldError};
use crate::vocabulary::ClassVocabulary;

// Image extensions the splitter picks up (compared lowercase)
pub const IMG_FORMATS: &[&str] = &["jpg", "jpeg", "png"];

// The Split enum naming the three dataset partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel-space rectangle as stored in a VOC `<bndbox>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

// A labeled region inside a VOC annotation; the box is only required for known classes
#[derive(Debug, Clone, PartialEq)]
pub struct VocObject {
    pub name: String,
    pub bndbox: Result<BoundingBox, FieldError>,
}

// The VocAnnotation struct representing one parsed XML file
#[derive(Debug, Clone, PartialEq)]
pub struct VocAnnotation {
    pub width: u32,
    pub height: u32,
    pub objects: Vec<VocObject>,
}

/// Normalized YOLO box: center and size as fractions of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YoloBox {
    pub class_id: usize,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl fmt::Display for YoloBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {:.6} {:.6} {:.6}",
            self.class_id, self.x_center, self.y_center, self.width, self.height
        )
    }
}

// Struct to hold the paths to the output directories for train/val/test splits
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub train_labels_dir: PathBuf,
    pub val_labels_dir: PathBuf,
    pub test_labels_dir: PathBuf,
    pub train_images_dir: PathBuf,
    pub val_images_dir: PathBuf,
    pub test_images_dir: PathBuf,
}

impl OutputDirs {
    pub fn images_dir(&self, split: Split) -> &PathBuf {
        match split {
            Split::Train => &self.train_images_dir,
            Split::Val => &self.val_images_dir,
            Split::Test => &self.test_images_dir,
        }
    }

    pub fn labels_dir(&self, split: Split) -> &PathBuf {
        match split {
            Split::Train => &self.train_labels_dir,
            Split::Val => &self.val_labels_dir,
            Split::Test => &self.test_labels_dir,
        }
    }
}

// Struct to hold the image file names assigned to each split
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitData {
    pub train_images: Vec<String>,
    pub val_images: Vec<String>,
    pub test_images: Vec<String>,
}

/// Per-split copy counts reported by the splitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitCounts {
    pub train_images: usize,
    pub val_images: usize,
    pub test_images: usize,
    pub train_labels: usize,
    pub val_labels: usize,
    pub test_labels: usize,
}

impl SplitCounts {
    pub fn print_summary(&self) {
        log::info!("Split complete:");
        log::info!(
            "  Train: {} images ({} labels)",
            self.train_images,
            self.train_labels
        );
        log::info!(
            "  Val: {} images ({} labels)",
            self.val_images,
            self.val_labels
        );
        log::info!(
            "  Test: {} images ({} labels)",
            self.test_images,
            self.test_labels
        );
    }
}

/// What converting a single XML file produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub regions_written: usize,
    pub unknown_classes: Vec<String>,
}

/// Outcome of one file in a batch conversion.
#[derive(Debug)]
pub enum FileOutcome {
    Converted {
        xml_path: PathBuf,
        report: ConversionReport,
    },
    /// Written, but some objects had classes outside the vocabulary
    ConvertedWithWarnings {
        xml_path: PathBuf,
        report: ConversionReport,
    },
    Failed {
        xml_path: PathBuf,
        error: ConvertError,
    },
}

impl FileOutcome {
    /// Classify a finished conversion by whether any class was unknown
    pub fn from_report(xml_path: PathBuf, report: ConversionReport) -> Self {
        if report.unknown_classes.is_empty() {
            FileOutcome::Converted { xml_path, report }
        } else {
            FileOutcome::ConvertedWithWarnings { xml_path, report }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }

    pub fn has_warnings(&self) -> bool {
        matches!(self, FileOutcome::ConvertedWithWarnings { .. })
    }
}

/// Outcome of one split directory in a batch conversion.
#[derive(Debug)]
pub enum SplitOutcome {
    Missing { split: Split },
    Processed { split: Split, files: Vec<FileOutcome> },
}

// Struct to hold the result of a full `convert_data` run
#[derive(Debug)]
pub struct ConversionSummary {
    pub vocabulary: ClassVocabulary,
    pub splits: Vec<SplitOutcome>,
}

impl ConversionSummary {
    fn files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.splits
            .iter()
            .filter_map(|outcome| match outcome {
                SplitOutcome::Missing { .. } => None,
                SplitOutcome::Processed { files, .. } => Some(files),
            })
            .flatten()
    }

    pub fn total_files(&self) -> usize {
        self.files().count()
    }

    pub fn converted(&self) -> usize {
        self.files().filter(|f| !f.is_failed()).count()
    }

    pub fn with_warnings(&self) -> usize {
        self.files().filter(|f| f.has_warnings()).count()
    }

    pub fn failed(&self) -> usize {
        self.files().filter(|f| f.is_failed()).count()
    }

    pub fn skipped_splits(&self) -> Vec<Split> {
        self.splits
            .iter()
            .filter_map(|outcome| match outcome {
                SplitOutcome::Missing { split } => Some(*split),
                SplitOutcome::Processed { .. } => None,
            })
            .collect()
    }

    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Total XML files: {}", self.total_files());
        log::info!("Converted: {}", self.converted());
        log::info!("Converted with unknown classes: {}", self.with_warnings());
        log::info!("Failed: {}", self.failed());
        if self.failed() > 0 {
            log::warn!("{} file(s) could not be converted", self.failed());
        }
        log::info!(
            "Conversion complete! Total classes: {}",
            self.vocabulary.len()
        );
    }
}
