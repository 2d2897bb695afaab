use log::{error, info};
use std::path::Path;

use crate::conversion::convert_annotation;
use crate::io::list_xml_files;
use crate::types::{ConversionSummary, FileOutcome, Split, SplitOutcome};
use crate::utils::create_progress_bar;
use crate::vocabulary::ClassVocabulary;

/// Convert every XML file under `labels_root/{train,val,test}` to a sibling YOLO `.txt`.
///
/// Missing split folders are skipped and failing files are logged; neither
/// stops the run. The returned summary carries the vocabulary that was used.
pub fn convert_data(labels_root: &Path, vocabulary: ClassVocabulary) -> ConversionSummary {
    let splits = Split::ALL
        .iter()
        .map(|&split| convert_split(labels_root, split, &vocabulary))
        .collect();

    let summary = ConversionSummary { vocabulary, splits };
    summary.print_summary();
    summary
}

fn convert_split(labels_root: &Path, split: Split, vocabulary: &ClassVocabulary) -> SplitOutcome {
    let xml_dir = labels_root.join(split.as_str());
    if !xml_dir.is_dir() {
        info!("Skipping {} - directory not found", split);
        return SplitOutcome::Missing { split };
    }

    let xml_files = match list_xml_files(&xml_dir) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to list {}: {}", xml_dir.display(), e);
            return SplitOutcome::Processed {
                split,
                files: Vec::new(),
            };
        }
    };

    let pb = create_progress_bar(xml_files.len() as u64, &format!("Converting {}", split));
    let files = xml_files
        .into_iter()
        .fold(Vec::new(), |mut outcomes, xml_path| {
            let txt_path = xml_path.with_extension("txt");
            let outcome = match convert_annotation(&xml_path, &txt_path, vocabulary) {
                Ok(report) => FileOutcome::from_report(xml_path, report),
                Err(e) => {
                    error!("Error converting {}: {}", display_name(&xml_path), e);
                    FileOutcome::Failed { xml_path, error: e }
                }
            };
            outcomes.push(outcome);
            pb.inc(1);
            outcomes
        });
    pb.finish_with_message(format!("{} conversion complete", split));

    SplitOutcome::Processed { split, files }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
