use log::warn;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ConvertError;
use crate::types::{BoundingBox, ConversionReport, VocAnnotation, YoloBox};
use crate::vocabulary::ClassVocabulary;
use crate::voc::read_voc_file;

/// Convert a pixel-space VOC box into normalized (x_center, y_center, width, height)
pub fn convert_box(image_size: (u32, u32), bndbox: &BoundingBox) -> (f64, f64, f64, f64) {
    let dw = 1.0 / image_size.0 as f64;
    let dh = 1.0 / image_size.1 as f64;
    let x = (bndbox.xmin + bndbox.xmax) / 2.0;
    let y = (bndbox.ymin + bndbox.ymax) / 2.0;
    let w = bndbox.xmax - bndbox.xmin;
    let h = bndbox.ymax - bndbox.ymin;
    (x * dw, y * dh, w * dw, h * dh)
}

/// Map every known object of an annotation to a YOLO box.
///
/// Returns the boxes in document order together with the names that were not
/// in the vocabulary. The box of an unknown object is never read; a broken box
/// on a known object is an error.
pub fn to_yolo_boxes(
    annotation: &VocAnnotation,
    vocabulary: &ClassVocabulary,
) -> Result<(Vec<YoloBox>, Vec<String>), ConvertError> {
    let mut boxes = Vec::with_capacity(annotation.objects.len());
    let mut unknown = Vec::new();

    for object in &annotation.objects {
        let class_id = match vocabulary.class_id(&object.name) {
            Some(class_id) => class_id,
            None => {
                unknown.push(object.name.clone());
                continue;
            }
        };

        let bndbox = object.bndbox.clone()?;
        let (x_center, y_center, width, height) =
            convert_box((annotation.width, annotation.height), &bndbox);
        boxes.push(YoloBox {
            class_id,
            x_center,
            y_center,
            width,
            height,
        });
    }

    Ok((boxes, unknown))
}

/// Render YOLO boxes as label file content: one line per box, no trailing newline
pub fn format_yolo_lines(boxes: &[YoloBox]) -> String {
    boxes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert one VOC XML file into a YOLO label file.
///
/// Objects whose class is not in `vocabulary` are logged and dropped; the label
/// file is still written with the remaining boxes, and is empty when none remain.
pub fn convert_annotation(
    xml_path: &Path,
    txt_path: &Path,
    vocabulary: &ClassVocabulary,
) -> Result<ConversionReport, ConvertError> {
    let annotation = read_voc_file(xml_path)?;
    let (boxes, unknown_classes) = to_yolo_boxes(&annotation, vocabulary)?;

    for class_name in &unknown_classes {
        warn!(
            "Unknown class '{}' in {}",
            class_name,
            xml_path.display()
        );
    }

    let io_err = |source| ConvertError::Io {
        path: txt_path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(txt_path).map_err(io_err)?);
    writer
        .write_all(format_yolo_lines(&boxes).as_bytes())
        .map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(ConversionReport {
        regions_written: boxes.len(),
        unknown_classes,
    })
}
