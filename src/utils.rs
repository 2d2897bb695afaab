use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::IMG_FORMATS;

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
            label
        ))
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Create a directory (and parents) if it is missing, leaving existing content alone
pub fn ensure_directory(path: &Path) -> std::io::Result<PathBuf> {
    if !path.is_dir() {
        log::debug!("Creating directory {:?}", path);
        fs::create_dir_all(path)?;
    }
    Ok(path.to_path_buf())
}

/// Whether the file name carries one of the accepted image extensions, ignoring case
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            IMG_FORMATS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Sibling annotation path for an image: same stem, `.xml` extension
pub fn annotation_path_for(image_path: &Path) -> PathBuf {
    image_path.with_extension("xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a.jpg")));
        assert!(is_image_file(Path::new("a.JPEG")));
        assert!(is_image_file(Path::new("dir/b.Png")));
        assert!(!is_image_file(Path::new("a.xml")));
        assert!(!is_image_file(Path::new("a.bmp")));
        assert!(!is_image_file(Path::new("jpg")));
    }

    #[test]
    fn test_annotation_path_for() {
        assert_eq!(
            annotation_path_for(Path::new("raw/img_01.JPG")),
            PathBuf::from("raw/img_01.xml")
        );
        assert_eq!(
            annotation_path_for(Path::new("raw/frame.v2.png")),
            PathBuf::from("raw/frame.v2.xml")
        );
    }

    #[test]
    fn ensure_directory_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("images/train");
        ensure_directory(&dir).unwrap();
        fs::write(dir.join("keep.jpg"), b"x").unwrap();
        ensure_directory(&dir).unwrap();
        assert!(dir.join("keep.jpg").exists());
    }
}
