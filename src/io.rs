use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::SplitError;
use crate::types::{OutputDirs, Split};
use crate::utils::{annotation_path_for, ensure_directory, is_image_file};
use crate::vocabulary::ClassVocabulary;

fn split_io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SplitError + '_ {
    move |source| SplitError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Set up images/{train,val,test} and labels/{train,val,test} under `root`
pub fn setup_output_directories(root: &Path) -> Result<OutputDirs, SplitError> {
    let labels_dir = root.join("labels");
    let images_dir = root.join("images");

    let make = |dir: PathBuf| ensure_directory(&dir).map_err(split_io_err(&dir));

    Ok(OutputDirs {
        train_images_dir: make(images_dir.join(Split::Train.as_str()))?,
        val_images_dir: make(images_dir.join(Split::Val.as_str()))?,
        test_images_dir: make(images_dir.join(Split::Test.as_str()))?,
        train_labels_dir: make(labels_dir.join(Split::Train.as_str()))?,
        val_labels_dir: make(labels_dir.join(Split::Val.as_str()))?,
        test_labels_dir: make(labels_dir.join(Split::Test.as_str()))?,
    })
}

/// Names of the image files directly inside `dir`, sorted
pub fn list_image_names(dir: &Path) -> Result<Vec<String>, SplitError> {
    if !dir.is_dir() {
        return Err(SplitError::MissingSource(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(split_io_err(dir))? {
        let entry = entry.map_err(split_io_err(dir))?;
        let path = entry.path();
        if !path.is_file() || !is_image_file(&path) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        } else {
            log::warn!("Skipping image with non UTF-8 name: {:?}", path);
        }
    }
    names.sort();
    Ok(names)
}

/// Paths of the `.xml` files directly inside `dir`, sorted.
///
/// The extension match is case-sensitive and works on raw file names, so
/// names that are not valid UTF-8 are still picked up.
pub fn list_xml_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_xml = path.extension() == Some(OsStr::new("xml"));
        if is_xml && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Copy an image into `images_dir` and its sibling XML, when present, into `labels_dir`.
///
/// Returns whether an annotation was copied.
pub fn copy_image_with_label(
    source_dir: &Path,
    image_name: &str,
    images_dir: &Path,
    labels_dir: &Path,
) -> Result<bool, SplitError> {
    let src_img = source_dir.join(image_name);
    copy_with_mtime(&src_img, &images_dir.join(image_name)).map_err(split_io_err(&src_img))?;

    let src_xml = annotation_path_for(&src_img);
    if !src_xml.exists() {
        return Ok(false);
    }
    if let Some(xml_name) = src_xml.file_name() {
        copy_with_mtime(&src_xml, &labels_dir.join(xml_name)).map_err(split_io_err(&src_xml))?;
        return Ok(true);
    }
    Ok(false)
}

/// Copy a file along with its permissions and, where possible, its modification time
pub fn copy_with_mtime(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::copy(src, dst)?;
    let modified = fs::metadata(src)?.modified()?;
    // A read-only copy cannot be reopened for writing; the content is already in place
    if let Err(e) = File::options()
        .write(true)
        .open(dst)
        .and_then(|file| file.set_modified(modified))
    {
        log::debug!("Could not keep modification time on {:?}: {}", dst, e);
    }
    Ok(())
}

/// Create the dataset.yaml file for YOLO training
pub fn create_dataset_yaml(
    yaml_path: &Path,
    data_root: &Path,
    vocabulary: &ClassVocabulary,
) -> std::io::Result<()> {
    if let Some(parent) = yaml_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }
    let mut dataset_yaml = BufWriter::new(File::create(yaml_path)?);
    let root = fs::canonicalize(data_root).unwrap_or_else(|_| data_root.to_path_buf());

    let mut yaml_content = format!(
        "path: {}\ntrain: images/train\nval: images/val\ntest: images/test\n",
        root.to_string_lossy()
    );
    yaml_content.push_str("\nnames:\n");
    for (id, label) in vocabulary.names().iter().enumerate() {
        yaml_content.push_str(&format!("    {}: {}\n", id, label));
    }
    dataset_yaml.write_all(yaml_content.as_bytes())?;
    dataset_yaml.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_output_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dirs = setup_output_directories(temp_dir.path()).unwrap();
        for split in Split::ALL {
            assert!(dirs.images_dir(split).is_dir());
            assert!(dirs.labels_dir(split).is_dir());
        }
        assert_eq!(dirs.val_images_dir, temp_dir.path().join("images/val"));
        assert_eq!(dirs.test_labels_dir, temp_dir.path().join("labels/test"));
    }

    #[test]
    fn test_list_image_names_filters_and_sorts() {
        let temp_dir = tempfile::tempdir().unwrap();
        for name in ["b.PNG", "a.jpg", "c.jpeg", "a.xml", "notes.txt"] {
            fs::write(temp_dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(temp_dir.path().join("nested.jpg")).unwrap();

        let names = list_image_names(temp_dir.path()).unwrap();
        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.jpeg"]);
    }

    #[test]
    fn test_list_image_names_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = list_image_names(&missing).unwrap_err();
        assert!(matches!(err, SplitError::MissingSource(p) if p == missing));
    }

    #[test]
    fn test_list_xml_files_is_case_sensitive() {
        let temp_dir = tempfile::tempdir().unwrap();
        for name in ["b.xml", "a.xml", "c.XML", "a.txt"] {
            fs::write(temp_dir.path().join(name), b"x").unwrap();
        }
        let files = list_xml_files(temp_dir.path()).unwrap();
        assert_eq!(
            files,
            vec![temp_dir.path().join("a.xml"), temp_dir.path().join("b.xml")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_list_xml_files_keeps_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let raw_name = OsStr::from_bytes(b"kb_\xff.xml");
        fs::write(temp_dir.path().join(raw_name), b"x").unwrap();
        fs::write(temp_dir.path().join("kb_ok.xml"), b"x").unwrap();

        let files = list_xml_files(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&temp_dir.path().join(raw_name)));
    }

    #[test]
    fn test_copy_image_with_label_keeps_mtime() {
        use std::time::{Duration, SystemTime};

        let temp_dir = tempfile::tempdir().unwrap();
        let src = temp_dir.path().join("raw");
        let images = temp_dir.path().join("images");
        let labels = temp_dir.path().join("labels");
        for dir in [&src, &images, &labels] {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(src.join("kb.jpg"), b"jpeg").unwrap();
        fs::write(src.join("kb.xml"), b"<annotation/>").unwrap();
        let past = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        for name in ["kb.jpg", "kb.xml"] {
            File::options()
                .write(true)
                .open(src.join(name))
                .unwrap()
                .set_modified(past)
                .unwrap();
        }

        let copied_label = copy_image_with_label(&src, "kb.jpg", &images, &labels).unwrap();

        assert!(copied_label);
        for copied in [images.join("kb.jpg"), labels.join("kb.xml")] {
            assert_eq!(fs::metadata(&copied).unwrap().modified().unwrap(), past);
        }
        assert_eq!(fs::read(images.join("kb.jpg")).unwrap(), b"jpeg");
    }

    #[test]
    fn test_copy_image_without_label() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("bg.png"), b"png").unwrap();
        let out = temp_dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let copied_label = copy_image_with_label(temp_dir.path(), "bg.png", &out, &out).unwrap();

        assert!(!copied_label);
        assert_eq!(file_count(&out), 1);
    }

    fn file_count(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_create_dataset_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let yaml_path = temp_dir.path().join("dataset.yaml");
        let vocab = ClassVocabulary::new(["cat", "dog"]).unwrap();

        create_dataset_yaml(&yaml_path, temp_dir.path(), &vocab).unwrap();

        let yaml_content = fs::read_to_string(yaml_path).unwrap();
        assert!(yaml_content.contains("path:"));
        assert!(yaml_content.contains("train: images/train"));
        assert!(yaml_content.contains("val: images/val"));
        assert!(yaml_content.contains("test: images/test"));
        assert!(yaml_content.contains("names:\n    0: cat\n    1: dog\n"));
    }
}
