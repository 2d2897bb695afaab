use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;

use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::io::{copy_image_with_label, list_image_names, setup_output_directories};
use crate::types::{OutputDirs, Split, SplitCounts, SplitData};
use crate::utils::create_progress_bar;

/// Number of items kept for training out of `len`, rounded down
pub fn train_count(len: usize, train_ratio: f64) -> usize {
    ((train_ratio * len as f64).floor() as usize).min(len)
}

/// Shuffle `items` and split them into (train, val) at `train_ratio`
pub fn partition<T, R: Rng + ?Sized>(
    mut items: Vec<T>,
    train_ratio: f64,
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    items.shuffle(rng);
    let split_point = train_count(items.len(), train_ratio);
    let val = items.split_off(split_point);
    (items, val)
}

/// Split the raw training pool into train/val and copy everything into the output layout.
///
/// Both source directories are checked before anything is copied. Any copy
/// failure aborts the run.
pub fn split_train_validation<R: Rng + ?Sized>(
    config: &SplitConfig,
    rng: &mut R,
) -> Result<SplitCounts, SplitError> {
    for source in [&config.raw_train, &config.raw_test] {
        if !source.is_dir() {
            return Err(SplitError::MissingSource(source.clone()));
        }
    }

    let output_dirs = setup_output_directories(&config.output_root)?;

    let train_pool = list_image_names(&config.raw_train)?;
    info!(
        "Found {} training images in {}",
        train_pool.len(),
        config.raw_train.display()
    );
    let (train_images, val_images) = partition(train_pool, config.train_ratio, rng);
    let split_data = SplitData {
        train_images,
        val_images,
        test_images: list_image_names(&config.raw_test)?,
    };

    let train_labels = copy_split(
        &config.raw_train,
        &split_data.train_images,
        Split::Train,
        &output_dirs,
    )?;
    let val_labels = copy_split(
        &config.raw_train,
        &split_data.val_images,
        Split::Val,
        &output_dirs,
    )?;
    let test_labels = copy_split(
        &config.raw_test,
        &split_data.test_images,
        Split::Test,
        &output_dirs,
    )?;

    let counts = SplitCounts {
        train_labels,
        val_labels,
        test_labels,
        train_images: split_data.train_images.len(),
        val_images: split_data.val_images.len(),
        test_images: split_data.test_images.len(),
    };
    counts.print_summary();
    Ok(counts)
}

// Copies one split and returns how many label files came along
fn copy_split(
    source_dir: &Path,
    image_names: &[String],
    split: Split,
    output_dirs: &OutputDirs,
) -> Result<usize, SplitError> {
    let label = match split {
        Split::Train => "Train",
        Split::Val => "Val",
        Split::Test => "Test",
    };
    let pb = create_progress_bar(image_names.len() as u64, label);

    let mut labels_copied = 0;
    for image_name in image_names {
        if copy_image_with_label(
            source_dir,
            image_name,
            output_dirs.images_dir(split),
            output_dirs.labels_dir(split),
        )? {
            labels_copied += 1;
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("{} copy complete", label));

    Ok(labels_copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_train_count_rounds_down() {
        assert_eq!(train_count(0, 0.85), 0);
        assert_eq!(train_count(1, 0.85), 0);
        assert_eq!(train_count(7, 0.85), 5);
        assert_eq!(train_count(20, 0.85), 17);
        assert_eq!(train_count(100, 0.85), 85);
        assert_eq!(train_count(10, 1.0), 10);
        assert_eq!(train_count(10, 0.0), 0);
    }

    #[test]
    fn test_partition_sizes_and_coverage() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 0..60usize {
            let items: Vec<usize> = (0..n).collect();
            let (train, val) = partition(items, 0.85, &mut rng);

            let expected_train = (0.85 * n as f64).floor() as usize;
            assert_eq!(train.len(), expected_train);
            assert_eq!(val.len(), n - expected_train);

            let union: HashSet<usize> = train.iter().chain(val.iter()).copied().collect();
            assert_eq!(union.len(), n);
            assert!(union.iter().all(|&i| i < n));
        }
    }

    #[test]
    fn test_partition_is_reproducible_with_seed() {
        let items: Vec<u32> = (0..50).collect();
        let a = partition(items.clone(), 0.85, &mut StdRng::seed_from_u64(7));
        let b = partition(items, 0.85, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
