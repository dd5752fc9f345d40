//! High-level, ergonomic library API: the resize and split pipelines over
//! whole directories, plus single-file and single-category helpers. Prefer
//! these entrypoints over the low-level `core` and `io` modules.
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::params::{ResizeParams, SplitParams};
use crate::core::processing::partition::{PartitionCounts, SplitAssignment, SplitRatios};
use crate::error::{Error, Result};
use crate::io::codec::{ImageCodec, StandardCodec};
use crate::io::discover::{
    Category, collect_images_recursive, list_categories, list_category_images,
};
use crate::io::fsops::{copy_file, ensure_dir, mirrored_path, nested_subtree};
use crate::types::{FailurePolicy, Subset};

/// A file that was skipped or failed, with the reason that was logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl FileFailure {
    fn new(path: &Path, err: &Error) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

/// Outcome of a resize run. `skipped` counts files that could not be decoded,
/// `errors` counts files that decoded but could not be written.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub failures: Vec<FileFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub name: String,
    pub total: usize,
    pub counts: PartitionCounts,
    pub copied: usize,
    pub errors: usize,
    pub failures: Vec<FileFailure>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SplitReport {
    pub categories: Vec<CategoryReport>,
    pub copied: usize,
    pub errors: usize,
}

impl SplitReport {
    pub fn category(&self, name: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Decode `input`, resize it to `params.resolution` and write it to `output`,
/// creating the output's parent directory when needed.
pub fn resize_file(
    input: &Path,
    output: &Path,
    params: &ResizeParams,
    codec: &dyn ImageCodec,
) -> Result<()> {
    let grid = codec.decode(input)?;
    let resized = codec.resize(&grid, params.resolution)?;
    if let Some(parent) = output.parent() {
        ensure_dir(parent)?;
    }
    codec.encode(&resized, output)
}

/// Resize every qualifying image under `params.input_dir` into the mirrored
/// location under `params.output_dir`, using the standard codec.
pub fn resize_directory(params: &ResizeParams) -> Result<BatchReport> {
    resize_directory_with_codec(params, &StandardCodec::from_params(params))
}

pub fn resize_directory_with_codec(
    params: &ResizeParams,
    codec: &dyn ImageCodec,
) -> Result<BatchReport> {
    params.validate()?;
    ensure_dir(&params.output_dir)?;

    // An output root nested in the input root must not feed back into the walk
    let exclude = nested_subtree(&params.input_dir, &params.output_dir)?;

    let listing =
        collect_images_recursive(&params.input_dir, &params.extensions, exclude.as_deref())?;
    info!(
        "Resizing {} images from {:?} to {:?} at {}",
        listing.files.len(),
        params.input_dir,
        params.output_dir,
        params.resolution
    );

    let mut report = BatchReport::default();

    for walk_err in listing.unreadable {
        let path = walk_err
            .path()
            .map_or_else(|| params.input_dir.clone(), Path::to_path_buf);
        let e = Error::from(walk_err);
        report.errors += 1;
        if params.failure_policy == FailurePolicy::FailFast {
            return Err(e);
        }
        report.failures.push(FileFailure::new(&path, &e));
    }

    for path in listing.files {
        let output_path = mirrored_path(&path, &params.input_dir, &params.output_dir)?;
        debug!("Processing: {:?} -> {:?}", path, output_path);

        match resize_file(&path, &output_path, params, codec) {
            Ok(()) => report.processed += 1,
            Err(e) => {
                if matches!(e, Error::Decode { .. }) {
                    warn!("Could not read {:?}, skipping: {}", path, e);
                    report.skipped += 1;
                } else {
                    warn!("Error processing {:?}: {}", path, e);
                    report.errors += 1;
                }
                if params.failure_policy == FailurePolicy::FailFast {
                    return Err(e);
                }
                report.failures.push(FileFailure::new(&path, &e));
            }
        }
    }

    info!(
        "All images resized into {:?}: processed={} skipped={} errors={}",
        params.output_dir, report.processed, report.skipped, report.errors
    );
    Ok(report)
}

/// Shuffle `files` once and cut the result into train/val/test runs sized by
/// `ratios`.
pub fn plan_split<T, R: Rng + ?Sized>(
    mut files: Vec<T>,
    ratios: &SplitRatios,
    rng: &mut R,
) -> Result<SplitAssignment<T>> {
    files.shuffle(rng);
    let counts = PartitionCounts::compute(files.len(), ratios);
    SplitAssignment::assign(files, counts)
}

/// Partition one category and copy its files to `{output}/{subset}/{category}/`.
pub fn split_category<R: Rng + ?Sized>(
    category: &Category,
    params: &SplitParams,
    rng: &mut R,
) -> Result<CategoryReport> {
    let files = list_category_images(&category.path, &params.extensions)?;
    let total = files.len();
    let assignment = plan_split(files, &params.ratios, rng)?;
    let counts = assignment.counts();

    info!(
        "Category '{}': {} images -> train={} val={} test={}",
        category.name, total, counts.train, counts.val, counts.test
    );

    let mut report = CategoryReport {
        name: category.name.clone(),
        total,
        counts,
        copied: 0,
        errors: 0,
        failures: Vec::new(),
    };

    for subset in Subset::ALL {
        let files = assignment.subset(subset);
        let subset_dir = params
            .output_dir
            .join(subset.dir_name())
            .join(&category.dir_name);
        debug!("Copying {} files into {:?}", counts.get(subset), subset_dir);

        if let Err(e) = ensure_dir(&subset_dir) {
            warn!("Error creating {:?}: {}", subset_dir, e);
            if params.failure_policy == FailurePolicy::FailFast {
                return Err(e);
            }
            // Every file bound for this directory fails with it
            if files.is_empty() {
                report.failures.push(FileFailure::new(&subset_dir, &e));
            } else {
                report
                    .failures
                    .extend(files.iter().map(|src| FileFailure::new(src, &e)));
            }
            report.errors += files.len().max(1);
            continue;
        }

        for src in files {
            let copied = src
                .file_name()
                .ok_or_else(|| Error::Processing(format!("{:?} has no file name", src)))
                .and_then(|name| copy_file(src, &subset_dir.join(name)));

            match copied {
                Ok(_) => report.copied += 1,
                Err(e) => {
                    warn!("Error copying {:?} into {}: {}", src, subset, e);
                    report.errors += 1;
                    if params.failure_policy == FailurePolicy::FailFast {
                        return Err(e);
                    }
                    report.failures.push(FileFailure::new(src, &e));
                }
            }
        }
    }

    Ok(report)
}

/// Split every category under `params.input_dir`. Uses `params.seed` when set,
/// otherwise a freshly seeded generator, so membership differs between runs.
pub fn split_directory(params: &SplitParams) -> Result<SplitReport> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    split_directory_with_rng(params, &mut rng)
}

pub fn split_directory_with_rng<R: Rng + ?Sized>(
    params: &SplitParams,
    rng: &mut R,
) -> Result<SplitReport> {
    params.validate()?;
    for subset in Subset::ALL {
        let subset_root = params.output_dir.join(subset.dir_name());
        if let Err(e) = ensure_dir(&subset_root) {
            if params.failure_policy == FailurePolicy::FailFast {
                return Err(e);
            }
            warn!("Error creating {:?}: {}", subset_root, e);
        }
    }

    let categories = list_categories(&params.input_dir)?;
    info!(
        "Splitting {} categories from {:?} into {:?}",
        categories.len(),
        params.input_dir,
        params.output_dir
    );

    let mut report = SplitReport::default();
    for category in &categories {
        let category_report = split_category(category, params, rng)?;
        report.copied += category_report.copied;
        report.errors += category_report.errors;
        report.categories.push(category_report);
    }

    info!(
        "Dataset split into train, val and test under {:?}: copied={} errors={}",
        params.output_dir, report.copied, report.errors
    );
    Ok(report)
}
