use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use image::{GenericImageView, Rgb, RgbImage};
use walkdir::WalkDir;

use dataprep::{
    FailurePolicy, PartitionCounts, ResizeParams, Resolution, SplitParams, Subset,
    resize_directory, split_directory,
};

fn write_photo(path: &Path, width: u32, height: u32, tint: u8) {
    fs::create_dir_all(path.parent().unwrap()).expect("create parent dirs");
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([tint, (x % 256) as u8, (y % 256) as u8])
    })
    .save(path)
    .expect("write fixture image");
}

/// Relative path -> file bytes for every file below `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.expect("walk output"))
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn resize_then_split_produces_training_layout() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let raw = temp.path().join("raw");
    let resized = temp.path().join("resized");
    let split = temp.path().join("split_dataset");

    for i in 0..10 {
        write_photo(&raw.join("cat").join(format!("cat_{i}.jpg")), 40 + i, 30, 10);
    }
    for i in 0..3 {
        write_photo(&raw.join("dog").join(format!("dog_{i}.png")), 17, 50 + i, 200);
    }
    fs::write(raw.join("cat").join("broken.jpeg"), b"truncated").unwrap();
    fs::write(raw.join("dog").join("notes.txt"), b"not an image").unwrap();
    write_photo(&raw.join("dog").join("SHOUTY.JPG"), 8, 8, 0);

    let resize = ResizeParams {
        input_dir: raw.clone(),
        output_dir: resized.clone(),
        resolution: Resolution::new(32, 32),
        ..ResizeParams::default()
    };
    let report = resize_directory(&resize).unwrap();
    assert_eq!(report.processed, 13);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, raw.join("cat").join("broken.jpeg"));

    let outputs = snapshot(&resized);
    assert_eq!(outputs.len(), 13);
    for rel in outputs.keys() {
        assert!(raw.join(rel).is_file(), "{rel:?} has no source");
        let img = image::open(resized.join(rel)).unwrap();
        assert_eq!(img.dimensions(), (32, 32));
    }
    assert!(!resized.join("dog").join("SHOUTY.JPG").exists());
    assert!(!resized.join("dog").join("notes.txt").exists());

    let split_params = SplitParams {
        input_dir: resized.clone(),
        output_dir: split.clone(),
        seed: Some(2024),
        ..SplitParams::default()
    };
    let split_report = split_directory(&split_params).unwrap();
    assert_eq!(
        split_report.category("cat").unwrap().counts,
        PartitionCounts {
            train: 7,
            val: 2,
            test: 1
        }
    );
    assert_eq!(split_report.category("dog").unwrap().counts.total(), 3);
    assert_eq!(split_report.copied, 13);

    for category in ["cat", "dog"] {
        let mut seen = HashSet::new();
        for subset in Subset::ALL {
            let dir = split.join(subset.dir_name()).join(category);
            for entry in fs::read_dir(&dir).unwrap() {
                let name = entry.unwrap().file_name();
                let copy = dir.join(&name);
                let source = resized.join(category).join(&name);
                assert_eq!(fs::read(&copy).unwrap(), fs::read(&source).unwrap());
                assert!(seen.insert(name), "duplicate across subsets");
            }
        }
        let expected = fs::read_dir(resized.join(category)).unwrap().count();
        assert_eq!(seen.len(), expected);
    }
}

#[test]
fn resizing_twice_gives_identical_outputs() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let raw = temp.path().join("raw");
    write_photo(&raw.join("a").join("one.jpg"), 64, 48, 90);
    write_photo(&raw.join("a").join("b").join("two.png"), 31, 77, 5);

    let params = ResizeParams {
        input_dir: raw,
        output_dir: temp.path().join("out"),
        ..ResizeParams::default()
    };
    resize_directory(&params).unwrap();
    let first = snapshot(&params.output_dir);
    resize_directory(&params).unwrap();
    let second = snapshot(&params.output_dir);

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn missing_input_root_is_an_error_not_a_panic() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let resize = ResizeParams {
        input_dir: temp.path().join("nope"),
        output_dir: temp.path().join("out"),
        ..ResizeParams::default()
    };
    assert!(resize_directory(&resize).is_err());

    let split = SplitParams {
        input_dir: temp.path().join("nope"),
        output_dir: temp.path().join("split"),
        failure_policy: FailurePolicy::Isolate,
        ..SplitParams::default()
    };
    assert!(split_directory(&split).is_err());
}
