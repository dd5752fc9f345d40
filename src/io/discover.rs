//! Input enumeration for both pipelines. Every listing is sorted so that a
//! seeded split is reproducible regardless of the order the OS returns
//! directory entries in.
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;

/// A directory under the split input root whose name labels its images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Directory name for logs and reports; non-UTF-8 bytes are replaced.
    pub name: String,
    /// The directory's own name, used verbatim for output paths.
    pub dir_name: OsString,
    pub path: PathBuf,
}

/// Result of a recursive walk. Entries below the root that could not be read
/// are collected in `unreadable` instead of ending the walk.
#[derive(Debug, Default)]
pub struct ImageListing {
    pub files: Vec<PathBuf>,
    pub unreadable: Vec<walkdir::Error>,
}

/// Case-sensitive suffix match of the file name against `extensions`
/// (`photo.JPG` does not match `.jpg`).
pub fn has_qualifying_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    extensions.iter().any(|ext| name.ends_with(ext.as_ref()))
}

/// All qualifying files below `root`, at any depth. Anything under `exclude`
/// is skipped, which keeps a nested output directory from being re-read.
/// `exclude` must be spelled relative to `root` the way the walk yields paths
/// (see [`crate::io::fsops::nested_subtree`]).
///
/// An unreadable root is an error; unreadable entries below it are returned
/// in [`ImageListing::unreadable`].
pub fn collect_images_recursive<S: AsRef<str>>(
    root: &Path,
    extensions: &[S],
    exclude: Option<&Path>,
) -> Result<ImageListing> {
    let mut listing = ImageListing::default();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| exclude.is_none_or(|ex| !entry.path().starts_with(ex)));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Could not read {:?}, skipping: {}", e.path(), e);
                listing.unreadable.push(e);
                continue;
            }
        };
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && has_qualifying_extension(entry.path(), extensions) {
            listing.files.push(entry.into_path());
        } else if is_file {
            debug!("Ignoring non-image file: {:?}", entry.path());
        }
    }

    Ok(listing)
}

/// Direct sub-directories of `root`; plain files at this level are ignored.
pub fn list_categories(root: &Path) -> Result<Vec<Category>> {
    let mut categories = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            let dir_name = entry.file_name();
            let name = dir_name.to_string_lossy().into_owned();
            categories.push(Category {
                name,
                dir_name,
                path,
            });
        } else {
            debug!("Skipping non-directory: {:?}", path);
        }
    }
    categories.sort_by(|a, b| a.dir_name.cmp(&b.dir_name));
    Ok(categories)
}

/// Qualifying files directly inside `dir`. Nested directories are not entered.
pub fn list_category_images<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_qualifying_extension(&path, extensions) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_EXTENSIONS;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, b"x").expect("write file");
    }

    #[test]
    fn extension_match_is_case_sensitive_suffix() {
        let exts = DEFAULT_EXTENSIONS;
        assert!(has_qualifying_extension(Path::new("a/b.jpg"), &exts));
        assert!(has_qualifying_extension(Path::new("b.jpeg"), &exts));
        assert!(has_qualifying_extension(Path::new("b.png"), &exts));
        assert!(!has_qualifying_extension(Path::new("b.JPG"), &exts));
        assert!(!has_qualifying_extension(Path::new("b.Png"), &exts));
        assert!(!has_qualifying_extension(Path::new("b.gif"), &exts));
        assert!(!has_qualifying_extension(Path::new("jpg"), &exts));
    }

    #[test]
    fn recursive_collection_descends_and_filters() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path();
        touch(&root.join("a.jpg"));
        touch(&root.join("x/y/z/deep.png"));
        touch(&root.join("x/notes.txt"));
        touch(&root.join("x/UPPER.JPG"));

        let listing = collect_images_recursive(root, &DEFAULT_EXTENSIONS, None).unwrap();
        assert_eq!(
            listing.files,
            vec![root.join("a.jpg"), root.join("x/y/z/deep.png")]
        );
        assert!(listing.unreadable.is_empty());
    }

    #[test]
    fn recursive_collection_skips_excluded_subtree() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path();
        touch(&root.join("keep.jpg"));
        touch(&root.join("out/already.jpg"));

        let listing =
            collect_images_recursive(root, &DEFAULT_EXTENSIONS, Some(&root.join("out"))).unwrap();
        assert_eq!(listing.files, vec![root.join("keep.jpg")]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = collect_images_recursive(&temp.path().join("absent"), &DEFAULT_EXTENSIONS, None)
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::Traverse(_)));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_reported_not_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path();
        touch(&root.join("a.jpg"));
        touch(&root.join("locked/hidden.jpg"));
        touch(&root.join("z/b.png"));
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // Permission bits do not stop root
        let readable = fs::read_dir(&locked).is_ok();

        let listing = collect_images_recursive(root, &DEFAULT_EXTENSIONS, None);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        let listing = listing.unwrap();
        assert_eq!(listing.files, vec![root.join("a.jpg"), root.join("z/b.png")]);
        assert_eq!(listing.unreadable.len(), 1);
        assert_eq!(listing.unreadable[0].path(), Some(locked.as_path()));
    }

    #[test]
    fn categories_are_directories_only() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path();
        fs::create_dir_all(root.join("dog")).unwrap();
        fs::create_dir_all(root.join("cat")).unwrap();
        touch(&root.join("README.jpg"));

        let names: Vec<_> = list_categories(root)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["cat", "dog"]);
    }

    #[cfg(unix)]
    #[test]
    fn category_keeps_raw_directory_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path();
        let a = OsStr::from_bytes(b"cat\xfe");
        let b = OsStr::from_bytes(b"cat\xff");
        fs::create_dir_all(root.join(b)).unwrap();
        fs::create_dir_all(root.join(a)).unwrap();

        let categories = list_categories(root).unwrap();
        let dir_names: Vec<_> = categories.iter().map(|c| c.dir_name.as_os_str()).collect();
        assert_eq!(dir_names, vec![a, b]);
        // Display names collide, directory names do not
        assert_eq!(categories[0].name, categories[1].name);
    }

    #[test]
    fn category_listing_is_not_recursive() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let dir = temp.path().join("cat");
        touch(&dir.join("b.png"));
        touch(&dir.join("a.jpg"));
        touch(&dir.join("nested/c.jpg"));
        touch(&dir.join("skip.bmp"));

        let files = list_category_images(&dir, &DEFAULT_EXTENSIONS).unwrap();
        assert_eq!(files, vec![dir.join("a.jpg"), dir.join("b.png")]);
    }
}
