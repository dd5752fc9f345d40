use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Create `path` and any missing parents. A directory that already exists,
/// including one created concurrently by another worker, is not an error.
pub fn ensure_dir(path: &Path) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(source) => Err(Error::CreateDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Byte-for-byte copy; an existing destination is overwritten.
pub fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    fs::copy(from, to).map_err(|source| Error::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// `output_root` joined with `source`'s path relative to `input_root`.
pub fn mirrored_path(source: &Path, input_root: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative = source.strip_prefix(input_root).map_err(|_| {
        Error::Processing(format!(
            "{:?} is not inside input root {:?}",
            source, input_root
        ))
    })?;
    Ok(output_root.join(relative))
}

/// Where `inner` sits below `root`, spelled as `root` joined with the
/// remainder so it matches the paths a walk of `root` yields. Both paths are
/// canonicalized first, so `.`, `..` and symlinks do not hide the nesting.
/// `None` when `inner` is outside `root` or is `root` itself.
pub fn nested_subtree(root: &Path, inner: &Path) -> Result<Option<PathBuf>> {
    let canonical_root = fs::canonicalize(root)?;
    let canonical_inner = fs::canonicalize(inner)?;
    match canonical_inner.strip_prefix(&canonical_root) {
        Ok(rest) if !rest.as_os_str().is_empty() => Ok(Some(root.join(rest))),
        _ => Ok(None),
    }
}
