use crate::error::{Result, UniEscapeError};
use std::path::{Component, Path, PathBuf};

/// True when `path` exists and is a directory. Stat failures count as "no".
pub fn is_directory(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// True when `path` exists and is anything other than a directory.
pub fn is_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| !m.is_dir()).unwrap_or(false)
}

/// Path of `path` relative to `base`.
///
/// Containment is checked component by component, so `/foo` is not a base of
/// `/foobar/x`. The base itself has no relative path and is rejected too.
pub fn relative_path(path: &Path, base: &Path) -> Result<PathBuf> {
    match path.strip_prefix(base) {
        Ok(rest) if rest.components().next().is_some() => Ok(rest.to_path_buf()),
        _ => Err(UniEscapeError::UnrelatedPath {
            path: path.display().to_string(),
            base: base.display().to_string(),
        }),
    }
}

/// Make `path` absolute against the working directory and fold `.`/`..`
/// lexically. Symlinks are left alone.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }

    Ok(cleaned)
}
