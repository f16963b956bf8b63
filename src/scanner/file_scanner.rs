use crate::scanner::path_utils::is_file;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files found under a root, plus the walk errors met on the way.
#[derive(Debug, Clone, Default)]
pub struct FileListing {
    pub files: Vec<PathBuf>,
    pub errors: Vec<String>,
}

impl FileListing {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Symlinks are listed as entries, never followed.
#[derive(Debug, Default)]
pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// List `root` itself when it is a file, otherwise every non-directory
    /// entry below it, sorted by name within each directory.
    ///
    /// Unreadable entries are recorded in `errors` and the walk keeps going.
    pub fn list_files<P: AsRef<Path>>(&self, root: P) -> FileListing {
        let root_path = root.as_ref();

        if is_file(root_path) {
            return FileListing {
                files: vec![root_path.to_path_buf()],
                errors: Vec::new(),
            };
        }

        let mut listing = FileListing::default();

        let walker = WalkDir::new(root_path).sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let message = if err
                        .io_error()
                        .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied)
                    {
                        format!("Permission denied: {}", err)
                    } else {
                        format!("Scan error: {}", err)
                    };
                    log::warn!("{}", message);
                    listing.errors.push(message);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                listing.files.push(entry.into_path());
            }
        }

        log::debug!(
            "Listed {} files under {} ({} walk errors)",
            listing.files.len(),
            root_path.display(),
            listing.errors.len()
        );

        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_single_file_listing() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("only.js");
        fs::write(&file, "x").unwrap();

        let listing = FileScanner::new().list_files(&file);
        assert_eq!(listing.files, vec![file]);
        assert!(listing.is_clean());
    }

    #[test]
    fn test_recursive_listing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("lib/nested")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();
        fs::write(root.join("a.js"), "a").unwrap();
        fs::write(root.join("lib/nested/c.js"), "c").unwrap();
        fs::write(root.join(".git/config"), "[core]").unwrap();

        let listing = FileScanner::new().list_files(root);

        assert!(listing.is_clean());
        assert_eq!(
            listing.files,
            vec![
                root.join(".git/config"),
                root.join("a.js"),
                root.join("b.txt"),
                root.join("lib/nested/c.js"),
            ]
        );
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let listing = FileScanner::new().list_files(temp_dir.path());

        assert!(listing.files.is_empty());
        assert!(listing.is_clean());
    }

    #[test]
    fn test_missing_root_is_recorded() {
        let temp_dir = TempDir::new().unwrap();
        let listing = FileScanner::new().list_files(temp_dir.path().join("gone"));

        assert!(listing.files.is_empty());
        assert_eq!(listing.errors.len(), 1);
    }
}
