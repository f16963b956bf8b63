use crate::error::{Result, UniEscapeError};
use crate::scanner::path_utils::relative_path;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Non-empty set of file-name suffixes, stored without the leading dot.
///
/// A token may itself contain dots (`min.js`), since matching is a plain
/// suffix test on the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl ExtensionSet {
    pub fn new(extensions: Vec<String>) -> Result<Self> {
        if extensions.is_empty() || extensions.iter().any(|e| e.is_empty()) {
            return Err(UniEscapeError::InvalidExtensions {
                raw: extensions.join(","),
            });
        }

        Ok(Self { extensions })
    }

    /// Parse a comma-separated list such as `js,ts,min.js`.
    pub fn parse(raw: &str) -> Result<Self> {
        let extensions: Vec<String> = raw.split(',').map(|s| s.to_string()).collect();

        Self::new(extensions).map_err(|_| UniEscapeError::InvalidExtensions {
            raw: raw.to_string(),
        })
    }

    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.extensions.iter().any(|ext| {
            let suffix = format!(".{}", ext);
            path_str.ends_with(&suffix) && path_str.len() > suffix.len()
        })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.extensions
    }

    pub fn into_vec(self) -> Vec<String> {
        self.extensions
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extensions.join(","))
    }
}

/// Narrows a candidate list down to the files that should be converted.
pub struct FileFilter {
    source_root: PathBuf,
    output_root: PathBuf,
    extensions: ExtensionSet,
}

impl FileFilter {
    pub fn new(source_root: &Path, output_root: &Path, extensions: ExtensionSet) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            output_root: output_root.to_path_buf(),
            extensions,
        }
    }

    /// Ignore rules followed by extension rules, order preserved.
    pub fn apply(&self, files: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        let remaining = self.exclude_ignored(files)?;
        Ok(self.filter_by_extension(remaining))
    }

    /// Drop dotfiles and previously written output.
    ///
    /// Fails on the first file that is not under the source root.
    pub fn exclude_ignored(&self, files: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        let mut result = Vec::with_capacity(files.len());

        for file in files {
            if self.is_ignored(&file)? {
                log::trace!("Ignoring {}", file.display());
                continue;
            }
            result.push(file);
        }

        Ok(result)
    }

    pub fn filter_by_extension(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        files
            .into_iter()
            .filter(|file| self.extensions.matches(file))
            .collect()
    }

    pub fn is_ignored(&self, path: &Path) -> Result<bool> {
        let relative = relative_path(path, &self.source_root)?;

        // Only the leading segment is checked; `lib/.cache/x.js` is kept.
        let hidden = match relative.components().next() {
            Some(Component::Normal(first)) => first.to_string_lossy().starts_with('.'),
            _ => false,
        };
        if hidden {
            return Ok(true);
        }

        Ok(self.output_nested_in_source() && path.starts_with(&self.output_root))
    }

    fn output_nested_in_source(&self) -> bool {
        self.output_root != self.source_root && self.output_root.starts_with(&self.source_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(raw: &str) -> ExtensionSet {
        ExtensionSet::parse(raw).unwrap()
    }

    #[test]
    fn test_extension_parsing() {
        assert_eq!(exts("js,ts,css,coffee").as_slice(), ["js", "ts", "css", "coffee"]);
        assert_eq!(exts("min.js").to_string(), "min.js");

        for invalid in ["", ",", "js,", ",js", "js,,ts"] {
            assert!(
                matches!(
                    ExtensionSet::parse(invalid),
                    Err(UniEscapeError::InvalidExtensions { .. })
                ),
                "Should reject: {:?}",
                invalid
            );
        }
        assert!(ExtensionSet::new(Vec::new()).is_err());
    }

    #[test]
    fn test_extension_matching() {
        let set = exts("js");
        assert!(set.matches(Path::new("/src/app.js")));
        assert!(set.matches(Path::new("/src/app.min.js")));
        assert!(!set.matches(Path::new("/src/app.ts")));
        assert!(!set.matches(Path::new("/src/appjs")));
        assert!(!set.matches(Path::new(".js")));
        assert!(!set.matches(Path::new("/src/app.JS")));
    }

    #[test]
    fn test_multi_part_extension() {
        let set = exts("min.js");
        assert!(set.matches(Path::new("/src/app.min.js")));
        assert!(!set.matches(Path::new("/src/app.js")));
        assert!(!set.matches(Path::new(".min.js")));
    }

    #[test]
    fn test_ignore_leading_dot_segment() {
        let filter = FileFilter::new(Path::new("/src"), Path::new("/out"), exts("js"));

        assert!(filter.is_ignored(Path::new("/src/.git/config")).unwrap());
        assert!(filter.is_ignored(Path::new("/src/.hidden.js")).unwrap());
        assert!(!filter.is_ignored(Path::new("/src/a.js")).unwrap());
        // Nested dot directories are not part of the rule.
        assert!(!filter.is_ignored(Path::new("/src/lib/.cache/x.js")).unwrap());
    }

    #[test]
    fn test_ignore_nested_output_root() {
        let filter = FileFilter::new(Path::new("/src"), Path::new("/src/out"), exts("js"));

        assert!(filter.is_ignored(Path::new("/src/out/a.js")).unwrap());
        assert!(!filter.is_ignored(Path::new("/src/outside.js")).unwrap());
        assert!(!filter.is_ignored(Path::new("/src/lib/a.js")).unwrap());
    }

    #[test]
    fn test_in_place_output_keeps_everything() {
        let filter = FileFilter::new(Path::new("/src"), Path::new("/src"), exts("js"));
        assert!(!filter.is_ignored(Path::new("/src/a.js")).unwrap());
    }

    #[test]
    fn test_unrelated_file_fails_filter() {
        let filter = FileFilter::new(Path::new("/src"), Path::new("/out"), exts("js"));
        let files = vec![PathBuf::from("/src/a.js"), PathBuf::from("/elsewhere/b.js")];

        assert!(matches!(
            filter.exclude_ignored(files),
            Err(UniEscapeError::UnrelatedPath { .. })
        ));
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = FileFilter::new(Path::new("/src"), Path::new("/src/out"), exts("js,css"));
        let files = vec![
            PathBuf::from("/src/z.js"),
            PathBuf::from("/src/.git/config"),
            PathBuf::from("/src/b.txt"),
            PathBuf::from("/src/out/z.js"),
            PathBuf::from("/src/a/style.css"),
            PathBuf::from("/src/a.js"),
        ];

        assert_eq!(
            filter.apply(files).unwrap(),
            vec![
                PathBuf::from("/src/z.js"),
                PathBuf::from("/src/a/style.css"),
                PathBuf::from("/src/a.js"),
            ]
        );
    }
}
