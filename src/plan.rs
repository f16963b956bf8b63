use crate::config::Config;
use crate::convert::SourceEncoding;
use crate::error::{Result, UniEscapeError};
use crate::scanner::{
    absolutize, is_directory, is_file, ExtensionSet, FileFilter, FileListing, FileScanner,
};
use std::path::{Path, PathBuf};

/// Absolute locations a run works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// The path as given, made absolute. May be a single file.
    pub source_path: PathBuf,
    /// Directory relative paths are computed against.
    pub source_root: PathBuf,
    pub output_root: PathBuf,
}

impl ResolvedPaths {
    pub fn resolve(path: &Path, output_dir: Option<&Path>) -> Result<Self> {
        let source_path = absolutize(path)?;

        let source_root = if is_directory(&source_path) {
            source_path.clone()
        } else if is_file(&source_path) {
            source_path
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| UniEscapeError::SourceNotFound {
                    path: source_path.display().to_string(),
                })?
        } else {
            return Err(UniEscapeError::SourceNotFound {
                path: source_path.display().to_string(),
            });
        };

        let output_root = match output_dir {
            Some(dir) => absolutize(dir)?,
            None => source_root.clone(),
        };

        if is_file(&output_root) {
            return Err(UniEscapeError::InvalidOutput {
                path: output_root.display().to_string(),
            });
        }

        Ok(Self {
            source_path,
            source_root,
            output_root,
        })
    }
}

/// Everything decided before any file is read: where, how, and which files.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    pub paths: ResolvedPaths,
    pub encoding: SourceEncoding,
    pub extensions: ExtensionSet,
    pub files: Vec<PathBuf>,
    pub walk_errors: Vec<String>,
}

impl ConversionPlan {
    pub fn build(path: &Path, config: &Config) -> Result<Self> {
        let encoding = config.encoding()?;
        let extensions = config.extension_set()?;
        let paths = ResolvedPaths::resolve(path, config.output.directory.as_deref())?;

        log::info!(
            "source path: {}, encoding: {}, ext: {}, source dir: {}, output dir: {}",
            path.display(),
            encoding,
            extensions,
            paths.source_root.display(),
            paths.output_root.display()
        );

        let listing = FileScanner::new().list_files(&paths.source_path);
        Self::from_listing(paths, encoding, extensions, listing, config.output.strict)
    }

    /// Filter an existing listing. With `strict`, any walk error fails the plan.
    pub fn from_listing(
        paths: ResolvedPaths,
        encoding: SourceEncoding,
        extensions: ExtensionSet,
        listing: FileListing,
        strict: bool,
    ) -> Result<Self> {
        if strict && !listing.is_clean() {
            return Err(UniEscapeError::Walk {
                message: listing.errors.join("; "),
            });
        }

        let discovered = listing.files.len();
        let filter = FileFilter::new(&paths.source_root, &paths.output_root, extensions.clone());
        let files = filter.apply(listing.files)?;

        log::debug!("{} of {} discovered files selected", files.len(), discovered);

        Ok(Self {
            paths,
            encoding,
            extensions,
            files,
            walk_errors: listing.errors,
        })
    }
}
