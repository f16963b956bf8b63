pub mod file_filter;
pub mod file_scanner;
pub mod path_utils;

pub use file_filter::{ExtensionSet, FileFilter};
pub use file_scanner::{FileListing, FileScanner};
pub use path_utils::{absolutize, is_directory, is_file, relative_path};
