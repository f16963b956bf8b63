pub mod decoder;
pub mod escaper;

pub use decoder::{decode_file, read_file_as_encoding, SourceEncoding};
pub use escaper::{escape_char, escape_str};

use crate::error::Result;
use std::path::Path;

/// Decode a file and escape its text in one step.
pub fn convert_file(path: &Path, encoding: SourceEncoding) -> Result<String> {
    let content = decode_file(path, encoding)?;
    Ok(escape_str(&content))
}
