use crate::error::{Result, UniEscapeError};
use encoding_rs::{Encoding, GBK, UTF_8};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Character sets source files may be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEncoding {
    Utf8,
    Gbk,
}

impl SourceEncoding {
    /// Accepts `utf8`, `utf-8` and `gbk` in any letter case.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(SourceEncoding::Utf8),
            "gbk" => Ok(SourceEncoding::Gbk),
            _ => Err(UniEscapeError::UnsupportedEncoding {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf8",
            SourceEncoding::Gbk => "gbk",
        }
    }

    fn encoding(&self) -> &'static Encoding {
        match self {
            SourceEncoding::Utf8 => UTF_8,
            SourceEncoding::Gbk => GBK,
        }
    }

    /// Strict decode: malformed input yields `None` rather than U+FFFD.
    /// A byte-order mark is kept as U+FEFF.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        self.encoding()
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read the whole file and decode it.
pub fn decode_file(path: &Path, encoding: SourceEncoding) -> Result<String> {
    let bytes = fs::read(path)?;

    encoding.decode(&bytes).ok_or_else(|| UniEscapeError::Decode {
        path: path.display().to_string(),
        encoding: encoding.name().to_string(),
    })
}

/// Like [`decode_file`], with the encoding given by name.
pub fn read_file_as_encoding(path: &Path, encoding_name: &str) -> Result<String> {
    let encoding = SourceEncoding::from_name(encoding_name)?;
    decode_file(path, encoding)
}
