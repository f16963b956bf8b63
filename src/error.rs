use thiserror::Error;

#[derive(Error, Debug)]
pub enum UniEscapeError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid extension list: {raw:?}")]
    InvalidExtensions { raw: String },

    #[error("Unsupported encoding: {name}")]
    UnsupportedEncoding { name: String },

    #[error("Failed to decode {path} as {encoding}")]
    Decode { path: String, encoding: String },

    #[error("Can't get relative path of {path} in {base}")]
    UnrelatedPath { path: String, base: String },

    #[error("Source path not found: {path}")]
    SourceNotFound { path: String },

    #[error("Output location must be a directory: {path}")]
    InvalidOutput { path: String },

    #[error("Directory walk failed: {message}")]
    Walk { message: String },

    #[error("Source files and contents count not match ({files} files, {contents} contents)")]
    LengthMismatch { files: usize, contents: usize },
}

impl UniEscapeError {
    /// Process exit status used when a run fails in strict mode.
    pub fn exit_code(&self) -> i32 {
        match self {
            UniEscapeError::Config { .. }
            | UniEscapeError::InvalidExtensions { .. }
            | UniEscapeError::UnsupportedEncoding { .. } => 2,
            UniEscapeError::SourceNotFound { .. } => 3,
            UniEscapeError::InvalidOutput { .. } => 4,
            UniEscapeError::Decode { .. } => 5,
            UniEscapeError::UnrelatedPath { .. } => 6,
            _ => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for UniEscapeError {
    fn user_message(&self) -> String {
        match self {
            UniEscapeError::Io(e) => format!("File system error: {}", e),
            UniEscapeError::Config { message } => format!("Configuration error: {}", message),
            UniEscapeError::InvalidExtensions { raw } => {
                format!("Invalid extension list: \"{}\"", raw)
            }
            UniEscapeError::UnsupportedEncoding { name } => {
                format!("Unsupported encoding: {}", name)
            }
            UniEscapeError::Decode { path, encoding } => {
                format!("File {} is not valid {}", path, encoding)
            }
            UniEscapeError::UnrelatedPath { path, base } => {
                format!("{} is not inside {}", path, base)
            }
            UniEscapeError::SourceNotFound { path } => {
                format!("Source path does not exist: {}", path)
            }
            UniEscapeError::InvalidOutput { path } => {
                format!("Output directory must be a directory, but got {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            UniEscapeError::InvalidExtensions { .. } => Some(
                "Pass a comma-separated list without empty entries, e.g. --ext js,ts,min.js"
                    .to_string(),
            ),
            UniEscapeError::UnsupportedEncoding { .. } => {
                Some("Supported encodings are utf8 (utf-8) and gbk.".to_string())
            }
            UniEscapeError::Decode { .. } => Some(
                "Check the --encoding flag matches the encoding the source files were saved in."
                    .to_string(),
            ),
            UniEscapeError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all values are valid."
                    .to_string(),
            ),
            UniEscapeError::SourceNotFound { .. } => {
                Some("Pass an existing file or directory with --path.".to_string())
            }
            UniEscapeError::InvalidOutput { .. } => {
                Some("Choose a directory (existing or new) for --out.".to_string())
            }
            _ => None,
        }
    }
}

impl From<toml::de::Error> for UniEscapeError {
    fn from(error: toml::de::Error) -> Self {
        UniEscapeError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UniEscapeError>;
