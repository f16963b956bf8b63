use crate::convert::SourceEncoding;
use crate::error::{Result, UniEscapeError};
use crate::scanner::ExtensionSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub encoding: String,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output root; the resolved source directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Abort on the first per-file failure instead of reporting it.
    #[serde(default)]
    pub strict: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            encoding: "utf8".to_string(),
            extensions: vec!["js".to_string()],
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(UniEscapeError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| UniEscapeError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| UniEscapeError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["uniescape.toml", ".uniescape.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) -> Result<()> {
        if let Some(ref encoding) = cli_args.encoding {
            self.conversion.encoding = encoding.clone();
        }

        // Comma-separated on the command line, a TOML array in the file.
        if let Some(ref ext) = cli_args.extensions {
            self.conversion.extensions = ExtensionSet::parse(ext)?.into_vec();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = Some(output_dir.clone());
        }

        if let Some(strict) = cli_args.strict {
            self.output.strict = strict;
        }

        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| UniEscapeError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| UniEscapeError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.encoding()?;
        self.extension_set()?;
        Ok(())
    }

    pub fn encoding(&self) -> Result<SourceEncoding> {
        SourceEncoding::from_name(&self.conversion.encoding)
    }

    pub fn extension_set(&self) -> Result<ExtensionSet> {
        ExtensionSet::new(self.conversion.extensions.clone())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub encoding: Option<String>,
    pub extensions: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub strict: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: Option<String>) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_extensions(mut self, extensions: Option<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_strict(mut self, strict: Option<bool>) -> Self {
        self.strict = strict;
        self
    }
}
