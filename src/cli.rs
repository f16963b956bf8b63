use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "uniescape")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rewrite source files so every non-ASCII character is an escape sequence")]
#[command(
    long_about = "uniescape walks a file or directory, decodes every file with a matching \
                  extension and writes a copy in which each character outside printable ASCII \
                  is replaced by a \\uXXXX style escape."
)]
#[command(after_help = "EXAMPLES:\n  \
    uniescape --path ./src\n  \
    uniescape --path ./legacy --encoding gbk --ext js,json --out ./escaped\n  \
    uniescape --path ./src --dry-run --output-format json\n  \
    uniescape --path ./src --config uniescape.toml --strict")]
pub struct Cli {
    /// File or directory to convert
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Encoding of the source files (utf8, utf-8, gbk)
    #[arg(short, long, env = "UNIESCAPE_ENCODING")]
    pub encoding: Option<String>,

    /// File extensions to convert (comma-separated)
    #[arg(
        short = 'x',
        long = "ext",
        help = "File extensions to convert (e.g., js,ts,min.js)"
    )]
    pub ext: Option<String>,

    /// Output directory (defaults to converting in place)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Stop at the first failure and report it through the exit status
    #[arg(long)]
    pub strict: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "List the files that would be converted without writing anything")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
            OutputFormat::Plain => "plain",
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides)?;
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        // --strict can only turn strict mode on; the config file decides otherwise.
        let strict = if self.strict { Some(true) } else { None };

        CliOverrides::new()
            .with_encoding(self.encoding.clone())
            .with_extensions(self.ext.clone())
            .with_output_dir(self.out.clone())
            .with_strict(strict)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UniEscapeError;
    use std::path::Path;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "uniescape", "-p", "src", "-e", "gbk", "-x", "js,ts", "-o", "out", "-vv", "--strict",
        ])
        .unwrap();

        assert_eq!(cli.path.as_deref(), Some(Path::new("src")));
        assert_eq!(cli.encoding.as_deref(), Some("gbk"));
        assert_eq!(cli.ext.as_deref(), Some("js,ts"));
        assert_eq!(cli.out.as_deref(), Some(Path::new("out")));
        assert_eq!(cli.verbosity_level(), 2);
        assert!(cli.strict);
    }

    #[test]
    fn test_path_is_optional() {
        let cli = Cli::try_parse_from(["uniescape"]).unwrap();
        assert!(cli.path.is_none());
        assert!(matches!(cli.output_format, OutputFormat::Human));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["uniescape", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_overrides_applied_to_config() {
        let cli = Cli::try_parse_from([
            "uniescape", "--path", ".", "--encoding", "UTF-8", "--ext", "js,min.js", "--strict",
        ])
        .unwrap();

        let mut config = Config::default();
        config.merge_with_cli_args(&cli.create_cli_overrides()).unwrap();

        assert_eq!(config.conversion.encoding, "UTF-8");
        assert_eq!(config.conversion.extensions, vec!["js", "min.js"]);
        assert!(config.output.strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_extension_list_rejected() {
        let cli = Cli::try_parse_from(["uniescape", "--path", ".", "--ext", "js,,ts"]).unwrap();

        let mut config = Config::default();
        let result = config.merge_with_cli_args(&cli.create_cli_overrides());
        assert!(matches!(result, Err(UniEscapeError::InvalidExtensions { .. })));
    }

    #[test]
    fn test_output_format_names() {
        let cli = Cli::try_parse_from(["uniescape", "--output-format", "json"]).unwrap();
        assert_eq!(cli.output_format.as_str(), "json");
    }
}
