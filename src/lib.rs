pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod plan;
pub mod scanner;
pub mod ui;
pub mod writer;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ConversionConfig, OutputConfig};
pub use error::{Result, UniEscapeError, UserFriendlyError};

// Core functionality re-exports
pub use convert::{convert_file, escape_char, escape_str, SourceEncoding};
pub use plan::{ConversionPlan, ResolvedPaths};
pub use scanner::{ExtensionSet, FileFilter, FileScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};
pub use writer::{ConversionReport, FileReport, FileStatus, OutputWriter, WriteProgress};

use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use writer::ReportHeader;

/// Main library interface for uniescape
pub struct UniEscape {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl UniEscape {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(output_mode == OutputMode::Human && !quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create a UniEscape instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = OutputMode::from_string(cli_args.output_format.as_str());

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Enumerate and filter the files a run over `path` would convert.
    pub fn plan(&self, path: &Path) -> Result<ConversionPlan> {
        self.output_formatter.start_operation("Scanning source files");

        let plan = ConversionPlan::build(path, &self.config)?;

        for error in &plan.walk_errors {
            self.output_formatter.warning(error);
        }
        self.output_formatter
            .info(&format!("Found {} files to convert", plan.files.len()));

        Ok(plan)
    }

    /// Convert every matching file under `path` and write the results.
    ///
    /// In lenient mode a file that fails to decode still gets an (empty)
    /// output file and a failure entry in the report. In strict mode the
    /// first failure is returned instead.
    pub fn convert(&self, path: &Path) -> Result<ConversionReport> {
        let started_at = Utc::now();
        let start_time = Instant::now();

        let plan = self.plan(path)?;
        let (contents, decode_errors) = self.convert_files(&plan)?;
        let progress = self.write_files(&plan, &contents)?;

        let header = ReportHeader {
            source_root: plan.paths.source_root.clone(),
            output_root: plan.paths.output_root.clone(),
            encoding: plan.encoding,
            extensions: plan.extensions.as_slice().to_vec(),
            started_at,
            duration: start_time.elapsed(),
        };

        let report =
            ConversionReport::from_outcomes(header, decode_errors, &progress, plan.walk_errors);

        log::info!(
            "converted {} files, {} failed",
            report.converted_count(),
            report.failed_count()
        );

        Ok(report)
    }

    /// Decode and escape each planned file, keeping results in plan order.
    fn convert_files(&self, plan: &ConversionPlan) -> Result<(Vec<String>, Vec<Option<String>>)> {
        self.output_formatter.start_operation("Converting files");

        let file_progress = self
            .progress_manager
            .create_file_progress(plan.files.len() as u64, "Converting files...");
        let start_time = Instant::now();

        let mut contents = Vec::with_capacity(plan.files.len());
        let mut decode_errors = Vec::with_capacity(plan.files.len());

        for (index, file) in plan.files.iter().enumerate() {
            ui::progress::update_convert_progress(&file_progress, index, file);

            match convert_file(file, plan.encoding) {
                Ok(converted) => {
                    contents.push(converted);
                    decode_errors.push(None);
                }
                Err(e) => {
                    if self.config.output.strict {
                        file_progress.abandon();
                        return Err(e);
                    }

                    log::warn!("{}", e);
                    self.progress_manager
                        .suspend(|| self.output_formatter.error(&e.user_message()));
                    contents.push(String::new());
                    decode_errors.push(Some(e.user_message()));
                }
            }
        }

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Converted {} files", plan.files.len()),
            start_time.elapsed(),
        );

        Ok((contents, decode_errors))
    }

    fn write_files(&self, plan: &ConversionPlan, contents: &[String]) -> Result<WriteProgress> {
        self.output_formatter.start_operation("Writing output files");

        let file_progress = self
            .progress_manager
            .create_file_progress(plan.files.len() as u64, "Writing files...");
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &WriteProgress| {
                ui::progress::update_write_progress(&pb, progress);
            }
        };

        let writer = OutputWriter::new(&plan.paths.source_root, &plan.paths.output_root)
            .with_fail_fast(self.config.output.strict);

        let write_progress = match writer.write_all(contents, &plan.files, Some(&progress_callback))
        {
            Ok(write_progress) => write_progress,
            Err(e) => {
                file_progress.abandon();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Wrote {} files", write_progress.files_written),
            write_progress.elapsed(),
        );

        Ok(write_progress)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &UniEscapeError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convert `path` with default settings, optionally into `output_dir`.
pub fn convert_simple(
    path: &Path,
    output_dir: Option<&Path>,
    encoding: &str,
) -> Result<ConversionReport> {
    let mut config = Config::default();
    config.conversion.encoding = encoding.to_string();
    config.output.directory = output_dir.map(Path::to_path_buf);
    config.validate()?;

    UniEscape::new(config, OutputMode::Plain, 0, true).convert(path)
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
