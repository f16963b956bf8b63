use crate::error::{Result, UniEscapeError};
use crate::scanner::relative_path;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What happened to one file handed to the writer.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes_written: u64,
    pub error: Option<String>,
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct WriteProgress {
    pub files_written: usize,
    pub total_files: usize,
    pub bytes_written: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub outcomes: Vec<WriteOutcome>,
}

impl WriteProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_written: 0,
            total_files,
            bytes_written: 0,
            current_file: None,
            start_time: Instant::now(),
            outcomes: Vec::with_capacity(total_files),
        }
    }

    fn record(&mut self, outcome: WriteOutcome) {
        if outcome.is_success() {
            self.files_written += 1;
            self.bytes_written += outcome.bytes_written;
        }
        self.current_file = Some(outcome.destination.display().to_string());
        self.outcomes.push(outcome);
    }

    pub fn failures(&self) -> impl Iterator<Item = &WriteOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Writes converted text under the output root, mirroring the layout of the
/// source root.
pub struct OutputWriter {
    source_root: PathBuf,
    output_root: PathBuf,
    fail_fast: bool,
}

impl OutputWriter {
    pub fn new(source_root: &Path, output_root: &Path) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            output_root: output_root.to_path_buf(),
            fail_fast: false,
        }
    }

    /// Stop at the first failed write instead of recording it and moving on.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn output_path_for(&self, source: &Path) -> Result<PathBuf> {
        let relative = relative_path(source, &self.source_root)?;
        Ok(self.output_root.join(relative))
    }

    /// Write `contents[i]` to the mirror of `sources[i]`.
    ///
    /// Nothing already written is rolled back when a later file fails. A
    /// source outside the source root aborts the whole batch.
    pub fn write_all(
        &self,
        contents: &[String],
        sources: &[PathBuf],
        progress_callback: Option<&dyn Fn(&WriteProgress)>,
    ) -> Result<WriteProgress> {
        if contents.len() != sources.len() {
            return Err(UniEscapeError::LengthMismatch {
                files: sources.len(),
                contents: contents.len(),
            });
        }

        if !self.output_root.exists() {
            fs::create_dir_all(&self.output_root)?;
        }

        let mut progress = WriteProgress::new(sources.len());

        for (content, source) in contents.iter().zip(sources) {
            let destination = self.output_path_for(source)?;

            let outcome = match self.write_file(content, &destination) {
                Ok(bytes_written) => WriteOutcome {
                    source: source.clone(),
                    destination,
                    bytes_written,
                    error: None,
                },
                Err(e) => {
                    if self.fail_fast {
                        return Err(e);
                    }
                    log::warn!("Failed to write {}: {}", destination.display(), e);
                    WriteOutcome {
                        source: source.clone(),
                        destination,
                        bytes_written: 0,
                        error: Some(e.to_string()),
                    }
                }
            };

            progress.record(outcome);

            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        Ok(progress)
    }

    fn write_file(&self, content: &str, destination: &Path) -> Result<u64> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = fs::File::create(destination)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;

        log::debug!("Wrote {} ({} bytes)", destination.display(), content.len());
        Ok(content.len() as u64)
    }
}
