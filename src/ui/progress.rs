use super::output::format_duration;
use crate::writer::WriteProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    pub fn create_file_progress(&self, total_files: u64, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new(total_files));
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} files {msg}"
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.enabled {
            self.multi_progress.suspend(f)
        } else {
            f()
        }
    }

    pub fn clear(&self) {
        if self.enabled {
            self.multi_progress.clear().ok();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

pub fn update_convert_progress(pb: &ProgressBar, converted: usize, current_file: &Path) {
    pb.set_position(converted as u64);
    pb.set_message(format!("Converting {}", current_file.display()));
}

pub fn update_write_progress(pb: &ProgressBar, progress: &WriteProgress) {
    pb.set_position(progress.outcomes.len() as u64);

    match progress.current_file {
        Some(ref current_file) => pb.set_message(format!("Writing {}", current_file)),
        None => pb.set_message("Writing files..."),
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str, duration: Duration) {
    let final_message = format!("{} (completed in {})", message, format_duration(duration));
    pb.finish_with_message(final_message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_manager_creation() {
        let manager = ProgressManager::new(true);
        assert!(manager.is_enabled());

        let disabled_manager = ProgressManager::new(false);
        assert!(!disabled_manager.is_enabled());
    }

    #[test]
    fn test_progress_bar_creation() {
        let manager = ProgressManager::new(true);
        let file_pb = manager.create_file_progress(100, "Converting files...");

        // Visibility depends on whether a TTY is attached.
        assert!(file_pb.length().unwrap_or(0) > 0 || file_pb.length().is_none());
    }

    #[test]
    fn test_disabled_progress_bars() {
        let manager = ProgressManager::new(false);

        let file_pb = manager.create_file_progress(100, "Converting files...");
        assert!(file_pb.is_hidden());
        assert_eq!(manager.suspend(|| 7), 7);
    }

    #[test]
    fn test_update_helpers() {
        let pb = ProgressBar::hidden();
        pb.set_length(3);

        update_convert_progress(&pb, 1, Path::new("a.js"));
        assert_eq!(pb.position(), 1);
        assert_eq!(pb.message(), "Converting a.js");

        let mut progress = WriteProgress::new(3);
        progress.current_file = Some("out/b.js".to_string());
        update_write_progress(&pb, &progress);
        assert_eq!(pb.position(), 0);
        assert_eq!(pb.message(), "Writing out/b.js");

        finish_progress_with_summary(&pb, "Wrote 3 files", Duration::from_millis(20));
        assert!(pb.is_finished());
    }
}
