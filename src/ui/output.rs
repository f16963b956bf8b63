use crate::error::{UniEscapeError, UserFriendlyError};
use crate::plan::ConversionPlan;
use crate::scanner::relative_path;
use crate::writer::{ConversionReport, FileStatus};
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        }
    }
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &UniEscapeError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    eprintln!(
                        "{}",
                        json_line(&serde_json::json!({
                            "type": "suggestion",
                            "message": suggestion
                        }))
                    );
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_conversion_report(&self, report: &ConversionReport) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    self.print_human_report(report);
                }
            }
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => self.print_plain_report(report),
        }
    }

    pub fn print_plan(&self, plan: &ConversionPlan) {
        match self.mode {
            OutputMode::Json => {
                let files: Vec<String> = plan
                    .files
                    .iter()
                    .map(|f| f.display().to_string())
                    .collect();
                self.print_json_object(&serde_json::json!({
                    "type": "plan",
                    "source_root": plan.paths.source_root.display().to_string(),
                    "output_root": plan.paths.output_root.display().to_string(),
                    "encoding": plan.encoding.name(),
                    "extensions": plan.extensions.as_slice(),
                    "files": files,
                    "walk_errors": plan.walk_errors,
                }));
            }
            OutputMode::Human | OutputMode::Plain => {
                println!("  Source root: {}", plan.paths.source_root.display());
                println!("  Output root: {}", plan.paths.output_root.display());
                println!("  Encoding: {}", plan.encoding);
                println!("  Extensions: {}", plan.extensions.as_slice().join(", "));
                println!("  Files to convert: {}", plan.files.len());

                for file in &plan.files {
                    let shown = relative_path(file, &plan.paths.source_root)
                        .unwrap_or_else(|_| file.clone());
                    println!("    {}", shown.display());
                }

                for error in &plan.walk_errors {
                    self.warning(error);
                }
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    /// JSON messages go to stderr; stdout carries only the report or plan.
    fn print_json_message(&self, level: &str, message: &str) {
        eprintln!("{}", json_line(&message_json(level, message)));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!("{}", json_line(obj));
    }

    fn print_human_report(&self, report: &ConversionReport) {
        self.print_separator();

        let converted = report.converted_count();
        if self.use_colors {
            println!(
                "{} {}",
                style(format!("Converted {} files", converted)).green().bold(),
                CHECKMARK
            );
        } else {
            println!("✓ Converted {} files", converted);
        }

        println!();
        println!("  Output directory: {}", report.output_root.display());
        println!("  Encoding:         {}", report.encoding);
        println!("  Extensions:       {}", report.extensions.join(", "));
        println!("  Bytes written:    {}", format_bytes(report.total_bytes()));
        println!("  Time taken:       {}", format_duration(report.duration));

        if !report.is_clean() {
            println!("  Problems:         {}", report.errors().len());
            println!();
            for file in &report.files {
                let label = match file.status {
                    FileStatus::Converted => continue,
                    FileStatus::DecodeFailed => "decode failed, wrote empty file",
                    FileStatus::WriteFailed => "write failed",
                };
                self.warning(&format!(
                    "{} ({}): {}",
                    file.source.display(),
                    label,
                    file.error.as_deref().unwrap_or("unknown error")
                ));
            }
            for error in &report.walk_errors {
                self.warning(error);
            }
        }

        self.print_separator();
    }

    fn print_plain_report(&self, report: &ConversionReport) {
        println!("COMPLETED: Conversion");
        println!("Files converted: {}", report.converted_count());
        println!("Files failed: {}", report.failed_count());
        println!("Bytes written: {}", report.total_bytes());
        println!("Duration: {:?}", report.duration);

        for error in report.errors() {
            println!("ERROR: {}", error);
        }
    }
}

fn message_json(level: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "message",
        "level": level,
        "message": message,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })
}

fn json_line(obj: &serde_json::Value) -> String {
    serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
