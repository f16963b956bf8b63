use clap::{CommandFactory, Parser};
use std::io;
use std::path::Path;
use std::process;
use uniescape::{Cli, OutputFormatter, OutputMode, UniEscape, UniEscapeError, UserFriendlyError};

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(cli.verbosity_level());

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let path = match cli.path {
        Some(ref path) => path.clone(),
        None => {
            let _ = Cli::command().write_help(&mut io::stderr());
            return 0;
        }
    };

    let app = match UniEscape::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&cli, &e);
            return failure_exit_code(cli.strict, &e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&app, &path);
    }

    match app.convert(&path) {
        Ok(report) => {
            app.output_formatter().print_conversion_report(&report);
            0
        }
        Err(e) => {
            app.handle_error(&e);
            failure_exit_code(app.config().output.strict, &e)
        }
    }
}

/// Failures only show up in the exit status in strict mode.
fn failure_exit_code(strict: bool, error: &UniEscapeError) -> i32 {
    if strict {
        error.exit_code()
    } else {
        0
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "uniescape.toml".to_string());

    match UniEscape::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  uniescape --path <PATH> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(app: &UniEscape, path: &Path) -> i32 {
    let formatter = app.output_formatter();

    formatter.info("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    let plan = match app.plan(path) {
        Ok(plan) => plan,
        Err(e) => {
            app.handle_error(&e);
            return failure_exit_code(app.config().output.strict, &e);
        }
    };

    formatter.print_plan(&plan);
    formatter.print_separator();
    formatter.success(&format!(
        "Dry run completed: {} files would be converted",
        plan.files.len()
    ));

    0
}

fn print_startup_error(cli: &Cli, error: &UniEscapeError) {
    let mode = OutputMode::from_string(cli.output_format.as_str());
    let formatter = OutputFormatter::new(mode, 0, cli.quiet);
    formatter.print_user_friendly_error(error);
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG takes precedence over -v.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
