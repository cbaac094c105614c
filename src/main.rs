//! timberline: A terminal UI for tailing structured JSON logs

use clap::Parser;
use color_eyre::Result;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use timberline_tui::{App, ingest};
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};

/// timberline: live table viewer for NDJSON logs on stdin
#[derive(Parser, Debug)]
#[command(name = "timberline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log file path (default: <temp_dir>/timberline.log)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging to file (not stdout, which would corrupt TUI)
    let log_path = resolve_log_path(cli.log_file);
    let log_file = File::create(&log_path)?;

    let filter = if cli.debug {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(true)
                .with_target(false),
        )
        .with(filter)
        .init();

    tracing::info!("Starting timberline");

    // Records stream in from stdin; key events come from the tty
    let records = ingest::spawn(BufReader::new(std::io::stdin()));

    // Run the TUI
    let mut app = App::new(records);
    let selection = app.run().await?;

    // Printed after the terminal is restored so it survives the
    // alternate-screen teardown
    if let Some(level) = selection {
        println!("Selected level: {level}");
    }

    tracing::info!("Goodbye!");
    Ok(())
}

/// Resolve the log file path, falling back to the platform temp directory.
fn resolve_log_path(log_file: Option<String>) -> PathBuf {
    match log_file {
        Some(path) => PathBuf::from(path),
        None => std::env::temp_dir().join("timberline.log"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_path_uses_temp_dir() {
        let path = resolve_log_path(None);
        let expected = std::env::temp_dir().join("timberline.log");
        assert_eq!(path, expected);
    }

    #[test]
    fn default_log_path_parent_exists() {
        let path = resolve_log_path(None);
        assert!(
            path.parent().unwrap().exists(),
            "default log path parent directory does not exist: {}",
            path.display()
        );
    }

    #[test]
    fn explicit_log_path_is_used() {
        let custom = "/some/custom/path.log".to_string();
        let path = resolve_log_path(Some(custom.clone()));
        assert_eq!(path, PathBuf::from(custom));
    }
}
