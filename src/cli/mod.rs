//! Command-line interface module

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::conversion::config::{ConversionConfig, OnCorrupted};
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "legacyconv")]
#[command(about = "Convert legacy PHP-serialized commerce data to JSON")]
#[command(version)]
pub struct Args {
    /// Input: serialized string, record file, or directory
    #[arg()]
    pub input: Option<String>,

    /// Output file or directory path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read serialized data from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Treat the input file as line-delimited records, one per line
    #[arg(long)]
    pub lines: bool,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// File extension of record files in directory mode
    #[arg(long, default_value = "ser")]
    pub extension: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Maximum record size (e.g., 16MB, 500KB; default: 16MB)
    #[arg(long)]
    pub max_input_size: Option<String>,

    /// Maximum nesting depth accepted by the decoder (default: 128)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Skip corrupted records instead of aborting
    #[arg(long)]
    pub skip_corrupted: bool,

    /// Output migration statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let conversion_config = Self::create_conversion_config(&args)?;

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> ConversionResult<ConversionConfig> {
        let max_input_size = parse_size(&args.max_input_size)?;
        let on_corrupted = if args.skip_corrupted {
            OnCorrupted::Skip
        } else {
            OnCorrupted::Fail
        };

        let config = ConversionConfig {
            max_input_size,
            max_depth: args.max_depth.unwrap_or(128),
            pretty: args.pretty,
            on_corrupted,
        };

        config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;

        Ok(config)
    }

    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        if self.args.stdin {
            "standard input".to_string()
        } else if let Some(input) = &self.args.input {
            format!("'{}'", input)
        } else {
            "no input specified".to_string()
        }
    }
}

/// Parse a size string (e.g., "16MB", "500KB", "1024")
fn parse_size(size: &Option<String>) -> ConversionResult<usize> {
    let Some(size_str) = size else {
        return Ok(ConversionConfig::default().max_input_size);
    };
    let size_str = size_str.trim().to_uppercase();

    let invalid = || {
        ConversionError::conversion(ConversionErrorKind::Configuration {
            message: format!("Invalid size: {}", size_str),
        })
    };

    let (digits, multiplier) = if let Some(digits) = size_str.strip_suffix("GB") {
        (digits, 1024 * 1024 * 1024)
    } else if let Some(digits) = size_str.strip_suffix("MB") {
        (digits, 1024 * 1024)
    } else if let Some(digits) = size_str.strip_suffix("KB") {
        (digits, 1024)
    } else if let Some(digits) = size_str.strip_suffix('B') {
        (digits, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let value = digits.trim().parse::<f64>().map_err(|_| invalid())?;
    if value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier as f64) as usize)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
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

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for multi-record processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            if Self::should_use_color() {
                println!("{} {}", console::style("✓").green(), message);
            } else {
                println!("✓ {}", message);
            }
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        if Self::should_use_color() {
            eprintln!("{} {}", console::style("✗").red(), message);
        } else {
            eprintln!("✗ {}", message);
        }
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            if Self::should_use_color() {
                eprintln!("{} {}", console::style("⚠").yellow(), message);
            } else {
                eprintln!("⚠ {}", message);
            }
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    let message = error.user_message();
    CliUtils::show_error(&message);

    if message.contains("corrupted legacy data") {
        eprintln!("\nTip: Use --skip-corrupted to continue past corrupted records");
    } else if message.contains("record too large") {
        eprintln!("\nTip: Use --max-input-size to raise the record size limit");
    }

    eprintln!("\nTry 'legacyconv --help' for usage information.");
}

/// Command execution result
pub type CliResult<T> = Result<T, ConversionError>;
