use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

use legacyconv::cli::{handle_error, path_mapping, Args, CliConfig, CliResult, CliUtils};
use legacyconv::conversion::batch::{self, RecordOutcome};
use legacyconv::conversion::{OnCorrupted, SerializedDataConverter};
use legacyconv::error::{ConversionError, ConversionErrorKind};
use legacyconv::parser::{directory, SerializedSource};

fn main() {
    let args = Args::parse();

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(error) => {
            handle_error(&error);
            std::process::exit(2);
        }
    };

    if let Err(error) = run(&config) {
        handle_error(&error);
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> CliResult<()> {
    let converter = SerializedDataConverter::from_config(config.conversion_config.clone());

    if config.args.stdin {
        let content = read_stdin()?;
        return convert_string(content.trim(), &converter, config);
    }

    let Some(input) = &config.args.input else {
        return Err(ConversionError::conversion(
            ConversionErrorKind::Configuration {
                message: "No input provided. Use --stdin or provide an input path".to_string(),
            },
        ));
    };

    let path = PathBuf::from(input);
    if path.is_file() {
        if config.args.lines {
            convert_lines_file(&path, &converter, config)
        } else {
            let output = converter.convert_from_source(&SerializedSource::File(path))?;
            write_output(&output, config)
        }
    } else if path.is_dir() {
        convert_directory(&path, &converter, config)
    } else if looks_like_serialized(input) {
        convert_string(input, &converter, config)
    } else {
        Err(ConversionError::conversion(ConversionErrorKind::io(
            format!("input path does not exist: {}", input),
            Some(path),
        )))
    }
}

/// Check if an input string is a serialized record rather than a path
fn looks_like_serialized(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed == legacyconv::EMPTY_PAYLOAD
        || trimmed == "N;"
        || ["a:", "s:", "i:", "d:", "b:", "O:", "C:"]
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
}

fn convert_string(
    value: &str,
    converter: &SerializedDataConverter,
    config: &CliConfig,
) -> CliResult<()> {
    let output = converter.convert(value)?;
    write_output(&output, config)
}

fn convert_lines_file(
    path: &Path,
    converter: &SerializedDataConverter,
    config: &CliConfig,
) -> CliResult<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConversionError::conversion(ConversionErrorKind::io(e.to_string(), Some(path.to_path_buf()))))?;

    let total = content.lines().count() as u64;
    let progress = (!config.is_quiet() && CliUtils::should_use_color())
        .then(|| CliUtils::create_progress_bar(total));

    let lines = content.lines().map(|line| {
        if let Some(pb) = &progress {
            pb.inc(1);
        }
        line.to_string()
    });
    let report = batch::convert_lines(converter, lines)?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    for record in &report.records {
        if let RecordOutcome::Skipped { error } = &record.outcome {
            CliUtils::show_warning(
                &format!("skipped record at line {}: {}", record.line, error),
                config.is_quiet(),
            );
        }
    }

    let mut output = String::new();
    for line in report.converted_lines() {
        output.push_str(line);
        output.push('\n');
    }
    write_output(&output, config)?;

    if config.want_stats() {
        print_stats(&report.stats, config);
    }

    Ok(())
}

fn convert_directory(
    input_dir: &Path,
    converter: &SerializedDataConverter,
    config: &CliConfig,
) -> CliResult<()> {
    let output_dir = config.args.output.as_ref().ok_or_else(|| {
        ConversionError::conversion(ConversionErrorKind::Configuration {
            message: "Output directory required for directory conversion".to_string(),
        })
    })?;

    let files =
        directory::find_record_files(input_dir, &config.args.extension, config.args.recursive)
            .map_err(|e| {
                ConversionError::conversion(ConversionErrorKind::io(
                    e.to_string(),
                    Some(input_dir.to_path_buf()),
                ))
            })?;

    if files.is_empty() {
        CliUtils::show_warning(
            &format!(
                "no .{} files found in {}",
                config.args.extension,
                input_dir.display()
            ),
            config.is_quiet(),
        );
        return Ok(());
    }

    let mut corrupted = 0usize;
    for file in &files {
        let result = converter.convert_from_source(&SerializedSource::File(file.clone()));
        let output = match result {
            Ok(output) => output,
            Err(ConversionError::DataConversion(err))
                if config.conversion_config.on_corrupted == OnCorrupted::Skip =>
            {
                corrupted += 1;
                CliUtils::show_warning(
                    &format!("skipped {}: {}", file.display(), err),
                    config.is_quiet(),
                );
                continue;
            }
            Err(ConversionError::DataConversion(err)) => {
                return Err(ConversionError::conversion_with_source(
                    ConversionErrorKind::ConversionFailed {
                        message: format!("{}: {}", file.display(), err),
                    },
                    err.into(),
                ));
            }
            Err(other) => return Err(other),
        };

        let out_path = path_mapping::map_input_to_output(input_dir, file, output_dir);
        write_file(&out_path, &output)?;

        if config.is_verbose() {
            CliUtils::show_success(
                &format!("{} -> {}", file.display(), out_path.display()),
                config.is_quiet(),
            );
        }
    }

    CliUtils::show_success(
        &format!(
            "converted {} of {} files into {}",
            files.len() - corrupted,
            files.len(),
            output_dir.display()
        ),
        config.is_quiet(),
    );

    Ok(())
}

fn write_output(content: &str, config: &CliConfig) -> CliResult<()> {
    match &config.args.output {
        Some(path) => {
            write_file(path, content)?;
            CliUtils::show_success(
                &format!("converted to: {}", path.display()),
                config.is_quiet(),
            );
            Ok(())
        }
        None => {
            println!("{}", content.trim_end_matches('\n'));
            Ok(())
        }
    }
}

fn write_file(path: &Path, content: &str) -> CliResult<()> {
    let io_err = |e: std::io::Error| {
        ConversionError::conversion(ConversionErrorKind::io(
            e.to_string(),
            Some(path.to_path_buf()),
        ))
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, content).map_err(io_err)
}

fn print_stats(stats: &legacyconv::conversion::MigrationStatistics, config: &CliConfig) {
    if config.is_quiet() {
        return;
    }
    println!("\n{}", stats.summary());
    if config.is_verbose() {
        if let Ok(json) = stats.to_json() {
            println!("{}", json);
        }
    }
}

fn read_stdin() -> CliResult<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| ConversionError::conversion(ConversionErrorKind::io(e.to_string(), None)))?;
    Ok(buffer)
}
