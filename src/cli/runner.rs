use std::fs;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use medslice::api::{
    convert_directory_with_progress, slice_directory_with_progress, slice_volume,
};
use medslice::core::params::{ConvertParams, SliceParams};
use medslice::io::CommandConverter;

use super::args::{CliArgs, Command};
use super::errors::AppError;

fn batch_progress() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("template is compile-time constant")
            .progress_chars("█▓▒░  "),
    );
    pb
}

fn run_convert(
    input_dir: PathBuf,
    output_dir: PathBuf,
    converter: String,
    overwrite: bool,
    no_labels_dir: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = ConvertParams {
        overwrite,
        create_labels_dir: !no_labels_dir,
    };
    let converter = CommandConverter::new(converter);

    info!("Starting series conversion from directory: {:?}", input_dir);
    let progress = batch_progress();
    let report =
        convert_directory_with_progress(&input_dir, &output_dir, &converter, &params, &progress)?;
    progress.finish_and_clear();

    eprintln!(
        "converted {} series, skipped {} existing, {} failed",
        report.converted, report.skipped, report.failed
    );
    Ok(())
}

fn run_slice_batch(
    input_dir: PathBuf,
    output_dir: PathBuf,
    size: usize,
    workers: Option<usize>,
    report_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = SliceParams {
        target_size: size,
        workers,
    };

    info!("Starting batch slicing from directory: {:?}", input_dir);
    let progress = batch_progress();
    let report = slice_directory_with_progress(&input_dir, &output_dir, &params, &progress)?;
    progress.finish_and_clear();

    if report.is_empty() {
        eprintln!("no volumes found under {}, nothing to do", input_dir.display());
    } else {
        eprintln!("sliced {} volumes, {} failed", report.processed, report.failed);
        // Successes stay silent; every failure is surfaced with its detail.
        for failure in report.failures() {
            eprintln!("{failure}");
        }
    }

    if let Some(path) = report_path {
        fs::write(&path, serde_json::to_vec_pretty(&report)?)?;
        info!("Batch report written to {:?}", path);
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    match args.command {
        Command::Convert {
            input_dir,
            output_dir,
            converter,
            overwrite,
            no_labels_dir,
        } => run_convert(input_dir, output_dir, converter, overwrite, no_labels_dir),
        Command::Slice {
            input,
            output,
            input_dir,
            output_dir,
            size,
            workers,
            report,
        } => {
            let batch_mode = input_dir.is_some();
            if batch_mode {
                let input_dir = input_dir.ok_or(AppError::MissingArgument {
                    arg: "--input-dir".to_string(),
                })?;
                let output_dir = output_dir.ok_or(AppError::MissingArgument {
                    arg: "--output-dir".to_string(),
                })?;
                run_slice_batch(input_dir, output_dir, size, workers, report)
            } else {
                let input = input.ok_or(AppError::MissingArgument {
                    arg: "--input".to_string(),
                })?;
                let output = output.ok_or(AppError::MissingArgument {
                    arg: "--output".to_string(),
                })?;
                let written = slice_volume(&input, &output, size)?;
                eprintln!("wrote {} slices to {}", written, output.display());
                Ok(())
            }
        }
    }
}
