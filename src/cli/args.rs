use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medslice", version, about = "Medical volume to annotation-slice converter")]
pub struct CliArgs {
    /// Enable logging
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert DICOM series directories into NIfTI volumes (resumable)
    Convert {
        /// Root directory of raw DICOM series (subdirectories named SE*)
        #[arg(long)]
        input_dir: PathBuf,

        /// Root directory for the converted .nii.gz tree
        #[arg(long)]
        output_dir: PathBuf,

        /// External converter, invoked as `<program> <series_dir> <output>`
        #[arg(long, default_value = "dcm2niix")]
        converter: String,

        /// Re-convert series whose output already exists
        #[arg(long, default_value_t = false)]
        overwrite: bool,

        /// Do not create the empty `labels` directory next to the output root
        #[arg(long, default_value_t = false)]
        no_labels_dir: bool,
    },

    /// Slice NIfTI volumes into contrast-normalized PNG stacks
    Slice {
        /// Input volume (single file mode)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output slice directory (single file mode)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory tree of .nii.gz volumes (batch mode)
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Output root for the mirrored slice tree (batch mode)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Side length of the square output slices, in pixels
        #[arg(long, default_value_t = 1024)]
        size: usize,

        /// Worker threads (default: one per available processing unit)
        #[arg(long)]
        workers: Option<usize>,

        /// Write the batch report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}
