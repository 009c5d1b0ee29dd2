//! Batch conversion planning and execution.
//!
//! A run takes a manifest of snapshot base paths and, for each base and
//! each selected data type, converts one file. Planning is separated from
//! execution so callers can inspect or report the file names involved
//! before touching the disk.

use std::path::PathBuf;

use crate::io::{self, Error, Format};
use crate::model::record::{ParticleConfig, SystemKind};

/// Everything a conversion run needs besides the snapshot paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    pub particle: ParticleConfig,
    /// Format the existing snapshot files are in.
    pub snapshot_format: Format,
    /// Format the converted files are written in.
    pub output_format: Format,
    /// Data types to convert for every base path, in order.
    pub kinds: Vec<SystemKind>,
    /// Write the converted file over the input path instead of next to it.
    /// Self-describing output always keeps its own extension.
    pub replace: bool,
}

/// One planned conversion: a data type and the resolved file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub kind: SystemKind,
    pub load_path: PathBuf,
    pub save_path: PathBuf,
}

/// Read the manifest file listing snapshot base paths, one per line.
///
/// Lines are passed through verbatim, blank ones included; the caller
/// decides what a blank base path means.
pub fn read_manifest(path: &std::path::Path) -> Result<Vec<String>, Error> {
    let file = std::fs::File::open(path)?;
    parse_manifest(std::io::BufReader::new(file))
}

pub fn parse_manifest<R: std::io::BufRead>(mut reader: R) -> Result<Vec<String>, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text.lines().map(str::to_owned).collect())
}

/// Resolve the file names for one base path under `config`.
///
/// Each data type lives in its own file named `<base>.<tag>`, with
/// format-dependent decorations:
/// - self-describing inputs carry a `.npy` extension on disk;
/// - self-describing outputs always gain `.npy`, even when replacing;
/// - otherwise `--replace` writes back to the input path, and a
///   non-replacing run appends the output format's suffix.
pub fn plan_jobs(base: &str, config: &TransferConfig) -> Vec<Job> {
    config
        .kinds
        .iter()
        .map(|&kind| {
            let stem = format!("{base}.{}", kind.tag());
            let load_path = if config.snapshot_format == Format::Npy {
                PathBuf::from(format!("{stem}.npy"))
            } else {
                PathBuf::from(&stem)
            };
            let save_path = if config.output_format == Format::Npy {
                PathBuf::from(format!("{stem}.npy"))
            } else if config.replace {
                PathBuf::from(&stem)
            } else {
                PathBuf::from(format!("{stem}{}", config.output_format.output_suffix()))
            };
            Job {
                kind,
                load_path,
                save_path,
            }
        })
        .collect()
}

/// Execute one planned conversion: load, then save in the output format.
pub fn run_job(job: &Job, config: &TransferConfig) -> Result<(), Error> {
    let schema = job.kind.shape().columns(&config.particle);
    let snapshot = io::load_snapshot(&job.load_path, config.snapshot_format, &schema)?;
    io::save_snapshot(&job.save_path, config.output_format, &snapshot)
}
