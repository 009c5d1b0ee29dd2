//! Snapshot file I/O: one reader/writer pair per on-disk format, plus the
//! format dispatch the conversion driver goes through.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub mod ascii;
pub mod binary;
pub mod error;
pub mod npy;

use crate::model::record::Column;
use crate::model::snapshot::Snapshot;
pub use error::Error;

/// On-disk snapshot formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Whitespace-delimited text; every column is written as floating point.
    Ascii,
    /// Fixed-layout packed little-endian rows, no embedded schema. Not to
    /// be confused with the physical binaries of stars.
    Binary,
    /// Self-describing binary array container; column names and dtypes are
    /// recorded in the header, so the file is loadable without this tool.
    Npy,
}

impl Format {
    /// Suffix appended to newly generated snapshots of this format.
    pub fn output_suffix(self) -> &'static str {
        match self {
            Format::Ascii => ".a",
            Format::Binary => ".b",
            Format::Npy => ".npy",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Ascii => write!(f, "ascii"),
            Format::Binary => write!(f, "binary"),
            Format::Npy => write!(f, "npy"),
        }
    }
}

/// Read a snapshot with the given column layout from `reader`.
pub fn read_snapshot<R: BufRead>(
    reader: R,
    format: Format,
    schema: &[Column],
) -> Result<Snapshot, Error> {
    match format {
        Format::Ascii => ascii::reader::read(reader, schema),
        Format::Binary => binary::reader::read(reader, schema),
        Format::Npy => npy::reader::read(reader, schema),
    }
}

/// Write a snapshot to `writer` in the given format.
pub fn write_snapshot<W: Write>(
    writer: W,
    format: Format,
    snapshot: &Snapshot,
) -> Result<(), Error> {
    match format {
        Format::Ascii => ascii::writer::write(writer, snapshot),
        Format::Binary => binary::writer::write(writer, snapshot),
        Format::Npy => npy::writer::write(writer, snapshot),
    }
}

/// Load a snapshot file from disk.
pub fn load_snapshot(path: &Path, format: Format, schema: &[Column]) -> Result<Snapshot, Error> {
    let file = File::open(path)?;
    read_snapshot(BufReader::new(file), format, schema)
}

/// Create or overwrite the snapshot file at `path`.
pub fn save_snapshot(path: &Path, format: Format, snapshot: &Snapshot) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_snapshot(&mut writer, format, snapshot)?;
    writer.flush()?;
    Ok(())
}
