use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use snap_transfer::{ExternalMode, InterruptMode, SystemKind, io::Format};

#[derive(Parser)]
#[command(
    name = "snapt",
    about = "Convert post-processed N-body snapshot files between on-disk formats",
    version,
    after_help = "Each line of <PATH_LIST> is one snapshot base path; for every base path and \
                  every selected data type, the file '<base>.<type>' is converted. The layout \
                  options (-i, -t, -B) must match the options the snapshots were post-processed \
                  with."
)]
pub struct Cli {
    /// File listing snapshot base paths, one per line
    #[arg(value_name = "PATH_LIST")]
    pub path_list: PathBuf,

    /// Stellar-evolution interruption mode the snapshots were made with
    /// (no, base, bse, mobse)
    #[arg(short = 'i', long, value_name = "MODE", default_value = "no")]
    pub interrupt_mode: InterruptMode,

    /// External potential mode the snapshots were made with (galpy, no)
    #[arg(short = 't', long, value_name = "MODE", default_value = "no")]
    pub external_mode: ExternalMode,

    /// Snapshots carry full binary orbital parameters
    #[arg(short = 'B', long)]
    pub full_binary: bool,

    /// Format of the existing snapshot files
    #[arg(short = 's', long, value_name = "FORMAT", default_value = "ascii")]
    pub snapshot_format: FormatArg,

    /// Format to convert to
    #[arg(short = 'o', long, value_name = "FORMAT", default_value = "npy")]
    pub output_format: FormatArg,

    /// Data types to convert (comma-separated)
    #[arg(
        short = 'd',
        long,
        value_name = "TYPE",
        value_delimiter = ',',
        default_value = "single,binary"
    )]
    pub data_type: Vec<DataTypeArg>,

    /// Overwrite the input files instead of writing alongside them
    #[arg(short = 'r', long)]
    pub replace: bool,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Whitespace-delimited text
    Ascii,
    /// Packed little-endian rows, no header
    Binary,
    /// Self-describing structured array
    Npy,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Ascii => Format::Ascii,
            FormatArg::Binary => Format::Binary,
            FormatArg::Npy => Format::Npy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DataTypeArg {
    /// Single stars
    Single,
    /// Binary systems
    Binary,
    /// Triple systems
    Triple,
    /// Quadruple systems
    Quadruple,
}

impl From<DataTypeArg> for SystemKind {
    fn from(arg: DataTypeArg) -> Self {
        match arg {
            DataTypeArg::Single => SystemKind::Single,
            DataTypeArg::Binary => SystemKind::Binary,
            DataTypeArg::Triple => SystemKind::Triple,
            DataTypeArg::Quadruple => SystemKind::Quadruple,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
