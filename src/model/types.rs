use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid interruption mode: '{0}' (choices: no, base, bse, mobse)")]
pub struct ParseInterruptModeError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid external mode: '{0}' (choices: galpy, no)")]
pub struct ParseExternalModeError(String);

/// Element type of a single snapshot column.
///
/// Snapshots only ever store 8-byte little-endian cells: physical
/// quantities as `f64`, identifiers and state flags as `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dtype {
    F64,
    I64,
}

impl Dtype {
    /// Every cell is 8 bytes on disk regardless of dtype.
    pub const SIZE: usize = 8;

    /// Array-protocol type string used in self-describing headers.
    pub fn npy_descr(self) -> &'static str {
        match self {
            Dtype::F64 => "<f8",
            Dtype::I64 => "<i8",
        }
    }

    pub fn from_npy_descr(descr: &str) -> Option<Self> {
        match descr {
            "<f8" => Some(Dtype::F64),
            "<i8" => Some(Dtype::I64),
            _ => None,
        }
    }
}

/// Stellar-evolution interruption model active when the snapshots were
/// produced. The `bse`/`mobse` models add a stellar-parameter block to
/// every particle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterruptMode {
    #[default]
    None,
    Base,
    Bse,
    Mobse,
}

impl InterruptMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InterruptMode::None => "no",
            InterruptMode::Base => "base",
            InterruptMode::Bse => "bse",
            InterruptMode::Mobse => "mobse",
        }
    }
}

impl fmt::Display for InterruptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterruptMode {
    type Err = ParseInterruptModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(InterruptMode::None),
            "base" => Ok(InterruptMode::Base),
            "bse" => Ok(InterruptMode::Bse),
            "mobse" => Ok(InterruptMode::Mobse),
            other => Err(ParseInterruptModeError(other.to_string())),
        }
    }
}

/// External background potential active when the snapshots were produced.
/// `galpy` adds an external-potential column to every particle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExternalMode {
    #[default]
    None,
    Galpy,
}

impl ExternalMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExternalMode::None => "no",
            ExternalMode::Galpy => "galpy",
        }
    }
}

impl fmt::Display for ExternalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExternalMode {
    type Err = ParseExternalModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(ExternalMode::None),
            "galpy" => Ok(ExternalMode::Galpy),
            other => Err(ParseExternalModeError(other.to_string())),
        }
    }
}
