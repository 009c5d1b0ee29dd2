use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("truncated {format} data: {details}")]
    Truncated { format: Format, details: String },

    #[error("snapshot layout mismatch: {details}")]
    LayoutMismatch { details: String },
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn truncated(format: Format, details: impl Into<String>) -> Self {
        Self::Truncated {
            format,
            details: details.into(),
        }
    }

    pub fn layout(details: impl Into<String>) -> Self {
        Self::LayoutMismatch {
            details: details.into(),
        }
    }
}
