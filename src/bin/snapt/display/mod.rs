mod error;
mod progress;

pub use error::print_error;
pub use progress::Progress;

use std::io::IsTerminal;

#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Stderr is a terminal; draw live progress there.
    pub interactive: bool,
    /// Suppress all progress output, including the plain fallback.
    pub quiet: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: std::io::stderr().is_terminal(),
            quiet: false,
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        if quiet {
            Self {
                interactive: false,
                quiet: true,
            }
        } else {
            self
        }
    }
}
