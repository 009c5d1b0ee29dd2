use std::io::{self, Write};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use super::Context;

/// One tick per snapshot base path.
pub struct PathBar {
    bar: ProgressBar,
    start: Instant,
}

impl PathBar {
    fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {bar:30.cyan} {pos}/{len} {msg}")
                .expect("invalid template"),
        );
        Self {
            bar,
            start: Instant::now(),
        }
    }

    fn begin_path(&mut self, base: &str) {
        self.bar.set_message(base.to_string());
        self.bar.inc(1);
    }

    fn finish(self) {
        let total = self.bar.length().unwrap_or(0);
        self.bar.finish_and_clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  Converted {} snapshot path(s) in {:.2}s",
            total,
            self.start.elapsed().as_secs_f64()
        );
    }
}

pub enum Progress {
    Interactive(PathBar),
    /// Non-terminal stderr: one plain line per path, greppable in logs.
    Plain,
    Silent,
}

impl Progress {
    pub fn new(ctx: &Context, total: usize) -> Self {
        if ctx.quiet {
            Self::Silent
        } else if ctx.interactive {
            Self::Interactive(PathBar::new(total))
        } else {
            Self::Plain
        }
    }

    pub fn begin_path(&mut self, base: &str) {
        match self {
            Self::Interactive(bar) => bar.begin_path(base),
            Self::Plain => {
                let mut stderr = io::stderr().lock();
                let _ = writeln!(stderr, "convert {}", base);
            }
            Self::Silent => {}
        }
    }

    pub fn finish(self) {
        match self {
            Self::Interactive(bar) => bar.finish(),
            Self::Plain | Self::Silent => {}
        }
    }
}
