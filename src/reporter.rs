use std::io::Write;
use std::path::{Path, PathBuf};

use kpl_core::{ErrorKind, Location, Reporter};

/// Writes each diagnostic as `file:line:column: error: message`.
pub struct StreamReporter<W> {
    path: PathBuf,
    out: W,
}

impl<W: Write> StreamReporter<W> {
    pub fn new(path: impl AsRef<Path>, out: W) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            out,
        }
    }
}

impl<W: Write> Reporter for StreamReporter<W> {
    fn report(&mut self, kind: ErrorKind, location: Location) {
        let written = writeln!(
            self.out,
            "{}:{}:{}: error: {kind}",
            self.path.display(),
            location.line,
            location.column,
        );

        if let Err(error) = written {
            tracing::error!(%error, "failed to write diagnostic");
        }
    }
}
