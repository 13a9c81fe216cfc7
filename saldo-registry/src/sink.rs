use std::path::{Path, PathBuf};

use tracing::info;

use crate::{SinkError, SinkResult};

const MINOR_PER_MAJOR: i64 = 100;

/// Publishes the aggregate total to a file, overwriting previous content.
/// The file holds the major-unit value followed by a newline so it can be
/// slotted directly into a status bar widget.
#[derive(Debug)]
pub struct TotalSink {
    path: PathBuf,
}

impl TotalSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `total` (minor units) to the sink. Truncates toward zero when
    /// converting to major units, matching the provider's integer math.
    pub fn publish(&self, total: i64) -> SinkResult<()> {
        info!(total, "balance updated");
        let rendered = format!("{}\n", total / MINOR_PER_MAJOR);
        std::fs::write(&self.path, rendered).map_err(|source| SinkError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
