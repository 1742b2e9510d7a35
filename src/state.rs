//! Mutable state shared by one invocation chain: a top-level script and
//! every script it IMPORTs.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// State threaded by reference through a run and all of its IMPORTs.
///
/// `previous_line` only changes after a non-REPEAT line executes, so a REPEAT
/// never replays another REPEAT.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionState {
    /// Pause applied after every executed line, in milliseconds.
    pub default_delay_ms: u64,
    /// The most recently executed raw line.
    pub previous_line: String,
    /// Number of IMPORTs currently being executed.
    pub import_depth: usize,
    open_scripts: Vec<PathBuf>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_delay(&self) -> Duration {
        Duration::from_millis(self.default_delay_ms)
    }

    /// Scripts currently open, outermost first.
    pub fn open_scripts(&self) -> &[PathBuf] {
        &self.open_scripts
    }

    /// Record that `script` starts running, rejecting cycles and imports
    /// nested deeper than `max_depth`.
    pub(crate) fn enter(&mut self, script: &Path, max_depth: usize) -> Result<()> {
        if self.open_scripts.iter().any(|open| open == script) {
            return Err(Error::ImportCycle(script.to_path_buf()));
        }
        if !self.open_scripts.is_empty() {
            if self.import_depth >= max_depth {
                return Err(Error::ImportDepth(max_depth));
            }
            self.import_depth += 1;
        }
        self.open_scripts.push(script.to_path_buf());
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.open_scripts.pop();
        if !self.open_scripts.is_empty() {
            self.import_depth = self.import_depth.saturating_sub(1);
        }
    }
}
