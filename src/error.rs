//! Error type shared by the parser, the engine and the HID backends.

use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for the ducky crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for script execution.
#[derive(Debug, Error)]
pub enum Error {
    /// The script (top-level or an IMPORT target) could not be opened.
    #[error("Error opening script file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the open script failed part way through (including invalid UTF-8).
    #[error("Error reading script: {0}")]
    Io(#[from] io::Error),

    /// A DELAY or DEFAULT_DELAY value that is not a usable number.
    #[error("Invalid {command} value: {value:?}")]
    InvalidDelay { command: &'static str, value: String },

    #[error("Invalid REPEAT count: {0}")]
    InvalidRepeatCount(String),

    /// A gesture command with fewer arguments than it needs.
    #[error("{command} command requires {usage}")]
    MissingArguments {
        command: &'static str,
        usage: &'static str,
    },

    /// A gesture argument that is not an integer (or a zero step count).
    #[error("Invalid {command} argument: {value:?}")]
    InvalidArgument { command: &'static str, value: String },

    #[error("IMPORT depth limit of {0} reached")]
    ImportDepth(usize),

    #[error("IMPORT cycle: {} is already running", .0.display())]
    ImportCycle(PathBuf),

    /// The keyboard report has no free slot for another non-modifier key.
    #[error("Trying to press more than six keys at once")]
    TooManyKeys,

    #[error("Character {0:?} cannot be typed with the US layout")]
    Untypeable(char),

    /// Writing to an HID device or the indicator failed.
    #[error("{device} error: {source}")]
    Device {
        device: String,
        #[source]
        source: io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

impl Error {
    /// Errors that turn the offending command into a no-op; execution continues
    /// with the next line.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidRepeatCount(_)
                | Self::MissingArguments { .. }
                | Self::InvalidArgument { .. }
        )
    }

    /// Wrap an I/O failure on a named device.
    pub fn device(device: impl Into<String>, source: io::Error) -> Self {
        Self::Device {
            device: device.into(),
            source,
        }
    }
}
