//! Picks the payload script to run from the persisted settings file.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Payload used when the settings name none.
pub const DEFAULT_PAYLOAD: &str = "payload.dd";

/// File extension of payload scripts.
pub const PAYLOAD_EXTENSION: &str = "dd";

/// The device settings file (`settings.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run the selected payload at boot without going through the menu.
    pub auto_execute: bool,
    /// File name of the selected payload, relative to the payload directory.
    pub selected_payload: String,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// The payload to run: the one named in the settings, or [`DEFAULT_PAYLOAD`]
/// when the settings file is missing, malformed, or names nothing.
pub fn select_payload(settings_path: impl AsRef<Path>, payload_dir: impl AsRef<Path>) -> PathBuf {
    let settings_path = settings_path.as_ref();
    let payload = match Settings::load(settings_path) {
        Ok(settings) if !settings.selected_payload.is_empty() => {
            info!("Selected payload from settings: {}", settings.selected_payload);
            settings.selected_payload
        }
        Ok(_) => {
            info!("No payload selected, using default payload");
            DEFAULT_PAYLOAD.to_string()
        }
        Err(err) => {
            warn!("Error reading {}: {err}", settings_path.display());
            info!("Using default payload");
            DEFAULT_PAYLOAD.to_string()
        }
    };
    payload_dir.as_ref().join(payload)
}

/// Payload file names in `dir`, sorted.
pub fn list_payloads(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let mut payloads = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == PAYLOAD_EXTENSION) {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                payloads.push(name.to_string());
            }
        }
    }
    payloads.sort();
    Ok(payloads)
}
