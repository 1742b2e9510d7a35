use crate::command::Context;
use crate::error::{Error, Result};
use crate::gesture::SWIPE_STEP;
use crate::hid::{Hid, Indicator};
use crate::keys::KeyResolver;
use crate::state::ExecutionState;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Default bound on nested IMPORTs below the top-level script.
pub const DEFAULT_MAX_IMPORT_DEPTH: usize = 8;

/// Ticks in one LED fade, each lasting [`FADE_TICK`].
const FADE_TICKS: u32 = 100;
const FADE_TICK: Duration = Duration::from_millis(10);

/// Settings that stay fixed for the lifetime of an [`Engine`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Directory that relative script and IMPORT paths resolve against.
    pub script_root: PathBuf,
    pub max_import_depth: usize,
    /// Pause between the steps of a SWIPE.
    pub gesture_step: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            script_root: PathBuf::from("."),
            max_import_depth: DEFAULT_MAX_IMPORT_DEPTH,
            gesture_step: SWIPE_STEP,
        }
    }
}

impl EngineOptions {
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.script_root.join(path)
        }
    }
}

/// How a top-level run ended.
#[derive(Debug)]
pub enum Outcome {
    /// The script ran to the end of the file.
    Completed,
    /// The script could not be opened; nothing ran.
    Skipped(Error),
    /// A line failed; the lines after it did not run.
    Aborted(Error),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// The script engine: owns the HID ports and runs scripts against them.
pub struct Engine {
    hid: Hid,
    keys: KeyResolver,
    options: EngineOptions,
}

impl Engine {
    /// Create an engine with the DuckyScript key aliases and default options.
    pub fn new(hid: Hid) -> Self {
        Engine {
            hid,
            keys: KeyResolver::default(),
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_key_resolver(mut self, keys: KeyResolver) -> Self {
        self.keys = keys;
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Run a script with fresh execution state.
    pub async fn run(&mut self, path: impl AsRef<Path>) -> Outcome {
        let mut state = ExecutionState::new();
        self.run_with_state(path, &mut state).await
    }

    /// Run a script with caller-provided execution state.
    ///
    /// Failures are logged and reported through the [`Outcome`], never
    /// propagated. After an aborted run every key is released.
    pub async fn run_with_state(
        &mut self,
        path: impl AsRef<Path>,
        state: &mut ExecutionState,
    ) -> Outcome {
        let path = path.as_ref();
        let result = Context::new(&mut self.hid, &self.keys, state, &self.options)
            .run_script(path)
            .await;

        match result {
            Ok(()) => {
                info!("Script completed: {}", path.display());
                Outcome::Completed
            }
            Err(err @ Error::Open { .. }) => {
                error!("{err}");
                Outcome::Skipped(err)
            }
            Err(err) => {
                error!("Error executing script {}: {err}", path.display());
                self.hid.release_inputs();
                Outcome::Aborted(err)
            }
        }
    }

    /// Run a script bracketed by an LED fade-in and fade-out.
    pub async fn run_payload(&mut self, path: impl AsRef<Path>) -> Outcome {
        info!("Starting payload execution...");
        if let Err(err) = fade_in(self.hid.indicator.as_mut()).await {
            warn!("LED feedback failed: {err}");
        }
        let outcome = self.run(path).await;
        if let Err(err) = fade_out(self.hid.indicator.as_mut()).await {
            warn!("LED feedback failed: {err}");
        }
        outcome
    }

    /// Release every key and button and switch the indicator off.
    pub fn shutdown(&mut self) -> Result<()> {
        info!("Cleaning up resources...");
        self.hid.release()?;
        info!("Resource cleanup complete");
        Ok(())
    }
}

fn fade_duty(step: u32) -> u16 {
    (step * 2 * u32::from(u16::MAX) / FADE_TICKS) as u16
}

/// Ramp the indicator up over the first half of the fade.
async fn fade_in(led: &mut dyn Indicator) -> Result<()> {
    for i in 0..FADE_TICKS {
        if i < FADE_TICKS / 2 {
            led.set_duty(fade_duty(i))?;
        }
        sleep(FADE_TICK).await;
    }
    Ok(())
}

/// Ramp the indicator down over the second half of the fade, ending dark.
async fn fade_out(led: &mut dyn Indicator) -> Result<()> {
    for i in 0..FADE_TICKS {
        if i >= FADE_TICKS / 2 {
            led.set_duty(u16::MAX - fade_duty(i - FADE_TICKS / 2))?;
        }
        sleep(FADE_TICK).await;
    }
    led.off()
}
