//! The [`DuckyCommand`] trait and the [`Context`] type commands receive when executed.

use crate::engine::EngineOptions;
use crate::error::{Error, Result};
use crate::hid::{Hid, Indicator, Keyboard, Pointer};
use crate::keys::KeyResolver;
use crate::parser::{self, CommandKind, Line};
use crate::state::ExecutionState;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Execution context passed to [`DuckyCommand::execute`].
///
/// Borrows the HID ports, the key resolver and the [`ExecutionState`] of the
/// current invocation chain. IMPORT runs nested scripts through the same
/// context, so the state is shared rather than copied.
pub struct Context<'a> {
    pub(crate) hid: &'a mut Hid,
    pub(crate) keys: &'a KeyResolver,
    pub(crate) state: &'a mut ExecutionState,
    pub(crate) options: &'a EngineOptions,
}

impl<'a> Context<'a> {
    pub fn new(
        hid: &'a mut Hid,
        keys: &'a KeyResolver,
        state: &'a mut ExecutionState,
        options: &'a EngineOptions,
    ) -> Self {
        Self {
            hid,
            keys,
            state,
            options,
        }
    }

    pub fn keyboard(&mut self) -> &mut dyn Keyboard {
        self.hid.keyboard.as_mut()
    }

    pub fn pointer(&mut self) -> &mut dyn Pointer {
        self.hid.pointer.as_mut()
    }

    pub fn indicator(&mut self) -> &mut dyn Indicator {
        self.hid.indicator.as_mut()
    }

    /// Release every held key and pointer button.
    pub fn release_inputs(&mut self) {
        self.hid.release_inputs();
    }

    pub fn keys(&self) -> &KeyResolver {
        self.keys
    }

    pub fn state(&self) -> &ExecutionState {
        self.state
    }

    pub fn state_mut(&mut self) -> &mut ExecutionState {
        self.state
    }

    pub fn options(&self) -> &EngineOptions {
        self.options
    }

    /// Suspend the script for `duration`. Zero returns immediately.
    pub async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    /// Suspend for the current default delay.
    pub async fn pause_default(&self) {
        self.pause(self.state.default_delay()).await;
    }

    /// Run the script at `path` to completion with this context's state.
    ///
    /// Relative paths resolve against [`EngineOptions::script_root`]. Fails if
    /// the file cannot be opened, if it is already running further up the
    /// chain, if the import depth limit is reached, or if any line fails with
    /// a non-recoverable error.
    pub async fn run_script(&mut self, path: &Path) -> Result<()> {
        let path = self.options.resolve(path);
        info!("Executing script: {}", path.display());

        let file = File::open(&path).await.map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        let canonical = tokio::fs::canonicalize(&path)
            .await
            .unwrap_or_else(|_| path.clone());
        self.state.enter(&canonical, self.options.max_import_depth)?;

        let result = self.run_lines(BufReader::new(file)).await;
        self.state.leave();
        result
    }

    async fn run_lines(&mut self, reader: BufReader<File>) -> Result<()> {
        let mut lines = reader.lines();
        let mut line_number = 0;
        while let Some(line) = lines.next_line().await? {
            line_number += 1;
            let line = line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            info!("Line {line_number}: {line}");
            self.execute_line(line).await?;
            self.pause_default().await;
        }
        Ok(())
    }

    async fn execute_line(&mut self, line: &str) -> Result<()> {
        let classified = parser::classify(line);
        let remember = classified.kind != CommandKind::Repeat;
        self.execute(classified).await?;
        if remember {
            self.state.previous_line = line.to_string();
        }
        Ok(())
    }

    /// Classify and execute one line without touching `previous_line` or
    /// applying the default delay.
    pub async fn dispatch(&mut self, line: &str) -> Result<()> {
        self.execute(parser::classify(line)).await
    }

    async fn execute(&mut self, line: Line<'_>) -> Result<()> {
        match parser::parse_classified(line) {
            Ok(command) => command.execute(self).await,
            Err(err) if err.is_recoverable() => {
                warn!("{err}");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// A single script command.
///
/// Implement this trait to add a new command to the engine. Then:
///
/// 1. Define `pub const NAME: &'static str` on your struct: the script
///    keyword (e.g. `"DELAY"`, `"STRING"`).
/// 2. Re-export the struct from `src/commands/mod.rs`.
/// 3. Add a [`CommandKind`] variant, its keyword entry in
///    [`crate::parser`], and map the variant to `MyCmd::parse_boxed`.
#[async_trait(?Send)]
pub trait DuckyCommand: 'static {
    /// The command name, accessible at runtime through a trait object.
    ///
    /// Implementations should return their `NAME` constant:
    /// `fn name(&self) -> &'static str { Self::NAME }`.
    fn name(&self) -> &'static str;

    /// Parse this command from its argument string (the line with the keyword
    /// and one delimiter removed).
    fn parse(args: &str) -> Result<Self>
    where
        Self: Sized;

    /// Parse and box this command. Used as the function-pointer type stored in
    /// the command registry; the default implementation calls [`parse`](Self::parse)
    /// and boxes the result.
    fn parse_boxed(args: &str) -> Result<Box<dyn DuckyCommand>>
    where
        Self: Sized,
    {
        Ok(Box::new(Self::parse(args)?))
    }

    /// Execute the command using the provided engine context.
    async fn execute(&self, ctx: &mut Context<'_>) -> Result<()>;
}
