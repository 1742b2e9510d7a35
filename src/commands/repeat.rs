//! [`Repeat`] command: replays the previous line.
//!
//! Script syntax: `REPEAT 5`

use crate::command::{Context, DuckyCommand};
use crate::error::{Error, Result};
use crate::parser::{CommandKind, classify};
use async_trait::async_trait;
use tracing::{info, warn};

/// Re-dispatches the invocation chain's previous line `count` times, pausing
/// for the default delay after each repetition.
///
/// The engine never records a REPEAT line as the previous line, so repeats do
/// not chain.
pub struct Repeat {
    pub count: u64,
}

impl Repeat {
    pub const NAME: &'static str = "REPEAT";
}

#[async_trait(?Send)]
impl DuckyCommand for Repeat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Negative counts repeat zero times; anything else that is not an
    /// integer is a recoverable error.
    fn parse(args: &str) -> Result<Self> {
        let count: i64 = args
            .trim()
            .parse()
            .map_err(|_| Error::InvalidRepeatCount(args.to_string()))?;
        Ok(Self {
            count: count.max(0) as u64,
        })
    }

    async fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let previous = ctx.state().previous_line.clone();
        if classify(&previous).kind == CommandKind::Repeat {
            warn!("Not repeating a REPEAT line: {previous}");
            return Ok(());
        }
        for i in 0..self.count {
            info!("  Repeat {}/{}: {}", i + 1, self.count, previous);
            ctx.dispatch(&previous).await?;
            ctx.pause_default().await;
        }
        Ok(())
    }
}
