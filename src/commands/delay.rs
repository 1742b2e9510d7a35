//! [`Delay`] and [`DefaultDelay`] commands: one-shot and persistent pauses.
//!
//! Script syntax: `DELAY 500` (milliseconds, fractions allowed) and
//! `DEFAULT_DELAY 5` / `DEFAULTDELAY 5` (tens of milliseconds).

use crate::command::{Context, DuckyCommand};
use crate::error::{Error, Result};
use crate::parser::parse_millis;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Pauses execution for a fixed duration before running the next command.
pub struct Delay {
    pub duration: Duration,
}

impl Delay {
    pub const NAME: &'static str = "DELAY";
}

#[async_trait(?Send)]
impl DuckyCommand for Delay {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(args: &str) -> Result<Self> {
        Ok(Self {
            duration: parse_millis(Self::NAME, args)?,
        })
    }

    async fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        ctx.pause(self.duration).await;
        Ok(())
    }
}

/// Sets the pause applied after every following line of the invocation chain.
pub struct DefaultDelay {
    /// The script value; the delay is `units * SCALE` milliseconds.
    pub units: u64,
}

impl DefaultDelay {
    pub const NAME: &'static str = "DEFAULT_DELAY";
    pub const ALT_NAME: &'static str = "DEFAULTDELAY";
    /// Milliseconds per script unit.
    pub const SCALE: u64 = 10;

    pub fn millis(&self) -> u64 {
        self.units.saturating_mul(Self::SCALE)
    }
}

#[async_trait(?Send)]
impl DuckyCommand for DefaultDelay {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(args: &str) -> Result<Self> {
        let units = args.trim().parse().map_err(|_| Error::InvalidDelay {
            command: Self::NAME,
            value: args.to_string(),
        })?;
        Ok(Self { units })
    }

    async fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        ctx.state_mut().default_delay_ms = self.millis();
        debug!(ms = self.millis(), "default delay set");
        Ok(())
    }
}
