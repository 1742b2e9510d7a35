//! [`Print`] command: writes a diagnostic line to the log.
//!
//! Script syntax: `PRINT This is a note`

use crate::command::{Context, DuckyCommand};
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Logs `text` without producing any HID input.
pub struct Print {
    pub text: String,
}

impl Print {
    pub const NAME: &'static str = "PRINT";
}

#[async_trait(?Send)]
impl DuckyCommand for Print {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(args: &str) -> Result<Self> {
        Ok(Self {
            text: args.to_string(),
        })
    }

    async fn execute(&self, _ctx: &mut Context<'_>) -> Result<()> {
        info!("[SCRIPT]: {}", self.text);
        Ok(())
    }
}
