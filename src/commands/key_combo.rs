//! [`KeyCombo`] command: presses a chord of keys.
//!
//! Script syntax: any line that is not a keyword, e.g. `CTRL ALT DELETE`.

use crate::command::{Context, DuckyCommand};
use crate::error::Result;
use async_trait::async_trait;
use tracing::warn;

/// Presses every resolved key in order, then releases them all at once.
///
/// Unknown tokens are reported and skipped. A line with no known keys sends
/// nothing.
pub struct KeyCombo {
    pub line: String,
}

impl KeyCombo {
    pub const NAME: &'static str = "KEY_COMBO";
}

#[async_trait(?Send)]
impl DuckyCommand for KeyCombo {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(args: &str) -> Result<Self> {
        Ok(Self {
            line: args.to_string(),
        })
    }

    async fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let combo = ctx.keys().resolve_line(&self.line);
        for token in &combo.unknown {
            warn!("Unknown key: <{token}>");
        }
        if combo.is_empty() {
            return Ok(());
        }
        let keyboard = ctx.keyboard();
        for key in combo.keys {
            keyboard.press(key)?;
        }
        keyboard.release_all()
    }
}
