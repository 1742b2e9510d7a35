//! [`Rem`] command: comments and blank lines.

use crate::command::{Context, DuckyCommand};
use crate::error::Result;
use async_trait::async_trait;

/// Does nothing.
pub struct Rem;

impl Rem {
    pub const NAME: &'static str = "REM";
}

#[async_trait(?Send)]
impl DuckyCommand for Rem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(_args: &str) -> Result<Self> {
        Ok(Self)
    }

    async fn execute(&self, _ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }
}
