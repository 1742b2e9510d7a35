//! [`Led`] command: toggles the board indicator.
//!
//! Script syntax: `LED`

use crate::command::{Context, DuckyCommand};
use crate::error::Result;
use async_trait::async_trait;

pub struct Led;

impl Led {
    pub const NAME: &'static str = "LED";
}

#[async_trait(?Send)]
impl DuckyCommand for Led {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(_args: &str) -> Result<Self> {
        Ok(Self)
    }

    async fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        ctx.indicator().toggle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Harness;

    #[tokio::test]
    async fn test_toggles() {
        let mut harness = Harness::new();
        Led.execute(&mut harness.ctx()).await.unwrap();
        assert!(harness.recorder.led_on());
        Led.execute(&mut harness.ctx()).await.unwrap();
        assert!(!harness.recorder.led_on());
    }
}
