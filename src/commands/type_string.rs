//! [`TypeString`] command: types literal text through the keyboard layout.
//!
//! Script syntax: `STRING text here`

use crate::command::{Context, DuckyCommand};
use crate::error::Result;
use async_trait::async_trait;

/// Types `text` as keystrokes. Everything after `STRING` and its single
/// separator is typed, including further leading spaces.
pub struct TypeString {
    pub text: String,
}

impl TypeString {
    pub const NAME: &'static str = "STRING";

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait(?Send)]
impl DuckyCommand for TypeString {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(args: &str) -> Result<Self> {
        Ok(Self::new(args))
    }

    async fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        ctx.keyboard().write(&self.text)
    }
}
