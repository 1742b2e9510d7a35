//! [`Import`] command: runs another script inline.
//!
//! Script syntax: `IMPORT other.dd`

use crate::command::{Context, DuckyCommand};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

/// Runs the named script to completion with the caller's execution state,
/// then lets the caller continue with its next line.
///
/// A nested script that cannot be opened, would recurse into a script that is
/// already running, or fails part way is abandoned with a warning; the
/// importing script carries on either way. A script that fails after it
/// started running leaves no key or button held.
pub struct Import {
    pub path: PathBuf,
}

impl Import {
    pub const NAME: &'static str = "IMPORT";
}

#[async_trait(?Send)]
impl DuckyCommand for Import {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(args: &str) -> Result<Self> {
        Ok(Self {
            path: PathBuf::from(args),
        })
    }

    async fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        if let Err(err) = ctx.run_script(&self.path).await {
            warn!("Abandoning IMPORT {}: {err}", self.path.display());
            if !matches!(
                err,
                Error::Open { .. } | Error::ImportCycle(_) | Error::ImportDepth(_)
            ) {
                ctx.release_inputs();
            }
        }
        Ok(())
    }
}
