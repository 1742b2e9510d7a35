//! [`Swipe`] and [`Tap`] commands: pointer gestures.
//!
//! Script syntax: `SWIPE x_start y_start x_end y_end steps` and `TAP x y`.
//! Missing or non-integer arguments make the line a no-op.

use crate::command::{Context, DuckyCommand};
use crate::error::{Error, Result};
use crate::gesture;
use crate::parser::parse_ints;
use async_trait::async_trait;

pub struct Swipe {
    pub from: (i32, i32),
    pub to: (i32, i32),
    pub steps: u32,
}

impl Swipe {
    pub const NAME: &'static str = "SWIPE";
    const USAGE: &'static str = "5 arguments: x_start y_start x_end y_end duration";
}

#[async_trait(?Send)]
impl DuckyCommand for Swipe {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(args: &str) -> Result<Self> {
        let [x0, y0, x1, y1, steps] = parse_ints::<5>(Self::NAME, Self::USAGE, args)?;
        let steps = u32::try_from(steps)
            .ok()
            .filter(|steps| *steps > 0)
            .ok_or_else(|| Error::InvalidArgument {
                command: Self::NAME,
                value: steps.to_string(),
            })?;
        Ok(Self {
            from: (x0, y0),
            to: (x1, y1),
            steps,
        })
    }

    async fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let step_pause = ctx.options().gesture_step;
        gesture::swipe(ctx.pointer(), self.from, self.to, self.steps, step_pause).await
    }
}

pub struct Tap {
    pub x: i32,
    pub y: i32,
}

impl Tap {
    pub const NAME: &'static str = "TAP";
    const USAGE: &'static str = "2 arguments: x y";
}

#[async_trait(?Send)]
impl DuckyCommand for Tap {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(args: &str) -> Result<Self> {
        let [x, y] = parse_ints::<2>(Self::NAME, Self::USAGE, args)?;
        Ok(Self { x, y })
    }

    async fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        gesture::tap(ctx.pointer(), self.x, self.y)
    }
}
