//! Pointer gestures built from primitive pointer moves and button presses.

use crate::error::Result;
use crate::hid::{MouseButton, Pointer};
use std::time::Duration;

/// Pause between the steps of a [`swipe`].
pub const SWIPE_STEP: Duration = Duration::from_millis(10);

/// Move to `(x, y)` and click the primary button, with no pause in between.
pub fn tap(pointer: &mut dyn Pointer, x: i32, y: i32) -> Result<()> {
    pointer.move_to(x, y)?;
    pointer.press(MouseButton::Left)?;
    pointer.release(MouseButton::Left)
}

/// Drag from `from` towards `to` in `steps` relative moves, holding the
/// primary button and pausing `step_pause` after each move.
///
/// Each step moves by the integer-truncated per-step delta, so rounding error
/// accumulates and the pointer can stop a few pixels short of `to`.
pub async fn swipe(
    pointer: &mut dyn Pointer,
    from: (i32, i32),
    to: (i32, i32),
    steps: u32,
    step_pause: Duration,
) -> Result<()> {
    pointer.move_to(from.0, from.1)?;
    pointer.press(MouseButton::Left)?;
    if steps > 0 {
        let dx = step_delta(from.0, to.0, steps);
        let dy = step_delta(from.1, to.1, steps);
        for _ in 0..steps {
            pointer.move_by(dx, dy)?;
            tokio::time::sleep(step_pause).await;
        }
    }
    pointer.release(MouseButton::Left)
}

fn step_delta(start: i32, end: i32, steps: u32) -> i32 {
    let delta = (i64::from(end) - i64::from(start)) / i64::from(steps);
    delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
