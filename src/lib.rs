//! # Ducky
//!
//! A DuckyScript engine that replays keystroke and gesture scripts as USB
//! keyboard and mouse input.
//!
//! Scripts are plain text, one command per line. Lines are classified by
//! keyword, dispatched to a command, and executed against a set of HID ports
//! supplied by the platform (a Linux USB gadget, or an in-memory recorder for
//! dry runs and tests).
//!
//! ## Quick start
//!
//! ```no_run
//! use ducky::{Engine, hid::Recorder};
//!
//! #[tokio::main]
//! async fn main() {
//!     let recorder = Recorder::new();
//!     let mut engine = Engine::new(recorder.hid());
//!     let outcome = engine.run("payloads/payload.dd").await;
//!     println!("{outcome:?}: {} HID events", recorder.events().len());
//! }
//! ```
//!
//! ## Script syntax
//!
//! | Command | Description |
//! |---------|-------------|
//! | `REM text` | Comment |
//! | `DELAY 500` | Pause for 500 ms (fractions allowed) |
//! | `DEFAULT_DELAY 5` / `DEFAULTDELAY 5` | Pause 50 ms after every following line |
//! | `STRING text` | Type `text` |
//! | `PRINT text` | Log `text` |
//! | `IMPORT other.dd` | Run another script with the same state |
//! | `REPEAT 3` | Run the previous line 3 more times |
//! | `LED` | Toggle the board LED |
//! | `SWIPE x0 y0 x1 y1 steps` | Drag with the primary button held |
//! | `TAP x y` | Click at `(x, y)` |
//! | `CTRL ALT DELETE` | Any other line: press the keys together, then release |
//!
//! ## Implementing a custom command
//!
//! Implement [`DuckyCommand`] to add new commands to the engine:
//!
//! ```no_run
//! use ducky::command::{Context, DuckyCommand};
//! use ducky::keycode::Keycode;
//! use ducky::Result;
//! use async_trait::async_trait;
//!
//! pub struct Enter;
//!
//! impl Enter {
//!     pub const NAME: &'static str = "ENTERKEY";
//! }
//!
//! #[async_trait(?Send)]
//! impl DuckyCommand for Enter {
//!     fn name(&self) -> &'static str { Self::NAME }
//!
//!     fn parse(_args: &str) -> Result<Self> {
//!         Ok(Self)
//!     }
//!
//!     async fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
//!         ctx.keyboard().press(Keycode::Enter)?;
//!         ctx.keyboard().release_all()
//!     }
//! }
//! ```

pub mod command;
pub mod commands;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod hid;
pub mod keycode;
pub mod keys;
pub mod parser;
pub mod selector;
pub mod state;
#[cfg(test)]
mod test_support;

pub use command::{Context, DuckyCommand};
pub use engine::{Engine, EngineOptions, Outcome};
pub use error::{Error, Result};
pub use keycode::Keycode;
pub use keys::{KeyCombination, KeyResolver};
pub use parser::{CommandKind, classify, parse_line};
pub use state::ExecutionState;
