//! HID emulation ports.
//!
//! The engine never talks to hardware directly. It drives three capabilities
//! supplied by the platform: a [`Keyboard`], a [`Pointer`] and an
//! [`Indicator`]. [`Hid`] bundles one of each for the engine to borrow.

mod gadget;
mod layout;
mod recorder;

pub use gadget::{GadgetKeyboard, GadgetMouse, SysfsLed};
pub use layout::us_layout;
pub use recorder::{HidEvent, Recorder};

use crate::error::Result;
use crate::keycode::Keycode;
use tracing::{debug, warn};

/// Press/release key sets and type literal text.
pub trait Keyboard {
    /// Add `key` to the set of currently held keys.
    fn press(&mut self, key: Keycode) -> Result<()>;

    /// Release every held key at once.
    fn release_all(&mut self) -> Result<()>;

    /// Type `text` as a sequence of keystrokes.
    fn write(&mut self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Bit in the mouse report's button byte.
    pub const fn mask(self) -> u8 {
        match self {
            Self::Left => 0x01,
            Self::Right => 0x02,
            Self::Middle => 0x04,
        }
    }
}

/// Move the pointer and press/release its buttons.
pub trait Pointer {
    /// Place the pointer at `(x, y)`.
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Move the pointer by `(dx, dy)` from where it is now.
    fn move_by(&mut self, dx: i32, dy: i32) -> Result<()>;

    fn press(&mut self, button: MouseButton) -> Result<()>;

    fn release(&mut self, button: MouseButton) -> Result<()>;

    fn release_all(&mut self) -> Result<()> {
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            self.release(button)?;
        }
        Ok(())
    }
}

/// A single indicator output (the board LED).
pub trait Indicator {
    /// Flip between fully on and off.
    fn toggle(&mut self) -> Result<()>;

    /// Set brightness as a 16-bit PWM duty cycle.
    fn set_duty(&mut self, duty: u16) -> Result<()>;

    fn off(&mut self) -> Result<()> {
        self.set_duty(0)
    }
}

/// An indicator for boards without one; state changes are only logged.
#[derive(Debug, Default)]
pub struct NullIndicator {
    on: bool,
}

impl Indicator for NullIndicator {
    fn toggle(&mut self) -> Result<()> {
        self.on = !self.on;
        debug!("led {}", if self.on { "on" } else { "off" });
        Ok(())
    }

    fn set_duty(&mut self, duty: u16) -> Result<()> {
        self.on = duty > 0;
        Ok(())
    }
}

/// The set of HID ports the engine drives.
pub struct Hid {
    pub keyboard: Box<dyn Keyboard>,
    pub pointer: Box<dyn Pointer>,
    pub indicator: Box<dyn Indicator>,
}

impl Hid {
    pub fn new(
        keyboard: impl Keyboard + 'static,
        pointer: impl Pointer + 'static,
        indicator: impl Indicator + 'static,
    ) -> Self {
        Self {
            keyboard: Box::new(keyboard),
            pointer: Box::new(pointer),
            indicator: Box::new(indicator),
        }
    }

    /// Let go of every key and button and switch the indicator off.
    pub fn release(&mut self) -> Result<()> {
        self.keyboard.release_all()?;
        self.pointer.release_all()?;
        self.indicator.off()
    }

    /// Let go of every key and button, leaving the indicator as it is.
    /// Failures are logged, not returned.
    pub fn release_inputs(&mut self) {
        if let Err(err) = self.keyboard.release_all() {
            warn!("Failed to release keys: {err}");
        }
        if let Err(err) = self.pointer.release_all() {
            warn!("Failed to release pointer buttons: {err}");
        }
    }
}
