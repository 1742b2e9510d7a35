//! Linux USB HID gadget backend.
//!
//! Reports are written to the `/dev/hidgN` character devices created by a
//! configfs HID gadget: an 8-byte boot keyboard report and a 4-byte relative
//! mouse report (buttons, dx, dy, wheel). The LED is a sysfs LED class device.

use super::{Indicator, Keyboard, MouseButton, Pointer, us_layout};
use crate::error::{Error, Result};
use crate::keycode::Keycode;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest movement a single relative mouse report can carry on either axis.
const MAX_STEP: i32 = 127;

fn open_device(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|e| Error::device(path.display().to_string(), e))
}

/// Boot-protocol keyboard on a HID gadget device.
pub struct GadgetKeyboard {
    device: File,
    path: PathBuf,
    report: [u8; 8],
}

impl GadgetKeyboard {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        Ok(Self {
            device: open_device(&path)?,
            path,
            report: [0; 8],
        })
    }

    fn send(&mut self) -> Result<()> {
        debug!(report = ?self.report, "keyboard report");
        self.device
            .write_all(&self.report)
            .map_err(|e| Error::device(self.path.display().to_string(), e))
    }
}

impl Keyboard for GadgetKeyboard {
    fn press(&mut self, key: Keycode) -> Result<()> {
        if let Some(bit) = key.modifier_bit() {
            self.report[0] |= bit;
        } else {
            let usage = key.usage();
            let slots = &mut self.report[2..];
            if !slots.contains(&usage) {
                let free = slots.iter_mut().find(|slot| **slot == 0).ok_or(Error::TooManyKeys)?;
                *free = usage;
            }
        }
        self.send()
    }

    fn release_all(&mut self) -> Result<()> {
        self.report = [0; 8];
        self.send()
    }

    fn write(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            let (key, shift) = us_layout(ch).ok_or(Error::Untypeable(ch))?;
            if shift {
                self.press(Keycode::LeftShift)?;
            }
            self.press(key)?;
            self.release_all()?;
        }
        Ok(())
    }
}

/// Relative mouse on a HID gadget device.
///
/// USB mice only report relative motion, so [`Pointer::move_to`] moves by
/// `(x, y)` from the current position.
pub struct GadgetMouse {
    device: File,
    path: PathBuf,
    buttons: u8,
}

impl GadgetMouse {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        Ok(Self {
            device: open_device(&path)?,
            path,
            buttons: 0,
        })
    }

    fn send(&mut self, dx: i32, dy: i32) -> Result<()> {
        let report = [self.buttons, dx as i8 as u8, dy as i8 as u8, 0];
        debug!(?report, "mouse report");
        self.device
            .write_all(&report)
            .map_err(|e| Error::device(self.path.display().to_string(), e))
    }
}

impl Pointer for GadgetMouse {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.move_by(x, y)
    }

    fn move_by(&mut self, mut dx: i32, mut dy: i32) -> Result<()> {
        while dx != 0 || dy != 0 {
            let step_x = dx.clamp(-MAX_STEP, MAX_STEP);
            let step_y = dy.clamp(-MAX_STEP, MAX_STEP);
            self.send(step_x, step_y)?;
            dx -= step_x;
            dy -= step_y;
        }
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        self.buttons |= button.mask();
        self.send(0, 0)
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        self.buttons &= !button.mask();
        self.send(0, 0)
    }
}

/// An LED exposed under `/sys/class/leds/<name>`.
pub struct SysfsLed {
    brightness: PathBuf,
    max: u32,
    on: bool,
}

impl SysfsLed {
    pub fn open(name: &str) -> Result<Self> {
        Self::open_at(Path::new("/sys/class/leds").join(name))
    }

    /// Open the LED class directory at `dir` (the one holding `brightness`).
    pub fn open_at(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let max = std::fs::read_to_string(dir.join("max_brightness"))
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1);
        let mut led = Self {
            brightness: dir.join("brightness"),
            max,
            on: false,
        };
        led.write_level(0)?;
        Ok(led)
    }

    fn write_level(&mut self, level: u32) -> Result<()> {
        std::fs::write(&self.brightness, format!("{level}\n"))
            .map_err(|e| Error::device(self.brightness.display().to_string(), e))?;
        self.on = level > 0;
        Ok(())
    }
}

impl Indicator for SysfsLed {
    fn toggle(&mut self) -> Result<()> {
        let level = if self.on { 0 } else { self.max };
        self.write_level(level)
    }

    fn set_duty(&mut self, duty: u16) -> Result<()> {
        let level = u32::from(duty) * self.max / u32::from(u16::MAX);
        self.write_level(level)
    }
}
