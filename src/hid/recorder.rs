//! An in-memory HID backend that records every event with a timestamp.
//!
//! Used for dry runs and tests. Timestamps come from [`tokio::time::Instant`],
//! so under a paused test clock they measure virtual time.

use super::{Indicator, Keyboard, MouseButton, Pointer};
use crate::error::Result;
use crate::hid::Hid;
use crate::keycode::Keycode;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HidEvent {
    Press(Keycode),
    ReleaseAll,
    Write(String),
    MoveTo(i32, i32),
    MoveBy(i32, i32),
    ButtonPress(MouseButton),
    ButtonRelease(MouseButton),
    /// The indicator's state after a toggle.
    LedToggle(bool),
    LedDuty(u16),
}

#[derive(Debug)]
struct Inner {
    start: Instant,
    events: Vec<(Duration, HidEvent)>,
    led_on: bool,
}

/// Shared handle to a recorded event log. Clones record into the same log.
#[derive(Debug, Clone)]
pub struct Recorder {
    inner: Arc<Mutex<Inner>>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                start: Instant::now(),
                events: Vec::new(),
                led_on: false,
            })),
        }
    }

    /// A [`Hid`] whose three ports all record into this log.
    pub fn hid(&self) -> Hid {
        Hid::new(self.clone(), self.clone(), self.clone())
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> Vec<HidEvent> {
        self.lock().events.iter().map(|(_, e)| e.clone()).collect()
    }

    /// Recorded events with their offset from when the recorder was created.
    pub fn timeline(&self) -> Vec<(Duration, HidEvent)> {
        self.lock().events.clone()
    }

    pub fn clear(&self) {
        self.lock().events.clear();
    }

    pub fn led_on(&self) -> bool {
        self.lock().led_on
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, event: HidEvent) {
        debug!(?event, "hid");
        let mut inner = self.lock();
        let at = inner.start.elapsed();
        inner.events.push((at, event));
    }
}

impl Keyboard for Recorder {
    fn press(&mut self, key: Keycode) -> Result<()> {
        self.record(HidEvent::Press(key));
        Ok(())
    }

    fn release_all(&mut self) -> Result<()> {
        self.record(HidEvent::ReleaseAll);
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.record(HidEvent::Write(text.to_string()));
        Ok(())
    }
}

impl Pointer for Recorder {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.record(HidEvent::MoveTo(x, y));
        Ok(())
    }

    fn move_by(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.record(HidEvent::MoveBy(dx, dy));
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        self.record(HidEvent::ButtonPress(button));
        Ok(())
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        self.record(HidEvent::ButtonRelease(button));
        Ok(())
    }
}

impl Indicator for Recorder {
    fn toggle(&mut self) -> Result<()> {
        let on = {
            let mut inner = self.lock();
            inner.led_on = !inner.led_on;
            inner.led_on
        };
        self.record(HidEvent::LedToggle(on));
        Ok(())
    }

    fn set_duty(&mut self, duty: u16) -> Result<()> {
        self.lock().led_on = duty > 0;
        self.record(HidEvent::LedDuty(duty));
        Ok(())
    }
}
