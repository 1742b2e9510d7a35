//! Shared fixtures for unit tests that need a [`Context`].

use crate::command::Context;
use crate::engine::EngineOptions;
use crate::hid::{Hid, Recorder};
use crate::keys::KeyResolver;
use crate::state::ExecutionState;

/// Owns everything a [`Context`] borrows, with a recording HID backend.
pub(crate) struct Harness {
    pub recorder: Recorder,
    pub hid: Hid,
    pub keys: KeyResolver,
    pub state: ExecutionState,
    pub options: EngineOptions,
}

impl Harness {
    pub fn new() -> Self {
        let recorder = Recorder::new();
        Self {
            hid: recorder.hid(),
            recorder,
            keys: KeyResolver::default(),
            state: ExecutionState::new(),
            options: EngineOptions::default(),
        }
    }

    pub fn ctx(&mut self) -> Context<'_> {
        Context::new(&mut self.hid, &self.keys, &mut self.state, &self.options)
    }
}
