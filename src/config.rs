//! Construction-time configuration for a rewriting session.
//!
//! There is no file format or environment-variable surface here — just a
//! typed builder struct, in keeping with the rest of the engine's "no
//! global state" stance (see [`crate::emitter`]).

use std::rc::Rc;

use crate::emitter::{Emitter, StdoutEmitter};

/// Knobs a host program sets once when wiring up `debug`/`log`/`memo`
/// strategies.
#[derive(Clone)]
pub struct RewriteConfig {
    emitter: Rc<dyn Emitter>,
    memo_enabled: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            emitter: Rc::new(StdoutEmitter),
            memo_enabled: true,
        }
    }
}

impl RewriteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_emitter(mut self, emitter: Rc<dyn Emitter>) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn with_memo_enabled(mut self, enabled: bool) -> Self {
        self.memo_enabled = enabled;
        self
    }

    pub fn emitter(&self) -> Rc<dyn Emitter> {
        self.emitter.clone()
    }

    pub fn memo_enabled(&self) -> bool {
        self.memo_enabled
    }
}
