//! Diagnostic sinks for `debug`/`log`/`logfail`.
//!
//! An [`Emitter`] is passed explicitly into the strategies that need it —
//! there is no process-global output sink. This keeps `debug`/`log`
//! strategies pure values: two strategies built with different emitters
//! behave identically except for where their diagnostics land.

/// A sink for the text `debug`/`log`/`logfail` strategies produce.
pub trait Emitter {
    fn emit(&self, text: &str);

    fn emitln(&self, text: &str) {
        self.emit(text);
        self.emit("\n");
    }
}

/// Writes to standard output. The default emitter per the external
/// interface contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutEmitter;

impl Emitter for StdoutEmitter {
    fn emit(&self, text: &str) {
        print!("{text}");
    }
}

/// Routes emitted text through `tracing::debug!` at the default level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEmitter;

impl Emitter for TracingEmitter {
    fn emit(&self, text: &str) {
        tracing::debug!("{}", text);
    }

    fn emitln(&self, text: &str) {
        tracing::debug!("{}", text);
    }
}

/// Discards everything. Useful for benchmarks and tests that want
/// `debug`/`log` wired up without caring about their output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEmitter;

impl Emitter for NullEmitter {
    fn emit(&self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingEmitter(Rc<RefCell<String>>);

    impl Emitter for RecordingEmitter {
        fn emit(&self, text: &str) {
            self.0.borrow_mut().push_str(text);
        }
    }

    #[test]
    fn emitln_appends_newline() {
        let buf = Rc::new(RefCell::new(String::new()));
        let emitter = RecordingEmitter(buf.clone());
        emitter.emitln("hello");
        assert_eq!(*buf.borrow(), "hello\n");
    }

    #[test]
    fn null_emitter_discards() {
        NullEmitter.emitln("ignored");
    }

    #[test_log::test]
    fn tracing_emitter_routes_through_tracing_without_a_trailing_newline() {
        // `tracing::debug!` frames each call as its own event, so unlike
        // the other emitters `emitln` must not append "\n" itself.
        TracingEmitter.emitln("routed via tracing");
    }
}
