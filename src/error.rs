//! The single structured error type the engine raises.
//!
//! Ordinary strategy control flow never produces a [`Result`]: failure is
//! `Option::None`, by design. `Error` exists only to format the one
//! unrecoverable outcome — a duplication that cannot rebuild a node — as a
//! clear diagnostic before the engine panics with it. It is never caught
//! by the strategy layer.

use miette::Diagnostic;
use thiserror::Error;

/// Programmer errors raised by the duplicator. See [`crate::duplicator`].
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("duplication failed for class {class}: expected {expected} children, got {given}")]
    #[diagnostic(code(stratum::duplication::arity))]
    DuplicationArity {
        class: String,
        expected: usize,
        given: usize,
    },

    #[error("duplication failed for class {class}: {reason}")]
    #[diagnostic(code(stratum::duplication::mismatch))]
    Duplication { class: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
