//! `stratum` — a strategic term rewriting engine.
//!
//! A [`strategy::Strategy`] is a named, composable partial function from
//! a [`term::TermPtr`] to itself: it either succeeds with a (possibly
//! transformed) term, or fails. Complex rewrites are built by combining a
//! handful of primitives (`id`, `fail`, `seq`, `choice`) with generic
//! traversals (`all`, `one`, `some`, `child`, `congruence`) and a library
//! of named compound combinators (`topdown`, `bottomup`, `innermost`,
//! `repeat`, ...), without the engine ever needing to know a host node
//! type's constructors ahead of time.
//!
//! # Layout
//!
//! - [`term`]: the [`term::Term`] trait and its four shape capabilities
//!   (`Rewritable`, `Product`, `Mapping`, `Sequence`), tested in that
//!   fixed precedence order.
//! - [`duplicator`]: rebuilds a `Product` node from replacement
//!   children, handling the singleton and arity-check cases the rest of
//!   the crate assumes.
//! - [`strategy`]: the `Strategy` core, rule builders, one-level
//!   traversals, compound combinators, and query aggregators.
//! - [`config`]: construction-time knobs (`RewriteConfig`) for a
//!   rewriting session.
//! - [`emitter`]: the diagnostic sink `debug`/`log`/`logfail` write to.
//! - [`error`]: the single structured error type, raised only for the
//!   one unrecoverable outcome (duplication failure).
//! - [`macros`]: `impl_term_as_*!` boilerplate generators for wiring a
//!   concrete node type's `Term` impl to whichever shape it implements.
//! - [`prelude`]: a single `use stratum::prelude::*` surface.
//!
//! Out of scope: parsing, pretty-printing, diagnostic rendering, a
//! driver/REPL, language-server wiring, source position bookkeeping,
//! and any example source language. This crate is the rewriting engine
//! those would be built on top of, not those things themselves.

pub mod config;
pub mod duplicator;
pub mod emitter;
pub mod error;
#[macro_use]
pub mod macros;
pub mod prelude;
pub mod strategy;
pub mod term;

pub use error::{Error, Result};
