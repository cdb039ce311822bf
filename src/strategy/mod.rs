//! The `Strategy` algebra: core combinators, rule builders, one-level
//! traversals, compound traversal/control combinators, and query
//! aggregators.

pub mod builders;
pub mod combinators;
pub mod core;
pub mod query;
pub mod traversal;

pub use core::{choice, fail, guarded, id, inclusive, mk, recursive, seq, Strategy};
