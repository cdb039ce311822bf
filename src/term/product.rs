//! The `Product` capability — a tagged record whose fields are its
//! children in declaration order.
//!
//! Rust has no runtime constructor lookup, so unlike a reflection-based
//! duplicator, `rebuild` here is supplied directly by the concrete type
//! (by hand, or generated by a derive-style macro). [`crate::duplicator`]
//! only adds the singleton shortcut and the arity check around it.

use std::any::TypeId;

use super::{Term, TermPtr};

pub trait Product: Term {
    /// Identifies the node's "class" for the duper's singleton-flag
    /// cache. Nodes of an enum share one `TypeId` regardless of variant;
    /// `rebuild` is still responsible for dispatching on the concrete
    /// variant via `self`.
    fn class_id(&self) -> TypeId;

    /// A human-readable class name for duplication-failure diagnostics.
    fn class_name(&self) -> &'static str;

    /// Canonical nodes (a class with exactly one inhabitant, e.g. a unit
    /// variant) reconstruct as the identity. Defaults to `false`.
    fn is_singleton(&self) -> bool {
        false
    }

    /// The fields, in declaration order.
    fn fields(&self) -> Vec<TermPtr>;

    /// Build a new node of the same concrete variant from replacement
    /// fields. Called with exactly `fields().len()` children; a mismatch
    /// is a programmer error (see [`crate::duplicator`]).
    fn rebuild(&self, fields: Vec<TermPtr>) -> TermPtr;
}
