//! Term reflection — the universal view of values the engine rewrites.
//!
//! A [`Term`] exposes whichever of four *shapes* (tested in this fixed
//! order) its concrete type implements: [`Rewritable`] (a host capability),
//! [`Product`] (a tagged record), [`Mapping`] (key/value pairs), or
//! [`Sequence`] (an ordered list). A value exposing none of them is
//! *opaque*: it has zero children and traversals pass straight through it.
//!
//! Every traversal in the crate funnels through [`shape_of`],
//! [`children_of`] and [`rebuild_with_children`] rather than re-deciding
//! shape precedence itself.

mod atom;
mod mapping;
mod product;
mod rewritable;
mod sequence;

pub use atom::{atom, downcast_atom, unwrap_primitive, Atom};
pub use mapping::{Mapping, Pair};
pub use product::Product;
pub use rewritable::Rewritable;
pub use sequence::Sequence;

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// A rewritable value. Object-safe so it can live behind an [`Rc`].
///
/// Concrete node types implement one of [`Rewritable`], [`Product`],
/// [`Mapping`] or [`Sequence`] and then wire up `Term` with the matching
/// `impl_term_as_*!` macro from [`crate::macros`] — Rust has no runtime
/// reflection, so this glue has to be written (or macro-generated) once
/// per type.
pub trait Term: fmt::Debug {
    /// Escape hatch for the type-filtered builders (`rule`, `query`, ...),
    /// which downcast to a concrete type and fail (not panic) on a miss.
    fn as_any(&self) -> &dyn Any;

    fn as_rewritable(&self) -> Option<&dyn Rewritable> {
        None
    }

    fn as_product(&self) -> Option<&dyn Product> {
        None
    }

    fn as_mapping(&self) -> Option<&dyn Mapping> {
        None
    }

    fn as_sequence(&self) -> Option<&dyn Sequence> {
        None
    }
}

/// A reference-counted handle to a [`Term`].
///
/// `Rc`, not `Arc`: the engine is single-threaded (see `src/lib.rs`), and
/// `Rc::ptr_eq` is exactly the cheap reference-equality test the
/// no-change invariant relies on.
pub type TermPtr = Rc<dyn Term>;

/// Which of the four shapes a term exposes, in detection-precedence order.
pub enum Shape<'a> {
    Rewritable(&'a dyn Rewritable),
    Product(&'a dyn Product),
    Mapping(&'a dyn Mapping),
    Sequence(&'a dyn Sequence),
    Opaque,
}

/// Classify a term's shape. Rewritable beats Product beats Mapping beats
/// Sequence — a type implementing more than one is unusual but not
/// forbidden.
pub fn shape_of(t: &TermPtr) -> Shape<'_> {
    if let Some(r) = t.as_rewritable() {
        return Shape::Rewritable(r);
    }
    if let Some(p) = t.as_product() {
        return Shape::Product(p);
    }
    if let Some(m) = t.as_mapping() {
        return Shape::Mapping(m);
    }
    if let Some(s) = t.as_sequence() {
        return Shape::Sequence(s);
    }
    Shape::Opaque
}

/// The ordered children of a term under its detected shape. Opaque terms
/// have no children.
pub fn children_of(t: &TermPtr) -> Vec<TermPtr> {
    match shape_of(t) {
        Shape::Rewritable(r) => r.deconstruct(),
        Shape::Product(p) => p.fields(),
        Shape::Mapping(m) => m.pairs(),
        Shape::Sequence(s) => s.elements(),
        Shape::Opaque => Vec::new(),
    }
}

/// Rebuild `t` with `children` as its new children, dispatching to the
/// shape-appropriate reconstruction path. Callers are responsible for the
/// no-op/reference-equality shortcut; this function always (re)builds.
pub fn rebuild_with_children(t: &TermPtr, children: Vec<TermPtr>) -> TermPtr {
    match shape_of(t) {
        Shape::Rewritable(r) => r.reconstruct(children),
        Shape::Product(_) => crate::duplicator::duplicate(t, children),
        Shape::Mapping(m) => m.rebuild(children),
        Shape::Sequence(_) => Rc::new(children) as TermPtr,
        Shape::Opaque => t.clone(),
    }
}

/// Number of children a term exposes under its detected shape.
pub fn arity_of(t: &TermPtr) -> usize {
    match shape_of(t) {
        Shape::Rewritable(r) => r.arity(),
        Shape::Product(p) => p.fields().len(),
        Shape::Mapping(m) => m.pairs().len(),
        Shape::Sequence(s) => s.elements().len(),
        Shape::Opaque => 0,
    }
}

/// Structural equality good enough for the `term(t)` builder. There is no
/// universal `Eq` over `dyn Term`, so we fall back to comparing debug
/// renderings — acceptable for the builder's purpose (matching a literal
/// subject against a known constant) and cheap relative to a traversal.
pub fn term_eq(a: &TermPtr, b: &TermPtr) -> bool {
    Rc::ptr_eq(a, b) || format!("{a:?}") == format!("{b:?}")
}

impl Term for Vec<TermPtr> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_sequence(&self) -> Option<&dyn Sequence> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::atom;

    #[test]
    fn opaque_values_have_no_children() {
        let leaf = atom(7i64);
        assert!(matches!(shape_of(&leaf), Shape::Opaque));
        assert!(children_of(&leaf).is_empty());
        assert_eq!(arity_of(&leaf), 0);
    }

    #[test]
    fn sequences_are_detected_and_rebuilt() {
        let list: TermPtr = Rc::new(vec![atom(1i64), atom(2i64)]);
        assert!(matches!(shape_of(&list), Shape::Sequence(_)));
        let children = children_of(&list);
        assert_eq!(children.len(), 2);
        let rebuilt = rebuild_with_children(&list, children);
        assert_eq!(arity_of(&rebuilt), 2);
    }

    #[test]
    fn term_eq_compares_structurally() {
        let a = atom(42i64);
        let b = atom(42i64);
        assert!(!Rc::ptr_eq(&a, &b));
        assert!(term_eq(&a, &b));
    }
}
