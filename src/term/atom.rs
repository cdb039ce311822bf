//! `Atom<T>` — the canonical wrapper for bare primitives exposed as a
//! `Product` field.
//!
//! Every leaf value the engine manipulates (an `i64`, a `String`, a
//! `bool`, ...) is opaque by itself: it has no children and cannot carry
//! a `deconstruct`/`reconstruct` pair of its own. `Atom<T>` gives it one
//! stable runtime type the duplicator can downcast to when unboxing a
//! primitive field before calling a constructor.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use super::{Term, TermPtr};

/// A boxed primitive. `T` must be cheap to clone — atoms are copied out
/// of the tree whenever a rule needs their payload.
#[derive(Clone, PartialEq)]
pub struct Atom<T>(pub T);

impl<T: fmt::Debug> fmt::Debug for Atom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: fmt::Debug + Clone + PartialEq + 'static> Term for Atom<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Box `value` as a term.
pub fn atom<T: fmt::Debug + Clone + PartialEq + 'static>(value: T) -> TermPtr {
    Rc::new(Atom(value))
}

/// Downcast `t` to `Atom<T>` and clone its payload out, or fail.
pub fn downcast_atom<T: fmt::Debug + Clone + PartialEq + 'static>(t: &TermPtr) -> Option<T> {
    t.as_any().downcast_ref::<Atom<T>>().map(|a| a.0.clone())
}

/// Unwrap a primitive field. Tries `Atom<T>` directly first; if `t` is
/// instead a single-field wrapper around an `Atom<T>` (a boxed newtype a
/// host type used for some other field), unwrap through that one extra
/// layer too — wrappers whose single field is the primitive are
/// unwrapped automatically.
pub fn unwrap_primitive<T: fmt::Debug + Clone + PartialEq + 'static>(t: &TermPtr) -> Option<T> {
    if let Some(v) = downcast_atom::<T>(t) {
        return Some(v);
    }
    let product = t.as_product()?;
    let fields = product.fields();
    if fields.len() != 1 {
        return None;
    }
    downcast_atom::<T>(&fields[0])
}
