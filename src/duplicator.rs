//! The duplicator: given a `Product` node and a replacement children
//! array, produces a new node of the exact runtime variant.
//!
//! A reflection-based engine does this by looking up a constructor by
//! arity at runtime. Rust has no such lookup, so the real per-variant
//! work lives in each type's [`crate::term::Product::rebuild`] impl
//! (hand-written, or emitted by a derive-style macro); what's left here
//! is the cacheable, shape-independent part: the singleton shortcut and
//! the arity guard, both keyed by the node's `TypeId` so repeated
//! duplication of the same class doesn't re-derive `is_singleton()`
//! every call.

use std::any::TypeId;
use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::error::Error;
use crate::term::TermPtr;

thread_local! {
    static SINGLETON_CACHE: RefCell<FxHashMap<TypeId, bool>> = RefCell::new(FxHashMap::default());
}

/// Rebuild `original` (a `Product`) with `children` as its new fields.
///
/// Returns `original` unchanged, without allocating, when the class is a
/// canonical singleton. Otherwise checks arity and delegates to
/// `Product::rebuild`. Panics on an arity mismatch — a programmer error,
/// not catchable by the strategy layer.
pub fn duplicate(original: &TermPtr, children: Vec<TermPtr>) -> TermPtr {
    let product = original
        .as_product()
        .expect("duplicate() called on a non-Product term");

    let is_singleton = SINGLETON_CACHE.with(|cache| {
        *cache
            .borrow_mut()
            .entry(product.class_id())
            .or_insert_with(|| product.is_singleton())
    });

    if is_singleton {
        return original.clone();
    }

    let expected = product.fields().len();
    let given = children.len();
    if expected != given {
        let err = Error::DuplicationArity {
            class: product.class_name().to_string(),
            expected,
            given,
        };
        panic!("{err}");
    }

    product.rebuild(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{atom, Pair};
    use std::rc::Rc;

    #[test]
    fn singleton_products_are_returned_unchanged() {
        #[derive(Debug)]
        struct Unit;
        impl crate::term::Term for Unit {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn as_product(&self) -> Option<&dyn crate::term::Product> {
                Some(self)
            }
        }
        impl crate::term::Product for Unit {
            fn class_id(&self) -> TypeId {
                TypeId::of::<Unit>()
            }
            fn class_name(&self) -> &'static str {
                "Unit"
            }
            fn is_singleton(&self) -> bool {
                true
            }
            fn fields(&self) -> Vec<TermPtr> {
                Vec::new()
            }
            fn rebuild(&self, _fields: Vec<TermPtr>) -> TermPtr {
                panic!("rebuild should not be called for a singleton")
            }
        }

        let unit: TermPtr = Rc::new(Unit);
        let rebuilt = duplicate(&unit, Vec::new());
        assert!(Rc::ptr_eq(&unit, &rebuilt));
    }

    #[test]
    fn arity_mismatch_panics() {
        let pair: TermPtr = Rc::new(Pair(atom(1i64), atom(2i64)));
        let result = std::panic::catch_unwind(|| duplicate(&pair, vec![atom(1i64)]));
        assert!(result.is_err());
    }

    #[test]
    fn rebuild_round_trips() {
        let pair: TermPtr = Rc::new(Pair(atom(1i64), atom(2i64)));
        let rebuilt = duplicate(&pair, vec![atom(1i64), atom(3i64)]);
        let rebuilt = rebuilt.as_any().downcast_ref::<Pair>().unwrap();
        assert_eq!(crate::term::downcast_atom::<i64>(rebuilt.value()), Some(3));
    }
}
