//! The `Mapping` capability — a keyed collection whose children are
//! key/value pairs.
//!
//! Whether `some`/`one` replace the pair atomically or only the value is
//! resolved here in favor of pair-level replacement. [`Pair`] is an
//! ordinary two-field [`Product`], so every one-level traversal
//! (`child`, `all`, `one`, `some`, `congruence`) works over a mapping's
//! children with no special-casing once `pairs()`/`rebuild()` hand them
//! off.

use std::any::{Any, TypeId};
use std::rc::Rc;

use super::{Product, Term, TermPtr};

pub trait Mapping: Term {
    /// The entries as `Pair(key, value)` terms. Order must be stable
    /// within a single traversal.
    fn pairs(&self) -> Vec<TermPtr>;

    /// Rebuild the mapping from a replacement list of `Pair` terms.
    fn rebuild(&self, pairs: Vec<TermPtr>) -> TermPtr;
}

/// A key/value entry, exposed to the traversal layer as a two-field
/// `Product` so key and value both become ordinary traversable children.
#[derive(Debug, Clone)]
pub struct Pair(pub TermPtr, pub TermPtr);

impl Pair {
    pub fn key(&self) -> &TermPtr {
        &self.0
    }

    pub fn value(&self) -> &TermPtr {
        &self.1
    }
}

impl Term for Pair {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_product(&self) -> Option<&dyn Product> {
        Some(self)
    }
}

impl Product for Pair {
    fn class_id(&self) -> TypeId {
        TypeId::of::<Pair>()
    }

    fn class_name(&self) -> &'static str {
        "Pair"
    }

    fn fields(&self) -> Vec<TermPtr> {
        vec![self.0.clone(), self.1.clone()]
    }

    fn rebuild(&self, fields: Vec<TermPtr>) -> TermPtr {
        let mut it = fields.into_iter();
        let key = it
            .next()
            .unwrap_or_else(|| panic!("duplication failed for class Pair: missing key"));
        let value = it
            .next()
            .unwrap_or_else(|| panic!("duplication failed for class Pair: missing value"));
        Rc::new(Pair(key, value))
    }
}

/// The simplest `Mapping`: an ordered association list. Good enough
/// since key ordering within a mapping is irrelevant to callers, only
/// *stable within one traversal* — which a `Vec` trivially is.
#[derive(Debug, Clone, Default)]
pub struct AssocMap(pub Vec<(TermPtr, TermPtr)>);

impl Term for AssocMap {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_mapping(&self) -> Option<&dyn Mapping> {
        Some(self)
    }
}

impl Mapping for AssocMap {
    fn pairs(&self) -> Vec<TermPtr> {
        self.0
            .iter()
            .map(|(k, v)| Rc::new(Pair(k.clone(), v.clone())) as TermPtr)
            .collect()
    }

    fn rebuild(&self, pairs: Vec<TermPtr>) -> TermPtr {
        let entries = pairs
            .into_iter()
            .map(|p| {
                let pair = p
                    .as_any()
                    .downcast_ref::<Pair>()
                    .unwrap_or_else(|| panic!("duplication failed for class AssocMap: non-Pair child"));
                (pair.0.clone(), pair.1.clone())
            })
            .collect();
        Rc::new(AssocMap(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::atom;

    #[test]
    fn pair_level_replacement_round_trips() {
        let m = AssocMap(vec![(atom("k".to_string()), atom(1i64))]);
        let pairs = m.pairs();
        assert_eq!(pairs.len(), 1);
        let rebuilt = m.rebuild(pairs);
        let rebuilt = rebuilt.as_any().downcast_ref::<AssocMap>().unwrap();
        assert_eq!(rebuilt.0.len(), 1);
    }
}
