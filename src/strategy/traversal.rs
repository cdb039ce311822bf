//! One-level generic traversals: `child`, `all`, `one`, `some`,
//! `congruence`.
//!
//! None of these know or care which of the four shapes the subject is —
//! they all go through [`children_of`]/[`rebuild_with_children`], which
//! do the shape dispatch once. The no-change invariant (return the
//! original subject, not a rebuild, when nothing actually changed) is
//! enforced here with `Rc::ptr_eq`, never left to the duplicator.

use std::rc::Rc;

use crate::term::{children_of, rebuild_with_children, TermPtr};

use super::core::{mk, Strategy};

/// `child(i, s)`: 1-indexed. Applies `s` to the `i`-th child; fails if
/// `i` is out of `[1, arity]` or if `s` fails on that child.
pub fn child(i: usize, s: Strategy) -> Strategy {
    mk("child", move |t| {
        let children = children_of(&t);
        if i < 1 || i > children.len() {
            return None;
        }
        let idx = i - 1;
        let result = s.apply(children[idx].clone())?;
        if Rc::ptr_eq(&result, &children[idx]) {
            Some(t)
        } else {
            let mut new_children = children;
            new_children[idx] = result;
            Some(rebuild_with_children(&t, new_children))
        }
    })
}

/// `all(s)`: applies `s` to every child, in order. Fails as soon as `s`
/// fails on any child. Returns the subject unchanged (no rebuild) if
/// every result was reference-equal to its original child.
pub fn all(s: Strategy) -> Strategy {
    mk("all", move |t| {
        let children = children_of(&t);
        let mut new_children = Vec::with_capacity(children.len());
        let mut changed = false;
        for c in &children {
            let result = s.apply(c.clone())?;
            if !Rc::ptr_eq(&result, c) {
                changed = true;
            }
            new_children.push(result);
        }
        if changed {
            Some(rebuild_with_children(&t, new_children))
        } else {
            Some(t)
        }
    })
}

/// `one(s)`: tries `s` on each child in order, succeeding (and stopping)
/// the moment one succeeds. Fails only if `s` fails on every child.
pub fn one(s: Strategy) -> Strategy {
    mk("one", move |t| {
        let children = children_of(&t);
        for (idx, c) in children.iter().enumerate() {
            if let Some(result) = s.apply(c.clone()) {
                if Rc::ptr_eq(&result, c) {
                    return Some(t);
                }
                let mut new_children = children.clone();
                new_children[idx] = result;
                return Some(rebuild_with_children(&t, new_children));
            }
        }
        None
    })
}

/// `some(s)`: applies `s` to every child, keeping whichever succeed and
/// leaving the rest untouched. Succeeds iff at least one child changed
/// under `s`; fails only if `s` failed on every child.
pub fn some(s: Strategy) -> Strategy {
    mk("some", move |t| {
        let children = children_of(&t);
        let mut new_children = children.clone();
        let mut any_success = false;
        let mut changed = false;
        for (idx, c) in children.iter().enumerate() {
            if let Some(result) = s.apply(c.clone()) {
                any_success = true;
                if !Rc::ptr_eq(&result, c) {
                    changed = true;
                }
                new_children[idx] = result;
            }
        }
        if !any_success {
            return None;
        }
        if changed {
            Some(rebuild_with_children(&t, new_children))
        } else {
            Some(t)
        }
    })
}

/// `congruence(strategies)`: Products only. Fails if `strategies.len()`
/// doesn't match the node's arity, or if any `strategies[i]` fails on
/// field `i`. Otherwise rebuilds (or keeps) as `all` would.
pub fn congruence(strategies: Vec<Strategy>) -> Strategy {
    mk("congruence", move |t| {
        let product = t.as_product()?;
        let children = product.fields();
        if strategies.len() != children.len() {
            return None;
        }
        let mut new_children = Vec::with_capacity(children.len());
        let mut changed = false;
        for (s, c) in strategies.iter().zip(children.iter()) {
            let result = s.apply(c.clone())?;
            if !Rc::ptr_eq(&result, c) {
                changed = true;
            }
            new_children.push(result);
        }
        if changed {
            Some(rebuild_with_children(&t, new_children))
        } else {
            Some(t)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::core::{fail, id};
    use crate::term::{atom, Pair};

    fn double() -> Strategy {
        mk("double", |t| {
            let n = crate::term::downcast_atom::<i64>(&t)?;
            Some(atom(n * 2))
        })
    }

    #[test]
    fn all_id_is_a_no_op() {
        let pair: TermPtr = Rc::new(Pair(atom(1i64), atom(2i64)));
        let result = all(id()).apply(pair.clone()).unwrap();
        assert!(Rc::ptr_eq(&pair, &result));
    }

    #[test]
    fn all_fail_succeeds_only_on_childless_terms() {
        let leaf = atom(1i64);
        assert!(Rc::ptr_eq(&all(fail()).apply(leaf.clone()).unwrap(), &leaf));

        let pair: TermPtr = Rc::new(Pair(atom(1i64), atom(2i64)));
        assert!(all(fail()).apply(pair).is_none());
    }

    #[test]
    fn all_rebuilds_when_a_child_changes() {
        let pair: TermPtr = Rc::new(Pair(atom(1i64), atom(2i64)));
        let result = all(double()).apply(pair).unwrap();
        let result = result.as_any().downcast_ref::<Pair>().unwrap();
        assert_eq!(crate::term::downcast_atom::<i64>(result.key()), Some(2));
        assert_eq!(crate::term::downcast_atom::<i64>(result.value()), Some(4));
    }

    #[test]
    fn one_stops_at_first_success() {
        let pair: TermPtr = Rc::new(Pair(atom(1i64), atom(2i64)));
        let result = one(double()).apply(pair).unwrap();
        let result = result.as_any().downcast_ref::<Pair>().unwrap();
        assert_eq!(crate::term::downcast_atom::<i64>(result.key()), Some(2));
        assert_eq!(crate::term::downcast_atom::<i64>(result.value()), Some(2));
    }

    #[test]
    fn some_requires_at_least_one_success() {
        let pair: TermPtr = Rc::new(Pair(atom("x".to_string()), atom(2i64)));
        let result = some(double()).apply(pair).unwrap();
        let result = result.as_any().downcast_ref::<Pair>().unwrap();
        assert_eq!(
            crate::term::downcast_atom::<String>(result.key()),
            Some("x".to_string())
        );
        assert_eq!(crate::term::downcast_atom::<i64>(result.value()), Some(4));

        let all_strings: TermPtr = Rc::new(Pair(atom("a".to_string()), atom("b".to_string())));
        assert!(some(double()).apply(all_strings).is_none());
    }

    #[test]
    fn congruence_fails_on_arity_mismatch() {
        let pair: TermPtr = Rc::new(Pair(atom(1i64), atom(2i64)));
        assert!(congruence(vec![id(), id(), id()]).apply(pair).is_none());
    }

    #[test]
    fn child_is_one_indexed_and_bounds_checked() {
        let pair: TermPtr = Rc::new(Pair(atom(1i64), atom(2i64)));
        assert!(child(0, id()).apply(pair.clone()).is_none());
        assert!(child(3, id()).apply(pair.clone()).is_none());
        let result = child(2, double()).apply(pair).unwrap();
        let result = result.as_any().downcast_ref::<Pair>().unwrap();
        assert_eq!(crate::term::downcast_atom::<i64>(result.value()), Some(4));
    }
}
