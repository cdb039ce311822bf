//! Query aggregators: `collect`, `collectall`, `count`, `everything`,
//! `para`, plus `alltdfold`, a fold-while-rewriting combinator that
//! belongs with this family rather than with the `Strategy`-returning
//! combinators in [`super::combinators`] — its signature returns an
//! accumulator alongside the rewritten term, which doesn't fit the
//! `Term -> Option<Term>` shape a `Strategy` commits to.
//!
//! All four traversal-based aggregators (`collect`, `collectall`,
//! `count`, `everything`) visit nodes top-down, left to right.

use crate::term::{children_of, rebuild_with_children, TermPtr};

/// `collect(f)`: top-down, left-to-right; wherever `f` is defined,
/// append its result.
pub fn collect<T>(t: &TermPtr, f: &dyn Fn(&TermPtr) -> Option<T>) -> Vec<T> {
    let mut acc = Vec::new();
    collect_into(t, f, &mut acc);
    acc
}

fn collect_into<T>(t: &TermPtr, f: &dyn Fn(&TermPtr) -> Option<T>, acc: &mut Vec<T>) {
    if let Some(v) = f(t) {
        acc.push(v);
    }
    for c in children_of(t) {
        collect_into(&c, f, acc);
    }
}

/// `collectall(f)`: like [`collect`], but `f` returns a collection at
/// each node and results are concatenated.
pub fn collectall<T>(t: &TermPtr, f: &dyn Fn(&TermPtr) -> Option<Vec<T>>) -> Vec<T> {
    let mut acc = Vec::new();
    collectall_into(t, f, &mut acc);
    acc
}

fn collectall_into<T>(t: &TermPtr, f: &dyn Fn(&TermPtr) -> Option<Vec<T>>, acc: &mut Vec<T>) {
    if let Some(mut v) = f(t) {
        acc.append(&mut v);
    }
    for c in children_of(t) {
        collectall_into(&c, f, acc);
    }
}

/// `count(f)`: sum of `f`'s integer results across every visited node.
pub fn count(t: &TermPtr, f: &dyn Fn(&TermPtr) -> Option<i64>) -> i64 {
    let mut total = f(t).unwrap_or(0);
    for c in children_of(t) {
        total += count(&c, f);
    }
    total
}

/// `everything(v)(combine)(f)`: folds every node's `f` result (skipping
/// nodes where `f` is `None`) into an accumulator seeded with `v`.
pub fn everything<V: Clone>(
    t: &TermPtr,
    v: V,
    combine: &dyn Fn(V, V) -> V,
    f: &dyn Fn(&TermPtr) -> Option<V>,
) -> V {
    let mut acc = v;
    everything_into(t, &mut acc, combine, f);
    acc
}

fn everything_into<V: Clone>(
    t: &TermPtr,
    acc: &mut V,
    combine: &dyn Fn(V, V) -> V,
    f: &dyn Fn(&TermPtr) -> Option<V>,
) {
    if let Some(result) = f(t) {
        *acc = combine(acc.clone(), result);
    }
    for c in children_of(t) {
        everything_into(&c, acc, combine, f);
    }
}

/// `para(f)`: a paramorphism — `f` receives the subterm and the already-
/// folded results of its children.
pub fn para<T>(t: &TermPtr, f: &dyn Fn(&TermPtr, Vec<T>) -> T) -> T {
    let child_results: Vec<T> = children_of(t).iter().map(|c| para(c, f)).collect();
    f(t, child_results)
}

/// `alltdfold(s, initial, combine)`: a top-down traversal with
/// [`super::combinators::alltd`]'s short-circuit-on-success shape, that
/// also threads an accumulator — `combine(acc, subject)` runs wherever
/// `s` succeeds, instead of descending further there. Returns the
/// rewritten term alongside the final accumulator.
pub fn alltdfold<A: Clone>(
    t: &TermPtr,
    s: &dyn Fn(&TermPtr) -> Option<TermPtr>,
    initial: A,
    combine: &dyn Fn(A, &TermPtr) -> A,
) -> (TermPtr, A) {
    if let Some(result) = s(t) {
        let acc = combine(initial, t);
        return (result, acc);
    }
    let children = children_of(t);
    let mut acc = initial;
    let mut new_children = Vec::with_capacity(children.len());
    let mut changed = false;
    for c in &children {
        let (rebuilt, next_acc) = alltdfold(c, s, acc, combine);
        acc = next_acc;
        if !std::rc::Rc::ptr_eq(&rebuilt, c) {
            changed = true;
        }
        new_children.push(rebuilt);
    }
    let result = if changed {
        rebuild_with_children(t, new_children)
    } else {
        t.clone()
    };
    (result, acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{atom, downcast_atom, Pair};
    use std::rc::Rc;

    fn tree() -> TermPtr {
        // Add(Var("y"), Mul(Var("y"), Var("z"))) using Pair as a stand-in
        // "Add"/"Mul" node and atoms tagged as variables via String.
        Rc::new(Pair(
            atom("y".to_string()),
            Rc::new(Pair(atom("y".to_string()), atom("z".to_string()))),
        ))
    }

    #[test]
    fn collect_gathers_in_topdown_order() {
        let names = collect(&tree(), &|t| downcast_atom::<String>(t));
        assert_eq!(names, vec!["y".to_string(), "y".to_string(), "z".to_string()]);
    }

    #[test]
    fn count_sums_matches() {
        let total = count(&tree(), &|t| {
            downcast_atom::<String>(t).filter(|s| s == "y").map(|_| 1)
        });
        assert_eq!(total, 2);
    }

    #[test]
    fn everything_folds_with_combine() {
        let total = everything(&tree(), 0i64, &|a, b| a + b, &|t| {
            downcast_atom::<String>(t).map(|_| 1)
        });
        assert_eq!(total, 3);
    }

    #[test]
    fn para_counts_nodes_bottom_up() {
        let size = para(&tree(), &|_t, child_sizes: Vec<i64>| {
            1 + child_sizes.iter().sum::<i64>()
        });
        assert_eq!(size, 4); // Pair(y, Pair(y, z)): 4 nodes total
    }
}
