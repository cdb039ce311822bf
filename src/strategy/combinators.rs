//! Library combinators: compound traversals and control combinators,
//! built purely by composing [`crate::strategy::core`] and
//! [`crate::strategy::traversal`].
//!
//! Each combinator here is an ordinary recursive Rust function. Calling
//! `topdown(s)` does not recurse — it returns a `Strategy` whose closure
//! calls `topdown(s.clone())` again, but only when *applied*, one
//! tree level at a time: constructing a combinator never evaluates its
//! arguments eagerly.
//!
//! A handful of combinator names in the Stratego/Kiama tradition
//! (`manytd`, `manybu`, `breadthfirst`, `leaves`, `everywhereS`,
//! `loopiter`, `loopnot`, `and`, `or`, `ior`, `alldownup2`) have no
//! worked-out contract elsewhere. Each is implemented below to the
//! conventional Stratego/Kiama definition and called out with a short
//! rationale; see `DESIGN.md` for the ledger.

use std::collections::VecDeque;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::term::{children_of, rebuild_with_children, TermPtr};

use super::core::{choice, fail, guarded, id, mk, seq, Strategy};
use super::traversal::all;

/// `attempt(s) = choice(s, id)` — never fails.
pub fn attempt(s: Strategy) -> Strategy {
    choice(s, id())
}

/// `topdown(s) = seq(s, all(topdown(s)))`.
pub fn topdown(s: Strategy) -> Strategy {
    mk("topdown", move |t| {
        seq(s.clone(), all(topdown(s.clone()))).apply(t)
    })
}

/// `bottomup(s) = seq(all(bottomup(s)), s)`.
pub fn bottomup(s: Strategy) -> Strategy {
    mk("bottomup", move |t| {
        seq(all(bottomup(s.clone())), s.clone()).apply(t)
    })
}

/// `topdownS(s, stop) = seq(s, choice(stop(topdownS(s, stop)), all(topdownS(s, stop))))`.
///
/// `stop` receives the continuation strategy (itself) so it can decide,
/// per node, whether to cut off descent.
pub fn topdown_s(s: Strategy, stop: impl Fn(Strategy) -> Strategy + 'static) -> Strategy {
    let stop = Rc::new(stop);
    fn go(s: Strategy, stop: Rc<dyn Fn(Strategy) -> Strategy>) -> Strategy {
        mk("topdownS", move |t| {
            let recur = go(s.clone(), stop.clone());
            seq(s.clone(), choice(stop(recur.clone()), all(recur))).apply(t)
        })
    }
    go(s, stop)
}

/// `downup(s) = seq(s, seq(all(downup(s)), s))` — apply `s` on the way
/// down *and* on the way back up.
pub fn downup(s: Strategy) -> Strategy {
    mk("downup", move |t| {
        seq(s.clone(), seq(all(downup(s.clone())), s.clone())).apply(t)
    })
}

/// `alldownup2(s1, s2)`: like [`downup`] but with distinct down/up
/// strategies.
pub fn alldownup2(s1: Strategy, s2: Strategy) -> Strategy {
    mk("alldownup2", move |t| {
        seq(
            s1.clone(),
            seq(all(alldownup2(s1.clone(), s2.clone())), s2.clone()),
        )
        .apply(t)
    })
}

/// `alltd(s) = choice(s, all(alltd(s)))` — descends only where `s`
/// doesn't already apply.
pub fn alltd(s: Strategy) -> Strategy {
    mk("alltd", move |t| {
        choice(s.clone(), all(alltd(s.clone()))).apply(t)
    })
}

/// `allbu(s) = choice(all(allbu(s)), s)` — the bottom-up dual of
/// [`alltd`]: descends everywhere `s` doesn't already apply, trying `s`
/// itself only once a node's children are exhausted.
pub fn allbu(s: Strategy) -> Strategy {
    mk("allbu", move |t| {
        choice(all(allbu(s.clone())), s.clone()).apply(t)
    })
}

/// `oncetd(s) = choice(s, one(oncetd(s)))` — stops at the first (in
/// top-down, left-to-right order) successful node.
pub fn oncetd(s: Strategy) -> Strategy {
    mk("oncetd", move |t| {
        choice(s.clone(), super::traversal::one(oncetd(s.clone()))).apply(t)
    })
}

/// `oncebu(s) = choice(one(oncebu(s)), s)`.
pub fn oncebu(s: Strategy) -> Strategy {
    mk("oncebu", move |t| {
        choice(super::traversal::one(oncebu(s.clone())), s.clone()).apply(t)
    })
}

/// `sometd(s) = choice(s, some(sometd(s)))`.
pub fn sometd(s: Strategy) -> Strategy {
    mk("sometd", move |t| {
        choice(s.clone(), super::traversal::some(sometd(s.clone()))).apply(t)
    })
}

/// `somebu(s) = choice(some(somebu(s)), s)`.
pub fn somebu(s: Strategy) -> Strategy {
    mk("somebu", move |t| {
        choice(super::traversal::some(somebu(s.clone())), s.clone()).apply(t)
    })
}

/// `manytd(s)`: top-down, apply `s` (then keep going into whatever
/// children remain) wherever it succeeds, and where it doesn't, descend
/// anyway as long as some descendant eventually changes. Conventional
/// Stratego-library definition: `manytd(s) = (s; try(all(manytd(s)))) <+ some(manytd(s))`.
pub fn manytd(s: Strategy) -> Strategy {
    mk("manytd", move |t| {
        let recur = manytd(s.clone());
        choice(
            seq(s.clone(), attempt(all(recur.clone()))),
            super::traversal::some(recur),
        )
        .apply(t)
    })
}

/// `manybu(s)`: bottom-up dual of [`manytd`].
pub fn manybu(s: Strategy) -> Strategy {
    mk("manybu", move |t| {
        let recur = manybu(s.clone());
        choice(
            super::traversal::some(recur.clone()),
            seq(s.clone(), attempt(all(recur))),
        )
        .apply(t)
    })
}

/// `innermost(s) = bottomup(attempt(seq(s, innermost(s))))` — fully
/// normalizes by rewriting as far down as possible, then repeating once
/// a subtree stabilizes.
pub fn innermost(s: Strategy) -> Strategy {
    mk("innermost", move |t| {
        bottomup(attempt(seq(s.clone(), innermost(s.clone())))).apply(t)
    })
}

/// `innermost2(s) = repeat(oncebu(s))` — an alternative, iteration-based
/// normalizer.
pub fn innermost2(s: Strategy) -> Strategy {
    repeat(oncebu(s))
}

/// `outermost(s) = repeat(oncetd(s))`.
pub fn outermost(s: Strategy) -> Strategy {
    repeat(oncetd(s))
}

/// `reduce(s) = repeat(somebu(s))`.
pub fn reduce(s: Strategy) -> Strategy {
    repeat(somebu(s))
}

/// `everywheretd(s) = topdown(attempt(s))`.
pub fn everywheretd(s: Strategy) -> Strategy {
    topdown(attempt(s))
}

/// `everywherebu(s) = bottomup(attempt(s))`.
pub fn everywherebu(s: Strategy) -> Strategy {
    bottomup(attempt(s))
}

/// Traversal order selector for [`everywhere_s`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    TopDown,
    BottomUp,
}

/// `everywhereS(order, s)`: [`everywheretd`] or [`everywherebu`] picked
/// at runtime by `order`. A parameterized variant of `everywheretd`/
/// `everywherebu` rather than a third traversal order, matching how
/// Kiama's `everywhere` exposes the order as an argument.
pub fn everywhere_s(order: Order, s: Strategy) -> Strategy {
    match order {
        Order::TopDown => everywheretd(s),
        Order::BottomUp => everywherebu(s),
    }
}

/// `repeat(s) = choice(seq(s, repeat(s)), id)`.
pub fn repeat(s: Strategy) -> Strategy {
    mk("repeat", move |t| {
        choice(seq(s.clone(), repeat(s.clone())), id()).apply(t)
    })
}

/// `repeat(s, n)`: apply `s` exactly `n` times in a row, failing if any
/// application fails.
pub fn repeat_n(s: Strategy, n: usize) -> Strategy {
    mk("repeat_n", move |t| {
        let mut current = t;
        for _ in 0..n {
            current = s.apply(current)?;
        }
        Some(current)
    })
}

/// `repeat1(s) = seq(s, repeat(s))` — like `repeat`, but requires at
/// least one success.
pub fn repeat1(s: Strategy) -> Strategy {
    mk("repeat1", move |t| seq(s.clone(), repeat(s.clone())).apply(t))
}

/// `repeatuntil(s, cond)`: apply `s` and then check `cond` as a test;
/// keep going until `cond` holds. Fails if `s` ever fails before `cond`
/// is met.
pub fn repeatuntil(s: Strategy, cond: Strategy) -> Strategy {
    mk("repeatuntil", move |t| {
        let t2 = s.apply(t)?;
        if test(cond.clone()).apply(t2.clone()).is_some() {
            Some(t2)
        } else {
            repeatuntil(s.clone(), cond.clone()).apply(t2)
        }
    })
}

/// `loop(r, s) = choice(seq(r, seq(s, loop(r, s))), id)` — while `r`
/// (a test) holds, run `s` and loop.
pub fn loop_while(r: Strategy, s: Strategy) -> Strategy {
    mk("loop", move |t| {
        choice(
            seq(r.clone(), seq(s.clone(), loop_while(r.clone(), s.clone()))),
            id(),
        )
        .apply(t)
    })
}

/// `loopiter(s)`: the same fixed point as `repeat(s)`, computed
/// iteratively instead of recursively. Given as a distinct combinator
/// because unbounded recursive `repeat` can exhaust the stack on a long
/// chain of successes; `loopiter` is the stack-safe alternative.
pub fn loopiter(s: Strategy) -> Strategy {
    mk("loopiter", move |t| {
        let mut current = t;
        loop {
            match s.apply(current.clone()) {
                Some(next) => current = next,
                None => return Some(current),
            }
        }
    })
}

/// `loopnot(s, cond)`: loop applying `s` until `cond` succeeds as a
/// test, then stop (succeeding with the last-seen term); fails if `s`
/// ever fails before `cond` holds. The inverse of [`loop_while`]: loops
/// *while the condition fails* rather than *while it holds*.
pub fn loopnot(s: Strategy, cond: Strategy) -> Strategy {
    mk("loopnot", move |t| {
        if test(cond.clone()).apply(t.clone()).is_some() {
            return Some(t);
        }
        let t2 = s.apply(t)?;
        loopnot(s.clone(), cond.clone()).apply(t2)
    })
}

/// `doloop(s, r) = seq(s, loop(r, s))`.
pub fn doloop(s: Strategy, r: Strategy) -> Strategy {
    mk("doloop", move |t| seq(s.clone(), loop_while(r.clone(), s.clone())).apply(t))
}

/// `where(s) = strategyf(t -> s(t).map(_ -> t))` — runs `s` for its
/// success/failure only, discarding its result and restoring the
/// original subject. `test` is its documented alias.
pub fn where_(s: Strategy) -> Strategy {
    mk("where", move |t| s.apply(t.clone()).map(|_| t))
}

/// Alias for [`where_`]: `test = where`.
pub fn test(s: Strategy) -> Strategy {
    where_(s)
}

/// `not(s) = choice(seq(s, fail), id)` — succeeds (with the original
/// subject) iff `s` fails.
pub fn not(s: Strategy) -> Strategy {
    mk("not", move |t| {
        choice(seq(s.clone(), fail()), id()).apply(t)
    })
}

/// `and(p, q)`: both must hold as tests; subject passes through
/// unchanged.
pub fn and(p: Strategy, q: Strategy) -> Strategy {
    mk("and", move |t| {
        test(p.clone()).apply(t.clone())?;
        test(q.clone()).apply(t)
    })
}

/// `or(p, q)`: succeeds (as a test, subject unchanged) iff at least one
/// of `p`, `q` succeeds.
pub fn or(p: Strategy, q: Strategy) -> Strategy {
    mk("or", move |t| choice(test(p.clone()), test(q.clone())).apply(t))
}

/// `ior(p, q)`: inclusive-or — alias for the core [`super::core::inclusive`]
/// combinator, under its conventional Stratego name.
pub fn ior(p: Strategy, q: Strategy) -> Strategy {
    super::core::inclusive(p, q)
}

/// `restore(s, r) = choice(s, seq(r, fail))` — on failure of `s`, run
/// the recovery strategy `r` (for its side effects) and then still fail.
pub fn restore(s: Strategy, r: Strategy) -> Strategy {
    mk("restore", move |t| {
        choice(s.clone(), seq(r.clone(), fail())).apply(t)
    })
}

/// `restorealways(s, r) = choice(seq(s, r), seq(r, fail))` — `r` runs
/// either way; overall success/failure tracks `s`.
pub fn restorealways(s: Strategy, r: Strategy) -> Strategy {
    mk("restorealways", move |t| {
        choice(seq(s.clone(), r.clone()), seq(r.clone(), fail())).apply(t)
    })
}

/// `lastly(s, f) = guarded(s, ..., ...)`: run `s`; either way, also run
/// `f` (for side effects); succeed with `s`'s result iff `s` succeeded.
pub fn lastly(s: Strategy, f: Strategy) -> Strategy {
    let run_after_success = {
        let f = f.clone();
        mk("lastly-ok", move |t| {
            let _ = f.apply(t.clone());
            Some(t)
        })
    };
    let run_after_failure = mk("lastly-fail", move |t| {
        let _ = f.apply(t);
        None
    });
    guarded(s, run_after_success, run_after_failure)
}

/// `map(s)`: lifts `s` element-wise over a `Sequence`, rebuilding the
/// sequence or failing at the first element `s` fails on. Named
/// `map_seq` here to avoid shadowing `Option`/`Iterator::map` at call
/// sites that glob-import [`crate::prelude`].
pub fn map_seq(s: Strategy) -> Strategy {
    mk("map", move |t| {
        let sequence = t.as_sequence()?;
        let elements = sequence.elements();
        let mut new_elements = Vec::with_capacity(elements.len());
        let mut changed = false;
        for e in &elements {
            let result = s.apply(e.clone())?;
            if !Rc::ptr_eq(&result, e) {
                changed = true;
            }
            new_elements.push(result);
        }
        if changed {
            Some(sequence.rebuild(new_elements))
        } else {
            Some(t)
        }
    })
}

/// `breadthfirst(s)`: decides, level by level (a true BFS over the
/// tree), which nodes `s` rewrites, then reassembles the result
/// bottom-up so every parent sees its children's final values — mixing
/// BFS decision order with the bottom-up reconstruction every other
/// combinator here relies on for structural soundness.
pub fn breadthfirst(s: Strategy) -> Strategy {
    mk("breadthfirst", move |t| {
        let mut queue = VecDeque::new();
        queue.push_back(t.clone());
        let mut visit_order = Vec::new();
        while let Some(node) = queue.pop_front() {
            for c in children_of(&node) {
                queue.push_back(c);
            }
            visit_order.push(node);
        }

        let mut replacements: FxHashMap<usize, TermPtr> = FxHashMap::default();
        for node in &visit_order {
            if let Some(result) = s.apply(node.clone()) {
                if !Rc::ptr_eq(&result, node) {
                    replacements.insert(Rc::as_ptr(node) as *const () as usize, result);
                }
            }
        }

        if replacements.is_empty() {
            return Some(t);
        }

        fn rebuild(node: &TermPtr, replacements: &FxHashMap<usize, TermPtr>) -> TermPtr {
            let key = Rc::as_ptr(node) as *const () as usize;
            let children = children_of(node);
            let mut new_children = Vec::with_capacity(children.len());
            let mut changed = false;
            for c in &children {
                let rebuilt = rebuild(c, replacements);
                if !Rc::ptr_eq(&rebuilt, c) {
                    changed = true;
                }
                new_children.push(rebuilt);
            }
            let self_rebuilt = if changed {
                rebuild_with_children(node, new_children)
            } else {
                node.clone()
            };
            match replacements.get(&key) {
                Some(replacement) => replacement.clone(),
                None => self_rebuilt,
            }
        }

        Some(rebuild(&t, &replacements))
    })
}

/// `leaves(s)`: apply `s` only at nodes with no children, leaving
/// internal structure to plain recursion via `all`.
pub fn leaves(s: Strategy) -> Strategy {
    mk("leaves", move |t| {
        if children_of(&t).is_empty() {
            s.apply(t)
        } else {
            all(leaves(s.clone())).apply(t)
        }
    })
}
