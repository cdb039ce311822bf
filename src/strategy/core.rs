//! The `Strategy` abstraction and the four primitive combinators it is
//! built from.

use std::borrow::Cow;
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use crate::term::TermPtr;

/// A named, cheap-to-clone partial function `Term -> Option<Term>`.
///
/// Cloning a `Strategy` clones an `Rc`, not the closure it wraps, so
/// combinators can capture their arguments by value freely. `name` is
/// metadata only — it never participates in equality or dispatch, it
/// just makes `debug`/`log` output and panics readable.
#[derive(Clone)]
pub struct Strategy {
    name: Cow<'static, str>,
    body: Rc<dyn Fn(TermPtr) -> Option<TermPtr>>,
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

impl Strategy {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        body: impl Fn(TermPtr) -> Option<TermPtr> + 'static,
    ) -> Self {
        Strategy {
            name: name.into(),
            body: Rc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the strategy to `subject`.
    pub fn apply(&self, subject: TermPtr) -> Option<TermPtr> {
        (self.body)(subject)
    }
}

/// Build a named strategy. The free-function form of [`Strategy::new`],
/// used throughout the rest of the crate so combinator definitions read
/// close to their published contracts.
pub fn mk(
    name: impl Into<Cow<'static, str>>,
    body: impl Fn(TermPtr) -> Option<TermPtr> + 'static,
) -> Strategy {
    Strategy::new(name, body)
}

/// Always succeeds, returning the subject unchanged.
pub fn id() -> Strategy {
    mk("id", Some)
}

/// Always fails.
pub fn fail() -> Strategy {
    mk("fail", |_| None)
}

/// `seq(p, q)`: apply `p`; on success apply `q` to the result; on
/// failure, fail.
pub fn seq(p: Strategy, q: Strategy) -> Strategy {
    mk("seq", move |t| p.apply(t).and_then(|t2| q.apply(t2)))
}

/// `choice(p, q)`: apply `p`; on failure, apply `q` to the *original*
/// subject.
pub fn choice(p: Strategy, q: Strategy) -> Strategy {
    mk("choice", move |t| match p.apply(t.clone()) {
        Some(result) => Some(result),
        None => q.apply(t),
    })
}

/// `guarded(p, q, r)`: apply `p`; on success apply `q` to `p`'s result;
/// on failure apply `r` to the original subject.
pub fn guarded(p: Strategy, q: Strategy, r: Strategy) -> Strategy {
    mk("guarded", move |t| match p.apply(t.clone()) {
        Some(t2) => q.apply(t2),
        None => r.apply(t),
    })
}

/// `inclusive(p, q)`: apply both `p` and `q` to the original subject.
/// Succeeds with `q`'s result when both succeed, with whichever result
/// succeeded when only one did, and fails only when both fail.
pub fn inclusive(p: Strategy, q: Strategy) -> Strategy {
    mk("inclusive", move |t| {
        let left = p.apply(t.clone());
        let right = q.apply(t);
        match (left, right) {
            (Some(_), Some(r)) => Some(r),
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (None, None) => None,
        }
    })
}

/// A one-shot lazy cell for user-authored recursive knots: `f` receives
/// a placeholder strategy that, once called, forwards to whatever `f`
/// returns. This lets a strategy refer to itself before its own
/// definition is complete.
///
/// A single-threaded lazy cell, not a thread-safe one — thread-safety
/// is dropped deliberately since the engine never shares a `Strategy`
/// across threads.
pub fn recursive(name: &'static str, f: impl FnOnce(Strategy) -> Strategy) -> Strategy {
    let cell: Rc<OnceCell<Strategy>> = Rc::new(OnceCell::new());
    let cell_for_placeholder = cell.clone();
    let placeholder = mk(name, move |t| {
        let resolved = cell_for_placeholder
            .get()
            .expect("recursive strategy applied before its definition was installed");
        resolved.apply(t)
    });
    let resolved = f(placeholder);
    let _ = cell.set(resolved.clone());
    resolved
}
