//! Rule builders — lifting ordinary pattern matches and functions into
//! [`Strategy`] values.
//!
//! Type-filtered builders (`rule`, `strategy_fn`, `rulefs`, `query`)
//! downcast the subject to their declared input type `T` and fail — not
//! panic — on a miss. A reflective host would catch a safe coercion
//! fault and translate it to failure; Rust's `downcast_ref` already
//! returns `Option`, so there is no fault to actually catch.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::emitter::Emitter;
use crate::term::{term_eq, TermPtr};

use super::core::{mk, Strategy};

/// `rule(p)`: subject matches the typed partial function `p` — succeeds
/// with `p`'s result, fails (without panicking) if the subject is not a
/// `T` or if `p` itself returns `None`.
pub fn rule<T, F>(name: &'static str, f: F) -> Strategy
where
    T: 'static,
    F: Fn(&T) -> Option<TermPtr> + 'static,
{
    mk(name, move |t| {
        let concrete = t.as_any().downcast_ref::<T>()?;
        f(concrete)
    })
}

/// `rulef(f)`: always succeeds, rewriting the subject with `f`.
pub fn rulef(name: &'static str, f: impl Fn(TermPtr) -> TermPtr + 'static) -> Strategy {
    mk(name, move |t| Some(f(t)))
}

/// `rulefs(p)`: subject matches the typed partial function `p`, which
/// itself produces a *strategy*; success is that strategy applied to the
/// subject.
pub fn rulefs<T, F>(name: &'static str, f: F) -> Strategy
where
    T: 'static,
    F: Fn(&T) -> Option<Strategy> + 'static,
{
    mk(name, move |t| {
        let concrete = t.as_any().downcast_ref::<T>()?;
        let s = f(concrete)?;
        s.apply(t.clone())
    })
}

/// `strategy(p)`: the typed sibling of [`strategyf`] — subject matches
/// `T`, and `p` yields the replacement term directly as `Option`.
pub fn strategy_fn<T, F>(name: &'static str, f: F) -> Strategy
where
    T: 'static,
    F: Fn(&T) -> Option<TermPtr> + 'static,
{
    rule(name, f)
}

/// `strategyf(f)`: untyped; success is whatever `f(subject)` returns.
pub fn strategyf(name: &'static str, f: impl Fn(TermPtr) -> Option<TermPtr> + 'static) -> Strategy {
    mk(name, f)
}

/// `build(t)`: always succeeds with the fixed term `t`, ignoring the
/// subject entirely.
pub fn build(name: &'static str, t: TermPtr) -> Strategy {
    mk(name, move |_| Some(t.clone()))
}

/// `term(t)`: succeeds with `t` iff the subject structurally equals `t`.
pub fn term(name: &'static str, t: TermPtr) -> Strategy {
    mk(name, move |subject| {
        if term_eq(&subject, &t) {
            Some(t.clone())
        } else {
            None
        }
    })
}

/// `option(o)`: succeeds with `o`'s payload iff `o` is `Some`, ignoring
/// the subject.
pub fn option(name: &'static str, o: Option<TermPtr>) -> Strategy {
    mk(name, move |_| o.clone())
}

/// `query(p)`: subject matches `T`; `p`'s side effect runs, and the
/// subject passes through unchanged.
pub fn query<T, F>(name: &'static str, f: F) -> Strategy
where
    T: 'static,
    F: Fn(&T) + 'static,
{
    mk(name, move |t| {
        let concrete = t.as_any().downcast_ref::<T>()?;
        f(concrete);
        Some(t.clone())
    })
}

/// `queryf(f)`: always succeeds; `f`'s side effect runs unconditionally,
/// and the subject passes through unchanged.
pub fn queryf(name: &'static str, f: impl Fn(&TermPtr) + 'static) -> Strategy {
    mk(name, move |t| {
        f(&t);
        Some(t)
    })
}

/// `debug(emitter, msg)`: always succeeds; emits `msg` and the subject,
/// then passes the subject through unchanged.
pub fn debug(emitter: Rc<dyn Emitter>, msg: impl Into<String>) -> Strategy {
    let msg = msg.into();
    mk("debug", move |t| {
        emitter.emitln(&format!("{msg}: {t:?}"));
        Some(t)
    })
}

/// `log(s, emitter, msg)`: behaves exactly as `s`, additionally emitting
/// the subject, the outcome, and (on success) the result.
pub fn log(s: Strategy, emitter: Rc<dyn Emitter>, msg: impl Into<String>) -> Strategy {
    let msg = msg.into();
    mk("log", move |t| {
        let result = s.apply(t.clone());
        match &result {
            Some(t2) => emitter.emitln(&format!("{msg}: {t:?} -> success {t2:?}")),
            None => emitter.emitln(&format!("{msg}: {t:?} -> failure")),
        }
        result
    })
}

/// `logfail(s, emitter, msg)`: behaves exactly as `s`, emitting a
/// diagnostic only when `s` fails.
pub fn logfail(s: Strategy, emitter: Rc<dyn Emitter>, msg: impl Into<String>) -> Strategy {
    let msg = msg.into();
    mk("logfail", move |t| {
        let result = s.apply(t.clone());
        if result.is_none() {
            emitter.emitln(&format!("{msg}: {t:?} -> failure"));
        }
        result
    })
}

/// `memo(s)`: caches `s`'s outcome per subject, keyed by the subject's
/// `Rc` identity. A fresh `memo(s)` call gets its own cache; clone the returned
/// `Strategy` (cheap — it's an `Rc`) to share one cache across call
/// sites instead of rebuilding `memo(s)` each time.
pub fn memo(s: Strategy) -> Strategy {
    let cache: Rc<RefCell<FxHashMap<usize, Option<TermPtr>>>> =
        Rc::new(RefCell::new(FxHashMap::default()));
    mk("memo", move |t| {
        let key = Rc::as_ptr(&t) as *const () as usize;
        if let Some(cached) = cache.borrow().get(&key) {
            return cached.clone();
        }
        let result = s.apply(t);
        cache.borrow_mut().insert(key, result.clone());
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{atom, Atom};
    use std::cell::RefCell;

    #[test]
    fn rule_fails_on_type_mismatch_not_panic() {
        let only_i64 = rule::<Atom<i64>, _>("only_i64", |n| Some(atom(n.0 + 1)));
        assert!(only_i64.apply(atom("hi".to_string())).is_none());
        let result = only_i64.apply(atom(41i64)).unwrap();
        assert_eq!(crate::term::downcast_atom::<i64>(&result), Some(42));
    }

    #[test]
    fn build_ignores_subject() {
        let always_zero = build("always_zero", atom(0i64));
        let result = always_zero.apply(atom(999i64)).unwrap();
        assert_eq!(crate::term::downcast_atom::<i64>(&result), Some(0));
    }

    #[test]
    fn memo_runs_once_per_subject() {
        let calls = Rc::new(RefCell::new(0));
        let calls2 = calls.clone();
        let inner = mk("inner", move |t| {
            *calls2.borrow_mut() += 1;
            Some(t)
        });
        let memoized = memo(inner);
        let subject = atom(1i64);
        memoized.apply(subject.clone());
        memoized.apply(subject.clone());
        memoized.apply(subject);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn query_runs_side_effect_and_passes_through() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = seen.clone();
        let collector = query::<Atom<i64>, _>("collector", move |n| seen2.borrow_mut().push(n.0));
        let t = atom(7i64);
        let result = collector.apply(t.clone()).unwrap();
        assert!(Rc::ptr_eq(&t, &result));
        assert_eq!(*seen.borrow(), vec![7]);
    }
}
