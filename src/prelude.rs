//! A single `use stratum::prelude::*` import surface, gathering the
//! names a host program reaches for most often: the term-reflection
//! capabilities, the `Strategy` core, and the full combinator library.

pub use crate::config::RewriteConfig;
pub use crate::emitter::{Emitter, NullEmitter, StdoutEmitter, TracingEmitter};
pub use crate::term::{
    arity_of, atom, children_of, downcast_atom, rebuild_with_children, shape_of, term_eq,
    unwrap_primitive, AssocMap, Atom, Mapping, Pair, Product, Rewritable, Sequence, Shape, Term,
    TermPtr,
};

pub use crate::strategy::builders::{
    build, debug, log, logfail, memo, option, query, queryf, rule, rulef, rulefs, strategy_fn,
    strategyf, term,
};
pub use crate::strategy::combinators::{
    alldownup2, allbu, alltd, and, attempt, bottomup, breadthfirst, doloop, downup, everywherebu,
    everywhere_s, everywheretd, innermost, innermost2, ior, lastly, leaves, loop_while, loopiter,
    loopnot, manybu, manytd, map_seq, not, oncebu, oncetd, or, outermost, reduce, repeat, repeat1,
    repeat_n, repeatuntil, restore, restorealways, somebu, sometd, test, topdown, topdown_s,
    where_, Order,
};
pub use crate::strategy::core::{choice, fail, guarded, id, inclusive, mk, recursive, seq, Strategy};
pub use crate::strategy::query::{alltdfold, collect, collectall, count, everything, para};
pub use crate::strategy::traversal::{all, child, congruence, one, some};
