//! Declarative boilerplate helpers for implementing [`crate::term::Term`].
//!
//! Rust has no built-in reflection, so a concrete node type must wire up
//! its own `as_any`/`as_product` (or `as_rewritable`/`as_mapping`/
//! `as_sequence`) glue by hand. These macros generate that glue; the
//! shape-specific trait (`Product`, `Rewritable`, ...) is still
//! implemented by the host, since that is where the real per-type
//! knowledge (fields, arity, rebuild) lives.

/// Implements [`crate::term::Term`] for a type that also implements
/// [`crate::term::Rewritable`].
#[macro_export]
macro_rules! impl_term_as_rewritable {
    ($ty:ty) => {
        impl $crate::term::Term for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
            fn as_rewritable(&self) -> Option<&dyn $crate::term::Rewritable> {
                Some(self)
            }
        }
    };
}

/// Implements [`crate::term::Term`] for a type that also implements
/// [`crate::term::Product`].
#[macro_export]
macro_rules! impl_term_as_product {
    ($ty:ty) => {
        impl $crate::term::Term for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
            fn as_product(&self) -> Option<&dyn $crate::term::Product> {
                Some(self)
            }
        }
    };
}

/// Implements [`crate::term::Term`] for a type that also implements
/// [`crate::term::Mapping`].
#[macro_export]
macro_rules! impl_term_as_mapping {
    ($ty:ty) => {
        impl $crate::term::Term for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
            fn as_mapping(&self) -> Option<&dyn $crate::term::Mapping> {
                Some(self)
            }
        }
    };
}

/// Implements [`crate::term::Term`] for a type that also implements
/// [`crate::term::Sequence`].
#[macro_export]
macro_rules! impl_term_as_sequence {
    ($ty:ty) => {
        impl $crate::term::Term for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
            fn as_sequence(&self) -> Option<&dyn $crate::term::Sequence> {
                Some(self)
            }
        }
    };
}
