//! The `Sequence` capability — an ordered list of terms, the lowest-
//! precedence shape.

use std::rc::Rc;

use super::{Term, TermPtr};

pub trait Sequence: Term {
    /// The elements, in order.
    fn elements(&self) -> Vec<TermPtr>;

    /// Rebuild the sequence from a replacement element list.
    fn rebuild(&self, elements: Vec<TermPtr>) -> TermPtr;
}

impl Sequence for Vec<TermPtr> {
    fn elements(&self) -> Vec<TermPtr> {
        self.clone()
    }

    fn rebuild(&self, elements: Vec<TermPtr>) -> TermPtr {
        Rc::new(elements)
    }
}
