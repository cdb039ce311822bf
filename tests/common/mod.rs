//! A small arithmetic AST (`Num`, `Add`, `Sub`, `Mul`, `Var`) used only
//! as a test fixture for the engine's end-to-end rewriting scenarios.
//! Not part of the public crate — the engine itself has no opinion on
//! any particular term language; example languages are out of scope.

use std::any::{Any, TypeId};
use std::rc::Rc;

use stratum::impl_term_as_product;
use stratum::term::{atom, downcast_atom, Product, Term, TermPtr};

#[derive(Debug, Clone)]
pub enum Expr {
    Num(i64),
    Add(TermPtr, TermPtr),
    Sub(TermPtr, TermPtr),
    Mul(TermPtr, TermPtr),
    Var(String),
}

impl Expr {
    pub fn num(n: i64) -> TermPtr {
        Rc::new(Expr::Num(n))
    }
    pub fn add(l: TermPtr, r: TermPtr) -> TermPtr {
        Rc::new(Expr::Add(l, r))
    }
    pub fn sub(l: TermPtr, r: TermPtr) -> TermPtr {
        Rc::new(Expr::Sub(l, r))
    }
    pub fn mul(l: TermPtr, r: TermPtr) -> TermPtr {
        Rc::new(Expr::Mul(l, r))
    }
    pub fn var(s: impl Into<String>) -> TermPtr {
        Rc::new(Expr::Var(s.into()))
    }

    pub fn as_num(t: &TermPtr) -> Option<i64> {
        match t.as_any().downcast_ref::<Expr>()? {
            Expr::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_var(t: &TermPtr) -> Option<String> {
        match t.as_any().downcast_ref::<Expr>()? {
            Expr::Var(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl_term_as_product!(Expr);

impl Product for Expr {
    fn class_id(&self) -> TypeId {
        TypeId::of::<Expr>()
    }

    fn class_name(&self) -> &'static str {
        match self {
            Expr::Num(_) => "Num",
            Expr::Add(..) => "Add",
            Expr::Sub(..) => "Sub",
            Expr::Mul(..) => "Mul",
            Expr::Var(_) => "Var",
        }
    }

    fn fields(&self) -> Vec<TermPtr> {
        match self {
            Expr::Num(n) => vec![atom(*n)],
            Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Mul(l, r) => vec![l.clone(), r.clone()],
            Expr::Var(s) => vec![atom(s.clone())],
        }
    }

    fn rebuild(&self, fields: Vec<TermPtr>) -> TermPtr {
        assert_eq!(fields.len(), self.fields().len(), "arity mismatch rebuilding Expr");
        match self {
            Expr::Num(_) => {
                let n = downcast_atom::<i64>(&fields[0]).expect("Num field must carry an i64");
                Rc::new(Expr::Num(n))
            }
            Expr::Add(..) => Rc::new(Expr::Add(fields[0].clone(), fields[1].clone())),
            Expr::Sub(..) => Rc::new(Expr::Sub(fields[0].clone(), fields[1].clone())),
            Expr::Mul(..) => Rc::new(Expr::Mul(fields[0].clone(), fields[1].clone())),
            Expr::Var(_) => {
                let s = downcast_atom::<String>(&fields[0]).expect("Var field must carry a String");
                Rc::new(Expr::Var(s))
            }
        }
    }
}
