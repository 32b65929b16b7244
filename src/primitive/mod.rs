//! Representation of primitives.

use std::fmt;

pub mod builtin;
pub mod number;
pub mod procedure;
pub mod symbol;

pub use self::builtin::{Args, BuiltIn};
pub use self::number::Number;
pub use self::procedure::{Closure, Procedure};
pub use self::symbol::{Symbol, ToSymbol};
use crate::sexp::Sexp;


#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Number(Number),
    Symbol(Symbol),
    Bool(bool),
    Procedure(Procedure),
}


impl Primitive {
    /// Classify an atom token: Integer if it reads as a base-10 integer,
    /// else Float if it reads as a decimal number, else Symbol.
    ///
    /// Total over all atom text.
    pub fn classify<S: AsRef<str>>(atom: S) -> Primitive {
        let atom = atom.as_ref();
        match atom.parse::<Number>() {
            Ok(num) => Primitive::Number(num),
            Err(_) => Primitive::Symbol(Symbol::new(atom)),
        }
    }
}


impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Number(num) => write!(f, "{}", num),
            Primitive::Symbol(s) => write!(f, "{}", s),
            Primitive::Bool(true) => write!(f, "#t"),
            Primitive::Bool(false) => write!(f, "#f"),
            Primitive::Procedure(proc) => write!(f, "{}", proc),
        }
    }
}

impl From<bool> for Sexp {
    fn from(b: bool) -> Self {
        Sexp::Primitive(Primitive::Bool(b))
    }
}

impl From<Primitive> for Sexp {
    fn from(primitive: Primitive) -> Self {
        Sexp::Primitive(primitive)
    }
}
