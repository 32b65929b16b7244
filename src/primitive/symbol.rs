use std::borrow::Borrow;
use std::convert::TryFrom;
use std::fmt;

use super::Primitive;
use crate::sexp::Sexp;


/// Case-sensitive identifier.
///
/// Any non-empty run of non-whitespace, non-paren characters which does not
/// classify as a number is a Symbol.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Symbol(String);

pub trait ToSymbol {
    fn to_symbol(&self) -> Symbol;
}


impl Symbol {
    pub fn new<S: AsRef<str>>(sym: S) -> Symbol {
        Symbol(sym.as_ref().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}


impl<S: AsRef<str>> ToSymbol for S {
    fn to_symbol(&self) -> Symbol {
        Symbol::new(self)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<String> for Symbol {
    fn borrow(&self) -> &String {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<Symbol> for Sexp {
    fn from(symbol: Symbol) -> Self {
        Sexp::Primitive(Primitive::Symbol(symbol))
    }
}

impl<'a> TryFrom<&'a Sexp> for &'a Symbol {
    type Error = &'a Sexp;

    fn try_from(value: &'a Sexp) -> Result<Self, Self::Error> {
        if let Sexp::Primitive(Primitive::Symbol(symbol)) = value {
            Ok(symbol)
        } else {
            Err(value)
        }
    }
}
