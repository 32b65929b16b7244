//! Representation of builtin methods.

use std::fmt;

use crate::error::Error;
use crate::interpreter::Interpreter;
use crate::sexp::Sexp;


pub type Args = Vec<Sexp>;

/// Host function backing a BuiltIn. Receives already-evaluated arguments.
pub type BuiltInFn = fn(Args, &mut Interpreter) -> Result<Sexp, Error>;

#[derive(Clone, Copy)]
pub struct BuiltIn {
    name: &'static str,
    fun: BuiltInFn,
}

impl BuiltIn {
    pub fn new(name: &'static str, fun: BuiltInFn) -> BuiltIn {
        BuiltIn { name, fun }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
        (self.fun)(args, interpreter)
    }
}

impl PartialEq for BuiltIn {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[BUILTIN_{} @ {:p}]", self.name, &self.fun)
    }
}

impl fmt::Display for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[BUILTIN_{}]", self.name)
    }
}
