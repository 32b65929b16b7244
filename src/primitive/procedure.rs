//! Callable values: host builtins and user closures.

use std::fmt;
use std::rc::Rc;

use super::{BuiltIn, Primitive, Symbol};
use crate::env::{FrameId, FrameRef};
use crate::sexp::Sexp;


#[derive(Clone, Debug, PartialEq)]
pub enum Procedure {
    BuiltIn(BuiltIn),
    Closure(Closure),
}

/// User-defined procedure. The body is shared across every call, and the
/// defining environment is held by counted handle into the frame arena.
#[derive(Clone, Debug)]
pub struct Closure {
    name: Option<Symbol>,
    params: Rc<[Symbol]>,
    body: Rc<Sexp>,
    env: FrameRef,
}


impl Procedure {
    pub fn name(&self) -> Option<&str> {
        match self {
            Procedure::BuiltIn(builtin) => Some(builtin.name()),
            Procedure::Closure(closure) => closure.name().map(|s| s.as_str()),
        }
    }
}

impl Closure {
    pub fn new(params: Vec<Symbol>, body: Sexp, env: FrameRef) -> Closure {
        Closure {
            name: None,
            params: params.into(),
            body: Rc::new(body),
            env,
        }
    }

    pub fn name(&self) -> Option<&Symbol> {
        self.name.as_ref()
    }

    pub fn params(&self) -> &[Symbol] {
        &self.params
    }

    pub fn body(&self) -> &Sexp {
        &self.body
    }

    pub fn env(&self) -> FrameId {
        self.env.id()
    }

    pub fn frame_ref(&self) -> &FrameRef {
        &self.env
    }

    /// Name an anonymous closure. Closures which already carry a name keep
    /// it, so `(define g f)` still prints as `f`.
    pub fn named(mut self, name: &Symbol) -> Closure {
        if self.name.is_none() {
            self.name = Some(name.clone());
        }
        self
    }
}


impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
            && self.env == other.env
            && self.params == other.params
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Procedure::BuiltIn(builtin) => write!(f, "{}", builtin),
            Procedure::Closure(closure) => write!(f, "{}", closure),
        }
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "[PROCEDURE_{}]", name),
            None => write!(f, "[LAMBDA]"),
        }
    }
}

impl From<BuiltIn> for Sexp {
    fn from(builtin: BuiltIn) -> Self {
        Sexp::Primitive(Primitive::Procedure(Procedure::BuiltIn(builtin)))
    }
}

impl From<Closure> for Sexp {
    fn from(closure: Closure) -> Self {
        Sexp::Primitive(Primitive::Procedure(Procedure::Closure(closure)))
    }
}

impl From<Procedure> for Sexp {
    fn from(procedure: Procedure) -> Self {
        Sexp::Primitive(Primitive::Procedure(procedure))
    }
}
