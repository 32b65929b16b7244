//! Errors raised while reading or evaluating a program.
//!
//! Every error is terminal for the top-level expression being evaluated. An
//! Error raised during evaluation carries a snapshot of the execution trace.

use std::borrow::Cow;
use std::fmt;

use self::ErrorKind::*;
use self::ExpectedCount::*;
use crate::continuation::Continuation;
use crate::interpreter::ExecFrame;
use crate::parser::ParseError;
use crate::primitive::Symbol;
use crate::sexp::Sexp;


/// Creates a stateful Error wrapped in Err.
#[macro_export]
macro_rules! err {
    ($interpreter:expr, $($kind:tt)+) => {
        Err($crate::error::Error::with_cont(
            $interpreter.exec_state().clone(),
            $crate::error::ErrorKind::$($kind)+,
        ))
    };
}


pub type ErrorCont = Continuation<ExecFrame>;

pub struct Error {
    cont: Option<ErrorCont>,
    kind: ErrorKind,
}

#[derive(Debug)]
pub enum ErrorKind {
    Parse(ParseError),
    UnboundSymbol(Symbol),
    WrongArgumentCount {
        given: usize,
        expected: ExpectedCount,
    },
    InvalidArgument {
        given: Sexp,
        expected: Cow<'static, str>,
    },
    NotAProcedure(Sexp),
    BuiltIn {
        name: &'static str,
        reason: Cow<'static, str>,
    },
    DepthOverflow {
        max: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExpectedCount {
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}


impl Error {
    /// Prefer using err! for convenience.
    pub fn with_cont(cont: ErrorCont, kind: ErrorKind) -> Self {
        Self {
            cont: Some(cont),
            kind,
        }
    }

    /// Errors raised before evaluation (parsing) have no trace.
    pub fn no_cont(kind: ErrorKind) -> Self {
        Self { cont: None, kind }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn cont(&self) -> Option<&ErrorCont> {
        self.cont.as_ref()
    }

    /// Fatal errors abort the whole top-level evaluation regardless of
    /// where they were raised.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, DepthOverflow { .. })
    }

    /// Application forms active when the error was raised, innermost first.
    pub fn trace(&self) -> impl Iterator<Item = &Sexp> {
        self.cont
            .iter()
            .flat_map(|cont| cont.iter())
            .filter_map(|frame| frame.context())
    }
}

impl ErrorKind {
    pub fn category(&self) -> &'static str {
        match self {
            Parse(..) => "SyntaxError",
            UnboundSymbol(..) => "UnboundSymbolError",
            WrongArgumentCount { .. } => "ArityError",
            InvalidArgument { .. } | NotAProcedure(..) => "TypeError",
            BuiltIn { .. } => "BuiltinError",
            DepthOverflow { .. } => "StackOverflow",
        }
    }
}

impl ExpectedCount {
    pub fn accepts(&self, given: usize) -> bool {
        match *self {
            Exactly(n) => given == n,
            AtLeast(n) => given >= n,
            Between(lo, hi) => lo <= given && given <= hi,
        }
    }

    pub fn check(self, given: usize) -> Result<(), ErrorKind> {
        if self.accepts(given) {
            Ok(())
        } else {
            Err(WrongArgumentCount {
                given,
                expected: self,
            })
        }
    }
}


impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.category())?;
        match self {
            Parse(err) => write!(f, "{}", err),
            UnboundSymbol(symbol) => write!(f, "Unbound symbol: \"{}\"", symbol),
            WrongArgumentCount { given, expected } => write!(
                f,
                "Wrong argument count: given {}, expected {}",
                given, expected
            ),
            InvalidArgument { given, expected } => write!(
                f,
                "Invalid argument: given {}, expected {}",
                given, expected
            ),
            NotAProcedure(given) => write!(f, "Not a procedure: {}", given),
            BuiltIn { name, reason } => write!(f, "{}: {}", name, reason),
            DepthOverflow { max } => {
                write!(f, "Maximum evaluation depth ({}) exceeded", max)
            }
        }
    }
}

impl fmt::Display for ExpectedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exactly(exactly) => write!(f, "{}", exactly),
            AtLeast(minimum) => write!(f, "at least {}", minimum),
            Between(minimum, maximum) => write!(f, "{} to {}", minimum, maximum),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        for context in self.trace() {
            write!(f, "; {}", context)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::no_cont(Parse(err))
    }
}
