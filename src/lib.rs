//! A small Lisp: tokenizer, parser, environment-based evaluator, builtin
//! library, and an interactive driver.
//!
//! Clients wanting logs should set up a `log` implementation before
//! creating an Interpreter. See:
//!   https://github.com/rust-lang/log#in-executables.

use crate::error::Error;
use crate::interpreter::Interpreter;
use crate::sexp::Sexp;


#[macro_use]
pub mod error;
#[macro_use]
pub mod sexp;

pub mod builtins;
pub mod continuation;
pub mod env;
pub mod interpreter;
pub mod options;
pub mod parser;
pub mod primitive;
pub mod repl;
pub mod token;

pub mod prelude {
    pub use crate::error::{Error, ErrorKind, ExpectedCount};
    pub use crate::interpreter::Interpreter;
    pub use crate::options::Options;
    pub use crate::primitive::{BuiltIn, Closure, Number, Primitive, Procedure, Symbol, ToSymbol};
    pub use crate::sexp::Sexp;
    // Macros.
    pub use crate::{err, list};
}


/// Evaluate `program` in a fresh session, returning the value of its last
/// top-level expression.
pub fn run<S: AsRef<str>>(program: S) -> Result<Sexp, Error> {
    Interpreter::default().run(program)
}
