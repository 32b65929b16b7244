//! Creation of the builtin environment.
//!
//! Builtins receive already-evaluated arguments and never see syntax.

use lazy_static::lazy_static;

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::env::{FrameId, MemEnv};
use crate::error::{Error, ErrorKind, ExpectedCount};
use crate::interpreter::Interpreter;
use crate::primitive::{Args, BuiltIn, Number, Primitive, Procedure, Symbol};
use crate::sexp::Sexp;

use self::list::*;
use self::numeric::*;

mod list;
mod numeric;


macro_rules! builtins {
    [$($n:expr => $x:expr),+ $(,)?] => {
        {
            let mut m = BTreeMap::new();
            $(
                m.insert($n, BuiltIn::new($n, $x));
            )+
            m
        }
    };
}

lazy_static! {
    pub static ref BUILTINS: BTreeMap<&'static str, BuiltIn> = builtins![
        // Arithmetic.
        "+" => add,
        "-" => sub,
        "*" => mul,
        "/" => div,
        // Comparison.
        ">" => gt,
        "<" => lt,
        ">=" => ge,
        "<=" => le,
        "=" => num_eq,
        "eq?" => is_eq,
        "equal?" => is_equal,
        // Lists.
        "car" => car,
        "cdr" => cdr,
        "cons" => cons,
        "append" => append,
        "list" => list,
        "list?" => is_list,
        "length" => length,
        "null?" => is_null,
        // Predicates.
        "number?" => is_number,
        "symbol?" => is_symbol,
        "procedure?" => is_procedure,
        // Utility.
        "abs" => abs,
        "max" => max,
        "min" => min,
        "not" => not,
        "round" => round,
        "expt" => expt,
        "apply" => apply,
        "map" => map,
        "print" => print,
        "begin" => begin,
        // Math library.
        "sqrt" => sqrt,
        "sin" => sin,
        "cos" => cos,
        "tan" => tan,
        "exp" => exp,
        "log" => log,
        "floor" => floor,
        "ceil" => ceil,
    ];
}

/// Install every builtin plus the global constants into `frame`.
///
/// Returns the number of bindings made.
pub fn install(env: &mut MemEnv, frame: FrameId) -> usize {
    let constants: [(&str, Sexp); 4] = [
        ("#t", true.into()),
        ("#f", false.into()),
        ("pi", Number::Float(std::f64::consts::PI).into()),
        ("e", Number::Float(std::f64::consts::E).into()),
    ];

    let mut count = 0;
    for (name, builtin) in BUILTINS.iter() {
        env.define(frame, Symbol::new(name), (*builtin).into());
        count += 1;
    }
    for (name, value) in constants.iter() {
        env.define(frame, Symbol::new(name), value.clone());
        count += 1;
    }
    count
}


// Argument helpers; errors carry the interpreter's current trace.

fn stateful(interpreter: &Interpreter, kind: ErrorKind) -> Error {
    Error::with_cont(interpreter.exec_state().clone(), kind)
}

fn expect_count(
    args: &Args,
    expected: ExpectedCount,
    interpreter: &Interpreter,
) -> Result<(), Error> {
    expected
        .check(args.len())
        .map_err(|kind| stateful(interpreter, kind))
}

fn invalid(given: &Sexp, expected: &'static str, interpreter: &Interpreter) -> Error {
    stateful(
        interpreter,
        ErrorKind::InvalidArgument {
            given: given.clone(),
            expected: Cow::Borrowed(expected),
        },
    )
}

fn host_failure(name: &'static str, reason: &'static str, interpreter: &Interpreter) -> Error {
    stateful(
        interpreter,
        ErrorKind::BuiltIn {
            name,
            reason: Cow::Borrowed(reason),
        },
    )
}

fn number(arg: &Sexp, interpreter: &Interpreter) -> Result<Number, Error> {
    match arg {
        Sexp::Primitive(Primitive::Number(num)) => Ok(*num),
        _ => Err(invalid(arg, "number", interpreter)),
    }
}

fn list_arg<'a>(arg: &'a Sexp, interpreter: &Interpreter) -> Result<&'a [Sexp], Error> {
    arg.as_list().ok_or_else(|| invalid(arg, "list", interpreter))
}

fn procedure(arg: &Sexp, interpreter: &Interpreter) -> Result<Procedure, Error> {
    arg.as_procedure()
        .cloned()
        .ok_or_else(|| invalid(arg, "procedure", interpreter))
}


// Equality, predicates, and higher-order builtins.

fn is_eq(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(2), interpreter)?;
    Ok(args[0].is_same(&args[1]).into())
}

fn is_equal(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(2), interpreter)?;
    Ok(args[0].is_equal(&args[1]).into())
}

fn not(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    Ok((!args[0].is_truthy()).into())
}

fn is_number(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    Ok(matches!(args[0], Sexp::Primitive(Primitive::Number(_))).into())
}

fn is_symbol(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    Ok(matches!(args[0], Sexp::Primitive(Primitive::Symbol(_))).into())
}

fn is_procedure(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    Ok(args[0].as_procedure().is_some().into())
}

/// (apply proc args).
fn apply(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(2), interpreter)?;
    let proc = procedure(&args[0], interpreter)?;
    let proc_args = list_arg(&args[1], interpreter)?.to_vec();
    interpreter.apply(&proc, proc_args)
}

/// (map proc list...), stopping at the shortest list.
fn map(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::AtLeast(2), interpreter)?;
    let proc = procedure(&args[0], interpreter)?;
    let lists = args[1..]
        .iter()
        .map(|arg| list_arg(arg, interpreter))
        .collect::<Result<Vec<_>, Error>>()?;

    let len = lists.iter().map(|l| l.len()).min().unwrap_or(0);
    let mut results = Vec::<Sexp>::with_capacity(len);
    for i in 0..len {
        let proc_args = lists.iter().map(|l| l[i].clone()).collect::<Args>();
        results.push(interpreter.apply(&proc, proc_args)?);
    }
    Ok(results.into())
}

fn print(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    let mut rendered = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    rendered.push('\n');
    interpreter.write_output(&rendered);
    Ok(Sexp::default())
}

fn begin(mut args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::AtLeast(1), interpreter)?;
    Ok(args.pop().unwrap_or_default())
}
