use super::{expect_count, invalid, list_arg};
use crate::error::{Error, ExpectedCount};
use crate::interpreter::Interpreter;
use crate::primitive::{Args, Number};
use crate::sexp::Sexp;


fn non_empty<'a>(arg: &'a Sexp, interpreter: &Interpreter) -> Result<&'a [Sexp], Error> {
    match arg.as_list() {
        Some(list) if !list.is_empty() => Ok(list),
        _ => Err(invalid(arg, "non-empty list", interpreter)),
    }
}

pub fn car(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    let list = non_empty(&args[0], interpreter)?;
    Ok(list[0].clone())
}

pub fn cdr(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    let list = non_empty(&args[0], interpreter)?;
    Ok(list[1..].iter().cloned().collect())
}

/// (cons x list). Only proper lists exist, so the tail must be a list.
pub fn cons(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(2), interpreter)?;
    let tail = list_arg(&args[1], interpreter)?;
    Ok(std::iter::once(args[0].clone())
        .chain(tail.iter().cloned())
        .collect())
}

pub fn append(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    let mut result = Vec::<Sexp>::new();
    for arg in &args {
        result.extend(list_arg(arg, interpreter)?.iter().cloned());
    }
    Ok(result.into())
}

pub fn list(args: Args, _interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    Ok(args.into())
}

pub fn is_list(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    Ok(args[0].is_list().into())
}

pub fn length(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    let list = list_arg(&args[0], interpreter)?;
    Ok(Number::Integer(list.len() as i64).into())
}

pub fn is_null(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    Ok(args[0].is_nil().into())
}
