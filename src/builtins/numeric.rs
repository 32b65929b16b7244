use std::cmp::Ordering;
use std::convert::TryFrom;

use super::{expect_count, host_failure, invalid, number};
use crate::error::{Error, ExpectedCount};
use crate::interpreter::Interpreter;
use crate::primitive::{Args, Number};
use crate::sexp::Sexp;


fn overflow(name: &'static str, interpreter: &Interpreter) -> Error {
    host_failure(name, "integer overflow", interpreter)
}

pub fn add(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    let mut curr = Number::Integer(0);
    for arg in &args {
        let num = number(arg, interpreter)?;
        curr = curr
            .checked_add(num)
            .ok_or_else(|| overflow("+", interpreter))?;
    }
    Ok(curr.into())
}

pub fn sub(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::AtLeast(1), interpreter)?;
    let first = number(&args[0], interpreter)?;
    if args.len() == 1 {
        return first
            .checked_neg()
            .map(Sexp::from)
            .ok_or_else(|| overflow("-", interpreter));
    }

    let mut curr = first;
    for arg in &args[1..] {
        let num = number(arg, interpreter)?;
        curr = curr
            .checked_sub(num)
            .ok_or_else(|| overflow("-", interpreter))?;
    }
    Ok(curr.into())
}

pub fn mul(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    let mut curr = Number::Integer(1);
    for arg in &args {
        let num = number(arg, interpreter)?;
        curr = curr
            .checked_mul(num)
            .ok_or_else(|| overflow("*", interpreter))?;
    }
    Ok(curr.into())
}

/// True division; (/ x) is the reciprocal.
pub fn div(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::AtLeast(1), interpreter)?;
    let (mut curr, rest) = if args.len() == 1 {
        (Number::Integer(1), &args[..])
    } else {
        (number(&args[0], interpreter)?, &args[1..])
    };

    for arg in rest {
        let num = number(arg, interpreter)?;
        curr = curr
            .checked_div(num)
            .ok_or_else(|| host_failure("/", "division by zero", interpreter))?;
    }
    Ok(curr.into())
}


fn compare(
    args: &Args,
    interpreter: &Interpreter,
    accept: fn(Ordering) -> bool,
) -> Result<Sexp, Error> {
    expect_count(args, ExpectedCount::AtLeast(2), interpreter)?;
    let nums = args
        .iter()
        .map(|arg| number(arg, interpreter))
        .collect::<Result<Vec<_>, Error>>()?;

    let holds = nums
        .windows(2)
        .all(|pair| pair[0].compare(pair[1]).map_or(false, accept));
    Ok(holds.into())
}

pub fn gt(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    compare(&args, interpreter, |o| o == Ordering::Greater)
}

pub fn lt(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    compare(&args, interpreter, |o| o == Ordering::Less)
}

pub fn ge(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    compare(&args, interpreter, |o| o != Ordering::Less)
}

pub fn le(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    compare(&args, interpreter, |o| o != Ordering::Greater)
}

pub fn num_eq(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    compare(&args, interpreter, |o| o == Ordering::Equal)
}


pub fn abs(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    number(&args[0], interpreter)?
        .checked_abs()
        .map(Sexp::from)
        .ok_or_else(|| overflow("abs", interpreter))
}

/// Accepts either numbers as arguments or a single list of numbers.
fn extremum(args: &Args, interpreter: &Interpreter, keep: Ordering) -> Result<Sexp, Error> {
    expect_count(args, ExpectedCount::AtLeast(1), interpreter)?;
    let candidates = match args[0].as_list() {
        Some(list) if args.len() == 1 => {
            if list.is_empty() {
                return Err(invalid(&args[0], "non-empty list", interpreter));
            }
            list
        }
        _ => &args[..],
    };

    let mut best = number(&candidates[0], interpreter)?;
    for candidate in &candidates[1..] {
        let num = number(candidate, interpreter)?;
        if num.compare(best) == Some(keep) {
            best = num;
        }
    }
    Ok(best.into())
}

pub fn max(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    extremum(&args, interpreter, Ordering::Greater)
}

pub fn min(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    extremum(&args, interpreter, Ordering::Less)
}


/// Round to nearest, ties to even.
fn round_half_even(x: f64) -> f64 {
    let rounded = x.round();
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        rounded
    }
}

fn to_integer(x: f64, name: &'static str, interpreter: &Interpreter) -> Result<Number, Error> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if x.is_finite() && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Ok(Number::Integer(x as i64))
    } else {
        Err(host_failure(name, "cannot convert to integer", interpreter))
    }
}

/// (round x) yields an Integer; (round x ndigits) keeps x's type.
pub fn round(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Between(1, 2), interpreter)?;
    let x = number(&args[0], interpreter)?;

    let ndigits = match args.get(1) {
        None => {
            return match x {
                Number::Integer(_) => Ok(x.into()),
                Number::Float(f) => Ok(to_integer(round_half_even(f), "round", interpreter)?.into()),
            };
        }
        Some(arg) => match number(arg, interpreter)? {
            Number::Integer(n) => n,
            Number::Float(_) => return Err(invalid(arg, "integer", interpreter)),
        },
    };

    let n = ndigits.max(-308).min(308) as i32;
    match x {
        Number::Integer(_) if n >= 0 => Ok(x.into()),
        Number::Integer(i) => {
            let scale = 10f64.powi(-n);
            let rounded = round_half_even(i as f64 / scale) * scale;
            Ok(to_integer(rounded, "round", interpreter)?.into())
        }
        Number::Float(f) => {
            let scale = 10f64.powi(n);
            let scaled = f * scale;
            if !scaled.is_finite() {
                return Ok(x.into());
            }
            Ok(Number::Float(round_half_even(scaled) / scale).into())
        }
    }
}

pub fn expt(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(2), interpreter)?;
    let base = number(&args[0], interpreter)?;
    let exponent = number(&args[1], interpreter)?;

    match (base, exponent) {
        (Number::Integer(b), Number::Integer(e)) if e >= 0 => {
            let e = u32::try_from(e).map_err(|_| overflow("expt", interpreter))?;
            b.checked_pow(e)
                .map(Sexp::from)
                .ok_or_else(|| overflow("expt", interpreter))
        }
        _ if base.is_zero() && exponent.as_float() < 0.0 => {
            Err(host_failure("expt", "division by zero", interpreter))
        }
        _ => Ok(Number::Float(base.as_float().powf(exponent.as_float())).into()),
    }
}


macro_rules! float_fn {
    ($name:ident, $op:expr) => {
        pub fn $name(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
            expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
            let x = number(&args[0], interpreter)?.as_float();
            Ok(Number::Float($op(x)).into())
        }
    };
}

float_fn!(sin, f64::sin);
float_fn!(cos, f64::cos);
float_fn!(tan, f64::tan);
float_fn!(exp, f64::exp);

pub fn sqrt(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    let x = number(&args[0], interpreter)?.as_float();
    if x < 0.0 {
        return Err(host_failure("sqrt", "math domain error", interpreter));
    }
    Ok(Number::Float(x.sqrt()).into())
}

/// (log x) is the natural log; (log x base) otherwise.
pub fn log(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Between(1, 2), interpreter)?;
    let x = number(&args[0], interpreter)?.as_float();
    if x <= 0.0 {
        return Err(host_failure("log", "math domain error", interpreter));
    }

    match args.get(1) {
        None => Ok(Number::Float(x.ln()).into()),
        Some(arg) => {
            let base = number(arg, interpreter)?.as_float();
            if base <= 0.0 {
                return Err(host_failure("log", "math domain error", interpreter));
            }
            if base == 1.0 {
                return Err(host_failure("log", "division by zero", interpreter));
            }
            Ok(Number::Float(x.ln() / base.ln()).into())
        }
    }
}

pub fn floor(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    match number(&args[0], interpreter)? {
        num @ Number::Integer(_) => Ok(num.into()),
        Number::Float(f) => Ok(to_integer(f.floor(), "floor", interpreter)?.into()),
    }
}

pub fn ceil(args: Args, interpreter: &mut Interpreter) -> Result<Sexp, Error> {
    expect_count(&args, ExpectedCount::Exactly(1), interpreter)?;
    match number(&args[0], interpreter)? {
        num @ Number::Integer(_) => Ok(num.into()),
        Number::Float(f) => Ok(to_integer(f.ceil(), "ceil", interpreter)?.into()),
    }
}
