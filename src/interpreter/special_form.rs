//! Special-form keywords and the shape checks for their operands.
//!
//! Wrappers only validate and destructure; evaluation order is left to the
//! Interpreter.

use std::borrow::Cow;
use std::collections::HashSet;
use std::convert::TryFrom;

use crate::error::{
    ErrorKind::{self, *},
    ExpectedCount,
};
use crate::primitive::{Primitive, Symbol};
use crate::sexp::Sexp;


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpecialForm {
    Quote,
    If,
    Define,
    Set,
    Lambda,
    Begin,
}

impl SpecialForm {
    pub const ALL: [SpecialForm; 6] = [
        SpecialForm::Quote,
        SpecialForm::If,
        SpecialForm::Define,
        SpecialForm::Set,
        SpecialForm::Lambda,
        SpecialForm::Begin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpecialForm::Quote => "quote",
            SpecialForm::If => "if",
            SpecialForm::Define => "define",
            SpecialForm::Set => "set!",
            SpecialForm::Lambda => "lambda",
            SpecialForm::Begin => "begin",
        }
    }

    /// Keywords are recognized by name alone, whatever the environment binds
    /// them to.
    pub fn from_sexp(sexp: &Sexp) -> Option<SpecialForm> {
        let symbol = <&Symbol>::try_from(sexp).ok()?;
        SpecialForm::ALL
            .iter()
            .copied()
            .find(|form| form.name() == symbol.as_str())
    }
}


pub fn quote_wrapper(args: &[Sexp]) -> Result<&Sexp, ErrorKind> {
    ExpectedCount::Exactly(1).check(args.len())?;
    Ok(&args[0])
}

/// (test, consequent, alternative).
pub fn if_wrapper(args: &[Sexp]) -> Result<(&Sexp, &Sexp, Option<&Sexp>), ErrorKind> {
    ExpectedCount::Between(2, 3).check(args.len())?;
    Ok((&args[0], &args[1], args.get(2)))
}

/// Shared by define and set!.
pub fn binding_wrapper(args: &[Sexp]) -> Result<(&Symbol, &Sexp), ErrorKind> {
    ExpectedCount::Exactly(2).check(args.len())?;
    let name = <&Symbol>::try_from(&args[0]).map_err(|given| InvalidArgument {
        given: given.clone(),
        expected: Cow::Borrowed("symbol"),
    })?;
    Ok((name, &args[1]))
}

/// (params, body).
pub fn make_procedure_wrapper(args: &[Sexp]) -> Result<(Vec<Symbol>, &Sexp), ErrorKind> {
    ExpectedCount::Exactly(2).check(args.len())?;

    let param_sexps = args[0].as_list().ok_or_else(|| InvalidArgument {
        given: args[0].clone(),
        expected: Cow::Borrowed("list of parameter symbols"),
    })?;

    let mut seen = HashSet::<&str>::with_capacity(param_sexps.len());
    let mut params = Vec::<Symbol>::with_capacity(param_sexps.len());
    for param in param_sexps {
        let name = match param {
            Sexp::Primitive(Primitive::Symbol(symbol)) => symbol,
            _ => {
                return Err(InvalidArgument {
                    given: param.clone(),
                    expected: Cow::Borrowed("symbol"),
                });
            }
        };
        if !seen.insert(name.as_str()) {
            return Err(InvalidArgument {
                given: param.clone(),
                expected: Cow::Borrowed("unique parameter name"),
            });
        }
        params.push(name.clone());
    }

    Ok((params, &args[1]))
}

pub fn begin_wrapper(args: &[Sexp]) -> Result<&[Sexp], ErrorKind> {
    ExpectedCount::AtLeast(1).check(args.len())?;
    Ok(args)
}
