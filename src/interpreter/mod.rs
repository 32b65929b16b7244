//! Evaluation of S-exps against an environment.
//!
//! An Interpreter is the long-lived state of one session: the frame arena
//! (whose root holds the builtins and every top-level definition), the
//! execution trace, and the current evaluation depth.

use log::{debug, info};
use std::mem;

use crate::builtins;
use crate::continuation::Continuation;
use crate::env::{FrameId, MemEnv};
use crate::error::{Error, ErrorKind, ExpectedCount};
use crate::options::Options;
use crate::parser;
use crate::primitive::{Args, Closure, Primitive, Procedure, Symbol};
use crate::sexp::Sexp;

pub use self::exec_frame::ExecFrame;
pub use self::special_form::SpecialForm;
use self::special_form::*;

mod exec_frame;
mod special_form;


pub struct Interpreter {
    env: MemEnv,
    global: FrameId,
    exec_state: Continuation<ExecFrame>,
    depth: usize,
    // Output of `print` awaiting take_output; None writes it to stdout.
    captured: Option<String>,

    options: Options,
}


impl Interpreter {
    pub fn new(options: Options) -> Self {
        let mut env = MemEnv::new();
        let global = env.root();
        let count = builtins::install(&mut env, global);
        info!("Installed {} builtins into {}", count, global);

        Self {
            env,
            global,
            exec_state: Continuation::new(ExecFrame::root()),
            depth: 0,
            captured: None,
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn env(&self) -> &MemEnv {
        &self.env
    }

    pub fn global(&self) -> FrameId {
        self.global
    }

    pub fn exec_state(&self) -> &Continuation<ExecFrame> {
        &self.exec_state
    }

    /// Hold `print` output for take_output rather than writing it to stdout.
    pub fn capture_output(&mut self, capture: bool) {
        self.captured = if capture {
            Some(self.captured.take().unwrap_or_default())
        } else {
            None
        };
    }

    pub fn take_output(&mut self) -> String {
        self.captured.as_mut().map(mem::take).unwrap_or_default()
    }

    pub fn write_output(&mut self, text: &str) {
        match &mut self.captured {
            Some(buffer) => buffer.push_str(text),
            None => print!("{}", text),
        }
    }

    /// Names bound in the global frame, sorted.
    pub fn global_symbols(&self) -> Vec<Symbol> {
        let mut symbols = self.env.symbols(self.global).cloned().collect::<Vec<_>>();
        symbols.sort();
        symbols
    }

    /// Parse `program` and evaluate each top-level expression in the global
    /// frame, returning the last value (nil for an empty program).
    ///
    /// Nothing is evaluated if the program fails to parse. Definitions made
    /// by expressions preceding a failing one remain in effect.
    pub fn run<S: AsRef<str>>(&mut self, program: S) -> Result<Sexp, Error> {
        let mut last = Sexp::default();
        for sexp in parser::parse(program)? {
            last = self.eval_top(&sexp)?;
        }
        Ok(last)
    }

    /// Evaluate in the global frame, restoring session state on error.
    ///
    /// Captured frames which became unreachable are collected afterwards.
    pub fn eval_top(&mut self, sexp: &Sexp) -> Result<Sexp, Error> {
        let result = self.eval(sexp, self.global);
        if result.is_err() {
            self.depth = 0;
            self.exec_state.unwind();
        }
        if self.depth == 0 && self.env.has_captured() {
            self.env.collect();
        }
        result
    }

    pub fn eval(&mut self, sexp: &Sexp, frame: FrameId) -> Result<Sexp, Error> {
        let max = *self.options.max_depth();
        if self.depth >= max {
            return err!(self, DepthOverflow { max });
        }

        self.depth += 1;
        let result = self.eval_inner(sexp, frame);
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, sexp: &Sexp, frame: FrameId) -> Result<Sexp, Error> {
        debug!("Interpreting: {}", sexp);
        let list = match sexp {
            Sexp::Primitive(Primitive::Symbol(symbol)) => {
                return match self.env.lookup(frame, symbol.as_str()) {
                    Some(value) => Ok(value.clone()),
                    None => err!(self, UnboundSymbol(symbol.clone())),
                };
            }
            Sexp::Primitive(_) => return Ok(sexp.clone()),
            Sexp::List(list) => list,
        };

        let (head, tail) = match list.split_first() {
            Some(split) => split,
            None => return Ok(sexp.clone()),
        };
        if let Some(form) = SpecialForm::from_sexp(head) {
            return self.eval_special(form, tail, frame);
        }

        let procedure = self.eval(head, frame)?;
        let mut args = Args::with_capacity(tail.len());
        for arg in tail {
            args.push(self.eval(arg, frame)?);
        }
        match procedure {
            Sexp::Primitive(Primitive::Procedure(procedure)) => {
                self.apply_in(&procedure, args, sexp)
            }
            other => err!(self, NotAProcedure(other)),
        }
    }

    fn eval_special(
        &mut self,
        form: SpecialForm,
        args: &[Sexp],
        frame: FrameId,
    ) -> Result<Sexp, Error> {
        match form {
            SpecialForm::Quote => {
                let quoted = self.shape(quote_wrapper(args))?;
                Ok(quoted.clone())
            }
            SpecialForm::If => {
                let (test, consequent, alternative) = self.shape(if_wrapper(args))?;
                if self.eval(test, frame)?.is_truthy() {
                    self.eval(consequent, frame)
                } else if let Some(alternative) = alternative {
                    self.eval(alternative, frame)
                } else {
                    Ok(Sexp::default())
                }
            }
            SpecialForm::Define => {
                let (name, value) = self.shape(binding_wrapper(args))?;
                let value = match self.eval(value, frame)? {
                    Sexp::Primitive(Primitive::Procedure(Procedure::Closure(closure))) => {
                        closure.named(name).into()
                    }
                    value => value,
                };
                self.env.define(frame, name.clone(), value);
                Ok(name.clone().into())
            }
            SpecialForm::Set => {
                let (name, value) = self.shape(binding_wrapper(args))?;
                let value = self.eval(value, frame)?;
                match self.env.lookup_mut(frame, name.as_str()) {
                    Some(slot) => {
                        *slot = value.clone();
                        Ok(value)
                    }
                    None => err!(self, UnboundSymbol(name.clone())),
                }
            }
            SpecialForm::Lambda => {
                let (params, body) = self.shape(make_procedure_wrapper(args))?;
                let env = self.env.capture(frame);
                Ok(Closure::new(params, body.clone(), env).into())
            }
            SpecialForm::Begin => {
                let body = self.shape(begin_wrapper(args))?;
                let mut last = Sexp::default();
                for sexp in body {
                    last = self.eval(sexp, frame)?;
                }
                Ok(last)
            }
        }
    }

    /// Apply a procedure to already-evaluated arguments.
    ///
    /// Used by builtins which take procedures (apply, map); the trace shows
    /// the call as if written out in source.
    pub fn apply(&mut self, procedure: &Procedure, args: Args) -> Result<Sexp, Error> {
        let context = match procedure {
            Procedure::BuiltIn(..) => Sexp::default(),
            Procedure::Closure(..) => std::iter::once(procedure.clone().into())
                .chain(args.iter().cloned())
                .collect(),
        };
        self.apply_in(procedure, args, &context)
    }

    fn apply_in(
        &mut self,
        procedure: &Procedure,
        args: Args,
        context: &Sexp,
    ) -> Result<Sexp, Error> {
        match procedure {
            Procedure::BuiltIn(builtin) => builtin.call(args, self),
            Procedure::Closure(closure) => self.call_closure(closure, args, context),
        }
    }

    fn call_closure(
        &mut self,
        closure: &Closure,
        args: Args,
        context: &Sexp,
    ) -> Result<Sexp, Error> {
        let params = closure.params();
        if args.len() != params.len() {
            return err!(
                self,
                WrongArgumentCount {
                    given: args.len(),
                    expected: ExpectedCount::Exactly(params.len()),
                }
            );
        }

        let frame = self.env.derive(closure.env());
        for (param, arg) in params.iter().zip(args) {
            self.env.define(frame, param.clone(), arg);
        }

        self.exec_state.push(ExecFrame::new(context.clone()));
        let result = self.eval(closure.body(), frame);
        self.exec_state.pop();
        self.env.release(frame);
        result
    }

    /// Attach the current trace to a shape error from a wrapper.
    fn shape<T>(&self, result: Result<T, ErrorKind>) -> Result<T, Error> {
        result.map_err(|kind| Error::with_cont(self.exec_state.clone(), kind))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
