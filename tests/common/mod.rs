use lispy::error::Error;
use lispy::interpreter::Interpreter;
use lispy::options::Options;
use lispy::parser;
use lispy::sexp::Sexp;


pub fn setup() -> Interpreter {
    // Integration tests will call this method multiple times; ignore the error.
    if let Err(_err) = env_logger::try_init() {}

    Interpreter::new(Options::default().with_max_depth(256).with_color(false))
}

pub fn results<S: AsRef<str>>(interpreter: &mut Interpreter, s: S) -> Vec<Sexp> {
    results_with_errors(interpreter, s)
        .into_iter()
        .map(|e| e.unwrap())
        .collect::<Vec<_>>()
}

/// Evaluate each top-level expression, continuing past errors.
pub fn results_with_errors<S: AsRef<str>>(
    interpreter: &mut Interpreter,
    s: S,
) -> Vec<Result<Sexp, Error>> {
    parser::parse(s)
        .unwrap()
        .iter()
        .map(|sexp| interpreter.eval_top(sexp))
        .collect::<Vec<_>>()
}

#[allow(dead_code)]
pub fn category(result: &Result<Sexp, Error>) -> &'static str {
    match result {
        Ok(val) => panic!("Expected error, got {}", val),
        Err(err) => err.kind().category(),
    }
}
