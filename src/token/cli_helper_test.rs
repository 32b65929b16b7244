use super::*;

use crate::options::Options;


fn names(symbols: Vec<Symbol>) -> Vec<String> {
    symbols.into_iter().map(|s| s.as_str().to_string()).collect()
}

#[test]
fn completes_builtins_and_forms() {
    let interpreter = Interpreter::new(Options::default());
    let helper = CliHelper::new(&interpreter);

    assert_eq!(names(helper.prefixed("ca")), vec!["car"]);
    assert_eq!(names(helper.prefixed("la")), vec!["lambda"]);
    assert!(helper.prefixed("zzz").is_empty());
}

#[test]
fn refresh_picks_up_definitions() {
    let mut interpreter = Interpreter::new(Options::default());
    let mut helper = CliHelper::new(&interpreter);
    assert!(helper.prefixed("my-").is_empty());

    interpreter.run("(define my-var 1) (define my-fn (lambda () 1))").unwrap();
    helper.refresh(&interpreter);
    assert_eq!(names(helper.prefixed("my-")), vec!["my-fn", "my-var"]);
}

#[test]
fn word_bounds() {
    let interpreter = Interpreter::new(Options::default());
    let helper = CliHelper::new(&interpreter);

    assert_eq!(helper.word_bounds("(car x)", 3), (1, 4));
    assert_eq!(helper.word_bounds("(+ ab", 5), (3, 5));
    assert_eq!(helper.word_bounds("", 0), (0, 0));
}
