mod common;

use lispy::prelude::*;


#[test]
fn basic_arithmetic() {
    let mut interpreter = common::setup();

    let results = common::results(&mut interpreter, "(+ 1 2) (+ 2 2)");
    assert_eq!(
        results,
        vec![Number::Integer(3).into(), Number::Integer(4).into()]
    );

    let results = common::results(
        &mut interpreter,
        "(* (+ 1 1) 3)
         (* (+ 1 1) 3.)",
    );
    assert_eq!(
        results,
        vec![Number::Integer(6).into(), Number::Float(6.0).into()]
    );

    let results = common::results(
        &mut interpreter,
        "(/ (- 1 1) 2)
         (/ (+ 1 1) 2)",
    );
    assert_eq!(
        results,
        vec![Number::Float(0.).into(), Number::Float(1.).into()]
    );
}

#[test]
fn run_entry_point() {
    assert_eq!(
        lispy::run("(define sq (lambda (x) (* x x))) (sq 12)").unwrap(),
        Number::Integer(144).into()
    );
    assert_eq!(lispy::run("").unwrap(), Sexp::nil());

    // Each run is a fresh session.
    let err = lispy::run("sq").unwrap_err();
    assert_eq!(err.kind().category(), "UnboundSymbolError");
}

#[test]
fn quote_is_unevaluated() {
    let mut interpreter = common::setup();

    let results = common::results(&mut interpreter, "(quote (nowhere (to be) found))");
    assert_eq!(
        results,
        vec![list!(
            "nowhere".to_symbol(),
            list!("to".to_symbol(), "be".to_symbol()),
            "found".to_symbol()
        )]
    );
}

#[test]
fn define_set() {
    let mut interpreter = common::setup();

    let results =
        common::results_with_errors(&mut interpreter, "(define x 5) x (set! x 6) x (set! y 1)");
    assert_eq!(results[1].as_ref().unwrap(), &Sexp::from(Number::Integer(5)));
    assert_eq!(results[3].as_ref().unwrap(), &Sexp::from(Number::Integer(6)));
    assert_eq!(common::category(&results[4]), "UnboundSymbolError");
}

#[test]
fn lambda_single_body() {
    let mut interpreter = common::setup();

    let results = common::results(&mut interpreter, "((lambda (a) (+ a a)) 4)");
    assert_eq!(results, vec![Number::Integer(8).into()]);
}

#[test]
fn lambda_seq_body() {
    let mut interpreter = common::setup();

    let results = common::results(
        &mut interpreter,
        "((lambda (a) (begin (define b (* a 2)) (+ a b))) 3)",
    );
    assert_eq!(results, vec![Number::Integer(9).into()]);
}

#[test]
fn lambda_arity() {
    let mut interpreter = common::setup();

    let results = common::results_with_errors(
        &mut interpreter,
        "((lambda (a b) (+ a b)) 3 4)
         ((lambda (a b) (+ a b)) 3)",
    );
    assert_eq!(results[0].as_ref().unwrap(), &Sexp::from(Number::Integer(7)));
    assert_eq!(common::category(&results[1]), "ArityError");
}

#[test]
fn lambda_proc() {
    let mut interpreter = common::setup();

    let results = common::results(&mut interpreter, "((lambda (a b) (a b 4)) + 40)");
    assert_eq!(results, vec![Number::Integer(44).into()]);
}

#[test]
fn lambda_duplicate_argname() {
    let mut interpreter = common::setup();

    let results = common::results_with_errors(&mut interpreter, "(lambda (a a) (+ a a))");
    assert_eq!(common::category(&results[0]), "TypeError");
}

#[test]
fn lambda_branch_body() {
    let mut interpreter = common::setup();

    let results = common::results(
        &mut interpreter,
        "(define a (lambda (e) (if (= e 1) 0 (+ e 2))))
         (a 1)
         (a 2)",
    );
    assert_eq!(results[1], Number::Integer(0).into());
    assert_eq!(results[2], Number::Integer(4).into());
}

#[test]
fn conditionals() {
    let mut interpreter = common::setup();

    let results = common::results(&mut interpreter, "(if (= 1 1) 10 20) (if (= 1 2) 10 20)");
    assert_eq!(
        results,
        vec![Number::Integer(10).into(), Number::Integer(20).into()]
    );
}

#[test]
fn lexical_scope() {
    let mut interpreter = common::setup();

    let results = common::results(
        &mut interpreter,
        "(define f (lambda (x) (lambda (y) (+ x y)))) ((f 3) 4)
         (define x 1) (define g (lambda () x)) (set! x 2) (g)",
    );
    assert_eq!(results[1], Number::Integer(7).into());
    assert_eq!(results[5], Number::Integer(2).into());
}

#[test]
fn def_recursive_lambda() {
    let mut interpreter = common::setup();

    let results = common::results(
        &mut interpreter,
        "(define fact (lambda (n)
           (if (= n 1) 1
             (* n (fact (- n 1))))))

         (fact 4)",
    );
    assert_eq!(results[1], Number::Integer(24).into());
}

#[test]
fn list_primitives() {
    let mut interpreter = common::setup();

    let results = common::results_with_errors(
        &mut interpreter,
        "(car (list 1 2 3)) (cdr (list 1 2 3)) (car (list))",
    );
    assert_eq!(results[0].as_ref().unwrap(), &Sexp::from(Number::Integer(1)));
    assert_eq!(
        results[1].as_ref().unwrap(),
        &list!(Number::Integer(2), Number::Integer(3))
    );
    assert_eq!(common::category(&results[2]), "TypeError");
}

#[test]
fn basic_apply() {
    let mut interpreter = common::setup();

    let results = common::results(&mut interpreter, "(apply + (quote (1 2)))");
    assert_eq!(results, vec![Number::Integer(3).into()]);
}

#[test]
fn syntax_errors() {
    let mut interpreter = common::setup();

    for src in &["(+ 1 2", "(+ 1 2))", ")"] {
        let err = interpreter.run(src).unwrap_err();
        assert_eq!(err.kind().category(), "SyntaxError", "{}", src);
    }
}

#[test]
fn printed_values_read_back() {
    let mut interpreter = common::setup();

    for src in &[
        "(list 1 2.5 (quote sym) (list) (list (list 3)))",
        "(map (lambda (x) (* x 1.5)) (list 1 2 3))",
        "(cons (quote a) (quote (b c)))",
    ] {
        let value = interpreter.run(src).unwrap();
        let requoted = interpreter.run(format!("(quote {})", value)).unwrap();
        assert!(requoted.is_equal(&value), "{} != {}", requoted, value);
    }
}

#[test]
fn errors_leave_session_usable() {
    let mut interpreter = common::setup();

    let results = common::results_with_errors(
        &mut interpreter,
        "(define a 1)
         (define runaway (lambda (n) (+ 1 (runaway n))))
         (runaway 0)
         (/ a 0)
         (+ a 1)",
    );
    let err = results[2].as_ref().unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.kind().category(), "StackOverflow");
    assert_eq!(common::category(&results[3]), "BuiltinError");
    assert_eq!(results[4].as_ref().unwrap(), &Sexp::from(Number::Integer(2)));
}

#[test]
fn runaway_recursion_with_default_options() {
    for src in &[
        "(define f (lambda (n) (+ 1 (f n)))) (f 0)",
        "(define f (lambda (n) (car (map f (list n))))) (f 0)",
        "(define f (lambda (n) (apply f (list n)))) (f 0)",
    ] {
        let err = lispy::run(src).unwrap_err();
        assert_eq!(err.kind().category(), "StackOverflow", "{}", src);
    }
}

#[test]
fn deeply_nested_values() {
    let mut interpreter = common::setup();
    interpreter.run("(define x (list)) (define y (list))").unwrap();
    for _ in 0..50_000 {
        interpreter.run("(begin (set! x (list x)) (set! y (list y)))").unwrap();
    }

    assert_eq!(interpreter.run("(equal? x y)").unwrap(), Sexp::from(true));
    assert_eq!(interpreter.run("(eq? x y)").unwrap(), Sexp::from(false));
    let printed = interpreter.run("x").unwrap().to_string();
    assert_eq!(printed.len(), 2 * 50_001);

    interpreter.run("(set! x 0) (set! y 0)").unwrap();
}
