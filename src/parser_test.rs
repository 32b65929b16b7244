use super::*;

use crate::primitive::{Number, ToSymbol};
use crate::token::tokenize;


#[test]
fn atoms() {
    let sexps = parse("1 -4 2.5 .5 foo set! 9223372036854775808").unwrap();
    assert_eq!(
        sexps,
        vec![
            Number::Integer(1).into(),
            Number::Integer(-4).into(),
            Number::Float(2.5).into(),
            Number::Float(0.5).into(),
            "foo".to_symbol().into(),
            "set!".to_symbol().into(),
            // Too wide for i64; falls through to Float.
            Number::Float(9223372036854775808.0).into(),
        ]
    );
}

#[test]
fn nested_lists() {
    let sexps = parse("(a (b (c)) ())").unwrap();
    assert_eq!(
        sexps,
        vec![list!(
            "a".to_symbol(),
            list!("b".to_symbol(), list!("c".to_symbol())),
            list!()
        )]
    );
}

#[test]
fn multiple_top_level() {
    let sexps = parse("(define x 5)\nx (+ x 1)").unwrap();
    assert_eq!(sexps.len(), 3);
    assert_eq!(sexps[1], "x".to_symbol().into());
}

#[test]
fn shared_cursor_consumes_one_expression() {
    let mut tokens = tokenize("(+ 1 2) (car x)").into_iter().peekable();
    let first = parse_sexp(&mut tokens, 0).unwrap().unwrap();
    assert_eq!(format!("{}", first), "(+ 1 2)");
    assert!(tokens.peek().unwrap().is_left_paren());

    let second = parse_sexp(&mut tokens, 0).unwrap().unwrap();
    assert_eq!(format!("{}", second), "(car x)");
    assert_eq!(parse_sexp(&mut tokens, 0).unwrap(), None);
}

#[test]
fn unexpected_eof() {
    let err = parse("(+ 1 2").unwrap_err();
    assert_eq!(*err.reason(), ParseErrorReason::UnexpectedEof);
    assert!(err.token().is_left_paren());
    assert!(format!("{}", err).starts_with("unexpected EOF"));

    let err = parse("(define f (lambda (x)\n  (+ x 1))").unwrap_err();
    assert_eq!(*err.reason(), ParseErrorReason::UnexpectedEof);
    assert_eq!((err.token().line, err.token().col), (0, 0));
}

#[test]
fn unmatched_close() {
    let err = parse(")").unwrap_err();
    assert_eq!(*err.reason(), ParseErrorReason::UnmatchedClose);
    assert!(format!("{}", err).starts_with("unexpected )"));

    let err = parse("(+ 1 2))").unwrap_err();
    assert_eq!(*err.reason(), ParseErrorReason::UnmatchedClose);
    assert_eq!(err.token().col, 7);
}

#[test]
fn depth_overflow() {
    let deep = format!("{}{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
    let err = parse(deep).unwrap_err();
    assert_eq!(*err.reason(), ParseErrorReason::DepthOverflow);

    let ok = format!("{}{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
    assert!(parse(ok).is_ok());
}

#[test]
fn depth_overflow_skips_expression() {
    let deep = format!("{}x{} (+ 1 1)", "(".repeat(MAX_DEPTH + 2), ")".repeat(MAX_DEPTH + 2));
    let mut tokens = tokenize(deep).into_iter().peekable();

    let err = parse_sexp(&mut tokens, 0).unwrap_err();
    assert_eq!(*err.reason(), ParseErrorReason::DepthOverflow);
    let next = parse_sexp(&mut tokens, 0).unwrap().unwrap();
    assert_eq!(format!("{}", next), "(+ 1 1)");
    assert_eq!(parse_sexp(&mut tokens, 0).unwrap(), None);
}
