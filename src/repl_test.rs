use super::*;

use std::collections::VecDeque;
use std::io::Cursor;

use crate::options::Options;
use crate::token::{BufLineReader, ReadLine};


fn session(input: &str) -> String {
    let mut interpreter = Interpreter::new(Options::default().with_color(false));
    let reader = BufLineReader::new(Cursor::new(input.to_string()));
    let mut out = Vec::<u8>::new();
    repl(&mut interpreter, reader, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

struct Scripted {
    lines: VecDeque<ReadLine>,
}

impl LineReader for Scripted {
    fn read_line(&mut self, _depth: usize) -> ReadLine {
        self.lines.pop_front().unwrap_or(ReadLine::Eof)
    }
}


#[test]
fn prints_results() {
    assert_eq!(
        session("(define x 2)\n(+ x\n   3)\n(quote (1 (2)))\n"),
        "-> x\n\n-> 5\n\n-> (1 (2))\n\n"
    );
}

#[test]
fn several_per_line() {
    assert_eq!(session("1 2 (list 3)"), "-> 1\n\n-> 2\n\n-> (3)\n\n");
}

#[test]
fn errors_continue_session() {
    let out = session("(car (list))\nundefined\n(+ 1 1)\n");
    let lines = out.lines().filter(|l| !l.is_empty()).collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            "[TypeError] Invalid argument: given (), expected non-empty list",
            "[UnboundSymbolError] Unbound symbol: \"undefined\"",
            "-> 2",
        ]
    );
}

#[test]
fn error_trace_is_printed() {
    let out = session(
        "(define f (lambda (l) (car l)))\n\
         (f (list))\n",
    );
    assert!(out.contains("[TypeError]"));
    assert!(out.contains("0)  (f (list))"));
}

#[test]
fn syntax_errors() {
    let out = session(")\n(+ 1 2)\n(+ 1\n");
    assert!(out.starts_with("[SyntaxError] unexpected )"));
    assert!(out.contains("-> 3"));
    assert!(out.contains("[SyntaxError] unexpected EOF"));
}

#[test]
fn interrupt_drops_expression() {
    let mut interpreter = Interpreter::new(Options::default().with_color(false));
    let reader = Scripted {
        lines: vec![
            ReadLine::Line("(+ 1".to_string()),
            ReadLine::Interrupted,
            ReadLine::Interrupted,
            ReadLine::Line("(+ 2 2)".to_string()),
        ]
        .into(),
    };
    let mut out = Vec::<u8>::new();
    repl(&mut interpreter, reader, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "-> 4\n\n");
}

#[test]
fn write_sexp_plain() {
    let interpreter = Interpreter::new(Options::default().with_color(false));
    let mut out = Vec::<u8>::new();
    write_sexp(&interpreter, &mut out, &"(a (b #t) 1.5)".parse().unwrap()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "(a (b #t) 1.5)");
}

#[test]
fn overlong_expression_is_one_error() {
    let input = format!("{}1{} (+ 1 1)\n", "(".repeat(130), ")".repeat(130));
    let out = session(&input);
    let lines = out.lines().filter(|l| !l.is_empty()).collect::<Vec<_>>();
    assert_eq!(lines.len(), 2, "{}", out);
    assert!(lines[0].starts_with("[SyntaxError] max depth exceeded"));
    assert_eq!(lines[1], "-> 2");
}

#[test]
fn print_goes_to_session_output() {
    assert_eq!(
        session("(print 1 (list 2) (quote a))\n(+ 1 1)\n"),
        "1 (2) a\n-> ()\n\n-> 2\n\n"
    );
}
