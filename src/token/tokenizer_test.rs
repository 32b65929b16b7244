use super::*;

use crate::token::TokenKind::*;

fn kinds<S: AsRef<str>>(input: S) -> Vec<TokenKind> {
    tokenize(input).into_iter().map(|t| t.token).collect()
}

fn atom(s: &str) -> TokenKind {
    Atom(s.to_string())
}


#[test]
fn nested() {
    let expected = vec![
        LeftParen,
        atom("testing"),
        LeftParen,
        atom("this"),
        LeftParen,
        atom("out"),
        RightParen,
        RightParen,
        RightParen,
    ];
    assert_eq!(kinds("(testing (this (out)))"), expected);
}

#[test]
fn newlines() {
    let expected = vec![
        LeftParen,
        atom("testing"),
        LeftParen,
        atom("this"),
        LeftParen,
        atom("out"),
        RightParen,
        RightParen,
        RightParen,
    ];
    assert_eq!(kinds("\n(testing\n\n (\nthis (out))\n)"), expected);
}

#[test]
fn parens_split_atoms() {
    assert_eq!(
        kinds("(a)b(c d)"),
        vec![
            LeftParen,
            atom("a"),
            RightParen,
            atom("b"),
            LeftParen,
            atom("c"),
            atom("d"),
            RightParen,
        ]
    );
}

#[test]
fn arbitrary_atoms() {
    assert_eq!(
        kinds("  set! 'x \"str\" 1.5e3 #t -> ;c\t"),
        vec![
            atom("set!"),
            atom("'x"),
            atom("\"str\""),
            atom("1.5e3"),
            atom("#t"),
            atom("->"),
            atom(";c"),
        ]
    );
}

#[test]
fn empty_input() {
    assert!(kinds("").is_empty());
    assert!(kinds(" \n\t ").is_empty());
}

#[test]
fn positions() {
    let tokens = tokenize("(foo\n  bar)");
    assert_eq!((tokens[0].line, tokens[0].col), (0, 0));
    assert_eq!((tokens[1].line, tokens[1].col), (0, 1));
    assert_eq!((tokens[2].line, tokens[2].col), (1, 2));
    assert_eq!((tokens[3].line, tokens[3].col), (1, 5));
}

#[test]
fn depth_across_calls() {
    let mut tokenizer = Tokenizer::new();
    tokenizer.tokenize("(define f");
    assert_eq!(tokenizer.depth(), 1);
    tokenizer.tokenize("  (lambda (x)");
    assert_eq!(tokenizer.depth(), 2);
    tokenizer.tokenize("x))");
    assert_eq!(tokenizer.depth(), 0);

    // Stray closes never go negative.
    tokenizer.tokenize(")))");
    assert_eq!(tokenizer.depth(), 0);

    tokenizer.tokenize("(");
    tokenizer.clear();
    assert_eq!(tokenizer.depth(), 0);
    assert_eq!(tokenizer.next(), None);
}
