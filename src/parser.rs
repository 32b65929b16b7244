//! Module for parsing tokens into S-exps.
//!
//! Recursive descent over a shared, peekable token cursor. Each call to
//! parse_sexp consumes exactly one expression, so callers can interleave
//! parsing and evaluation over a lazily-filled token stream.

use std::fmt;
use std::iter::Peekable;

use crate::primitive::Primitive;
use crate::sexp::Sexp;
use crate::token::{Token, TokenKind, Tokenizer};

use self::ParseErrorReason::*;

const MAX_DEPTH: usize = 128;


#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorReason {
    DepthOverflow,
    UnexpectedEof,
    UnmatchedClose,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    reason: ParseErrorReason,
    // The offending token; for UnexpectedEof, the unclosed paren.
    token: Token,
}


/// Parse the next expression from `tokens`.
///
/// Returns Ok(None) if the stream is exhausted before an expression starts.
pub fn parse_sexp<I: Iterator<Item = Token>>(
    tokens: &mut Peekable<I>,
    depth: usize,
) -> Result<Option<Sexp>, ParseError> {
    let token = match tokens.next() {
        Some(token) => token,
        None => return Ok(None),
    };

    match token.token {
        TokenKind::LeftParen => parse_list(tokens, token, depth).map(Some),
        TokenKind::RightParen => Err(ParseError {
            reason: UnmatchedClose,
            token,
        }),
        TokenKind::Atom(atom) => Ok(Some(Primitive::classify(atom).into())),
    }
}

fn parse_list<I: Iterator<Item = Token>>(
    tokens: &mut Peekable<I>,
    open: Token,
    depth: usize,
) -> Result<Sexp, ParseError> {
    if depth >= MAX_DEPTH {
        // Skip to the end of the outermost open list, so the next parse
        // starts on a fresh expression.
        let mut unclosed = depth + 1;
        while unclosed > 0 {
            match tokens.next().map(|token| token.token) {
                Some(TokenKind::LeftParen) => unclosed += 1,
                Some(TokenKind::RightParen) => unclosed -= 1,
                Some(TokenKind::Atom(..)) => {}
                None => break,
            }
        }
        return Err(ParseError {
            reason: DepthOverflow,
            token: open,
        });
    }

    let mut elems = Vec::<Sexp>::new();
    loop {
        match tokens.peek() {
            None => {
                return Err(ParseError {
                    reason: UnexpectedEof,
                    token: open,
                })
            }
            Some(token) if token.is_right_paren() => {
                tokens.next();
                return Ok(elems.into());
            }
            Some(_) => {}
        }

        match parse_sexp(tokens, depth + 1)? {
            Some(sexp) => elems.push(sexp),
            None => {
                return Err(ParseError {
                    reason: UnexpectedEof,
                    token: open,
                })
            }
        }
    }
}

/// Parse every expression of a complete program.
pub fn parse<S: AsRef<str>>(input: S) -> Result<Vec<Sexp>, ParseError> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.tokenize(input);
    let mut tokens = tokenizer.peekable();

    let mut sexps = Vec::<Sexp>::new();
    while let Some(sexp) = parse_sexp(&mut tokens, 0)? {
        sexps.push(sexp);
    }
    Ok(sexps)
}


impl ParseError {
    pub fn reason(&self) -> &ParseErrorReason {
        &self.reason
    }

    pub fn token(&self) -> &Token {
        &self.token
    }
}

impl fmt::Display for ParseErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthOverflow => write!(f, "max depth exceeded"),
            UnexpectedEof => write!(f, "unexpected EOF"),
            UnmatchedClose => write!(f, "unexpected )"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            UnexpectedEof => write!(
                f,
                "{} (unclosed ( @ ({}, {}))",
                self.reason, self.token.line, self.token.col
            ),
            _ => write!(
                f,
                "{} @ ({}, {})",
                self.reason, self.token.line, self.token.col
            ),
        }
    }
}


#[cfg(test)]
#[path = "./parser_test.rs"]
mod parser_test;
