//! Module for breaking program text into tokens.

use std::collections::VecDeque;

use super::token::{Token, TokenKind};


/// Accumulates Tokens given string-like input, tracking paren depth across
/// calls so that callers can tell whether an expression is still open.
///
/// Tokenizing cannot fail: every run of non-whitespace, non-paren text is an
/// atom.
pub struct Tokenizer {
    depth: usize,

    line_count: usize,
    tokens: VecDeque<Token>,
}


impl Tokenizer {
    pub fn new() -> Self {
        Self {
            depth: 0,
            line_count: 0,
            tokens: Default::default(),
        }
    }

    /// Drop pending tokens and forget any open lists.
    pub fn clear(&mut self) {
        self.depth = 0;
        self.tokens.clear();
    }

    /// Number of lists opened but not yet closed.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn tokenize<S: AsRef<str>>(&mut self, input: S) {
        for line in input.as_ref().split('\n') {
            self.tokenize_line(line);
        }
    }

    fn tokenize_line(&mut self, line: &str) {
        let mut start: Option<usize> = None;
        for (i, c) in line.char_indices() {
            if c.is_whitespace() {
                if let Some(s) = start.take() {
                    self.push_atom(&line[s..i], s);
                }
                continue;
            }

            let token = match c {
                '(' => {
                    self.depth += 1;
                    TokenKind::LeftParen
                }
                ')' => {
                    self.depth = self.depth.saturating_sub(1);
                    TokenKind::RightParen
                }
                _ => {
                    if start.is_none() {
                        start = Some(i);
                    }
                    continue;
                }
            };

            if let Some(s) = start.take() {
                self.push_atom(&line[s..i], s);
            }
            self.tokens.push_back(Token {
                token,
                line: self.line_count,
                col: i,
            });
        }

        // EOL handling.
        if let Some(s) = start {
            self.push_atom(&line[s..], s);
        }
        self.line_count += 1;
    }

    fn push_atom(&mut self, atom: &str, start: usize) {
        self.tokens.push_back(Token {
            token: TokenKind::Atom(atom.to_string()),
            line: self.line_count,
            col: start,
        });
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.pop_front()
    }
}


/// Tokenize a complete program.
pub fn tokenize<S: AsRef<str>>(input: S) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.tokenize(input);
    tokenizer.collect()
}


#[cfg(test)]
#[path = "./tokenizer_test.rs"]
mod tokenizer_test;
