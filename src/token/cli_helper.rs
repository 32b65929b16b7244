use rustyline::completion::{Candidate, Completer};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::line_buffer::LineBuffer;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::collections::BTreeSet;

use crate::interpreter::{Interpreter, SpecialForm};
use crate::primitive::{Symbol, ToSymbol};


// Rustyline Helper for CliStream.
pub struct CliHelper {
    symbols: BTreeSet<Symbol>,
}

pub struct CliCandidate {
    symbol: Symbol,
}

impl CliHelper {
    pub fn new(interpreter: &Interpreter) -> Self {
        let mut helper = Self {
            symbols: BTreeSet::new(),
        };
        helper.refresh(interpreter);
        helper
    }

    /// Pick up global definitions made since the last refresh.
    pub fn refresh(&mut self, interpreter: &Interpreter) {
        self.symbols = interpreter.global_symbols().into_iter().collect();
        self.symbols
            .extend(SpecialForm::ALL.iter().map(|form| form.name().to_symbol()));
    }

    pub fn prefixed(&self, prefix: &str) -> Vec<Symbol> {
        self.symbols
            .range(prefix.to_symbol()..)
            .take_while(|symbol| symbol.as_str().starts_with(prefix))
            .cloned()
            .collect()
    }

    fn word_bounds(&self, line: &str, pos: usize) -> (usize, usize) {
        let mut start: usize = 0;
        let mut end: usize = line.len();
        for (i, c) in line.char_indices() {
            if c.is_whitespace() || c == '(' || c == ')' {
                if i < pos {
                    start = i + c.len_utf8();
                } else {
                    end = i;
                    break;
                }
            }
        }
        (start, end)
    }
}


impl Completer for CliHelper {
    type Candidate = CliCandidate;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, _end) = self.word_bounds(line, pos);
        let symbols = self.prefixed(&line[start..pos]);
        Ok((
            start,
            symbols
                .into_iter()
                .map(|symbol| CliCandidate { symbol })
                .collect(),
        ))
    }

    fn update(&self, line: &mut LineBuffer, _: usize, elected: &str) {
        let (start, end) = self.word_bounds(line.as_str(), line.pos());
        line.delete_range(start..end);
        line.insert_str(start, elected);
        line.set_pos(start + elected.len());
    }
}


impl Helper for CliHelper {}
impl Hinter for CliHelper {
    type Hint = String;
}
impl Highlighter for CliHelper {}
impl Validator for CliHelper {}


impl Candidate for CliCandidate {
    fn display(&self) -> &str {
        self.symbol.as_str()
    }

    fn replacement(&self) -> &str {
        self.symbol.as_str()
    }
}


#[cfg(test)]
#[path = "./cli_helper_test.rs"]
mod cli_helper_test;
