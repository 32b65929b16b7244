//! Token streams fed one line at a time.

use std::io::BufRead;

use super::token::Token;
use super::tokenizer::Tokenizer;
use crate::interpreter::Interpreter;


pub enum ReadLine {
    Line(String),
    /// Cancel the expression being entered, if any.
    Interrupted,
    Eof,
}

/// Source of input lines for the interactive driver.
pub trait LineReader {
    /// `depth` is the number of lists still open in the pending input.
    fn read_line(&mut self, depth: usize) -> ReadLine;

    /// Called after each top-level evaluation.
    fn sync(&mut self, _interpreter: &Interpreter) {}
}

/// Iterator of Tokens which pulls a new line from its reader whenever the
/// tokenizer runs dry.
///
/// Ends (returns None) at end of input, and also when an expression is
/// interrupted mid-entry; in the latter case the stream can be resumed.
pub struct LineStream<R: LineReader> {
    reader: R,
    tokenizer: Tokenizer,

    eof: bool,
    interrupted: bool,
}

/// LineReader over any BufRead (piped stdin, files, in-memory buffers).
pub struct BufLineReader<B: BufRead> {
    input: B,
}


impl<R: LineReader> LineStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            tokenizer: Tokenizer::new(),
            eof: false,
            interrupted: false,
        }
    }

    /// Whether the reader has signaled end of input.
    pub fn at_eof(&self) -> bool {
        self.eof
    }

    /// Whether the stream last ended due to an interrupt; resets the flag.
    pub fn take_interrupted(&mut self) -> bool {
        std::mem::replace(&mut self.interrupted, false)
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Drop any partially-entered expression.
    pub fn clear(&mut self) {
        self.tokenizer.clear();
    }
}

impl<R: LineReader> Iterator for LineStream<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.tokenizer.next() {
                return Some(token);
            }
            if self.eof {
                return None;
            }

            match self.reader.read_line(self.tokenizer.depth()) {
                ReadLine::Line(line) => self.tokenizer.tokenize(&line),
                ReadLine::Interrupted => {
                    if self.tokenizer.depth() > 0 {
                        self.tokenizer.clear();
                        self.interrupted = true;
                        // Enable ^C to cancel an expression mid-parse.
                        return None;
                    }
                }
                ReadLine::Eof => {
                    self.tokenizer.clear();
                    self.eof = true;
                    return None;
                }
            }
        }
    }
}


impl<B: BufRead> BufLineReader<B> {
    pub fn new(input: B) -> Self {
        Self { input }
    }
}

impl<B: BufRead> LineReader for BufLineReader<B> {
    fn read_line(&mut self, _depth: usize) -> ReadLine {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => ReadLine::Eof,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                }
                ReadLine::Line(line)
            }
        }
    }
}
