//! Read-eval-print loop over any LineReader.

use colored::*;
use log::debug;
use std::io::{self, Write};

use crate::error::Error;
use crate::interpreter::Interpreter;
use crate::parser::parse_sexp;
use crate::primitive::Primitive;
use crate::sexp::Sexp;
use crate::token::{LineReader, LineStream};


/// Read expressions from `reader` until end of input, printing each result
/// (or error) to `out`. Output of `print` goes to `out` too, ahead of the
/// result of the expression that printed it.
///
/// Errors never end the session; an expression interrupted mid-entry is
/// silently dropped.
pub fn repl<R: LineReader, W: Write>(
    interpreter: &mut Interpreter,
    reader: R,
    out: &mut W,
) -> io::Result<()> {
    let mut stream = LineStream::new(reader);
    interpreter.capture_output(true);
    loop {
        // A fresh Peekable per expression never drops a real token: the
        // parser only leaves a peeked None behind.
        let parsed = parse_sexp(&mut (&mut stream).peekable(), 0);
        match parsed {
            Ok(Some(sexp)) => {
                let result = interpreter.eval_top(&sexp);
                out.write_all(interpreter.take_output().as_bytes())?;
                match &result {
                    Ok(val) => print_result(interpreter, out, val)?,
                    Err(err) => print_error(interpreter, out, err)?,
                }
                stream.reader_mut().sync(interpreter);
            }
            Ok(None) => {
                if stream.at_eof() {
                    break;
                }
            }
            Err(err) => {
                if stream.take_interrupted() {
                    debug!("Dropped interrupted expression");
                    continue;
                }
                print_error(interpreter, out, &err.into())?;
            }
        }
    }
    interpreter.capture_output(false);
    out.flush()
}

/// Write `sexp` with parens colored by depth when color is enabled.
pub fn write_sexp<W: Write>(interpreter: &Interpreter, w: &mut W, sexp: &Sexp) -> io::Result<()> {
    fn paren_color(depth: usize) -> (u8, u8, u8) {
        match depth % 6 {
            0 => (0, 255, 204),
            1 => (204, 51, 0),
            2 => (153, 255, 102),
            3 => (153, 102, 255),
            4 => (255, 255, 102),
            _ => (255, 179, 179),
        }
    }

    let color = *interpreter.options().color();
    sexp.write_list(
        w,
        0,
        &mut |writer, primitive: &Primitive, _depth| write!(writer, "{}", primitive),
        &mut |writer, paren, depth| {
            if color {
                let (r, g, b) = paren_color(depth);
                write!(writer, "{}", paren.truecolor(r, g, b))
            } else {
                write!(writer, "{}", paren)
            }
        },
    )
}

fn print_result<W: Write>(interpreter: &Interpreter, out: &mut W, val: &Sexp) -> io::Result<()> {
    write!(out, "-> ")?;
    write_sexp(interpreter, out, val)?;
    writeln!(out)?;
    writeln!(out)
}

fn print_error<W: Write>(interpreter: &Interpreter, out: &mut W, err: &Error) -> io::Result<()> {
    let message = err.to_string();
    if *interpreter.options().color() {
        writeln!(out, "{}", message.red())?;
    } else {
        writeln!(out, "{}", message)?;
    }

    for (i, context) in err.trace().enumerate() {
        write!(out, "{})  ", i)?;
        write_sexp(interpreter, out, context)?;
        writeln!(out)?;
    }
    writeln!(out)
}


#[cfg(test)]
#[path = "./repl_test.rs"]
mod repl_test;
