//! Interactive lispy REPL.
//!
//! Run as:                  `RUST_LOG=info cargo run --example repl`.
//! Run a file as:           `cargo run --example repl -- prog.lisp`.
//! Evaluate an expression:  `cargo run --example repl -- -e "(+ 1 2)"`.

use clap::{App, Arg};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, BufReader, Cursor};

use lispy::builtins::BUILTINS;
use lispy::interpreter::Interpreter;
use lispy::options::{Options, DEFAULT_MAX_DEPTH};
use lispy::repl::repl;
use lispy::token::cli_stream::CliStream;
use lispy::token::BufLineReader;


fn main() -> Result<(), String> {
    // Setup logging.
    env_logger::Builder::from_default_env()
        .filter_module("rustyline", LevelFilter::Warn)
        .init();

    // Parse args.
    let matches = App::new("lispy REPL")
        .version("0.1")
        .about("Single-threaded REPL for a small Lisp")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Evaluate each expression of FILE, then exit"),
        )
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .value_name("EXPR")
                .takes_value(true)
                .conflicts_with("file")
                .help("Evaluate EXPR, then exit"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .value_name("N")
                .takes_value(true)
                .help("Maximum evaluation depth before StackOverflow"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output"),
        )
        .arg(
            Arg::new("list-builtins")
                .long("list-builtins")
                .help("Print the names of all builtins and exit"),
        )
        .get_matches();

    if matches.is_present("list-builtins") {
        for name in BUILTINS.keys() {
            println!("{}", name);
        }
        return Ok(());
    }

    let max_depth = match matches.value_of("max-depth") {
        Some(n) => n
            .parse::<usize>()
            .map_err(|err| format!("Invalid --max-depth {:?}: {}", n, err))?,
        None => DEFAULT_MAX_DEPTH,
    };
    let color = !matches.is_present("no-color");
    if !color {
        colored::control::set_override(false);
    }
    let mut interpreter = Interpreter::new(
        Options::default()
            .with_max_depth(max_depth)
            .with_color(color),
    );

    let mut stdout = io::stdout();
    let result = if let Some(expr) = matches.value_of("eval") {
        repl(
            &mut interpreter,
            BufLineReader::new(Cursor::new(expr.to_string())),
            &mut stdout,
        )
    } else if let Some(path) = matches.value_of("file") {
        let file = File::open(path).map_err(|err| format!("{}: {}", path, err))?;
        repl(
            &mut interpreter,
            BufLineReader::new(BufReader::new(file)),
            &mut stdout,
        )
    } else {
        let stream = CliStream::new(&interpreter);
        repl(&mut interpreter, stream, &mut stdout)
    };
    result.map_err(|err| err.to_string())
}
