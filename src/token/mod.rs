// Public exports.
pub use line_stream::{BufLineReader, LineReader, LineStream, ReadLine};
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};

// Public mods.
pub mod line_stream;
pub mod token;

#[cfg(feature = "cli")]
pub mod cli_helper;
#[cfg(feature = "cli")]
pub mod cli_stream;

// Private mods.
mod tokenizer;
