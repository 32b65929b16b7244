use rustyline::error::ReadlineError;
use rustyline::Editor;

use super::cli_helper::CliHelper;
use super::line_stream::{LineReader, ReadLine};
use crate::interpreter::Interpreter;


/// Interactive LineReader with history and symbol completion.
pub struct CliStream {
    editor: Editor<CliHelper>,
    prompt: String,

    curr_expr: String,
}

impl CliStream {
    pub fn new(interpreter: &Interpreter) -> CliStream {
        let mut editor = Editor::<CliHelper>::new();
        editor.set_helper(Some(CliHelper::new(interpreter)));

        CliStream {
            editor,
            prompt: interpreter.options().prompt().clone(),

            curr_expr: String::default(),
        }
    }

    fn append_expr(&mut self, line: &str) {
        // Insert whitespace only if we don't already have any and
        // we haven't just opened or are about to close a list.
        let needs_space = match self.curr_expr.chars().next_back() {
            Some(c) => !c.is_whitespace() && c != '(',
            None => false,
        };
        if needs_space && !line.starts_with(')') {
            self.curr_expr.push(' ');
        }
        self.curr_expr += line;
    }
}


impl LineReader for CliStream {
    fn read_line(&mut self, depth: usize) -> ReadLine {
        loop {
            let line = if depth == 0 {
                if !self.curr_expr.is_empty() {
                    self.editor.add_history_entry(self.curr_expr.as_str());
                }
                self.curr_expr = String::default();
                self.editor.readline(&self.prompt)
            } else {
                self.editor.readline(&format!("..{}", "  ".repeat(depth)))
            };

            return match line {
                Ok(line) => {
                    self.append_expr(&line);
                    ReadLine::Line(line)
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    self.curr_expr = String::default();
                    ReadLine::Interrupted
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    ReadLine::Eof
                }
                Err(err) => {
                    println!("[Readline Error]: {:?}", err);
                    println!();
                    continue;
                }
            };
        }
    }

    fn sync(&mut self, interpreter: &Interpreter) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.refresh(interpreter);
        }
    }
}
