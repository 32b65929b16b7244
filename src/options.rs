//! Session configuration.

use derive_getters::Getters;


/// Runaway recursion must hit this before the host stack runs out, on a
/// 2 MiB thread and in unoptimized builds.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Clone, Debug, Getters, PartialEq)]
pub struct Options {
    /// Maximum number of nested evaluations before StackOverflow.
    max_depth: usize,
    /// Whether the REPL colors parens by depth and errors in red.
    color: bool,
    prompt: String,
}


impl Options {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.prompt = prompt.into();
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            color: true,
            prompt: "> ".to_string(),
        }
    }
}
