//! Invocation context used by manifest-built trees.

use std::cell::RefCell;

/// What a handler sees when the CLI dispatches a command line.
#[derive(Debug, Default)]
pub struct Invocation {
    input: String,
    sender: String,
    transcript: RefCell<Vec<String>>,
}

impl Invocation {
    pub fn new(input: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            sender: sender.into(),
            transcript: RefCell::new(Vec::new()),
        }
    }

    /// Raw command line being dispatched.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Append a line of output.
    pub fn emit(&self, line: impl Into<String>) {
        self.transcript.borrow_mut().push(line.into());
    }

    /// Everything emitted so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.transcript.borrow().clone()
    }
}
