//! Interception context handed to the user's interception function.

use crate::command::Command;
use crate::path::TargetPath;
use crate::types::ResultCode;

/// View of one intercepted invocation.
///
/// The only way to execute the original handler is [`run_original`], which
/// the interception function may call zero, one or several times.
///
/// [`run_original`]: InterceptionContext::run_original
pub struct InterceptionContext<'a, C> {
    context: &'a C,
    original: &'a Command<C>,
    target: &'a TargetPath,
}

impl<'a, C> InterceptionContext<'a, C> {
    pub(crate) fn new(context: &'a C, original: &'a Command<C>, target: &'a TargetPath) -> Self {
        Self {
            context,
            original,
            target,
        }
    }

    /// Invocation context supplied by the host.
    pub fn context(&self) -> &'a C {
        self.context
    }

    /// Path the interception was installed for.
    pub fn target(&self) -> &'a TargetPath {
        self.target
    }

    /// Run the original handler with the current invocation context.
    pub fn run_original(&self) -> ResultCode {
        self.original.run(self.context)
    }
}
