//! Replacement handler installed in place of the original.

use crate::command::{Command, Handler};
use crate::intercept::context::InterceptionContext;
use crate::path::TargetPath;
use crate::types::ResultCode;
use std::sync::Arc;

/// User interception function, shared by every path of one installation unit.
pub type InterceptFn<C> = Arc<dyn Fn(&InterceptionContext<'_, C>) -> ResultCode + Send + Sync>;

/// Handler closing over one (interception function, original handler) pair.
pub struct Interception<C> {
    interception: InterceptFn<C>,
    original: Command<C>,
    target: TargetPath,
}

impl<C: 'static> Interception<C> {
    pub fn new(interception: InterceptFn<C>, original: Command<C>, target: TargetPath) -> Self {
        Self {
            interception,
            original,
            target,
        }
    }

    /// Wrap into a command handle ready to be written into node slots.
    pub fn into_command(self) -> Command<C> {
        Command::new(self)
    }
}

impl<C> Handler<C> for Interception<C> {
    fn run(&self, context: &C) -> ResultCode {
        let intercepted = InterceptionContext::new(context, &self.original, &self.target);
        (self.interception)(&intercepted)
    }
}
