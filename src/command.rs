//! Executable handlers stored in a node's command slot.

use crate::types::ResultCode;
use std::fmt;
use std::sync::Arc;

/// An executable unit: receives the host's invocation context and returns a
/// result code.
pub trait Handler<C>: Send + Sync {
    fn run(&self, context: &C) -> ResultCode;
}

impl<C, F> Handler<C> for F
where
    F: Fn(&C) -> ResultCode + Send + Sync,
{
    fn run(&self, context: &C) -> ResultCode {
        self(context)
    }
}

/// Shared handle to a handler. Cloning is cheap and keeps the same instance.
pub struct Command<C>(Arc<dyn Handler<C>>);

impl<C> Command<C> {
    pub fn new<H>(handler: H) -> Self
    where
        H: Handler<C> + 'static,
    {
        Self(Arc::new(handler))
    }

    pub fn run(&self, context: &C) -> ResultCode {
        self.0.run(context)
    }

    /// True when both handles point at the same handler instance.
    pub fn same_as(&self, other: &Command<C>) -> bool {
        self.addr() == other.addr()
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl<C> Clone for Command<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C> fmt::Debug for Command<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Command").field(&self.addr()).finish()
    }
}
