//! Effect descriptions.
//!
//! An [`Effect`] says what should happen, never does it. The store decides
//! when and on which task it runs.

use futures::future::BoxFuture;
use std::fmt;
use std::time::Duration;

/// Work for the runtime, producing actions of type `A`
pub enum Effect<A> {
    /// Nothing to do
    None,

    /// Start all effects at once
    Parallel(Vec<Effect<A>>),

    /// Run effects one after another, each to completion
    Sequential(Vec<Effect<A>>),

    /// Send `action` once `duration` has passed
    Delay {
        /// Wait before sending
        duration: Duration,
        /// Action to send
        action: Box<A>,
    },

    /// Await a future; a `Some` result is sent back to the store
    Future(BoxFuture<'static, Option<A>>),
}

impl<A> Effect<A> {
    /// Run `effects` concurrently
    #[must_use]
    pub const fn merge(effects: Vec<Self>) -> Self {
        Self::Parallel(effects)
    }

    /// Run `effects` in order
    #[must_use]
    pub const fn chain(effects: Vec<Self>) -> Self {
        Self::Sequential(effects)
    }

    /// Send `action` after `duration`
    #[must_use]
    pub fn delay(duration: Duration, action: A) -> Self {
        Self::Delay {
            duration,
            action: Box::new(action),
        }
    }

    /// True for [`Effect::None`]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Futures cannot be printed, so only their presence is shown
impl<A: fmt::Debug> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Parallel(all) => f.debug_tuple("Parallel").field(all).finish(),
            Self::Sequential(steps) => f.debug_tuple("Sequential").field(steps).finish(),
            Self::Delay { duration, action } => {
                write!(f, "Delay({duration:?}, {action:?})")
            },
            Self::Future(_) => f.write_str("Future(..)"),
        }
    }
}
