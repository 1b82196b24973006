//! Store errors.

use thiserror::Error;

/// Failure of a [`Store`](crate::Store) operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `shutdown` was called; no further actions are reduced
    #[error("Store is shutting down")]
    ShutdownInProgress,

    /// Effects were still running when the shutdown deadline passed
    ///
    /// They are not cancelled, but anything they produce is dropped.
    #[error("Shutdown deadline passed with {0} effects in flight")]
    ShutdownTimeout(usize),

    /// A wait gave up before its condition held
    #[error("Timed out waiting on the store")]
    Timeout,

    /// Nobody can publish actions any more
    #[error("Action channel closed")]
    ChannelClosed,
}
