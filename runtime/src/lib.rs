//! # Todo Master Runtime
//!
//! The [`Store`] owns a reducer's state. Every action goes through the
//! reducer under a write lock; the effects it returns run on the tokio
//! runtime and whatever actions they produce are reduced in turn.
//!
//! After each reduced action the store publishes the new state as an
//! immutable `Arc<State>`, so a render loop can hold a snapshot without
//! blocking writers.
//!
//! ```ignore
//! use todo_master_runtime::Store;
//!
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//! let mut seed = store.send(TodoAction::Initialize).await?;
//! seed.wait().await;
//!
//! let mut frames = store.subscribe();
//! while frames.changed().await.is_ok() {
//!     draw(&frames.borrow_and_update());
//! }
//! ```

pub mod error;
pub mod handle;
pub mod store;

pub use error::StoreError;
pub use handle::EffectHandle;
pub use store::Store;
