//! Task list built on the Todo Master reducer architecture.
//!
//! The crate has three parts:
//!
//! - **Item store** ([`reducer`], [`store`]): the canonical collection, seeded
//!   once from a [`SeedLoader`] and then changed only by create, update,
//!   delete and toggle
//! - **View projector** ([`projection`]): search, filter, counts and progress
//!   as pure functions of the collection
//! - **Remote loader** ([`loader`]): a single HTTP GET for the seed items
//!
//! [`editor`] and [`row`] hold the short-lived form and row state a renderer
//! needs around those.
//!
//! # Quick Start
//!
//! ```no_run
//! use todos::{FilterMode, HttpSeedLoader, ItemStore, Projection, TodoId, TodoItem};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ItemStore::launch(HttpSeedLoader::default()).await?;
//! store.wait_for_seed(Duration::from_secs(10)).await?;
//!
//! store.create(TodoItem::new(TodoId(1_700_000_000_000), "Water plants")).await?;
//!
//! let state = store.snapshot();
//! let view = Projection::new(&state.items, "water", FilterMode::Active);
//! println!("{}", view.headline());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod loader;
pub mod mocks;
pub mod projection;
pub mod reducer;
pub mod row;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use editor::{Draft, Editor};
pub use error::SeedFetchError;
pub use loader::{HttpSeedLoader, SeedLoader};
pub use projection::{FilterMode, ListStatus, Projection, ViewQuery, project};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use row::{RowCommit, RowState};
pub use store::{ItemStore, TodoStore};
pub use types::{TodoAction, TodoId, TodoItem, TodoState};
