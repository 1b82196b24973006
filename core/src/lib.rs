//! # Todo Master Core
//!
//! Building blocks shared by every Todo Master crate.
//!
//! State changes are written as a [`Reducer`](reducer::Reducer): a synchronous
//! function from the current state and one action to the next state plus a
//! list of [`Effect`](effect::Effect)s. Effects are plain values; the runtime
//! executes them and feeds any action they produce back into the reducer.
//! External dependencies such as the clock reach the reducer through its
//! environment.
//!
//! ```ignore
//! use todo_master_core::{SmallVec, effect::Effect, reducer::Reducer};
//!
//! struct Tally;
//!
//! impl Reducer for Tally {
//!     type State = u32;
//!     type Action = ();
//!     type Environment = ();
//!
//!     fn reduce(&self, n: &mut u32, (): (), _env: &()) -> SmallVec<[Effect<()>; 4]> {
//!         *n += 1;
//!         SmallVec::new()
//!     }
//! }
//! ```

pub mod effect;
pub mod environment;
pub mod reducer;

pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};
