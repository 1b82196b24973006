//! The reducer trait.

use crate::effect::Effect;
use smallvec::SmallVec;

/// Pure state transition
///
/// `reduce` must finish all state changes before returning and must not
/// perform I/O; anything asynchronous is returned as an [`Effect`].
pub trait Reducer {
    /// State owned by the store
    type State;

    /// Inputs, both from callers and from effects
    type Action;

    /// Injected dependencies
    type Environment;

    /// Apply `action` to `state` and describe the follow-up work
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]>;
}
