//! Context accumulation on effect failures.
//!
//! [`EffectContext::context`] wraps a failure in a
//! [`ContextError`](crate::ContextError); [`EffectContextChain::context_chain`]
//! appends to a trail that already exists. Both are thin wrappers over
//! [`map_failure`](crate::effect::EffectExt::map_failure), so they cost
//! nothing on the success path.

use crate::context::ContextError;
use crate::effect::combinators::MapFailure;
use crate::effect::{Effect, EffectExt};

/// Wrap failures in a [`ContextError`] carrying a first trail entry.
pub trait EffectContext: Effect {
    /// Describe what was being attempted when this effect fails.
    ///
    /// ```rust
    /// use millrace::effect::{self, Effect, EffectContext, EffectContextChain};
    /// use millrace::Outcome;
    ///
    /// # futures::executor::block_on(async {
    /// let effect = effect::fail::<_, i32, ()>("connection refused")
    ///     .context("connecting to database")
    ///     .context_chain("loading user profile");
    ///
    /// match effect.run(&()).await {
    ///     Outcome::Failure(err) => {
    ///         assert_eq!(err.inner(), &"connection refused");
    ///         assert_eq!(err.context_trail().len(), 2);
    ///     }
    ///     Outcome::Success(_) => unreachable!(),
    /// }
    /// # });
    /// ```
    fn context(
        self,
        msg: impl Into<String> + Send + 'static,
    ) -> MapFailure<Self, impl FnOnce(Self::Error) -> ContextError<Self::Error> + Send>
    where
        Self::Error: 'static,
    {
        self.map_failure(move |error| ContextError::new(error).context(msg))
    }
}

impl<E: Effect> EffectContext for E {}

/// Append to an existing context trail.
///
/// Implemented only for effects whose failure type is already a
/// [`ContextError`], so repeated annotation extends one trail instead of
/// nesting wrappers.
pub trait EffectContextChain<E: Send + 'static>:
    Effect<Error = ContextError<E>>
{
    /// Add another trail entry to failures from this effect.
    fn context_chain(
        self,
        msg: impl Into<String> + Send + 'static,
    ) -> MapFailure<Self, impl FnOnce(ContextError<E>) -> ContextError<E> + Send> {
        self.map_failure(move |error| error.context(msg))
    }
}

impl<E, Eff> EffectContextChain<E> for Eff
where
    E: Send + 'static,
    Eff: Effect<Error = ContextError<E>>,
{
}
