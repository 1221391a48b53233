//! Extension trait providing combinator methods for all effects.

use std::marker::PhantomData;

use crate::effect::boxed::BoxedEffect;
use crate::effect::combinators::{Alt, AndThen, BiMap, Map, MapFailure, OrElse};
use crate::effect::reader::Local;
use crate::effect::Effect;
use crate::outcome::Outcome;

/// Combinator methods, available on every [`Effect`] through a blanket
/// implementation.
///
/// ```rust
/// use millrace::effect::{self, Effect, EffectExt};
/// use millrace::Outcome;
///
/// # futures::executor::block_on(async {
/// let effect = effect::pure::<_, String, ()>(21)
///     .map(|x| x * 2)
///     .and_then(|x| effect::pure(x + 1));
/// assert_eq!(effect.run(&()).await, Outcome::success(43));
/// # });
/// ```
pub trait EffectExt: Effect {
    /// Transform the success payload.
    fn map<B, F>(self, f: F) -> Map<Self, F>
    where
        F: FnOnce(Self::Output) -> B + Send,
        B: Send,
    {
        Map { inner: self, f }
    }

    /// Transform the failure payload. Useful for aligning error types
    /// before [`and_then`](EffectExt::and_then).
    fn map_failure<E2, F>(self, f: F) -> MapFailure<Self, F>
    where
        F: FnOnce(Self::Error) -> E2 + Send,
        E2: Send,
    {
        MapFailure { inner: self, f }
    }

    /// Transform both channels; exactly one function runs per settle.
    fn bimap<E2, B, F, G>(self, on_failure: F, on_success: G) -> BiMap<Self, F, G>
    where
        F: FnOnce(Self::Error) -> E2 + Send,
        G: FnOnce(Self::Output) -> B + Send,
        E2: Send,
        B: Send,
    {
        BiMap {
            inner: self,
            on_failure,
            on_success,
        }
    }

    /// Fail-fast sequencing: on success, run the dependent effect against
    /// the same environment; on failure, the continuation is never
    /// invoked.
    ///
    /// The chained effect must share this effect's failure type; use
    /// [`map_failure`](EffectExt::map_failure) to convert first.
    fn and_then<Next, F>(self, f: F) -> AndThen<Self, F>
    where
        Next: Effect<Error = Self::Error, Env = Self::Env>,
        F: FnOnce(Self::Output) -> Next + Send,
    {
        AndThen { inner: self, f }
    }

    /// Recover by switching to a replacement effect, possibly with a new
    /// failure type.
    fn or_else<Next, F>(self, f: F) -> OrElse<Self, F>
    where
        Next: Effect<Output = Self::Output, Env = Self::Env>,
        F: FnOnce(Self::Error) -> Next + Send,
    {
        OrElse { inner: self, f }
    }

    /// On failure, run the lazily-constructed alternative; the closure is
    /// never invoked on success.
    fn alt<Next, F>(self, alternative: F) -> Alt<Self, F>
    where
        Next: Effect<Output = Self::Output, Error = Self::Error, Env = Self::Env>,
        F: FnOnce() -> Next + Send,
    {
        Alt {
            inner: self,
            alternative,
        }
    }

    /// Run this effect against an environment derived from an outer one.
    fn local<F, Env2>(self, f: F) -> Local<Self, F, Env2>
    where
        F: FnOnce(&Env2) -> Self::Env + Send,
        Env2: Clone + Send + Sync,
    {
        Local {
            inner: self,
            f,
            _phantom: PhantomData,
        }
    }

    /// Erase the concrete combinator type.
    ///
    /// Needed for collections, returning different effects from match
    /// arms, and recursion. Boxing clones the environment at run time to
    /// reach `'static`.
    fn boxed(self) -> BoxedEffect<Self::Output, Self::Error, Self::Env>
    where
        Self: 'static,
        Self::Output: 'static,
        Self::Error: 'static,
        Self::Env: 'static,
    {
        BoxedEffect::new(self)
    }

    /// Run and await in one call.
    async fn execute(self, env: &Self::Env) -> Outcome<Self::Error, Self::Output> {
        self.run(env).await
    }
}

impl<E: Effect> EffectExt for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{fail, pure};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn map_and_then_compose() {
        let effect = pure::<_, String, ()>(21)
            .map(|x| x * 2)
            .and_then(|x| pure(x + 1));
        assert_eq!(effect.run(&()).await, Outcome::success(43));
    }

    #[tokio::test]
    async fn and_then_short_circuits_on_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe = calls.clone();
        let effect = fail::<&str, i32, ()>("err").and_then(move |x| {
            probe.fetch_add(1, Ordering::SeqCst);
            pure(x + 1)
        });
        assert_eq!(effect.run(&()).await, Outcome::failure("err"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn map_failure_aligns_error_types() {
        let effect = fail::<&str, i32, ()>("oops").map_failure(|e| e.len());
        assert_eq!(effect.run(&()).await, Outcome::failure(4));
    }

    #[tokio::test]
    async fn or_else_recovers() {
        let effect = fail::<&str, i32, ()>("gone").or_else(|_| pure::<_, &str, ()>(42));
        assert_eq!(effect.run(&()).await, Outcome::success(42));
    }

    #[tokio::test]
    async fn alt_is_lazy() {
        let constructed = Arc::new(AtomicUsize::new(0));
        let probe = constructed.clone();
        let effect = pure::<_, &str, ()>(1).alt(move || {
            probe.fetch_add(1, Ordering::SeqCst);
            pure(2)
        });
        assert_eq!(effect.run(&()).await, Outcome::success(1));
        assert_eq!(constructed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn bimap_touches_exactly_one_channel() {
        let effect = pure::<_, &str, ()>(3).bimap(|e: &str| e.len(), |a| a * 10);
        assert_eq!(effect.run(&()).await, Outcome::success(30));
    }
}
