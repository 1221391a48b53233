//! Combinator structs for environment-aware effects.
//!
//! Each struct stores its operands inline and implements [`Effect`]
//! directly, so composition stays allocation-free until
//! [`boxed`](crate::effect::EffectExt::boxed) is requested.

use crate::effect::Effect;
use crate::outcome::Outcome;

/// Map the success payload.
pub struct Map<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for Map<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map").finish()
    }
}

impl<Inner, F, B> Effect for Map<Inner, F>
where
    Inner: Effect,
    F: FnOnce(Inner::Output) -> B + Send,
    B: Send,
{
    type Output = B;
    type Error = Inner::Error;
    type Env = Inner::Env;

    async fn run(self, env: &Self::Env) -> Outcome<Self::Error, B> {
        self.inner.run(env).await.map(self.f)
    }
}

/// Map the failure payload.
pub struct MapFailure<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for MapFailure<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapFailure").finish()
    }
}

impl<Inner, F, E2> Effect for MapFailure<Inner, F>
where
    Inner: Effect,
    F: FnOnce(Inner::Error) -> E2 + Send,
    E2: Send,
{
    type Output = Inner::Output;
    type Error = E2;
    type Env = Inner::Env;

    async fn run(self, env: &Self::Env) -> Outcome<E2, Self::Output> {
        self.inner.run(env).await.map_failure(self.f)
    }
}

/// Map both channels at once.
pub struct BiMap<Inner, F, G> {
    pub(crate) inner: Inner,
    pub(crate) on_failure: F,
    pub(crate) on_success: G,
}

impl<Inner, F, G> std::fmt::Debug for BiMap<Inner, F, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiMap").finish()
    }
}

impl<Inner, F, G, E2, B> Effect for BiMap<Inner, F, G>
where
    Inner: Effect,
    F: FnOnce(Inner::Error) -> E2 + Send,
    G: FnOnce(Inner::Output) -> B + Send,
    E2: Send,
    B: Send,
{
    type Output = B;
    type Error = E2;
    type Env = Inner::Env;

    async fn run(self, env: &Self::Env) -> Outcome<E2, B> {
        self.inner
            .run(env)
            .await
            .bimap(self.on_failure, self.on_success)
    }
}

/// Fail-fast chain: on success, feed the payload to the continuation and
/// run the effect it returns against the same environment.
pub struct AndThen<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for AndThen<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndThen").finish()
    }
}

impl<Inner, F, Next> Effect for AndThen<Inner, F>
where
    Inner: Effect,
    F: FnOnce(Inner::Output) -> Next + Send,
    Next: Effect<Error = Inner::Error, Env = Inner::Env>,
{
    type Output = Next::Output;
    type Error = Inner::Error;
    type Env = Inner::Env;

    async fn run(self, env: &Self::Env) -> Outcome<Self::Error, Next::Output> {
        match self.inner.run(env).await {
            Outcome::Success(value) => (self.f)(value).run(env).await,
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }
}

/// On failure, switch to a replacement effect, possibly with a new
/// failure type.
pub struct OrElse<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for OrElse<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrElse").finish()
    }
}

impl<Inner, F, Next> Effect for OrElse<Inner, F>
where
    Inner: Effect,
    F: FnOnce(Inner::Error) -> Next + Send,
    Next: Effect<Output = Inner::Output, Env = Inner::Env>,
{
    type Output = Inner::Output;
    type Error = Next::Error;
    type Env = Inner::Env;

    async fn run(self, env: &Self::Env) -> Outcome<Next::Error, Self::Output> {
        match self.inner.run(env).await {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => (self.f)(error).run(env).await,
        }
    }
}

/// On failure, run a lazily-constructed alternative.
pub struct Alt<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) alternative: F,
}

impl<Inner, F> std::fmt::Debug for Alt<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alt").finish()
    }
}

impl<Inner, F, Next> Effect for Alt<Inner, F>
where
    Inner: Effect,
    F: FnOnce() -> Next + Send,
    Next: Effect<Output = Inner::Output, Error = Inner::Error, Env = Inner::Env>,
{
    type Output = Inner::Output;
    type Error = Inner::Error;
    type Env = Inner::Env;

    async fn run(self, env: &Self::Env) -> Outcome<Self::Error, Self::Output> {
        match self.inner.run(env).await {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(_) => (self.alternative)().run(env).await,
        }
    }
}
