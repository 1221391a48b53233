//! Reader operations: environment access and substitution.
//!
//! - [`ask`] - get the entire environment (cloned)
//! - [`asks`] - project a value out of the environment
//! - [`local`] - run an effect against a derived environment

use std::marker::PhantomData;

use crate::effect::Effect;
use crate::outcome::Outcome;

/// Get the entire environment (cloned). Built by [`ask`].
pub struct Ask<E, Env> {
    _phantom: PhantomData<(E, Env)>,
}

impl<E, Env> std::fmt::Debug for Ask<E, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ask").finish()
    }
}

impl<E, Env> Effect for Ask<E, Env>
where
    E: Send,
    Env: Clone + Send + Sync,
{
    type Output = Env;
    type Error = E;
    type Env = Env;

    fn run(self, env: &Env) -> impl std::future::Future<Output = Outcome<E, Env>> + Send {
        let env = env.clone();
        async move { Outcome::Success(env) }
    }
}

/// An effect that succeeds with a clone of the environment.
///
/// Prefer [`asks`] when only part of the environment is needed; it avoids
/// cloning the whole thing.
pub fn ask<E, Env>() -> Ask<E, Env>
where
    E: Send,
    Env: Clone + Send + Sync,
{
    Ask {
        _phantom: PhantomData,
    }
}

/// Project a value out of the environment. Built by [`asks`].
pub struct Asks<F, E, Env> {
    f: F,
    _phantom: PhantomData<(E, Env)>,
}

impl<F, E, Env> std::fmt::Debug for Asks<F, E, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Asks").finish()
    }
}

impl<F, U, E, Env> Effect for Asks<F, E, Env>
where
    F: FnOnce(&Env) -> U + Send,
    U: Send,
    E: Send,
    Env: Clone + Send + Sync,
{
    type Output = U;
    type Error = E;
    type Env = Env;

    async fn run(self, env: &Env) -> Outcome<E, U> {
        Outcome::Success((self.f)(env))
    }
}

/// An effect that succeeds with a projection of the environment.
///
/// ```rust
/// use millrace::effect::{self, Effect};
/// use millrace::Outcome;
///
/// #[derive(Clone)]
/// struct Env { port: u16 }
///
/// # futures::executor::block_on(async {
/// let effect = effect::asks::<_, String, Env, _>(|env: &Env| env.port);
/// assert_eq!(effect.run(&Env { port: 8080 }).await, Outcome::success(8080));
/// # });
/// ```
pub fn asks<F, E, Env, U>(f: F) -> Asks<F, E, Env>
where
    F: FnOnce(&Env) -> U + Send,
    U: Send,
    E: Send,
    Env: Clone + Send + Sync,
{
    Asks {
        f,
        _phantom: PhantomData,
    }
}

/// Run an effect against a derived environment. Built by [`local`] or
/// [`EffectExt::local`](crate::effect::EffectExt::local).
pub struct Local<Inner, F, Env2> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
    pub(crate) _phantom: PhantomData<Env2>,
}

impl<Inner, F, Env2> std::fmt::Debug for Local<Inner, F, Env2> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Local").finish()
    }
}

impl<Inner, F, Env2> Effect for Local<Inner, F, Env2>
where
    Inner: Effect,
    F: FnOnce(&Env2) -> Inner::Env + Send,
    Env2: Clone + Send + Sync,
{
    type Output = Inner::Output;
    type Error = Inner::Error;
    type Env = Env2;

    fn run(
        self,
        env: &Env2,
    ) -> impl std::future::Future<Output = Outcome<Self::Error, Self::Output>> + Send {
        let inner_env = (self.f)(env);
        async move { self.inner.run(&inner_env).await }
    }
}

/// Run `inner` against the environment derived by `f`.
///
/// The derivation applies only to `inner`; surrounding effects keep the
/// outer environment.
pub fn local<Inner, F, Env2>(f: F, inner: Inner) -> Local<Inner, F, Env2>
where
    Inner: Effect,
    F: FnOnce(&Env2) -> Inner::Env + Send,
    Env2: Clone + Send + Sync,
{
    Local {
        inner,
        f,
        _phantom: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{pure, EffectExt};

    #[derive(Clone, Debug, PartialEq)]
    struct Env {
        greeting: String,
    }

    #[tokio::test]
    async fn ask_clones_the_whole_environment() {
        let env = Env {
            greeting: "hello".to_string(),
        };
        let outcome = ask::<String, Env>().run(&env).await;
        assert_eq!(outcome, Outcome::success(env));
    }

    #[tokio::test]
    async fn asks_projects_without_cloning_the_rest() {
        let env = Env {
            greeting: "hello".to_string(),
        };
        let outcome = asks::<_, String, Env, _>(|env: &Env| env.greeting.len())
            .run(&env)
            .await;
        assert_eq!(outcome, Outcome::success(5));
    }

    #[tokio::test]
    async fn local_substitutes_only_for_the_inner_effect() {
        #[derive(Clone)]
        struct Outer {
            scale: i32,
        }

        let doubled = asks::<_, String, i32, _>(|value: &i32| *value)
            .local(|outer: &Outer| outer.scale * 21);
        assert_eq!(doubled.run(&Outer { scale: 2 }).await, Outcome::success(42));
    }

    #[tokio::test]
    async fn asks_chains_into_dependent_effects() {
        let env = Env {
            greeting: "hi".to_string(),
        };
        let effect = asks::<_, String, Env, _>(|env: &Env| env.greeting.clone())
            .and_then(|greeting| pure(format!("{greeting}!")));
        assert_eq!(effect.run(&env).await, Outcome::success("hi!".to_string()));
    }
}
