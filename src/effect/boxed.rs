//! Type-erased effects for opt-in boxing.
//!
//! Boxing clones the environment at run time so the stored future can be
//! `'static`. Cheap when `Env` holds `Arc`-wrapped resources.

use std::marker::PhantomData;

use futures::future::BoxFuture;

use crate::effect::Effect;
use crate::outcome::Outcome;

/// A type-erased effect.
///
/// ```rust
/// use millrace::effect::{self, BoxedEffect, Effect, EffectExt};
///
/// fn countdown(n: i32) -> BoxedEffect<i32, String, ()> {
///     if n <= 0 {
///         effect::pure(0).boxed()
///     } else {
///         effect::pure(n)
///             .and_then(move |x| countdown(x - 1).map(move |sum| x + sum))
///             .boxed()
///     }
/// }
///
/// # futures::executor::block_on(async {
/// assert_eq!(countdown(4).run(&()).await.into_success(), Some(10));
/// # });
/// ```
pub struct BoxedEffect<A, E, Env> {
    // Takes an owned Env, cloned from the reference at run time.
    run_fn: Box<dyn FnOnce(Env) -> BoxFuture<'static, Outcome<E, A>> + Send>,
    _phantom: PhantomData<Env>,
}

impl<A, E, Env> std::fmt::Debug for BoxedEffect<A, E, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedEffect").finish()
    }
}

impl<A, E, Env> BoxedEffect<A, E, Env>
where
    A: Send + 'static,
    E: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    /// Erase the concrete type of `effect`.
    pub fn new<Eff>(effect: Eff) -> Self
    where
        Eff: Effect<Output = A, Error = E, Env = Env> + 'static,
    {
        BoxedEffect {
            run_fn: Box::new(move |env: Env| {
                // env is owned here, so the future is 'static.
                Box::pin(async move { effect.run(&env).await })
            }),
            _phantom: PhantomData,
        }
    }
}

impl<A, E, Env> Effect for BoxedEffect<A, E, Env>
where
    A: Send,
    E: Send,
    Env: Clone + Send + Sync,
{
    type Output = A;
    type Error = E;
    type Env = Env;

    fn run(self, env: &Env) -> impl std::future::Future<Output = Outcome<E, A>> + Send {
        (self.run_fn)(env.clone())
    }
}
