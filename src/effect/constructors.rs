//! Leaf constructors for environment-aware effects.

use std::future::Future;
use std::marker::PhantomData;

use crate::effect::Effect;
use crate::outcome::Outcome;
use crate::task::Task;

/// A pure value wrapped as an effect; the environment is ignored.
#[derive(Debug, Clone)]
pub struct Pure<A, E, Env> {
    value: A,
    _phantom: PhantomData<(E, Env)>,
}

impl<A, E, Env> Effect for Pure<A, E, Env>
where
    A: Send,
    E: Send,
    Env: Clone + Send + Sync,
{
    type Output = A;
    type Error = E;
    type Env = Env;

    async fn run(self, _env: &Env) -> Outcome<E, A> {
        Outcome::Success(self.value)
    }
}

/// An effect that always succeeds with `value`.
pub fn pure<A, E, Env>(value: A) -> Pure<A, E, Env>
where
    A: Send,
    E: Send,
    Env: Clone + Send + Sync,
{
    Pure {
        value,
        _phantom: PhantomData,
    }
}

/// A failure wrapped as an effect; the environment is ignored.
#[derive(Debug, Clone)]
pub struct Fail<E, A, Env> {
    error: E,
    _phantom: PhantomData<(A, Env)>,
}

impl<E, A, Env> Effect for Fail<E, A, Env>
where
    E: Send,
    A: Send,
    Env: Clone + Send + Sync,
{
    type Output = A;
    type Error = E;
    type Env = Env;

    async fn run(self, _env: &Env) -> Outcome<E, A> {
        Outcome::Failure(self.error)
    }
}

/// An effect that always fails with `error`.
pub fn fail<E, A, Env>(error: E) -> Fail<E, A, Env>
where
    E: Send,
    A: Send,
    Env: Clone + Send + Sync,
{
    Fail {
        error,
        _phantom: PhantomData,
    }
}

/// An already-settled outcome wrapped as an effect.
#[derive(Debug, Clone)]
pub struct FromOutcome<E, A, Env> {
    outcome: Outcome<E, A>,
    _phantom: PhantomData<Env>,
}

impl<E, A, Env> Effect for FromOutcome<E, A, Env>
where
    E: Send,
    A: Send,
    Env: Clone + Send + Sync,
{
    type Output = A;
    type Error = E;
    type Env = Env;

    async fn run(self, _env: &Env) -> Outcome<E, A> {
        self.outcome
    }
}

/// Lift an already-settled outcome into the effect vocabulary.
pub fn from_outcome<E, A, Env>(outcome: Outcome<E, A>) -> FromOutcome<E, A, Env>
where
    E: Send,
    A: Send,
    Env: Clone + Send + Sync,
{
    FromOutcome {
        outcome,
        _phantom: PhantomData,
    }
}

/// An effect built from a synchronous closure over the environment.
pub struct FromFn<F, Env> {
    f: F,
    _phantom: PhantomData<Env>,
}

impl<F, Env> std::fmt::Debug for FromFn<F, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").finish()
    }
}

impl<F, E, A, Env> Effect for FromFn<F, Env>
where
    F: FnOnce(&Env) -> Outcome<E, A> + Send,
    E: Send,
    A: Send,
    Env: Clone + Send + Sync,
{
    type Output = A;
    type Error = E;
    type Env = Env;

    async fn run(self, env: &Env) -> Outcome<E, A> {
        (self.f)(env)
    }
}

/// Defer a synchronous computation over the environment.
pub fn from_fn<F, E, A, Env>(f: F) -> FromFn<F, Env>
where
    F: FnOnce(&Env) -> Outcome<E, A> + Send,
    E: Send,
    A: Send,
    Env: Clone + Send + Sync,
{
    FromFn {
        f,
        _phantom: PhantomData,
    }
}

/// An effect built from a closure producing a future.
///
/// The future cannot borrow from the environment; clone what you need out
/// of it first, typically via
/// [`asks(..).and_then(..)`](crate::effect::reader::asks).
pub struct FromAsync<F, Env> {
    f: F,
    _phantom: PhantomData<Env>,
}

impl<F, Env> std::fmt::Debug for FromAsync<F, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromAsync").finish()
    }
}

impl<F, Fut, E, A, Env> Effect for FromAsync<F, Env>
where
    F: FnOnce(&Env) -> Fut + Send,
    Fut: Future<Output = Outcome<E, A>> + Send,
    E: Send,
    A: Send,
    Env: Clone + Send + Sync,
{
    type Output = A;
    type Error = E;
    type Env = Env;

    async fn run(self, env: &Env) -> Outcome<E, A> {
        (self.f)(env).await
    }
}

/// Defer an async computation that starts from the environment.
pub fn from_async<F, Fut, E, A, Env>(f: F) -> FromAsync<F, Env>
where
    F: FnOnce(&Env) -> Fut + Send,
    Fut: Future<Output = Outcome<E, A>> + Send,
    E: Send,
    A: Send,
    Env: Clone + Send + Sync,
{
    FromAsync {
        f,
        _phantom: PhantomData,
    }
}

/// An environment-independent task lifted into the effect vocabulary.
pub struct FromTask<T, Env> {
    task: T,
    _phantom: PhantomData<Env>,
}

impl<T, Env> std::fmt::Debug for FromTask<T, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromTask").finish()
    }
}

impl<T, E, A, Env> Effect for FromTask<T, Env>
where
    T: Task<Output = Outcome<E, A>>,
    E: Send,
    A: Send,
    Env: Clone + Send + Sync,
{
    type Output = A;
    type Error = E;
    type Env = Env;

    async fn run(self, _env: &Env) -> Outcome<E, A> {
        self.task.run().await
    }
}

/// Lift a task that needs no environment into the effect vocabulary.
pub fn from_task<T, E, A, Env>(task: T) -> FromTask<T, Env>
where
    T: Task<Output = Outcome<E, A>>,
    E: Send,
    A: Send,
    Env: Clone + Send + Sync,
{
    FromTask {
        task,
        _phantom: PhantomData,
    }
}
