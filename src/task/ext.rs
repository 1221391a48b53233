//! Base-layer combinators for deferred effects.

use std::marker::PhantomData;

use futures::future::BoxFuture;

use crate::outcome::Outcome;
use crate::task::Task;

#[cfg(feature = "async")]
use std::time::Duration;

/// Map combinator: transform the settled value.
pub struct Map<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for Map<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map").finish()
    }
}

impl<Inner, F, B> Task for Map<Inner, F>
where
    Inner: Task,
    F: FnOnce(Inner::Output) -> B + Send,
    B: Send,
{
    type Output = B;

    async fn run(self) -> B {
        (self.f)(self.inner.run().await)
    }
}

/// Then combinator: sequence a dependent task. The second task does not
/// start before the first has settled.
pub struct Then<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for Then<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Then").finish()
    }
}

impl<Inner, F, Next> Task for Then<Inner, F>
where
    Inner: Task,
    F: FnOnce(Inner::Output) -> Next + Send,
    Next: Task,
{
    type Output = Next::Output;

    async fn run(self) -> Next::Output {
        (self.f)(self.inner.run().await).run().await
    }
}

/// Lift combinator: wrap an always-succeeding task's payload in
/// `Success`.
pub struct Lift<Inner, E> {
    pub(crate) inner: Inner,
    pub(crate) _phantom: PhantomData<fn() -> E>,
}

impl<Inner, E> std::fmt::Debug for Lift<Inner, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lift").finish()
    }
}

impl<Inner, E> Task for Lift<Inner, E>
where
    Inner: Task,
    E: Send,
{
    type Output = Outcome<E, Inner::Output>;

    async fn run(self) -> Outcome<E, Inner::Output> {
        Outcome::Success(self.inner.run().await)
    }
}

/// Parallel-start pairing: both operands are started eagerly and the
/// result is available when both have settled.
pub struct Zip<L, R> {
    pub(crate) left: L,
    pub(crate) right: R,
}

impl<L, R> std::fmt::Debug for Zip<L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zip").finish()
    }
}

impl<L, R> Task for Zip<L, R>
where
    L: Task,
    R: Task,
{
    type Output = (L::Output, R::Output);

    async fn run(self) -> (L::Output, R::Output) {
        futures::future::join(self.left.run(), self.right.run()).await
    }
}

/// Sequential pairing: the right operand does not start before the left
/// has settled.
pub struct ZipSeq<L, R> {
    pub(crate) left: L,
    pub(crate) right: R,
}

impl<L, R> std::fmt::Debug for ZipSeq<L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipSeq").finish()
    }
}

impl<L, R> Task for ZipSeq<L, R>
where
    L: Task,
    R: Task,
{
    type Output = (L::Output, R::Output);

    async fn run(self) -> (L::Output, R::Output) {
        let left = self.left.run().await;
        let right = self.right.run().await;
        (left, right)
    }
}

/// Delay combinator: sleep before running the inner task.
#[cfg(feature = "async")]
pub struct Delay<Inner> {
    pub(crate) inner: Inner,
    pub(crate) duration: Duration,
}

#[cfg(feature = "async")]
impl<Inner> std::fmt::Debug for Delay<Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delay").field("duration", &self.duration).finish()
    }
}

#[cfg(feature = "async")]
impl<Inner> Task for Delay<Inner>
where
    Inner: Task,
{
    type Output = Inner::Output;

    async fn run(self) -> Inner::Output {
        tokio::time::sleep(self.duration).await;
        self.inner.run().await
    }
}

/// A type-erased task.
pub struct BoxedTask<A> {
    run: Box<dyn FnOnce() -> BoxFuture<'static, A> + Send>,
}

impl<A> std::fmt::Debug for BoxedTask<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedTask").finish()
    }
}

impl<A: Send> Task for BoxedTask<A> {
    type Output = A;

    fn run(self) -> impl std::future::Future<Output = A> + Send {
        (self.run)()
    }
}

/// Extension trait providing the base combinator methods for all tasks.
pub trait TaskExt: Task {
    /// Transform the settled value.
    fn map<B, F>(self, f: F) -> Map<Self, F>
    where
        F: FnOnce(Self::Output) -> B + Send,
        B: Send,
    {
        Map { inner: self, f }
    }

    /// Sequence a dependent task: run this one, feed its value to `f`,
    /// run the task `f` returns.
    fn then<Next, F>(self, f: F) -> Then<Self, F>
    where
        F: FnOnce(Self::Output) -> Next + Send,
        Next: Task,
    {
        Then { inner: self, f }
    }

    /// Enter the failure-aware vocabulary by wrapping this task's payload
    /// in `Success`.
    fn lift<E: Send>(self) -> Lift<Self, E> {
        Lift {
            inner: self,
            _phantom: PhantomData,
        }
    }

    /// Pair with another task, starting both eagerly (parallel-start
    /// `ap`). For guaranteed left-to-right ordering use
    /// [`zip_seq`](TaskExt::zip_seq).
    fn zip<R: Task>(self, right: R) -> Zip<Self, R> {
        Zip { left: self, right }
    }

    /// Pair with another task, strictly sequentially: the right task does
    /// not start before this one settles.
    fn zip_seq<R: Task>(self, right: R) -> ZipSeq<Self, R> {
        ZipSeq { left: self, right }
    }

    /// Sleep `duration` before running this task: a minimum-latency
    /// bound, independent of the task's own latency.
    #[cfg(feature = "async")]
    fn delay(self, duration: Duration) -> Delay<Self> {
        Delay {
            inner: self,
            duration,
        }
    }

    /// Erase the concrete combinator type.
    fn boxed(self) -> BoxedTask<Self::Output>
    where
        Self: 'static,
    {
        BoxedTask {
            run: Box::new(move || Box::pin(self.run())),
        }
    }
}

impl<T: Task> TaskExt for T {}
