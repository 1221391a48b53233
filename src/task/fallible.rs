//! Failure-aware combinators for deferred effects.
//!
//! The deferred instantiation of the generic failure layer: it applies to
//! any [`Task`] whose output is an [`Outcome`] and carries the same
//! fail-fast guarantee as the lazy stack - once a step settles with
//! `Failure`, no subsequent composed step starts.
//!
//! The vocabulary is instantiated separately per base capability trait
//! (here for `Task`, in [`crate::thunk::fallible`] for `Thunk`), the same
//! way `futures` re-derives `TryFutureExt` and `TryStreamExt` - Rust has
//! no higher-kinded abstraction to write it once for both.

use crate::outcome::Outcome;
use crate::task::Task;

/// Fail-fast chain: on success, feed the payload to the continuation and
/// run the task it returns; on failure, short-circuit without starting
/// anything further.
pub struct AndThen<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for AndThen<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndThen").finish()
    }
}

impl<Inner, F, Next, E, A, B> Task for AndThen<Inner, F>
where
    Inner: Task<Output = Outcome<E, A>>,
    F: FnOnce(A) -> Next + Send,
    Next: Task<Output = Outcome<E, B>>,
    E: Send,
    A: Send,
    B: Send,
{
    type Output = Outcome<E, B>;

    async fn run(self) -> Outcome<E, B> {
        match self.inner.run().await {
            Outcome::Success(value) => (self.f)(value).run().await,
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }
}

/// Map the success payload.
pub struct MapSuccess<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for MapSuccess<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapSuccess").finish()
    }
}

impl<Inner, F, E, A, B> Task for MapSuccess<Inner, F>
where
    Inner: Task<Output = Outcome<E, A>>,
    F: FnOnce(A) -> B + Send,
    E: Send,
    A: Send,
    B: Send,
{
    type Output = Outcome<E, B>;

    async fn run(self) -> Outcome<E, B> {
        self.inner.run().await.map(self.f)
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

impl<Inner, F, E, E2, A> Task for MapFailure<Inner, F>
where
    Inner: Task<Output = Outcome<E, A>>,
    F: FnOnce(E) -> E2 + Send,
    E: Send,
    E2: Send,
    A: Send,
{
    type Output = Outcome<E2, A>;

    async fn run(self) -> Outcome<E2, A> {
        self.inner.run().await.map_failure(self.f)
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

impl<Inner, F, G, E, E2, A, B> Task for BiMap<Inner, F, G>
where
    Inner: Task<Output = Outcome<E, A>>,
    F: FnOnce(E) -> E2 + Send,
    G: FnOnce(A) -> B + Send,
    E: Send,
    E2: Send,
    A: Send,
    B: Send,
{
    type Output = Outcome<E2, B>;

    async fn run(self) -> Outcome<E2, B> {
        self.inner.run().await.bimap(self.on_failure, self.on_success)
    }
}

/// Branch into handler-produced base tasks; exactly one handler runs.
pub struct Fold<Inner, F, G> {
    pub(crate) inner: Inner,
    pub(crate) on_failure: F,
    pub(crate) on_success: G,
}

impl<Inner, F, G> std::fmt::Debug for Fold<Inner, F, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fold").finish()
    }
}

impl<Inner, F, G, FT, GT, E, A, B> Task for Fold<Inner, F, G>
where
    Inner: Task<Output = Outcome<E, A>>,
    F: FnOnce(E) -> FT + Send,
    FT: Task<Output = B>,
    G: FnOnce(A) -> GT + Send,
    GT: Task<Output = B>,
    E: Send,
    A: Send,
    B: Send,
{
    type Output = B;

    async fn run(self) -> B {
        match self.inner.run().await {
            Outcome::Failure(error) => (self.on_failure)(error).run().await,
            Outcome::Success(value) => (self.on_success)(value).run().await,
        }
    }
}

/// Escape with a default: the failure handler produces a base task of the
/// success type.
pub struct GetOrElse<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) on_failure: F,
}

impl<Inner, F> std::fmt::Debug for GetOrElse<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetOrElse").finish()
    }
}

impl<Inner, F, FT, E, A> Task for GetOrElse<Inner, F>
where
    Inner: Task<Output = Outcome<E, A>>,
    F: FnOnce(E) -> FT + Send,
    FT: Task<Output = A>,
    E: Send,
    A: Send,
{
    type Output = A;

    async fn run(self) -> A {
        match self.inner.run().await {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => (self.on_failure)(error).run().await,
        }
    }
}

/// On failure, switch to a replacement task, possibly with a new failure
/// type.
pub struct OrElse<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for OrElse<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrElse").finish()
    }
}

impl<Inner, F, Next, E, E2, A> Task for OrElse<Inner, F>
where
    Inner: Task<Output = Outcome<E, A>>,
    F: FnOnce(E) -> Next + Send,
    Next: Task<Output = Outcome<E2, A>>,
    E: Send,
    E2: Send,
    A: Send,
{
    type Output = Outcome<E2, A>;

    async fn run(self) -> Outcome<E2, A> {
        match self.inner.run().await {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => (self.f)(error).run().await,
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

impl<Inner, F, Next, E, A> Task for Alt<Inner, F>
where
    Inner: Task<Output = Outcome<E, A>>,
    F: FnOnce() -> Next + Send,
    Next: Task<Output = Outcome<E, A>>,
    E: Send,
    A: Send,
{
    type Output = Outcome<E, A>;

    async fn run(self) -> Outcome<E, A> {
        match self.inner.run().await {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(_) => (self.alternative)().run().await,
        }
    }
}

/// Exchange the failure and success channels.
pub struct Swap<Inner> {
    pub(crate) inner: Inner,
}

impl<Inner> std::fmt::Debug for Swap<Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Swap").finish()
    }
}

impl<Inner, E, A> Task for Swap<Inner>
where
    Inner: Task<Output = Outcome<E, A>>,
    E: Send,
    A: Send,
{
    type Output = Outcome<A, E>;

    async fn run(self) -> Outcome<A, E> {
        self.inner.run().await.swap()
    }
}

/// Failure-aware combinator methods, available on any task settling with
/// an [`Outcome`].
pub trait FallibleTaskExt<E: Send, A: Send>: Task<Output = Outcome<E, A>> {
    /// Fail-fast sequencing. On `Failure` the continuation is never
    /// invoked and the task it would have produced never starts.
    fn and_then<B, Next, F>(self, f: F) -> AndThen<Self, F>
    where
        F: FnOnce(A) -> Next + Send,
        Next: Task<Output = Outcome<E, B>>,
        B: Send,
    {
        AndThen { inner: self, f }
    }

    /// Transform the success payload.
    fn map_success<B, F>(self, f: F) -> MapSuccess<Self, F>
    where
        F: FnOnce(A) -> B + Send,
        B: Send,
    {
        MapSuccess { inner: self, f }
    }

    /// Transform the failure payload.
    fn map_failure<E2, F>(self, f: F) -> MapFailure<Self, F>
    where
        F: FnOnce(E) -> E2 + Send,
        E2: Send,
    {
        MapFailure { inner: self, f }
    }

    /// Transform both channels; exactly one function runs per settle.
    fn bimap<E2, B, F, G>(self, on_failure: F, on_success: G) -> BiMap<Self, F, G>
    where
        F: FnOnce(E) -> E2 + Send,
        G: FnOnce(A) -> B + Send,
        E2: Send,
        B: Send,
    {
        BiMap {
            inner: self,
            on_failure,
            on_success,
        }
    }

    /// Branch into handler-produced base tasks.
    fn fold<B, FT, GT, F, G>(self, on_failure: F, on_success: G) -> Fold<Self, F, G>
    where
        F: FnOnce(E) -> FT + Send,
        FT: Task<Output = B>,
        G: FnOnce(A) -> GT + Send,
        GT: Task<Output = B>,
        B: Send,
    {
        Fold {
            inner: self,
            on_failure,
            on_success,
        }
    }

    /// Escape the failure channel with a handler producing the success
    /// type.
    fn get_or_else<FT, F>(self, on_failure: F) -> GetOrElse<Self, F>
    where
        F: FnOnce(E) -> FT + Send,
        FT: Task<Output = A>,
    {
        GetOrElse {
            inner: self,
            on_failure,
        }
    }

    /// Recover by switching to a replacement task, possibly with a new
    /// failure type.
    fn or_else<E2, Next, F>(self, f: F) -> OrElse<Self, F>
    where
        F: FnOnce(E) -> Next + Send,
        Next: Task<Output = Outcome<E2, A>>,
        E2: Send,
    {
        OrElse { inner: self, f }
    }

    /// On failure, run the lazily-constructed alternative; the closure is
    /// never invoked on success.
    fn alt<Next, F>(self, alternative: F) -> Alt<Self, F>
    where
        F: FnOnce() -> Next + Send,
        Next: Task<Output = Outcome<E, A>>,
    {
        Alt {
            inner: self,
            alternative,
        }
    }

    /// Exchange the roles of failure and success.
    fn swap(self) -> Swap<Self> {
        Swap { inner: self }
    }
}

impl<E: Send, A: Send, T> FallibleTaskExt<E, A> for T where T: Task<Output = Outcome<E, A>> {}
