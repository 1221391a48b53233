//! Failure-aware combinators for lazy effects.
//!
//! This is the generic composition layer over the lazy base: it applies
//! to *any* [`Thunk`] whose output is an [`Outcome`], including
//! user-supplied ones, and derives the full failure vocabulary from the
//! base capability (`pure` / `map` / `then`) without the base type's
//! involvement.
//!
//! The central guarantee is fail-fast sequencing: once a step produces a
//! `Failure`, [`and_then`](FallibleThunkExt::and_then) neither invokes the
//! continuation nor forces the effect it would have produced.
//!
//! ```rust
//! use millrace::thunk::{self, FallibleThunkExt, Thunk};
//! use millrace::Outcome;
//!
//! let chained = thunk::succeed::<String, _>(2).and_then(|x| thunk::succeed(x + 3));
//! assert_eq!(chained.force(), Outcome::success(5));
//!
//! let short = thunk::fail::<_, i32>("err").and_then(|x| thunk::succeed(x + 3));
//! assert_eq!(short.force(), Outcome::failure("err"));
//! ```

use crate::outcome::Outcome;
use crate::thunk::Thunk;

/// Fail-fast chain: on success, feed the payload to the continuation and
/// force the effect it returns; on failure, short-circuit.
pub struct AndThen<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for AndThen<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndThen").finish()
    }
}

impl<Inner, F, Next, E, A, B> Thunk for AndThen<Inner, F>
where
    Inner: Thunk<Output = Outcome<E, A>>,
    F: FnOnce(A) -> Next,
    Next: Thunk<Output = Outcome<E, B>>,
{
    type Output = Outcome<E, B>;

    fn force(self) -> Outcome<E, B> {
        match self.inner.force() {
            Outcome::Success(value) => (self.f)(value).force(),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }
}

/// Map the success payload, leaving the fail-fast behavior untouched.
pub struct MapSuccess<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for MapSuccess<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapSuccess").finish()
    }
}

impl<Inner, F, E, A, B> Thunk for MapSuccess<Inner, F>
where
    Inner: Thunk<Output = Outcome<E, A>>,
    F: FnOnce(A) -> B,
{
    type Output = Outcome<E, B>;

    fn force(self) -> Outcome<E, B> {
        self.inner.force().map(self.f)
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

impl<Inner, F, E, E2, A> Thunk for MapFailure<Inner, F>
where
    Inner: Thunk<Output = Outcome<E, A>>,
    F: FnOnce(E) -> E2,
{
    type Output = Outcome<E2, A>;

    fn force(self) -> Outcome<E2, A> {
        self.inner.force().map_failure(self.f)
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

impl<Inner, F, G, E, E2, A, B> Thunk for BiMap<Inner, F, G>
where
    Inner: Thunk<Output = Outcome<E, A>>,
    F: FnOnce(E) -> E2,
    G: FnOnce(A) -> B,
{
    type Output = Outcome<E2, B>;

    fn force(self) -> Outcome<E2, B> {
        self.inner.force().bimap(self.on_failure, self.on_success)
    }
}

/// Branch into handler-produced base effects.
///
/// The handlers return plain thunks, so either branch can itself perform
/// effects; exactly one of them runs.
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

impl<Inner, F, G, FT, GT, E, A, B> Thunk for Fold<Inner, F, G>
where
    Inner: Thunk<Output = Outcome<E, A>>,
    F: FnOnce(E) -> FT,
    FT: Thunk<Output = B>,
    G: FnOnce(A) -> GT,
    GT: Thunk<Output = B>,
{
    type Output = B;

    fn force(self) -> B {
        match self.inner.force() {
            Outcome::Failure(error) => (self.on_failure)(error).force(),
            Outcome::Success(value) => (self.on_success)(value).force(),
        }
    }
}

/// Escape with a default: the failure handler produces a base effect of
/// the success type.
pub struct GetOrElse<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) on_failure: F,
}

impl<Inner, F> std::fmt::Debug for GetOrElse<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetOrElse").finish()
    }
}

impl<Inner, F, FT, E, A> Thunk for GetOrElse<Inner, F>
where
    Inner: Thunk<Output = Outcome<E, A>>,
    F: FnOnce(E) -> FT,
    FT: Thunk<Output = A>,
{
    type Output = A;

    fn force(self) -> A {
        match self.inner.force() {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => (self.on_failure)(error).force(),
        }
    }
}

/// On failure, switch to a replacement effect built from the failure
/// payload - the replacement may carry a different failure type.
pub struct OrElse<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for OrElse<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrElse").finish()
    }
}

impl<Inner, F, Next, E, E2, A> Thunk for OrElse<Inner, F>
where
    Inner: Thunk<Output = Outcome<E, A>>,
    F: FnOnce(E) -> Next,
    Next: Thunk<Output = Outcome<E2, A>>,
{
    type Output = Outcome<E2, A>;

    fn force(self) -> Outcome<E2, A> {
        match self.inner.force() {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => (self.f)(error).force(),
        }
    }
}

/// On failure, evaluate a lazily-constructed alternative.
pub struct Alt<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) alternative: F,
}

impl<Inner, F> std::fmt::Debug for Alt<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alt").finish()
    }
}

impl<Inner, F, Next, E, A> Thunk for Alt<Inner, F>
where
    Inner: Thunk<Output = Outcome<E, A>>,
    F: FnOnce() -> Next,
    Next: Thunk<Output = Outcome<E, A>>,
{
    type Output = Outcome<E, A>;

    fn force(self) -> Outcome<E, A> {
        match self.inner.force() {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(_) => (self.alternative)().force(),
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

impl<Inner, E, A> Thunk for Swap<Inner>
where
    Inner: Thunk<Output = Outcome<E, A>>,
{
    type Output = Outcome<A, E>;

    fn force(self) -> Outcome<A, E> {
        self.inner.force().swap()
    }
}

/// Failure-aware combinator methods, available on any thunk producing an
/// [`Outcome`].
///
/// Automatically implemented; the method set mirrors
/// [`Outcome`]'s own vocabulary, lifted pointwise over deferral.
pub trait FallibleThunkExt<E, A>: Thunk<Output = Outcome<E, A>> {
    /// Fail-fast sequencing. On `Failure` the continuation is never
    /// invoked and the effect it would have produced never runs.
    fn and_then<B, Next, F>(self, f: F) -> AndThen<Self, F>
    where
        F: FnOnce(A) -> Next,
        Next: Thunk<Output = Outcome<E, B>>,
    {
        AndThen { inner: self, f }
    }

    /// Transform the success payload.
    fn map_success<B, F>(self, f: F) -> MapSuccess<Self, F>
    where
        F: FnOnce(A) -> B,
    {
        MapSuccess { inner: self, f }
    }

    /// Transform the failure payload.
    fn map_failure<E2, F>(self, f: F) -> MapFailure<Self, F>
    where
        F: FnOnce(E) -> E2,
    {
        MapFailure { inner: self, f }
    }

    /// Transform both channels; exactly one function runs per force.
    fn bimap<E2, B, F, G>(self, on_failure: F, on_success: G) -> BiMap<Self, F, G>
    where
        F: FnOnce(E) -> E2,
        G: FnOnce(A) -> B,
    {
        BiMap {
            inner: self,
            on_failure,
            on_success,
        }
    }

    /// Branch into handler-produced base effects.
    fn fold<B, FT, GT, F, G>(self, on_failure: F, on_success: G) -> Fold<Self, F, G>
    where
        F: FnOnce(E) -> FT,
        FT: Thunk<Output = B>,
        G: FnOnce(A) -> GT,
        GT: Thunk<Output = B>,
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
        F: FnOnce(E) -> FT,
        FT: Thunk<Output = A>,
    {
        GetOrElse {
            inner: self,
            on_failure,
        }
    }

    /// Recover by switching to a replacement effect, possibly with a new
    /// failure type.
    fn or_else<E2, Next, F>(self, f: F) -> OrElse<Self, F>
    where
        F: FnOnce(E) -> Next,
        Next: Thunk<Output = Outcome<E2, A>>,
    {
        OrElse { inner: self, f }
    }

    /// On failure, use the lazily-constructed alternative; the closure is
    /// never invoked on success.
    fn alt<Next, F>(self, alternative: F) -> Alt<Self, F>
    where
        F: FnOnce() -> Next,
        Next: Thunk<Output = Outcome<E, A>>,
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

impl<E, A, T> FallibleThunkExt<E, A> for T where T: Thunk<Output = Outcome<E, A>> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thunk::{fail, from_fn, pure, succeed, ThunkExt};
    use std::cell::Cell;

    #[test]
    fn and_then_never_invokes_continuation_after_failure() {
        let calls = Cell::new(0u32);
        let outcome = fail::<&str, i32>("err")
            .and_then(|x| {
                calls.set(calls.get() + 1);
                succeed(x + 3)
            })
            .force();
        assert_eq!(outcome, Outcome::failure("err"));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn and_then_skips_the_effect_a_failed_step_would_have_produced() {
        let ran = Cell::new(false);
        let outcome = fail::<&str, i32>("stop")
            .and_then(|_| {
                from_fn(|| {
                    ran.set(true);
                    Outcome::success(0)
                })
            })
            .force();
        assert_eq!(outcome, Outcome::failure("stop"));
        assert!(!ran.get());
    }

    #[test]
    fn map_success_and_map_failure_target_their_channels() {
        let mapped = succeed::<String, _>(21).map_success(|x| x * 2).force();
        assert_eq!(mapped, Outcome::success(42));

        let remapped = fail::<_, i32>("e").map_failure(|e: &str| e.len()).force();
        assert_eq!(remapped, Outcome::failure(1));
    }

    #[test]
    fn fold_runs_exactly_one_effectful_branch() {
        let failure_ran = Cell::new(false);
        let value = succeed::<&str, _>(5)
            .fold(
                |_| {
                    from_fn(|| {
                        failure_ran.set(true);
                        0
                    })
                },
                |a| pure(a * 2),
            )
            .force();
        assert_eq!(value, 10);
        assert!(!failure_ran.get());
    }

    #[test]
    fn get_or_else_runs_the_fallback_effect() {
        let value = fail::<&str, i32>("gone").get_or_else(|e| pure(e.len() as i32)).force();
        assert_eq!(value, 4);
    }

    #[test]
    fn or_else_replaces_and_can_retype_the_failure() {
        let outcome: Outcome<usize, i32> = fail::<&str, i32>("abc")
            .or_else(|e| fail::<usize, i32>(e.len()))
            .force();
        assert_eq!(outcome, Outcome::failure(3));
    }

    #[test]
    fn or_else_leaves_success_untouched() {
        let outcome: Outcome<usize, i32> =
            succeed::<&str, _>(9).or_else(|e| fail::<usize, i32>(e.len())).force();
        assert_eq!(outcome, Outcome::success(9));
    }

    #[test]
    fn alt_is_lazy() {
        let constructed = Cell::new(false);
        let outcome = succeed::<&str, _>(1)
            .alt(|| {
                constructed.set(true);
                succeed(2)
            })
            .force();
        assert_eq!(outcome, Outcome::success(1));
        assert!(!constructed.get());
    }

    #[test]
    fn lift_then_and_then_composes_with_plain_thunks() {
        let outcome = pure(20)
            .lift::<&str>()
            .and_then(|x| succeed(x + 2))
            .force();
        assert_eq!(outcome, Outcome::success(22));
    }

    #[test]
    fn swap_exchanges_channels() {
        assert_eq!(succeed::<&str, _>(1).swap().force(), Outcome::failure(1));
        assert_eq!(fail::<&str, i32>("e").swap().force(), Outcome::success("e"));
    }
}
