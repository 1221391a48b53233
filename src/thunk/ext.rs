//! Base-layer combinators for lazy effects.

use std::marker::PhantomData;

use crate::outcome::Outcome;
use crate::thunk::Thunk;

/// Map combinator: transform the produced value.
pub struct Map<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for Map<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map").finish()
    }
}

impl<Inner, F, B> Thunk for Map<Inner, F>
where
    Inner: Thunk,
    F: FnOnce(Inner::Output) -> B,
{
    type Output = B;

    fn force(self) -> B {
        (self.f)(self.inner.force())
    }
}

/// Then combinator: sequence a dependent thunk.
///
/// Both steps run synchronously, in order, on every force.
pub struct Then<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for Then<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Then").finish()
    }
}

impl<Inner, F, Next> Thunk for Then<Inner, F>
where
    Inner: Thunk,
    F: FnOnce(Inner::Output) -> Next,
    Next: Thunk,
{
    type Output = Next::Output;

    fn force(self) -> Next::Output {
        (self.f)(self.inner.force()).force()
    }
}

/// Lift combinator: wrap an always-succeeding thunk's payload in
/// `Success`, bringing it into the failure-aware vocabulary.
pub struct Lift<Inner, E> {
    pub(crate) inner: Inner,
    pub(crate) _phantom: PhantomData<E>,
}

impl<Inner, E> std::fmt::Debug for Lift<Inner, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lift").finish()
    }
}

impl<Inner, E> Thunk for Lift<Inner, E>
where
    Inner: Thunk,
{
    type Output = Outcome<E, Inner::Output>;

    fn force(self) -> Outcome<E, Inner::Output> {
        Outcome::Success(self.inner.force())
    }
}

/// A type-erased thunk.
///
/// Use when storing heterogeneous thunks in a collection or returning
/// different compositions from match arms.
pub struct BoxedThunk<A> {
    run: Box<dyn FnOnce() -> A>,
}

impl<A> std::fmt::Debug for BoxedThunk<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedThunk").finish()
    }
}

impl<A> Thunk for BoxedThunk<A> {
    type Output = A;

    fn force(self) -> A {
        (self.run)()
    }
}

/// Extension trait providing the base combinator methods for all thunks.
///
/// Implemented for every [`Thunk`] automatically.
pub trait ThunkExt: Thunk {
    /// Transform the produced value.
    ///
    /// ```rust
    /// use millrace::thunk::{self, Thunk, ThunkExt};
    ///
    /// assert_eq!(thunk::pure(21).map(|x| x * 2).force(), 42);
    /// ```
    fn map<B, F>(self, f: F) -> Map<Self, F>
    where
        F: FnOnce(Self::Output) -> B,
    {
        Map { inner: self, f }
    }

    /// Sequence a dependent thunk: force this one, feed its value to `f`,
    /// force the thunk `f` returns.
    ///
    /// ```rust
    /// use millrace::thunk::{self, Thunk, ThunkExt};
    ///
    /// let composed = thunk::pure(10).then(|x| thunk::pure(x + 5));
    /// assert_eq!(composed.force(), 15);
    /// ```
    fn then<Next, F>(self, f: F) -> Then<Self, F>
    where
        F: FnOnce(Self::Output) -> Next,
        Next: Thunk,
    {
        Then { inner: self, f }
    }

    /// Enter the failure-aware vocabulary by wrapping this thunk's payload
    /// in `Success`. The failure type is chosen by the caller.
    fn lift<E>(self) -> Lift<Self, E> {
        Lift {
            inner: self,
            _phantom: PhantomData,
        }
    }

    /// Erase the concrete combinator type.
    fn boxed(self) -> BoxedThunk<Self::Output>
    where
        Self: 'static,
    {
        BoxedThunk {
            run: Box::new(move || self.force()),
        }
    }
}

impl<T: Thunk> ThunkExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thunk::{from_fn, pure};

    #[test]
    fn map_then_compose() {
        let value = pure(10).map(|x| x * 2).then(|x| pure(x + 1)).force();
        assert_eq!(value, 21);
    }

    #[test]
    fn then_runs_both_steps_in_order() {
        let order = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let first = order.clone();
        let second = order.clone();
        let thunk = from_fn(move || {
            first.borrow_mut().push("first");
            1
        })
        .then(move |x| {
            from_fn(move || {
                second.borrow_mut().push("second");
                x + 1
            })
        });
        assert_eq!(thunk.force(), 2);
        assert_eq!(*order.borrow(), ["first", "second"]);
    }

    #[test]
    fn lift_wraps_in_success() {
        let lifted = pure(3).lift::<String>().force();
        assert_eq!(lifted, Outcome::success(3));
    }

    #[test]
    fn boxed_thunks_share_a_type() {
        let thunks: Vec<BoxedThunk<i32>> =
            vec![pure(1).boxed(), pure(2).map(|x| x * 2).boxed()];
        let values: Vec<i32> = thunks.into_iter().map(Thunk::force).collect();
        assert_eq!(values, [1, 4]);
    }
}
