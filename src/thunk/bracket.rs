//! Bracket pattern for lazy effects: paired acquire/release discipline.

use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use crate::outcome::{ExitCase, Outcome};
use crate::thunk::Thunk;

/// Bracket combinator for the lazy stack. Built by [`bracket`].
pub struct Bracket<Acquire, Use, Release> {
    acquire: Acquire,
    use_fn: Use,
    release: Release,
}

impl<Acquire, Use, Release> std::fmt::Debug for Bracket<Acquire, Use, Release> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bracket").finish()
    }
}

impl<Acquire, Use, Release, UseT, RelT, R, E, A> Thunk for Bracket<Acquire, Use, Release>
where
    Acquire: Thunk<Output = Outcome<E, R>>,
    Use: FnOnce(R) -> UseT,
    UseT: Thunk<Output = Outcome<E, A>>,
    Release: for<'a> FnOnce(R, ExitCase<'a, E, A>) -> RelT,
    RelT: Thunk<Output = Outcome<E, ()>>,
    R: Clone,
{
    type Output = Outcome<E, A>;

    fn force(self) -> Outcome<E, A> {
        let resource = match self.acquire.force() {
            Outcome::Success(resource) => resource,
            // Nothing was acquired, so there is nothing to release.
            Outcome::Failure(error) => return Outcome::Failure(error),
        };

        let use_fn = self.use_fn;
        let use_resource = resource.clone();
        let captured = catch_unwind(AssertUnwindSafe(move || use_fn(use_resource).force()));

        match captured {
            Ok(outcome) => {
                let release_outcome = {
                    let exit = match &outcome {
                        Outcome::Success(value) => ExitCase::Succeeded(value),
                        Outcome::Failure(error) => ExitCase::Failed(error),
                    };
                    (self.release)(resource, exit).force()
                };
                match outcome {
                    // The use failure wins; a failing release is discarded.
                    Outcome::Failure(error) => Outcome::Failure(error),
                    Outcome::Success(value) => match release_outcome {
                        Outcome::Failure(release_error) => Outcome::Failure(release_error),
                        Outcome::Success(()) => Outcome::Success(value),
                    },
                }
            }
            Err(payload) => {
                // A panic in the use phase is a defect: release still runs,
                // then the panic is resumed. Its outcome cannot matter.
                let _ = (self.release)(resource, ExitCase::Panicked).force();
                resume_unwind(payload)
            }
        }
    }
}

/// Acquire a resource, use it, and release it exactly once on every exit
/// path.
///
/// `release` receives the resource and an [`ExitCase`] describing how the
/// use phase ended - success payload, failure payload, or panic.
///
/// Precedence when multiple things go wrong:
///
/// - `acquire` failed: that failure is returned and `release` never runs.
/// - `use` failed: the use failure is returned; a failure from `release`
///   is discarded.
/// - `use` succeeded but `release` failed: the release failure is
///   returned.
/// - `use` panicked: `release` runs, then the panic is resumed.
///
/// # Example
///
/// ```rust
/// use millrace::thunk::{self, bracket, Thunk};
/// use millrace::{ExitCase, Outcome};
/// use std::cell::Cell;
///
/// let releases = Cell::new(0u32);
/// let outcome = bracket(
///     thunk::succeed::<&str, _>(1),
///     |_handle| thunk::fail::<_, i32>("boom"),
///     |_handle, exit| {
///         assert!(exit.is_failed());
///         releases.set(releases.get() + 1);
///         thunk::succeed(())
///     },
/// )
/// .force();
///
/// assert_eq!(outcome, Outcome::failure("boom"));
/// assert_eq!(releases.get(), 1);
/// ```
pub fn bracket<Acquire, Use, Release, UseT, RelT, R, E, A>(
    acquire: Acquire,
    use_fn: Use,
    release: Release,
) -> Bracket<Acquire, Use, Release>
where
    Acquire: Thunk<Output = Outcome<E, R>>,
    Use: FnOnce(R) -> UseT,
    UseT: Thunk<Output = Outcome<E, A>>,
    Release: for<'a> FnOnce(R, ExitCase<'a, E, A>) -> RelT,
    RelT: Thunk<Output = Outcome<E, ()>>,
    R: Clone,
{
    Bracket {
        acquire,
        use_fn,
        release,
    }
}
