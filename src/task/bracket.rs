//! Bracket pattern for deferred effects: paired acquire/release
//! discipline.

use std::panic::{resume_unwind, AssertUnwindSafe};

use futures::FutureExt;

use crate::outcome::{ExitCase, Outcome};
use crate::task::Task;

/// Bracket combinator for the deferred stack. Built by [`bracket`].
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

impl<Acquire, Use, Release, UseT, RelT, R, E, A> Task for Bracket<Acquire, Use, Release>
where
    Acquire: Task<Output = Outcome<E, R>>,
    Use: FnOnce(R) -> UseT + Send,
    UseT: Task<Output = Outcome<E, A>>,
    Release: for<'a> FnOnce(R, ExitCase<'a, E, A>) -> RelT + Send,
    RelT: Task<Output = Outcome<E, ()>>,
    R: Clone + Send,
    E: Send,
    A: Send,
{
    type Output = Outcome<E, A>;

    async fn run(self) -> Outcome<E, A> {
        let resource = match self.acquire.run().await {
            Outcome::Success(resource) => resource,
            // Nothing was acquired, so there is nothing to release.
            Outcome::Failure(error) => return Outcome::Failure(error),
        };

        let use_fn = self.use_fn;
        let use_resource = resource.clone();
        let captured = AssertUnwindSafe(async move { use_fn(use_resource).run().await })
            .catch_unwind()
            .await;

        match captured {
            Ok(outcome) => {
                let release_outcome = {
                    let exit = match &outcome {
                        Outcome::Success(value) => ExitCase::Succeeded(value),
                        Outcome::Failure(error) => ExitCase::Failed(error),
                    };
                    (self.release)(resource, exit).run().await
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
                let _ = (self.release)(resource, ExitCase::Panicked).run().await;
                resume_unwind(payload)
            }
        }
    }
}

/// Acquire a resource, use it, and release it exactly once on every exit
/// path, all asynchronously.
///
/// Precedence matches the lazy stack's [`bracket`](crate::thunk::bracket):
/// an acquire failure skips `release`, a use failure wins over a release
/// failure, a release failure surfaces only when the use phase succeeded,
/// and a use-phase panic runs `release` with [`ExitCase::Panicked`] before
/// resuming.
pub fn bracket<Acquire, Use, Release, UseT, RelT, R, E, A>(
    acquire: Acquire,
    use_fn: Use,
    release: Release,
) -> Bracket<Acquire, Use, Release>
where
    Acquire: Task<Output = Outcome<E, R>>,
    Use: FnOnce(R) -> UseT + Send,
    UseT: Task<Output = Outcome<E, A>>,
    Release: for<'a> FnOnce(R, ExitCase<'a, E, A>) -> RelT + Send,
    RelT: Task<Output = Outcome<E, ()>>,
    R: Clone + Send,
    E: Send,
    A: Send,
{
    Bracket {
        acquire,
        use_fn,
        release,
    }
}
