//! Environment-aware deferred effects.
//!
//! An [`Effect`] is the full stack: a description of a computation that
//! reads an environment, runs asynchronously, and settles with an
//! [`Outcome`](crate::Outcome). It is the deferred fallible vocabulary
//! plus the reader operations [`ask`](reader::ask),
//! [`asks`](reader::asks) and [`local`](EffectExt::local).
//!
//! Combinators return concrete types, following the `Future` and
//! `Iterator` pattern; reach for [`boxed`](EffectExt::boxed) only when
//! type erasure is needed (collections, match arms, recursion).
//!
//! # Environment cloning
//!
//! `Env` requires `Clone` so that boxing can move an owned copy into a
//! `'static` future. Keep environments cheap to clone by wrapping shared
//! resources in `Arc`:
//!
//! ```rust,ignore
//! #[derive(Clone)]
//! struct AppEnv {
//!     db: Arc<DatabasePool>,
//!     http: Arc<HttpClient>,
//! }
//! ```
//!
//! ```rust
//! use millrace::effect::{self, Effect, EffectExt};
//! use millrace::Outcome;
//!
//! #[derive(Clone)]
//! struct Env { base: i32 }
//!
//! # futures::executor::block_on(async {
//! let effect = effect::asks::<_, String, Env, _>(|env: &Env| env.base)
//!     .and_then(|base| effect::pure(base * 2));
//! assert_eq!(effect.run(&Env { base: 21 }).await, Outcome::success(42));
//! # });
//! ```

use std::future::Future;

use crate::outcome::Outcome;

pub mod boxed;
pub mod combinators;
pub mod constructors;
pub mod context;
pub mod ext;
pub mod reader;

#[cfg(feature = "tracing")]
pub mod tracing;

pub use boxed::BoxedEffect;
pub use combinators::{Alt, AndThen, BiMap, Map, MapFailure, OrElse};
pub use constructors::{
    fail, from_async, from_fn, from_outcome, from_task, pure, Fail, FromAsync, FromFn, FromOutcome,
    FromTask, Pure,
};
pub use context::{EffectContext, EffectContextChain};
pub use ext::EffectExt;
pub use reader::{ask, asks, local, Ask, Asks, Local};

#[cfg(feature = "tracing")]
pub use tracing::{EffectTracingExt, Instrument};

/// A computation that reads an environment, runs asynchronously, and
/// settles with an [`Outcome`].
///
/// # Type parameters
///
/// * `Output` - the success payload
/// * `Error` - the failure payload
/// * `Env` - the environment the computation reads; `Clone` so that
///   boxing can take an owned copy
pub trait Effect: Sized + Send {
    /// The success payload.
    type Output: Send;

    /// The failure payload.
    type Error: Send;

    /// The environment required to run this effect.
    type Env: Clone + Send + Sync;

    /// Start the deferred computation against `env`.
    fn run(
        self,
        env: &Self::Env,
    ) -> impl Future<Output = Outcome<Self::Error, Self::Output>> + Send;
}
