//! # Millrace
//!
//! > *A millrace is the channel that carries water to the wheel.*
//!
//! A Rust library for composing effects as values: describe a
//! computation, combine it with others, then run the finished
//! description once.
//!
//! The vocabulary is layered, each layer adding one capability:
//!
//! - [`Outcome`] - a settled result with explicit `Failure` and
//!   `Success` channels
//! - [`thunk`] - lazy synchronous effects, forced on demand
//! - [`task`] - deferred asynchronous effects, run on demand
//! - [`effect`] - environment-aware deferred effects, the full stack
//!
//! Combinators return concrete types (the `Iterator`/`Future` pattern),
//! so composition is allocation-free until `.boxed()` is requested.
//!
//! ## Quick example
//!
//! ```rust
//! use millrace::effect::{self, Effect, EffectExt};
//! use millrace::Outcome;
//!
//! #[derive(Clone)]
//! struct Env {
//!     base_url: String,
//! }
//!
//! # futures::executor::block_on(async {
//! let effect = effect::asks::<_, String, Env, _>(|env: &Env| env.base_url.clone())
//!     .and_then(|url| effect::pure(format!("{url}/health")));
//!
//! let env = Env { base_url: "http://localhost".to_string() };
//! assert_eq!(
//!     effect.run(&env).await,
//!     Outcome::success("http://localhost/health".to_string()),
//! );
//! # });
//! ```
//!
//! ## Feature flags
//!
//! - `async` - timing combinators backed by `tokio` (`TaskExt::delay`)
//! - `tracing` - span instrumentation for effects
//!   (`EffectTracingExt::instrument`)
//! - `serde` - `Serialize`/`Deserialize` for [`Outcome`] and
//!   [`NonEmptyVec`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod context;
pub mod effect;
pub mod nonempty;
pub mod outcome;
pub mod task;
pub mod testing;
pub mod thunk;

// Re-exports
pub use context::ContextError;
pub use effect::{Effect, EffectContext, EffectContextChain, EffectExt};
pub use nonempty::NonEmptyVec;
pub use outcome::{ExitCase, Outcome};
pub use task::{FallibleTaskExt, Task, TaskExt};
pub use thunk::{FallibleThunkExt, Thunk, ThunkExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::ContextError;
    pub use crate::effect::{Effect, EffectContext, EffectContextChain, EffectExt};
    pub use crate::nonempty::NonEmptyVec;
    pub use crate::outcome::{ExitCase, Outcome};
    pub use crate::task::{FallibleTaskExt, Task, TaskExt};
    pub use crate::thunk::{FallibleThunkExt, Thunk, ThunkExt};

    #[cfg(feature = "tracing")]
    pub use crate::effect::EffectTracingExt;
}
