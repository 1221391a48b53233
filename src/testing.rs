//! Test utilities: mock environment builder and outcome assertions.
//!
//! ```rust
//! use millrace::testing::MockEnv;
//! use millrace::{assert_success, Outcome};
//!
//! struct Database {
//!     rows: Vec<String>,
//! }
//!
//! let env = MockEnv::new()
//!     .with(|| Database { rows: vec!["row".to_string()] })
//!     .build();
//! let (_, db) = env;
//! assert_eq!(db.rows.len(), 1);
//!
//! assert_success!(Outcome::<String, _>::success(42));
//! ```

/// Builder for test environments.
///
/// Each [`with`](MockEnv::with) call nests another component into a tuple
/// structure, so arbitrary dependency sets can be assembled without
/// defining a struct per test.
///
/// ```rust
/// use millrace::testing::MockEnv;
///
/// struct Config { debug: bool }
/// struct Database { url: String }
///
/// let env = MockEnv::new()
///     .with(|| Config { debug: true })
///     .with(|| Database { url: "test://localhost".to_string() })
///     .build();
///
/// // env is (((), Config), Database)
/// let ((_, config), db) = env;
/// assert!(config.debug);
/// assert_eq!(db.url, "test://localhost");
/// ```
#[derive(Debug)]
pub struct MockEnv<Env> {
    env: Env,
}

impl MockEnv<()> {
    /// Start with an empty environment.
    pub fn new() -> Self {
        Self { env: () }
    }
}

impl Default for MockEnv<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Env> MockEnv<Env> {
    /// Nest another component, built by `f`.
    pub fn with<F, T>(self, f: F) -> MockEnv<(Env, T)>
    where
        F: FnOnce() -> T,
    {
        MockEnv {
            env: (self.env, f()),
        }
    }

    /// Consume the builder and return the assembled environment.
    pub fn build(self) -> Env {
        self.env
    }
}

/// Assert that an [`Outcome`](crate::Outcome) is a `Success`, evaluating
/// to the payload.
///
/// ```rust
/// use millrace::{assert_success, Outcome};
///
/// let value = assert_success!(Outcome::<String, _>::success(42));
/// assert_eq!(value, 42);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Success(value) => value,
            $crate::Outcome::Failure(error) => {
                panic!("expected Success, got Failure: {:?}", error);
            }
        }
    };
}

/// Assert that an [`Outcome`](crate::Outcome) is a `Failure`, evaluating
/// to the error.
///
/// ```rust
/// use millrace::{assert_failure, Outcome};
///
/// let error = assert_failure!(Outcome::<_, i32>::failure("bad input"));
/// assert_eq!(error, "bad input");
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Failure(error) => error,
            $crate::Outcome::Success(value) => {
                panic!("expected Failure, got Success: {:?}", value);
            }
        }
    };
}
