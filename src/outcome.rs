//! The uniform outcome type threaded through every effect wrapper.
//!
//! # Outcome vs Result
//!
//! `Outcome<E, A>` is the crate's domain-failure channel: `Failure(E)` for
//! expected, representable failures and `Success(A)` for the happy path.
//! It exists as its own type (rather than reusing `std::result::Result`)
//! because the effect layers treat it as data that flows *through* an
//! effect's value channel - a lazy or deferred effect produces an
//! `Outcome`, and the failure-aware combinators branch on it without the
//! `?`-operator's early-return semantics.
//!
//! Conversions to and from `Result` are provided at the boundary, so code
//! that lives outside the effect vocabulary can keep using `?`.
//!
//! # Fail-fast chaining
//!
//! `and_then` is the central sequencing rule used everywhere in the crate:
//! once a `Failure` appears, no subsequent step runs.
//!
//! ```rust
//! use millrace::Outcome;
//!
//! let five = Outcome::<String, i32>::success(2).and_then(|x| Outcome::success(x + 3));
//! assert_eq!(five, Outcome::success(5));
//!
//! let err = Outcome::<String, i32>::failure("err".to_string())
//!     .and_then(|x| Outcome::success(x + 3));
//! assert_eq!(err, Outcome::failure("err".to_string()));
//! ```

/// A two-variant container representing success or failure.
///
/// Exactly one variant is populated; values are immutable after
/// construction and equality is structural by variant tag and payload.
///
/// The failure type parameter comes first, matching the order in which the
/// effect stacks name their channels (`Outcome<Error, Output>`).
///
/// # Example
///
/// ```rust
/// use millrace::Outcome;
///
/// fn parse_port(raw: &str) -> Outcome<String, u16> {
///     Outcome::from_result(raw.parse::<u16>().map_err(|e| e.to_string()))
/// }
///
/// assert_eq!(parse_port("8080"), Outcome::success(8080));
/// assert!(parse_port("not-a-port").is_failure());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome<E, A> {
    /// The expected-failure variant.
    Failure(E),
    /// The success variant.
    Success(A),
}

impl<E, A> Outcome<E, A> {
    // ========== Constructors ==========

    /// Create a success.
    #[inline]
    pub fn success(value: A) -> Self {
        Outcome::Success(value)
    }

    /// Create a failure.
    #[inline]
    pub fn failure(error: E) -> Self {
        Outcome::Failure(error)
    }

    /// Classify a value with a predicate: `Success` when the predicate
    /// holds, otherwise the value is handed to `on_false` to build the
    /// failure payload.
    ///
    /// ```rust
    /// use millrace::Outcome;
    ///
    /// let even = Outcome::from_predicate(4, |n| n % 2 == 0, |n| format!("{n} is odd"));
    /// assert_eq!(even, Outcome::success(4));
    ///
    /// let odd = Outcome::from_predicate(3, |n| n % 2 == 0, |n| format!("{n} is odd"));
    /// assert_eq!(odd, Outcome::failure("3 is odd".to_string()));
    /// ```
    pub fn from_predicate<P, F>(value: A, predicate: P, on_false: F) -> Self
    where
        P: FnOnce(&A) -> bool,
        F: FnOnce(A) -> E,
    {
        if predicate(&value) {
            Outcome::Success(value)
        } else {
            Outcome::Failure(on_false(value))
        }
    }

    /// Lift an `Option`, building the failure payload when it is `None`.
    pub fn from_option<F>(option: Option<A>, on_none: F) -> Self
    where
        F: FnOnce() -> E,
    {
        match option {
            Some(value) => Outcome::Success(value),
            None => Outcome::Failure(on_none()),
        }
    }

    /// Lift a `Result`, reading `Err` as `Failure`.
    #[inline]
    pub fn from_result(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }

    // ========== Inspectors ==========

    /// `true` for the `Success` variant.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// `true` for the `Failure` variant.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Borrow both channels.
    pub fn as_ref(&self) -> Outcome<&E, &A> {
        match self {
            Outcome::Failure(error) => Outcome::Failure(error),
            Outcome::Success(value) => Outcome::Success(value),
        }
    }

    /// The success payload, discarding a failure.
    pub fn into_success(self) -> Option<A> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The failure payload, discarding a success.
    pub fn into_failure(self) -> Option<E> {
        match self {
            Outcome::Failure(error) => Some(error),
            Outcome::Success(_) => None,
        }
    }

    // ========== Transforms ==========

    /// Apply `f` to the success payload; a failure passes through
    /// unchanged and `f` is never called.
    pub fn map<B, F>(self, f: F) -> Outcome<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Dual of [`map`](Outcome::map): apply `f` only to the failure payload.
    pub fn map_failure<E2, F>(self, f: F) -> Outcome<E2, A>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Transform both channels at once. Exactly one of the two functions
    /// runs.
    pub fn bimap<E2, B, F, G>(self, on_failure: F, on_success: G) -> Outcome<E2, B>
    where
        F: FnOnce(E) -> E2,
        G: FnOnce(A) -> B,
    {
        match self {
            Outcome::Failure(error) => Outcome::Failure(on_failure(error)),
            Outcome::Success(value) => Outcome::Success(on_success(value)),
        }
    }

    /// Fail-fast sequencing: on success, run `f` on the payload; on
    /// failure, short-circuit and return the original failure unchanged.
    pub fn and_then<B, F>(self, f: F) -> Outcome<E, B>
    where
        F: FnOnce(A) -> Outcome<E, B>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Eliminator: exactly one branch runs.
    pub fn fold<B, F, G>(self, on_failure: F, on_success: G) -> B
    where
        F: FnOnce(E) -> B,
        G: FnOnce(A) -> B,
    {
        match self {
            Outcome::Failure(error) => on_failure(error),
            Outcome::Success(value) => on_success(value),
        }
    }

    /// The success payload, or a fallback built from the failure.
    pub fn get_or_else<F>(self, on_failure: F) -> A
    where
        F: FnOnce(E) -> A,
    {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => on_failure(error),
        }
    }

    /// On failure, build a replacement outcome (possibly with a new
    /// failure type); a success passes through untouched.
    pub fn or_else<E2, F>(self, f: F) -> Outcome<E2, A>
    where
        F: FnOnce(E) -> Outcome<E2, A>,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => f(error),
        }
    }

    /// On failure, evaluate and return the alternative. The alternative is
    /// lazily constructed - `f` is never invoked on success.
    ///
    /// ```rust
    /// use millrace::Outcome;
    ///
    /// let kept = Outcome::<&str, i32>::success(1).alt(|| unreachable!());
    /// assert_eq!(kept, Outcome::success(1));
    /// ```
    pub fn alt<F>(self, f: F) -> Outcome<E, A>
    where
        F: FnOnce() -> Outcome<E, A>,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(_) => f(),
        }
    }

    /// Exchange the roles of the failure and success payloads.
    pub fn swap(self) -> Outcome<A, E> {
        match self {
            Outcome::Failure(error) => Outcome::Success(error),
            Outcome::Success(value) => Outcome::Failure(value),
        }
    }

    /// Convert into a `Result` for `?`-style code at the boundary.
    #[inline]
    pub fn into_result(self) -> Result<A, E> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}

impl<E, A> From<Result<A, E>> for Outcome<E, A> {
    fn from(result: Result<A, E>) -> Self {
        Outcome::from_result(result)
    }
}

impl<E, A> From<Outcome<E, A>> for Result<A, E> {
    fn from(outcome: Outcome<E, A>) -> Self {
        outcome.into_result()
    }
}

/// How a bracketed use phase ended, as observed by the release action.
///
/// This is the borrowed view of the captured outcome that `bracket` hands
/// to `release`: the success payload, the failure payload, or the fact
/// that the use phase panicked (a defect, which `bracket` resumes after
/// release has run).
#[derive(Debug, Clone, Copy)]
pub enum ExitCase<'a, E, A> {
    /// The use phase produced `Success`.
    Succeeded(&'a A),
    /// The use phase produced `Failure`.
    Failed(&'a E),
    /// The use phase panicked.
    Panicked,
}

impl<E, A> ExitCase<'_, E, A> {
    /// `true` when the use phase succeeded.
    pub fn is_succeeded(&self) -> bool {
        matches!(self, ExitCase::Succeeded(_))
    }

    /// `true` when the use phase failed with a domain failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, ExitCase::Failed(_))
    }

    /// `true` when the use phase panicked.
    pub fn is_panicked(&self) -> bool {
        matches!(self, ExitCase::Panicked)
    }
}
