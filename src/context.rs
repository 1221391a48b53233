//! Error wrapper that accumulates a trail of context messages.
//!
//! [`ContextError`] keeps the original failure intact and records what
//! was being attempted at each layer it passed through, inner to outer.
//! The effect layer attaches entries via
//! [`EffectContext::context`](crate::effect::EffectContext) and
//! [`EffectContextChain::context_chain`](crate::effect::EffectContextChain).
//!
//! ```
//! use millrace::ContextError;
//!
//! let err = ContextError::new("file not found")
//!     .context("reading config file")
//!     .context("starting server");
//!
//! assert_eq!(err.inner(), &"file not found");
//! assert_eq!(err.context_trail(), &["reading config file", "starting server"]);
//! ```

use std::error::Error as StdError;
use std::fmt;

/// A failure plus the trail of operations that were in progress when it
/// occurred.
///
/// Display renders the original failure first, then one indented line per
/// trail entry:
///
/// ```text
/// Error: connection refused
///   -> connecting to database
///   -> loading user profile
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextError<E> {
    error: E,
    trail: Vec<String>,
}

impl<E> ContextError<E> {
    /// Wrap a failure with an empty trail.
    pub fn new(error: E) -> Self {
        ContextError {
            error,
            trail: Vec::new(),
        }
    }

    /// Append a trail entry. Entries accumulate inner to outer.
    pub fn context(mut self, msg: impl Into<String>) -> Self {
        self.trail.push(msg.into());
        self
    }

    /// The wrapped failure.
    pub fn inner(&self) -> &E {
        &self.error
    }

    /// Unwrap, discarding the trail.
    pub fn into_inner(self) -> E {
        self.error
    }

    /// All trail entries, in the order they were added.
    pub fn context_trail(&self) -> &[String] {
        &self.trail
    }
}

impl<E: fmt::Display> fmt::Display for ContextError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;
        for entry in &self.trail {
            write!(f, "\n  -> {entry}")?;
        }
        Ok(())
    }
}

impl<E: StdError + 'static> StdError for ContextError<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_with_an_empty_trail() {
        let err = ContextError::new("base");
        assert_eq!(err.inner(), &"base");
        assert!(err.context_trail().is_empty());
    }

    #[test]
    fn trail_entries_accumulate_in_order() {
        let err = ContextError::new("base")
            .context("first")
            .context(String::from("second"));
        assert_eq!(err.context_trail(), &["first", "second"]);
    }

    #[test]
    fn display_indents_the_trail() {
        let err = ContextError::new("file not found")
            .context("reading config")
            .context("starting up");
        let rendered = format!("{err}");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Error: file not found");
        assert_eq!(lines[1], "  -> reading config");
        assert_eq!(lines[2], "  -> starting up");
    }

    #[test]
    fn into_inner_discards_the_trail() {
        let err = ContextError::new(7).context("adding");
        assert_eq!(err.into_inner(), 7);
    }

    #[test]
    fn source_points_at_the_wrapped_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ContextError::new(io).context("reading config");
        assert!(StdError::source(&err).is_some());
    }
}
