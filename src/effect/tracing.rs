//! Tracing spans around effects. Feature-gated behind `tracing`.

use crate::effect::Effect;
use crate::outcome::Outcome;

/// An effect wrapped in a tracing span. Built by
/// [`EffectTracingExt::instrument`].
#[derive(Debug)]
pub struct Instrument<Eff> {
    inner: Eff,
    span: tracing::Span,
}

impl<Eff> Effect for Instrument<Eff>
where
    Eff: Effect,
{
    type Output = Eff::Output;
    type Error = Eff::Error;
    type Env = Eff::Env;

    async fn run(self, env: &Self::Env) -> Outcome<Self::Error, Self::Output> {
        use tracing::Instrument as _;
        self.inner.run(env).instrument(self.span).await
    }
}

/// Add tracing instrumentation to any effect.
pub trait EffectTracingExt: Effect {
    /// Wrap this effect in a tracing span, entered for every poll of the
    /// underlying future.
    ///
    /// ```rust,ignore
    /// use tracing::debug_span;
    ///
    /// let effect = fetch_order(order_id.clone())
    ///     .instrument(debug_span!("fetch_order", order_id = %order_id));
    /// ```
    fn instrument(self, span: tracing::Span) -> Instrument<Self> {
        Instrument { inner: self, span }
    }
}

impl<Eff: Effect> EffectTracingExt for Eff {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{fail, pure, EffectExt};

    #[tokio::test]
    async fn instrumented_effect_settles_normally() {
        let effect = pure::<_, String, ()>(42).instrument(tracing::info_span!("op"));
        assert_eq!(effect.run(&()).await, Outcome::success(42));
    }

    #[tokio::test]
    async fn failures_pass_through_the_span() {
        let effect = fail::<_, i32, ()>("oops".to_string())
            .instrument(tracing::info_span!("failing"));
        assert_eq!(effect.run(&()).await, Outcome::failure("oops".to_string()));
    }

    #[tokio::test]
    async fn spans_nest_across_composition() {
        let effect = pure::<_, String, ()>(1)
            .instrument(tracing::debug_span!("inner"))
            .and_then(|x| pure(x + 1).instrument(tracing::debug_span!("outer")));
        assert_eq!(effect.run(&()).await, Outcome::success(2));
    }
}
