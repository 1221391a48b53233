//! Span instrumentation around effects, checked through a captured
//! subscriber.

use millrace::effect::{self, Effect, EffectExt, EffectTracingExt};
use millrace::Outcome;
use tracing_test::traced_test;

#[derive(Clone)]
struct Env {
    tenant: String,
}

#[traced_test]
#[tokio::test]
async fn events_inside_an_instrumented_effect_carry_its_span() {
    let effect = effect::from_fn(|env: &Env| {
        tracing::info!(tenant = %env.tenant, "loading tenant settings");
        Outcome::<String, _>::success(env.tenant.len())
    })
    .instrument(tracing::info_span!("load_settings"));

    let env = Env {
        tenant: "acme".to_string(),
    };
    assert_eq!(effect.run(&env).await, Outcome::success(4));
    assert!(logs_contain("loading tenant settings"));
    assert!(logs_contain("load_settings"));
}

#[traced_test]
#[tokio::test]
async fn failures_are_observable_and_still_propagate() {
    let effect = effect::from_fn(|_env: &Env| {
        tracing::warn!("tenant lookup failed");
        Outcome::<String, usize>::failure("not found".to_string())
    })
    .instrument(tracing::info_span!("lookup"))
    .or_else(|e| effect::pure::<usize, String, Env>(e.len()));

    let env = Env {
        tenant: "acme".to_string(),
    };
    assert_eq!(effect.run(&env).await, Outcome::success(9));
    assert!(logs_contain("tenant lookup failed"));
}

#[traced_test]
#[tokio::test]
async fn nested_spans_compose_across_and_then() {
    let effect = effect::pure::<_, String, Env>(1)
        .instrument(tracing::info_span!("step_one"))
        .and_then(|x| {
            effect::from_fn(move |_env: &Env| {
                tracing::info!("second step running");
                Outcome::success(x + 1)
            })
            .instrument(tracing::info_span!("step_two"))
        });

    let env = Env {
        tenant: "acme".to_string(),
    };
    assert_eq!(effect.run(&env).await, Outcome::success(2));
    assert!(logs_contain("second step running"));
}
