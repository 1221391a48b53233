//! Integration tests for environment-aware effects.

use std::collections::HashMap;
use std::sync::Arc;

use millrace::effect::{self, BoxedEffect, Effect, EffectContext, EffectContextChain, EffectExt};
use millrace::testing::MockEnv;
use millrace::Outcome;

#[derive(Clone)]
struct AppEnv {
    users: Arc<HashMap<u32, String>>,
    greeting: String,
}

fn test_env() -> AppEnv {
    let mut users = HashMap::new();
    users.insert(1, "ada".to_string());
    users.insert(2, "grace".to_string());
    AppEnv {
        users: Arc::new(users),
        greeting: "hello".to_string(),
    }
}

fn lookup_user(id: u32) -> impl Effect<Output = String, Error = String, Env = AppEnv> {
    effect::asks::<_, String, AppEnv, _>(move |env: &AppEnv| env.users.get(&id).cloned())
        .and_then(move |found| {
            effect::from_outcome(Outcome::from_option(found, || format!("no user {id}")))
        })
}

#[tokio::test]
async fn effects_read_dependencies_from_the_environment() {
    let effect = lookup_user(1).and_then(|name| {
        effect::asks::<_, String, AppEnv, _>(move |env: &AppEnv| {
            format!("{}, {}", env.greeting, name)
        })
    });

    assert_eq!(
        effect.run(&test_env()).await,
        Outcome::success("hello, ada".to_string())
    );
}

#[tokio::test]
async fn missing_dependencies_fail_with_the_domain_error() {
    assert_eq!(
        lookup_user(99).run(&test_env()).await,
        Outcome::failure("no user 99".to_string())
    );
}

#[tokio::test]
async fn local_narrows_the_environment_for_a_subtree() {
    // The inner effect only knows about a user table; local derives it
    // from the richer application environment.
    let inner = effect::asks::<_, String, Arc<HashMap<u32, String>>, _>(
        |users: &Arc<HashMap<u32, String>>| users.len(),
    );
    let effect = inner.local(|env: &AppEnv| env.users.clone());

    assert_eq!(effect.run(&test_env()).await, Outcome::success(2));
}

#[tokio::test]
async fn context_builds_a_trail_as_failures_propagate() {
    let effect = lookup_user(42)
        .context("resolving author")
        .context_chain("rendering article page");

    match effect.run(&test_env()).await {
        Outcome::Failure(err) => {
            assert_eq!(err.inner(), &"no user 42".to_string());
            assert_eq!(
                err.context_trail(),
                &["resolving author", "rendering article page"]
            );
        }
        Outcome::Success(_) => panic!("expected failure"),
    }
}

fn retry_lookup(id: u32, attempts: u32) -> BoxedEffect<String, String, AppEnv> {
    if attempts == 0 {
        effect::fail(format!("gave up on user {id}")).boxed()
    } else {
        lookup_user(id)
            .or_else(move |_| retry_lookup(id, attempts - 1))
            .boxed()
    }
}

#[tokio::test]
async fn boxing_enables_recursive_effects() {
    assert_eq!(
        retry_lookup(2, 3).run(&test_env()).await,
        Outcome::success("grace".to_string())
    );
    assert_eq!(
        retry_lookup(7, 3).run(&test_env()).await,
        Outcome::failure("gave up on user 7".to_string())
    );
}

#[tokio::test]
async fn chaining_into_pure_changes_nothing() {
    let kept = effect::pure::<_, String, ()>(7)
        .and_then(effect::pure)
        .run(&())
        .await;
    assert_eq!(kept, Outcome::success(7));
}

#[tokio::test]
async fn mock_env_assembles_tuple_environments() {
    #[derive(Clone)]
    struct Clock {
        now: u64,
    }

    let env = MockEnv::new().with(|| Clock { now: 1700000000 }).build();
    let effect =
        effect::asks::<_, String, ((), Clock), _>(|(_, clock): &((), Clock)| clock.now);

    assert_eq!(effect.run(&env).await, Outcome::success(1700000000));
}

#[tokio::test]
async fn ask_under_local_reads_the_derived_environment() {
    #[derive(Clone)]
    struct Wrapper {
        inner: i32,
    }

    let effect = effect::ask::<String, i32>().local(|w: &Wrapper| w.inner);
    assert_eq!(
        effect.run(&Wrapper { inner: 42 }).await,
        Outcome::success(42)
    );
}

#[tokio::test]
async fn ask_surrenders_the_whole_environment() {
    #[derive(Clone, Debug, PartialEq)]
    struct Small {
        id: u8,
    }

    let outcome = effect::ask::<String, Small>().run(&Small { id: 3 }).await;
    assert_eq!(outcome, Outcome::success(Small { id: 3 }));
}
