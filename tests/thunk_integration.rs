//! Integration tests for the lazy effect stack.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use millrace::thunk::{self, bracket, FallibleThunkExt, Thunk, ThunkExt};
use millrace::{assert_failure, assert_success, ExitCase, Outcome};

#[test]
fn nothing_runs_until_force() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let first = log.clone();
    let second = log.clone();
    let pipeline = thunk::from_fn(move || {
        first.borrow_mut().push("read");
        Outcome::<String, _>::success(2)
    })
    .and_then(move |x| {
        second.borrow_mut().push("derive");
        thunk::succeed(x * 21)
    });

    assert!(log.borrow().is_empty());
    let value = assert_success!(pipeline.force());
    assert_eq!(value, 42);
    assert_eq!(*log.borrow(), ["read", "derive"]);
}

#[test]
fn a_failed_step_stops_the_pipeline() {
    let later_ran = Cell::new(false);

    let pipeline = thunk::succeed::<String, _>(10)
        .and_then(|_| thunk::fail::<String, i32>("validation rejected".to_string()))
        .and_then(|x| {
            later_ran.set(true);
            thunk::succeed(x + 1)
        })
        .map_failure(|e| format!("pipeline: {e}"));

    let error = assert_failure!(pipeline.force());
    assert_eq!(error, "pipeline: validation rejected");
    assert!(!later_ran.get());
}

#[test]
fn try_catch_feeds_panics_into_the_failure_channel() {
    let recovered = thunk::try_catch(
        || -> i32 { panic!("division by zero") },
        |payload| thunk::panic_message(&*payload),
    )
    .or_else(|_| thunk::succeed::<String, i32>(0));

    assert_eq!(recovered.force(), Outcome::success(0));
}

#[test]
fn bracket_releases_a_resource_around_a_failing_use() {
    #[derive(Clone, Debug, PartialEq)]
    struct Handle(u32);

    let events = Rc::new(RefCell::new(Vec::new()));

    let acquire_events = events.clone();
    let release_events = events.clone();
    let outcome = bracket(
        thunk::from_fn(move || {
            acquire_events.borrow_mut().push("open".to_string());
            Outcome::<String, _>::success(Handle(1))
        }),
        |_handle| thunk::fail::<String, i32>("write failed".to_string()),
        move |handle, exit: ExitCase<'_, String, i32>| {
            assert_eq!(handle, Handle(1));
            release_events
                .borrow_mut()
                .push(format!("close (failed: {})", exit.is_failed()));
            thunk::succeed(())
        },
    )
    .force();

    assert_eq!(outcome, Outcome::failure("write failed".to_string()));
    assert_eq!(*events.borrow(), ["open", "close (failed: true)"]);
}

#[test]
fn chaining_into_succeed_changes_nothing() {
    let kept = thunk::succeed::<String, _>(7).and_then(thunk::succeed).force();
    assert_eq!(kept, Outcome::success(7));

    let failed = thunk::fail::<String, i32>("e".to_string())
        .and_then(thunk::succeed)
        .force();
    assert_eq!(failed, Outcome::failure("e".to_string()));
}

#[test]
fn fold_collapses_both_channels_into_a_base_thunk() {
    let describe = |outcome: millrace::thunk::Pure<Outcome<String, i32>>| {
        outcome.fold(
            |e| thunk::from_fn(move || format!("failed: {e}")),
            |a| thunk::from_fn(move || format!("got {a}")),
        )
    };

    assert_eq!(describe(thunk::succeed(7)).force(), "got 7");
    assert_eq!(
        describe(thunk::fail("oops".to_string())).force(),
        "failed: oops"
    );
}

#[test]
fn lift_joins_the_base_and_fallible_vocabularies() {
    let value = thunk::from_fn(|| 4)
        .map(|x| x + 1)
        .lift::<String>()
        .and_then(|x| thunk::succeed(x * 2))
        .get_or_else(|_| thunk::pure(0))
        .force();
    assert_eq!(value, 10);
}
