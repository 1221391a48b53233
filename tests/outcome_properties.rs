//! Property-based tests for the settled result type.

use proptest::prelude::*;

use millrace::Outcome;

fn arb_outcome() -> impl Strategy<Value = Outcome<String, i32>> {
    prop_oneof![
        any::<i32>().prop_map(Outcome::success),
        ".*".prop_map(Outcome::failure),
    ]
}

proptest! {
    #[test]
    fn prop_map_identity(outcome in arb_outcome()) {
        prop_assert_eq!(outcome.clone().map(|x| x), outcome);
    }

    #[test]
    fn prop_map_composes(outcome in arb_outcome(), a in -1000i32..1000, b in -1000i32..1000) {
        let f = move |x: i32| x.wrapping_add(a);
        let g = move |x: i32| x.wrapping_mul(b);
        prop_assert_eq!(
            outcome.clone().map(f).map(g),
            outcome.map(move |x| g(f(x)))
        );
    }

    #[test]
    fn prop_and_then_is_associative(outcome in arb_outcome()) {
        let f = |x: i32| if x % 2 == 0 {
            Outcome::<String, i32>::success(x / 2)
        } else {
            Outcome::failure("odd".to_string())
        };
        let g = |x: i32| Outcome::<String, i32>::success(x.wrapping_mul(3));

        prop_assert_eq!(
            outcome.clone().and_then(f).and_then(g),
            outcome.and_then(|x| f(x).and_then(g))
        );
    }

    #[test]
    fn prop_success_is_left_identity_for_and_then(x in any::<i32>()) {
        let f = |v: i32| Outcome::<String, i32>::success(v.wrapping_add(1));
        prop_assert_eq!(Outcome::<String, i32>::success(x).and_then(f), f(x));
    }

    #[test]
    fn prop_and_then_success_is_right_identity(outcome in arb_outcome()) {
        prop_assert_eq!(outcome.clone().and_then(Outcome::success), outcome);
    }

    #[test]
    fn prop_swap_is_an_involution(outcome in arb_outcome()) {
        prop_assert_eq!(outcome.clone().swap().swap(), outcome);
    }

    #[test]
    fn prop_bimap_touches_exactly_one_channel(outcome in arb_outcome()) {
        let mapped = outcome.clone().bimap(|e| e.len(), |a| a.wrapping_mul(2));
        match (outcome, mapped) {
            (Outcome::Success(a), Outcome::Success(b)) => prop_assert_eq!(b, a.wrapping_mul(2)),
            (Outcome::Failure(e), Outcome::Failure(n)) => prop_assert_eq!(n, e.len()),
            _ => prop_assert!(false, "bimap changed the channel"),
        }
    }

    #[test]
    fn prop_alt_keeps_successes(x in any::<i32>()) {
        let outcome = Outcome::<String, i32>::success(x)
            .alt(|| Outcome::success(x.wrapping_add(1)));
        prop_assert_eq!(outcome, Outcome::success(x));
    }

    #[test]
    fn prop_result_conversion_preserves_the_channel(outcome in arb_outcome()) {
        let through: Outcome<String, i32> = Outcome::from_result(outcome.clone().into_result());
        prop_assert_eq!(through, outcome);
    }

    #[test]
    fn prop_get_or_else_never_loses_successes(x in any::<i32>()) {
        prop_assert_eq!(Outcome::<String, i32>::success(x).get_or_else(|_| 0), x);
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::*;

    #[test]
    fn outcome_round_trips_through_json() {
        let outcome = Outcome::<String, i32>::success(42);
        let json = serde_json::to_string(&outcome).unwrap();
        let back: Outcome<String, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
