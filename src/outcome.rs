#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Helpers over `std::result::Result`.
//!
//! `Result` already is the closed two-state value every layer returns:
//! `map`, `map_err`, `and_then` and `or_else` cover the chaining needs.
//! The extension below adds the few operations that have no direct
//! counterpart in std.

/// Extra combinators over `Result<T, E>`.
pub trait OutcomeExt<T, E>: Sized {
    /// Collapse both states into one value. Both arms are mandatory.
    fn fold<U>(self, on_ok: impl FnOnce(T) -> U, on_err: impl FnOnce(E) -> U) -> U;

    /// Turn a failure into a success value, forwarding `Ok` untouched.
    fn rescue<F>(self, recover: impl FnOnce(E) -> T) -> Result<T, F>;

    /// Turn a success into a failure value, forwarding `Err` untouched.
    fn fail<U>(self, reject: impl FnOnce(T) -> E) -> Result<U, E>;

    /// Observe the success value and return the result unchanged.
    #[must_use]
    fn visit(self, observe: impl FnOnce(&T)) -> Self;
}

impl<T, E> OutcomeExt<T, E> for Result<T, E> {
    fn fold<U>(self, on_ok: impl FnOnce(T) -> U, on_err: impl FnOnce(E) -> U) -> U {
        match self {
            Ok(value) => on_ok(value),
            Err(error) => on_err(error),
        }
    }

    fn rescue<F>(self, recover: impl FnOnce(E) -> T) -> Result<T, F> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Ok(recover(error)),
        }
    }

    fn fail<U>(self, reject: impl FnOnce(T) -> E) -> Result<U, E> {
        match self {
            Ok(value) => Err(reject(value)),
            Err(error) => Err(error),
        }
    }

    fn visit(self, observe: impl FnOnce(&T)) -> Self {
        if let Ok(value) = &self {
            observe(value);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::OutcomeExt;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Boom {
        Small,
        Large(u32),
    }

    fn ok(value: i32) -> Result<i32, Boom> {
        Ok(value)
    }

    fn err(error: Boom) -> Result<i32, Boom> {
        Err(error)
    }

    #[test]
    fn map_touches_only_success() {
        assert_eq!(ok(1).map(|v| v + 1), Ok(2));
        assert_eq!(err(Boom::Small).map(|v| v + 1), Err(Boom::Small));
    }

    #[test]
    fn map_err_touches_only_failure() {
        let widen = |_: Boom| Boom::Large(7);
        assert_eq!(err(Boom::Small).map_err(widen), Err(Boom::Large(7)));
        assert_eq!(ok(3).map_err(widen), Ok(3));
    }

    #[test]
    fn and_then_short_circuits_without_calling_continuation() {
        let called = Cell::new(false);
        let result = err(Boom::Small).and_then(|v| {
            called.set(true);
            ok(v * 2)
        });

        assert_eq!(result, Err(Boom::Small));
        assert!(!called.get(), "continuation must not run after Err");
    }

    #[test]
    fn and_then_chains_dependent_step() {
        assert_eq!(ok(2).and_then(|v| ok(v * 10)), Ok(20));
        assert_eq!(ok(2).and_then(|_| err(Boom::Large(2))), Err(Boom::Large(2)));
    }

    #[test]
    fn fold_runs_exactly_one_arm() {
        let describe = |r: Result<i32, Boom>| r.fold(|v| format!("ok {v}"), |e| format!("err {e:?}"));
        assert_eq!(describe(ok(5)), "ok 5");
        assert_eq!(describe(err(Boom::Small)), "err Small");
    }

    #[test]
    fn rescue_recovers_failure_and_forwards_success() {
        let recovered: Result<i32, ()> = err(Boom::Large(9)).rescue(|e| match e {
            Boom::Small => 0,
            Boom::Large(n) => i32::try_from(n).unwrap(),
        });
        assert_eq!(recovered, Ok(9));

        let forwarded: Result<i32, ()> = ok(4).rescue(|_| 0);
        assert_eq!(forwarded, Ok(4));
    }

    #[test]
    fn fail_rejects_success_and_forwards_failure() {
        let rejected: Result<(), Boom> = ok(3).fail(|v| Boom::Large(v.unsigned_abs()));
        assert_eq!(rejected, Err(Boom::Large(3)));

        let forwarded: Result<(), Boom> = err(Boom::Small).fail(|_| Boom::Large(0));
        assert_eq!(forwarded, Err(Boom::Small));
    }

    #[test]
    fn visit_sees_success_only() {
        let seen = Cell::new(0);
        let result = ok(8).visit(|v| seen.set(*v));
        assert_eq!(result, Ok(8));
        assert_eq!(seen.get(), 8);

        let untouched = err(Boom::Small).visit(|_| seen.set(-1));
        assert_eq!(untouched, Err(Boom::Small));
        assert_eq!(seen.get(), 8);
    }
}
