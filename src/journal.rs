#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use itertools::Itertools;
use rpds::VectorSync;
use std::fmt;

/// A `Result` that carries an append-only journal of entries.
///
/// Chaining behaves exactly like `Result`: `and_then` runs only on `Ok`,
/// `or_else` only on `Err`. Entries accumulate in call order regardless of
/// which state the value is in, so the journal always describes every step
/// that actually ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journaled<T, E, W: Clone> {
    outcome: Result<T, E>,
    entries: VectorSync<W>,
}

impl<T, E, W: Clone> Journaled<T, E, W> {
    #[must_use]
    pub fn ok(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    #[must_use]
    pub fn err(error: E) -> Self {
        Self::from_result(Err(error))
    }

    #[must_use]
    pub fn from_result(outcome: Result<T, E>) -> Self {
        Self {
            outcome,
            entries: VectorSync::new_sync(),
        }
    }

    #[must_use]
    pub const fn from_parts(outcome: Result<T, E>, entries: VectorSync<W>) -> Self {
        Self { outcome, entries }
    }

    /// Append one entry, keeping the current state.
    #[must_use]
    pub fn record(mut self, entry: W) -> Self {
        self.entries.push_back_mut(entry);
        self
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn entries(&self) -> impl Iterator<Item = &W> {
        self.entries.iter()
    }

    #[must_use]
    pub const fn outcome(&self) -> &Result<T, E> {
        &self.outcome
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Journaled<U, E, W> {
        Journaled::from_parts(self.outcome.map(f), self.entries)
    }

    #[must_use]
    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> Journaled<T, F, W> {
        Journaled::from_parts(self.outcome.map_err(f), self.entries)
    }

    /// Chain a step that journals on its own. Its entries follow ours.
    #[must_use]
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Journaled<U, E, W>) -> Journaled<U, E, W> {
        match self.outcome {
            Ok(value) => f(value).prefixed_by(self.entries),
            Err(error) => Journaled::from_parts(Err(error), self.entries),
        }
    }

    #[must_use]
    pub fn or_else<F>(self, f: impl FnOnce(E) -> Journaled<T, F, W>) -> Journaled<T, F, W> {
        match self.outcome {
            Ok(value) => Journaled::from_parts(Ok(value), self.entries),
            Err(error) => f(error).prefixed_by(self.entries),
        }
    }

    #[must_use]
    pub fn rescue(self, recover: impl FnOnce(E) -> T) -> Self {
        let outcome = match self.outcome {
            Ok(value) => Ok(value),
            Err(error) => Ok(recover(error)),
        };
        Self::from_parts(outcome, self.entries)
    }

    #[must_use]
    pub fn fail(self, reject: impl FnOnce(T) -> E) -> Self {
        let outcome = match self.outcome {
            Ok(value) => Err(reject(value)),
            Err(error) => Err(error),
        };
        Self::from_parts(outcome, self.entries)
    }

    #[must_use]
    pub fn into_parts(self) -> (Result<T, E>, VectorSync<W>) {
        (self.outcome, self.entries)
    }

    /// Hand the journal to `sink` and return the bare `Result`.
    pub fn flush(self, sink: impl FnOnce(&VectorSync<W>)) -> Result<T, E> {
        sink(&self.entries);
        self.outcome
    }

    fn prefixed_by(self, earlier: VectorSync<W>) -> Self {
        let mut entries = earlier;
        for entry in self.entries.iter() {
            entries.push_back_mut(entry.clone());
        }
        Self::from_parts(self.outcome, entries)
    }
}

impl<T, E, W: Clone + fmt::Display> fmt::Display for Journaled<T, E, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_ok() { "ok" } else { "err" };
        write!(f, "{state} [{}]", self.entries.iter().join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::Journaled;

    type J = Journaled<i32, &'static str, &'static str>;

    fn entries(j: &J) -> Vec<&'static str> {
        j.entries().copied().collect()
    }

    #[test]
    fn and_then_appends_later_entries_after_earlier_ones() {
        let j = J::ok(1)
            .record("first")
            .and_then(|v| J::ok(v + 1).record("second"));

        assert_eq!(j.outcome(), &Ok(2));
        assert_eq!(entries(&j), vec!["first", "second"]);
    }

    #[test]
    fn and_then_keeps_journal_of_failing_step() {
        let j = J::ok(1)
            .record("lookup")
            .and_then(|_| J::err("denied").record("check"));

        assert_eq!(j.outcome(), &Err("denied"));
        assert_eq!(entries(&j), vec!["lookup", "check"]);
    }

    #[test]
    fn and_then_after_err_never_runs() {
        let j = J::err("down")
            .record("lookup")
            .and_then(|_| J::ok(99).record("send"));

        assert_eq!(j.outcome(), &Err("down"));
        assert_eq!(entries(&j), vec!["lookup"]);
    }

    #[test]
    fn or_else_recovers_with_journal() {
        let j: J = J::err("down")
            .record("lookup")
            .or_else(|_| J::ok(0).record("fallback"));

        assert_eq!(j.outcome(), &Ok(0));
        assert_eq!(entries(&j), vec!["lookup", "fallback"]);
    }

    #[test]
    fn map_and_map_err_keep_entries() {
        let mapped = J::ok(2).record("a").map(|v| v * 3);
        assert_eq!(mapped.outcome(), &Ok(6));
        assert_eq!(mapped.entries().count(), 1);

        let relabeled = J::err("x").record("a").map_err(str::len);
        assert_eq!(relabeled.outcome(), &Err(1));
        assert_eq!(relabeled.entries().count(), 1);
    }

    #[test]
    fn rescue_and_fail_switch_state() {
        assert_eq!(J::err("x").rescue(|_| 5).outcome(), &Ok(5));
        assert_eq!(J::ok(5).fail(|_| "too small").outcome(), &Err("too small"));
        assert_eq!(J::ok(5).rescue(|_| 0).outcome(), &Ok(5));
    }

    #[test]
    fn flush_passes_journal_and_returns_result() {
        let mut seen = Vec::new();
        let result = J::ok(1)
            .record("a")
            .record("b")
            .flush(|journal| seen.extend(journal.iter().copied()));

        assert_eq!(result, Ok(1));
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn display_joins_entries() {
        let j = J::err("x").record("lookup").record("consent");
        assert_eq!(j.to_string(), "err [lookup -> consent]");
    }
}
