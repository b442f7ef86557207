use std::sync::Arc;

use crate::Tracker;

/// A human readable description of what a parser wanted to see
///
/// For example `'abc'` for a literal or `/[0-9]/` for a pattern.
pub type Expected = Arc<str>;

/// The outcome of running a parser once at some offset
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step<T> {
    /// The parser matched and consumed input up to (but excluding) `next`
    Success { value: T, next: usize },

    /// The parser did not match
    ///
    /// Failures are local signals, the calling combinator decides whether to
    /// backtrack, stop a repetition or propagate.
    Failure(Failure),
}

/// A failed match that has already been reported to the [Tracker]
///
/// The only way to create one is [Context::fail], so every failure
/// a parser can return is guaranteed to count towards the furthest failure.
///
/// ```compile_fail
/// # use parser_combinators::{Failure, Step};
/// let step: Step<()> = Step::Failure(Failure {
///     offset: 0,
///     expected: "'x'".into(),
/// });
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    offset: usize,
    expected: Expected,
}

impl Failure {
    /// The byte offset where the match failed
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn expected(&self) -> &Expected {
        &self.expected
    }
}

impl<T> Step<T> {
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Transform the value of a successful step, failures are passed through untouched
    #[inline]
    pub fn map<U, F>(self, f: F) -> Step<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success { value, next } => Step::Success {
                value: f(value),
                next,
            },
            Self::Failure(failure) => Step::Failure(failure),
        }
    }
}

/// State shared by all parsers during one top-level parse
///
/// A [Context] is created by the entry points ([Parser::parse](crate::Parser::parse)
/// and friends) and lives exactly as long as that call.
#[derive(Debug)]
pub struct Context<'input> {
    input: &'input str,
    tracker: Tracker,
}

impl<'input> Context<'input> {
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            tracker: Tracker::new(),
        }
    }

    /// The complete input of this parse
    #[inline]
    #[must_use]
    pub fn input(&self) -> &'input str {
        self.input
    }

    /// The input from `offset` to the end
    #[inline]
    #[must_use]
    pub fn remaining(&self, offset: usize) -> &'input str {
        &self.input[offset..]
    }

    #[inline]
    #[must_use]
    pub fn is_at_end(&self, offset: usize) -> bool {
        offset >= self.input.len()
    }

    #[inline]
    #[must_use]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Create a failure at `offset` and report it to the [Tracker]
    pub fn fail<T>(&mut self, offset: usize, expected: &Expected) -> Step<T> {
        Step::Failure(self.failure(offset, expected))
    }

    pub(crate) fn failure(&mut self, offset: usize, expected: &Expected) -> Failure {
        self.tracker.report(offset, expected);

        Failure {
            offset,
            expected: expected.clone(),
        }
    }

    #[must_use]
    pub(crate) fn into_tracker(self) -> Tracker {
        self.tracker
    }
}
