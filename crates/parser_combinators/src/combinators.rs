//! Operators that build new parsers out of existing ones

use crate::{Parser, Step};

impl<T: 'static> Parser<T> {
    /// Transform the value produced by this parser
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Parser::new(move |context, offset| self.run(context, offset).map(&f))
    }

    /// Continue with a parser chosen by looking at the value of this one
    ///
    /// The parser returned by `f` runs where this one stopped, its
    /// result becomes the result of the combined parser.
    #[must_use]
    pub fn bind<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> Parser<U> + Send + Sync + 'static,
    {
        Parser::new(move |context, offset| match self.run(context, offset) {
            Step::Success { value, next } => f(value).run(context, next),
            Step::Failure(failure) => Step::Failure(failure),
        })
    }

    /// Run `next` after this parser and keep only the value of `next`
    #[must_use]
    pub fn then<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        self.bind(move |_| next.clone())
    }

    /// Run `next` after this parser and keep only the value of this parser
    ///
    /// Equivalent to `self.bind(|value| next.map(|_| value))`, without requiring
    /// `T` to be [Clone].
    #[must_use]
    pub fn skip<U: 'static>(self, next: Parser<U>) -> Parser<T> {
        Parser::new(move |context, offset| match self.run(context, offset) {
            Step::Success { value, next: after } => next.run(context, after).map(|_| value),
            failure => failure,
        })
    }

    /// Run `next` after this parser and keep both values
    #[must_use]
    pub fn and<U: 'static>(self, next: Parser<U>) -> Parser<(T, U)> {
        Parser::new(move |context, offset| match self.run(context, offset) {
            Step::Success { value, next: after } => {
                next.run(context, after).map(|second| (value, second))
            },
            Step::Failure(failure) => Step::Failure(failure),
        })
    }

    /// Replace the value of this parser with `value`
    #[must_use]
    pub fn result<U>(self, value: U) -> Parser<U>
    where
        U: Clone + Send + Sync + 'static,
    {
        self.map(move |_| value.clone())
    }

    /// Try this parser, and if it fails try `other` from the same offset
    ///
    /// Input consumed by a failed attempt of this parser is given back.
    #[must_use]
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        Parser::new(move |context, offset| match self.run(context, offset) {
            success @ Step::Success { .. } => success,
            Step::Failure(_) => other.run(context, offset),
        })
    }
}

/// Run all `parsers` one after another and collect their values
#[must_use]
pub fn sequence<T: 'static>(parsers: impl IntoIterator<Item = Parser<T>>) -> Parser<Vec<T>> {
    let parsers: Vec<Parser<T>> = parsers.into_iter().collect();

    Parser::new(move |context, mut offset| {
        let mut values = Vec::with_capacity(parsers.len());

        for parser in &parsers {
            match parser.run(context, offset) {
                Step::Success { value, next } => {
                    values.push(value);
                    offset = next;
                },
                Step::Failure(failure) => return Step::Failure(failure),
            }
        }

        Step::Success {
            value: values,
            next: offset,
        }
    })
}

/// Try each of `parsers` in order and use the first one that matches
///
/// Behaves like chaining all the parsers with [or](Parser::or).
///
/// # Panics
/// This function panics if `parsers` is empty.
#[must_use]
pub fn alt<T: 'static>(parsers: impl IntoIterator<Item = Parser<T>>) -> Parser<T> {
    parsers
        .into_iter()
        .reduce(Parser::or)
        .expect("alt needs at least one alternative")
}
