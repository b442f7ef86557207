//! Combinators that apply a parser more than once

use crate::{GrammarError, Parser, Step};

impl<T: 'static> Parser<T> {
    /// Apply this parser as often as possible
    ///
    /// Zero matches are fine. The failure that ends the repetition is not an
    /// error, but it still counts towards the furthest failure of the parse.
    ///
    /// If this parser can succeed without consuming input, the repetition
    /// never terminates.
    #[must_use]
    pub fn many(self) -> Parser<Vec<T>> {
        self.at_least(0)
    }

    /// Apply this parser at least `min` and at most `max` times
    ///
    /// `max` may be [None] for no upper bound. The first `min` matches are
    /// required, a failure among them fails the whole parser. After that,
    /// the parser is applied until it fails or `max` matches are found.
    ///
    /// ```
    /// # use parser_combinators::letter;
    /// let parser = letter().times(2, 4);
    ///
    /// assert_eq!(parser.parse("xyz").unwrap().len(), 3);
    /// assert!(parser.parse("x").is_err());
    /// assert!(parser.parse("vwxyz").is_err());
    /// ```
    ///
    /// # Panics
    /// This function panics if `min` is greater than `max`.
    /// Use [try_times](Self::try_times) to handle that case.
    #[must_use]
    pub fn times(self, min: usize, max: impl Into<Option<usize>>) -> Parser<Vec<T>> {
        match self.try_times(min, max) {
            Ok(parser) => parser,
            Err(error) => panic!("{error}"),
        }
    }

    /// Like [times](Self::times), but returns an error instead of panicking if `min > max`
    pub fn try_times(
        self,
        min: usize,
        max: impl Into<Option<usize>>,
    ) -> Result<Parser<Vec<T>>, GrammarError> {
        let max = max.into();
        if let Some(max) = max {
            if min > max {
                return Err(GrammarError::InvertedRepetition { min, max });
            }
        }

        let parser = Parser::new(move |context, mut offset| {
            let mut values = Vec::new();

            while values.len() < min {
                match self.run(context, offset) {
                    Step::Success { value, next } => {
                        values.push(value);
                        offset = next;
                    },
                    Step::Failure(failure) => return Step::Failure(failure),
                }
            }

            while max.map_or(true, |max| values.len() < max) {
                match self.run(context, offset) {
                    Step::Success { value, next } => {
                        values.push(value);
                        offset = next;
                    },
                    Step::Failure(_) => break,
                }
            }

            Step::Success {
                value: values,
                next: offset,
            }
        });

        Ok(parser)
    }

    /// Apply this parser `min` or more times
    #[must_use]
    pub fn at_least(self, min: usize) -> Parser<Vec<T>> {
        self.times(min, None)
    }

    /// Apply this parser up to `max` times
    #[must_use]
    pub fn at_most(self, max: usize) -> Parser<Vec<T>> {
        self.times(0, max)
    }

    /// Zero or more matches of this parser, separated by `separator`
    #[must_use]
    pub fn sep_by<U: 'static>(self, separator: Parser<U>) -> Parser<Vec<T>> {
        self.sep_by1(separator)
            .or(Parser::new(|_, offset| Step::Success {
                value: Vec::new(),
                next: offset,
            }))
    }

    /// One or more matches of this parser, separated by `separator`
    #[must_use]
    pub fn sep_by1<U: 'static>(self, separator: Parser<U>) -> Parser<Vec<T>> {
        let rest = separator.then(self.clone()).many();

        self.and(rest).map(|(first, rest)| {
            let mut values = Vec::with_capacity(rest.len() + 1);
            values.push(first);
            values.extend(rest);
            values
        })
    }
}
