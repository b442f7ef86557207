use std::ops::Range;

use crate::{Parser, Step};

/// A value together with the input span it was parsed from
///
/// `start` and `end` are byte offsets, `end` is exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Mark<T> {
    pub start: usize,
    pub value: T,
    pub end: usize,
}

impl<T> Mark<T> {
    #[inline]
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The input text covered by this mark
    ///
    /// # Panics
    /// This function panics if `input` is not the text this mark was parsed from.
    #[inline]
    #[must_use]
    pub fn text<'input>(&self, input: &'input str) -> &'input str {
        &input[self.span()]
    }
}

impl<T: 'static> Parser<T> {
    /// Wrap the value of this parser in a [Mark] describing where it was found
    #[must_use]
    pub fn mark(self) -> Parser<Mark<T>> {
        Parser::new(move |context, start| {
            match self.run(context, start) {
                Step::Success { value, next } => Step::Success {
                    value: Mark {
                        start,
                        value,
                        end: next,
                    },
                    next,
                },
                Step::Failure(failure) => Step::Failure(failure),
            }
        })
    }
}
