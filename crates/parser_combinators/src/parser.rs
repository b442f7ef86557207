use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use crate::{Context, Expected, Failure, ParseError, Step};

/// The expectation reported when a parse stops before the end of its input
pub(crate) const END_OF_INPUT: &str = "EOF";

type RunFn<T> = dyn Fn(&mut Context<'_>, usize) -> Step<T> + Send + Sync;

/// A reusable parser producing values of type `T`
///
/// Parsers are immutable and cheap to clone, every combinator returns a new
/// parser instead of modifying an existing one. They hold no state of their
/// own and can be shared between threads.
pub struct Parser<T> {
    run: Arc<RunFn<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("output", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Parser<T> {
    /// Create a parser from a raw matching function
    ///
    /// The function receives the [Context] of the current parse and the offset
    /// to start matching at. Failures can only be created through
    /// [Context::fail], which reports them to the furthest failure of the parse.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Context<'_>, usize) -> Step<T> + Send + Sync + 'static,
    {
        Self { run: Arc::new(f) }
    }

    /// Run the parser once at `offset`
    #[inline]
    pub fn run(&self, context: &mut Context<'_>, offset: usize) -> Step<T> {
        (self.run)(context, offset)
    }

    /// Parse the complete `input`
    ///
    /// The parser must consume all of the input, leftover input is reported
    /// as an error expecting `EOF`. On failure, the error describes the
    /// furthest point any part of the grammar reached.
    pub fn parse(&self, input: &str) -> Result<T, ParseError> {
        let mut context = Context::new(input);

        match self.run(&mut context, 0) {
            Step::Success { value, next } if context.is_at_end(next) => Ok(value),
            Step::Success { next, .. } => {
                let leftover = context.failure(next, &Expected::from(END_OF_INPUT));
                Err(furthest_failure(context, leftover))
            },
            Step::Failure(failure) => Err(furthest_failure(context, failure)),
        }
    }

    /// Parse a prefix of `input`
    ///
    /// Like [parse](Self::parse), but leftover input is not an error.
    /// Returns the value together with the offset where parsing stopped.
    pub fn parse_partial(&self, input: &str) -> Result<(T, usize), ParseError> {
        let mut context = Context::new(input);

        match self.run(&mut context, 0) {
            Step::Success { value, next } => Ok((value, next)),
            Step::Failure(failure) => Err(furthest_failure(context, failure)),
        }
    }
}

/// Build the final error of a failed parse from the furthest reported failure
fn furthest_failure(context: Context<'_>, failure: Failure) -> ParseError {
    let input = context.input();
    let tracker = context.into_tracker();

    let (offset, expected) = match tracker.expected() {
        Some(furthest) => (tracker.furthest_offset(), furthest),
        None => (failure.offset(), failure.expected()),
    };

    let error = ParseError::new(input, offset, expected);
    log::debug!(
        "Parse failed at {} (byte offset {offset}): expected {expected}",
        error.position
    );
    error
}

/// Refer to a parser before it is constructed
///
/// `f` is called the first time the returned parser runs, the result is
/// cached for all later runs. This is how recursive grammars are written:
///
/// ```
/// # use parser_combinators::{lazy, literal, Parser};
/// fn nested() -> Parser<usize> {
///     literal("(")
///         .then(lazy(nested))
///         .skip(literal(")"))
///         .map(|depth| depth + 1)
///         .or(literal("").result(0))
/// }
///
/// assert_eq!(nested().parse("((()))"), Ok(3));
/// ```
pub fn lazy<T, F>(f: F) -> Parser<T>
where
    T: 'static,
    F: Fn() -> Parser<T> + Send + Sync + 'static,
{
    let resolved = OnceLock::new();

    Parser::new(move |context, offset| resolved.get_or_init(&f).run(context, offset))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::literal;

    #[test]
    fn parse_requires_end_of_input() {
        let parser = literal("aabbcc");

        assert_eq!(parser.parse("aabbcc"), Ok("aabbcc".to_string()));

        let error = parser.parse("aabbccdd").unwrap_err();
        assert_eq!(error.offset, 6);
        assert_eq!(error.expected, "EOF");
        assert_eq!(
            error.message,
            "expected EOF at character 6, got '...dd'\n    parsing: 'aabbccdd'"
        );
    }

    #[test]
    fn parse_partial_allows_leftover_input() {
        let parser = literal("ab");

        assert_eq!(parser.parse_partial("abcd"), Ok(("ab".to_string(), 2)));
        assert_eq!(parser.parse_partial("x").unwrap_err().offset, 0);
    }

    #[test]
    fn custom_parser() {
        let expected = Expected::from("an even digit");
        let even = Parser::new(move |context, offset| {
            match context.remaining(offset).chars().next() {
                Some(c @ ('0' | '2' | '4' | '6' | '8')) => Step::Success {
                    value: c,
                    next: offset + 1,
                },
                _ => context.fail(offset, &expected),
            }
        });

        assert_eq!(even.parse("4"), Ok('4'));
        assert_eq!(
            even.parse("3").unwrap_err().message,
            "expected an even digit at character 0, got '3'\n    parsing: '3'"
        );
    }

    #[test]
    fn custom_failure_past_start_is_furthest() {
        let expected = Expected::from("digit");
        let skips_ahead = Parser::new(move |context, offset| {
            context.fail::<String>(offset + 2, &expected)
        });
        let parser = literal("a").then(skips_ahead).or(literal("b"));

        let error = parser.parse("axxx").unwrap_err();
        assert_eq!(error.offset, 3);
        assert_eq!(error.expected, "digit");
        assert_eq!(
            error.message,
            "expected digit at character 3, got '...x'\n    parsing: 'axxx'"
        );
    }

    #[test]
    fn lazy_resolves_once() {
        static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

        let parser = lazy(|| {
            CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
            literal("x")
        });
        assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 0);

        assert!(parser.parse("x").is_ok());
        assert!(parser.parse("y").is_err());
        assert!(parser.parse("x").is_ok());
        assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn parsers_are_shareable() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}

        let parser = literal("x");
        assert_send_sync(&parser);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let parser = parser.clone();
                std::thread::spawn(move || parser.parse("x"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok("x".to_string()));
        }
    }
}
