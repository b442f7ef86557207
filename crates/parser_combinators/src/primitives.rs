//! Parsers that consume input directly

use std::sync::LazyLock;

use regex::Regex;

use crate::{parser::END_OF_INPUT, Expected, GrammarError, Parser, Step};

/// Match `expected` exactly
///
/// ```
/// # use parser_combinators::literal;
/// assert_eq!(literal("abc").parse("abc"), Ok("abc".to_string()));
/// assert!(literal("abc").parse("abd").is_err());
/// ```
#[must_use]
pub fn literal(expected: &str) -> Parser<String> {
    let text = expected.to_owned();
    let description = Expected::from(format!("'{expected}'"));

    Parser::new(move |context, offset| {
        if context.remaining(offset).starts_with(text.as_str()) {
            Step::Success {
                value: text.clone(),
                next: offset + text.len(),
            }
        } else {
            context.fail(offset, &description)
        }
    })
}

/// Match a regular expression at the current offset
///
/// The expression is anchored, it never skips ahead to find a match.
/// The value is the complete matched text.
pub fn pattern(source: &str) -> Result<Parser<String>, GrammarError> {
    pattern_group(source, 0)
}

/// Like [pattern], but yield the text of capture group `group` instead of the whole match
///
/// The whole match still decides how much input is consumed.
/// If the group does not take part in the match (or does not exist at all),
/// the parser fails.
pub fn pattern_group(source: &str, group: usize) -> Result<Parser<String>, GrammarError> {
    // A source that is not valid on its own could escape the anchoring group
    Regex::new(source)?;
    let anchored = Regex::new(&format!("^(?:{source})"))?;
    let description = Expected::from(format!("/{source}/"));

    let parser = Parser::new(move |context, offset| {
        let rest = context.remaining(offset);

        let matched = if group == 0 {
            anchored
                .find(rest)
                .map(|whole| (whole.end(), whole.as_str().to_owned()))
        } else {
            anchored.captures(rest).and_then(|captures| {
                let whole = captures.get(0)?;
                let group = captures.get(group)?;
                Some((whole.end(), group.as_str().to_owned()))
            })
        };

        match matched {
            Some((length, value)) => Step::Success {
                value,
                next: offset + length,
            },
            None => context.fail(offset, &description),
        }
    });

    Ok(parser)
}

/// Consume a single character
#[must_use]
pub fn any_char() -> Parser<char> {
    let description = Expected::from("any character");

    Parser::new(move |context, offset| match context.remaining(offset).chars().next() {
        Some(c) => Step::Success {
            value: c,
            next: offset + c.len_utf8(),
        },
        None => context.fail(offset, &description),
    })
}

/// Succeed without consuming anything, but only at the end of the input
#[must_use]
pub fn end_of_input() -> Parser<()> {
    let description = Expected::from(END_OF_INPUT);

    Parser::new(move |context, offset| {
        if context.is_at_end(offset) {
            Step::Success {
                value: (),
                next: offset,
            }
        } else {
            context.fail(offset, &description)
        }
    })
}

/// Succeed with `value` without consuming anything
#[must_use]
pub fn always<T>(value: T) -> Parser<T>
where
    T: Clone + Send + Sync + 'static,
{
    Parser::new(move |_, offset| Step::Success {
        value: value.clone(),
        next: offset,
    })
}

/// Fail without consuming anything
///
/// Mostly useful inside [bind](Parser::bind) to reject a value after looking at it.
///
/// ```
/// # use parser_combinators::{any_char, always, never};
/// let vowel = any_char().bind(|c| {
///     if "aeiou".contains(c) {
///         always(c)
///     } else {
///         never("a vowel")
///     }
/// });
///
/// assert_eq!(vowel.parse("e"), Ok('e'));
/// assert_eq!(vowel.parse("x").unwrap_err().expected, "a vowel");
/// ```
#[must_use]
pub fn never<T: 'static>(expected: &str) -> Parser<T> {
    let description = Expected::from(expected);

    Parser::new(move |context, offset| context.fail(offset, &description))
}

/// Consume everything up to the end of the input
#[must_use]
pub fn remainder() -> Parser<String> {
    Parser::new(|context, offset| {
        let rest = context.remaining(offset);

        Step::Success {
            value: rest.to_owned(),
            next: offset + rest.len(),
        }
    })
}

/// Yield the current byte offset without consuming anything
#[must_use]
pub fn current_offset() -> Parser<usize> {
    Parser::new(|_, offset| Step::Success {
        value: offset,
        next: offset,
    })
}

fn builtin_pattern(source: &str) -> Parser<String> {
    pattern(source).expect("built-in patterns are valid regular expressions")
}

static LETTER: LazyLock<Parser<String>> = LazyLock::new(|| builtin_pattern("[a-zA-Z]"));
static LETTERS: LazyLock<Parser<String>> = LazyLock::new(|| builtin_pattern("[a-zA-Z]*"));
static DIGIT: LazyLock<Parser<String>> = LazyLock::new(|| builtin_pattern("[0-9]"));
static DIGITS: LazyLock<Parser<String>> = LazyLock::new(|| builtin_pattern("[0-9]*"));
static WHITESPACE: LazyLock<Parser<String>> = LazyLock::new(|| builtin_pattern(r"\s+"));
static OPT_WHITESPACE: LazyLock<Parser<String>> = LazyLock::new(|| builtin_pattern(r"\s*"));

/// A single ASCII letter
#[must_use]
pub fn letter() -> Parser<String> {
    LETTER.clone()
}

/// Zero or more ASCII letters
#[must_use]
pub fn letters() -> Parser<String> {
    LETTERS.clone()
}

/// A single ASCII digit
#[must_use]
pub fn digit() -> Parser<String> {
    DIGIT.clone()
}

/// Zero or more ASCII digits
#[must_use]
pub fn digits() -> Parser<String> {
    DIGITS.clone()
}

/// One or more whitespace characters
#[must_use]
pub fn whitespace() -> Parser<String> {
    WHITESPACE.clone()
}

/// Zero or more whitespace characters
#[must_use]
pub fn opt_whitespace() -> Parser<String> {
    OPT_WHITESPACE.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        let parser = literal("x");

        assert_eq!(parser.parse("x"), Ok("x".to_string()));
        assert_eq!(
            parser.parse("y").unwrap_err().message,
            "expected 'x' at character 0, got 'y'\n    parsing: 'y'"
        );
    }

    #[test]
    fn literal_fails_at_start_of_mismatch() {
        let error = literal("abc").parse("abd").unwrap_err();

        assert_eq!(error.offset, 0);
        assert_eq!(error.expected, "'abc'");
    }

    #[test]
    fn test_pattern() {
        let parser = pattern("[0-9]").unwrap();

        assert_eq!(parser.parse("1"), Ok("1".to_string()));
        assert_eq!(parser.parse("4"), Ok("4".to_string()));
        assert_eq!(
            parser.parse("x").unwrap_err().message,
            "expected /[0-9]/ at character 0, got 'x'\n    parsing: 'x'"
        );
        assert_eq!(
            parser.parse("x0").unwrap_err().message,
            "expected /[0-9]/ at character 0, got 'x0'\n    parsing: 'x0'"
        );
    }

    #[test]
    fn pattern_is_anchored() {
        let parser = pattern("[0-9]+").unwrap();
        assert_eq!(parser.parse_partial("a12").unwrap_err().offset, 0);

        let parser = literal("a").then(pattern("[0-9]+").unwrap());
        assert_eq!(parser.parse("a12"), Ok("12".to_string()));
        assert_eq!(parser.parse("ab12").unwrap_err().offset, 1);
    }

    #[test]
    fn pattern_with_explicit_caret() {
        let parser = literal("xx").then(pattern("^y*").unwrap());
        assert_eq!(parser.parse("xxyy"), Ok("yy".to_string()));
    }

    #[test]
    fn test_pattern_group() {
        let parser = pattern_group("v([0-9])", 1).unwrap();

        assert_eq!(parser.parse("v1"), Ok("1".to_string()));
        assert_eq!(parser.parse("v4"), Ok("4".to_string()));
        assert_eq!(
            parser.parse("x0").unwrap_err().message,
            "expected /v([0-9])/ at character 0, got 'x0'\n    parsing: 'x0'"
        );
    }

    #[test]
    fn missing_group_is_a_failure() {
        let parser = pattern_group("v([0-9])", 2).unwrap();
        assert_eq!(
            parser.parse("v1").unwrap_err().message,
            "expected /v([0-9])/ at character 0, got 'v1'\n    parsing: 'v1'"
        );

        let parser = pattern_group("a(b)?c", 1).unwrap();
        assert_eq!(parser.parse("abc"), Ok("b".to_string()));
        assert!(parser.parse("ac").is_err());
    }

    #[test]
    fn invalid_pattern() {
        assert!(matches!(
            pattern("(unclosed"),
            Err(GrammarError::InvalidPattern(_))
        ));
    }

    #[test]
    fn pattern_cannot_escape_anchor() {
        assert!(matches!(
            pattern("a)|(b"),
            Err(GrammarError::InvalidPattern(_))
        ));
        assert!(matches!(
            pattern_group("x)|(y", 1),
            Err(GrammarError::InvalidPattern(_))
        ));

        let alternation = pattern("a|b").unwrap();
        assert!(alternation.parse_partial("xxb").is_err());
        assert_eq!(alternation.parse_partial("bx"), Ok(("b".to_string(), 1)));
    }

    #[test]
    fn test_any_char() {
        assert_eq!(any_char().parse("ä"), Ok('ä'));

        let error = any_char().parse("").unwrap_err();
        assert_eq!(error.expected, "any character");
        assert_eq!(
            error.message,
            "expected any character, got the end of the string\n    parsing: ''"
        );
    }

    #[test]
    fn test_end_of_input() {
        assert_eq!(end_of_input().parse(""), Ok(()));

        let error = end_of_input().parse("x").unwrap_err();
        assert_eq!(error.expected, "EOF");
        assert_eq!(error.offset, 0);
    }

    #[test]
    fn test_always() {
        assert_eq!(always(42).parse(""), Ok(42));
        assert_eq!(always(42).parse_partial("abc"), Ok((42, 0)));
    }

    #[test]
    fn test_never() {
        let error = never::<()>("something else").parse("abc").unwrap_err();

        assert_eq!(error.offset, 0);
        assert_eq!(
            error.message,
            "expected something else at character 0, got 'abc'\n    parsing: 'abc'"
        );
    }

    #[test]
    fn test_remainder() {
        assert_eq!(remainder().parse(""), Ok(String::new()));
        assert_eq!(
            literal("a").then(remainder()).parse("abcd"),
            Ok("bcd".to_string())
        );
    }

    #[test]
    fn test_current_offset() {
        let parser = pattern("^x*").unwrap().then(current_offset());

        assert_eq!(parser.parse(""), Ok(0));
        assert_eq!(parser.parse("xx"), Ok(2));
        assert_eq!(parser.parse("xxxx"), Ok(4));
    }

    #[test]
    fn character_classes() {
        assert_eq!(letter().parse("Q"), Ok("Q".to_string()));
        assert!(letter().parse("1").is_err());
        assert_eq!(letters().parse("abc"), Ok("abc".to_string()));
        assert_eq!(letters().parse(""), Ok(String::new()));
        assert_eq!(digit().parse("7"), Ok("7".to_string()));
        assert_eq!(digits().parse("0123"), Ok("0123".to_string()));
        assert_eq!(whitespace().parse(" \t\n"), Ok(" \t\n".to_string()));
        assert!(whitespace().parse("").is_err());
        assert_eq!(opt_whitespace().parse(""), Ok(String::new()));
    }
}
