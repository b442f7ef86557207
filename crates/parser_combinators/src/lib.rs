//! Composable parser combinators over text
//!
//! Grammars are built from small primitives like [literal] and [pattern],
//! combined with methods on [Parser] such as [or](Parser::or),
//! [then](Parser::then) and [many](Parser::many).
//!
//! ```
//! # use parser_combinators::{literal, opt_whitespace, pattern};
//! let number = pattern("[0-9]+").unwrap().map(|digits| digits.parse::<u32>().unwrap());
//! let list = literal("[")
//!     .then(number.sep_by(literal(",").skip(opt_whitespace())))
//!     .skip(literal("]"));
//!
//! assert_eq!(list.parse("[1, 2,3]"), Ok(vec![1, 2, 3]));
//! ```
//!
//! When a parse fails, the error describes the furthest offset that any
//! alternative reached, not merely the last alternative that was tried:
//!
//! ```
//! # use parser_combinators::literal;
//! let parser = literal("abc")
//!     .then(literal("def"))
//!     .or(literal("ab").then(literal("cd")));
//!
//! let error = parser.parse("abc").unwrap_err();
//! assert_eq!(error.offset, 3);
//! assert_eq!(error.expected, "'def'");
//! ```

mod combinators;
mod error;
mod mark;
mod parser;
mod position;
mod primitives;
mod repetition;
mod step;
mod tracker;

pub use combinators::{alt, sequence};
pub use error::{GrammarError, ParseError};
pub use mark::Mark;
pub use parser::{lazy, Parser};
pub use position::{LineIndex, Position};
pub use primitives::{
    always, any_char, current_offset, digit, digits, end_of_input, letter, letters, literal,
    never, opt_whitespace, pattern, pattern_group, remainder, whitespace,
};
pub use step::{Context, Expected, Failure, Step};
pub use tracker::Tracker;
