use std::fmt;

/// A zero-based `(row, column)` location inside a piece of input
///
/// Rows are counted in `'\n'` characters, columns in characters since the
/// most recent line break.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Resolve a byte offset into a [Position] by scanning `input[..offset]`
    ///
    /// Offsets past the end of the input are clamped to the input length.
    ///
    /// # Panics
    /// This function panics if `offset` is not a character boundary.
    #[must_use]
    pub fn resolve(input: &str, offset: usize) -> Self {
        let consumed = &input[..offset.min(input.len())];

        let row = consumed.bytes().filter(|&b| b == b'\n').count();
        let line_start = consumed.rfind('\n').map_or(0, |index| index + 1);
        let col = consumed[line_start..].chars().count();

        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

/// Caches the start offset of every line of an input
///
/// A [ParseError](crate::ParseError) resolves its single offset with
/// [Position::resolve]. This index is meant for callers that need to resolve
/// many offsets of the same input, for example the spans of every [Mark](crate::Mark)
/// in a parse result. A single lookup is `O(log lines)` instead of a scan over
/// the whole prefix.
///
/// ```
/// # use parser_combinators::{opt_whitespace, pattern, LineIndex, Position};
/// let input = "one\ntwo three";
/// let word = pattern("[a-z]+").unwrap();
/// let words = word.mark().skip(opt_whitespace()).many();
///
/// let index = LineIndex::new(input);
/// let positions: Vec<Position> = words
///     .parse(input)
///     .unwrap()
///     .iter()
///     .map(|word| index.resolve(word.start))
///     .collect();
///
/// assert_eq!(
///     positions,
///     [
///         Position { row: 0, col: 0 },
///         Position { row: 1, col: 0 },
///         Position { row: 1, col: 4 },
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct LineIndex<'input> {
    input: &'input str,

    /// Byte offset of the first character of every line, in ascending order.
    ///
    /// Always contains at least one element (`0`).
    line_starts: Vec<usize>,
}

impl<'input> LineIndex<'input> {
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(input.match_indices('\n').map(|(index, _)| index + 1))
            .collect();

        Self { input, line_starts }
    }

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Equivalent to [Position::resolve], without rescanning the input
    #[must_use]
    pub fn resolve(&self, offset: usize) -> Position {
        let offset = offset.min(self.input.len());

        // The first line always starts at 0, so this never underflows
        let row = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let col = self.input[self.line_starts[row]..offset].chars().count();

        Position { row, col }
    }
}
