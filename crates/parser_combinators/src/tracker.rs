use crate::Expected;

/// Remembers the furthest failure seen during a single parse
///
/// Every failure produced anywhere while parsing is reported here, including
/// failures of alternatives that were backtracked over and the failure that
/// ends a repetition. The final error message is built from this state, so
/// it reflects how far the parser got instead of which combinator happened
/// to fail last.
#[derive(Clone, Debug, Default)]
pub struct Tracker {
    furthest_offset: usize,
    expected: Option<Expected>,
}

impl Tracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure at `offset`
    ///
    /// Failures before the current furthest offset are ignored. A failure at
    /// exactly the furthest offset replaces the previous expectation, so the
    /// alternative that was tried last wins a tie.
    pub fn report(&mut self, offset: usize, expected: &Expected) {
        if self.expected.is_some() && offset < self.furthest_offset {
            return;
        }

        #[cfg(feature = "trace")]
        log::trace!("furthest failure is now {expected} at {offset}");

        self.furthest_offset = offset;
        self.expected = Some(expected.clone());
    }

    #[inline]
    #[must_use]
    pub fn furthest_offset(&self) -> usize {
        self.furthest_offset
    }

    /// The expectation at [furthest_offset](Self::furthest_offset), if any failure was reported
    #[inline]
    #[must_use]
    pub fn expected(&self) -> Option<&Expected> {
        self.expected.as_ref()
    }
}
