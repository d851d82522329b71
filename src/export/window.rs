use crate::errors::Result;

/// Which records of the source end up in the output: skip `offset`, then keep at most `limit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub limit: Option<usize>,
}

impl Window {
    #[must_use]
    pub fn new(offset: usize, limit: Option<usize>) -> Self {
        Self { offset, limit: limit.filter(|l| *l > 0) }
    }

    /// Caller-facing form: a negative offset counts as zero and a limit of zero or less is unbounded.
    #[must_use]
    pub fn from_signed(offset: i64, limit: i64) -> Self {
        Self {
            offset: usize::try_from(offset.max(0)).unwrap_or(usize::MAX),
            limit: usize::try_from(limit).ok().filter(|l| *l > 0),
        }
    }

    /// Rows a source of `total` records yields through this window.
    #[must_use]
    pub fn expected_rows(&self, total: usize) -> usize {
        let remaining = total.saturating_sub(self.offset);
        self.limit.map_or(remaining, |l| l.min(remaining))
    }

    pub(crate) fn apply<I, T>(self, inner: I) -> Windowed<I>
    where
        I: Iterator<Item = Result<T>>,
    {
        Windowed { inner, to_skip: self.offset, remaining: self.limit, skipped: 0 }
    }
}

/// Iterator adapter behind [`Window::apply`].
///
/// Errors pass through untouched, even while skipping. Once the limit is reached the
/// inner iterator is not polled again.
pub(crate) struct Windowed<I> {
    inner: I,
    to_skip: usize,
    remaining: Option<usize>,
    skipped: usize,
}

impl<I> Windowed<I> {
    pub(crate) fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<I, T> Iterator for Windowed<I>
where
    I: Iterator<Item = Result<T>>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }
        while self.to_skip > 0 {
            match self.inner.next()? {
                Ok(_) => {
                    self.to_skip -= 1;
                    self.skipped += 1;
                }
                Err(e) => return Some(Err(e)),
            }
        }
        let item = self.inner.next()?;
        if let Some(r) = self.remaining.as_mut() {
            *r -= 1;
        }
        Some(item)
    }
}
