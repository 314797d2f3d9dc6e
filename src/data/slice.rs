use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// RowSlice – start / stop / step row selection
// ---------------------------------------------------------------------------

/// A half-open row selection with optional step.
///
/// Every bound is optional and may be negative, in which case it counts from
/// the end of the sequence. Omitted bounds take the usual defaults, which
/// depend on the sign of the step:
///
/// * positive step: `start = 0`, `stop = len`
/// * negative step: `start = len - 1`, `stop` = just before the first row
///
/// Out-of-range bounds are clamped, never rejected. Only a zero step is an
/// error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSlice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl RowSlice {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// Select every row.
    pub fn full() -> Self {
        Self::default()
    }

    pub fn range(start: isize, stop: isize) -> Self {
        Self::new(Some(start), Some(stop), None)
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Resolve the slice against a sequence of `len` rows and return the
    /// selected row positions in iteration order.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(Error::ZeroSliceStep);
        }

        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };

        let clamp = |bound: isize| -> isize {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = self
            .start
            .map(clamp)
            .unwrap_or(if step < 0 { upper } else { lower });
        let stop = self
            .stop
            .map(clamp)
            .unwrap_or(if step < 0 { lower } else { upper });

        let mut out = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            out.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
        Ok(out)
    }
}

impl From<Range<usize>> for RowSlice {
    fn from(r: Range<usize>) -> Self {
        Self::range(r.start as isize, r.end as isize)
    }
}

impl From<RangeFrom<usize>> for RowSlice {
    fn from(r: RangeFrom<usize>) -> Self {
        Self::new(Some(r.start as isize), None, None)
    }
}

impl From<RangeTo<usize>> for RowSlice {
    fn from(r: RangeTo<usize>) -> Self {
        Self::new(None, Some(r.end as isize), None)
    }
}

impl From<RangeFull> for RowSlice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}
