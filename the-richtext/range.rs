//! Half-open character intervals and how two of them relate.
//!
//! A [`Range`] is `[start, end)` over char offsets of a block's text. Every
//! span algorithm in this crate is a case split over how a span's range (the
//! *subject*) sits relative to the range an operation targets (the *probe*).
//! The predicates below are methods on the subject taking the probe:
//!
//! ```text
//! probe:              [====)
//! is_before:   [==)                    subject ends at or before probe start
//! is_after:                  [==)      subject starts after probe start and at or after its end
//! is_inside:             [=)           strictly within the probe
//! contains:         [==========)       strictly around the probe
//! intersects_start:   [====)           crosses the probe's start edge
//! intersects_end:           [====)     crosses the probe's end edge
//! ```
//!
//! [`Range::overlap`] folds these into a single total [`Overlap`] in the
//! precedence the span algorithms evaluate them.

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RangeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RangeError {
  #[error("invalid range: start {start} is after end {end}")]
  Inverted { start: usize, end: usize },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct Range {
  start: usize,
  end:   usize,
}

#[derive(Deserialize)]
struct RawRange {
  start: usize,
  end:   usize,
}

impl TryFrom<RawRange> for Range {
  type Error = RangeError;

  fn try_from(raw: RawRange) -> Result<Self> {
    Range::new(raw.start, raw.end)
  }
}

/// Where a subject range sits relative to a probe range.
///
/// Variants are listed in evaluation order: a subject equal to the probe is
/// [`Overlap::Covered`], not [`Overlap::Covering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
  Before,
  After,
  /// Inside the probe or equal to it.
  Covered,
  /// Around the probe or equal to it.
  Covering,
  OverlapsStart,
  OverlapsEnd,
}

impl Range {
  pub fn new(start: usize, end: usize) -> Result<Self> {
    if start > end {
      return Err(RangeError::Inverted { start, end });
    }
    Ok(Self { start, end })
  }

  /// Callers must guarantee `start <= end`.
  #[inline]
  pub(crate) fn new_unchecked(start: usize, end: usize) -> Self {
    debug_assert!(start <= end, "range {start}..{end} is inverted");
    Self { start, end }
  }

  #[inline]
  pub fn point(offset: usize) -> Self {
    Self {
      start: offset,
      end:   offset,
    }
  }

  #[inline]
  #[must_use]
  pub fn start(&self) -> usize {
    self.start
  }

  #[inline]
  #[must_use]
  pub fn end(&self) -> usize {
    self.end
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.end - self.start
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  // Relations. `self` is the subject, `probe` the range an operation targets.
  //

  #[inline]
  pub fn is_before(&self, probe: &Self) -> bool {
    probe.start >= self.end
  }

  /// Identical ranges are neither before nor after each other.
  #[inline]
  pub fn is_after(&self, probe: &Self) -> bool {
    probe.end <= self.start && probe.start < self.start
  }

  #[inline]
  pub fn is_inside(&self, probe: &Self) -> bool {
    probe.start < self.start && probe.end > self.end
  }

  #[inline]
  pub fn is_inside_or_equal(&self, probe: &Self) -> bool {
    probe.start <= self.start && probe.end >= self.end
  }

  #[inline]
  pub fn contains(&self, probe: &Self) -> bool {
    self.start < probe.start && self.end > probe.end
  }

  #[inline]
  pub fn contains_or_equal(&self, probe: &Self) -> bool {
    self.start <= probe.start && self.end >= probe.end
  }

  /// Crosses the probe's start edge without covering all of it.
  #[inline]
  pub fn intersects_start(&self, probe: &Self) -> bool {
    probe.start >= self.start && probe.end > self.end && probe.start < self.end
  }

  /// Crosses the probe's end edge without covering all of it.
  #[inline]
  pub fn intersects_end(&self, probe: &Self) -> bool {
    probe.start <= self.start && probe.end < self.end && probe.end > self.start
  }

  pub fn overlap(&self, probe: &Self) -> Overlap {
    if self.is_before(probe) {
      Overlap::Before
    } else if self.is_after(probe) {
      Overlap::After
    } else if self.is_inside_or_equal(probe) {
      Overlap::Covered
    } else if self.contains_or_equal(probe) {
      Overlap::Covering
    } else if self.intersects_start(probe) {
      Overlap::OverlapsStart
    } else {
      // Whatever survives the checks above crosses the probe's end edge.
      debug_assert!(self.intersects_end(probe));
      Overlap::OverlapsEnd
    }
  }

  // Derived ranges.
  //

  #[must_use]
  pub(crate) fn with_start(self, start: usize) -> Self {
    Self::new_unchecked(start, self.end)
  }

  #[must_use]
  pub(crate) fn with_end(self, end: usize) -> Self {
    Self::new_unchecked(self.start, end)
  }

  /// Move both bounds right by `delta`.
  #[must_use]
  pub(crate) fn shift_right(self, delta: usize) -> Self {
    Self::new_unchecked(self.start + delta, self.end + delta)
  }

  /// Move both bounds left by `delta`. `delta` must not exceed `start`.
  #[must_use]
  pub(crate) fn shift_left(self, delta: usize) -> Self {
    Self::new_unchecked(self.start - delta, self.end - delta)
  }
}

impl From<Range> for std::ops::Range<usize> {
  fn from(range: Range) -> Self {
    range.start..range.end
  }
}
