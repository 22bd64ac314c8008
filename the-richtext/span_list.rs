//! Ordered, gap-free formatting spans covering a block's text.
//!
//! A [`SpanList`] always holds at least one [`Span`]. Spans are contiguous and
//! ascending: the first starts at 0 and each one starts where the previous
//! ended, so [`SpanList::len_chars`] is the end of the last span. Empty text is
//! represented by the single zero-length span `[0, 0)`.
//!
//! # Range Operations
//!
//! Every range operation walks the spans left to right and decides per span
//! from [`Range::overlap`] of the span's range against the target range:
//!
//! | overlap         | remove                  | copy                    | split                |
//! |-----------------|-------------------------|-------------------------|----------------------|
//! | `Before`        | keep                    | drop                    | keep                 |
//! | `After`         | shift left by length    | drop                    | keep                 |
//! | `Covered`       | drop                    | rebase to range start   | keep                 |
//! | `Covering`      | shorten by length       | collapse to `[0, len)`  | cut at start and end |
//! | `OverlapsStart` | clip end to range start | clip and rebase         | cut at range start   |
//! | `OverlapsEnd`   | clip start, shift left  | clip and rebase         | cut at range end     |
//!
//! Results of remove and copy may contain zero-length spans or neighbours with
//! identical formats; [`SpanList::normalize`] folds those away.
//!
//! # Identity
//!
//! Lists share their storage. [`SpanList::normalize`] hands back the very same
//! list when there is nothing to fold, which [`SpanList::ptr_eq`] can detect.

use std::sync::Arc;

use smallvec::{
  SmallVec,
  smallvec,
};
use thiserror::Error;

use crate::{
  range::{
    Overlap,
    Range,
  },
  span::Span,
};

pub type Result<T> = std::result::Result<T, SpanListError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpanListError {
  #[error("span list must contain at least one span")]
  Empty,
  #[error("span {index} starts at {actual}, expected {expected}")]
  Gap {
    index:    usize,
    expected: usize,
    actual:   usize,
  },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpanList {
  spans: Arc<[Span]>,
}

impl Default for SpanList {
  fn default() -> Self {
    Self {
      spans: Arc::from([Span::default()]),
    }
  }
}

impl SpanList {
  /// Validates that `spans` is non-empty, starts at 0 and has no gaps.
  pub fn new(spans: Vec<Span>) -> Result<Self> {
    if spans.is_empty() {
      return Err(SpanListError::Empty);
    }

    let mut expected = 0;
    for (index, span) in spans.iter().enumerate() {
      if span.start() != expected {
        return Err(SpanListError::Gap {
          index,
          expected,
          actual: span.start(),
        });
      }
      expected = span.end();
    }

    Ok(Self {
      spans: Arc::from(spans),
    })
  }

  /// A single plain span covering `len` chars.
  pub fn with_len(len: usize) -> Self {
    Self {
      spans: Arc::from([Span::new(Range::new_unchecked(0, len))]),
    }
  }

  /// Builds a list from spans produced by one of the range operations. An
  /// empty result becomes the empty-text list.
  fn from_spans(spans: Vec<Span>) -> Self {
    if spans.is_empty() {
      return Self::default();
    }
    debug_assert!(Self::new(spans.clone()).is_ok(), "broken span list: {spans:?}");
    Self {
      spans: Arc::from(spans),
    }
  }

  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.spans, &other.spans)
  }

  #[inline]
  pub fn as_slice(&self) -> &[Span] {
    &self.spans
  }

  #[inline]
  pub fn iter(&self) -> std::slice::Iter<'_, Span> {
    self.spans.iter()
  }

  /// Number of spans.
  #[inline]
  pub fn len(&self) -> usize {
    self.spans.len()
  }

  #[inline]
  pub fn get(&self, index: usize) -> Option<&Span> {
    self.spans.get(index)
  }

  #[inline]
  pub fn first(&self) -> &Span {
    &self.spans[0]
  }

  #[inline]
  pub fn last(&self) -> &Span {
    &self.spans[self.spans.len() - 1]
  }

  /// Number of chars covered, i.e. the end of the last span.
  #[inline]
  pub fn len_chars(&self) -> usize {
    self.last().end()
  }

  /// True for the single zero-length span that stands for empty text.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.spans.len() == 1 && self.first().is_empty()
  }

  // Range operations.
  //

  pub fn remove_range(&self, range: Range) -> Self {
    let len = range.len();
    let mut spans = Vec::with_capacity(self.spans.len());

    for span in self.iter() {
      match span.range().overlap(&range) {
        Overlap::Before => spans.push(span.clone()),
        Overlap::After => spans.push(span.shift_left(len)),
        Overlap::Covered => {},
        Overlap::Covering => spans.push(span.with_end(span.end() - len)),
        Overlap::OverlapsStart => spans.push(span.with_end(range.start())),
        Overlap::OverlapsEnd => {
          spans.push(span.with_range(Range::new_unchecked(range.start(), span.end() - len)))
        },
      }
    }

    Self::from_spans(spans)
  }

  /// Copies the spans under `range`, rebased so the copy starts at 0.
  pub fn copy_range(&self, range: Range) -> Self {
    let base = range.start();
    let mut spans = Vec::new();

    for span in self.iter() {
      match span.range().overlap(&range) {
        Overlap::Before | Overlap::After => {},
        Overlap::Covered => spans.push(span.shift_left(base)),
        Overlap::Covering => spans.push(span.with_range(Range::new_unchecked(0, range.len()))),
        Overlap::OverlapsStart => {
          spans.push(span.with_range(Range::new_unchecked(0, span.end() - base)))
        },
        Overlap::OverlapsEnd => {
          spans.push(span.with_range(Range::new_unchecked(span.start() - base, range.len())))
        },
      }
    }

    Self::from_spans(spans)
  }

  /// Cuts spans so that `range.start()` and `range.end()` fall on span
  /// boundaries. Text length and the formatting at every offset stay the same.
  pub fn split_at_range(&self, range: Range) -> Self {
    let mut spans = Vec::with_capacity(self.spans.len() + 2);

    for span in self.iter() {
      let pieces: SmallVec<[Span; 3]> = match span.range().overlap(&range) {
        Overlap::Before | Overlap::After | Overlap::Covered => smallvec![span.clone()],
        Overlap::OverlapsStart => {
          smallvec![span.with_end(range.start()), span.with_start(range.start())]
        },
        Overlap::OverlapsEnd => smallvec![span.with_end(range.end()), span.with_start(range.end())],
        Overlap::Covering => {
          smallvec![
            span.with_end(range.start()),
            span.with_range(range),
            span.with_start(range.end()),
          ]
        },
      };
      let before = spans.len();
      spans.extend(pieces.into_iter().filter(|piece| !piece.is_empty()));
      if spans.len() == before {
        // A zero-length span stays as it was.
        spans.push(span.clone());
      }
    }

    Self::from_spans(spans)
  }

  /// Accounts for `delta` chars inserted at the end of `range`.
  ///
  /// The last span containing the range (and any span crossing its end) grows
  /// by `delta`; spans after the range move right by `delta`. With a collapsed
  /// range the result always stays contiguous.
  pub fn offset_after_range(&self, delta: usize, range: Range) -> Self {
    if delta == 0 {
      return self.clone();
    }

    let last_containing = self
      .iter()
      .rposition(|span| span.range().contains_or_equal(&range));

    let spans = self
      .iter()
      .enumerate()
      .map(|(index, span)| {
        if span.range().intersects_end(&range) || Some(index) == last_containing {
          span.with_end(span.end() + delta)
        } else if span.range().is_after(&range) {
          span.shift_right(delta)
        } else {
          span.clone()
        }
      })
      .collect();

    Self::from_spans_unchecked(spans)
  }

  /// Applies `f` to every span inside (or equal to) `range`. With `lazy` set,
  /// spans that contain the range or straddle one of its edges are mapped too.
  pub fn map_in_range<F>(&self, lazy: bool, mut f: F, range: Range) -> Self
  where
    F: FnMut(&Span) -> Span,
  {
    let spans = self
      .iter()
      .map(|span| {
        if is_in_range(lazy, &range, span) {
          f(span)
        } else {
          span.clone()
        }
      })
      .collect();
    Self::from_spans_unchecked(spans)
  }

  /// Applies `f` to every span.
  pub fn map<F>(&self, f: F) -> Self
  where
    F: FnMut(&Span) -> Span,
  {
    Self::from_spans_unchecked(self.iter().map(f).collect())
  }

  /// Folds the spans selected by the same rule as [`SpanList::map_in_range`].
  pub fn reduce_in_range<T, F>(&self, lazy: bool, mut f: F, init: T, range: Range) -> T
  where
    F: FnMut(T, &Span) -> T,
  {
    self
      .iter()
      .filter(|span| is_in_range(lazy, &range, span))
      .fold(init, |acc, span| f(acc, span))
  }

  /// `self` followed by `other`, whose spans are moved past `self`'s end.
  pub fn append(&self, other: &Self) -> Self {
    let offset = self.len_chars();
    let mut spans = Vec::with_capacity(self.len() + other.len());
    spans.extend(self.iter().cloned());
    spans.extend(other.iter().map(|span| span.shift_right(offset)));
    Self::from_spans_unchecked(spans)
  }

  /// `other` followed by `self`.
  pub fn prepend(&self, other: &Self) -> Self {
    other.append(self)
  }

  /// Drops zero-length spans and merges neighbours with the same format
  /// names. Returns `self` untouched when there is nothing to fold.
  pub fn normalize(&self) -> Self {
    if self.is_empty() {
      return self.clone();
    }

    let mut spans: Vec<Span> = Vec::with_capacity(self.spans.len());
    let mut changed = false;

    for span in self.iter() {
      if span.is_empty() {
        changed = true;
        continue;
      }
      match spans.last_mut() {
        Some(previous) if previous.same_formats(span) => {
          *previous = previous.with_end(span.end());
          changed = true;
        },
        _ => spans.push(span.clone()),
      }
    }

    if !changed {
      return self.clone();
    }
    Self::from_spans(spans)
  }

  /// No contiguity check: mappers and offsets are trusted to keep ranges
  /// in place.
  fn from_spans_unchecked(spans: Vec<Span>) -> Self {
    if spans.is_empty() {
      return Self::default();
    }
    Self {
      spans: Arc::from(spans),
    }
  }
}

fn is_in_range(lazy: bool, range: &Range, span: &Span) -> bool {
  let subject = span.range();
  subject.is_inside_or_equal(range)
    || (lazy
      && (subject.contains_or_equal(range)
        || subject.intersects_start(range)
        || subject.intersects_end(range)))
}

impl<'a> IntoIterator for &'a SpanList {
  type Item = &'a Span;
  type IntoIter = std::slice::Iter<'a, Span>;

  fn into_iter(self) -> Self::IntoIter {
    self.spans.iter()
  }
}
