//! A paragraph of text together with the spans that format it.

use ropey::Rope;
use serde::{
  Deserialize,
  Serialize,
  Serializer,
  ser::SerializeStruct,
};
use thiserror::Error;

use crate::{
  range::Range,
  span::Span,
  span_list::{
    SpanList,
    SpanListError,
  },
};

pub type Result<T> = std::result::Result<T, BlockError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlockError {
  #[error("spans cover {spans} chars but the text has {text}")]
  LengthMismatch { text: usize, spans: usize },
  #[error(transparent)]
  Spans(#[from] SpanListError),
}

/// Text plus the [`SpanList`] covering exactly its chars.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct Block {
  text:  Rope,
  spans: SpanList,
}

#[derive(Deserialize)]
struct RawBlock {
  text:  String,
  spans: Vec<Span>,
}

impl TryFrom<RawBlock> for Block {
  type Error = BlockError;

  fn try_from(raw: RawBlock) -> Result<Self> {
    Block::from_parts(Rope::from(raw.text), SpanList::new(raw.spans)?)
  }
}

impl Serialize for Block {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Block", 2)?;
    state.serialize_field("text", &self.text.to_string())?;
    state.serialize_field("spans", self.spans.as_slice())?;
    state.end()
  }
}

impl Block {
  pub fn new() -> Self {
    Self::default()
  }

  /// Unformatted text.
  pub fn with_text(text: &str) -> Self {
    let text = Rope::from_str(text);
    let spans = SpanList::with_len(text.len_chars());
    Self { text, spans }
  }

  pub fn from_parts(text: Rope, spans: SpanList) -> Result<Self> {
    if text.len_chars() != spans.len_chars() {
      return Err(BlockError::LengthMismatch {
        text:  text.len_chars(),
        spans: spans.len_chars(),
      });
    }
    Ok(Self { text, spans })
  }

  fn from_parts_unchecked(text: Rope, spans: SpanList) -> Self {
    debug_assert_eq!(text.len_chars(), spans.len_chars());
    Self { text, spans }
  }

  #[inline]
  pub fn text(&self) -> &Rope {
    &self.text
  }

  #[inline]
  pub fn spans(&self) -> &SpanList {
    &self.spans
  }

  #[inline]
  pub fn len_chars(&self) -> usize {
    self.text.len_chars()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.text.len_chars() == 0 && self.spans.is_empty()
  }

  /// Inserts `text` at the end of `range`; the span holding that point grows.
  pub fn insert_text_after_range(&self, text: &str, range: Range) -> Self {
    let inserted = Rope::from_str(text);
    let delta = inserted.len_chars();
    if delta == 0 {
      return self.clone();
    }

    let mut rope = self.text.clone();
    rope.insert(range.end(), text);
    Self::from_parts_unchecked(rope, self.spans.offset_after_range(delta, range))
  }

  pub fn remove_range(&self, range: Range) -> Self {
    let mut text = self.text.clone();
    text.remove(std::ops::Range::from(range));
    Self::from_parts_unchecked(text, self.spans.remove_range(range).normalize())
  }

  /// The chars under `range` as a standalone block.
  pub fn copy_range(&self, range: Range) -> Self {
    let text = Rope::from(self.text.slice(std::ops::Range::from(range)));
    Self::from_parts_unchecked(text, self.spans.copy_range(range).normalize())
  }

  pub fn split_spans_at_range(&self, range: Range) -> Self {
    Self::from_parts_unchecked(self.text.clone(), self.spans.split_at_range(range))
  }

  pub fn map_spans_in_range<F>(&self, lazy: bool, f: F, range: Range) -> Self
  where
    F: FnMut(&Span) -> Span,
  {
    Self::from_parts_unchecked(
      self.text.clone(),
      self.spans.map_in_range(lazy, f, range).normalize(),
    )
  }

  pub fn map_spans<F>(&self, f: F) -> Self
  where
    F: FnMut(&Span) -> Span,
  {
    Self::from_parts_unchecked(self.text.clone(), self.spans.map(f).normalize())
  }

  pub fn reduce_spans_in_range<T, F>(&self, lazy: bool, f: F, init: T, range: Range) -> T
  where
    F: FnMut(T, &Span) -> T,
  {
    self.spans.reduce_in_range(lazy, f, init, range)
  }

  pub fn reduce_spans<T, F>(&self, mut f: F, init: T) -> T
  where
    F: FnMut(T, &Span) -> T,
  {
    self.spans.iter().fold(init, |acc, span| f(acc, span))
  }

  /// `self` followed by `other`.
  pub fn append(&self, other: &Self) -> Self {
    let mut text = self.text.clone();
    text.append(other.text.clone());
    Self::from_parts_unchecked(text, self.spans.append(&other.spans).normalize())
  }

  /// `other` followed by `self`.
  pub fn prepend(&self, other: &Self) -> Self {
    other.append(self)
  }
}
