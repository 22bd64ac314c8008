//! A range of block text labeled with a set of formats.

use std::collections::{
  BTreeMap,
  BTreeSet,
};

use serde::{
  Deserialize,
  Serialize,
  Serializer,
  ser::SerializeStruct,
};

use crate::{
  Tendril,
  format::Format,
  range::{
    Range,
    RangeError,
  },
};

/// Formats keyed by name. Ordered so that name sets compare cheaply.
pub type FormatMap = BTreeMap<Tendril, Format>;

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct Span {
  range:   Range,
  formats: FormatMap,
}

#[derive(Deserialize)]
struct RawSpan {
  start:   usize,
  end:     usize,
  #[serde(default)]
  formats: BTreeMap<String, Format>,
}

impl TryFrom<RawSpan> for Span {
  type Error = RangeError;

  fn try_from(raw: RawSpan) -> Result<Self, RangeError> {
    let range = Range::new(raw.start, raw.end)?;
    // The format's own name is authoritative over the map key.
    let formats = raw
      .formats
      .into_values()
      .map(|format| (Tendril::from(format.name()), format))
      .collect();
    Ok(Self { range, formats })
  }
}

impl Serialize for Span {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Span", 3)?;
    state.serialize_field("start", &self.range.start())?;
    state.serialize_field("end", &self.range.end())?;
    state.serialize_field("formats", &self.formats)?;
    state.end()
  }
}

impl Span {
  pub fn new(range: Range) -> Self {
    Self {
      range,
      formats: FormatMap::new(),
    }
  }

  pub fn with_formats(range: Range, formats: impl IntoIterator<Item = Format>) -> Self {
    let formats = formats
      .into_iter()
      .map(|format| (Tendril::from(format.name()), format))
      .collect();
    Self { range, formats }
  }

  #[inline]
  pub fn range(&self) -> Range {
    self.range
  }

  #[inline]
  pub fn start(&self) -> usize {
    self.range.start()
  }

  #[inline]
  pub fn end(&self) -> usize {
    self.range.end()
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.range.len()
  }

  /// Zero-length spans carry no text and are dropped by normalization.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.range.is_empty()
  }

  pub fn formats(&self) -> &FormatMap {
    &self.formats
  }

  pub fn format(&self, name: &str) -> Option<&Format> {
    self.formats.get(name)
  }

  pub fn has_format(&self, name: &str) -> bool {
    self.formats.contains_key(name)
  }

  pub fn format_names(&self) -> impl Iterator<Item = &Tendril> {
    self.formats.keys()
  }

  pub fn format_name_set(&self) -> BTreeSet<Tendril> {
    self.formats.keys().cloned().collect()
  }

  /// Format equality is by name only.
  pub fn same_formats(&self, other: &Self) -> bool {
    self.formats.len() == other.formats.len() && self.formats.keys().eq(other.formats.keys())
  }

  /// Adds `format`, replacing any format with the same name.
  #[must_use]
  pub fn add_format(&self, format: Format) -> Self {
    let mut formats = self.formats.clone();
    formats.insert(Tendril::from(format.name()), format);
    Self {
      range: self.range,
      formats,
    }
  }

  #[must_use]
  pub fn remove_format(&self, name: &str) -> Self {
    if !self.has_format(name) {
      return self.clone();
    }
    let mut formats = self.formats.clone();
    formats.remove(name);
    Self {
      range: self.range,
      formats,
    }
  }

  // Range edits. Callers keep the result valid (`start <= end`).
  //

  #[must_use]
  pub(crate) fn with_range(&self, range: Range) -> Self {
    Self {
      range,
      formats: self.formats.clone(),
    }
  }

  #[must_use]
  pub(crate) fn with_start(&self, start: usize) -> Self {
    self.with_range(self.range.with_start(start))
  }

  #[must_use]
  pub(crate) fn with_end(&self, end: usize) -> Self {
    self.with_range(self.range.with_end(end))
  }

  #[must_use]
  pub(crate) fn shift_right(&self, delta: usize) -> Self {
    self.with_range(self.range.shift_right(delta))
  }

  #[must_use]
  pub(crate) fn shift_left(&self, delta: usize) -> Self {
    self.with_range(self.range.shift_left(delta))
  }
}
