use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::Tendril;

/// Free-form payload attached to a format (a link target, a color, ...).
/// The core carries it around but never looks inside.
pub type FormatData = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatError {
  #[error("format name must not be empty")]
  EmptyName,
}

/// A named piece of formatting such as `b` or `link`.
///
/// Spans compare formats by name only; `data` travels along unexamined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFormat")]
pub struct Format {
  name: Tendril,
  data: FormatData,
}

#[derive(Deserialize)]
struct RawFormat {
  name: Tendril,
  #[serde(default)]
  data: FormatData,
}

impl TryFrom<RawFormat> for Format {
  type Error = FormatError;

  fn try_from(raw: RawFormat) -> Result<Self, FormatError> {
    Format::with_data(raw.name, raw.data)
  }
}

impl Format {
  pub fn new(name: impl Into<Tendril>) -> Result<Self, FormatError> {
    Self::with_data(name, FormatData::new())
  }

  pub fn with_data(name: impl Into<Tendril>, data: FormatData) -> Result<Self, FormatError> {
    let name = name.into();
    if name.is_empty() {
      return Err(FormatError::EmptyName);
    }
    Ok(Self { name, data })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn data(&self) -> &FormatData {
    &self.data
  }
}
