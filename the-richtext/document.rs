//! Loading and saving documents as JSON.
//!
//! A document is a JSON array of blocks:
//!
//! ```json
//! [
//!   {
//!     "text": "Lorem ipsum",
//!     "spans": [
//!       { "start": 0, "end": 6, "formats": {} },
//!       { "start": 6, "end": 11, "formats": { "b": { "name": "b", "data": {} } } }
//!     ]
//!   }
//! ]
//! ```
//!
//! Offsets count chars. Every constructor's validation runs while loading, so
//! a document that loads is a valid [`BlockList`].

use serde_json::Value;
use thiserror::Error;

use crate::block_list::BlockList;

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
  #[error("invalid document: {0}")]
  Invalid(#[from] serde_json::Error),
}

pub fn from_json(source: &str) -> Result<BlockList> {
  serde_json::from_str(source).map_err(|err| {
    tracing::debug!(%err, "failed to load document");
    DocumentError::Invalid(err)
  })
}

pub fn from_value(value: Value) -> Result<BlockList> {
  serde_json::from_value(value).map_err(|err| {
    tracing::debug!(%err, "failed to load document");
    DocumentError::Invalid(err)
  })
}

pub fn to_json(blocks: &BlockList) -> Result<String> {
  Ok(serde_json::to_string(blocks)?)
}

pub fn to_value(blocks: &BlockList) -> Result<Value> {
  Ok(serde_json::to_value(blocks)?)
}
