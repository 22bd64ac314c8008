//! Behaviour switches for [`EditorState`] operations.
//!
//! ```toml
//! paste-merges-edges  = true
//! lazy-format-removal = false
//! ```
//!
//! [`EditorState`]: crate::editor_state::EditorState

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptionsError {
  #[error("failed to parse edit options: {0}")]
  Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct EditOptions {
  /// Pasting joins the first pasted block onto the block before the caret
  /// and the last pasted block onto the block after it.
  pub paste_merges_edges:  bool,
  /// Removing a format also strips it from spans that only partly overlap
  /// the selection.
  pub lazy_format_removal: bool,
}

impl Default for EditOptions {
  fn default() -> Self {
    Self {
      paste_merges_edges:  true,
      lazy_format_removal: true,
    }
  }
}

impl EditOptions {
  pub fn from_toml(source: &str) -> Result<Self, OptionsError> {
    Ok(toml::from_str(source)?)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn defaults() {
    let options = EditOptions::from_toml("").unwrap();
    assert_eq!(options, EditOptions::default());
    assert!(options.paste_merges_edges);
    assert!(options.lazy_format_removal);
  }

  #[test]
  fn partial_override() {
    let options = EditOptions::from_toml("lazy-format-removal = false").unwrap();
    assert!(options.paste_merges_edges);
    assert!(!options.lazy_format_removal);
  }

  #[test]
  fn rejects_bad_input() {
    assert!(matches!(
      EditOptions::from_toml("paste-merges-edges = 3"),
      Err(OptionsError::Parse(_))
    ));
    assert!(EditOptions::from_toml("unknown-key = true").is_err());
  }
}
