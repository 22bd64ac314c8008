//! Persistent rich-text document model.
//!
//! A document is a [`BlockList`]: blocks of text, each covered by a
//! [`SpanList`] of formatted [`Span`]s. A [`Selection`] addresses text across
//! blocks, and every edit is a pure function returning a new value; inputs
//! are never mutated and unchanged parts are shared.
//!
//! ```ignore
//! use the_richtext::{BlockList, EditorState, Format, Selection};
//!
//! let state = EditorState::new(
//!   Selection::new(0, 0, 0, 5)?,
//!   BlockList::with_text("Hello world"),
//! );
//! let state = state.add_format_to_selection(Format::new("b")?);
//! assert!(state.format_names_in_selection().contains("b"));
//! ```

use smartstring::{LazyCompact, SmartString};

pub mod block;
pub mod block_list;
pub mod document;
pub mod editor_state;
pub mod format;
pub mod options;
pub mod range;
pub mod selection;
pub mod span;
pub mod span_list;

pub type Tendril = SmartString<LazyCompact>;

pub use block::Block;
pub use block_list::BlockList;
pub use editor_state::EditorState;
pub use format::Format;
pub use options::EditOptions;
pub use range::Range;
pub use selection::Selection;
pub use span::Span;
pub use span_list::SpanList;
