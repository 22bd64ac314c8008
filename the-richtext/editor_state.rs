//! An editing session: a document plus the selection the user is acting on.
//!
//! Every operation returns a new [`EditorState`] with both the edited blocks
//! and the selection moved to where a caret would end up after the edit.

use std::collections::BTreeSet;

use crate::{
  Tendril,
  block_list::BlockList,
  format::Format,
  options::EditOptions,
  selection::Selection,
  span::Span,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
  selection: Selection,
  blocks:    BlockList,
}

impl EditorState {
  pub fn new(selection: Selection, blocks: BlockList) -> Self {
    Self { selection, blocks }
  }

  /// Caret at the document start.
  pub fn with_blocks(blocks: BlockList) -> Self {
    Self::new(Selection::default(), blocks)
  }

  #[inline]
  pub fn selection(&self) -> Selection {
    self.selection
  }

  #[inline]
  pub fn blocks(&self) -> &BlockList {
    &self.blocks
  }

  #[must_use]
  pub fn set_selection(&self, selection: Selection) -> Self {
    Self::new(selection, self.blocks.clone())
  }

  #[must_use]
  pub fn set_blocks(&self, blocks: BlockList) -> Self {
    Self::new(self.selection, blocks)
  }

  pub fn remove_selection(&self) -> Self {
    tracing::trace!(selection = ?self.selection, "remove selection");
    Self::new(
      self.selection.collapse_to_start(),
      self.blocks.remove_selection(self.selection),
    )
  }

  /// The selected content as a session of its own, caret at its start.
  pub fn copy_selection(&self) -> Self {
    Self::with_blocks(self.blocks.copy_selection(self.selection))
  }

  pub fn paste_after_selection(&self, pasted: &Self) -> Self {
    self.paste_after_selection_with_options(pasted, &EditOptions::default())
  }

  /// Replaces the selection with `pasted`'s blocks and leaves the caret right
  /// after the pasted content.
  pub fn paste_after_selection_with_options(&self, pasted: &Self, options: &EditOptions) -> Self {
    tracing::trace!(selection = ?self.selection, blocks = pasted.blocks.len(), "paste");

    let merge = options.paste_merges_edges;
    let selection = self.selection;
    let head = self.blocks.copy_selection(Selection::new_unchecked(
      0,
      0,
      selection.start_index(),
      selection.start_offset(),
    ));
    let tail = self.blocks.copy_selection(Selection::new_unchecked(
      selection.end_index(),
      selection.end_offset(),
      self.blocks.last_index(),
      self.blocks.last().len_chars(),
    ));

    let head = head.append(merge, &pasted.blocks);
    let caret = selection.collapse_to(head.last_index(), head.last().len_chars());
    Self::new(caret, head.append(merge, &tail))
  }

  /// Enter: a new empty block at either end of the caret's block, or a split
  /// in its middle. The caret moves to the start of the following block.
  pub fn insert_or_split_block_after_selection(&self) -> Self {
    tracing::trace!(selection = ?self.selection, "insert or split block");

    let selection = self.selection;
    let blocks = if selection.is_collapsed_at_block_end(&self.blocks) {
      self.blocks.insert_empty_block_after_selection(selection)
    } else if selection.is_collapsed_at_block_start() {
      self.blocks.insert_empty_block_before_selection(selection)
    } else {
      self.blocks.split_block_after_selection(selection)
    };
    Self::new(selection.collapse_to(selection.end_index() + 1, 0), blocks)
  }

  pub fn insert_text_after_selection(&self, text: &str) -> Self {
    let selection = self.selection;
    let inserted = text.chars().count();
    Self::new(
      selection.collapse_to(selection.end_index(), selection.end_offset() + inserted),
      self.blocks.insert_text_after_selection(text, selection),
    )
  }

  /// Backspace.
  pub fn remove_char_before_selection(&self) -> Self {
    let selection = self.selection;
    let blocks = self.blocks.remove_char_before_selection(selection);

    let caret = if selection.collapse_to_start().is_collapsed_at_document_start() {
      selection
    } else if selection.start_offset() == 0 {
      let previous = selection.start_index() - 1;
      let len = self.blocks.get(previous).map_or(0, |block| block.len_chars());
      selection.collapse_to(previous, len)
    } else {
      selection.collapse_to(selection.start_index(), selection.start_offset() - 1)
    };
    Self::new(caret, blocks)
  }

  /// Delete.
  pub fn remove_char_after_selection(&self) -> Self {
    Self::new(
      self.selection.collapse_to_end(),
      self.blocks.remove_char_after_selection(self.selection),
    )
  }

  /// Applies `format` to exactly the selected text.
  pub fn add_format_to_selection(&self, format: Format) -> Self {
    tracing::trace!(selection = ?self.selection, format = format.name(), "add format");

    let blocks = self
      .blocks
      .split_spans_at_selection(self.selection)
      .map_spans_in_selection(false, |span| span.add_format(format.clone()), self.selection);
    self.set_blocks(blocks)
  }

  pub fn remove_format_from_selection(&self, name: &str) -> Self {
    self.remove_format_from_selection_with_options(name, &EditOptions::default())
  }

  pub fn remove_format_from_selection_with_options(
    &self,
    name: &str,
    options: &EditOptions,
  ) -> Self {
    tracing::trace!(selection = ?self.selection, format = name, "remove format");

    let blocks = self.blocks.map_spans_in_selection(
      options.lazy_format_removal,
      |span| span.remove_format(name),
      self.selection,
    );
    self.set_blocks(blocks)
  }

  /// Names of every format touching the selection.
  pub fn format_names_in_selection(&self) -> BTreeSet<Tendril> {
    self.blocks.reduce_spans_in_selection(
      true,
      |mut names: BTreeSet<Tendril>, span: &Span| {
        names.extend(span.format_names().cloned());
        names
      },
      BTreeSet::new(),
      self.selection,
    )
  }

  /// `other`'s blocks after ours; the caret goes to the end of our content.
  pub fn append(&self, merge_edges: bool, other: &Self) -> Self {
    Self::new(
      self.selection.collapse_to_document_end(&self.blocks),
      self.blocks.append(merge_edges, &other.blocks),
    )
  }

  /// `other`'s blocks before ours; the caret goes to the end of `other`'s
  /// content.
  pub fn prepend(&self, merge_edges: bool, other: &Self) -> Self {
    other.append(merge_edges, self)
  }
}
