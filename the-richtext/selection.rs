//! Addressing a range of text that may run across several blocks.
//!
//! A [`Selection`] is a `(block index, char offset)` pair at each end. The
//! start never comes after the end; when both ends are equal the selection is
//! a caret.
//!
//! ```text
//! block 0: "Lorem ip[sum"        start = (0, 8)
//! block 1: "dolor sit"           inner block
//! block 2: "ame]t"               end   = (2, 3)
//! ```
//!
//! Every selection-scoped operation on a [`BlockList`] asks
//! [`Selection::coverage`] how a block relates to the selection and acts on
//! the returned [`Coverage`].
//!
//! The [`Rect`] carried by a selection is screen geometry owned by whoever
//! renders it. No operation in this crate reads it.
//!
//! [`BlockList`]: crate::block_list::BlockList

use thiserror::Error;

use crate::{
  block_list::BlockList,
  range::Range,
};

pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
  #[error("selection start ({start_index}, {start_offset}) is after its end ({end_index}, {end_offset})")]
  Inverted {
    start_index:  usize,
    start_offset: usize,
    end_index:    usize,
    end_offset:   usize,
  },
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
  pub left:   f32,
  pub top:    f32,
  pub right:  f32,
  pub bottom: f32,
  pub width:  f32,
  pub height: f32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Selection {
  start_index:  usize,
  start_offset: usize,
  end_index:    usize,
  end_offset:   usize,
  rect:         Rect,
}

/// How one block relates to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
  /// Start and end both fall in this block.
  Within(Range),
  /// The selection starts here and continues into later blocks.
  Start(Range),
  /// The selection ends here after starting in an earlier block.
  End(Range),
  /// Strictly between the start and end blocks.
  Inner,
  Outside,
}

impl Selection {
  pub fn new(
    start_index: usize,
    start_offset: usize,
    end_index: usize,
    end_offset: usize,
  ) -> Result<Self> {
    if (start_index, start_offset) > (end_index, end_offset) {
      return Err(SelectionError::Inverted {
        start_index,
        start_offset,
        end_index,
        end_offset,
      });
    }
    Ok(Self {
      start_index,
      start_offset,
      end_index,
      end_offset,
      rect: Rect::default(),
    })
  }

  #[inline]
  pub(crate) fn new_unchecked(
    start_index: usize,
    start_offset: usize,
    end_index: usize,
    end_offset: usize,
  ) -> Self {
    debug_assert!((start_index, start_offset) <= (end_index, end_offset));
    Self {
      start_index,
      start_offset,
      end_index,
      end_offset,
      rect: Rect::default(),
    }
  }

  /// A caret.
  #[inline]
  pub fn collapsed(index: usize, offset: usize) -> Self {
    Self::new_unchecked(index, offset, index, offset)
  }

  #[inline]
  #[must_use]
  pub fn start_index(&self) -> usize {
    self.start_index
  }

  #[inline]
  #[must_use]
  pub fn start_offset(&self) -> usize {
    self.start_offset
  }

  #[inline]
  #[must_use]
  pub fn end_index(&self) -> usize {
    self.end_index
  }

  #[inline]
  #[must_use]
  pub fn end_offset(&self) -> usize {
    self.end_offset
  }

  #[inline]
  pub fn rect(&self) -> &Rect {
    &self.rect
  }

  #[must_use]
  pub fn with_rect(self, rect: Rect) -> Self {
    Self { rect, ..self }
  }

  // Queries.
  //

  #[inline]
  pub fn is_collapsed(&self) -> bool {
    self.start_index == self.end_index && self.start_offset == self.end_offset
  }

  pub fn is_collapsed_at(&self, index: usize, offset: usize) -> bool {
    self.is_collapsed() && self.start_index == index && self.start_offset == offset
  }

  pub fn is_collapsed_at_block_start(&self) -> bool {
    self.is_collapsed() && self.start_offset == 0
  }

  pub fn is_collapsed_at_block_end(&self, blocks: &BlockList) -> bool {
    self.is_collapsed()
      && blocks
        .get(self.end_index)
        .is_some_and(|block| block.len_chars() == self.end_offset)
  }

  pub fn is_collapsed_at_document_start(&self) -> bool {
    self.is_collapsed_at(0, 0)
  }

  pub fn is_collapsed_at_document_end(&self, blocks: &BlockList) -> bool {
    self.is_collapsed_at(blocks.last_index(), blocks.last().len_chars())
  }

  /// Classifies block `index`, whose text is `block_len` chars long.
  pub fn coverage(&self, index: usize, block_len: usize) -> Coverage {
    let (start, end) = (self.start_index, self.end_index);
    if index == start && index == end {
      Coverage::Within(Range::new_unchecked(self.start_offset, self.end_offset))
    } else if index == start && start < end {
      Coverage::Start(Range::new_unchecked(self.start_offset, block_len))
    } else if index == end && start < end {
      Coverage::End(Range::new_unchecked(0, self.end_offset))
    } else if start < index && index < end {
      Coverage::Inner
    } else {
      Coverage::Outside
    }
  }

  // Transforms.
  //

  #[must_use]
  pub fn collapse_to(self, index: usize, offset: usize) -> Self {
    Self {
      start_index: index,
      start_offset: offset,
      end_index: index,
      end_offset: offset,
      ..self
    }
  }

  #[must_use]
  pub fn collapse_to_start(self) -> Self {
    self.collapse_to(self.start_index, self.start_offset)
  }

  #[must_use]
  pub fn collapse_to_end(self) -> Self {
    self.collapse_to(self.end_index, self.end_offset)
  }

  #[must_use]
  pub fn collapse_to_block_start(self) -> Self {
    self.collapse_to(self.start_index, 0)
  }

  #[must_use]
  pub fn collapse_to_block_end(self, blocks: &BlockList) -> Self {
    let len = blocks.get(self.end_index).map_or(0, |block| block.len_chars());
    self.collapse_to(self.end_index, len)
  }

  #[must_use]
  pub fn collapse_to_document_start(self) -> Self {
    self.collapse_to(0, 0)
  }

  #[must_use]
  pub fn collapse_to_document_end(self, blocks: &BlockList) -> Self {
    self.collapse_to(blocks.last_index(), blocks.last().len_chars())
  }

  /// Moves the start, keeping the end.
  pub fn with_start(self, index: usize, offset: usize) -> Result<Self> {
    Ok(Self::new(index, offset, self.end_index, self.end_offset)?.with_rect(self.rect))
  }

  /// Moves the end, keeping the start.
  pub fn with_end(self, index: usize, offset: usize) -> Result<Self> {
    Ok(Self::new(self.start_index, self.start_offset, index, offset)?.with_rect(self.rect))
  }
}
