//! The document: an ordered, non-empty list of blocks, and the
//! selection-scoped operations that edit it.
//!
//! # Selection-scoped operations
//!
//! Each operation walks the blocks left to right and asks
//! [`Selection::coverage`] what to do with the current block:
//!
//! | coverage  | remove                   | copy         | split / map            |
//! |-----------|--------------------------|--------------|------------------------|
//! | `Within`  | remove the range         | copy range   | act on the range       |
//! | `Start`   | remove the tail          | copy tail    | act on the tail        |
//! | `End`     | remove the head, then    | copy head    | act on the head        |
//! |           | join onto the start block|              |                        |
//! | `Inner`   | drop                     | keep         | keep / act on all      |
//! | `Outside` | keep                     | drop         | keep                   |
//!
//! Removing across blocks therefore leaves a single block made from the head
//! of the start block and the tail of the end block; everything in between
//! disappears.
//!
//! Offsets in a selection are trusted: they must lie within the blocks they
//! address.
//!
//! # Identity
//!
//! Edits that change nothing (removing a collapsed selection, inserting empty
//! text, deleting before the document start or after its end) return the same
//! list, which [`BlockList::ptr_eq`] detects.

use std::sync::Arc;

use serde::{
  Deserialize,
  Serialize,
  Serializer,
};
use thiserror::Error;

use crate::{
  block::Block,
  range::Range,
  selection::{
    Coverage,
    Selection,
  },
  span::Span,
};

pub type Result<T> = std::result::Result<T, BlockListError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlockListError {
  #[error("block list must contain at least one block")]
  Empty,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Block>")]
pub struct BlockList {
  blocks: Arc<[Block]>,
}

impl Default for BlockList {
  fn default() -> Self {
    Self {
      blocks: Arc::from([Block::new()]),
    }
  }
}

impl TryFrom<Vec<Block>> for BlockList {
  type Error = BlockListError;

  fn try_from(blocks: Vec<Block>) -> Result<Self> {
    Self::new(blocks)
  }
}

impl Serialize for BlockList {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(self.blocks.iter())
  }
}

impl BlockList {
  pub fn new(blocks: Vec<Block>) -> Result<Self> {
    if blocks.is_empty() {
      return Err(BlockListError::Empty);
    }
    Ok(Self {
      blocks: Arc::from(blocks),
    })
  }

  /// A single unformatted block.
  pub fn with_text(text: &str) -> Self {
    Self {
      blocks: Arc::from([Block::with_text(text)]),
    }
  }

  fn from_blocks(blocks: Vec<Block>) -> Self {
    debug_assert!(!blocks.is_empty());
    if blocks.is_empty() {
      return Self::default();
    }
    Self {
      blocks: Arc::from(blocks),
    }
  }

  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.blocks, &other.blocks)
  }

  #[inline]
  pub fn as_slice(&self) -> &[Block] {
    &self.blocks
  }

  #[inline]
  pub fn iter(&self) -> std::slice::Iter<'_, Block> {
    self.blocks.iter()
  }

  /// Number of blocks.
  #[inline]
  pub fn len(&self) -> usize {
    self.blocks.len()
  }

  #[inline]
  pub fn last_index(&self) -> usize {
    self.blocks.len() - 1
  }

  #[inline]
  pub fn get(&self, index: usize) -> Option<&Block> {
    self.blocks.get(index)
  }

  #[inline]
  pub fn first(&self) -> &Block {
    &self.blocks[0]
  }

  #[inline]
  pub fn last(&self) -> &Block {
    &self.blocks[self.blocks.len() - 1]
  }

  /// Total chars over all blocks.
  pub fn len_chars(&self) -> usize {
    self.iter().map(Block::len_chars).sum()
  }

  /// All block texts run together, with nothing between blocks.
  pub fn text(&self) -> String {
    let mut text = String::with_capacity(self.iter().map(|block| block.text().len_bytes()).sum());
    for block in self.iter() {
      for chunk in block.text().chunks() {
        text.push_str(chunk);
      }
    }
    text
  }

  /// A single block with no text.
  pub fn is_empty(&self) -> bool {
    self.blocks.len() == 1 && self.first().len_chars() == 0
  }

  // Selection-scoped operations.
  //

  pub fn remove_selection(&self, selection: Selection) -> Self {
    if selection.is_collapsed() {
      return self.clone();
    }
    tracing::trace!(?selection, "remove selection");

    let mut blocks: Vec<Block> = Vec::with_capacity(self.len());
    for (index, block) in self.iter().enumerate() {
      match selection.coverage(index, block.len_chars()) {
        Coverage::Within(range) | Coverage::Start(range) => blocks.push(block.remove_range(range)),
        Coverage::End(range) => {
          let tail = block.remove_range(range);
          match blocks.last_mut() {
            Some(previous) if !previous.is_empty() => *previous = previous.append(&tail),
            Some(previous) => *previous = tail,
            None => blocks.push(tail),
          }
        },
        Coverage::Inner => {},
        Coverage::Outside => blocks.push(block.clone()),
      }
    }

    Self::from_blocks(blocks)
  }

  /// The selected content as a document of its own.
  pub fn copy_selection(&self, selection: Selection) -> Self {
    tracing::trace!(?selection, "copy selection");

    let blocks = self
      .iter()
      .enumerate()
      .filter_map(
        |(index, block)| match selection.coverage(index, block.len_chars()) {
          Coverage::Within(range) | Coverage::Start(range) | Coverage::End(range) => {
            Some(block.copy_range(range))
          },
          Coverage::Inner => Some(block.clone()),
          Coverage::Outside => None,
        },
      )
      .collect();

    Self::from_blocks(blocks)
  }

  /// Cuts spans so both ends of `selection` fall on span boundaries.
  pub fn split_spans_at_selection(&self, selection: Selection) -> Self {
    let blocks = self
      .iter()
      .enumerate()
      .map(
        |(index, block)| match selection.coverage(index, block.len_chars()) {
          Coverage::Within(range) | Coverage::Start(range) | Coverage::End(range) => {
            block.split_spans_at_range(range)
          },
          Coverage::Inner | Coverage::Outside => block.clone(),
        },
      )
      .collect();

    Self::from_blocks(blocks)
  }

  /// Applies `f` to the spans under `selection`. Blocks strictly inside the
  /// selection have every span mapped; in the edge blocks `lazy` decides
  /// whether spans crossing the selection's boundary are mapped as well.
  pub fn map_spans_in_selection<F>(&self, lazy: bool, mut f: F, selection: Selection) -> Self
  where
    F: FnMut(&Span) -> Span,
  {
    tracing::trace!(?selection, lazy, "map spans in selection");

    let blocks = self
      .iter()
      .enumerate()
      .map(
        |(index, block)| match selection.coverage(index, block.len_chars()) {
          Coverage::Within(range) | Coverage::Start(range) | Coverage::End(range) => {
            block.map_spans_in_range(lazy, &mut f, range)
          },
          Coverage::Inner => block.map_spans(&mut f),
          Coverage::Outside => block.clone(),
        },
      )
      .collect();

    Self::from_blocks(blocks)
  }

  /// Folds the spans [`BlockList::map_spans_in_selection`] would map.
  pub fn reduce_spans_in_selection<T, F>(
    &self,
    lazy: bool,
    mut f: F,
    init: T,
    selection: Selection,
  ) -> T
  where
    F: FnMut(T, &Span) -> T,
  {
    self
      .iter()
      .enumerate()
      .fold(init, |acc, (index, block)| {
        match selection.coverage(index, block.len_chars()) {
          Coverage::Within(range) | Coverage::Start(range) | Coverage::End(range) => {
            block.reduce_spans_in_range(lazy, &mut f, acc, range)
          },
          Coverage::Inner => block.reduce_spans(&mut f, acc),
          Coverage::Outside => acc,
        }
      })
  }

  /// Inserts `text` at the selection's end. The selection is not removed.
  pub fn insert_text_after_selection(&self, text: &str, selection: Selection) -> Self {
    if text.is_empty() {
      return self.clone();
    }
    tracing::trace!(?selection, len = text.len(), "insert text");

    let target = selection.end_index();
    let at = Range::point(selection.end_offset());
    let blocks = self
      .iter()
      .enumerate()
      .map(|(index, block)| {
        if index == target {
          block.insert_text_after_range(text, at)
        } else {
          block.clone()
        }
      })
      .collect();

    Self::from_blocks(blocks)
  }

  /// Deletes the char before the selection's start, joining with the previous
  /// block when the start is at a block start.
  pub fn remove_char_before_selection(&self, selection: Selection) -> Self {
    let caret = selection.collapse_to_start();
    if caret.is_collapsed_at_document_start() {
      return self.clone();
    }

    let (index, offset) = (caret.start_index(), caret.start_offset());
    let target = if offset == 0 {
      let previous = index - 1;
      Selection::new_unchecked(previous, self.blocks[previous].len_chars(), index, 0)
    } else {
      Selection::new_unchecked(index, offset - 1, index, offset)
    };
    self.remove_selection(target)
  }

  /// Deletes the char after the selection's end, joining with the next block
  /// when the end is at a block end.
  pub fn remove_char_after_selection(&self, selection: Selection) -> Self {
    let caret = selection.collapse_to_end();
    if caret.is_collapsed_at_document_end(self) {
      return self.clone();
    }

    let (index, offset) = (caret.end_index(), caret.end_offset());
    let target = if offset == self.blocks[index].len_chars() {
      Selection::new_unchecked(index, offset, index + 1, 0)
    } else {
      Selection::new_unchecked(index, offset, index, offset + 1)
    };
    self.remove_selection(target)
  }

  pub fn insert_empty_block_before_selection(&self, selection: Selection) -> Self {
    self.insert_block_at(selection.start_index(), Block::new())
  }

  pub fn insert_empty_block_after_selection(&self, selection: Selection) -> Self {
    self.insert_block_at(selection.end_index() + 1, Block::new())
  }

  fn insert_block_at(&self, index: usize, block: Block) -> Self {
    let mut blocks = Vec::with_capacity(self.len() + 1);
    blocks.extend_from_slice(&self.blocks[..index]);
    blocks.push(block);
    blocks.extend_from_slice(&self.blocks[index..]);
    Self::from_blocks(blocks)
  }

  /// Breaks the block at the selection's end into two blocks.
  pub fn split_block_after_selection(&self, selection: Selection) -> Self {
    tracing::trace!(?selection, "split block");

    let (index, offset) = (selection.end_index(), selection.end_offset());
    let head = self.copy_selection(Selection::new_unchecked(0, 0, index, offset));
    let tail = self.copy_selection(Selection::new_unchecked(
      index,
      offset,
      self.last_index(),
      self.last().len_chars(),
    ));
    head.append(false, &tail)
  }

  // Concatenation.
  //

  /// `self` followed by `other`. With `merge_edges` the last block of `self`
  /// and the first block of `other` become one block.
  pub fn append(&self, merge_edges: bool, other: &Self) -> Self {
    let mut blocks: Vec<Block> = Vec::with_capacity(self.len() + other.len());
    blocks.extend_from_slice(&self.blocks);

    let mut rest = other.iter();
    if merge_edges {
      if let (Some(last), Some(first)) = (blocks.last_mut(), rest.next()) {
        *last = last.append(first);
      }
    }
    blocks.extend(rest.cloned());

    Self::from_blocks(blocks)
  }

  /// `other` followed by `self`.
  pub fn prepend(&self, merge_edges: bool, other: &Self) -> Self {
    other.append(merge_edges, self)
  }
}

impl<'a> IntoIterator for &'a BlockList {
  type Item = &'a Block;
  type IntoIter = std::slice::Iter<'a, Block>;

  fn into_iter(self) -> Self::IntoIter {
    self.blocks.iter()
  }
}

#[cfg(test)]
mod test {
  use std::collections::BTreeSet;

  use quickcheck::TestResult;
  use ropey::Rope;

  use super::*;
  use crate::{
    Tendril,
    format::Format,
    span_list::SpanList,
  };

  fn span(start: usize, end: usize, names: &[&str]) -> Span {
    Span::with_formats(
      Range::new(start, end).unwrap(),
      names.iter().map(|name| Format::new(*name).unwrap()),
    )
  }

  fn block(text: &str, spans: &[(usize, usize, &[&str])]) -> Block {
    Block::from_parts(
      Rope::from_str(text),
      SpanList::new(
        spans
          .iter()
          .map(|(start, end, names)| span(*start, *end, names))
          .collect(),
      )
      .unwrap(),
    )
    .unwrap()
  }

  fn selection(start_index: usize, start_offset: usize, end_index: usize, end_offset: usize) -> Selection {
    Selection::new(start_index, start_offset, end_index, end_offset).unwrap()
  }

  fn fixtures() -> BlockList {
    BlockList::new(vec![
      block("Lorem ipsum dolor sit amet,", &[(0, 12, &[]), (12, 27, &["i"])]),
      block(" consectetur adipiscing elit.", &[(0, 13, &["i"]), (13, 29, &[])]),
      block("Aliquam accumsan cursus sem quis placerat.", &[
        (0, 30, &[]),
        (30, 38, &["i"]),
        (38, 42, &[]),
      ]),
    ])
    .unwrap()
  }

  fn bold(span: &Span) -> Span {
    span.add_format(Format::new("b").unwrap())
  }

  fn names(acc: Vec<String>, span: &Span) -> Vec<String> {
    let mut acc = acc;
    acc.extend(span.format_names().map(|name| name.to_string()));
    acc
  }

  #[test]
  fn test_new() {
    assert_eq!(BlockList::new(vec![]).unwrap_err(), BlockListError::Empty);

    let blocks = BlockList::default();
    assert_eq!(blocks.len(), 1);
    assert!(blocks.is_empty());
    assert_eq!(blocks.first().len_chars(), 0);
    assert_eq!(blocks.first().spans().len(), 1);
    assert!(blocks.first().spans().first().is_empty());
  }

  #[test]
  fn test_len_chars() {
    let blocks = fixtures();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks.len_chars(), 27 + 29 + 42);
    assert_eq!(blocks.text().chars().count(), blocks.len_chars());
    assert!(!blocks.is_empty());
  }

  #[test]
  fn remove_selection_across_blocks() {
    let blocks = fixtures().remove_selection(selection(1, 20, 2, 18));

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks.first(), fixtures().first());
    assert_eq!(
      blocks.last(),
      &block(" consectetur adipiscursus sem quis placerat.", &[
        (0, 13, &["i"]),
        (13, 32, &[]),
        (32, 40, &["i"]),
        (40, 44, &[]),
      ])
    );
  }

  #[test]
  fn remove_selection_within_block() {
    let blocks = fixtures().remove_selection(selection(0, 4, 0, 8));

    assert_eq!(blocks.len(), 3);
    assert_eq!(
      blocks.first(),
      &block("Loresum dolor sit amet,", &[(0, 8, &[]), (8, 23, &["i"])])
    );
    assert_eq!(blocks.get(1), fixtures().get(1));
  }

  #[test]
  fn remove_selection_drops_inner_blocks() {
    let blocks = fixtures().remove_selection(selection(0, 2, 2, 40));

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks.first(), &block("Lot.", &[(0, 4, &[])]));
  }

  #[test]
  fn remove_selection_onto_empty_block() {
    let blocks = BlockList::new(vec![
      Block::new(),
      block("ab", &[(0, 1, &["b"]), (1, 2, &[])]),
    ])
    .unwrap();

    let removed = blocks.remove_selection(selection(0, 0, 1, 1));
    assert_eq!(removed.len(), 1);
    assert_eq!(removed.first(), &Block::with_text("b"));
  }

  #[test]
  fn remove_collapsed_selection_is_identity() {
    let blocks = fixtures();
    assert!(blocks.remove_selection(Selection::collapsed(1, 4)).ptr_eq(&blocks));
  }

  #[test]
  fn test_copy_selection() {
    let copy = fixtures().copy_selection(selection(0, 2, 2, 40));

    assert_eq!(copy.len(), 3);
    assert_eq!(
      copy.first(),
      &block("rem ipsum dolor sit amet,", &[(0, 10, &[]), (10, 25, &["i"])])
    );
    assert_eq!(copy.get(1), fixtures().get(1));
    assert_eq!(
      copy.last(),
      &block("Aliquam accumsan cursus sem quis placera", &[
        (0, 30, &[]),
        (30, 38, &["i"]),
        (38, 40, &[]),
      ])
    );

    let copy = fixtures().copy_selection(selection(1, 13, 1, 28));
    assert_eq!(copy.len(), 1);
    assert_eq!(copy.first(), &block("adipiscing elit", &[(0, 15, &[])]));
  }

  #[test]
  fn test_split_spans_at_selection() {
    let blocks = fixtures().split_spans_at_selection(selection(0, 6, 2, 34));

    assert_eq!(
      blocks.first(),
      &block("Lorem ipsum dolor sit amet,", &[
        (0, 6, &[]),
        (6, 12, &[]),
        (12, 27, &["i"]),
      ])
    );
    assert_eq!(blocks.get(1), fixtures().get(1));
    assert_eq!(
      blocks.last(),
      &block("Aliquam accumsan cursus sem quis placerat.", &[
        (0, 30, &[]),
        (30, 34, &["i"]),
        (34, 38, &["i"]),
        (38, 42, &[]),
      ])
    );
    assert_eq!(blocks.text(), fixtures().text());
  }

  #[test]
  fn test_map_spans_in_selection() {
    let sel = selection(0, 6, 2, 34);

    let lazy = fixtures().map_spans_in_selection(true, bold, sel);
    assert!(lazy.first().spans().iter().all(|span| span.has_format("b")));
    assert!(lazy.get(1).unwrap().spans().iter().all(|span| span.has_format("b")));
    let last: Vec<bool> = lazy.last().spans().iter().map(|span| span.has_format("b")).collect();
    assert_eq!(last, vec![true, true, false]);

    let strict = fixtures().map_spans_in_selection(false, bold, sel);
    let first: Vec<bool> = strict.first().spans().iter().map(|span| span.has_format("b")).collect();
    assert_eq!(first, vec![false, true]);
    assert!(strict.get(1).unwrap().spans().iter().all(|span| span.has_format("b")));
    let last: Vec<bool> = strict.last().spans().iter().map(|span| span.has_format("b")).collect();
    assert_eq!(last, vec![true, false, false]);
  }

  #[test]
  fn map_after_split_is_precise() {
    let sel = selection(0, 6, 2, 34);
    let blocks = fixtures()
      .split_spans_at_selection(sel)
      .map_spans_in_selection(false, bold, sel);

    assert_eq!(
      blocks.first(),
      &block("Lorem ipsum dolor sit amet,", &[
        (0, 6, &[]),
        (6, 12, &["b"]),
        (12, 27, &["b", "i"]),
      ])
    );
    assert_eq!(
      blocks.last(),
      &block("Aliquam accumsan cursus sem quis placerat.", &[
        (0, 30, &["b"]),
        (30, 34, &["b", "i"]),
        (34, 38, &["i"]),
        (38, 42, &[]),
      ])
    );
  }

  #[test]
  fn test_reduce_spans_in_selection() {
    let sel = selection(0, 6, 2, 34);

    assert_eq!(
      fixtures().reduce_spans_in_selection(true, names, Vec::new(), sel),
      vec!["i", "i", "i"]
    );
    assert_eq!(
      fixtures().reduce_spans_in_selection(false, names, Vec::new(), sel),
      vec!["i", "i"]
    );

    let set = fixtures().reduce_spans_in_selection(
      true,
      |mut acc: BTreeSet<Tendril>, span| {
        acc.extend(span.format_names().cloned());
        acc
      },
      BTreeSet::new(),
      sel,
    );
    assert_eq!(set.len(), 1);
  }

  #[test]
  fn test_insert_text_after_selection() {
    let blocks = fixtures().insert_text_after_selection("foo", selection(0, 3, 1, 13));

    assert_eq!(blocks.first(), fixtures().first());
    assert_eq!(
      blocks.get(1).unwrap(),
      &block(" consectetur fooadipiscing elit.", &[(0, 13, &["i"]), (13, 32, &[])])
    );

    let blocks = fixtures();
    assert!(
      blocks
        .insert_text_after_selection("", Selection::collapsed(0, 0))
        .ptr_eq(&blocks)
    );
  }

  fn merged_middle() -> Block {
    block(
      " consectetur adipiscing elit.Aliquam accumsan cursus sem quis placerat.",
      &[(0, 13, &["i"]), (13, 59, &[]), (59, 67, &["i"]), (67, 71, &[])],
    )
  }

  #[test]
  fn test_remove_char_before_selection() {
    let blocks = fixtures().remove_char_before_selection(Selection::collapsed(2, 0));
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks.last(), &merged_middle());

    let blocks = fixtures().remove_char_before_selection(Selection::collapsed(1, 5));
    assert_eq!(
      blocks.get(1).unwrap(),
      &block(" conectetur adipiscing elit.", &[(0, 12, &["i"]), (12, 28, &[])])
    );

    // a range deletes before its start
    let blocks = fixtures().remove_char_before_selection(selection(1, 5, 2, 3));
    assert_eq!(blocks.get(1).unwrap().text(), " conectetur adipiscing elit.");
    assert_eq!(blocks.len(), 3);

    let blocks = fixtures();
    assert!(
      blocks
        .remove_char_before_selection(Selection::collapsed(0, 0))
        .ptr_eq(&blocks)
    );
  }

  #[test]
  fn test_remove_char_after_selection() {
    let blocks = fixtures();
    assert!(
      blocks
        .remove_char_after_selection(Selection::collapsed(2, 42))
        .ptr_eq(&blocks)
    );

    let blocks = fixtures().remove_char_after_selection(Selection::collapsed(1, 29));
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks.last(), &merged_middle());

    let blocks = fixtures().remove_char_after_selection(Selection::collapsed(1, 5));
    assert_eq!(blocks.get(1).unwrap().text(), " consctetur adipiscing elit.");
  }

  #[test]
  fn test_append_prepend() {
    let other = BlockList::new(vec![fixtures().first().clone()]).unwrap();

    let merged = fixtures().append(true, &other);
    assert_eq!(merged.len(), 3);
    assert_eq!(
      merged.last(),
      &block(
        "Aliquam accumsan cursus sem quis placerat.Lorem ipsum dolor sit amet,",
        &[(0, 30, &[]), (30, 38, &["i"]), (38, 54, &[]), (54, 69, &["i"])],
      )
    );
    assert_eq!(other.prepend(true, &fixtures()), merged);

    let joined = fixtures().append(false, &other);
    assert_eq!(joined.len(), 4);
    assert_eq!(joined.last(), fixtures().first());
    assert_eq!(other.prepend(false, &fixtures()), joined);
  }

  #[test]
  fn insert_empty_blocks() {
    let before = fixtures().insert_empty_block_before_selection(selection(1, 3, 2, 4));
    assert_eq!(before.len(), 4);
    assert!(before.get(1).unwrap().is_empty());
    assert_eq!(before.get(2), fixtures().get(1));

    let after = fixtures().insert_empty_block_after_selection(selection(1, 3, 2, 4));
    assert_eq!(after.len(), 4);
    assert!(after.last().is_empty());

    let after = fixtures().insert_empty_block_after_selection(Selection::collapsed(0, 0));
    assert!(after.get(1).unwrap().is_empty());
  }

  #[test]
  fn test_split_block_after_selection() {
    let blocks = fixtures().split_block_after_selection(Selection::collapsed(1, 5));

    assert_eq!(blocks.len(), 4);
    assert_eq!(blocks.first(), fixtures().first());
    assert_eq!(blocks.get(1).unwrap(), &block(" cons", &[(0, 5, &["i"])]));
    assert_eq!(
      blocks.get(2).unwrap(),
      &block("ectetur adipiscing elit.", &[(0, 8, &["i"]), (8, 24, &[])])
    );
    assert_eq!(blocks.last(), fixtures().last());

    let blocks = fixtures().split_block_after_selection(Selection::collapsed(2, 42));
    assert_eq!(blocks.len(), 4);
    assert!(blocks.last().is_empty());
  }

  #[test]
  fn serde_round_trip() {
    let blocks = fixtures();
    let value = serde_json::to_value(&blocks).unwrap();
    assert!(value.is_array());
    assert_eq!(serde_json::from_value::<BlockList>(value).unwrap(), blocks);

    assert!(serde_json::from_str::<BlockList>("[]").is_err());
    assert!(serde_json::from_str::<BlockList>(r#"{"text":""}"#).is_err());
  }

  // Properties.
  //

  fn build(blocks: Vec<(String, u8)>) -> BlockList {
    let blocks = blocks
      .into_iter()
      .map(|(text, cut)| {
        let len = text.chars().count();
        let cut = cut as usize % (len + 1);
        let plain = span(0, cut, &[]);
        let formatted = span(cut, len, &["b"]);
        Block::from_parts(
          Rope::from(text.as_str()),
          SpanList::new(vec![plain, formatted]).unwrap().normalize(),
        )
        .unwrap()
      })
      .collect::<Vec<_>>();
    BlockList::new(blocks).unwrap_or_default()
  }

  fn pick(blocks: &BlockList, index: u8, offset: u8) -> (usize, usize) {
    let index = index as usize % blocks.len();
    let offset = offset as usize % (blocks.get(index).unwrap().len_chars() + 1);
    (index, offset)
  }

  fn pick_selection(blocks: &BlockList, a: (u8, u8), b: (u8, u8)) -> Selection {
    let a = pick(blocks, a.0, a.1);
    let b = pick(blocks, b.0, b.1);
    let (start, end) = (a.min(b), a.max(b));
    selection(start.0, start.1, end.0, end.1)
  }

  /// Block texts joined by newlines.
  fn joined(blocks: &BlockList) -> String {
    blocks
      .iter()
      .map(|block| block.text().to_string())
      .collect::<Vec<_>>()
      .join("\n")
  }

  fn char_index(blocks: &BlockList, index: usize, offset: usize) -> usize {
    blocks
      .iter()
      .take(index)
      .map(|block| block.len_chars() + 1)
      .sum::<usize>()
      + offset
  }

  fn formats_at(blocks: &BlockList) -> Vec<BTreeSet<Tendril>> {
    blocks
      .iter()
      .flat_map(|block| {
        (0..block.len_chars()).map(move |offset| {
          block
            .spans()
            .iter()
            .find(|span| span.start() <= offset && offset < span.end())
            .map(|span| span.format_name_set())
            .unwrap_or_default()
        })
      })
      .collect()
  }

  quickcheck::quickcheck! {
    fn append_prepend_duality(a: Vec<(String, u8)>, b: Vec<(String, u8)>, merge: bool) -> bool {
      let (a, b) = (build(a), build(b));
      a.append(merge, &b) == b.prepend(merge, &a)
    }

    fn remove_and_copy_partition(blocks: Vec<(String, u8)>, a: (u8, u8), b: (u8, u8)) -> bool {
      let blocks = build(blocks);
      let sel = pick_selection(&blocks, a, b);

      let removed = joined(&blocks.remove_selection(sel));
      let copied = joined(&blocks.copy_selection(sel));
      let at = char_index(&blocks, sel.start_index(), sel.start_offset());

      let mut restored: String = removed.chars().take(at).collect();
      restored.push_str(&copied);
      restored.extend(removed.chars().skip(at));
      restored == joined(&blocks)
    }

    fn split_preserves_content(blocks: Vec<(String, u8)>, a: (u8, u8), b: (u8, u8)) -> bool {
      let blocks = build(blocks);
      let sel = pick_selection(&blocks, a, b);
      let split = blocks.split_spans_at_selection(sel);
      split.text() == blocks.text() && formats_at(&split) == formats_at(&blocks)
    }

    fn remove_char_shortens_by_one(blocks: Vec<(String, u8)>, a: (u8, u8)) -> TestResult {
      let blocks = build(blocks);
      let (index, offset) = pick(&blocks, a.0, a.1);
      let caret = Selection::collapsed(index, offset);
      if caret.is_collapsed_at_document_start() {
        return TestResult::discard();
      }
      let removed = blocks.remove_char_before_selection(caret);
      TestResult::from_bool(
        joined(&removed).chars().count() + 1 == joined(&blocks).chars().count(),
      )
    }
  }
}
