use the_richtext::{
  Block,
  BlockList,
  EditorState,
  Format,
  Selection,
};

const MAX_BLOCKS: usize = 8;
const MAX_BLOCK_BYTES: usize = 256;
const MAX_OPS: usize = 128;
const MAX_INSERT_BYTES: usize = 64;

const FORMAT_NAMES: &[&str] = &["b", "i", "u", "link"];

#[derive(Debug, Clone)]
pub enum EditOp {
  Select { anchor: (u16, u16), head: (u16, u16) },
  InsertText(String),
  RemoveSelection,
  Backspace,
  Delete,
  Enter,
  AddFormat(u8),
  RemoveFormat(u8),
  CopyPaste { anchor: (u16, u16), head: (u16, u16) },
}

pub struct FuzzSession {
  pub state: EditorState,
  pub ops:   Vec<EditOp>,
}

pub fn session_from_bytes(data: &[u8]) -> Option<FuzzSession> {
  let mut cursor = ByteCursor::new(data);

  let block_count = cursor.next_usize(MAX_BLOCKS).max(1);
  let mut blocks = Vec::with_capacity(block_count);
  for _ in 0..block_count {
    let len = cursor.next_usize(MAX_BLOCK_BYTES);
    blocks.push(Block::with_text(&lossy_text(cursor.next_bytes(len))));
  }
  let blocks = BlockList::new(blocks).ok()?;

  let op_count = cursor.next_usize(MAX_OPS);
  let mut ops = Vec::with_capacity(op_count);
  for _ in 0..op_count {
    let op = match cursor.next_u8() % 9 {
      0 => EditOp::Select {
        anchor: (cursor.next_u16(), cursor.next_u16()),
        head:   (cursor.next_u16(), cursor.next_u16()),
      },
      1 => {
        let len = cursor.next_usize(MAX_INSERT_BYTES);
        EditOp::InsertText(lossy_text(cursor.next_bytes(len)))
      },
      2 => EditOp::RemoveSelection,
      3 => EditOp::Backspace,
      4 => EditOp::Delete,
      5 => EditOp::Enter,
      6 => EditOp::AddFormat(cursor.next_u8()),
      7 => EditOp::RemoveFormat(cursor.next_u8()),
      _ => EditOp::CopyPaste {
        anchor: (cursor.next_u16(), cursor.next_u16()),
        head:   (cursor.next_u16(), cursor.next_u16()),
      },
    };
    ops.push(op);
  }

  Some(FuzzSession {
    state: EditorState::with_blocks(blocks),
    ops,
  })
}

/// Maps raw `(index, offset)` onto a valid position in `blocks`.
fn position(blocks: &BlockList, (index, offset): (u16, u16)) -> (usize, usize) {
  let index = index as usize % blocks.len();
  let len = blocks.get(index).map_or(0, Block::len_chars);
  (index, offset as usize % (len + 1))
}

fn selection(blocks: &BlockList, anchor: (u16, u16), head: (u16, u16)) -> Option<Selection> {
  let a = position(blocks, anchor);
  let b = position(blocks, head);
  let (start, end) = (a.min(b), a.max(b));
  Selection::new(start.0, start.1, end.0, end.1).ok()
}

fn format(name: u8) -> Option<Format> {
  Format::new(FORMAT_NAMES[name as usize % FORMAT_NAMES.len()]).ok()
}

pub fn apply(state: &EditorState, op: &EditOp) -> Option<EditorState> {
  let next = match op {
    EditOp::Select { anchor, head } => {
      state.set_selection(selection(state.blocks(), *anchor, *head)?)
    },
    EditOp::InsertText(text) => state.insert_text_after_selection(text),
    EditOp::RemoveSelection => state.remove_selection(),
    EditOp::Backspace => state.remove_char_before_selection(),
    EditOp::Delete => state.remove_char_after_selection(),
    EditOp::Enter => state.insert_or_split_block_after_selection(),
    EditOp::AddFormat(name) => state.add_format_to_selection(format(*name)?),
    EditOp::RemoveFormat(name) => {
      state.remove_format_from_selection(FORMAT_NAMES[*name as usize % FORMAT_NAMES.len()])
    },
    EditOp::CopyPaste { anchor, head } => {
      let copied = state
        .set_selection(selection(state.blocks(), *anchor, *head)?)
        .copy_selection();
      state.paste_after_selection(&copied)
    },
  };
  Some(next)
}

/// Panics when `state` breaks a data-model invariant.
pub fn check(state: &EditorState) {
  let blocks = state.blocks();
  assert!(blocks.len() > 0);

  for block in blocks {
    let spans = block.spans();
    assert_eq!(spans.len_chars(), block.len_chars());
    assert_eq!(spans.first().start(), 0);
    for pair in spans.as_slice().windows(2) {
      assert_eq!(pair[0].end(), pair[1].start());
    }
    assert!(spans.normalize().ptr_eq(spans), "unnormalized spans: {spans:?}");
  }

  let selection = state.selection();
  let end = blocks
    .get(selection.end_index())
    .expect("selection past the last block");
  assert!(selection.end_offset() <= end.len_chars());
}

fn lossy_text(bytes: &[u8]) -> String {
  String::from_utf8_lossy(bytes).into_owned()
}

struct ByteCursor<'a> {
  data: &'a [u8],
  pos:  usize,
}

impl<'a> ByteCursor<'a> {
  fn new(data: &'a [u8]) -> Self {
    Self { data, pos: 0 }
  }

  fn next_u8(&mut self) -> u8 {
    let value = self.data.get(self.pos).copied().unwrap_or(0);
    self.pos = self.pos.saturating_add(1);
    value
  }

  fn next_u16(&mut self) -> u16 {
    let lo = self.next_u8() as u16;
    let hi = self.next_u8() as u16;
    lo | (hi << 8)
  }

  fn next_usize(&mut self, max: usize) -> usize {
    if max == 0 {
      return 0;
    }
    (self.next_u16() as usize) % (max + 1)
  }

  fn next_bytes(&mut self, len: usize) -> &'a [u8] {
    let start = self.pos.min(self.data.len());
    let end = start.saturating_add(len).min(self.data.len());
    self.pos = end;
    &self.data[start..end]
  }
}
