#![no_main]

mod common;

use libfuzzer_sys::fuzz_target;
use the_richtext::document;

use crate::common::{
  apply,
  check,
  session_from_bytes,
};

fuzz_target!(|data: &[u8]| {
  let Some(session) = session_from_bytes(data) else {
    return;
  };

  let mut state = session.state;
  check(&state);
  for op in &session.ops {
    let Some(next) = apply(&state, op) else {
      continue;
    };
    check(&next);
    state = next;
  }

  let json = document::to_json(state.blocks()).expect("serialize document");
  let loaded = document::from_json(&json).expect("reload document");
  assert_eq!(&loaded, state.blocks());
});
