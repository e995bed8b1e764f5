use scrambler_lib::{
  TextRange,
  command::{
    Command,
    CommandType,
  },
  context::Context,
  modifier::{
    Modifier,
    ModifierType,
  },
  utilities::Homophones,
};

const MAX_INITIAL_BYTES: usize = 4 * 1024;
const MAX_STEPS: usize = 32;
const MAX_MODIFIERS: usize = 3;
const MAX_SEARCH_BYTES: usize = 16;

pub struct FuzzSession {
  pub context:    Context,
  pub homophones: Homophones,
  pub commands:   Vec<Command>,
}

pub fn session_from_bytes(data: &[u8]) -> FuzzSession {
  let mut cursor = ByteCursor::new(data);
  let initial_len = cursor.next_usize(MAX_INITIAL_BYTES);
  let text = lossy_text(cursor.next_bytes(initial_len));
  let len = text.chars().count();
  let a = cursor.next_usize(len);
  let b = cursor.next_usize(len);
  let selection = TextRange::new(a.min(b), a.max(b)).unwrap_or_else(|_| TextRange::point(0));

  let step_count = cursor.next_usize(MAX_STEPS).max(1);
  let commands = (0..step_count).map(|_| decode_command(&mut cursor)).collect();

  FuzzSession {
    context: Context::new(&text, selection),
    homophones: Homophones::from_groups([
      ["there", "their", "they're"],
      ["to", "too", "two"],
      ["right", "write", "rite"],
    ]),
    commands,
  }
}

fn decode_command(cursor: &mut ByteCursor) -> Command {
  let command_type = CommandType::ALL[cursor.next_u8() as usize % CommandType::ALL.len()];
  let mut command = Command::new(command_type)
    .with_lambda(|text| text.chars().rev().collect())
    .with_insert_text(lossy_text(cursor.next_bytes(MAX_SEARCH_BYTES / 2)));

  for _ in 0..cursor.next_usize(MAX_MODIFIERS) {
    command = command.with_modifier(decode_modifier(cursor));
  }
  if cursor.next_u8() % 4 == 0 {
    command = command.with_extend_modifier(decode_modifier(cursor));
  }
  command
}

fn decode_modifier(cursor: &mut ByteCursor) -> Modifier {
  let modifier_type = ModifierType::ALL[cursor.next_u8() as usize % ModifierType::ALL.len()];
  let repeat = (cursor.next_u8() % 4) as usize + 1;
  let search_len = cursor.next_usize(MAX_SEARCH_BYTES);
  let search = lossy_text(cursor.next_bytes(search_len));
  let delimiter = ['"', '\'', '`'][cursor.next_u8() as usize % 3];
  Modifier::new(modifier_type)
    .with_repeat(repeat)
    .with_search(search)
    .with_delimiter(delimiter)
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
