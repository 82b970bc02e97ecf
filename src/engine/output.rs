use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OutputBlock {
    Text(String),
    /// A snapshot the player asked to keep under `sink`. Where it is stored
    /// is up to whoever drives the game.
    Saved { sink: String, blob: Vec<u8> },
}

#[derive(Default, Debug, Clone)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Narration is shouted, one line break after each piece.
    pub fn say(&mut self, s: impl AsRef<str>) {
        let s = s.as_ref();
        if !s.is_empty() {
            let mut text = s.to_uppercase();
            text.push('\n');
            self.blocks.push(OutputBlock::Text(text));
        }
    }

    pub fn saved(&mut self, sink: impl Into<String>, blob: Vec<u8>) {
        self.blocks.push(OutputBlock::Saved {
            sink: sink.into(),
            blob,
        });
    }

    /// All narration of the turn as one string.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                OutputBlock::Text(t) => Some(t.as_str()),
                OutputBlock::Saved { .. } => None,
            })
            .collect()
    }

    pub fn append(&mut self, other: Output) {
        self.blocks.extend(other.blocks);
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
