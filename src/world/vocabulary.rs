//! Words the player can type, grouped into synonym classes.
//!
//! The data file assigns every word a number; words sharing a number are
//! synonyms. A class is keyed by that number, so two words compare equal
//! exactly when their ids do.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::MessageId;

/// Word number as assigned by the data file. The thousands digit is the kind.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct WordId(pub u16);

impl WordId {
    pub fn kind(self) -> Option<WordKind> {
        match self.0 / 1000 {
            0 => Some(WordKind::Motion),
            1 => Some(WordKind::Noun),
            2 => Some(WordKind::Verb),
            3 => Some(WordKind::SnappyComeback),
            _ => None,
        }
    }

    /// Number within the kind: object number for nouns, message number for
    /// snappy comebacks.
    pub fn index(self) -> u16 {
        self.0 % 1000
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordKind {
    Motion,
    Noun,
    Verb,
    SnappyComeback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordClass {
    pub id: WordId,
    pub kind: WordKind,
    /// In file order; the first one names the class.
    pub synonyms: Vec<String>,
    pub default_message: Option<MessageId>,
}

/// A word as the player typed it, resolved to its class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub text: String,
}

impl Word {
    pub fn kind(&self) -> Option<WordKind> {
        self.id.kind()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    classes: BTreeMap<WordId, WordClass>,
    lookup: BTreeMap<String, Word>,
}

impl Vocabulary {
    /// Add `text` to class `id`, creating the class on first use. The first
    /// class to claim a text keeps it.
    pub fn insert(&mut self, id: WordId, kind: WordKind, text: &str) {
        let class = self.classes.entry(id).or_insert_with(|| WordClass {
            id,
            kind,
            synonyms: Vec::new(),
            default_message: None,
        });
        class.synonyms.push(text.to_string());

        self.lookup.entry(text.to_string()).or_insert_with(|| Word {
            id,
            text: text.to_string(),
        });
    }

    pub fn lookup(&self, text: &str) -> Option<&Word> {
        self.lookup.get(text)
    }

    pub fn class(&self, id: WordId) -> Option<&WordClass> {
        self.classes.get(&id)
    }

    pub fn classes(&self) -> impl Iterator<Item = &WordClass> {
        self.classes.values()
    }

    pub fn canonical(&self, id: WordId) -> &str {
        self.classes
            .get(&id)
            .and_then(|c| c.synonyms.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// True when `text` is one of the synonyms of class `id`.
    pub fn is(&self, id: WordId, text: &str) -> bool {
        self.classes
            .get(&id)
            .is_some_and(|c| c.synonyms.iter().any(|s| s == text))
    }

    /// Position of `word` within its synonym list (fee=0, fie=1, ...).
    pub fn synonym_index(&self, word: &Word) -> Option<usize> {
        self.classes
            .get(&word.id)
            .and_then(|c| c.synonyms.iter().position(|s| *s == word.text))
    }

    pub fn default_message(&self, id: WordId) -> Option<MessageId> {
        self.classes.get(&id).and_then(|c| c.default_message)
    }

    /// Returns false when no class `id` exists.
    pub fn set_default_message(&mut self, id: WordId, message: MessageId) -> bool {
        match self.classes.get_mut(&id) {
            Some(class) => {
                class.default_message = Some(message);
                true
            }
            None => false,
        }
    }

    /// Let old-fashioned players type five-letter truncations like `inven`.
    /// A truncation replaces whatever that key pointed at before.
    pub fn add_truncations(&mut self) {
        let long: Vec<(String, Word)> = self
            .lookup
            .iter()
            .filter(|(text, _)| text.chars().count() > 5)
            .map(|(text, word)| (text.chars().take(5).collect(), word.clone()))
            .collect();
        for (short, word) in long {
            self.lookup.insert(short, word);
        }
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

/// The data file stores at most five letters per word; these are the words
/// whose full spelling we restore.
const LONG_WORDS: &[&str] = &[
    "upstream",
    "downstream",
    "forest",
    "forward",
    "continue",
    "onward",
    "return",
    "retreat",
    "valley",
    "staircase",
    "outside",
    "building",
    "stream",
    "cobble",
    "inward",
    "inside",
    "surface",
    "nowhere",
    "passage",
    "tunnel",
    "canyon",
    "awkward",
    "upward",
    "ascend",
    "downward",
    "descend",
    "outdoors",
    "barren",
    "across",
    "debris",
    "broken",
    "examine",
    "describe",
    "slabroom",
    "depression",
    "entrance",
    "secret",
    "bedquilt",
    "plover",
    "oriental",
    "cavern",
    "reservoir",
    "office",
    "headlamp",
    "lantern",
    "pillow",
    "velvet",
    "fissure",
    "tablet",
    "oyster",
    "magazine",
    "spelunker",
    "dwarves",
    "knives",
    "rations",
    "bottle",
    "mirror",
    "beanstalk",
    "stalactite",
    "shadow",
    "figure",
    "drawings",
    "pirate",
    "dragon",
    "message",
    "volcano",
    "geyser",
    "machine",
    "vending",
    "batteries",
    "carpet",
    "nuggets",
    "diamonds",
    "silver",
    "jewelry",
    "treasure",
    "trident",
    "shards",
    "pottery",
    "emerald",
    "platinum",
    "pyramid",
    "pearl",
    "persian",
    "spices",
    "capture",
    "release",
    "discard",
    "mumble",
    "unlock",
    "nothing",
    "extinguish",
    "placate",
    "travel",
    "proceed",
    "explore",
    "follow",
    "attack",
    "strike",
    "devour",
    "inventory",
    "detonate",
    "ignite",
    "blowup",
    "peruse",
    "shatter",
    "disturb",
    "suspend",
    "sesame",
    "opensesame",
    "abracadabra",
    "shazam",
    "excavate",
    "information",
];

/// Restore the full spelling of a word the data file truncated, and
/// lower-case it.
pub fn expand_long_word(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.chars().count() != 5 {
        return lower;
    }
    LONG_WORDS
        .iter()
        .find(|w| w.len() > 5 && w.starts_with(lower.as_str()))
        .map(|w| w.to_string())
        .unwrap_or(lower)
}
