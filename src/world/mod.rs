mod cast;
mod loader;
mod model;
mod validator;
mod vocabulary;

pub use loader::{load_world_from_file, load_world_from_reader, load_world_from_str};

// Re-export only what the engine and embedders use.
pub use cast::{Cast, LANDMARK_ROOMS};
pub use model::{
    Action, ClassMessage, Condition, Hint, HintId, MessageId, Move, Object, ObjectId, Placement,
    Room, RoomId, World,
};
pub use validator::{ValidationError, validate_world};
pub use vocabulary::{Vocabulary, Word, WordClass, WordId, WordKind, expand_long_word};
