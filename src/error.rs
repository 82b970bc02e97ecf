//! Boundary failures: a world that cannot be compiled, a save blob that
//! cannot be read back, or a settings file that cannot be parsed.
//!
//! Everything that goes wrong *inside* a game (unknown words, absent
//! objects, unanswered questions) is narration and never shows up here.

use std::io;

use thiserror::Error;

use crate::world::ValidationError;

/// The world data file could not be turned into a playable world.
#[derive(Debug, Error)]
pub enum WorldLoadError {
    /// The data file could not be read.
    #[error("failed to read world data: {0}")]
    Io(#[from] io::Error),

    /// A record did not have the shape its section requires.
    #[error("malformed data in section {section}, line {line}: {reason}")]
    Malformed {
        section: u32,
        line: usize,
        reason: String,
    },

    /// The file ended before the terminating section `0`.
    #[error("world data ended inside section {section}")]
    Truncated { section: u32 },

    /// Records parsed, but they reference things that do not exist.
    #[error("world data failed validation ({} problem(s)); first: {}", .0.len(), first_problem(.0))]
    Invalid(Vec<ValidationError>),

    /// The engine needs an object by this name and the vocabulary lacks it.
    #[error("world data has no object named '{0}'")]
    MissingObject(String),

    /// A verb group whose canonical word has no handler in the engine.
    #[error("world data defines verb '{0}', which the engine cannot handle")]
    UnknownVerb(String),
}

impl WorldLoadError {
    pub(crate) fn malformed(section: u32, line: usize, reason: impl Into<String>) -> Self {
        WorldLoadError::Malformed {
            section,
            line,
            reason: reason.into(),
        }
    }
}

fn first_problem(problems: &[ValidationError]) -> &str {
    problems.first().map(|p| p.message.as_str()).unwrap_or("none")
}

/// A save blob could not be produced or read back.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to encode saved game: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("saved game is unreadable or corrupt: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// The zlib layer around the snapshot failed.
    #[error("saved game could not be (de)compressed: {0}")]
    Compression(#[from] io::Error),

    #[error("saved game has format version {found}, expected {expected}")]
    Version { found: u32, expected: u32 },
}

/// The settings file for the terminal driver could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}
