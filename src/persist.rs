//! Save blobs: a whole `Game` in `MessagePack`, behind a version header,
//! zlib-compressed.
//!
//! Named serialization keeps field names in the blob, so a blob from an
//! incompatible build fails loudly instead of decoding into nonsense.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{Deserialize, Serialize};

use crate::Game;
use crate::error::PersistenceError;

/// Bumped whenever `Game` changes shape.
pub(crate) const FORMAT_VERSION: u32 = 2;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    game: &'a Game,
}

#[derive(Deserialize)]
struct Header {
    version: u32,
}

#[derive(Deserialize)]
struct OwnedEnvelope {
    #[allow(dead_code)]
    version: u32,
    game: Game,
}

pub(crate) fn encode(game: &Game) -> Result<Vec<u8>, PersistenceError> {
    let envelope = Envelope {
        version: FORMAT_VERSION,
        game,
    };
    let packed = rmp_serde::to_vec_named(&envelope)?;
    deflate(&packed)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<Game, PersistenceError> {
    let packed = inflate(bytes)?;
    let header: Header = rmp_serde::from_slice(&packed)?;
    if header.version != FORMAT_VERSION {
        return Err(PersistenceError::Version {
            found: header.version,
            expected: FORMAT_VERSION,
        });
    }
    let envelope: OwnedEnvelope = rmp_serde::from_slice(&packed)?;
    Ok(envelope.game)
}

fn deflate(bytes: &[u8]) -> Result<Vec<u8>, PersistenceError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

fn inflate(bytes: &[u8]) -> Result<Vec<u8>, PersistenceError> {
    let mut packed = Vec::new();
    ZlibDecoder::new(bytes).read_to_end(&mut packed)?;
    Ok(packed)
}
