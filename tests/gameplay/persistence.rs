use cave_adventure::engine::Phase;
use cave_adventure::world::RoomId;
use cave_adventure::{Game, OutputBlock, Pending, PersistenceError};

use crate::{begin, play, seeded};

fn snapshot(game: &mut Game, words: &[&str]) -> (String, Vec<u8>) {
    let out = game.do_command(words).expect("save succeeds");
    let saved = out
        .blocks
        .iter()
        .find_map(|block| match block {
            OutputBlock::Saved { sink, blob } => Some((sink.clone(), blob.clone())),
            OutputBlock::Text(_) => None,
        })
        .expect("a snapshot block");
    // Confirming the save is left to whoever stores the snapshot.
    assert_eq!(out.text(), "");
    saved
}

#[test]
fn resumed_game_replays_identically() {
    let mut game = begin(seeded());
    play(&mut game, "south");
    let (sink, blob) = snapshot(&mut game, &["save", "slot"]);
    assert_eq!(sink, "slot");

    let mut resumed = Game::resume(&blob).expect("blob decodes");
    assert_eq!(resumed.location(), RoomId(4));
    assert_eq!(resumed.turns(), game.turns());

    // Unknown words draw from the generator, so these also check that its
    // state came along.
    let script = [
        "frobnicate", "north", "blorp", "east", "north", "xyzzy", "blorp", "west", "blorp",
        "look", "blorp",
    ];
    for line in script {
        assert_eq!(play(&mut game, line), play(&mut resumed, line), "{line}");
    }
    assert_eq!(game.location(), resumed.location());
    assert_eq!(game.score(), resumed.score());
}

#[test]
fn suspend_with_an_object_uses_its_name() {
    let mut game = begin(seeded());
    play(&mut game, "enter");
    let (sink, _) = snapshot(&mut game, &["suspend", "lamp"]);
    assert_eq!(sink, "lamp");
}

#[test]
fn save_without_a_name_asks_for_one() {
    let mut game = begin(seeded());
    let out = game.do_command(&["save"]).expect("no snapshot taken");
    assert!(out.text().starts_with("PROVIDE \"SAVE\" WITH A NAME TO SAVE UNDER"));
    assert!(out.blocks.iter().all(|b| matches!(b, OutputBlock::Text(_))));
}

#[test]
fn open_question_survives_a_round_trip() {
    let mut game = begin(seeded());
    play(&mut game, "quit");
    let blob = game.save().expect("encodes");

    let mut resumed = Game::resume(&blob).expect("decodes");
    assert_eq!(resumed.phase(), Phase::AwaitingYesNo(Pending::Quit));
    assert!(play(&mut resumed, "yes").contains("YOU SCORED"));
    assert!(resumed.is_finished());
}

#[test]
fn corrupt_blob_is_rejected() {
    assert!(matches!(
        Game::resume(b"not a save"),
        Err(PersistenceError::Compression(_))
    ));
}

#[test]
fn truncated_snapshot_is_rejected() {
    let game = begin(seeded());
    let blob = game.save().expect("encodes");
    assert!(Game::resume(&blob[..blob.len() / 2]).is_err());
}
