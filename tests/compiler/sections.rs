use cave_adventure::world::{
    Action, Condition, HintId, LANDMARK_ROOMS, MessageId, ObjectId, RoomId, WordId,
};

use crate::{fixture_with, fixture_world};

#[test]
fn long_descriptions_join_their_lines() {
    let world = fixture_world();
    let road = world.room(RoomId(1));
    assert!(road.long_description.starts_with("YOU ARE STANDING AT THE END OF A ROAD"));
    assert!(road.long_description.ends_with("DOWN A GULLY.\n"));
    assert_eq!(road.long_description.lines().count(), 3);
    assert_eq!(road.short_description, "YOU'RE AT END OF ROAD AGAIN.\n");
    assert!(world.room(RoomId(5)).short_description.is_empty());
}

#[test]
fn landmark_rooms_always_exist() {
    let world = fixture_world();
    for room in LANDMARK_ROOMS {
        assert!(world.rooms.contains_key(&RoomId(*room)), "room {room}");
    }
}

#[test]
fn conditional_moves_keep_file_order() {
    let world = fixture_world();
    let table = &world.room(RoomId(8)).travel_table;
    let down: Vec<_> = table
        .iter()
        .filter(|m| m.is_triggered_by(WordId(30)))
        .collect();
    assert_eq!(down.len(), 2);
    assert_eq!(down[0].condition, Condition::PropNotEqual(ObjectId(3), 0));
    assert_eq!(down[0].action, Action::GoToRoom(RoomId(9)));
    assert_eq!(down[1].condition, Condition::Unconditional);
    assert_eq!(down[1].action, Action::PrintMessage(MessageId(93)));
}

#[test]
fn repeated_first_verb_reuses_the_previous_verb_list() {
    let world = fixture_world();
    let table = &world.room(RoomId(6)).travel_table;
    assert_eq!(table[0].condition, Condition::Carrying(ObjectId(2)));
    assert_eq!(table[0].verbs, vec![WordId(45)]);
    assert_eq!(table[1].verbs, vec![WordId(45)]);
    assert_eq!(table[1].action, Action::GoToRoom(RoomId(5)));
}

#[test]
fn verb_one_marks_a_forced_room() {
    let world = fixture_world();
    assert!(world.room(RoomId(7)).is_forced());
    assert!(world.room(RoomId(7)).travel_table[0].verbs.is_empty());
    assert!(!world.room(RoomId(6)).is_forced());
}

#[test]
fn vocabulary_restores_long_words_and_truncations() {
    let world = fixture_world();
    let vocab = &world.vocabulary;

    let inventory = vocab.lookup("inventory").expect("inventory");
    assert_eq!(inventory.id, WordId(2020));
    assert_eq!(vocab.lookup("inven").map(|w| w.id), Some(WordId(2020)));
    assert_eq!(vocab.lookup("take").map(|w| w.id), Some(WordId(2001)));
    assert_eq!(vocab.canonical(WordId(2001)), "carry");
    assert_eq!(vocab.canonical(WordId(63)), "depression");
    assert_eq!(vocab.default_message(WordId(2001)), Some(MessageId(24)));
    assert!(vocab.lookup("dance").is_none());
}

#[test]
fn objects_carry_names_texts_and_placement() {
    let world = fixture_world();

    let lamp = world.object(ObjectId(2));
    assert_eq!(lamp.names, vec!["lamp", "lantern"]);
    assert_eq!(lamp.inventory_message, "BRASS LANTERN");
    assert_eq!(lamp.message(0), "THERE IS A SHINY BRASS LAMP NEARBY.\n");
    assert_eq!(lamp.starting_rooms, vec![RoomId(3)]);
    assert!(!lamp.is_fixed);

    let grate = world.object(ObjectId(3));
    assert_eq!(grate.rooms(), &[RoomId(8), RoomId(9)]);
    assert!(grate.is_fixed);

    assert!(world.object(ObjectId(50)).is_treasure);
    assert!(!world.object(ObjectId(39)).is_treasure);
    // Named but never placed.
    assert!(world.object(ObjectId(64)).rooms().is_empty());
}

#[test]
fn room_bits_set_light_and_liquid() {
    let world = fixture_world();
    assert!(!world.room(RoomId(1)).is_dark());
    assert!(world.room(RoomId(15)).is_dark());
    assert_eq!(world.room(RoomId(1)).liquid, Some(ObjectId(21)));
    assert_eq!(world.room(RoomId(5)).liquid, None);
}

#[test]
fn hints_merge_rooms_and_definition() {
    let world = fixture_world();
    let hint = &world.hints[&HintId(4)];
    assert_eq!(hint.rooms, vec![RoomId(8)]);
    assert_eq!(hint.turns_needed, 4);
    assert_eq!(hint.penalty, 2);
    assert_eq!(hint.question, MessageId(62));
    assert_eq!(hint.answer, MessageId(63));
    assert!(world.hints[&HintId(3)].rooms.is_empty());
}

#[test]
fn class_messages_and_magic_messages() {
    let world = fixture_world();
    let thresholds: Vec<i32> = world.class_messages.iter().map(|c| c.threshold).collect();
    assert_eq!(thresholds, vec![35, 100, 200, 9999]);
    assert!(world.magic_messages[&1].contains("GREEN SMOKE"));
}

#[test]
fn silent_records_add_no_text() {
    let data = fixture_with("2\n1\t>$<\n5\t>$<\n-1\n12\n2\t>$<\n-1\n");
    let world = cave_adventure::load_world_from_str(&data).expect("still compiles");
    assert_eq!(world.room(RoomId(1)).short_description, "YOU'RE AT END OF ROAD AGAIN.\n");
    assert!(world.room(RoomId(5)).short_description.is_empty());
    assert_eq!(world.magic_messages[&2], "");
    assert!(world.magic_messages[&1].contains("GREEN SMOKE"));
}

#[test]
fn unknown_sections_are_skipped() {
    let data = fixture_with("13\n1\tWHATEVER THIS IS\n-1\n");
    let world = cave_adventure::load_world_from_str(&data).expect("still compiles");
    assert_eq!(world.rooms.len(), fixture_world().rooms.len());
}

#[test]
fn file_and_string_loaders_agree() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cave.dat");
    let from_file = cave_adventure::load_world_from_file(&path).expect("fixture file");
    let from_str = fixture_world();
    assert_eq!(from_file.rooms.len(), from_str.rooms.len());
    assert_eq!(from_file.messages, from_str.messages);
}
