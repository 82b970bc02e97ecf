use cave_adventure::world::RoomId;

use crate::{begin, play, play_all, seeded};

const ROAD_SHORT: &str = "YOU'RE AT END OF ROAD AGAIN.";
const ROAD_LONG: &str = "YOU ARE STANDING AT THE END OF A ROAD";

#[test]
fn no_south_north_walk() {
    let mut game = begin(seeded());
    let valley = play(&mut game, "south");
    assert!(valley.starts_with("YOU ARE IN A VALLEY IN THE FOREST"));
    assert_eq!(game.location(), RoomId(4));

    let road = play(&mut game, "north");
    assert_eq!(road, format!("{ROAD_SHORT}\n\n"));
    assert_eq!(game.location(), RoomId(1));
    assert!(game.inventory().is_empty());
    // Answering the opening question is not a turn.
    assert_eq!(game.turns(), 2);
}

#[test]
fn every_fifth_visit_gets_the_long_description() {
    let mut game = begin(seeded());
    for visit in 1..=4 {
        play(&mut game, "s");
        let text = play(&mut game, "n");
        assert!(text.starts_with(ROAD_SHORT), "visit {visit}: {text}");
    }
    play(&mut game, "s");
    assert!(play(&mut game, "n").starts_with(ROAD_LONG));
}

#[test]
fn look_repeats_the_long_description_and_complains_a_while() {
    let mut game = begin(seeded());
    for _ in 0..3 {
        let text = play(&mut game, "look");
        assert!(text.starts_with("SORRY, BUT I AM NOT ALLOWED"));
        assert!(text.contains(ROAD_LONG));
    }
    let text = play(&mut game, "look");
    assert!(text.starts_with(ROAD_LONG));
}

#[test]
fn brief_mode_keeps_descriptions_short() {
    let mut game = begin(seeded());
    assert!(play(&mut game, "brief").contains("I'LL ONLY DESCRIBE A PLACE IN FULL"));
    for _ in 0..6 {
        play(&mut game, "s");
        assert!(play(&mut game, "n").starts_with(ROAD_SHORT));
    }
}

#[test]
fn back_retraces_the_last_step() {
    let mut game = begin(seeded());
    play(&mut game, "south");
    play(&mut game, "back");
    assert_eq!(game.location(), RoomId(1));
}

#[test]
fn first_passing_move_wins() {
    // Without the lamp the carrying condition fails and the next entry
    // for the same verbs applies.
    let mut game = begin(seeded());
    play(&mut game, "east");
    let text = play(&mut game, "north");
    assert!(text.starts_with("YOU ARE IN OPEN FOREST, WITH A DEEP VALLEY"));
    assert_eq!(game.location(), RoomId(5));

    let mut game = begin(seeded());
    let text = play_all(&mut game, &["enter", "take lamp", "out", "east", "north"]);
    assert!(text.contains("YOU SLIP ON THE WET LEAVES"));
    assert_eq!(game.location(), RoomId(1));
}

#[test]
fn missing_direction_and_the_tenth_west() {
    let mut game = begin(seeded());
    play(&mut game, "enter");
    for i in 1..10 {
        let text = play(&mut game, "west");
        assert!(text.starts_with("THERE IS NO WAY TO GO THAT DIRECTION."), "west {i}");
        assert!(!text.contains("SIMPLY TYPE W"));
    }
    assert!(play(&mut game, "west").starts_with("IF YOU PREFER, SIMPLY TYPE W"));
    assert_eq!(game.location(), RoomId(3));
    // The abbreviation does not count.
    assert!(!play(&mut game, "w").contains("SIMPLY TYPE W"));
}

#[test]
fn message_moves_leave_the_player_in_place() {
    let mut game = begin(seeded());
    let text = play(&mut game, "up");
    assert!(text.starts_with("THERE IS NOTHING HERE TO CLIMB."));
    assert_eq!(game.location(), RoomId(1));
}

#[test]
fn the_grate_noun_walks_to_the_depression() {
    let mut game = begin(seeded());
    let text = play(&mut game, "grate");
    assert!(text.starts_with("YOU ARE IN A 20-FOOT DEPRESSION"));
    assert!(text.contains("THE GRATE IS LOCKED."));
    assert_eq!(game.location(), RoomId(8));

    assert!(play(&mut game, "down").starts_with("YOU CAN'T GO THROUGH A LOCKED STEEL GRATE!"));
    assert_eq!(game.location(), RoomId(8));
}

#[test]
fn unlocking_the_grate_opens_the_way_down() {
    let mut game = begin(seeded());
    play_all(&mut game, &["enter", "take keys", "out", "grate"]);
    assert!(play(&mut game, "unlock grate").starts_with("THE GRATE IS NOW UNLOCKED."));

    let text = play(&mut game, "down");
    assert!(text.starts_with("YOU ARE IN A SMALL CHAMBER BENEATH"));
    assert!(text.contains("LARGE SPARKLING NUGGET OF GOLD"));
    assert_eq!(game.location(), RoomId(9));

    let text = play(&mut game, "down");
    assert!(text.starts_with("IT IS NOW PITCH DARK."));
    assert_eq!(game.location(), RoomId(15));
    assert_eq!(game.dwarf_stage(), 1);
}

#[test]
fn enter_stream_gets_feet_wet_only_near_water() {
    let mut game = begin(seeded());
    assert!(play(&mut game, "enter stream").starts_with("YOUR FEET ARE NOW WET."));
    play(&mut game, "east");
    assert!(play(&mut game, "enter water").starts_with("WHERE?"));
    assert_eq!(game.location(), RoomId(6));
}

#[test]
fn cave_word_points_at_the_stream() {
    let mut game = begin(seeded());
    assert!(play(&mut game, "cave").starts_with("I DON'T KNOW WHERE THE CAVE IS"));
}

#[test]
fn unknown_words_and_comebacks() {
    let mut game = begin(seeded());
    let text = play(&mut game, "frobnicate");
    let replies = ["I DON'T KNOW THAT WORD.\n\n", "WHAT?\n\n", "I DON'T UNDERSTAND THAT!\n\n"];
    assert!(replies.contains(&text.as_str()), "{text}");

    assert!(play(&mut game, "tree").starts_with("THE TREES OF THE FOREST"));
    assert!(!play(&mut game, "north south east").is_empty());
    assert_eq!(game.location(), RoomId(1));
}
