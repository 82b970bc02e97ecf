use cave_adventure::GameConfig;
use cave_adventure::world::{ObjectId, Placement, RoomId};

use crate::{begin, play, play_all, seeded};

const KEYS: ObjectId = ObjectId(1);
const LAMP: ObjectId = ObjectId(2);
const FOOD: ObjectId = ObjectId(19);
const BOTTLE: ObjectId = ObjectId(20);
const WATER: ObjectId = ObjectId(21);

#[test]
fn carried_objects_are_in_no_room() {
    let mut game = begin(seeded());
    play(&mut game, "enter");
    assert!(play(&mut game, "take lamp").starts_with("OK"));

    let lamp = game.object(LAMP);
    assert_eq!(lamp.placement(), &Placement::Toted);
    assert!(lamp.rooms().is_empty());
    assert!(!game.world().objects_at(RoomId(3)).contains(&LAMP));
    assert_eq!(game.inventory(), vec![LAMP]);

    assert!(play(&mut game, "take lamp").starts_with("YOU ARE ALREADY CARRYING IT!"));

    play(&mut game, "out");
    assert!(play(&mut game, "drop lamp").starts_with("OK"));
    assert_eq!(game.object(LAMP).rooms(), &[RoomId(1)]);
    assert!(game.inventory().is_empty());
}

#[test]
fn inventory_lists_what_is_carried() {
    let mut game = begin(seeded());
    assert!(play(&mut game, "inventory").starts_with("YOU'RE NOT CARRYING ANYTHING."));

    play_all(&mut game, &["enter", "get lamp"]);
    let text = play(&mut game, "inven");
    assert!(text.starts_with("YOU ARE CURRENTLY HOLDING THE FOLLOWING:"));
    assert!(text.contains("BRASS LANTERN"));
}

#[test]
fn carrying_capacity_is_configurable() {
    let mut game = begin(seeded().with_inventory_limit(1));
    play(&mut game, "enter");
    assert!(play(&mut game, "take keys").starts_with("OK"));
    assert!(play(&mut game, "take lamp").starts_with("YOU CAN'T CARRY ANYTHING MORE."));
    assert!(game.object(LAMP).is_at(RoomId(3)));

    let mut game = begin(GameConfig::default().with_seed(7));
    play(&mut game, "enter");
    for line in ["take keys", "take lamp", "take food"] {
        assert!(play(&mut game, line).starts_with("OK"), "{line}");
    }
    assert_eq!(game.inventory(), vec![KEYS, LAMP, FOOD]);
}

#[test]
fn the_bottle_brings_its_water() {
    let mut game = begin(seeded());
    play_all(&mut game, &["enter", "take bottle"]);
    assert!(game.object(BOTTLE).is_toting());
    assert!(game.object(WATER).is_toting());

    assert!(play(&mut game, "fill bottle").starts_with("YOUR BOTTLE IS ALREADY FULL."));
    assert!(play(&mut game, "pour water").starts_with("YOUR BOTTLE IS EMPTY"));
    assert!(!game.object(WATER).is_toting());
    assert!(play(&mut game, "fill bottle").starts_with("YOUR BOTTLE IS NOW FULL OF WATER."));
    assert!(game.object(WATER).is_toting());

    play(&mut game, "drop bottle");
    assert!(game.object(BOTTLE).is_at(RoomId(3)));
    assert!(game.object(WATER).rooms().is_empty());
    assert!(!game.object(WATER).is_toting());
}

#[test]
fn fixed_and_absent_objects_cannot_be_taken() {
    let mut game = begin(seeded());
    assert_eq!(play(&mut game, "take lamp"), "I SEE NO LAMP HERE.\n\n");

    play(&mut game, "grate");
    assert!(play(&mut game, "take grate").starts_with("YOU CAN'T BE SERIOUS!"));
    assert!(game.inventory().is_empty());
}

#[test]
fn lone_verbs_and_nouns_ask_for_more() {
    let mut game = begin(seeded());
    play(&mut game, "enter");
    assert_eq!(play(&mut game, "take"), "TAKE WHAT?\n\n");
    assert_eq!(play(&mut game, "lamp"), "WHAT DO YOU WANT TO DO WITH THE LAMP?\n\n");
    assert!(play(&mut game, "drop keys").starts_with("YOU AREN'T CARRYING IT!"));
}

#[test]
fn eating_the_food() {
    let mut game = begin(seeded());
    play(&mut game, "enter");
    assert!(play(&mut game, "eat food").starts_with("THANK YOU, IT WAS DELICIOUS!"));
    assert!(game.object(FOOD).rooms().is_empty());
    assert!(!game.object(FOOD).is_toting());
}

#[test]
fn saying_a_word_repeats_it() {
    let mut game = begin(seeded());
    play(&mut game, "enter");
    assert!(play(&mut game, "say lamp").starts_with("OKAY, \"LAMP\"."));
}
