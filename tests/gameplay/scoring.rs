use cave_adventure::engine::Phase;
use cave_adventure::world::HintId;
use cave_adventure::Pending;
use proptest::prelude::*;

use crate::{begin, play, play_all, seeded};

#[test]
fn score_command_reports_without_the_quitting_bonus() {
    let mut game = begin(seeded());
    let text = play(&mut game, "score");
    assert!(text.starts_with("IF YOU WERE TO QUIT NOW, YOU WOULD SCORE 32 OUT OF A POSSIBLE 314."));
    assert!(text.contains("DO YOU INDEED WISH TO QUIT NOW?"));
    assert_eq!(game.phase(), Phase::AwaitingYesNo(Pending::Score));

    assert_eq!(play(&mut game, "no"), "OK\n\n");
    assert_eq!(game.phase(), Phase::AwaitingCommand);
}

#[test]
fn quitting_prints_score_and_rank() {
    let mut game = begin(seeded());
    assert!(play(&mut game, "quit").starts_with("DO YOU REALLY WANT TO QUIT NOW?"));
    assert_eq!(play(&mut game, "maybe"), "PLEASE ANSWER THE QUESTION.\n");

    let text = play(&mut game, "y");
    assert!(text.starts_with("OK"));
    assert!(text.contains("YOU SCORED 36 OUT OF A POSSIBLE 314 USING 1 TURNS."));
    assert!(text.contains("YOUR SCORE QUALIFIES YOU AS A NOVICE CLASS ADVENTURER."));
    assert!(text.contains("YOU NEED 65 MORE POINTS"));
    assert!(game.is_finished());
}

#[test]
fn nothing_happens_after_quitting() {
    let mut game = begin(seeded());
    play_all(&mut game, &["quit", "yes"]);
    assert!(game.is_finished());
    let (turns, location, score) = (game.turns(), game.location(), game.score());

    assert_eq!(play(&mut game, "south"), "");
    assert_eq!(play(&mut game, "enter"), "");
    assert_eq!(game.turns(), turns);
    assert_eq!(game.location(), location);
    assert_eq!(game.score(), score);
    assert_eq!(game.phase(), Phase::Finished);
}

#[test]
fn declining_to_quit_carries_on() {
    let mut game = begin(seeded());
    play(&mut game, "quit");
    assert_eq!(play(&mut game, "n"), "OK\n\n");
    assert!(!game.is_finished());
    assert!(play(&mut game, "south").starts_with("YOU ARE IN A VALLEY"));
}

#[test]
fn seeing_a_treasure_is_worth_two_points() {
    let mut game = begin(seeded());
    play_all(&mut game, &["enter", "take keys", "out", "grate", "unlock grate"]);
    assert_eq!(game.score().0, 36);
    play(&mut game, "down");
    assert_eq!(game.score().0, 38);
}

#[test]
fn loitering_earns_a_hint_that_costs_points() {
    let mut game = begin(seeded());
    play_all(&mut game, &["grate", "inventory", "inventory"]);
    assert_eq!(game.phase(), Phase::AwaitingCommand);

    let text = play(&mut game, "inventory");
    assert!(text.contains("ARE YOU TRYING TO GET INTO THE CAVE?"));
    assert_eq!(game.phase(), Phase::AwaitingYesNo(Pending::Hint(HintId(4))));

    assert!(play(&mut game, "yes").contains("HARDENED STEEL LOCK"));
    assert_eq!(game.score().0, 34);
    assert!(game.world().hints[&HintId(4)].used);
}

const COMMANDS: &[&str] = &[
    "north", "south", "east", "west", "up", "down", "enter", "out", "back", "look", "take lamp",
    "drop lamp", "take keys", "light lamp", "unlock grate", "grate", "inventory", "score", "no",
    "frobnicate",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn score_only_falls_when_the_player_dies(
        seed in any::<u64>(),
        script in prop::collection::vec(prop::sample::select(COMMANDS), 1..40),
    ) {
        let mut game = begin(seeded().with_seed(seed));
        let mut last = game.score().0;
        for line in script {
            let deaths = game.deaths();
            play(&mut game, line);
            let now = game.score().0;
            prop_assert!(now >= last || game.deaths() > deaths, "{line}: {last} -> {now}");
            last = now;
        }
    }
}
