use cave_adventure::engine::Phase;
use cave_adventure::world::RoomId;
use cave_adventure::{GameConfig, Pending};

use crate::{begin, new_game, play, seeded};

#[test]
fn game_opens_with_the_instructions_question() {
    let mut game = new_game(seeded());
    let text = game.start().text();
    assert!(text.contains("WELCOME TO ADVENTURE!!"));
    assert_eq!(game.phase(), Phase::AwaitingYesNo(Pending::Instructions));
    // Only the first call starts the game.
    assert!(game.start().is_empty());
}

#[test]
fn other_answers_are_refused_until_yes_or_no() {
    let mut game = new_game(seeded());
    game.start();
    assert_eq!(play(&mut game, "plugh"), "PLEASE ANSWER THE QUESTION.\n");
    assert_eq!(game.turns(), 0);
    assert_eq!(game.phase(), Phase::AwaitingYesNo(Pending::Instructions));
}

#[test]
fn declining_instructions_puts_the_player_on_the_road() {
    let mut game = new_game(seeded());
    game.start();
    let text = play(&mut game, "no");
    assert!(text.starts_with("YOU ARE STANDING AT THE END OF A ROAD"));
    assert_eq!(game.location(), RoomId(1));
    assert_eq!(game.phase(), Phase::AwaitingCommand);
    assert_eq!(game.lamp_turns(), 330);
    assert_eq!(game.score(), (36, 314));
}

#[test]
fn instructions_cost_points_but_buy_lamp_fuel() {
    let mut game = new_game(seeded());
    game.start();
    let text = play(&mut game, "yes");
    assert!(text.contains("SOMEWHERE NEARBY IS COLOSSAL CAVE"));
    assert!(text.contains("END OF A ROAD"));
    assert_eq!(game.lamp_turns(), 1000);
    assert_eq!(game.score().0, 31);
}

#[test]
fn first_command_starts_an_unstarted_game() {
    let mut game = new_game(seeded());
    let text = play(&mut game, "n");
    assert!(text.starts_with("WELCOME TO ADVENTURE!!"));
    assert!(text.contains("END OF A ROAD"));
}

#[test]
fn config_reaches_the_game() {
    let game = begin(GameConfig::default().with_seed(3).with_lamp_turns(50));
    assert_eq!(game.lamp_turns(), 50);
    assert_eq!(game.config().seed, Some(3));
}

#[test]
fn answers_are_read_in_any_case() {
    let mut game = new_game(seeded());
    game.start();
    let text = game.do_command(&["No"]).expect("answer").text();
    assert!(text.starts_with("YOU ARE STANDING AT THE END OF A ROAD"));
    assert_eq!(game.phase(), Phase::AwaitingCommand);

    let mut game = new_game(seeded());
    game.start();
    game.do_command(&["YES"]).expect("answer");
    assert_eq!(game.lamp_turns(), 1000);
    assert_eq!(game.phase(), Phase::AwaitingCommand);
}
