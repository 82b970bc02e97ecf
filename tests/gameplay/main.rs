mod items;
mod lamp;
mod movement;
mod opening;
mod persistence;
mod scoring;

use cave_adventure::{Game, GameConfig, load_world_from_str, tokenize};

pub const FIXTURE: &str = include_str!("../fixtures/cave.dat");

pub fn seeded() -> GameConfig {
    GameConfig::default().with_seed(7)
}

pub fn new_game(config: GameConfig) -> Game {
    let world = load_world_from_str(FIXTURE).expect("fixture world compiles");
    Game::new(world, config).expect("fixture world is playable")
}

/// A game past the opening question, standing on the road.
pub fn begin(config: GameConfig) -> Game {
    let mut game = new_game(config);
    play(&mut game, "no");
    game
}

/// Type one line and return what the game printed.
pub fn play(game: &mut Game, line: &str) -> String {
    let tokens = tokenize(line);
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();
    game.do_command(&words).expect("command runs").text()
}

pub fn play_all(game: &mut Game, lines: &[&str]) -> String {
    lines.iter().map(|line| play(game, line)).collect()
}
