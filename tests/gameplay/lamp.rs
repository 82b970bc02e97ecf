use cave_adventure::engine::Phase;
use cave_adventure::world::RoomId;

use crate::{begin, play, play_all, seeded};

#[test]
fn lamp_warns_once_then_runs_out() {
    let mut game = begin(seeded().with_lamp_turns(33));
    play_all(&mut game, &["enter", "take lamp"]);
    assert!(play(&mut game, "light lamp").starts_with("YOUR LAMP IS NOW ON."));
    assert_eq!(game.lamp_turns(), 33);

    let mut transcript = String::new();
    for step in 0..60 {
        if game.is_finished() {
            break;
        }
        let line = if step % 2 == 0 { "out" } else { "enter" };
        transcript.push_str(&play(&mut game, line));
    }

    assert_eq!(transcript.matches("YOUR LAMP IS GETTING DIM").count(), 1);
    assert_eq!(transcript.matches("YOUR LAMP HAS RUN OUT OF POWER.").count(), 1);
    assert!(transcript.contains("SO LET'S JUST CALL IT A DAY."));
    assert!(transcript.contains("YOU SCORED 32 OUT OF A POSSIBLE 314"));
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.lamp_turns(), -1);
}

#[test]
fn an_unlit_lamp_burns_nothing() {
    let mut game = begin(seeded().with_lamp_turns(40));
    play_all(&mut game, &["enter", "take lamp", "light lamp", "out", "enter"]);
    assert_eq!(game.lamp_turns(), 38);

    assert!(play(&mut game, "extinguish lamp").starts_with("YOUR LAMP IS NOW OFF."));
    play_all(&mut game, &["out", "enter", "out"]);
    assert_eq!(game.lamp_turns(), 37);
}

#[test]
fn a_lit_lamp_lights_the_hall() {
    let mut game = begin(seeded());
    play_all(
        &mut game,
        &["enter", "take lamp", "take keys", "light lamp", "out", "grate", "unlock grate", "down"],
    );
    let text = play(&mut game, "down");
    assert!(text.starts_with("YOU ARE AT ONE END OF A VAST HALL"));
    assert!(!text.contains("PITCH DARK"));
}

#[test]
fn lamp_dies_underground_without_ending_the_game() {
    let mut game = begin(seeded().with_lamp_turns(40));
    play_all(
        &mut game,
        &["enter", "take lamp", "take keys", "light lamp", "out", "grate", "unlock grate", "down"],
    );
    assert_eq!(game.location(), RoomId(9));
    let lamp = game.cast().lamp;

    let mut transcript = String::new();
    for _ in 0..40 {
        transcript.push_str(&play(&mut game, "inventory"));
        if transcript.contains("YOUR LAMP HAS RUN OUT OF POWER.") {
            break;
        }
    }
    assert!(transcript.contains("YOUR LAMP HAS RUN OUT OF POWER."));
    assert_eq!(game.object(lamp).prop, 0);
    assert_eq!(game.lamp_turns(), -1);

    let text = play(&mut game, "inventory");
    assert!(!text.contains("CALL IT A DAY"));
    assert_eq!(game.phase(), Phase::AwaitingCommand);
    assert_eq!(game.location(), RoomId(9));
}
