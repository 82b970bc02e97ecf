use crate::Game;
use crate::engine::helpers::message;
use crate::engine::movement::do_motion;
use crate::engine::output::Output;
use crate::engine::turn::{die, die_here, finish_turn};
use crate::world::{RoomId, Word, WordId};

/// Any motion word will do for a forced room; the first entry fires
/// whatever was typed.
const DUMMY_MOTION: WordId = WordId(2);
const Y2: RoomId = RoomId(33);

/// Describe where the player is and what lies around, then end the turn.
pub(crate) fn describe_location(out: &mut Output, game: &mut Game) {
    if game.loc == RoomId(0) {
        die(out, game);
        return;
    }

    let is_forced = game.here().is_forced();
    let could_fall = game.is_dark() && game.could_fall_in_pit;
    if could_fall && !is_forced && game.random() < 0.35 {
        die_here(out, game);
        return;
    }

    if game.is_toting(game.cast.bear) {
        message(out, game, 141);
    }

    if game.is_dark() && !is_forced {
        message(out, game, 16);
    } else {
        let period = game.full_description_period.max(1);
        let loc = game.loc;
        let room = game.world.room_mut(loc);
        let do_short = room.times_described % period != 0;
        room.times_described += 1;
        if do_short && !room.short_description.is_empty() {
            out.say(&room.short_description);
        } else {
            out.say(&room.long_description);
        }
    }

    if is_forced {
        let word = Word {
            id: DUMMY_MOTION,
            text: game.world.vocabulary.canonical(DUMMY_MOTION).to_string(),
        };
        do_motion(out, game, &word);
        return;
    }

    if game.loc == Y2 && game.random() < 0.25 && !game.is_closing {
        message(out, game, 8);
    }

    if !game.is_dark() {
        describe_objects(out, game);
    }

    finish_turn(out, game, None);
}

fn describe_objects(out: &mut Output, game: &mut Game) {
    let c = game.cast;
    for id in game.objects_here() {
        if id == c.steps && game.is_toting(c.gold) {
            continue;
        }

        if game.prop(id) < 0 {
            if game.is_closed {
                continue;
            }
            // First sighting of a treasure.
            let found = if id == c.rug || id == c.chain { 1 } else { 0 };
            game.set_prop(id, found);
            game.treasures_not_found -= 1;
            if game.treasures_not_found > 0
                && game.treasures_not_found == game.impossible_treasures
            {
                game.lamp_turns = game.lamp_turns.min(35);
            }
        }

        // The steps look different from the bottom of the pit.
        let prop = if id == c.steps && game.obj(c.steps).rooms().get(1) == Some(&game.loc) {
            1
        } else {
            game.prop(id)
        };
        out.say(game.obj(id).message(prop));
    }
}
