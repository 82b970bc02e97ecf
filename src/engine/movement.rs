use tracing::trace;

use crate::Game;
use crate::engine::conditions::condition_passes;
use crate::engine::helpers::message;
use crate::engine::npcs::move_dwarves;
use crate::engine::output::Output;
use crate::engine::render::describe_location;
use crate::engine::turn::die;
use crate::world::{Action, RoomId, Word, WordId};

/// The plover passage between the Y2 side and the emerald room.
const PLOVER_ROOM: RoomId = RoomId(100);
const ALCOVE: RoomId = RoomId(99);

/// Move the player (or keep them in place when `newloc` is `None`), then
/// let the dwarves take their turn and describe wherever the player ends
/// up.
pub(crate) fn move_to(out: &mut Output, game: &mut Game, newloc: Option<RoomId>) {
    let loc = game.loc;
    let mut newloc = newloc.unwrap_or(loc);

    if game.is_closing && game.world.room(newloc).is_aboveground() {
        message(out, game, 130);
        newloc = loc;
        if !game.panic {
            game.clock2 = 15;
            game.panic = true;
        }
    }

    let here = game.here();
    let must_allow_move = newloc == loc || here.is_forced() || here.is_forbidden_to_pirate;
    let dwarf_blocking_the_way = game
        .dwarves
        .iter()
        .any(|d| d.old_room == newloc && d.has_seen_adventurer);
    if !must_allow_move && dwarf_blocking_the_way {
        newloc = loc;
        message(out, game, 2);
    }

    if newloc != loc {
        trace!(from = loc.0, to = newloc.0, "player moves");
    }
    game.loc = newloc;

    let here = game.here();
    let is_dwarf_area = !(here.is_forced() || here.is_forbidden_to_pirate);
    if is_dwarf_area && game.dwarf_stage > 0 {
        move_dwarves(out, game);
    } else {
        if is_dwarf_area && here.is_after_hall_of_mists() {
            game.dwarf_stage = 1;
        }
        describe_location(out, game);
    }
}

fn shift_oldlocs(game: &mut Game) {
    game.oldloc2 = game.oldloc;
    game.oldloc = game.loc;
}

pub(crate) fn do_motion(out: &mut Output, game: &mut Game, word: &Word) {
    let special = ["null", "back", "look", "cave"]
        .into_iter()
        .find(|name| game.world.vocabulary.is(word.id, name));

    let mut motion = word.id;
    match special {
        Some("null") => {
            move_to(out, game, None);
            return;
        }
        Some("back") => match way_back(game) {
            Ok(via) => motion = via,
            Err(n) => {
                message(out, game, n);
                move_to(out, game, None);
                return;
            }
        },
        Some("look") => {
            if game.look_complaints > 0 {
                message(out, game, 15);
                game.look_complaints -= 1;
            }
            let loc = game.loc;
            game.world.room_mut(loc).times_described = 0;
            move_to(out, game, None);
            game.could_fall_in_pit = false;
            return;
        }
        Some("cave") => {
            let n = if game.here().is_aboveground() { 57 } else { 58 };
            message(out, game, n);
            move_to(out, game, None);
            return;
        }
        _ => shift_oldlocs(game),
    }

    travel(out, game, word, motion);
}

/// Work out which motion retraces the last step, shifting the remembered
/// locations as it goes. `Err` carries the message for when it cannot be
/// done.
fn way_back(game: &mut Game) -> Result<WordId, u16> {
    let dest = if game.world.room(game.oldloc).is_forced() {
        game.oldloc2
    } else {
        game.oldloc
    };
    shift_oldlocs(game);
    if dest == game.loc {
        return Err(91);
    }

    let mut alt = None;
    for mv in &game.here().travel_table {
        let Action::GoToRoom(to) = mv.action else {
            continue;
        };
        if to == dest {
            if let Some(verb) = mv.verbs.first() {
                return Ok(*verb);
            }
        }
        // A forced room that leads straight on to where we came from.
        let via = game.world.room(to);
        if via.is_forced()
            && via.travel_table.first().and_then(|m| m.destination()) == Some(dest)
        {
            alt = mv.verbs.first().copied().or(alt);
        }
    }
    alt.ok_or(140)
}

/// Take the first move in the current room's travel table that `motion`
/// triggers and whose condition holds.
fn travel(out: &mut Output, game: &mut Game, word: &Word, motion: WordId) {
    let table = game.here().travel_table.clone();
    for mv in table.iter().filter(|mv| mv.is_triggered_by(motion)) {
        if !condition_passes(game, mv.condition) {
            continue;
        }

        match mv.action {
            Action::GoToRoom(room) => move_to(out, game, Some(room)),
            Action::PrintMessage(n) => {
                out.say(game.world.message(n));
                move_to(out, game, None);
            }
            Action::SpecialCode(301) => plover_passage(out, game),
            Action::SpecialCode(302) => {
                let loc = game.loc;
                game.drop_at(game.cast.emerald, loc);
                do_motion(out, game, word);
            }
            Action::SpecialCode(_) => troll_bridge(out, game),
        }
        return;
    }

    let n = match motion.0 {
        29..=30 | 43..=50 => 9,
        7 | 36 | 37 => 10,
        11 | 19 => 11,
        62 | 65 => 42,
        17 => 80,
        _ => 12,
    };
    message(out, game, n);
    move_to(out, game, None);
}

/// Only the emerald fits through the plover passage.
fn plover_passage(out: &mut Output, game: &mut Game) {
    let inventory = game.world.inventory();
    let emerald = game.cast.emerald;
    if !inventory.is_empty() && inventory != [emerald] {
        message(out, game, 117);
        move_to(out, game, None);
    } else if game.loc == PLOVER_ROOM {
        move_to(out, game, Some(ALCOVE));
    } else {
        move_to(out, game, Some(PLOVER_ROOM));
    }
}

fn troll_bridge(out: &mut Output, game: &mut Game) {
    let c = game.cast;
    if game.prop(c.troll) == 1 {
        // He catches the player on the bridge and blocks it again.
        out.say(game.obj(c.troll).message(1));
        game.set_prop(c.troll, 0);
        game.obj_mut(c.troll).restore();
        game.destroy(c.troll2);
        move_to(out, game, None);
        return;
    }

    let loc = game.loc;
    let other_side = game
        .obj(c.troll)
        .starting_rooms
        .iter()
        .copied()
        .find(|room| *room != loc)
        .unwrap_or(loc);
    game.loc = other_side;
    if game.prop(c.troll) == 0 {
        game.set_prop(c.troll, 1);
    }
    if !game.is_toting(c.bear) {
        move_to(out, game, None);
        return;
    }

    // The bridge gives way under the bear.
    message(out, game, 162);
    game.set_prop(c.chasm, 1);
    game.set_prop(c.troll, 2);
    let loc = game.loc;
    game.drop_at(c.bear, loc);
    game.obj_mut(c.bear).is_fixed = true;
    game.set_prop(c.bear, 3);
    if game.prop(c.spices) < 0 {
        game.impossible_treasures += 1;
    }
    game.oldloc2 = game.loc;
    die(out, game);
}
