//! Verb handlers other than the item shuffling in `items`, and the table
//! that routes a verb to its intransitive or transitive form.

use tracing::{debug, info};

use crate::Game;
use crate::engine::helpers::{
    ask_verb_what, default_message, i_see_no, message, say_okay_and_finish,
    write_default_message,
};
use crate::engine::items::{
    i_carry, i_drink, i_eat, i_fill, i_inventory, i_pour, t_carry, t_drink, t_drop, t_eat,
    t_fill, t_find, t_pour,
};
use crate::engine::movement::{do_motion, move_to};
use crate::engine::output::Output;
use crate::engine::parser::Verb;
use crate::engine::render::describe_location;
use crate::engine::score::{compute_score, score_and_exit};
use crate::engine::turn::{
    OYSTER_HINT, Pending, ask, ask_message, finish_turn, wake_repository_dwarves,
};
use crate::error::PersistenceError;
use crate::persist;
use crate::world::{MessageId, ObjectId, RoomId, Word, WordId};

/// Where the pearl rolls when the clam is opened.
const CUL_DE_SAC: RoomId = RoomId(105);
const REPOSITORY_NE: RoomId = RoomId(115);

const BONUS_BLAST_ROD_HERE: u16 = 135;
const BONUS_BLAST_NE: u16 = 134;
const BONUS_BLAST_SW: u16 = 133;

/// Run `action` on `obj`, or without an object when none was named.
pub(crate) fn perform(
    out: &mut Output,
    game: &mut Game,
    action: Verb,
    verb: &Word,
    obj: Option<ObjectId>,
) -> Result<(), PersistenceError> {
    match obj {
        None => intransitive(out, game, action, verb),
        Some(obj) => return transitive(out, game, action, verb, obj),
    }
    Ok(())
}

fn intransitive(out: &mut Output, game: &mut Game, action: Verb, verb: &Word) {
    match action {
        Verb::Carry => i_carry(out, game, verb),
        Verb::Unlock | Verb::Lock => i_unlock(out, game, action, verb),
        Verb::Nothing => say_okay_and_finish(out, game),
        Verb::Light => light(out, game, verb),
        Verb::Extinguish => extinguish(out, game, verb),
        Verb::Attack => i_attack(out, game, verb),
        Verb::Pour => i_pour(out, game, verb),
        Verb::Eat => i_eat(out, game, verb),
        Verb::Drink => i_drink(out, game, verb),
        Verb::Quit => ask_message(out, game, 22, Pending::Quit),
        Verb::Inventory => i_inventory(out, game),
        Verb::Fill => i_fill(out, game, verb),
        Verb::Blast => blast(out, game, verb),
        Verb::Score => i_score(out, game),
        Verb::Fee => i_fee(out, game, verb),
        Verb::Brief => {
            message(out, game, 156);
            game.full_description_period = 10000;
            game.look_complaints = 0;
            finish_turn(out, game, None);
        }
        Verb::Read => i_read(out, game, verb),
        Verb::Suspend => {
            out.say(format!("Provide \"{}\" with a name to save under", verb.text));
            finish_turn(out, game, None);
        }
        Verb::Hours => out.say("Open all day"),
        Verb::Drop
        | Verb::Say
        | Verb::Wave
        | Verb::Calm
        | Verb::Walk
        | Verb::Rub
        | Verb::Throw
        | Verb::Find
        | Verb::Feed
        | Verb::Break
        | Verb::Wake => ask_verb_what(out, game, verb),
    }
}

fn transitive(
    out: &mut Output,
    game: &mut Game,
    action: Verb,
    verb: &Word,
    obj: ObjectId,
) -> Result<(), PersistenceError> {
    match action {
        Verb::Carry => t_carry(out, game, verb, obj),
        Verb::Drop => t_drop(out, game, verb, obj),
        Verb::Say => {
            let name = game.obj(obj).name().to_string();
            out.say(format!("Okay, \"{name}\"."));
            finish_turn(out, game, None);
        }
        Verb::Unlock | Verb::Lock => t_unlock(out, game, action, verb, obj),
        Verb::Nothing => say_okay_and_finish(out, game),
        Verb::Light => light(out, game, verb),
        Verb::Extinguish => extinguish(out, game, verb),
        Verb::Wave => wave(out, game, verb, obj),
        Verb::Attack => t_attack(out, game, Some(obj)),
        Verb::Pour => t_pour(out, game, verb, obj),
        Verb::Eat => t_eat(out, game, verb, obj),
        Verb::Drink => t_drink(out, game, verb, obj),
        Verb::Rub => {
            if obj == game.cast.lamp {
                default_message(out, game, verb);
            } else {
                message(out, game, 71);
            }
            finish_turn(out, game, None);
        }
        Verb::Throw => throw(out, game, verb, obj),
        Verb::Find | Verb::Inventory => t_find(out, game, verb, obj),
        Verb::Feed => feed(out, game, verb, obj),
        Verb::Fill => t_fill(out, game, verb, obj),
        Verb::Blast => blast(out, game, verb),
        Verb::Read => t_read(out, game, verb, obj),
        Verb::Break => t_break(out, game, verb, obj),
        Verb::Wake => {
            if obj == game.cast.dwarf && game.is_closed {
                message(out, game, 199);
                wake_repository_dwarves(out, game);
            } else {
                write_default_message(out, game, verb);
            }
        }
        Verb::Suspend => {
            let handle = game.obj(obj).name().to_string();
            return t_suspend(out, game, &handle);
        }
        Verb::Calm
        | Verb::Walk
        | Verb::Quit
        | Verb::Score
        | Verb::Fee
        | Verb::Brief
        | Verb::Hours => write_default_message(out, game, verb),
    }
    Ok(())
}

//////////////////////
/// LOCK AND UNLOCK ///
//////////////////////

fn i_unlock(out: &mut Output, game: &mut Game, action: Verb, verb: &Word) {
    let c = game.cast;
    let lockable: Vec<ObjectId> = [c.grate, c.door, c.oyster, c.clam, c.chain]
        .into_iter()
        .filter(|id| game.is_here(*id))
        .collect();
    match lockable.as_slice() {
        [] => {
            message(out, game, 28);
            finish_turn(out, game, None);
        }
        [only] => t_unlock(out, game, action, verb, *only),
        _ => ask_verb_what(out, game, verb),
    }
}

fn t_unlock(out: &mut Output, game: &mut Game, action: Verb, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    let locking = action == Verb::Lock;

    if obj == c.clam || obj == c.oyster {
        let oy = u16::from(obj == c.oyster);
        if locking {
            message(out, game, 61);
        } else if !game.is_toting(c.trident) {
            message(out, game, 122 + oy);
        } else if game.is_toting(obj) {
            message(out, game, 120 + oy);
        } else if obj == c.oyster {
            message(out, game, 125);
        } else {
            // Out comes the pearl, and the clam turns out to be an oyster.
            message(out, game, 124);
            game.destroy(c.clam);
            let loc = game.loc;
            game.drop_at(c.oyster, loc);
            game.drop_at(c.pearl, CUL_DE_SAC);
        }
    } else if obj == c.door {
        let n = if game.prop(c.door) == 1 { 54 } else { 111 };
        message(out, game, n);
    } else if obj == c.cage {
        message(out, game, 32);
    } else if obj == c.keys {
        message(out, game, 55);
    } else if obj == c.grate || obj == c.chain {
        if !game.is_here(c.keys) {
            message(out, game, 31);
        } else if obj == c.chain {
            if locking {
                lock_chain(out, game);
            } else {
                unlock_chain(out, game);
            }
        } else if game.is_closing {
            if !game.panic {
                game.clock2 = 15;
                game.panic = true;
            }
            message(out, game, 130);
        } else {
            let old = game.prop(c.grate);
            let new = if locking { 0 } else { 1 };
            game.set_prop(c.grate, new);
            message(out, game, (34 + old + 2 * new) as u16);
        }
    } else {
        default_message(out, game, verb);
    }
    finish_turn(out, game, None);
}

fn unlock_chain(out: &mut Output, game: &mut Game) {
    let c = game.cast;
    if game.prop(c.chain) == 0 {
        message(out, game, 37);
    } else if game.prop(c.bear) == 0 {
        message(out, game, 41);
    } else {
        game.set_prop(c.chain, 0);
        game.obj_mut(c.chain).is_fixed = false;
        if game.prop(c.bear) != 3 {
            game.set_prop(c.bear, 2);
        }
        let bear_fixed = game.prop(c.bear) != 2;
        game.obj_mut(c.bear).is_fixed = bear_fixed;
        message(out, game, 171);
    }
}

fn lock_chain(out: &mut Output, game: &mut Game) {
    let c = game.cast;
    let loc = game.loc;
    if !game.obj(c.chain).starting_rooms.contains(&loc) {
        message(out, game, 173);
    } else if game.prop(c.chain) != 0 {
        message(out, game, 34);
    } else {
        game.set_prop(c.chain, 2);
        if game.is_toting(c.chain) {
            game.drop_at(c.chain, loc);
        }
        game.obj_mut(c.chain).is_fixed = true;
        message(out, game, 172);
    }
}

////////////
/// LAMP ///
////////////

fn light(out: &mut Output, game: &mut Game, verb: &Word) {
    let lamp = game.cast.lamp;
    if !game.is_here(lamp) {
        default_message(out, game, verb);
    } else if game.lamp_turns <= 0 {
        message(out, game, 184);
    } else {
        game.set_prop(lamp, 1);
        message(out, game, 39);
        if game.here().is_dark() {
            describe_location(out, game);
            return;
        }
    }
    finish_turn(out, game, None);
}

fn extinguish(out: &mut Output, game: &mut Game, verb: &Word) {
    let lamp = game.cast.lamp;
    if game.is_here(lamp) {
        game.set_prop(lamp, 0);
        message(out, game, 40);
        if game.here().is_dark() {
            message(out, game, 16);
        }
    } else {
        default_message(out, game, verb);
    }
    finish_turn(out, game, None);
}

fn wave(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    if obj == c.rod && game.is_toting(obj) && game.is_here(c.fissure) && !game.is_closing {
        // The crystal bridge comes and goes.
        let prop = if game.prop(c.fissure) != 0 { 0 } else { 1 };
        game.set_prop(c.fissure, prop);
        out.say(game.obj(c.fissure).message(2 - prop));
    } else if game.is_toting(obj) || (obj == c.rod && game.is_toting(c.rod2)) {
        default_message(out, game, verb);
    } else {
        message(out, game, 29);
    }
    finish_turn(out, game, None);
}

//////////////
/// COMBAT ///
//////////////

fn i_attack(out: &mut Output, game: &mut Game, verb: &Word) {
    let c = game.cast;
    let mut dangers: Vec<ObjectId> = [c.snake, c.dragon, c.troll, c.bear]
        .into_iter()
        .filter(|id| game.is_here(*id))
        .collect();
    if game.dwarf_stage >= 2 {
        let loc = game.loc;
        dangers.extend(game.dwarves.iter().filter(|d| d.room == loc).map(|_| c.dwarf));
    }
    match dangers.as_slice() {
        [only] => return t_attack(out, game, Some(*only)),
        [_, _, ..] => return ask_verb_what(out, game, verb),
        [] => {}
    }

    let throwing = game.world.vocabulary.is(verb.id, "throw");
    let mut targets = Vec::new();
    if game.is_here(c.bird) && !throwing {
        targets.push(c.bird);
    }
    if game.is_here(c.clam) || game.is_here(c.oyster) {
        targets.push(c.clam);
    }
    match targets.as_slice() {
        [only] => t_attack(out, game, Some(*only)),
        [_, _, ..] => ask_verb_what(out, game, verb),
        [] => t_attack(out, game, None),
    }
}

fn t_attack(out: &mut Output, game: &mut Game, obj: Option<ObjectId>) {
    let c = game.cast;
    match obj {
        Some(bird) if bird == c.bird => {
            if game.is_closed {
                message(out, game, 137);
            } else {
                game.destroy(c.bird);
                game.set_prop(c.bird, 0);
                if !game.obj(c.snake).rooms().is_empty() {
                    game.impossible_treasures += 1;
                }
                message(out, game, 45);
            }
        }
        Some(o) if o == c.clam || o == c.oyster => message(out, game, 150),
        Some(o) if o == c.snake => message(out, game, 46),
        Some(o) if o == c.dwarf => {
            if game.is_closed {
                wake_repository_dwarves(out, game);
                return;
            }
            message(out, game, 49);
        }
        Some(o) if o == c.dragon => {
            if game.prop(c.dragon) != 0 {
                message(out, game, 167);
            } else {
                // "With what? Your bare hands?"
                let text = game.world.message(MessageId(49)).to_string();
                ask(out, game, &text, Pending::AttackDragon, true);
                return;
            }
        }
        Some(o) if o == c.troll => message(out, game, 157),
        Some(o) if o == c.bear => {
            let n = 165 + (game.prop(c.bear) + 1) / 2;
            message(out, game, n as u16);
        }
        _ => message(out, game, 44),
    }
    finish_turn(out, game, None);
}

/// The player insisted on fighting the dragon barehanded, and won. The
/// dragon's body fills the middle of its ledge and the rug moves with it.
pub(crate) fn finish_dragon(out: &mut Output, game: &mut Game) {
    let c = game.cast;
    out.say(game.obj(c.dragon).message(1));
    game.set_prop(c.dragon, 2);
    game.obj_mut(c.dragon).is_fixed = true;

    let old_rooms = game.obj(c.dragon).rooms().to_vec();
    let (Some(first), Some(second)) = (old_rooms.first(), old_rooms.get(1)) else {
        move_to(out, game, None);
        return;
    };
    let middle = RoomId((first.0 + second.0) / 2);

    game.drop_at(c.dragon, middle);
    game.set_prop(c.rug, 0);
    game.obj_mut(c.rug).is_fixed = false;
    game.drop_at(c.rug, middle);
    for room in &old_rooms {
        for id in game.world.objects_at(*room) {
            game.drop_at(id, middle);
        }
    }
    info!(room = middle.0, "dragon slain");
    move_to(out, game, Some(middle));
}

fn throw(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    let mut obj = obj;
    if obj == c.rod && !game.is_toting(c.rod) && game.is_toting(c.rod2) {
        obj = c.rod2;
    }

    if !game.is_toting(obj) {
        write_default_message(out, game, verb);
        return;
    }

    if game.is_treasure(obj) && game.is_here(c.troll) {
        // Toll paid.
        message(out, game, 159);
        game.destroy(obj);
        game.banish_troll();
        finish_turn(out, game, None);
        return;
    }

    if obj == c.food && game.is_here(c.bear) {
        feed(out, game, verb, c.bear);
        return;
    }

    if obj != c.axe {
        t_drop(out, game, verb, obj);
        return;
    }

    let loc = game.loc;
    let null = null_motion(game);
    if let Some(i) = game.dwarves.iter().position(|d| d.room == loc) {
        // One chance in three of killing a dwarf.
        if game.choose_index(3) == 0 {
            game.dwarves.remove(i);
            game.dwarves_killed += 1;
            debug!(killed = game.dwarves_killed, "dwarf killed");
            let n = if game.dwarves_killed == 1 { 149 } else { 47 };
            message(out, game, n);
        } else {
            message(out, game, 48);
        }
        game.drop_at(c.axe, loc);
        do_motion(out, game, &null);
        return;
    }

    if game.is_here(c.dragon) && game.prop(c.dragon) == 0 {
        message(out, game, 152);
        game.drop_at(c.axe, loc);
        do_motion(out, game, &null);
        return;
    }

    if game.is_here(c.troll) {
        message(out, game, 158);
        game.drop_at(c.axe, loc);
        do_motion(out, game, &null);
        return;
    }

    if game.is_here(c.bear) && game.prop(c.bear) == 0 {
        message(out, game, 164);
        game.drop_at(c.axe, loc);
        game.obj_mut(c.axe).is_fixed = true;
        game.set_prop(c.axe, 1);
        finish_turn(out, game, None);
        return;
    }

    t_attack(out, game, None);
}

/// The word that means "stay put and look around".
fn null_motion(game: &Game) -> Word {
    game.world
        .vocabulary
        .lookup("null")
        .cloned()
        .unwrap_or(Word {
            id: WordId(21),
            text: "null".to_string(),
        })
}

fn feed(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    if obj == c.bird {
        message(out, game, 100);
    } else if obj == c.troll {
        message(out, game, 182);
    } else if obj == c.dragon {
        let n = if game.prop(c.dragon) != 0 { 110 } else { 102 };
        message(out, game, n);
    } else if obj == c.snake {
        if game.is_closed || !game.is_here(c.bird) {
            message(out, game, 102);
        } else {
            message(out, game, 101);
            game.destroy(c.bird);
            game.set_prop(c.bird, 0);
            game.impossible_treasures += 1;
        }
    } else if obj == c.dwarf {
        if game.is_here(c.food) {
            message(out, game, 103);
            game.dwarf_stage += 1;
        } else {
            default_message(out, game, verb);
        }
    } else if obj == c.bear {
        if !game.is_here(c.food) {
            match game.prop(c.bear) {
                0 => message(out, game, 102),
                3 => message(out, game, 110),
                _ => default_message(out, game, verb),
            }
        } else {
            // The bear calms down and lets go of the axe.
            game.destroy(c.food);
            game.set_prop(c.bear, 1);
            game.obj_mut(c.axe).is_fixed = false;
            game.set_prop(c.axe, 0);
            message(out, game, 168);
        }
    } else {
        message(out, game, 14);
    }
    finish_turn(out, game, None);
}

////////////////
/// ENDGAME ///
////////////////

fn blast(out: &mut Output, game: &mut Game, verb: &Word) {
    let rod2 = game.cast.rod2;
    if game.prop(rod2) < 0 || !game.is_closed {
        write_default_message(out, game, verb);
        return;
    }
    game.bonus = if game.is_here(rod2) {
        BONUS_BLAST_ROD_HERE
    } else if game.loc == REPOSITORY_NE {
        BONUS_BLAST_NE
    } else {
        BONUS_BLAST_SW
    };
    info!(bonus = game.bonus, "blast");
    message(out, game, game.bonus);
    score_and_exit(out, game);
}

fn t_break(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    if obj == c.vase && game.prop(c.vase) == 0 {
        message(out, game, 198);
        if game.is_toting(c.vase) {
            let loc = game.loc;
            game.drop_at(c.vase, loc);
        }
        game.set_prop(c.vase, 2);
        game.obj_mut(c.vase).is_fixed = true;
    } else if obj == c.mirror && game.is_closed {
        message(out, game, 197);
        wake_repository_dwarves(out, game);
        return;
    } else if obj == c.mirror {
        message(out, game, 148);
    } else {
        default_message(out, game, verb);
    }
    finish_turn(out, game, None);
}

//////////////////
/// INFORMATION ///
//////////////////

fn i_score(out: &mut Output, game: &mut Game) {
    let (score, max_score) = compute_score(game, true);
    out.say(format!(
        "If you were to quit now, you would score {score} out of a possible {max_score}.\n"
    ));
    ask_message(out, game, 143, Pending::Score);
}

/// Fee fie foe foo, said one word per turn in order, brings back the
/// golden eggs.
fn i_fee(out: &mut Output, game: &mut Game, verb: &Word) {
    let eggs = game.cast.eggs;
    let troll = game.cast.troll;
    let n = game.world.vocabulary.synonym_index(verb).unwrap_or(4) as u32;

    if n == 0 {
        game.foobar = Some(game.turns);
        message(out, game, 54);
    } else if game.foobar.map(|start| game.turns - start) != Some(n) {
        message(out, game, 151);
    } else if n < 3 {
        message(out, game, 54);
    } else {
        game.foobar = None;
        let start = game.obj(eggs).starting_rooms.first().copied();
        let loc = game.loc;
        let at_start = start == Some(loc);
        let in_place = start.is_some_and(|room| game.obj(eggs).is_at(room));
        if in_place || (game.is_toting(eggs) && at_start) {
            message(out, game, 54);
        } else {
            if game.obj(eggs).rooms().is_empty()
                && game.obj(troll).rooms().is_empty()
                && game.prop(troll) == 0
            {
                game.set_prop(troll, 1);
            }
            let prop = if at_start {
                0
            } else if game.is_here(eggs) {
                1
            } else {
                2
            };
            out.say(game.obj(eggs).message(prop));
            game.obj_mut(eggs).restore();
        }
    }
    finish_turn(out, game, None);
}

fn i_read(out: &mut Output, game: &mut Game, verb: &Word) {
    let c = game.cast;
    if game.is_closed && game.is_toting(c.oyster) {
        t_read(out, game, verb, c.oyster);
        return;
    }
    let readable: Vec<ObjectId> = [c.magazine, c.tablet, c.message]
        .into_iter()
        .filter(|id| game.is_here(*id))
        .collect();
    match readable.as_slice() {
        [only] if !game.is_dark() => t_read(out, game, verb, *only),
        _ => ask_verb_what(out, game, verb),
    }
}

fn t_read(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    let oyster_hint_used = game
        .world
        .hints
        .get(&OYSTER_HINT)
        .is_some_and(|hint| hint.used);

    if game.is_dark() {
        let name = game.obj(obj).name().to_string();
        i_see_no(out, game, &name);
        return;
    }
    if obj == c.oyster && !oyster_hint_used && game.is_toting(c.oyster) {
        ask_message(out, game, 192, Pending::OysterHint);
        return;
    }

    if obj == c.oyster && oyster_hint_used {
        message(out, game, 194);
    } else if obj == c.message {
        message(out, game, 191);
    } else if obj == c.tablet {
        message(out, game, 196);
    } else if obj == c.magazine {
        message(out, game, 190);
    } else {
        default_message(out, game, verb);
    }
    finish_turn(out, game, None);
}

/// Snapshot the whole game under `handle`. The driver decides where it
/// goes and confirms once it is stored.
pub(crate) fn t_suspend(
    out: &mut Output,
    game: &mut Game,
    handle: &str,
) -> Result<(), PersistenceError> {
    let blob = persist::encode(game)?;
    info!(handle, bytes = blob.len(), "game snapshot taken");
    out.saved(handle, blob);
    Ok(())
}
