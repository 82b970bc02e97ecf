//! The per-command protocol: yes/no questions, clocks, lamp fuel, hints,
//! death and the closing of the cave.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Game;
use crate::engine::actions::finish_dragon;
use crate::engine::helpers::message;
use crate::engine::movement::move_to;
use crate::engine::npcs::{Actor, Role};
use crate::engine::output::Output;
use crate::engine::parser::dispatch_command;
use crate::engine::render::describe_location;
use crate::engine::score::score_and_exit;
use crate::error::PersistenceError;
use crate::world::{HintId, MessageId, ObjectId, RoomId};

/// Rooms the five dwarves start in.
const DWARF_LAIRS: [u16; 5] = [19, 27, 33, 44, 64];
/// Y2, where "plugh" echoes and the closing clock pauses.
const Y2: RoomId = RoomId(33);
/// Where reincarnated players wake up and where the lamp is returned.
const BUILDING: RoomId = RoomId(3);
const ROAD: RoomId = RoomId(1);
/// The two ends of the repository.
const REPOSITORY_NE: RoomId = RoomId(115);
const REPOSITORY_SW: RoomId = RoomId(116);

/// Hint the instructions count as having given.
const INSTRUCTIONS_HINT: HintId = HintId(3);
/// Hint whose counter keeps climbing after it is offered.
const BIRD_HINT: HintId = HintId(5);
/// The oyster's hint is offered by reading, not by loitering.
pub(crate) const OYSTER_HINT: HintId = HintId(2);
/// Hints that never come up by loitering.
const NEVER_OFFERED: u32 = 9999;

/// What a yes/no answer will be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pending {
    Instructions,
    Resurrect,
    Hint(HintId),
    Quit,
    Score,
    AttackDragon,
    OysterHint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub pending: Pending,
    /// A casual question lets any other command through instead of nagging
    /// for an answer.
    pub casual: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingCommand,
    AwaitingYesNo(Pending),
    /// Waiting to hear whether the player wants to be reincarnated.
    Dead,
    Finished,
}

fn answer(word: &str) -> Option<bool> {
    match word.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

pub(crate) fn ask(out: &mut Output, game: &mut Game, text: &str, pending: Pending, casual: bool) {
    out.say(text);
    game.pending = Some(Question { pending, casual });
}

pub(crate) fn ask_message(out: &mut Output, game: &mut Game, n: u16, pending: Pending) {
    let text = game.world.message(MessageId(n)).to_string();
    ask(out, game, &text, pending, false);
}

/////////////////
/// GAME START ///
/////////////////

pub(crate) fn start(out: &mut Output, game: &mut Game) {
    game.bottle_contents = Some(game.cast.water);
    ask_message(out, game, 65, Pending::Instructions);
}

fn start2(out: &mut Output, game: &mut Game, wants_instructions: bool) {
    if wants_instructions {
        message(out, game, 1);
        if let Some(hint) = game.world.hints.get_mut(&INSTRUCTIONS_HINT) {
            hint.used = true;
        }
        game.lamp_turns = game.config.lamp_turns_with_instructions;
    }

    game.loc = ROAD;
    game.oldloc = ROAD;
    game.oldloc2 = ROAD;
    game.dwarves = DWARF_LAIRS
        .iter()
        .map(|n| Actor::new(Role::Dwarf, RoomId(*n)))
        .collect();
    game.pirate = Actor::new(Role::Pirate, game.chest_room);

    let treasures = game.world.treasures();
    game.treasures_not_found = treasures.len() as i32;
    for treasure in treasures {
        game.set_prop(treasure, -1);
    }
    info!(seeded = game.config.seed.is_some(), "adventure begins");

    describe_location(out, game);
}

//////////////////////
/// COMMAND CYCLE ///
//////////////////////

pub(crate) fn do_command(
    out: &mut Output,
    game: &mut Game,
    words: &[&str],
) -> Result<(), PersistenceError> {
    if let Some(question) = game.pending {
        let reply = words.first().and_then(|w| answer(w));
        match reply {
            // A casual question only acts on "yes"; anything else is taken
            // as the player's next command.
            Some(true) if question.casual => {
                game.pending = None;
                resolve(out, game, question.pending, true);
                return Ok(());
            }
            _ if question.casual => game.pending = None,
            Some(yes) => {
                game.pending = None;
                resolve(out, game, question.pending, yes);
                return Ok(());
            }
            None => {
                out.say("Please answer the question.");
                return Ok(());
            }
        }
    }

    if game.is_dead {
        out.say("You have gotten yourself killed.");
        return Ok(());
    }
    if game.is_done {
        return Ok(());
    }

    game.turns += 1;
    if game.treasures_not_found == 0 && game.loc.0 >= 15 && game.loc != Y2 {
        game.clock1 -= 1;
        if game.clock1 == 0 {
            // The command still runs.
            start_closing_cave(out, game);
        }
    }
    if game.clock1 < 0 {
        game.clock2 -= 1;
        if game.clock2 == 0 {
            close_cave(out, game);
            return Ok(());
        }
    }

    if !burn_lamp(out, game) {
        return Ok(());
    }

    dispatch_command(out, game, words)
}

/// One turn of lamp fuel, with the batteries, the warnings and the lamp
/// giving out. False when the player is stranded and the game is over.
fn burn_lamp(out: &mut Output, game: &mut Game) -> bool {
    let lamp = game.cast.lamp;
    let batteries = game.cast.batteries;
    let threshold = game.config.low_fuel_threshold;

    if game.prop(lamp) == 1 {
        game.lamp_turns -= 1;
    }

    if game.lamp_turns <= threshold
        && game.is_here(batteries)
        && game.prop(batteries) == 0
        && game.is_here(lamp)
    {
        message(out, game, 188);
        game.set_prop(batteries, 1);
        if game.is_toting(batteries) {
            let loc = game.loc;
            game.drop_at(batteries, loc);
        }
        game.lamp_turns += game.config.battery_charge;
        game.warned_about_dim_lamp = false;
        debug!(lamp_turns = game.lamp_turns, "fresh batteries");
    } else if game.lamp_turns == 0 {
        game.lamp_turns = -1;
        game.set_prop(lamp, 0);
        if game.is_here(lamp) {
            message(out, game, 184);
        }
    } else if game.lamp_turns < 0 && game.here().is_aboveground() {
        message(out, game, 185);
        game.gave_up = true;
        score_and_exit(out, game);
        return false;
    } else if game.lamp_turns <= threshold
        && !game.warned_about_dim_lamp
        && game.is_here(lamp)
    {
        game.warned_about_dim_lamp = true;
        let n = if game.prop(batteries) == 1 {
            189
        } else if game.obj(batteries).rooms().is_empty() {
            183
        } else {
            187
        };
        message(out, game, n);
    }
    true
}

fn resolve(out: &mut Output, game: &mut Game, pending: Pending, yes: bool) {
    match pending {
        Pending::Instructions => start2(out, game, yes),
        Pending::Resurrect => reincarnate(out, game, yes),
        Pending::Hint(id) => {
            if yes {
                let answer = game.world.hints.get_mut(&id).map(|hint| {
                    hint.used = true;
                    hint.answer
                });
                if let Some(answer) = answer {
                    out.say(game.world.message(answer));
                }
            } else {
                message(out, game, 54);
            }
        }
        Pending::Quit | Pending::Score => {
            message(out, game, 54);
            if yes {
                score_and_exit(out, game);
            }
        }
        Pending::AttackDragon => finish_dragon(out, game),
        Pending::OysterHint => {
            if yes {
                if let Some(hint) = game.world.hints.get_mut(&OYSTER_HINT) {
                    hint.used = true;
                }
                message(out, game, 193);
            } else {
                message(out, game, 54);
            }
        }
    }
}

/////////////////////
/// END OF A TURN ///
/////////////////////

/// Bookkeeping after every action that took time. `obj` is the object the
/// player just dealt with, if any; the bird hint looks at it.
pub(crate) fn finish_turn(out: &mut Output, game: &mut Game, obj: Option<ObjectId>) {
    // Every command perturbs the generator.
    game.random();

    let ids: Vec<HintId> = game.world.hints.keys().copied().collect();
    for id in ids {
        let Some(hint) = game.world.hints.get(&id) else {
            continue;
        };
        if hint.turns_needed == NEVER_OFFERED || hint.used {
            continue;
        }
        if !hint.rooms.contains(&game.loc) {
            if let Some(hint) = game.world.hints.get_mut(&id) {
                hint.turn_counter = 0;
            }
            continue;
        }

        let counter = hint.turn_counter + 1;
        let due = counter >= hint.turns_needed;
        let question = hint.question;
        if let Some(hint) = game.world.hints.get_mut(&id) {
            hint.turn_counter = if due && id != BIRD_HINT { 0 } else { counter };
        }
        if due && should_offer_hint(game, id, obj) {
            if let Some(hint) = game.world.hints.get_mut(&id) {
                hint.turn_counter = 0;
            }
            debug!(hint = id.0, "offering hint");
            let text = game.world.message(question).to_string();
            ask(out, game, &text, Pending::Hint(id), false);
            return;
        }
    }

    if game.is_closed {
        let oyster = game.cast.oyster;
        if game.prop(oyster) < 0 && game.is_toting(oyster) {
            out.say(game.obj(oyster).message(1));
        }
        for id in game.world.inventory() {
            let prop = game.prop(id);
            if prop < 0 {
                game.set_prop(id, -1 - prop);
            }
        }
    }

    game.could_fall_in_pit = game.is_dark();
    if game.knife_location.is_some_and(|room| room != game.loc) {
        game.knife_location = None;
    }
}

fn should_offer_hint(game: &Game, id: HintId, obj: Option<ObjectId>) -> bool {
    let c = &game.cast;
    match id.0 {
        // How to get in: the grate is locked and no keys in sight.
        4 => game.prop(c.grate) == 0 && !game.is_here(c.keys),
        // Catching the bird while waving the rod around.
        5 => game.is_here(c.bird) && game.is_toting(c.rod) && obj == Some(c.bird),
        6 => game.is_here(c.snake) && !game.is_here(c.bird),
        // Lost in a maze, dropping nothing, walking in circles.
        7 => {
            game.objects_here().is_empty()
                && game.world.objects_at(game.oldloc).is_empty()
                && game.world.objects_at(game.oldloc2).is_empty()
                && game.world.inventory().len() > 1
        }
        8 => game.prop(c.emerald) != 1 && game.prop(c.platinum) != 1,
        9 => true,
        _ => false,
    }
}

/////////////
/// DEATH ///
/////////////

/// Died where the player stands: message 23, belongings stay here.
pub(crate) fn die_here(out: &mut Output, game: &mut Game) {
    message(out, game, 23);
    game.oldloc2 = game.loc;
    die(out, game);
}

pub(crate) fn die(out: &mut Output, game: &mut Game) {
    game.deaths += 1;
    game.is_dead = true;
    info!(deaths = game.deaths, "player died");

    if game.is_closing {
        message(out, game, 131);
        score_and_exit(out, game);
        return;
    }

    let n = (79 + 2 * game.deaths) as u16;
    ask_message(out, game, n, Pending::Resurrect);
}

fn reincarnate(out: &mut Output, game: &mut Game, yes: bool) {
    if !yes {
        message(out, game, 54);
        score_and_exit(out, game);
        return;
    }

    message(out, game, (80 + 2 * game.deaths) as u16);
    if game.deaths >= game.config.max_deaths {
        score_and_exit(out, game);
        return;
    }

    game.is_dead = false;
    let lamp = game.cast.lamp;
    if game.is_toting(lamp) {
        game.set_prop(lamp, 0);
    }
    let oldloc2 = game.oldloc2;
    for id in game.world.inventory() {
        let room = if id == lamp { ROAD } else { oldloc2 };
        game.drop_at(id, room);
    }
    game.loc = BUILDING;
    describe_location(out, game);
}

////////////////////////
/// CLOSING THE CAVE ///
////////////////////////

pub(crate) fn start_closing_cave(out: &mut Output, game: &mut Game) {
    let c = game.cast;
    game.set_prop(c.grate, 0);
    game.set_prop(c.fissure, 0);
    game.dwarves.clear();
    game.banish_troll();
    if game.prop(c.bear) != 3 {
        game.destroy(c.bear);
    }
    for id in [c.chain, c.axe] {
        game.set_prop(id, 0);
        game.obj_mut(id).is_fixed = false;
    }
    message(out, game, 129);
    game.clock1 = -1;
    game.is_closing = true;
    info!(turn = game.turns, "cave is closing");
}

pub(crate) fn close_cave(out: &mut Output, game: &mut Game) {
    let c = game.cast;

    let northeast = [
        (c.bottle, -2),
        (c.plant, -1),
        (c.oyster, -1),
        (c.lamp, -1),
        (c.rod, -1),
        (c.dwarf, -1),
    ];
    for (id, prop) in northeast {
        game.set_prop(id, prop);
        game.drop_at(id, REPOSITORY_NE);
    }
    game.loc = REPOSITORY_NE;
    game.oldloc = REPOSITORY_NE;
    game.oldloc2 = REPOSITORY_NE;

    let southwest = [
        (c.grate, -1),
        (c.snake, -2),
        (c.bird, -2),
        (c.cage, -1),
        (c.rod2, -1),
        (c.pillow, -1),
    ];
    for (id, prop) in southwest {
        game.set_prop(id, prop);
        game.drop_at(id, REPOSITORY_SW);
    }

    let mirror = game.obj_mut(c.mirror);
    mirror.place(vec![REPOSITORY_NE, REPOSITORY_SW]);
    mirror.is_fixed = true;

    game.is_closed = true;
    for id in game.world.inventory() {
        game.destroy(id);
    }

    message(out, game, 132);
    info!(turn = game.turns, "cave closed");
    move_to(out, game, None);
}

pub(crate) fn wake_repository_dwarves(out: &mut Output, game: &mut Game) {
    message(out, game, 136);
    score_and_exit(out, game);
}
