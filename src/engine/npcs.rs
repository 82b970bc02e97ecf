use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Game;
use crate::engine::helpers::message;
use crate::engine::output::Output;
use crate::engine::render::describe_location;
use crate::engine::turn::die;
use crate::world::{Condition, Move, RoomId, World};

/// Room the first dwarves to be met retreat to.
const DWARF_RETREAT: RoomId = RoomId(18);
/// Room where the pirate's stash of messages turns up.
const MESSAGE_ROOM: RoomId = RoomId(140);
/// The pyramid's home rooms; the pirate does not count it as loot there.
const PLOVER_ROOMS: [u16; 2] = [100, 101];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Dwarf,
    Pirate,
}

/// A dwarf or the pirate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: Role,
    pub room: RoomId,
    pub old_room: RoomId,
    pub has_seen_adventurer: bool,
}

impl Actor {
    pub fn new(role: Role, room: RoomId) -> Self {
        Actor {
            role,
            room,
            old_room: room,
            has_seen_adventurer: false,
        }
    }

    pub fn start_at(&mut self, room: RoomId) {
        self.room = room;
        self.old_room = room;
    }

    /// Actors stay in the deep cave, never take forced passages and never
    /// use moves reserved for the player. The pirate also keeps out of
    /// rooms marked as off limits to him.
    pub fn can_move(&self, world: &World, mv: &Move) -> bool {
        let Some(to) = mv.destination() else {
            return false;
        };
        let room = world.room(to);
        let allowed = room.is_after_hall_of_mists()
            && !room.is_forced()
            && mv.condition != Condition::NotDwarf;
        match self.role {
            Role::Dwarf => allowed,
            Role::Pirate => allowed && !room.is_forbidden_to_pirate,
        }
    }
}

/// Where the actor could wander next: sorted by room number so a seeded
/// game always picks the same way.
fn destinations(world: &World, actor: &Actor) -> Vec<RoomId> {
    let mut rooms: Vec<RoomId> = world
        .room(actor.room)
        .travel_table
        .iter()
        .filter(|mv| actor.can_move(world, mv))
        .filter_map(Move::destination)
        .filter(|to| *to != actor.old_room && *to != actor.room)
        .collect();
    rooms.sort();
    rooms.dedup();
    rooms
}

pub(crate) fn move_dwarves(out: &mut Output, game: &mut Game) {
    if game.dwarf_stage == 1 {
        first_encounter(out, game);
        return;
    }

    let mut dwarf_count = 0;
    let mut dwarf_attacks = 0;
    let mut knife_wounds = 0;

    let mut actors = std::mem::take(&mut game.dwarves);
    actors.push(game.pirate.clone());

    for actor in actors.iter_mut() {
        let choices = destinations(&game.world, actor);
        let new_room = if choices.is_empty() {
            actor.old_room
        } else {
            choices[game.choose_index(choices.len())]
        };
        actor.old_room = actor.room;
        actor.room = new_room;

        if game.loc == actor.room || game.loc == actor.old_room {
            actor.has_seen_adventurer = true;
        } else if game.here().is_before_hall_of_mists() {
            actor.has_seen_adventurer = false;
        }

        if !actor.has_seen_adventurer {
            continue;
        }
        actor.room = game.loc;

        match actor.role {
            Role::Dwarf => {
                dwarf_count += 1;
                // No walking and stabbing in the same turn.
                if actor.room == actor.old_room {
                    dwarf_attacks += 1;
                    game.knife_location = Some(game.loc);
                    if game.random() < 0.095 * (f64::from(game.dwarf_stage) - 2.0) {
                        knife_wounds += 1;
                    }
                }
            }
            Role::Pirate => pirate_strikes(out, game, actor),
        }
    }

    if let Some(pirate) = actors.pop() {
        game.pirate = pirate;
    }
    game.dwarves = actors;

    if dwarf_count == 1 {
        message(out, game, 4);
    } else if dwarf_count > 1 {
        out.say(format!(
            "There are {dwarf_count} threatening little dwarves in the room with you.\n"
        ));
    }

    if dwarf_attacks > 0 && game.dwarf_stage == 2 {
        game.dwarf_stage = 3;
    }

    if dwarf_attacks > 0 {
        debug!(dwarf_attacks, knife_wounds, "dwarves attack");
        let k = if dwarf_attacks == 1 {
            message(out, game, 5);
            52
        } else {
            out.say(format!("{dwarf_attacks} of them throw knives at you!\n"));
            6
        };

        if knife_wounds == 0 {
            message(out, game, k);
        } else {
            if knife_wounds == 1 {
                message(out, game, k + 1);
            } else {
                out.say(format!("{knife_wounds} of them get you!\n"));
            }
            game.oldloc2 = game.loc;
            die(out, game);
            return;
        }
    }

    describe_location(out, game);
}

/// Stage 1: a 5% chance per turn past the Hall of Mists of meeting the
/// first dwarf, who throws an axe and runs.
fn first_encounter(out: &mut Output, game: &mut Game) {
    if game.here().is_before_hall_of_mists() || game.random() < 0.95 {
        describe_location(out, game);
        return;
    }
    game.dwarf_stage = 2;

    for _ in 0..2 {
        if game.random() < 0.5 && !game.dwarves.is_empty() {
            let i = game.choose_index(game.dwarves.len());
            game.dwarves.remove(i);
        }
    }
    let loc = game.loc;
    for dwarf in game.dwarves.iter_mut().filter(|d| d.room == loc) {
        dwarf.start_at(DWARF_RETREAT);
    }
    debug!(dwarves = game.dwarves.len(), "first dwarf encounter");

    message(out, game, 3);
    let axe = game.cast.axe;
    game.drop_at(axe, loc);
    describe_location(out, game);
}

fn pirate_strikes(out: &mut Output, game: &mut Game, pirate: &mut Actor) {
    let chest = game.cast.chest;
    if game.loc == game.chest_room || game.prop(chest) >= 0 {
        return;
    }

    let platinum = game.cast.platinum;
    let in_plover_rooms = PLOVER_ROOMS.contains(&game.loc.0);
    let loot: Vec<_> = game
        .world
        .treasures()
        .into_iter()
        .filter(|t| game.is_toting(*t))
        .filter(|t| !(*t == platinum && in_plover_rooms))
        .collect();

    if loot.is_empty() {
        let treasure_here = game.world.treasures().into_iter().any(|t| game.is_here(t));
        let one_treasure_left = game.treasures_not_found == game.impossible_treasures + 1;
        let lamp = game.cast.lamp;
        let shiver_me_timbers = one_treasure_left
            && !treasure_here
            && game.obj(chest).rooms().is_empty()
            && game.is_here(lamp)
            && game.prop(lamp) == 1;

        if !shiver_me_timbers {
            if pirate.old_room != pirate.room && game.random() < 0.2 {
                message(out, game, 127);
            }
            return;
        }

        // He is spotted as he makes off, and leaves his chest behind.
        message(out, game, 186);
        let chest_room = game.chest_room;
        game.drop_at(chest, chest_room);
        game.drop_at(game.cast.message, MESSAGE_ROOM);
    } else {
        message(out, game, 128);
        let chest_room = game.chest_room;
        if game.obj(game.cast.message).rooms().is_empty() {
            game.drop_at(chest, chest_room);
        }
        game.drop_at(game.cast.message, MESSAGE_ROOM);
        for treasure in loot {
            game.drop_at(treasure, chest_room);
        }
        debug!("pirate stole the player's treasures");
    }

    pirate.start_at(game.chest_room);
    pirate.has_seen_adventurer = false;
}
