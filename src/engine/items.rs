//! Handlers for picking things up, putting them down and dealing with the
//! bottle and its liquids.

use tracing::debug;

use crate::Game;
use crate::engine::helpers::{
    ask_verb_what, default_message, message, say_okay_and_finish, write_default_message,
};
use crate::engine::movement::move_to;
use crate::engine::output::Output;
use crate::engine::turn::{finish_turn, wake_repository_dwarves};
use crate::world::{ObjectId, RoomId, Word};

/// Where the vase can be set down safely without a pillow.
const SOFT_ROOM: RoomId = RoomId(96);

/////////////
/// CARRY ///
/////////////

pub(crate) fn i_carry(out: &mut Output, game: &mut Game, verb: &Word) {
    let objs = game.objects_here();
    if objs.len() != 1 || game.dwarf_here() {
        ask_verb_what(out, game, verb);
    } else {
        t_carry(out, game, verb, objs[0]);
    }
}

pub(crate) fn t_carry(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    if game.is_toting(obj) {
        write_default_message(out, game, verb);
        return;
    }

    let object = game.obj(obj);
    if object.is_fixed || object.rooms().len() > 1 {
        let n = if obj == c.plant && game.prop(obj) <= 0 {
            115
        } else if obj == c.bear && game.prop(obj) == 1 {
            169
        } else if obj == c.chain && game.prop(c.chain) != 0 {
            170
        } else {
            25
        };
        message(out, game, n);
        finish_turn(out, game, None);
        return;
    }

    let mut obj = obj;
    if obj == c.water || obj == c.oil {
        if game.is_here(c.bottle) && game.bottle_contents == Some(obj) {
            // Taking the liquid means taking the full bottle.
            obj = c.bottle;
        } else {
            // Or filling the bottle with it.
            if !game.is_toting(c.bottle) {
                message(out, game, 104);
            } else if game.bottle_contents.is_some() {
                message(out, game, 105);
            } else {
                t_fill(out, game, verb, c.bottle);
                return;
            }
            finish_turn(out, game, None);
            return;
        }
    }

    if game.world.inventory().len() >= game.config.inventory_limit {
        message(out, game, 92);
        finish_turn(out, game, None);
        return;
    }

    if obj == c.bird && game.prop(c.bird) == 0 {
        if game.is_toting(c.rod) {
            message(out, game, 26);
            finish_turn(out, game, Some(obj));
            return;
        }
        if !game.is_toting(c.cage) {
            message(out, game, 27);
            finish_turn(out, game, None);
            return;
        }
        game.set_prop(c.bird, 1);
    }

    if (obj == c.bird || obj == c.cage) && game.prop(c.bird) != 0 {
        game.obj_mut(c.bird).carry();
        game.obj_mut(c.cage).carry();
    } else {
        game.obj_mut(obj).carry();
        if obj == c.bottle {
            if let Some(contents) = game.bottle_contents {
                game.obj_mut(contents).carry();
            }
        }
    }
    debug!(object = obj.0, "carried");
    say_okay_and_finish(out, game);
}

////////////
/// DROP ///
////////////

pub(crate) fn t_drop(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    let mut obj = obj;
    if obj == c.rod && !game.is_toting(c.rod) && game.is_toting(c.rod2) {
        obj = c.rod2;
    }

    if !game.is_toting(obj) {
        write_default_message(out, game, verb);
        return;
    }

    let loc = game.loc;
    if obj == c.bird && game.is_here(c.snake) {
        message(out, game, 30);
        if game.is_closed {
            wake_repository_dwarves(out, game);
            return;
        }
        game.set_prop(c.snake, 1);
        game.destroy(c.snake);
    } else if obj == c.coins && game.is_here(c.machine) {
        // The vending machine swallows the coins and pays out batteries.
        game.destroy(obj);
        game.drop_at(c.batteries, loc);
        out.say(game.obj(c.batteries).message(0));
        finish_turn(out, game, None);
        return;
    } else if obj == c.bird && game.is_here(c.dragon) && game.prop(c.dragon) == 0 {
        message(out, game, 154);
        game.destroy(c.bird);
        game.set_prop(c.bird, 0);
        if !game.obj(c.snake).rooms().is_empty() {
            game.impossible_treasures += 1;
        }
        finish_turn(out, game, None);
        return;
    } else if obj == c.bear && game.is_here(c.troll) {
        message(out, game, 163);
        game.banish_troll();
        game.set_prop(c.troll, 2);
    } else if obj == c.vase && loc != SOFT_ROOM {
        if game.obj(c.pillow).is_at(loc) {
            game.set_prop(c.vase, 0);
        } else {
            game.set_prop(c.vase, 2);
            game.obj_mut(c.vase).is_fixed = true;
        }
        let prop = game.prop(c.vase);
        out.say(game.obj(c.vase).message(prop + 1));
    } else {
        message(out, game, 54);
    }

    if Some(obj) == game.bottle_contents {
        obj = c.bottle;
    }
    if obj == c.bottle {
        if let Some(contents) = game.bottle_contents {
            game.destroy(contents);
        }
    }
    if obj == c.cage && game.prop(c.bird) != 0 {
        game.drop_at(c.bird, loc);
    } else if obj == c.bird {
        game.set_prop(c.bird, 0);
    }
    game.drop_at(obj, loc);
    debug!(object = obj.0, room = loc.0, "dropped");
    finish_turn(out, game, None);
}

////////////////////////
/// BOTTLE AND VASE ///
////////////////////////

pub(crate) fn i_fill(out: &mut Output, game: &mut Game, verb: &Word) {
    let bottle = game.cast.bottle;
    if game.is_here(bottle) {
        t_fill(out, game, verb, bottle);
    } else {
        ask_verb_what(out, game, verb);
    }
}

pub(crate) fn t_fill(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    let liquid = game.here().liquid;
    if obj == c.bottle {
        match liquid {
            None => message(out, game, 106),
            Some(_) if game.bottle_contents.is_some() => message(out, game, 105),
            Some(liquid) => {
                game.bottle_contents = Some(liquid);
                if game.is_toting(c.bottle) {
                    game.obj_mut(liquid).carry();
                }
                message(out, game, if liquid == c.oil { 108 } else { 107 });
            }
        }
    } else if obj == c.vase && game.is_toting(c.vase) {
        if liquid.is_none() {
            message(out, game, 144);
        } else {
            // The vase cracks as the liquid cools.
            message(out, game, 145);
            let loc = game.loc;
            game.drop_at(c.vase, loc);
            game.set_prop(c.vase, 2);
            game.obj_mut(c.vase).is_fixed = true;
        }
    } else {
        default_message(out, game, verb);
    }
    finish_turn(out, game, None);
}

pub(crate) fn i_pour(out: &mut Output, game: &mut Game, verb: &Word) {
    match game.bottle_contents {
        None => ask_verb_what(out, game, verb),
        Some(contents) => t_pour(out, game, verb, contents),
    }
}

pub(crate) fn t_pour(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    if obj == c.bottle {
        i_pour(out, game, verb);
        return;
    }

    if !game.is_toting(obj) {
        default_message(out, game, verb);
    } else if obj != c.oil && obj != c.water {
        message(out, game, 78);
    } else {
        game.set_prop(c.bottle, 1);
        game.bottle_contents = None;
        game.destroy(obj);

        if game.is_here(c.plant) {
            if obj != c.water {
                message(out, game, 112);
            } else {
                // Watering makes the beanstalk grow, twice, then it drowns.
                let prop = game.prop(c.plant);
                out.say(game.obj(c.plant).message(prop + 1));
                let grown = (prop + 2) % 6;
                game.set_prop(c.plant, grown);
                game.set_prop(c.plant2, grown / 2);
                move_to(out, game, None);
                return;
            }
        } else if game.is_here(c.door) {
            let oiled = i32::from(obj == c.oil);
            game.set_prop(c.door, oiled);
            message(out, game, (113 + oiled) as u16);
        } else {
            message(out, game, 77);
        }
    }
    finish_turn(out, game, None);
}

pub(crate) fn i_drink(out: &mut Output, game: &mut Game, verb: &Word) {
    let water = game.cast.water;
    if game.is_here(water) || game.here().liquid == Some(water) {
        t_drink(out, game, verb, water);
    } else {
        ask_verb_what(out, game, verb);
    }
}

pub(crate) fn t_drink(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    if obj != c.water {
        message(out, game, 110);
    } else if game.is_here(c.water) {
        game.set_prop(c.bottle, 1);
        game.bottle_contents = None;
        game.destroy(c.water);
        message(out, game, 74);
    } else if game.here().liquid == Some(c.water) {
        default_message(out, game, verb);
    }
    finish_turn(out, game, None);
}

pub(crate) fn i_eat(out: &mut Output, game: &mut Game, verb: &Word) {
    let food = game.cast.food;
    if game.is_here(food) {
        t_eat(out, game, verb, food);
    } else {
        ask_verb_what(out, game, verb);
    }
}

pub(crate) fn t_eat(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    let creatures = [
        c.bird, c.snake, c.clam, c.oyster, c.dwarf, c.dragon, c.troll, c.bear,
    ];
    if obj == c.food {
        game.destroy(c.food);
        message(out, game, 72);
    } else if creatures.contains(&obj) {
        message(out, game, 71);
    } else {
        default_message(out, game, verb);
    }
    finish_turn(out, game, None);
}

/////////////////////////
/// FIND AND INVENTORY ///
/////////////////////////

pub(crate) fn t_find(out: &mut Output, game: &mut Game, verb: &Word, obj: ObjectId) {
    let c = game.cast;
    if game.is_toting(obj) {
        message(out, game, 24);
    } else if game.is_closed {
        message(out, game, 138);
    } else if game.is_here(obj)
        || game.here().liquid == Some(obj)
        || (obj == c.dwarf && game.dwarf_here())
    {
        message(out, game, 94);
    } else {
        default_message(out, game, verb);
    }
    finish_turn(out, game, None);
}

pub(crate) fn i_inventory(out: &mut Output, game: &mut Game) {
    let bear = game.cast.bear;
    let carried: Vec<ObjectId> = game
        .world
        .inventory()
        .into_iter()
        .filter(|id| *id != bear)
        .collect();

    if !carried.is_empty() {
        message(out, game, 99);
    }
    for id in &carried {
        out.say(&game.obj(*id).inventory_message);
    }
    if game.is_toting(bear) {
        message(out, game, 141);
    }
    if carried.is_empty() {
        message(out, game, 98);
    }
    finish_turn(out, game, None);
}
